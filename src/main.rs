use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod analysis;
mod config;
mod error;
mod git;
mod identity;
mod output;

use analysis::Aggregator;
use crate::config::Config;
use git::{GitCli, RepositoryWalker};
use identity::{IdentityResolver, Mapping};
use output::Reporter;

#[derive(Parser)]
#[command(
    name = "grader",
    author,
    version,
    about = "Count the commits inside git repositories for grading",
    long_about = None
)]
struct Cli {
    /// Paths of git repos
    #[arg(value_name = "PATH", required = true, num_args = 1..)]
    paths: Vec<PathBuf>,

    /// Path of mapping file
    #[arg(short, long, value_name = "PATH")]
    mapping: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    // Logs go to stderr so the report on stdout stays clean
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if !config.output.color {
        colored::control::set_override(false);
    }

    let mapping = cli.mapping.as_deref().map(Mapping::load).transpose()?;
    let resolver = IdentityResolver::new(mapping);

    let walker = RepositoryWalker::new(GitCli::new(config.git.binary.clone()))?
        .with_progress(config.output.progress);
    let history = walker.walk(&cli.paths)?;

    let totals = Aggregator::aggregate(&resolver, &history.commits);
    info!("Aggregated {} identities", totals.len());

    Reporter::new(&config.output).print(&history.authors, &totals, resolver.is_mapped());

    Ok(())
}
