use super::*;
use crate::error::{GraderError, Result};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use tracing::{debug, info};

const VERIFY_ARGS: &[&str] = &["rev-parse", "--is-inside-work-tree"];
const LOG_ARGS: &[&str] = &["--no-pager", "log", "--pretty=format:%H"];
const SHOW_ARGS: &[&str] = &["show", "--stat", "--no-color", "--pretty=medium", "--date=default"];

/// Walks repositories one after another and collects every non-merge commit.
pub struct RepositoryWalker<R: GitRunner> {
    runner: R,
    parser: CommitParser,
    progress: bool,
}

impl<R: GitRunner> RepositoryWalker<R> {
    pub fn new(runner: R) -> Result<Self> {
        Ok(Self {
            runner,
            parser: CommitParser::new()?,
            progress: true,
        })
    }

    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Processes `repos` in order. The first failure aborts the whole walk and
    /// nothing collected so far is returned.
    pub fn walk<P: AsRef<Path>>(&self, repos: &[P]) -> Result<History> {
        let mut history = History::default();

        for repo in repos {
            let repo = repo.as_ref();
            println!("{} {}", "Working on".bright_cyan(), repo.display());
            self.walk_repository(repo, &mut history)?;
        }
        println!();

        info!(
            "Collected {} commits from {} repositories ({} distinct authors)",
            history.commits.len(),
            repos.len(),
            history.authors.len()
        );

        Ok(history)
    }

    fn walk_repository(&self, repo: &Path, history: &mut History) -> Result<()> {
        self.verify_work_tree(repo)?;

        let ids = self.commit_ids(repo)?;
        info!("Found {} commits in {}", ids.len(), repo.display());

        let pb = self.progress_bar(ids.len());
        let mut merges = 0usize;

        for id in &ids {
            let mut args = SHOW_ARGS.to_vec();
            args.push(id);
            let block = self.runner.run(repo, &args)?;

            match self.parser.parse(id, &block)? {
                ParsedCommit::Merge => {
                    debug!("Skipping merge commit {}", id);
                    merges += 1;
                }
                ParsedCommit::Commit(commit) => {
                    debug!("{}", commit);
                    history.push(commit);
                }
            }
            pb.inc(1);
        }

        pb.finish_and_clear();
        debug!("Skipped {} merge commits in {}", merges, repo.display());
        Ok(())
    }

    fn verify_work_tree(&self, repo: &Path) -> Result<()> {
        let not_a_repo = |reason: String| GraderError::NotARepository {
            path: repo.to_path_buf(),
            reason,
        };

        if !repo.is_dir() {
            return Err(not_a_repo("no such directory".to_string()));
        }

        match self.runner.run(repo, VERIFY_ARGS) {
            Ok(out) if out.trim() == "true" => Ok(()),
            Ok(out) => Err(not_a_repo(format!(
                "not inside a work tree ({})",
                out.trim()
            ))),
            Err(GraderError::CommandExecution { stderr, .. }) => Err(not_a_repo(stderr)),
            Err(e) => Err(e),
        }
    }

    fn commit_ids(&self, repo: &Path) -> Result<Vec<String>> {
        Ok(self
            .runner
            .run(repo, LOG_ARGS)?
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.progress {
            return ProgressBar::hidden();
        }
        let style = ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} commits ({eta})",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
        ProgressBar::new(len as u64).with_style(style)
    }
}
