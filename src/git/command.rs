use crate::error::{GraderError, Result};
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Read-only history queries against one repository.
///
/// The target repository is always passed explicitly; nothing depends on the
/// process working directory.
pub trait GitRunner {
    /// Runs `git <args>` inside `repo` and returns its standard output.
    fn run(&self, repo: &Path, args: &[&str]) -> Result<String>;
}

pub struct GitCli {
    binary: String,
}

impl GitCli {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitRunner for GitCli {
    fn run(&self, repo: &Path, args: &[&str]) -> Result<String> {
        let command = format!("{} -C {} {}", self.binary, repo.display(), args.join(" "));
        debug!("Running {}", command);

        // Pin the locale so the stat summary wording is always English.
        let output = Command::new(&self.binary)
            .arg("-C")
            .arg(repo)
            .args(args)
            .env("LC_ALL", "C")
            .output()
            .map_err(|source| GraderError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(GraderError::CommandExecution {
                command,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
