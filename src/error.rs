use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraderError>;

#[derive(Error, Debug)]
pub enum GraderError {
    #[error("Failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Command `{command}` failed: {stderr}")]
    CommandExecution { command: String, stderr: String },
    #[error("{} is not a git working tree: {reason}", path.display())]
    NotARepository { path: PathBuf, reason: String },
    #[error("{commit}: Can't find author info")]
    MissingAuthor { commit: String },
    #[error("{commit}: Can't find date")]
    MissingDate { commit: String },
    #[error("{commit}: Invalid date {value:?}: {source}")]
    InvalidDate {
        commit: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("Couldn't read mapping file {}: {reason}", path.display())]
    MappingLoad { path: PathBuf, reason: String },
    #[error("Failed to compile pattern {name}: {source}")]
    Pattern {
        name: &'static str,
        #[source]
        source: regex::Error,
    },
}
