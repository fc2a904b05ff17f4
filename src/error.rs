use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a single `musictl` command.
#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("player unavailable: {0}")]
    PlayerUnavailable(String),

    #[error("no track currently playing or track not found")]
    NoActiveTrack,

    #[error("destination already exists: {}", .0.display())]
    MoveConflict(PathBuf),

    #[error("invalid directory '{name}'. Available: {available}")]
    InvalidDirectory { name: String, available: String },

    #[error("directory does not exist: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("no subdirectories found in {}", .0.display())]
    NoSubdirectories(PathBuf),

    #[error("cannot read tags: {0}")]
    Tags(String),

    #[error("launcher error: {0}")]
    Launcher(String),

    #[error("{0} file(s) failed to import or to be logged")]
    ImportFailed(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<::config::ConfigError> for Error {
    fn from(e: ::config::ConfigError) -> Self {
        Error::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// How a command that did not fail ended.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Outcome {
    Done,
    Cancelled,
}
