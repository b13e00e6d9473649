//! Error types for fwstamp

use std::fmt;
use std::path::PathBuf;

/// Main error type for fwstamp operations
#[derive(Debug)]
pub enum FwstampError {
    /// Repository root has no `.git` entry
    NotARepository(PathBuf),

    /// No `git` executable on PATH
    GitUnavailable(String),

    /// Repository exists but HEAD does not resolve to a commit
    NoCommits(String),

    /// Version header could not be read
    HeaderRead { path: PathBuf, source: std::io::Error },

    /// Output directory left behind by a previous run
    OutputDirExists(PathBuf),

    /// Build artifact expected at a fixed path is missing
    MissingArtifact(PathBuf),

    /// Invalid option value (variant spec, date, ...)
    InvalidArgument(String),

    /// IO error
    IoError(std::io::Error),

    /// Generic error with message
    Generic(String),
}

impl FwstampError {
    /// Convenience constructor for invalid option values
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        FwstampError::InvalidArgument(msg.into())
    }
}

impl fmt::Display for FwstampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FwstampError::NotARepository(path) => {
                write!(f, "Not a git repository: {}", path.display())
            }
            FwstampError::GitUnavailable(msg) => write!(f, "git unavailable: {msg}"),
            FwstampError::NoCommits(msg) => write!(f, "No commits to describe: {msg}"),
            FwstampError::HeaderRead { path, source } => {
                write!(f, "Failed to read version header {}: {source}", path.display())
            }
            FwstampError::OutputDirExists(path) => {
                write!(f, "Output directory already exists: {}", path.display())
            }
            FwstampError::MissingArtifact(path) => {
                write!(f, "Build artifact not found: {}", path.display())
            }
            FwstampError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
            FwstampError::IoError(err) => write!(f, "IO error: {err}"),
            FwstampError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for FwstampError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FwstampError::HeaderRead { source, .. } => Some(source),
            FwstampError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FwstampError {
    fn from(err: std::io::Error) -> Self {
        FwstampError::IoError(err)
    }
}

impl From<anyhow::Error> for FwstampError {
    fn from(err: anyhow::Error) -> Self {
        FwstampError::Generic(format!("{err:#}"))
    }
}

/// Result type for fwstamp operations
pub type Result<T> = std::result::Result<T, FwstampError>;
