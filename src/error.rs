use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the snapshot/diff core.
///
/// `InvalidPattern` and `InvalidRoot` are startup failures and abort the run;
/// `UnreadableFile` and `Enumeration` are per-cycle failures that callers
/// absorb so a poll always yields a best-effort snapshot.
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid watch root `{}`: {reason}", .path.display())]
    InvalidRoot { path: PathBuf, reason: String },

    #[error("cannot read `{}`: {source}", .path.display())]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot enumerate `{}`: {message}", .path.display())]
    Enumeration { path: PathBuf, message: String },
}

impl WatchError {
    pub fn invalid_root(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidRoot {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
