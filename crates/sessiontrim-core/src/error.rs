//! Errors surfaced by the compaction engine

use sessiontrim_session::SessionError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompactError {
    #[error("no sessions directory found at {}", path.display())]
    SessionsDirNotFound { path: PathBuf },

    #[error("session file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("malformed record at {}:{line}: {reason}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl CompactError {
    /// The session could not be located; nothing was touched
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CompactError::SessionsDirNotFound { .. } | CompactError::NotFound { .. }
        )
    }
}

impl From<SessionError> for CompactError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NotFound { path } => CompactError::NotFound { path },
            SessionError::Parse { path, line, reason } => {
                CompactError::Parse { path, line, reason }
            }
            SessionError::Io { path, source } => CompactError::Io {
                action: "read",
                path,
                source,
            },
        }
    }
}
