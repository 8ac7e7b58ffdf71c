//! Errors raised while reading a playlist container

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LibraryError {
    /// A folder end marker with no open folder to close
    #[error("folder end at entry {position} has no matching folder start")]
    MalformedHierarchy { position: usize },

    #[error("entry {position} could not be decoded")]
    InvalidEntry {
        position: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Non-fatal problem noticed while walking a container
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Entry of an unrecognized type, skipped
    UnknownEntry {
        position: usize,
        kind: String,
        value: String,
    },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::UnknownEntry {
                position,
                kind,
                value,
            } => write!(f, "skipped unknown entry {} ({}): {}", position, kind, value),
        }
    }
}
