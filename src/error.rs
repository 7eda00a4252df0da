use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum FilebucketError {
    #[error("Invalid path format: {path:?} ({reason})")]
    InvalidPathFormat { path: String, reason: &'static str },
    #[error("Invalid prefix: {0:?} must end with '/'")]
    InvalidPrefix(String),
    #[error("Structural invariant violated: {0}")]
    StructuralInvariantViolation(String),
    #[error("Unreachable state: {0}")]
    UnreachableState(String),
    #[error("Input is not sorted: {next:?} follows {previous:?}")]
    UnsortedInput { previous: String, next: String },
    #[error("Cursor advanced past the end of the path sequence")]
    CursorExhausted,
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write output: {0}")]
    Write(#[source] std::io::Error),
    #[error("Failed to encode JSON: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Walk error: {0}")]
    Walk(String),
    #[error("Invalid pattern: {0}")]
    Pattern(String),
    #[error("Path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),
}
impl FilebucketError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FilebucketError::Io {
            path: path.into(),
            source,
        }
    }
    pub(crate) fn invalid_path(path: &str, reason: &'static str) -> Self {
        FilebucketError::InvalidPathFormat {
            path: path.to_owned(),
            reason,
        }
    }
}
