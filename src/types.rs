use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// One source directory contributing files to the shared namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    /// The directory name, used to label grep results.
    pub name: String,
    pub root: PathBuf,
}

/// A single line matched by [`grep`](fn@crate::grep).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrepMatch {
    pub bucket: String,
    /// The file path relative to the bucket root, `/`-separated.
    pub path: String,
    /// 1-based line number.
    pub line: usize,
    /// Capture group 1 when the pattern has one, otherwise the whole match.
    pub capture: String,
}

impl fmt::Display for GrepMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}:{} {}", self.bucket, self.path, self.line, self.capture)
    }
}
