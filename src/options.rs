use serde::{Deserialize, Serialize};
use std::path::PathBuf;
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryDetection {
    Simple,
    Accurate,
    None,
}
/// Where buckets live and how their files become shared-namespace paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketOptions {
    pub buckets_path: PathBuf,
    /// Only directories containing `.git` count as buckets.
    pub require_git: bool,
    pub lowercase: bool,
    pub ignore_suffixes: Vec<String>,
    pub ignore_patterns: Vec<String>,
    pub respect_gitignore: bool,
    pub include_hidden: bool,
    pub follow_links: bool,
}
impl Default for BucketOptions {
    fn default() -> Self {
        Self {
            buckets_path: PathBuf::from("."),
            require_git: true,
            lowercase: true,
            ignore_suffixes: vec![".gitignore".to_string()],
            ignore_patterns: Vec::new(),
            respect_gitignore: true,
            include_hidden: true,
            follow_links: false,
        }
    }
}
#[derive(Debug, Default)]
pub struct BucketOptionsBuilder {
    options: BucketOptions,
}
impl BucketOptionsBuilder {
    pub fn new(buckets_path: impl Into<PathBuf>) -> Self {
        Self {
            options: BucketOptions {
                buckets_path: buckets_path.into(),
                ..Default::default()
            },
        }
    }
    pub fn require_git(mut self, yes: bool) -> Self {
        self.options.require_git = yes;
        self
    }
    pub fn lowercase(mut self, yes: bool) -> Self {
        self.options.lowercase = yes;
        self
    }
    pub fn ignore_suffixes(mut self, suffixes: Vec<String>) -> Self {
        self.options.ignore_suffixes = suffixes;
        self
    }
    pub fn ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.options.ignore_patterns = patterns;
        self
    }
    pub fn respect_gitignore(mut self, yes: bool) -> Self {
        self.options.respect_gitignore = yes;
        self
    }
    pub fn include_hidden(mut self, yes: bool) -> Self {
        self.options.include_hidden = yes;
        self
    }
    pub fn follow_links(mut self, yes: bool) -> Self {
        self.options.follow_links = yes;
        self
    }
    pub fn build(self) -> BucketOptions {
        self.options
    }
}
/// Options for searching bucket contents with regular expressions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrepOptions {
    pub buckets: BucketOptions,
    /// Matched against each file's bucket-relative path; empty matches all.
    pub filename_pattern: String,
    /// Matched against every line. Capture group 1, when present, is reported.
    pub pattern: String,
    pub binary_detection: BinaryDetection,
}
#[derive(Debug)]
pub struct GrepOptionsBuilder {
    options: GrepOptions,
}
impl GrepOptionsBuilder {
    pub fn new(buckets_path: impl Into<PathBuf>, pattern: impl Into<String>) -> Self {
        Self {
            options: GrepOptions {
                buckets: BucketOptionsBuilder::new(buckets_path).build(),
                filename_pattern: String::new(),
                pattern: pattern.into(),
                binary_detection: BinaryDetection::Accurate,
            },
        }
    }
    pub fn buckets(mut self, buckets: BucketOptions) -> Self {
        self.options.buckets = buckets;
        self
    }
    pub fn filename_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.options.filename_pattern = pattern.into();
        self
    }
    pub fn binary_detection(mut self, method: BinaryDetection) -> Self {
        self.options.binary_detection = method;
        self
    }
    pub fn build(self) -> GrepOptions {
        self.options
    }
}
