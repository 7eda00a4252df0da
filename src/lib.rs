//! # Filebucket
//!
//! `filebucket` summarizes files spread across many *buckets* (source repositories sharing
//! one logical path namespace). It turns the sorted list of every bucket's file paths into a
//! nested JSON tree in which each directory carries the recursive file count of its subtree
//! under the reserved key `"/"`, and it can grep the content of every bucket.
//!
//! The tree is produced in a single forward pass over the sorted paths with memory
//! proportional to the directory depth: no tree is ever built in memory.
//!
//! # Features
//!
//! - `parallel`: Collects buckets and searches files in parallel using Rayon.
//! - `logging`: Enables diagnostics via the `tracing` crate.
//!
//! # Example
//!
//! ```
//! use filebucket::render_path_tree;
//!
//! let (json, count) = render_path_tree(["/a/b.txt", "/a/c.txt", "/d/e.txt"]).unwrap();
//! assert_eq!(
//!     json,
//!     r#"{"a":{"b.txt":1,"c.txt":1,"/":2},"d":{"e.txt":1,"/":1},"/":3}"#
//! );
//! assert_eq!(count, 3);
//! ```
//!
//! Collecting paths from real buckets:
//!
//! ```no_run
//! use filebucket::{
//!     BucketOptionsBuilder, OutputMode, PathCursor, collect_bucket_paths, write_path_tree,
//! };
//!
//! let options = BucketOptionsBuilder::new("/srv/buckets").lowercase(true).build();
//! let paths = collect_bucket_paths(&options).expect("Failed to collect buckets");
//! let mut cursor = PathCursor::new(paths);
//! write_path_tree(&mut cursor, std::io::stdout(), OutputMode::Buffered)
//!     .expect("Failed to build tree");
//! ```

mod bucket;
pub mod cursor;
pub mod emitter;
mod error;
mod grep;
mod options;
pub mod output;
pub mod path;
mod tree;
mod types;

pub use bucket::{collect_bucket_paths, discover_buckets, shared_path};
pub use cursor::PathCursor;
pub use emitter::JsonEmitter;
pub use error::FilebucketError;
pub use grep::{grep, search_text};
pub use options::{
    BinaryDetection, BucketOptions, BucketOptionsBuilder, GrepOptions, GrepOptionsBuilder,
};
pub use output::{OutputMode, TRUNCATION_MARKER, render_path_tree, write_path_tree};
pub use tree::TreeBuilder;
pub use types::{Bucket, GrepMatch};
