//! Single-pass construction of the counted path tree.
//!
//! The tree is never materialized: a stack of open directory frames stands in
//! for nesting, and each frame streams one JSON object for its directory.

use crate::cursor::PathCursor;
use crate::emitter::JsonEmitter;
use crate::error::FilebucketError;
use crate::path::{leaf_name, parent_dir};
use std::cmp::Ordering;
use std::io::Write;

/// Drives a [`JsonEmitter`] from a [`PathCursor`].
pub struct TreeBuilder<W: Write> {
    emitter: JsonEmitter<W>,
}

impl<W: Write> TreeBuilder<W> {
    pub fn new(writer: W) -> Self {
        Self {
            emitter: JsonEmitter::new(writer),
        }
    }

    /// Builds the whole tree rooted at `/` and returns the total file count.
    ///
    /// Besides the per-scope checks done by [`treeify`](Self::treeify), this
    /// verifies that nothing escaped the root scope and that every advance of
    /// the cursor was attributed to exactly one file.
    pub fn build(&mut self, cursor: &mut PathCursor<'_>) -> Result<u64, FilebucketError> {
        let start = cursor.consumed();
        let count = self.treeify(cursor, "/")?;
        if let Some(path) = cursor.current() {
            return Err(FilebucketError::UnreachableState(format!(
                "{:?} escaped the root scope",
                path
            )));
        }
        let advanced = cursor.consumed() - start;
        if count != advanced {
            return Err(FilebucketError::StructuralInvariantViolation(format!(
                "counted {} files but consumed {} paths",
                count, advanced
            )));
        }
        self.emitter.flush()?;
        #[cfg(feature = "logging")]
        tracing::debug!("Built path tree with {} files", count);
        Ok(count)
    }

    /// Emits one directory object for `prefix` and returns its recursive file count.
    ///
    /// On return the cursor is exhausted or points at the first path outside
    /// `prefix`. Nesting is tracked with an explicit stack of frames over one
    /// shared scope string, so arbitrarily deep paths cannot exhaust the
    /// native stack and memory stays proportional to the deepest path.
    ///
    /// A file and a directory with the same name in one directory (possible
    /// when buckets disagree) are written as two entries with the same key.
    pub fn treeify(
        &mut self,
        cursor: &mut PathCursor<'_>,
        prefix: &str,
    ) -> Result<u64, FilebucketError> {
        if !prefix.ends_with('/') {
            return Err(FilebucketError::InvalidPrefix(prefix.to_string()));
        }
        self.emitter.open_object()?;

        let mut scope = prefix.to_string();
        let mut frames = vec![Frame {
            scope_len: scope.len(),
            count: 0,
        }];
        // `prev` is only meaningful while `cur_count` is nonzero.
        let mut prev = String::new();
        let mut cur_count = 0u64;

        loop {
            let escaped = match cursor.current() {
                None => true,
                Some(current) if cur_count != 0 && current == prev => {
                    cur_count += 1;
                    cursor.advance()?;
                    continue;
                }
                Some(current) => {
                    if cur_count != 0 {
                        self.emitter.write_file_entry(leaf_name(&prev)?, cur_count)?;
                        top(&mut frames)?.count += cur_count;
                        cur_count = 0;
                    }
                    let dir = parent_dir(current)?;
                    match scope.as_str().cmp(dir) {
                        Ordering::Equal => {
                            prev.clear();
                            prev.push_str(current);
                            cur_count = 1;
                            cursor.advance()?;
                            false
                        }
                        Ordering::Less if dir.starts_with(scope.as_str()) => {
                            // Open every level between the scope and the file's directory.
                            let relative = &dir[scope.len()..];
                            for name in relative.split_terminator('/') {
                                self.emitter.write_subdir_key(name)?;
                                self.emitter.open_object()?;
                                scope.push_str(name);
                                scope.push('/');
                                frames.push(Frame {
                                    scope_len: scope.len(),
                                    count: 0,
                                });
                            }
                            #[cfg(feature = "logging")]
                            tracing::trace!("Descended into {}", scope);
                            false
                        }
                        Ordering::Greater if dir.starts_with(scope.as_str()) => {
                            return Err(FilebucketError::UnreachableState(format!(
                                "{:?} sorts below {:?} yet lies inside it",
                                dir, scope
                            )));
                        }
                        // Scope escape: an enclosing frame owns this path.
                        Ordering::Less | Ordering::Greater => true,
                    }
                }
            };
            if !escaped {
                continue;
            }

            if cur_count != 0 {
                self.emitter.write_file_entry(leaf_name(&prev)?, cur_count)?;
                top(&mut frames)?.count += cur_count;
                cur_count = 0;
            }
            let frame = frames.pop().ok_or_else(|| {
                FilebucketError::StructuralInvariantViolation("no open scope to close".to_string())
            })?;
            self.emitter.close_object_with_count(frame.count)?;
            match frames.last_mut() {
                None => return Ok(frame.count),
                Some(parent) => {
                    parent.count += frame.count;
                    scope.truncate(parent.scope_len);
                    #[cfg(feature = "logging")]
                    tracing::trace!("Returned to {}", scope);
                }
            }
        }
    }

    pub fn into_inner(self) -> W {
        self.emitter.into_inner()
    }
}

/// One open directory: where its prefix ends in the shared scope string and
/// the files counted under it so far.
struct Frame {
    scope_len: usize,
    count: u64,
}

fn top(frames: &mut [Frame]) -> Result<&mut Frame, FilebucketError> {
    frames.last_mut().ok_or_else(|| {
        FilebucketError::StructuralInvariantViolation("no open scope".to_string())
    })
}
