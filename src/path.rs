//! Decomposition of absolute `/`-separated file paths.
//!
//! These work on plain strings rather than [`std::path::Path`]: bucket paths are
//! a logical namespace, always separated by `/` whatever the host platform.

use crate::error::FilebucketError;

fn last_separator(path: &str) -> Result<usize, FilebucketError> {
    let i = path
        .rfind('/')
        .ok_or_else(|| FilebucketError::invalid_path(path, "no '/' separator"))?;
    if i == path.len() - 1 {
        return Err(FilebucketError::invalid_path(
            path,
            "ends in '/', not a file",
        ));
    }
    Ok(i)
}

/// Returns the file name after the last `/`.
///
/// ```
/// assert_eq!(filebucket::path::leaf_name("/a/b.txt").unwrap(), "b.txt");
/// ```
pub fn leaf_name(path: &str) -> Result<&str, FilebucketError> {
    let i = last_separator(path)?;
    Ok(&path[i + 1..])
}

/// Returns everything up to and including the last `/`.
///
/// ```
/// assert_eq!(filebucket::path::parent_dir("/a/b.txt").unwrap(), "/a/");
/// ```
pub fn parent_dir(path: &str) -> Result<&str, FilebucketError> {
    let i = last_separator(path)?;
    Ok(&path[..=i])
}
