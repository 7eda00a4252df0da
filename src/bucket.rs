use crate::error::FilebucketError;
use crate::options::BucketOptions;
use crate::types::Bucket;
use ignore::WalkBuilder;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::fs;
use std::path::{Component, Path, PathBuf};
pub(crate) struct Walker {
    root: PathBuf,
    inner: ignore::Walk,
}
impl Walker {
    pub(crate) fn new(root: &Path, options: &BucketOptions) -> Result<Self, FilebucketError> {
        let mut builder = WalkBuilder::new(root);
        builder
            .git_ignore(options.respect_gitignore)
            .hidden(!options.include_hidden)
            .follow_links(options.follow_links)
            .ignore(false);
        let matcher = if !options.ignore_patterns.is_empty() {
            let mut glob_builder = globset::GlobSetBuilder::new();
            for pattern in &options.ignore_patterns {
                let glob = globset::Glob::new(pattern).map_err(|e| {
                    FilebucketError::Pattern(format!("Invalid glob pattern '{}': {}", pattern, e))
                })?;
                glob_builder.add(glob);
            }
            Some(glob_builder.build().map_err(|e| {
                FilebucketError::Pattern(format!("Failed to build glob set: {}", e))
            })?)
        } else {
            None
        };
        builder.filter_entry(move |entry| {
            if entry.file_name() == ".git" {
                return false;
            }
            match &matcher {
                Some(matcher) => !matcher.is_match(entry.path()),
                None => true,
            }
        });
        Ok(Self {
            root: root.to_path_buf(),
            inner: builder.build(),
        })
    }
    /// Files below the root, each with its `/`-joined root-relative path.
    pub(crate) fn collect_files(self) -> Result<Vec<(PathBuf, String)>, FilebucketError> {
        let mut files = Vec::new();
        for result in self.inner {
            let entry = result.map_err(|e| FilebucketError::Walk(e.to_string()))?;
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let relative = relative_key(&self.root, entry.path())?;
            files.push((entry.into_path(), relative));
        }
        Ok(files)
    }
}
fn relative_key(root: &Path, path: &Path) -> Result<String, FilebucketError> {
    let relative = path.strip_prefix(root).map_err(|_| {
        FilebucketError::Walk(format!("{} escaped {}", path.display(), root.display()))
    })?;
    let mut segments = Vec::new();
    for component in relative.components() {
        if let Component::Normal(segment) = component {
            let segment = segment
                .to_str()
                .ok_or_else(|| FilebucketError::NonUtf8Path(path.to_path_buf()))?;
            segments.push(segment);
        }
    }
    Ok(segments.join("/"))
}
/// Lists the buckets directly under `options.buckets_path`, sorted by name.
pub fn discover_buckets(options: &BucketOptions) -> Result<Vec<Bucket>, FilebucketError> {
    let root = &options.buckets_path;
    let mut buckets = Vec::new();
    for entry in fs::read_dir(root).map_err(|e| FilebucketError::io(root, e))? {
        let entry = entry.map_err(|e| FilebucketError::io(root, e))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        if options.require_git && !path.join(".git").exists() {
            #[cfg(feature = "logging")]
            tracing::debug!("Skipping {}: not a git repository", path.display());
            continue;
        }
        let name = entry
            .file_name()
            .into_string()
            .map_err(|_| FilebucketError::NonUtf8Path(path.clone()))?;
        buckets.push(Bucket { name, root: path });
    }
    buckets.sort_by(|a, b| a.name.cmp(&b.name));
    #[cfg(feature = "logging")]
    tracing::debug!("Found {} buckets in {}", buckets.len(), root.display());
    Ok(buckets)
}
/// Maps a bucket-relative file path into the shared namespace.
///
/// The first segment names the owning organisation and is dropped, so
/// `org/src/main.rs` becomes `/src/main.rs`. Top-level files are not part of
/// the namespace and, like ignored suffixes, yield `None`.
pub fn shared_path(relative: &str, options: &BucketOptions) -> Option<String> {
    let i = relative.find('/')?;
    let mut path = relative[i..].to_string();
    if options.lowercase {
        path = path.to_lowercase();
    }
    if options
        .ignore_suffixes
        .iter()
        .any(|suffix| path.ends_with(suffix.as_str()))
    {
        return None;
    }
    Some(path)
}
fn bucket_paths(
    bucket: &Bucket,
    options: &BucketOptions,
) -> Result<Vec<String>, FilebucketError> {
    let files = Walker::new(&bucket.root, options)?.collect_files()?;
    let paths: Vec<String> = files
        .iter()
        .filter_map(|(_, relative)| shared_path(relative, options))
        .collect();
    #[cfg(feature = "logging")]
    tracing::debug!(
        "Bucket {}: {} of {} files kept",
        bucket.name,
        paths.len(),
        files.len()
    );
    Ok(paths)
}
/// Collects every bucket's shared paths, sorted ascending by code point.
///
/// Duplicates are kept: a path present in three buckets appears three times.
pub fn collect_bucket_paths(options: &BucketOptions) -> Result<Vec<String>, FilebucketError> {
    let buckets = discover_buckets(options)?;
    #[cfg(not(feature = "parallel"))]
    let mut paths = collect_sequential(&buckets, options)?;
    #[cfg(feature = "parallel")]
    let mut paths = collect_parallel(&buckets, options)?;
    #[cfg(not(feature = "parallel"))]
    paths.sort_unstable();
    #[cfg(feature = "parallel")]
    paths.par_sort_unstable();
    Ok(paths)
}
#[cfg(not(feature = "parallel"))]
fn collect_sequential(
    buckets: &[Bucket],
    options: &BucketOptions,
) -> Result<Vec<String>, FilebucketError> {
    let mut paths = Vec::new();
    for bucket in buckets {
        paths.extend(bucket_paths(bucket, options)?);
    }
    Ok(paths)
}
#[cfg(feature = "parallel")]
fn collect_parallel(
    buckets: &[Bucket],
    options: &BucketOptions,
) -> Result<Vec<String>, FilebucketError> {
    let per_bucket: Vec<Vec<String>> = buckets
        .par_iter()
        .map(|bucket| bucket_paths(bucket, options))
        .collect::<Result<_, _>>()?;
    Ok(per_bucket.into_iter().flatten().collect())
}
