//! Regular-expression search across bucket contents.

use crate::bucket::{Walker, discover_buckets};
use crate::error::FilebucketError;
use crate::options::{BinaryDetection, GrepOptions};
use crate::types::{Bucket, GrepMatch};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use regex::Regex;
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::Path;
use std::sync::Mutex;

fn compile(pattern: &str) -> Result<Regex, FilebucketError> {
    Regex::new(pattern).map_err(|e| FilebucketError::Pattern(format!("'{}': {}", pattern, e)))
}

/// Reads a file as text, or `None` when it looks binary.
fn read_text(
    path: &Path,
    binary_detection: BinaryDetection,
) -> Result<Option<String>, FilebucketError> {
    let file = File::open(path).map_err(|e| FilebucketError::io(path, e))?;
    let mut reader = BufReader::new(file);
    let mut first_chunk = Vec::with_capacity(4096);
    reader
        .by_ref()
        .take(4096)
        .read_to_end(&mut first_chunk)
        .map_err(|e| FilebucketError::io(path, e))?;
    let is_binary = match binary_detection {
        BinaryDetection::Simple => first_chunk.contains(&0),
        BinaryDetection::Accurate => content_inspector::inspect(&first_chunk).is_binary(),
        BinaryDetection::None => false,
    };
    if is_binary {
        #[cfg(feature = "logging")]
        tracing::trace!("Binary file skipped: {}", path.display());
        return Ok(None);
    }
    let mut rest = Vec::new();
    reader
        .read_to_end(&mut rest)
        .map_err(|e| FilebucketError::io(path, e))?;
    first_chunk.extend_from_slice(&rest);
    Ok(Some(String::from_utf8_lossy(&first_chunk).into_owned()))
}

/// Returns `(line number, capture)` for every line of `text` matching `pattern`.
pub fn search_text(text: &str, pattern: &Regex) -> Vec<(usize, String)> {
    text.lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let captures = pattern.captures(line)?;
            let capture = captures
                .get(1)
                .or_else(|| captures.get(0))
                .map_or("", |m| m.as_str());
            Some((i + 1, capture.to_string()))
        })
        .collect()
}

fn grep_file<W: Write>(
    bucket: &Bucket,
    path: &Path,
    relative: &str,
    pattern: &Regex,
    binary_detection: BinaryDetection,
    sink: &Mutex<W>,
) -> Result<usize, FilebucketError> {
    let Some(text) = read_text(path, binary_detection)? else {
        return Ok(0);
    };
    let matches = search_text(&text, pattern);
    for (line, capture) in &matches {
        let found = GrepMatch {
            bucket: bucket.name.clone(),
            path: relative.to_string(),
            line: *line,
            capture: capture.clone(),
        };
        let mut out = sink
            .lock()
            .map_err(|_| FilebucketError::Write(io::Error::other("output lock poisoned")))?;
        writeln!(out, "{}", found).map_err(FilebucketError::Write)?;
    }
    Ok(matches.len())
}

/// Searches every text file of every bucket and writes one line per match.
///
/// Buckets are searched one after another; files within a bucket may be
/// searched concurrently, so lines from different files interleave in no
/// particular order. Each line is written whole while holding the sink lock.
/// Returns the number of matches.
pub fn grep<W: Write + Send>(
    options: &GrepOptions,
    sink: &Mutex<W>,
) -> Result<usize, FilebucketError> {
    let filename_pattern = compile(&options.filename_pattern)?;
    let pattern = compile(&options.pattern)?;
    let mut total = 0;
    for bucket in discover_buckets(&options.buckets)? {
        let files: Vec<_> = Walker::new(&bucket.root, &options.buckets)?
            .collect_files()?
            .into_iter()
            .filter(|(_, relative)| filename_pattern.is_match(relative))
            .collect();
        #[cfg(feature = "logging")]
        tracing::debug!("Searching {} files in bucket {}", files.len(), bucket.name);
        #[cfg(not(feature = "parallel"))]
        let counts = files
            .iter()
            .map(|(path, relative)| {
                grep_file(&bucket, path, relative, &pattern, options.binary_detection, sink)
            })
            .collect::<Result<Vec<usize>, _>>()?;
        #[cfg(feature = "parallel")]
        let counts = files
            .par_iter()
            .map(|(path, relative)| {
                grep_file(&bucket, path, relative, &pattern, options.binary_detection, sink)
            })
            .collect::<Result<Vec<usize>, _>>()?;
        total += counts.iter().sum::<usize>();
    }
    Ok(total)
}
