//! Writing path trees to a sink.
//!
//! A failed run never leaves a half-written document behind in
//! [`OutputMode::Buffered`]; [`OutputMode::Streaming`] trades that guarantee
//! for constant memory on the output side.

use crate::cursor::PathCursor;
use crate::error::FilebucketError;
use crate::tree::TreeBuilder;
use std::io::Write;

/// How the JSON document reaches the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Render into memory; write only after the whole tree succeeded.
    #[default]
    Buffered,
    /// Write tokens as they are produced. On failure the partial document is
    /// followed by a line starting with [`TRUNCATION_MARKER`].
    Streaming,
}

/// Starts the line appended to streamed output when the run fails.
pub const TRUNCATION_MARKER: &str = "!truncated:";

/// Builds the tree for `cursor` and writes it to `sink`, returning the file count.
pub fn write_path_tree<W: Write>(
    cursor: &mut PathCursor<'_>,
    mut sink: W,
    mode: OutputMode,
) -> Result<u64, FilebucketError> {
    match mode {
        OutputMode::Buffered => {
            let mut builder = TreeBuilder::new(Vec::new());
            let count = builder.build(cursor)?;
            sink.write_all(&builder.into_inner()).map_err(FilebucketError::Write)?;
            sink.flush().map_err(FilebucketError::Write)?;
            Ok(count)
        }
        OutputMode::Streaming => {
            let result = TreeBuilder::new(&mut sink).build(cursor);
            if let Err(e) = &result {
                // The run's own error is reported even if the marker cannot be written.
                if writeln!(sink, "\n{} {}", TRUNCATION_MARKER, e).is_ok() {
                    let _ = sink.flush();
                }
            }
            result
        }
    }
}

/// Renders the tree for an in-memory path list.
///
/// ```
/// let (json, count) = filebucket::render_path_tree(["/a/b.txt", "/a/b.txt"]).unwrap();
/// assert_eq!(json, r#"{"a":{"b.txt":2,"/":2},"/":2}"#);
/// assert_eq!(count, 2);
/// ```
pub fn render_path_tree<T, S>(paths: T) -> Result<(String, u64), FilebucketError>
where
    T: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut cursor = PathCursor::new(paths);
    let mut builder = TreeBuilder::new(Vec::new());
    let count = builder.build(&mut cursor)?;
    let json = String::from_utf8(builder.into_inner()).map_err(|e| {
        FilebucketError::StructuralInvariantViolation(format!("emitted invalid UTF-8: {}", e))
    })?;
    Ok((json, count))
}
