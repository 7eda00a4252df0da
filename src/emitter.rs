//! Streaming JSON writer for directory nodes.

use crate::error::FilebucketError;
use std::io::Write;

/// Writes directory objects token by token, tracking comma placement per
/// nesting level. Keys are escaped as JSON strings.
pub struct JsonEmitter<W: Write> {
    writer: W,
    first: Vec<bool>,
}

impl<W: Write> JsonEmitter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            first: Vec::new(),
        }
    }

    /// Nesting depth of currently open objects.
    pub fn depth(&self) -> usize {
        self.first.len()
    }

    pub fn open_object(&mut self) -> Result<(), FilebucketError> {
        self.raw(b"{")?;
        self.first.push(true);
        Ok(())
    }

    /// Writes the reserved `"/":count` entry and closes the innermost object.
    pub fn close_object_with_count(&mut self, count: u64) -> Result<(), FilebucketError> {
        self.separator()?;
        write!(self.writer, "\"/\":{}}}", count).map_err(FilebucketError::Write)?;
        self.first.pop();
        Ok(())
    }

    pub fn write_file_entry(&mut self, name: &str, count: u64) -> Result<(), FilebucketError> {
        self.separator()?;
        self.key(name)?;
        write!(self.writer, "{}", count).map_err(FilebucketError::Write)
    }

    /// Writes `"name":`; the caller opens the nested object next.
    pub fn write_subdir_key(&mut self, name: &str) -> Result<(), FilebucketError> {
        self.separator()?;
        self.key(name)
    }

    pub fn flush(&mut self) -> Result<(), FilebucketError> {
        self.writer.flush().map_err(FilebucketError::Write)
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn separator(&mut self) -> Result<(), FilebucketError> {
        let first = self.first.last_mut().ok_or_else(|| {
            FilebucketError::StructuralInvariantViolation(
                "entry written outside of an open object".to_string(),
            )
        })?;
        if std::mem::replace(first, false) {
            Ok(())
        } else {
            self.raw(b",")
        }
    }

    fn key(&mut self, name: &str) -> Result<(), FilebucketError> {
        serde_json::to_writer(&mut self.writer, name)?;
        self.raw(b":")
    }

    fn raw(&mut self, bytes: &[u8]) -> Result<(), FilebucketError> {
        self.writer.write_all(bytes).map_err(FilebucketError::Write)
    }
}
