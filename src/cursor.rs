//! Forward-only cursor over a sorted path sequence.

use crate::error::FilebucketError;

type Paths<'a> = Box<dyn Iterator<Item = Result<String, FilebucketError>> + 'a>;

/// A primed, forward-only view over sorted paths.
///
/// The cursor exposes one element at a time and never rewinds. Every advance
/// checks that the newly exposed path does not sort below the one it replaced,
/// so out-of-order input is reported as [`FilebucketError::UnsortedInput`]
/// instead of silently producing a wrong tree.
pub struct PathCursor<'a> {
    paths: Paths<'a>,
    current: Option<String>,
    consumed: u64,
}

impl<'a> PathCursor<'a> {
    /// Wraps an infallible sequence and primes the cursor on its first element.
    pub fn new<T, S>(paths: T) -> Self
    where
        T: IntoIterator<Item = S>,
        T::IntoIter: 'a,
        S: Into<String> + 'a,
    {
        let mut paths = paths.into_iter().map(Into::<String>::into);
        let current = paths.next();
        Self {
            paths: Box::new(paths.map(Ok::<String, FilebucketError>)),
            current,
            consumed: 0,
        }
    }

    /// Wraps a sequence whose elements may fail to load, e.g. lines of a file.
    pub fn from_fallible<T>(paths: T) -> Result<Self, FilebucketError>
    where
        T: IntoIterator<Item = Result<String, FilebucketError>>,
        T::IntoIter: 'a,
    {
        let mut paths = paths.into_iter();
        let current = paths.next().transpose()?;
        Ok(Self {
            paths: Box::new(paths),
            current,
            consumed: 0,
        })
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn is_exhausted(&self) -> bool {
        self.current.is_none()
    }

    /// Number of successful `advance` calls so far.
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Consumes the current element and exposes the next one.
    pub fn advance(&mut self) -> Result<(), FilebucketError> {
        let previous = self
            .current
            .take()
            .ok_or(FilebucketError::CursorExhausted)?;
        self.consumed += 1;
        match self.paths.next().transpose()? {
            Some(next) if next < previous => {
                Err(FilebucketError::UnsortedInput { previous, next })
            }
            next => {
                self.current = next;
                Ok(())
            }
        }
    }
}
