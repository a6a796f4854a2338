//! Error types for binary stream operations

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A file could not be opened as a binary stream.
#[derive(Debug, Error)]
#[error("cannot open `{}` as a binary stream: {source}", .path.display())]
pub struct OpenError {
    path: PathBuf,
    #[source]
    source: io::Error,
}

impl OpenError {
    pub(crate) fn new(path: &Path, source: io::Error) -> Self {
        Self {
            path: path.to_path_buf(),
            source,
        }
    }

    /// The path that failed to open.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The underlying error reported by the operating system.
    pub fn io_error(&self) -> &io::Error {
        &self.source
    }
}

/// Error type for the `read_*` methods of [`BinaryStream`](crate::BinaryStream).
#[derive(Debug, Error)]
pub enum ReadError {
    /// The stream had no bytes left when the read started.
    ///
    /// This is the normal way for a record loop to learn that a file has been fully consumed.
    #[error("end of data")]
    EndOfData,

    /// The stream ended partway through a value.
    ///
    /// A truncated value is never decoded; the bytes that were consumed are lost. This indicates
    /// a truncated or corrupt file, not a clean end of data.
    #[error("truncated read: expected {expected} bytes, got {actual}")]
    Format {
        /// Number of bytes the read required.
        expected: usize,
        /// Number of bytes the stream produced before it ended.
        actual: usize,
    },

    /// The underlying source failed.
    #[error("read failed: {0}")]
    Io(#[from] io::Error),
}

impl ReadError {
    /// Returns `true` if this is [`ReadError::EndOfData`].
    pub fn is_end_of_data(&self) -> bool {
        matches!(self, ReadError::EndOfData)
    }
}

/// Error type for the `write_*` methods of [`BinaryStream`](crate::BinaryStream).
#[derive(Debug, Error)]
pub enum WriteError {
    /// The sink stopped accepting bytes before the whole buffer was written.
    #[error("write stopped after {written} of {expected} bytes")]
    Incomplete {
        /// Number of bytes the write required.
        expected: usize,
        /// Number of bytes the sink accepted.
        written: usize,
    },

    /// A fixed-width field was given more bytes than fit in it.
    #[error("field of {len} bytes does not fit in {width} bytes")]
    FieldTooLong {
        /// Length of the value.
        len: usize,
        /// Width of the field.
        width: usize,
    },

    /// The underlying sink failed.
    #[error("write failed: {0}")]
    Io(#[from] io::Error),
}

/// Any error produced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    #[allow(missing_docs)]
    #[error(transparent)]
    Open(#[from] OpenError),
    #[allow(missing_docs)]
    #[error(transparent)]
    Read(#[from] ReadError),
    #[allow(missing_docs)]
    #[error(transparent)]
    Write(#[from] WriteError),
}
