use std::fs::{File, OpenOptions};
use std::io::{self, Seek, Write};
use std::path::Path;

use log::{debug, trace};

use crate::endian::ByteOrder;
use crate::error::{OpenError, WriteError};

/// Supplies the byte order a binary file format stores its scalars in.
///
/// Every stream is bound to one implementation of this trait when it is constructed. There is no
/// default: a format that does not say how its bytes are ordered cannot be used to build a
/// [`BinaryStream`].
pub trait DeclaredByteOrder {
    /// The byte order of every multi-byte scalar in the format. Must return the same value for
    /// the lifetime of the implementor.
    fn declared_byte_order(&self) -> ByteOrder;
}

impl DeclaredByteOrder for ByteOrder {
    #[inline(always)]
    fn declared_byte_order(&self) -> ByteOrder {
        *self
    }
}

/// A format whose scalars are stored least significant byte first.
#[derive(Copy, Clone, Eq, PartialEq, Default, Debug)]
pub struct LittleEndian;

impl DeclaredByteOrder for LittleEndian {
    #[inline(always)]
    fn declared_byte_order(&self) -> ByteOrder {
        ByteOrder::LittleEndian
    }
}

/// A format whose scalars are stored most significant byte first.
#[derive(Copy, Clone, Eq, PartialEq, Default, Debug)]
pub struct BigEndian;

impl DeclaredByteOrder for BigEndian {
    #[inline(always)]
    fn declared_byte_order(&self) -> ByteOrder {
        ByteOrder::BigEndian
    }
}

/// Which directions a file is opened for.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Access {
    /// Opens an existing file.
    Read,
    /// Creates the file if needed and truncates it, unless opened for append.
    Write,
    /// Opens an existing file, or creates it when truncating.
    ReadWrite,
}

/// How to open a file for a [`BinaryStream`].
///
/// Binary access is always added by [`BinaryStream::open`], whether or not it was requested
/// here. `std::fs` never translates newlines or other bytes, so a binary request can always be
/// honored and there is no text mode to fall back to.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct OpenMode {
    access: Access,
    append: bool,
    truncate: bool,
    binary: bool,
}

impl OpenMode {
    /// A mode with the given access and no flags.
    pub const fn new(access: Access) -> Self {
        Self {
            access,
            append: false,
            truncate: false,
            binary: false,
        }
    }

    /// Read-only access.
    pub const fn read() -> Self {
        Self::new(Access::Read)
    }

    /// Write-only access.
    pub const fn write() -> Self {
        Self::new(Access::Write)
    }

    /// Read and write access.
    pub const fn read_write() -> Self {
        Self::new(Access::ReadWrite)
    }

    /// Positions every write at the end of the file.
    pub const fn append(mut self) -> Self {
        self.append = true;
        self
    }

    /// Discards existing contents on open.
    pub const fn truncate(mut self) -> Self {
        self.truncate = true;
        self
    }

    /// Requests binary access.
    ///
    /// The flag is recorded only. `std::fs` has no text mode, so it does not change how the
    /// file is opened.
    pub const fn binary(mut self) -> Self {
        self.binary = true;
        self
    }

    /// The access this mode opens with.
    pub const fn access(&self) -> Access {
        self.access
    }

    /// Returns `true` if binary access has been requested.
    pub const fn is_binary(&self) -> bool {
        self.binary
    }

    fn options(&self) -> io::Result<OpenOptions> {
        let mut options = File::options();
        match self.access {
            Access::Read => {
                if self.append || self.truncate {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        "append and truncate require write access",
                    ));
                }
                options.read(true);
            }
            Access::Write => {
                options
                    .write(true)
                    .create(true)
                    .append(self.append)
                    .truncate(!self.append || self.truncate);
            }
            Access::ReadWrite => {
                options
                    .read(true)
                    .write(true)
                    .append(self.append)
                    .create(self.truncate)
                    .truncate(self.truncate);
            }
        }
        Ok(options)
    }
}

/// Reads and writes fixed-width scalars over a binary byte stream, in the byte order declared by
/// a file format.
///
/// `F` supplies the byte order and `S` is the underlying source or sink. `S` defaults to
/// [`File`]; any [`Read`](std::io::Read) or [`Write`] implementation, such as
/// [`Cursor`](std::io::Cursor), works equally well.
///
/// The stream holds no buffer of its own and never seeks. Each read or write transfers exactly
/// the bytes of the value and moves the position of `S` forward by that amount.
#[derive(Debug)]
pub struct BinaryStream<F, S = File> {
    pub(crate) inner: S,
    pub(crate) format: F,
}

impl<F: DeclaredByteOrder> BinaryStream<F, File> {
    /// Opens `path` in binary mode, adding binary access to `mode` if it is missing.
    pub fn open(path: impl AsRef<Path>, mode: OpenMode, format: F) -> Result<Self, OpenError> {
        let file = open_binary(path.as_ref(), mode)?;
        Ok(Self::new(file, format))
    }

    /// Creates (or truncates) `path` for writing.
    pub fn create(path: impl AsRef<Path>, format: F) -> Result<Self, OpenError> {
        Self::open(path, OpenMode::write(), format)
    }

    /// Replaces the underlying file with `path`, keeping the declared byte order.
    ///
    /// The previous file is closed only once the new one has been opened; if the open fails
    /// the stream is left unchanged.
    pub fn reopen(&mut self, path: impl AsRef<Path>, mode: OpenMode) -> Result<(), OpenError> {
        let file = open_binary(path.as_ref(), mode)?;
        self.inner = file;
        Ok(())
    }
}

fn open_binary(path: &Path, mode: OpenMode) -> Result<File, OpenError> {
    let mode = mode.binary();
    trace!("opening {} with {:?}", path.display(), mode);
    let file = mode
        .options()
        .and_then(|options| options.open(path))
        .map_err(|source| OpenError::new(path, source))?;
    debug!("opened {} for {:?}", path.display(), mode.access());
    Ok(file)
}

impl<F: DeclaredByteOrder, S> BinaryStream<F, S> {
    /// Wraps an already open binary source or sink.
    pub fn new(inner: S, format: F) -> Self {
        Self { inner, format }
    }

    /// The byte order scalars are read and written in.
    #[inline(always)]
    pub fn declared_byte_order(&self) -> ByteOrder {
        self.format.declared_byte_order()
    }

    /// The format this stream was created with.
    pub fn format(&self) -> &F {
        &self.format
    }

    /// Accesses the underlying stream.
    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    /// Mutably accesses the underlying stream.
    ///
    /// Reading, writing or seeking through this reference bypasses the exact-count checks.
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    /// Extracts the underlying stream.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<F: DeclaredByteOrder, S: Seek> BinaryStream<F, S> {
    /// The current byte offset of the underlying stream.
    pub fn position(&mut self) -> io::Result<u64> {
        self.inner.stream_position()
    }
}

impl<F: DeclaredByteOrder, S: Write> BinaryStream<F, S> {
    /// Flushes the underlying sink.
    pub fn flush(&mut self) -> Result<(), WriteError> {
        self.inner.flush()?;
        Ok(())
    }

    /// Flushes and releases the underlying sink.
    ///
    /// Dropping the stream also releases it, but discards any flush failure.
    pub fn close(mut self) -> Result<(), WriteError> {
        self.flush()?;
        trace!("closed binary stream");
        Ok(())
    }
}
