use std::io::{self, Read};

use zerocopy::IntoBytes;

use crate::endian::{self, RawBuffer, Scalar};
use crate::error::ReadError;
use crate::stream::{BinaryStream, DeclaredByteOrder};

pub type Result<T> = core::result::Result<T, ReadError>;

/// Upper bound on what `read_bytes` reserves before any data has arrived. Lengths usually come
/// from file headers and cannot be trusted.
const INITIAL_CAPACITY: usize = 64 * 1024;

fn check_count(expected: usize, actual: usize) -> Result<()> {
    match actual {
        n if n == expected => Ok(()),
        0 => Err(ReadError::EndOfData),
        actual => Err(ReadError::Format { expected, actual }),
    }
}

impl<F: DeclaredByteOrder, S: Read> BinaryStream<F, S> {
    /// Fills `buf` completely from the underlying source.
    ///
    /// Fails with `EndOfData` if the source produced no bytes at all, and with `Format` if it
    /// ended after producing some but not all of them. An empty `buf` always succeeds.
    pub fn read_into(&mut self, buf: &mut [u8]) -> Result<()> {
        let expected = buf.len();
        let mut actual = 0;

        while actual < expected {
            match self.inner.read(&mut buf[actual..]) {
                Ok(0) => break,
                Ok(n) => actual += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(ReadError::Io(e)),
            }
        }

        check_count(expected, actual)
    }

    /// Reads exactly `len` bytes.
    ///
    /// The buffer grows as data arrives, so a `len` far larger than the source fails with
    /// `Format` (or `EndOfData`) instead of allocating `len` bytes up front.
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(len.min(INITIAL_CAPACITY));
        (&mut self.inner)
            .take(len as u64)
            .read_to_end(&mut buf)
            .map_err(ReadError::Io)?;
        check_count(len, buf.len())?;
        Ok(buf)
    }

    /// Reads a small array of bytes, with a constant length.
    #[inline(always)]
    pub fn read_cbytes<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0; N];
        self.read_into(&mut buf)?;
        Ok(buf)
    }

    /// Reads one scalar stored in the declared byte order.
    ///
    /// Consumes exactly `T::WIDTH` bytes on success.
    pub fn read_scalar<T: Scalar>(&mut self) -> Result<T> {
        let mut raw = RawBuffer::zeroed(T::WIDTH);
        self.read_into(raw.as_mut_bytes())?;
        Ok(endian::decode(&raw, self.declared_byte_order()))
    }

    /// Reads `count` consecutive scalars stored in the declared byte order.
    ///
    /// The whole run is treated as one read: if the source ends partway through it, the result
    /// is `Format` even when the bytes read so far cover some complete values.
    ///
    /// A `count` whose byte length does not fit in `usize` fails with `Format` without reading.
    pub fn read_scalars<T: Scalar>(&mut self, count: usize) -> Result<Vec<T>> {
        let Some(len) = count.checked_mul(T::WIDTH.bytes()) else {
            return Err(ReadError::Format {
                expected: usize::MAX,
                actual: 0,
            });
        };
        let mut bytes = self.read_bytes(len)?;
        endian::normalize_slice(&mut bytes, T::WIDTH, self.declared_byte_order());

        let mut values = vec![T::new_zeroed(); count];
        values.as_mut_bytes().copy_from_slice(&bytes);
        Ok(values)
    }

    /// Reads a fixed-width text field of `len` bytes.
    ///
    /// No trimming is done and the contents need not be UTF-8.
    #[cfg(feature = "bstr")]
    pub fn read_bstring(&mut self, len: usize) -> Result<bstr::BString> {
        Ok(bstr::BString::from(self.read_bytes(len)?))
    }

    /// Reads a single `u8` value.
    #[inline(always)]
    pub fn read_u8(&mut self) -> Result<u8> {
        self.read_scalar()
    }

    /// Reads a single `i8` value.
    #[inline(always)]
    pub fn read_i8(&mut self) -> Result<i8> {
        self.read_scalar()
    }

    /// Reads a `u16` in the declared byte order.
    #[inline(always)]
    pub fn read_u16(&mut self) -> Result<u16> {
        self.read_scalar()
    }

    /// Reads a `u32` in the declared byte order.
    #[inline(always)]
    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_scalar()
    }

    /// Reads a `u64` in the declared byte order.
    #[inline(always)]
    pub fn read_u64(&mut self) -> Result<u64> {
        self.read_scalar()
    }

    /// Reads a `i16` in the declared byte order.
    #[inline(always)]
    pub fn read_i16(&mut self) -> Result<i16> {
        self.read_scalar()
    }

    /// Reads a `i32` in the declared byte order.
    #[inline(always)]
    pub fn read_i32(&mut self) -> Result<i32> {
        self.read_scalar()
    }

    /// Reads a `i64` in the declared byte order.
    #[inline(always)]
    pub fn read_i64(&mut self) -> Result<i64> {
        self.read_scalar()
    }

    /// Reads an IEEE single-precision float in the declared byte order.
    #[inline(always)]
    pub fn read_f32(&mut self) -> Result<f32> {
        self.read_scalar()
    }

    /// Reads an IEEE double-precision float in the declared byte order.
    #[inline(always)]
    pub fn read_f64(&mut self) -> Result<f64> {
        self.read_scalar()
    }
}
