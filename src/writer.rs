use std::io::{self, Write};

use zerocopy::IntoBytes;

use crate::endian::{self, Scalar};
use crate::error::WriteError;
use crate::stream::{BinaryStream, DeclaredByteOrder};

pub type Result<T> = core::result::Result<T, WriteError>;

impl<F: DeclaredByteOrder, S: Write> BinaryStream<F, S> {
    /// Writes all of `bytes` to the underlying sink.
    ///
    /// If the sink stops accepting bytes, this fails with `Incomplete` and reports how many of
    /// them were written.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let mut written = 0;
        while written < bytes.len() {
            match self.inner.write(&bytes[written..]) {
                Ok(0) => {
                    return Err(WriteError::Incomplete {
                        expected: bytes.len(),
                        written,
                    })
                }
                Ok(n) => written += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(WriteError::Io(e)),
            }
        }
        Ok(())
    }

    /// Writes a small, fixed-size array of bytes.
    #[inline(always)]
    pub fn write_cbytes<const N: usize>(&mut self, value: [u8; N]) -> Result<()> {
        self.write_bytes(&value)
    }

    /// Writes one scalar in the declared byte order.
    pub fn write_scalar<T: Scalar>(&mut self, value: T) -> Result<()> {
        let raw = endian::encode(value, self.declared_byte_order());
        self.write_bytes(raw.as_bytes())
    }

    /// Writes a run of scalars in the declared byte order.
    pub fn write_scalars<T: Scalar>(&mut self, values: &[T]) -> Result<()> {
        let order = self.declared_byte_order();
        if order.is_native() {
            return self.write_bytes(values.as_bytes());
        }
        let mut bytes = values.as_bytes().to_vec();
        endian::normalize_slice(&mut bytes, T::WIDTH, order);
        self.write_bytes(&bytes)
    }

    /// Writes `bytes` as a fixed-width text field, filling the remainder with `pad`.
    ///
    /// Fails with `FieldTooLong`, without writing anything, if `bytes` is longer than `width`.
    #[cfg(feature = "bstr")]
    pub fn write_padded(&mut self, bytes: impl AsRef<[u8]>, width: usize, pad: u8) -> Result<()> {
        let bytes = bytes.as_ref();
        if bytes.len() > width {
            return Err(WriteError::FieldTooLong {
                len: bytes.len(),
                width,
            });
        }
        let mut field = bstr::BString::from(bytes);
        field.resize(width, pad);
        self.write_bytes(&field)
    }

    /// Writes a single `u8` value
    #[inline(always)]
    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.write_scalar(value)
    }

    /// Writes a single `i8` value
    #[inline(always)]
    pub fn write_i8(&mut self, value: i8) -> Result<()> {
        self.write_scalar(value)
    }

    /// Writes a single `u16` value
    #[inline(always)]
    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        self.write_scalar(value)
    }

    /// Writes a single `u32` value
    #[inline(always)]
    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.write_scalar(value)
    }

    /// Writes a single `u64` value
    #[inline(always)]
    pub fn write_u64(&mut self, value: u64) -> Result<()> {
        self.write_scalar(value)
    }

    /// Writes a single `i16` value
    #[inline(always)]
    pub fn write_i16(&mut self, value: i16) -> Result<()> {
        self.write_scalar(value)
    }

    /// Writes a single `i32` value
    #[inline(always)]
    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        self.write_scalar(value)
    }

    /// Writes a single `i64` value
    #[inline(always)]
    pub fn write_i64(&mut self, value: i64) -> Result<()> {
        self.write_scalar(value)
    }

    /// Writes an `f32` value using its 4-byte IEEE representation.
    #[inline(always)]
    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        self.write_scalar(value)
    }

    /// Writes an `f64` value using its 8-byte IEEE representation.
    #[inline(always)]
    pub fn write_f64(&mut self, value: f64) -> Result<()> {
        self.write_scalar(value)
    }
}
