//! Conversion between the on-disk bytes of a scalar and its host-native value.
//!
//! A file format declares one [`ByteOrder`] for all of its multi-byte scalars. [`decode`] and
//! [`encode`] move a single value between that order and the host's, reversing the bytes only
//! when the two differ. Floats are byte-order normalized first and then reinterpreted as
//! IEEE-754, so NaN payloads and signed zeros survive bit for bit.

use core::fmt::Debug;
use zerocopy::{FromBytes, Immutable, IntoBytes};

/// The order in which the bytes of a multi-byte scalar are stored.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ByteOrder {
    /// Least significant byte first.
    LittleEndian,
    /// Most significant byte first.
    BigEndian,
}

impl ByteOrder {
    /// The byte order of the host this crate was compiled for.
    #[cfg(target_endian = "little")]
    pub const NATIVE: ByteOrder = ByteOrder::LittleEndian;

    /// The byte order of the host this crate was compiled for.
    #[cfg(target_endian = "big")]
    pub const NATIVE: ByteOrder = ByteOrder::BigEndian;

    /// Maps a "stream is little endian" flag onto a byte order.
    pub const fn from_little_endian_flag(little_endian: bool) -> Self {
        if little_endian {
            ByteOrder::LittleEndian
        } else {
            ByteOrder::BigEndian
        }
    }

    /// Returns `true` for [`ByteOrder::LittleEndian`].
    pub const fn is_little_endian(self) -> bool {
        matches!(self, ByteOrder::LittleEndian)
    }

    /// Returns `true` if values in this order can be used without swapping on this host.
    pub const fn is_native(self) -> bool {
        self.is_little_endian() == Self::NATIVE.is_little_endian()
    }
}

/// Whether a scalar is an unsigned integer, a signed integer, or an IEEE float.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ScalarKind {
    /// `u8` through `u64`.
    Unsigned,
    /// `i8` through `i64`.
    Signed,
    /// IEEE-754 single or double precision.
    Float,
}

/// The number of bytes a scalar occupies on disk.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum ScalarWidth {
    One = 1,
    Two = 2,
    Four = 4,
    Eight = 8,
}

impl ScalarWidth {
    /// The width in bytes.
    #[inline(always)]
    pub const fn bytes(self) -> usize {
        self as usize
    }
}

mod sealed {
    pub trait Sealed {}
}

/// A fixed-width numeric type that can be read from and written to a binary stream.
///
/// Implemented for `u8`, `u16`, `u32`, `u64`, `i8`, `i16`, `i32`, `i64`, `f32` and `f64`, and
/// sealed against other implementations: every implementor has no padding and accepts any bit
/// pattern, which is what lets [`decode`] reinterpret raw bytes without validation.
pub trait Scalar:
    sealed::Sealed + FromBytes + IntoBytes + Immutable + Copy + PartialEq + Debug
{
    /// On-disk width, always equal to `size_of::<Self>()`.
    const WIDTH: ScalarWidth;
    /// Integer signedness or float.
    const KIND: ScalarKind;
}

macro_rules! scalar {
    ($($t:ty => $width:ident, $kind:ident;)*) => {
        $(
            impl sealed::Sealed for $t {}

            impl Scalar for $t {
                const WIDTH: ScalarWidth = ScalarWidth::$width;
                const KIND: ScalarKind = ScalarKind::$kind;
            }

            const _: () = assert!(core::mem::size_of::<$t>() == ScalarWidth::$width.bytes());
        )*
    };
}

scalar! {
    u8 => One, Unsigned;
    u16 => Two, Unsigned;
    u32 => Four, Unsigned;
    u64 => Eight, Unsigned;
    i8 => One, Signed;
    i16 => Two, Signed;
    i32 => Four, Signed;
    i64 => Eight, Signed;
    f32 => Four, Float;
    f64 => Eight, Float;
}

const MAX_WIDTH: usize = 8;

/// The bytes of one scalar in file byte order.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct RawBuffer {
    bytes: [u8; MAX_WIDTH],
    width: ScalarWidth,
}

impl RawBuffer {
    /// A zero-filled buffer of the given width.
    pub const fn zeroed(width: ScalarWidth) -> Self {
        Self {
            bytes: [0; MAX_WIDTH],
            width,
        }
    }

    /// Copies `bytes` into a new buffer. Returns `None` unless `bytes.len()` is 1, 2, 4 or 8.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let width = match bytes.len() {
            1 => ScalarWidth::One,
            2 => ScalarWidth::Two,
            4 => ScalarWidth::Four,
            8 => ScalarWidth::Eight,
            _ => return None,
        };
        let mut raw = Self::zeroed(width);
        raw.as_mut_bytes().copy_from_slice(bytes);
        Some(raw)
    }

    /// The width of the scalar held in this buffer.
    pub fn width(&self) -> ScalarWidth {
        self.width
    }

    /// The bytes of the scalar, in file order.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.width.bytes()]
    }

    /// Mutable access to the bytes of the scalar, in file order.
    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.bytes[..self.width.bytes()]
    }
}

impl AsRef<[u8]> for RawBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Decodes the bytes in `raw`, stored in `order`, into a host-native `T`.
///
/// # Panics
///
/// Panics if `raw` does not have the width of `T`. Callers are expected to have read exactly
/// `T::WIDTH` bytes before decoding.
pub fn decode<T: Scalar>(raw: &RawBuffer, order: ByteOrder) -> T {
    assert_eq!(raw.width(), T::WIDTH, "raw buffer width does not match scalar");

    let mut value = T::new_zeroed();
    let bytes = value.as_mut_bytes();
    bytes.copy_from_slice(raw.as_bytes());
    if !order.is_native() {
        bytes.reverse();
    }
    value
}

/// Encodes `value` into its bytes as stored in `order`.
pub fn encode<T: Scalar>(value: T, order: ByteOrder) -> RawBuffer {
    let mut raw = RawBuffer::zeroed(T::WIDTH);
    let bytes = raw.as_mut_bytes();
    bytes.copy_from_slice(value.as_bytes());
    if !order.is_native() {
        bytes.reverse();
    }
    raw
}

/// Converts a packed run of same-width scalars between `order` and host order, in place.
///
/// The conversion is its own inverse, so the same call serves both decoding and encoding.
/// A trailing partial element, if any, is left untouched.
pub fn normalize_slice(bytes: &mut [u8], width: ScalarWidth, order: ByteOrder) {
    if order.is_native() {
        return;
    }
    for chunk in bytes.chunks_exact_mut(width.bytes()) {
        chunk.reverse();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_byte_layout() {
        assert_eq!(encode(0x0102u16, ByteOrder::LittleEndian).as_bytes(), [0x02, 0x01]);
        assert_eq!(encode(0x0102u16, ByteOrder::BigEndian).as_bytes(), [0x01, 0x02]);
    }

    #[test]
    fn wide_layouts() {
        let be = encode(0x0102_0304u32, ByteOrder::BigEndian);
        assert_eq!(hex::encode(be.as_bytes()), "01020304");

        let le = encode(-2i64, ByteOrder::LittleEndian);
        assert_eq!(hex::encode(le.as_bytes()), "feffffffffffffff");

        let f = encode(1.0f32, ByteOrder::BigEndian);
        assert_eq!(hex::encode(f.as_bytes()), "3f800000");

        let d = encode(-0.0f64, ByteOrder::LittleEndian);
        assert_eq!(hex::encode(d.as_bytes()), "0000000000000080");
    }

    #[test]
    fn decode_each_order() {
        let raw = RawBuffer::from_slice(&[0x12, 0x34, 0x56, 0x78]).unwrap();
        assert_eq!(decode::<u32>(&raw, ByteOrder::BigEndian), 0x1234_5678);
        assert_eq!(decode::<u32>(&raw, ByteOrder::LittleEndian), 0x7856_3412);
        assert_eq!(decode::<i32>(&raw, ByteOrder::BigEndian), 0x1234_5678);
    }

    #[test]
    fn single_byte_ignores_order() {
        let raw = RawBuffer::from_slice(&[0xfe]).unwrap();
        assert_eq!(decode::<u8>(&raw, ByteOrder::LittleEndian), 0xfe);
        assert_eq!(decode::<u8>(&raw, ByteOrder::BigEndian), 0xfe);
        assert_eq!(decode::<i8>(&raw, ByteOrder::LittleEndian), -2);
        assert_eq!(decode::<i8>(&raw, ByteOrder::BigEndian), -2);
    }

    #[test]
    fn float_bits_preserved() {
        let nan = f64::from_bits(0x7ff8_0000_dead_beef);
        for order in [ByteOrder::LittleEndian, ByteOrder::BigEndian] {
            let back: f64 = decode(&encode(nan, order), order);
            assert_eq!(back.to_bits(), nan.to_bits());

            let back: f32 = decode(&encode(-0.0f32, order), order);
            assert_eq!(back.to_bits(), (-0.0f32).to_bits());
        }
    }

    #[test]
    fn raw_buffer_widths() {
        assert!(RawBuffer::from_slice(&[]).is_none());
        assert!(RawBuffer::from_slice(&[0; 3]).is_none());
        assert!(RawBuffer::from_slice(&[0; 16]).is_none());
        assert_eq!(RawBuffer::from_slice(&[0; 8]).unwrap().width(), ScalarWidth::Eight);
        assert_eq!(RawBuffer::zeroed(ScalarWidth::Two).as_bytes(), [0, 0]);
    }

    #[test]
    #[should_panic(expected = "raw buffer width does not match scalar")]
    fn decode_wrong_width() {
        let raw = RawBuffer::zeroed(ScalarWidth::Two);
        let _: u32 = decode(&raw, ByteOrder::LittleEndian);
    }

    #[test]
    fn normalize_runs() {
        let mut bytes = [0x01, 0x02, 0x03, 0x04, 0x05];
        normalize_slice(&mut bytes, ScalarWidth::Two, ByteOrder::NATIVE);
        assert_eq!(bytes, [0x01, 0x02, 0x03, 0x04, 0x05]);

        let foreign = ByteOrder::from_little_endian_flag(!ByteOrder::NATIVE.is_little_endian());
        normalize_slice(&mut bytes, ScalarWidth::Two, foreign);
        assert_eq!(bytes, [0x02, 0x01, 0x04, 0x03, 0x05]);
    }

    #[test]
    fn scalar_metadata() {
        assert_eq!(<u8 as Scalar>::KIND, ScalarKind::Unsigned);
        assert_eq!(<i16 as Scalar>::KIND, ScalarKind::Signed);
        assert_eq!(<f64 as Scalar>::KIND, ScalarKind::Float);
        assert_eq!(<f32 as Scalar>::WIDTH.bytes(), 4);
        assert_eq!(<u64 as Scalar>::WIDTH.bytes(), 8);
        assert!(ByteOrder::NATIVE.is_native());
    }
}
