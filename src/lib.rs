//! Reads and writes fixed-width scalars to binary file streams, converting between the byte
//! order declared by a file format and the byte order of the host.
//!
//! GNSS receiver and observation formats store their records as packed integers and IEEE floats
//! in a byte order that is a property of the format, not of the machine reading it. This crate
//! provides the primitive layer those format readers are built on:
//!
//! * [`endian`] converts a [`RawBuffer`] holding one scalar's on-disk bytes to and from a host
//!   value. It is pure and works without `std`.
//! * [`BinaryStream`] owns a binary-mode byte source or sink and reads or writes exact byte
//!   counts, telling a clean end of data ([`ReadError::EndOfData`]) apart from a truncated value
//!   ([`ReadError::Format`]).
//!
//! ```no_run
//! use gnss_binary_io::{BinaryStream, LittleEndian, OpenMode};
//!
//! # fn main() -> Result<(), gnss_binary_io::Error> {
//! let mut out = BinaryStream::create("obs.bin", LittleEndian)?;
//! out.write_u16(0x1234)?;
//! out.write_f64(3.14159)?;
//! out.close()?;
//!
//! let mut input = BinaryStream::open("obs.bin", OpenMode::read(), LittleEndian)?;
//! assert_eq!(input.read_u16()?, 0x1234);
//! assert_eq!(input.read_f64()?, 3.14159);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![forbid(unsafe_code)]
#![forbid(unused_must_use)]
#![warn(missing_docs)]

pub mod endian;

#[cfg(feature = "std")]
mod error;
#[cfg(feature = "std")]
mod reader;
#[cfg(feature = "std")]
mod stream;
#[cfg(feature = "std")]
mod writer;


pub use endian::{ByteOrder, RawBuffer, Scalar, ScalarKind, ScalarWidth};

#[cfg(feature = "std")]
pub use error::{Error, OpenError, ReadError, WriteError};
#[cfg(feature = "std")]
pub use stream::{Access, BigEndian, BinaryStream, DeclaredByteOrder, LittleEndian, OpenMode};
