use alloc::vec::Vec;
use zerocopy::byteorder::{BigEndian, I16, I32, I64};
use zerocopy::IntoBytes;

use crate::{Char16, Char8, Endian, Primitive};

/// Appends values to a caller-owned byte buffer.
///
/// Every multi-byte value is written most-significant byte first, regardless of the host byte
/// order. This is a fixed property of the wire format and is not configurable. Appending never
/// fails; the buffer grows as needed.
///
/// The writer holds the only mutable borrow of its buffer for as long as it lives, so bytes that
/// were already in the buffer are left alone and new bytes always go at the end.
pub struct BinaryWriter<'a> {
    out: &'a mut Vec<u8>,
}

impl<'a> BinaryWriter<'a> {
    /// Binds a writer to `out`. Values are appended after any bytes `out` already contains.
    pub fn wrap(out: &'a mut Vec<u8>) -> Self {
        Self { out }
    }

    /// The byte order used for multi-byte values. Always [`Endian::Big`].
    pub fn endian(&self) -> Endian {
        Endian::Big
    }

    /// The whole bound buffer, including bytes written before this writer was created.
    pub fn written(&self) -> &[u8] {
        self.out
    }

    /// Reserves capacity for at least `additional` more bytes.
    pub fn reserve(&mut self, additional: usize) {
        self.out.reserve(additional);
    }

    /// Writes `bytes` to the output.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.out.extend_from_slice(bytes);
    }

    /// Writes any [`Primitive`] value.
    pub fn write<T: Primitive>(&mut self, value: T) {
        value.write_to(self)
    }

    /// Writes a single `u8` value
    pub fn write_byte(&mut self, value: u8) {
        self.out.push(value)
    }

    /// Writes a single `i8` value
    pub fn write_i8(&mut self, value: i8) {
        self.write_byte(value as u8)
    }

    /// Writes a single `i16` value
    pub fn write_i16(&mut self, value: i16) {
        self.write_bytes(I16::<BigEndian>::new(value).as_bytes())
    }

    /// Writes a single `i32` value
    pub fn write_i32(&mut self, value: i32) {
        self.write_bytes(I32::<BigEndian>::new(value).as_bytes())
    }

    /// Writes a single `i64` value
    pub fn write_i64(&mut self, value: i64) {
        self.write_bytes(I64::<BigEndian>::new(value).as_bytes())
    }

    /// Writes an `f32` value. The IEEE-754 bit pattern is written as an `i32`, so NaN payloads and
    /// denormals are preserved exactly.
    pub fn write_f32(&mut self, value: f32) {
        self.write_i32(value.to_bits() as i32)
    }

    /// Writes an `f64` value. The IEEE-754 bit pattern is written as an `i64`.
    pub fn write_f64(&mut self, value: f64) {
        self.write_i64(value.to_bits() as i64)
    }

    /// Writes a `bool` value. True is encoded as 1. False is encoded as 0.
    pub fn write_bool(&mut self, value: bool) {
        self.write_byte(value as u8)
    }

    /// Writes an 8-bit character as a single byte.
    pub fn write_char8(&mut self, value: Char8) {
        self.write_byte(value.0)
    }

    /// Writes a 16-bit character. The code unit is written as an `i16`.
    pub fn write_char16(&mut self, value: Char16) {
        self.write_i16(value.0 as i16)
    }
}

/// Error type for the few encode operations that can fail.
#[derive(Copy, Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum WriterError {
    /// A value cannot be encoded. This is used when a sequence has more elements than its
    /// signed 32-bit count prefix can express.
    #[error("the data cannot be encoded")]
    CannotEncode,
}
