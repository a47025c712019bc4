use alloc::string::{String, ToString};
use core::mem::size_of;
use core::ops::Range;

use zerocopy::byteorder::{BigEndian, LittleEndian, I16, I32, I64};
use zerocopy::FromBytes;

use crate::{Char16, Char8, Endian, Primitive};

pub type Result<T> = core::result::Result<T, ReaderError>;

/// Reads values from a slice of bytes.
///
/// Multi-byte values are loaded in the reader's configured byte order, which defaults to
/// [`Endian::Big`] to match [`BinaryWriter`](crate::BinaryWriter).
///
/// Reads do not return `Result`. Instead, the reader keeps a sticky error status. If a read needs
/// more bytes than remain, the reader records a [`ReaderError::BufferUnderrun`] (unless an error
/// was already recorded), leaves the cursor where it was, and returns a zero value (`0`, `0.0`,
/// `false`). Later reads keep working: a read that fits in the remaining bytes still succeeds and
/// advances, and one that doesn't returns zero again. This lets a fixed-shape record be decoded
/// to the end and checked once, with [`has_error`](Self::has_error) or
/// [`finish`](Self::finish), rather than after every field.
///
/// The first recorded error is never overwritten.
pub struct BinaryReader<'a> {
    data: &'a [u8],
    pos: usize,
    endian: Endian,
    error: Option<ReaderError>,
}

impl<'a> BinaryReader<'a> {
    /// Constructor. The reader covers all of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            endian: Endian::Big,
            error: None,
        }
    }

    /// Creates a reader over `buffer[range]`.
    ///
    /// # Panics
    ///
    /// Panics if `range` is out of bounds for `buffer`, exactly like slice indexing.
    pub fn from_range(buffer: &'a [u8], range: Range<usize>) -> Self {
        Self::new(&buffer[range])
    }

    /// Sets the byte order and returns the reader.
    pub fn with_endian(mut self, endian: Endian) -> Self {
        self.endian = endian;
        self
    }

    /// Sets the byte order used by subsequent multi-byte reads.
    pub fn set_endian(&mut self, endian: Endian) {
        self.endian = endian;
    }

    /// The byte order used for multi-byte reads.
    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of bytes between the cursor and the end of the range.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns true if no bytes remain.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// The bytes that have not been consumed yet.
    pub fn rest(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Returns true if any read has run past the end of the data.
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// The first error recorded, if any.
    pub fn error(&self) -> Option<ReaderError> {
        self.error
    }

    /// The message of the first error recorded, or an empty string if there is none.
    pub fn error_message(&self) -> String {
        self.error.map(|e| e.to_string()).unwrap_or_default()
    }

    /// Converts the error status into a `Result`. Call this at the end of a decode pass.
    pub fn finish(&self) -> Result<()> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn underrun(&mut self, width: usize) {
        match self.error {
            None => {
                log::debug!(
                    "buffer underrun at offset {}: needed {} byte(s), {} remaining",
                    self.pos,
                    width,
                    self.remaining()
                );
                self.error = Some(ReaderError::BufferUnderrun { width });
            }
            Some(first) => {
                log::trace!("suppressed underrun reading {width} byte(s), keeping: {first}");
            }
        }
    }

    /// Loads a `T` from the front of the remaining data and advances past it. On underrun the
    /// cursor is left unchanged.
    #[inline(always)]
    fn load<T: FromBytes>(&mut self) -> Option<T> {
        match T::read_from_prefix(self.rest()) {
            Ok((value, _)) => {
                self.pos += size_of::<T>();
                Some(value)
            }
            Err(_) => {
                self.underrun(size_of::<T>());
                None
            }
        }
    }

    /// Returns the next byte without consuming it. This never records an error.
    pub fn peek_byte(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    /// Reads any [`Primitive`] value.
    pub fn read<T: Primitive>(&mut self) -> T {
        T::read_from(self)
    }

    /// Reads any [`Primitive`] value into `out`.
    pub fn read_into<T: Primitive>(&mut self, out: &mut T) {
        *out = T::read_from(self);
    }

    /// Reads a single `u8` value.
    #[inline(always)]
    pub fn read_byte(&mut self) -> u8 {
        self.load::<u8>().unwrap_or(0)
    }

    /// Reads a single `i8` value.
    #[inline(always)]
    pub fn read_i8(&mut self) -> i8 {
        self.read_byte() as i8
    }

    /// Reads an `i16` in the configured byte order.
    pub fn read_i16(&mut self) -> i16 {
        let value = match self.endian {
            Endian::Big => self.load::<I16<BigEndian>>().map(|v| v.get()),
            Endian::Little => self.load::<I16<LittleEndian>>().map(|v| v.get()),
        };
        value.unwrap_or(0)
    }

    /// Reads an `i32` in the configured byte order.
    pub fn read_i32(&mut self) -> i32 {
        let value = match self.endian {
            Endian::Big => self.load::<I32<BigEndian>>().map(|v| v.get()),
            Endian::Little => self.load::<I32<LittleEndian>>().map(|v| v.get()),
        };
        value.unwrap_or(0)
    }

    /// Reads an `i64` in the configured byte order.
    pub fn read_i64(&mut self) -> i64 {
        let value = match self.endian {
            Endian::Big => self.load::<I64<BigEndian>>().map(|v| v.get()),
            Endian::Little => self.load::<I64<LittleEndian>>().map(|v| v.get()),
        };
        value.unwrap_or(0)
    }

    /// Reads an `f32`. The bits are loaded as an `i32` and reinterpreted, never converted.
    pub fn read_f32(&mut self) -> f32 {
        f32::from_bits(self.read_i32() as u32)
    }

    /// Reads an `f64`. The bits are loaded as an `i64` and reinterpreted, never converted.
    pub fn read_f64(&mut self) -> f64 {
        f64::from_bits(self.read_i64() as u64)
    }

    /// Reads a `bool`. Any nonzero byte is true.
    pub fn read_bool(&mut self) -> bool {
        self.read_byte() != 0
    }

    /// Reads an 8-bit character.
    pub fn read_char8(&mut self) -> Char8 {
        Char8(self.read_byte())
    }

    /// Reads a 16-bit character, stored on the wire as an `i16`.
    pub fn read_char16(&mut self) -> Char16 {
        Char16(self.read_i16() as u16)
    }
}

/// Error type for `BinaryReader`
#[derive(Copy, Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum ReaderError {
    /// A read needed `width` bytes but fewer remained before the end of the data.
    #[error("buffer ended prematurely reading {width} byte(s)")]
    BufferUnderrun {
        /// Number of bytes the failed read required.
        width: usize,
    },
}
