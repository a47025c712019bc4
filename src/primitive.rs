use crate::{BinaryReader, BinaryWriter};

/// Byte order used for multi-byte values.
///
/// The wire protocol is big-endian. `Little` is only honored by [`BinaryReader`]; the writer
/// always emits big-endian.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Hash)]
pub enum Endian {
    /// Most-significant byte first.
    #[default]
    Big,
    /// Least-significant byte first.
    Little,
}

/// An 8-bit character, transported as a single byte.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct Char8(pub u8);

impl Char8 {
    /// Interprets the byte as a Latin-1 code point.
    pub fn to_char(self) -> char {
        char::from(self.0)
    }
}

impl From<u8> for Char8 {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

/// A 16-bit character (one UTF-16 code unit), transported as a 16-bit signed integer.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct Char16(pub u16);

impl Char16 {
    /// Converts the code unit to a `char`. Returns `None` for surrogate code units.
    pub fn to_char(self) -> Option<char> {
        char::from_u32(u32::from(self.0))
    }
}

impl From<u16> for Char16 {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

/// A fixed-width value that can be written by [`BinaryWriter`] and read by [`BinaryReader`].
///
/// This is what lets `write` and `read` be called generically, e.g. by the quantity codec, which
/// is parameterized over `f32` and `f64`.
pub trait Primitive: Copy {
    /// Number of bytes the value occupies on the wire.
    const WIDTH: usize;

    /// The value a reader produces when the buffer ends before the value could be read.
    const ZERO: Self;

    /// Appends `self` to `out`.
    fn write_to(self, out: &mut BinaryWriter<'_>);

    /// Reads a value from `input`. On underrun this returns [`Self::ZERO`].
    fn read_from(input: &mut BinaryReader<'_>) -> Self;
}

macro_rules! primitive {
    ($t:ty, $width:expr, $zero:expr, $write:ident, $read:ident) => {
        impl Primitive for $t {
            const WIDTH: usize = $width;
            const ZERO: Self = $zero;

            #[inline(always)]
            fn write_to(self, out: &mut BinaryWriter<'_>) {
                out.$write(self)
            }

            #[inline(always)]
            fn read_from(input: &mut BinaryReader<'_>) -> Self {
                input.$read()
            }
        }
    };
}

primitive!(u8, 1, 0, write_byte, read_byte);
primitive!(i8, 1, 0, write_i8, read_i8);
primitive!(i16, 2, 0, write_i16, read_i16);
primitive!(i32, 4, 0, write_i32, read_i32);
primitive!(i64, 8, 0, write_i64, read_i64);
primitive!(f32, 4, 0.0, write_f32, read_f32);
primitive!(f64, 8, 0.0, write_f64, read_f64);
primitive!(bool, 1, false, write_bool, read_bool);
primitive!(Char8, 1, Char8(0), write_char8, read_char8);
primitive!(Char16, 2, Char16(0), write_char16, read_char16);
