//! Unit-tagged physical quantities.
//!
//! A quantity is a floating-point value (or a sequence of them) tagged with a [`Unit`] code and
//! a display-format byte. On the wire each quantity is a self-describing record:
//!
//! | Field         | Width                  | Notes                      |
//! |---------------|------------------------|----------------------------|
//! | field type    | 1                      | [`FieldType`] code         |
//! | element count | 4, signed              | array shapes only          |
//! | unit          | 1                      | opaque, passed through     |
//! | display       | 1                      | opaque, passed through     |
//! | payload       | 4 or 8, × (1 or count) | IEEE-754 bits, big-endian  |
//!
//! The unit and display bytes are not validated. Any byte value is accepted and passed through.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::{BinaryReader, BinaryWriter, Primitive, ReaderError, WriterError};

/// A measurement unit, identified by its one-byte wire code.
///
/// The set of units and their codes is defined by the consuming protocol. This type carries the
/// code without interpreting it.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct Unit(pub u8);

impl Unit {
    /// The wire code.
    pub const fn code(self) -> u8 {
        self.0
    }
}

impl From<u8> for Unit {
    fn from(code: u8) -> Self {
        Self(code)
    }
}

/// Identifies the shape and width of the record that follows on the wire.
///
/// These codes must remain stable across versions.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[repr(u8)]
pub enum FieldType {
    /// A single `f32` quantity.
    Float32Unit = 25,
    /// A single `f64` quantity.
    Double64Unit = 26,
    /// An array of `f32` values sharing one unit.
    Float32UnitArray = 27,
    /// An array of `f64` values sharing one unit.
    Double64UnitArray = 28,
}

impl FieldType {
    /// The wire code.
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for FieldType {
    type Error = DecodeError;

    fn try_from(code: u8) -> Result<Self, DecodeError> {
        match code {
            25 => Ok(Self::Float32Unit),
            26 => Ok(Self::Double64Unit),
            27 => Ok(Self::Float32UnitArray),
            28 => Ok(Self::Double64UnitArray),
            _ => Err(DecodeError::UnknownFieldType(code)),
        }
    }
}

/// Floating-point widths a quantity can be carried in.
pub trait QuantityWidth: Primitive + PartialEq + Debug {
    /// Tag written before a [`ScalarQuantity`] of this width.
    const SCALAR_TAG: FieldType;
    /// Tag written before a [`VectorQuantity`] of this width.
    const ARRAY_TAG: FieldType;
}

impl QuantityWidth for f32 {
    const SCALAR_TAG: FieldType = FieldType::Float32Unit;
    const ARRAY_TAG: FieldType = FieldType::Float32UnitArray;
}

impl QuantityWidth for f64 {
    const SCALAR_TAG: FieldType = FieldType::Double64Unit;
    const ARRAY_TAG: FieldType = FieldType::Double64UnitArray;
}

/// A single value tagged with a unit and a display hint.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct ScalarQuantity<W> {
    /// The numeric value.
    pub value: W,
    /// The unit the value is expressed in.
    pub unit: Unit,
    /// Display-format hint. Its meaning is defined by the consumer.
    pub display: u8,
}

impl<W: QuantityWidth> Default for ScalarQuantity<W> {
    fn default() -> Self {
        Self::new(W::ZERO, Unit::default(), 0)
    }
}

impl<W: QuantityWidth> ScalarQuantity<W> {
    /// Constructor
    pub fn new(value: W, unit: Unit, display: u8) -> Self {
        Self {
            value,
            unit,
            display,
        }
    }

    /// Writes the tag, unit, display byte and value.
    pub fn serialize(&self, out: &mut BinaryWriter<'_>) {
        out.write_byte(W::SCALAR_TAG.code());
        out.write_byte(self.unit.code());
        out.write_byte(self.display);
        out.write(self.value);
    }

    /// Reads the unit, display byte and value into `self`.
    ///
    /// The tag must already have been consumed; see [`Quantity::decode`] for a version that reads
    /// the tag and dispatches on it. Underruns are recorded in `input`.
    pub fn deserialize(&mut self, input: &mut BinaryReader<'_>) {
        self.unit = Unit(input.read_byte());
        self.display = input.read_byte();
        self.value = input.read();
    }

    /// Reads a new quantity. The tag must already have been consumed.
    pub fn decode(input: &mut BinaryReader<'_>) -> Self {
        let mut q = Self::default();
        q.deserialize(input);
        q
    }
}

/// An ordered sequence of values sharing one unit and display hint.
#[derive(Clone, PartialEq, Debug)]
pub struct VectorQuantity<W> {
    /// The numeric values. Their count is written to the wire.
    pub values: Vec<W>,
    /// The unit every value is expressed in.
    pub unit: Unit,
    /// Display-format hint. Its meaning is defined by the consumer.
    pub display: u8,
}

impl<W> Default for VectorQuantity<W> {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            unit: Unit::default(),
            display: 0,
        }
    }
}

impl<W: QuantityWidth> VectorQuantity<W> {
    /// Constructor
    pub fn new(values: Vec<W>, unit: Unit, display: u8) -> Self {
        Self {
            values,
            unit,
            display,
        }
    }

    /// Writes the tag, element count, unit, display byte and then every value in order.
    ///
    /// Fails with [`WriterError::CannotEncode`] if there are more than `i32::MAX` values. Nothing
    /// is written in that case.
    pub fn serialize(&self, out: &mut BinaryWriter<'_>) -> Result<(), WriterError> {
        let count = i32::try_from(self.values.len()).map_err(|_| WriterError::CannotEncode)?;
        out.reserve(1 + 4 + 1 + 1 + self.values.len() * W::WIDTH);
        out.write_byte(W::ARRAY_TAG.code());
        out.write_i32(count);
        out.write_byte(self.unit.code());
        out.write_byte(self.display);
        for &value in self.values.iter() {
            out.write(value);
        }
        Ok(())
    }

    /// Reads the element count, unit, display byte and values into `self`, replacing the
    /// current values.
    ///
    /// The tag must already have been consumed. Exactly as many values as the declared count are
    /// produced. If the data ends first, the remaining values are zero and the underrun is
    /// recorded in `input`. A negative count is treated as zero.
    ///
    /// The zero tail is only filled if it fits in [`MAX_ZERO_FILL_BYTES`] and the memory for it
    /// can be reserved. Otherwise `values` holds just the elements that were present in the data.
    /// Either way the underrun is recorded, so the caller sees the error.
    pub fn deserialize(&mut self, input: &mut BinaryReader<'_>) {
        let declared = input.read_i32();
        self.unit = Unit(input.read_byte());
        self.display = input.read_byte();

        let count = usize::try_from(declared).unwrap_or(0);
        let available = count.min(input.remaining() / W::WIDTH);

        self.values.clear();
        self.values.reserve(available);
        for _ in 0..available {
            self.values.push(input.read());
        }

        if available < count {
            // Records the underrun. A failed read leaves the cursor where it was, so every later
            // read of this width fails the same way and the rest of the values are zero.
            let _: W = input.read();
            let missing = count - available;
            if missing.saturating_mul(W::WIDTH) > MAX_ZERO_FILL_BYTES {
                log::debug!("not zero-filling {missing} missing element(s) of a vector quantity");
            } else if self.values.try_reserve_exact(missing).is_ok() {
                self.values.resize(count, W::ZERO);
            }
        }
    }

    /// Reads a new quantity. The tag must already have been consumed.
    pub fn decode(input: &mut BinaryReader<'_>) -> Self {
        let mut q = Self::default();
        q.deserialize(input);
        q
    }
}

/// Largest zero tail, in bytes of payload, that [`VectorQuantity::deserialize`] fills in when the
/// data ends before the declared element count.
pub const MAX_ZERO_FILL_BYTES: usize = 1 << 24;

/// Any of the quantity shapes, as selected by the [`FieldType`] tag.
#[derive(Clone, PartialEq, Debug)]
pub enum Quantity {
    /// [`FieldType::Float32Unit`]
    Float32(ScalarQuantity<f32>),
    /// [`FieldType::Double64Unit`]
    Double64(ScalarQuantity<f64>),
    /// [`FieldType::Float32UnitArray`]
    Float32Array(VectorQuantity<f32>),
    /// [`FieldType::Double64UnitArray`]
    Double64Array(VectorQuantity<f64>),
}

impl Quantity {
    /// The tag this quantity is written with.
    pub fn field_type(&self) -> FieldType {
        match self {
            Self::Float32(_) => FieldType::Float32Unit,
            Self::Double64(_) => FieldType::Double64Unit,
            Self::Float32Array(_) => FieldType::Float32UnitArray,
            Self::Double64Array(_) => FieldType::Double64UnitArray,
        }
    }

    /// Writes the quantity, including its tag.
    pub fn encode(&self, out: &mut BinaryWriter<'_>) -> Result<(), WriterError> {
        match self {
            Self::Float32(q) => q.serialize(out),
            Self::Double64(q) => q.serialize(out),
            Self::Float32Array(q) => q.serialize(out)?,
            Self::Double64Array(q) => q.serialize(out)?,
        }
        Ok(())
    }

    /// Reads a tag and then the quantity shape it names.
    ///
    /// Returns an error if the tag is not a quantity [`FieldType`], or if `input` has an error
    /// recorded after reading the tag or the record. The error returned is always the reader's
    /// first one, even if it was recorded before this call. An unknown tag is consumed; nothing
    /// after it is.
    pub fn decode(input: &mut BinaryReader<'_>) -> Result<Self, DecodeError> {
        let tag = input.read_byte();
        input.finish()?;

        let field_type = FieldType::try_from(tag).inspect_err(|_| {
            log::debug!(
                "unknown quantity field type {tag} at offset {}",
                input.position() - 1
            );
        })?;

        let q = match field_type {
            FieldType::Float32Unit => Self::Float32(ScalarQuantity::decode(input)),
            FieldType::Double64Unit => Self::Double64(ScalarQuantity::decode(input)),
            FieldType::Float32UnitArray => Self::Float32Array(VectorQuantity::decode(input)),
            FieldType::Double64UnitArray => Self::Double64Array(VectorQuantity::decode(input)),
        };

        input.finish()?;
        Ok(q)
    }
}

impl From<ScalarQuantity<f32>> for Quantity {
    fn from(q: ScalarQuantity<f32>) -> Self {
        Self::Float32(q)
    }
}

impl From<ScalarQuantity<f64>> for Quantity {
    fn from(q: ScalarQuantity<f64>) -> Self {
        Self::Double64(q)
    }
}

impl From<VectorQuantity<f32>> for Quantity {
    fn from(q: VectorQuantity<f32>) -> Self {
        Self::Float32Array(q)
    }
}

impl From<VectorQuantity<f64>> for Quantity {
    fn from(q: VectorQuantity<f64>) -> Self {
        Self::Double64Array(q)
    }
}

/// Error type for [`Quantity::decode`].
#[derive(Copy, Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum DecodeError {
    /// The data ended before the record was complete.
    #[error(transparent)]
    Underrun(#[from] ReaderError),

    /// The tag does not name a quantity shape.
    #[error("unknown quantity field type {0}")]
    UnknownFieldType(u8),
}
