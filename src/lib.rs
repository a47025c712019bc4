//! Reads and writes primitive values and unit-tagged quantities in flat byte buffers, using a
//! fixed big-endian wire format.
//!
//! Integers occupy exactly their natural width (1, 2, 4 or 8 bytes) and are written
//! most-significant byte first. `f32` and `f64` values are transported as their raw IEEE-754 bit
//! patterns, so every value round-trips bit-for-bit, NaN payloads included.
//!
//! Reading never fails mid-record. [`BinaryReader`] records the first underrun, returns zero for
//! any read that doesn't fit, and lets the caller check the outcome once at the end of a decode
//! pass.
//!
//! ```
//! use quantity_binary_io::{BinaryReader, BinaryWriter, Quantity, ScalarQuantity, Unit};
//!
//! let mut buf = Vec::new();
//! let mut w = BinaryWriter::wrap(&mut buf);
//! w.write_i32(0x01020304);
//! ScalarQuantity::new(3.5f32, Unit(7), 2).serialize(&mut w);
//! assert_eq!(&buf[..4], &[1, 2, 3, 4]);
//!
//! let mut r = BinaryReader::new(&buf);
//! assert_eq!(r.read_i32(), 0x01020304);
//! let q = Quantity::decode(&mut r).unwrap();
//! assert_eq!(q, Quantity::Float32(ScalarQuantity::new(3.5, Unit(7), 2)));
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![forbid(unsafe_code)]
#![forbid(unused_must_use)]
#![warn(missing_docs)]

extern crate alloc;

mod primitive;
mod quantity;
mod reader;
mod writer;


pub use primitive::{Char16, Char8, Endian, Primitive};
pub use quantity::{
    DecodeError, FieldType, Quantity, QuantityWidth, ScalarQuantity, Unit, VectorQuantity,
    MAX_ZERO_FILL_BYTES,
};
pub use reader::{BinaryReader, ReaderError};
pub use writer::{BinaryWriter, WriterError};
