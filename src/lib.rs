//! A timestamp value with an optional originating time zone.
//!
//! [`TemporalValue`] serializes either as a bare ISO-8601 string, when it is
//! nested in a larger structure, or as a schema.org JSON-LD object, when it
//! is the whole document. Decoding accepts both shapes.

pub mod encoder;
pub mod error;
pub mod ldmodel;
pub mod temporal;
pub mod zone;

pub use encoder::{EncodeOptions, Position};
pub use error::{CodingPath, DecodeError, ZoneError};
pub use temporal::TemporalValue;
pub use zone::Zone;
