//! A high-throughput, low-allocation JSON codec: a pull-style tokenizing
//! [`JsonReader`], a push-style [`JsonWriter`], and the [`JsonValueCodec`]
//! contract gluing them to user-defined value types.
//!
//! The readers and writers carry exact parsers and formatters for the full
//! primitive taxonomy: booleans, all integer widths, IEEE-754 singles and
//! doubles (exactly rounded in, shortest-round-trip out), arbitrary
//! precision numbers, strings, characters, base16/base64 blobs, UUIDs, and
//! the ISO-8601 temporal family.
//!
//! # Examples
//!
//! ```rust
//! use jsonwire::{
//!     read_from_slice, write_to_vec, JsonReader, JsonReaderError, JsonValueCodec, JsonWriter,
//!     JsonWriterError, ReaderConfig, WriterConfig,
//! };
//!
//! struct F64Codec;
//!
//! impl JsonValueCodec for F64Codec {
//!     type Value = f64;
//!
//!     fn decode_value(
//!         &self,
//!         reader: &mut JsonReader<'_>,
//!         _default: f64,
//!     ) -> Result<f64, JsonReaderError> {
//!         reader.read_f64()
//!     }
//!
//!     fn encode_value(&self, x: &f64, writer: &mut JsonWriter<'_>) -> Result<(), JsonWriterError> {
//!         writer.write_f64(*x)
//!     }
//!
//!     fn null_value(&self) -> f64 {
//!         0.0
//!     }
//! }
//!
//! let x = read_from_slice(&F64Codec, b"7.1E10", ReaderConfig::default()).unwrap();
//! assert_eq!(x, 7.1e10);
//! let bytes = write_to_vec(&F64Codec, &x, WriterConfig::default()).unwrap();
//! assert_eq!(bytes, b"7.1E10");
//! ```

mod codec;
mod config;
mod error;
mod reader;
mod temporal;
mod writer;

pub use codec::{
    read_from_buf, read_from_slice, read_from_str, read_from_stream, scan_array_from_stream,
    scan_values_from_stream, write_to_buf, write_to_slice, write_to_stream, write_to_string,
    write_to_vec, JsonValueCodec,
};
pub use config::{ReaderConfig, WriterConfig};
pub use error::{JsonReaderError, JsonWriterError, ReaderErrorKind};
pub use reader::JsonReader;
pub use temporal::{MonthDay, OffsetPrefix, OffsetTime, Period, YearMonth, ZoneId, ZonedDateTime};
pub use writer::{is_non_escaped_ascii, JsonWriter};

#[cfg(test)]
mod tests;
