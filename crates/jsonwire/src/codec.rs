//! The codec contract and the top-level entry points.
//!
//! A codec is a three-member value: `decode_value`, `encode_value` and the
//! `null_value` sentinel substituted when a JSON `null` maps to a default.
//! The entry points wrap a codec around one of the supported input/output
//! carriers, reusing per-thread scratch buffers across calls and restoring
//! all state on exit so instances are reusable.

use std::cell::RefCell;
use std::io;

use bytes::{Buf, Bytes, BytesMut};

use crate::config::{ReaderConfig, WriterConfig};
use crate::error::{JsonReaderError, JsonWriterError};
use crate::reader::JsonReader;
use crate::writer::JsonWriter;

/// A per-type pair of decode and encode operations plus a null sentinel.
///
/// See the [`JsonReader`] docs for a complete hand-written implementation.
pub trait JsonValueCodec {
    type Value;

    /// Decodes one JSON value. `default` is substituted by null-accepting
    /// codecs; the entry points pass [`null_value`](Self::null_value).
    fn decode_value(
        &self,
        reader: &mut JsonReader<'_>,
        default: Self::Value,
    ) -> Result<Self::Value, JsonReaderError>;

    /// Encodes one JSON value.
    fn encode_value(
        &self,
        x: &Self::Value,
        writer: &mut JsonWriter<'_>,
    ) -> Result<(), JsonWriterError>;

    /// The value a JSON `null` stands for.
    fn null_value(&self) -> Self::Value;
}

// ------------------------------------------------------------------------
// Per-thread scratch buffers
// ------------------------------------------------------------------------

#[derive(Default)]
struct Scratch {
    buf: Vec<u8>,
    char_buf: String,
    out_buf: Vec<u8>,
}

thread_local! {
    static SCRATCH: RefCell<Option<Scratch>> = RefCell::new(Some(Scratch::default()));
}

/// Takes the thread's scratch; a re-entrant entry-point call gets fresh
/// buffers instead.
fn acquire_scratch() -> Scratch {
    SCRATCH
        .with(|cell| cell.borrow_mut().take())
        .unwrap_or_default()
}

/// Trims grown buffers back toward the preferred sizes and returns the
/// scratch to the thread slot.
fn release_scratch(mut scratch: Scratch, reader: &ReaderConfig, writer: &WriterConfig) {
    if scratch.buf.len() > reader.preferred_buf_size {
        scratch.buf.truncate(reader.preferred_buf_size);
        scratch.buf.shrink_to(reader.preferred_buf_size);
    }
    scratch.char_buf.clear();
    if scratch.char_buf.capacity() > reader.preferred_char_buf_size {
        scratch.char_buf.shrink_to(reader.preferred_char_buf_size);
    }
    if scratch.out_buf.len() > writer.preferred_buf_size {
        scratch.out_buf.truncate(writer.preferred_buf_size);
        scratch.out_buf.shrink_to(writer.preferred_buf_size);
    }
    SCRATCH.with(|cell| *cell.borrow_mut() = Some(scratch));
}

fn decode_top<C: JsonValueCodec>(
    codec: &C,
    reader: &mut JsonReader<'_>,
    config: ReaderConfig,
) -> Result<C::Value, JsonReaderError> {
    let value = codec.decode_value(reader, codec.null_value())?;
    if config.check_for_end_of_input {
        reader.check_end_of_input()?;
    }
    Ok(value)
}

// ------------------------------------------------------------------------
// Reading entry points
// ------------------------------------------------------------------------

/// Decodes one value from a byte slice.
pub fn read_from_slice<C: JsonValueCodec>(
    codec: &C,
    input: &[u8],
    config: ReaderConfig,
) -> Result<C::Value, JsonReaderError> {
    let mut scratch = acquire_scratch();
    let mut reader = JsonReader::from_slice(input, std::mem::take(&mut scratch.char_buf), config);
    let result = decode_top(codec, &mut reader, config);
    let (_, char_buf) = reader.into_scratch();
    scratch.char_buf = char_buf;
    release_scratch(scratch, &config, &WriterConfig::default());
    result
}

/// Decodes one value from a UTF-8 string.
pub fn read_from_str<C: JsonValueCodec>(
    codec: &C,
    input: &str,
    config: ReaderConfig,
) -> Result<C::Value, JsonReaderError> {
    read_from_slice(codec, input.as_bytes(), config)
}

/// Decodes one value from `buf`, advancing it by exactly the number of
/// bytes consumed (including any trailing whitespace verified by
/// [`ReaderConfig::check_for_end_of_input`]).
pub fn read_from_buf<C: JsonValueCodec>(
    codec: &C,
    buf: &mut Bytes,
    config: ReaderConfig,
) -> Result<C::Value, JsonReaderError> {
    let mut scratch = acquire_scratch();
    let mut reader = JsonReader::from_slice(&buf[..], std::mem::take(&mut scratch.char_buf), config);
    let result = decode_top(codec, &mut reader, config);
    let consumed = reader.consumed();
    let (_, char_buf) = reader.into_scratch();
    scratch.char_buf = char_buf;
    release_scratch(scratch, &config, &WriterConfig::default());
    buf.advance(consumed);
    result
}

/// Decodes one value from a pull-based byte stream.
pub fn read_from_stream<C: JsonValueCodec>(
    codec: &C,
    input: &mut impl io::Read,
    config: ReaderConfig,
) -> Result<C::Value, JsonReaderError> {
    let mut scratch = acquire_scratch();
    let mut reader = JsonReader::from_stream(
        input,
        std::mem::take(&mut scratch.buf),
        std::mem::take(&mut scratch.char_buf),
        config,
    );
    let result = decode_top(codec, &mut reader, config);
    let (buf, char_buf) = reader.into_scratch();
    scratch.buf = buf;
    scratch.char_buf = char_buf;
    release_scratch(scratch, &config, &WriterConfig::default());
    result
}

/// Decodes whitespace-separated top-level values from a stream, applying
/// `f` to each until it returns `false` or the input ends.
pub fn scan_values_from_stream<C: JsonValueCodec>(
    codec: &C,
    input: &mut impl io::Read,
    config: ReaderConfig,
    mut f: impl FnMut(C::Value) -> bool,
) -> Result<(), JsonReaderError> {
    let mut scratch = acquire_scratch();
    let mut reader = JsonReader::from_stream(
        input,
        std::mem::take(&mut scratch.buf),
        std::mem::take(&mut scratch.char_buf),
        config,
    );
    let result = (|| {
        while reader.has_remaining()? {
            let value = codec.decode_value(&mut reader, codec.null_value())?;
            if !f(value) {
                break;
            }
        }
        Ok(())
    })();
    let (buf, char_buf) = reader.into_scratch();
    scratch.buf = buf;
    scratch.char_buf = char_buf;
    release_scratch(scratch, &config, &WriterConfig::default());
    result
}

/// Decodes the elements of one top-level JSON array from a stream,
/// applying `f` to each. When `f` returns `false` the remaining elements
/// are skipped; the closing bracket (and, per
/// [`ReaderConfig::check_for_end_of_input`], the end of input) is still
/// verified.
pub fn scan_array_from_stream<C: JsonValueCodec>(
    codec: &C,
    input: &mut impl io::Read,
    config: ReaderConfig,
    mut f: impl FnMut(C::Value) -> bool,
) -> Result<(), JsonReaderError> {
    let mut scratch = acquire_scratch();
    let mut reader = JsonReader::from_stream(
        input,
        std::mem::take(&mut scratch.buf),
        std::mem::take(&mut scratch.char_buf),
        config,
    );
    let result = (|| {
        if !reader.is_next_token(b'[')? {
            return Err(reader.decode_error("expected '['"));
        }
        if !reader.is_next_token(b']')? {
            reader.rollback_token()?;
            let mut scanning = true;
            loop {
                if scanning {
                    let value = codec.decode_value(&mut reader, codec.null_value())?;
                    scanning = f(value);
                } else {
                    reader.skip()?;
                }
                let b = reader.next_token()?;
                if b == b']' {
                    break;
                }
                if b != b',' {
                    return Err(reader.decode_error("expected ']' or ','"));
                }
            }
        }
        if config.check_for_end_of_input {
            reader.check_end_of_input()?;
        }
        Ok(())
    })();
    let (buf, char_buf) = reader.into_scratch();
    scratch.buf = buf;
    scratch.char_buf = char_buf;
    release_scratch(scratch, &config, &WriterConfig::default());
    result
}

// ------------------------------------------------------------------------
// Writing entry points
// ------------------------------------------------------------------------

/// Encodes `x` into a fresh byte vector.
pub fn write_to_vec<C: JsonValueCodec>(
    codec: &C,
    x: &C::Value,
    config: WriterConfig,
) -> Result<Vec<u8>, JsonWriterError> {
    let mut scratch = acquire_scratch();
    let mut writer = JsonWriter::to_vec(std::mem::take(&mut scratch.out_buf), config);
    let result = codec.encode_value(x, &mut writer);
    let output = result.map(|()| writer.written().to_vec());
    scratch.out_buf = writer.into_scratch();
    release_scratch(scratch, &ReaderConfig::default(), &config);
    output
}

/// Encodes `x` into a fresh string.
pub fn write_to_string<C: JsonValueCodec>(
    codec: &C,
    x: &C::Value,
    config: WriterConfig,
) -> Result<String, JsonWriterError> {
    let bytes = write_to_vec(codec, x, config)?;
    // The writer only ever emits complete UTF-8 sequences.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Encodes `x` into the given subrange, returning the number of bytes
/// written; fails with `TooLongOutput` when the subrange is too small.
pub fn write_to_slice<C: JsonValueCodec>(
    codec: &C,
    x: &C::Value,
    target: &mut [u8],
    config: WriterConfig,
) -> Result<usize, JsonWriterError> {
    let mut writer = JsonWriter::to_fixed(target, config);
    codec.encode_value(x, &mut writer)?;
    Ok(writer.count())
}

/// Encodes `x` into a `BytesMut`, appending at its current end.
pub fn write_to_buf<C: JsonValueCodec>(
    codec: &C,
    x: &C::Value,
    out: &mut BytesMut,
    config: WriterConfig,
) -> Result<(), JsonWriterError> {
    let mut scratch = acquire_scratch();
    let mut writer = JsonWriter::to_bytes_mut(out, std::mem::take(&mut scratch.out_buf), config);
    let result = codec.encode_value(x, &mut writer).and_then(|()| writer.flush());
    scratch.out_buf = writer.into_scratch();
    release_scratch(scratch, &ReaderConfig::default(), &config);
    result
}

/// Encodes `x` into a sink, flushing the internal buffer whenever it
/// fills.
pub fn write_to_stream<C: JsonValueCodec>(
    codec: &C,
    x: &C::Value,
    out: &mut impl io::Write,
    config: WriterConfig,
) -> Result<(), JsonWriterError> {
    let mut scratch = acquire_scratch();
    let mut writer = JsonWriter::to_stream(out, std::mem::take(&mut scratch.out_buf), config);
    let result = codec.encode_value(x, &mut writer).and_then(|()| writer.flush());
    scratch.out_buf = writer.into_scratch();
    release_scratch(scratch, &ReaderConfig::default(), &config);
    result
}
