//! The push-style JSON writer.
//!
//! [`JsonWriter`] emits UTF-8 JSON into a growable buffer, a caller-provided
//! fixed subrange, or a sink that is flushed whenever the internal buffer
//! fills. Structural state is two fields: the indention depth and a comma
//! flag that interleaves `,`/`:` between the `write_*` calls.
//!
//! In pretty mode (`indention_step > 0`) every value and key starts on its
//! own indented line and containers close on the parent's line; compact
//! mode emits no whitespace at all.

#![allow(clippy::inline_always)]

mod float;
mod ints;
mod temporal;
mod text;

use std::io;

use bytes::BytesMut;

use crate::config::WriterConfig;
use crate::error::JsonWriterError;

/// Reports whether `ch` is emitted verbatim inside JSON strings: printable
/// ASCII excluding the quote and the backslash. The same decision drives
/// the internal escape scan.
#[must_use]
pub fn is_non_escaped_ascii(ch: char) -> bool {
    matches!(ch, '\u{20}'..='\u{7E}') && ch != '"' && ch != '\\'
}

/// Output storage: an owned growable buffer or a caller-provided subrange
/// that fails with `TooLongOutput` when exhausted.
#[derive(Debug)]
enum WriterBuf<'s> {
    Owned(Vec<u8>),
    Fixed(&'s mut [u8]),
}

/// The attached sink, if any; the buffer is flushed into it on overflow and
/// at the end of the top-level call.
pub(crate) enum Out<'s> {
    None,
    Stream(&'s mut dyn io::Write),
    Bytes(&'s mut BytesMut),
}

impl std::fmt::Debug for Out<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Stream(_) => f.write_str("Stream(..)"),
            Self::Bytes(_) => f.write_str("Bytes(..)"),
        }
    }
}

/// The push-style emitter.
///
/// Not safe for concurrent use; distinct instances may run in parallel
/// without coordination. See the [`JsonReader`](crate::JsonReader) docs for
/// a complete codec example.
#[derive(Debug)]
pub struct JsonWriter<'s> {
    buf: WriterBuf<'s>,
    count: usize,
    indention: usize,
    comma: bool,
    after_key: bool,
    out: Out<'s>,
    pub(crate) config: WriterConfig,
}

impl<'s> JsonWriter<'s> {
    pub(crate) fn to_vec(buf: Vec<u8>, config: WriterConfig) -> Self {
        Self::new(WriterBuf::Owned(buf), Out::None, config)
    }

    pub(crate) fn to_fixed(target: &'s mut [u8], config: WriterConfig) -> Self {
        Self::new(WriterBuf::Fixed(target), Out::None, config)
    }

    pub(crate) fn to_stream(
        out: &'s mut dyn io::Write,
        buf: Vec<u8>,
        config: WriterConfig,
    ) -> Self {
        Self::new(WriterBuf::Owned(buf), Out::Stream(out), config)
    }

    pub(crate) fn to_bytes_mut(out: &'s mut BytesMut, buf: Vec<u8>, config: WriterConfig) -> Self {
        Self::new(WriterBuf::Owned(buf), Out::Bytes(out), config)
    }

    fn new(mut buf: WriterBuf<'s>, out: Out<'s>, config: WriterConfig) -> Self {
        if let WriterBuf::Owned(v) = &mut buf {
            if v.len() < config.preferred_buf_size {
                v.resize(config.preferred_buf_size, 0);
            }
        }
        Self {
            buf,
            count: 0,
            indention: 0,
            comma: false,
            after_key: false,
            out,
            config,
        }
    }

    /// Bytes written so far (fixed-subrange carrier).
    pub(crate) fn count(&self) -> usize {
        self.count
    }

    /// Flushes buffered bytes into the attached sink.
    pub(crate) fn flush(&mut self) -> Result<(), JsonWriterError> {
        let WriterBuf::Owned(buf) = &self.buf else {
            return Ok(());
        };
        match &mut self.out {
            Out::None => return Ok(()),
            Out::Stream(w) => w.write_all(&buf[..self.count])?,
            Out::Bytes(b) => b.extend_from_slice(&buf[..self.count]),
        }
        self.count = 0;
        Ok(())
    }

    /// The bytes written so far (owned-buffer carriers).
    pub(crate) fn written(&self) -> &[u8] {
        match &self.buf {
            WriterBuf::Owned(v) => &v[..self.count],
            WriterBuf::Fixed(t) => &t[..self.count],
        }
    }

    /// Hands the owned buffer (trimmed to the written length) back to the
    /// entry point.
    pub(crate) fn into_vec(self) -> Vec<u8> {
        match self.buf {
            WriterBuf::Owned(mut v) => {
                v.truncate(self.count);
                v
            }
            WriterBuf::Fixed(_) => Vec::new(),
        }
    }

    /// Hands the reusable scratch buffer back to the entry point's pool.
    pub(crate) fn into_scratch(self) -> Vec<u8> {
        match self.buf {
            WriterBuf::Owned(v) => v,
            WriterBuf::Fixed(_) => Vec::new(),
        }
    }

    // --------------------------------------------------------------------
    // Byte-level output
    // --------------------------------------------------------------------

    /// Makes room for `n` more bytes: flush to the sink when attached,
    /// otherwise grow the owned buffer; the fixed carrier fails with
    /// `TooLongOutput`.
    pub(crate) fn ensure(&mut self, n: usize) -> Result<(), JsonWriterError> {
        let capacity = match &self.buf {
            WriterBuf::Owned(v) => v.len(),
            WriterBuf::Fixed(t) => t.len(),
        };
        if self.count + n <= capacity {
            return Ok(());
        }
        if !matches!(self.out, Out::None) {
            self.flush()?;
            if self.count + n <= capacity {
                return Ok(());
            }
        }
        match &mut self.buf {
            WriterBuf::Owned(v) => {
                let new_len = (v.len() * 2).max(self.count + n);
                v.resize(new_len, 0);
                Ok(())
            }
            WriterBuf::Fixed(_) => Err(JsonWriterError::TooLongOutput),
        }
    }

    #[inline(always)]
    pub(crate) fn put(&mut self, b: u8) -> Result<(), JsonWriterError> {
        self.ensure(1)?;
        let count = self.count;
        self.buf_mut()[count] = b;
        self.count = count + 1;
        Ok(())
    }

    #[inline(always)]
    pub(crate) fn put_slice(&mut self, bytes: &[u8]) -> Result<(), JsonWriterError> {
        self.ensure(bytes.len())?;
        let count = self.count;
        self.buf_mut()[count..count + bytes.len()].copy_from_slice(bytes);
        self.count = count + bytes.len();
        Ok(())
    }

    #[inline(always)]
    pub(crate) fn buf_mut(&mut self) -> &mut [u8] {
        match &mut self.buf {
            WriterBuf::Owned(v) => v,
            WriterBuf::Fixed(t) => t,
        }
    }

    // --------------------------------------------------------------------
    // Structural state
    // --------------------------------------------------------------------

    /// Interleaves the comma and, in pretty mode, the line break and
    /// indention that precede a value, key or nested start.
    pub(crate) fn write_comma_and_indention(&mut self) -> Result<(), JsonWriterError> {
        if self.after_key {
            self.after_key = false;
            return Ok(());
        }
        if self.comma {
            self.put(b',')?;
        } else {
            self.comma = true;
        }
        self.write_indention()
    }

    fn write_indention(&mut self) -> Result<(), JsonWriterError> {
        if self.indention == 0 {
            return Ok(());
        }
        self.put(b'\n')?;
        self.ensure(self.indention)?;
        let count = self.count;
        let indention = self.indention;
        self.buf_mut()[count..count + indention].fill(b' ');
        self.count = count + indention;
        Ok(())
    }

    /// Emits `[`.
    pub fn write_array_start(&mut self) -> Result<(), JsonWriterError> {
        self.write_nested_start(b'[')
    }

    /// Emits `]`.
    pub fn write_array_end(&mut self) -> Result<(), JsonWriterError> {
        self.write_nested_end(b']')
    }

    /// Emits `{`.
    pub fn write_object_start(&mut self) -> Result<(), JsonWriterError> {
        self.write_nested_start(b'{')
    }

    /// Emits `}`.
    pub fn write_object_end(&mut self) -> Result<(), JsonWriterError> {
        self.write_nested_end(b'}')
    }

    fn write_nested_start(&mut self, open: u8) -> Result<(), JsonWriterError> {
        self.write_comma_and_indention()?;
        self.put(open)?;
        self.indention += self.config.indention_step;
        self.comma = false;
        Ok(())
    }

    fn write_nested_end(&mut self, close: u8) -> Result<(), JsonWriterError> {
        let had_values = self.comma;
        self.indention -= self.config.indention_step;
        if had_values {
            self.write_indention()?;
        }
        self.put(close)?;
        self.comma = true;
        Ok(())
    }

    /// Emits a comma if due, then the key as a quoted string, then `:`
    /// (with a trailing space in pretty mode).
    pub fn write_key(&mut self, key: &str) -> Result<(), JsonWriterError> {
        self.write_comma_and_indention()?;
        self.write_escaped_string(key)?;
        self.write_colon()
    }

    /// Emits a key whose every character the caller promises to be
    /// non-escaped ASCII; the escape scan is skipped entirely.
    pub fn write_non_escaped_ascii_key(&mut self, key: &str) -> Result<(), JsonWriterError> {
        self.write_comma_and_indention()?;
        self.put(b'"')?;
        self.put_slice(key.as_bytes())?;
        self.put(b'"')?;
        self.write_colon()
    }

    pub(crate) fn write_colon(&mut self) -> Result<(), JsonWriterError> {
        self.put(b':')?;
        if self.config.indention_step > 0 {
            self.put(b' ')?;
        }
        self.after_key = true;
        Ok(())
    }

    /// Emits `null`.
    pub fn write_null(&mut self) -> Result<(), JsonWriterError> {
        self.write_comma_and_indention()?;
        self.put_slice(b"null")
    }

    /// Emits `true` or `false`.
    pub fn write_bool(&mut self, x: bool) -> Result<(), JsonWriterError> {
        self.write_comma_and_indention()?;
        self.put_slice(if x { b"true" } else { b"false" })
    }

    /// Emits `"true"` or `"false"`.
    pub fn write_bool_as_string(&mut self, x: bool) -> Result<(), JsonWriterError> {
        self.write_comma_and_indention()?;
        self.put_slice(if x { b"\"true\"" } else { b"\"false\"" })
    }

    /// Emits a `"true"`/`"false"` key followed by a colon.
    pub fn write_key_as_boolean(&mut self, x: bool) -> Result<(), JsonWriterError> {
        self.write_comma_and_indention()?;
        self.put_slice(if x { b"\"true\"" } else { b"\"false\"" })?;
        self.write_colon()
    }

    /// Appends `bytes` verbatim, with no validation; the comma flag is
    /// still interleaved.
    pub fn write_raw_val(&mut self, bytes: &[u8]) -> Result<(), JsonWriterError> {
        self.write_comma_and_indention()?;
        self.put_slice(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn writer_output(f: impl FnOnce(&mut JsonWriter<'_>)) -> String {
        let mut w = JsonWriter::to_vec(Vec::new(), WriterConfig::default());
        f(&mut w);
        String::from_utf8(w.into_vec()).unwrap()
    }

    #[test]
    fn compact_structure() {
        let out = writer_output(|w| {
            w.write_object_start().unwrap();
            w.write_key("a").unwrap();
            w.write_bool(true).unwrap();
            w.write_key("b").unwrap();
            w.write_array_start().unwrap();
            w.write_null().unwrap();
            w.write_null().unwrap();
            w.write_array_end().unwrap();
            w.write_object_end().unwrap();
        });
        assert_eq!(out, r#"{"a":true,"b":[null,null]}"#);
    }

    #[test]
    fn empty_containers_stay_tight_in_pretty_mode() {
        let mut w = JsonWriter::to_vec(Vec::new(), WriterConfig::default().with_indention_step(2));
        w.write_array_start().unwrap();
        w.write_object_start().unwrap();
        w.write_object_end().unwrap();
        w.write_array_end().unwrap();
        assert_eq!(String::from_utf8(w.into_vec()).unwrap(), "[\n  {}\n]");
    }

    #[test]
    fn fixed_carrier_reports_overflow() {
        let mut target = [0u8; 4];
        let mut w = JsonWriter::to_fixed(&mut target, WriterConfig::default());
        let res = w
            .write_bool(true)
            .and_then(|()| w.write_raw_val(b"garbage"));
        assert!(matches!(res, Err(JsonWriterError::TooLongOutput)));
    }

    #[test]
    fn non_escaped_ascii_predicate() {
        assert!(is_non_escaped_ascii('a'));
        assert!(is_non_escaped_ascii(' '));
        assert!(!is_non_escaped_ascii('"'));
        assert!(!is_non_escaped_ascii('\\'));
        assert!(!is_non_escaped_ascii('\n'));
        assert!(!is_non_escaped_ascii('ї'));
    }
}
