//! The pull-style JSON reader.
//!
//! [`JsonReader`] tokenizes UTF-8 JSON bytes from a borrowed slice or a
//! refillable ring fed by a byte stream. Codec implementations drive it with
//! the token operations (`next_token`, `is_next_token`, `rollback_token`),
//! the typed `read_*` family, and the structural helpers (`skip`,
//! `skip_to_key`, `read_raw_val_as_bytes`).
#![allow(clippy::inline_always)]

mod bignum;
mod float;
mod ints;
mod temporal;
mod text;

pub(crate) use text::{BASE64_ALPHABET, BASE64_URL_ALPHABET};

use std::fmt::Write as _;
use std::io;

use crate::config::ReaderConfig;
use crate::error::{JsonReaderError, ReaderErrorKind};

/// Backing storage of the byte ring: a caller-provided slice (no refill) or
/// an owned window over a refillable source.
#[derive(Debug)]
enum ReaderBuf<'s> {
    Borrowed(&'s [u8]),
    Owned(Vec<u8>),
}

/// The refill source, if any.
pub(crate) enum Source<'s> {
    None,
    Stream(&'s mut dyn io::Read),
}

impl std::fmt::Debug for Source<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// The pull-style tokenizing reader.
///
/// Not safe for concurrent use; distinct instances may run in parallel
/// without coordination.
///
/// # Examples
///
/// ```rust
/// use jsonwire::{read_from_slice, JsonValueCodec, JsonReader, JsonWriter};
/// # use jsonwire::{JsonReaderError, JsonWriterError};
///
/// struct PointCodec;
///
/// impl JsonValueCodec for PointCodec {
///     type Value = (i32, i32);
///
///     fn decode_value(
///         &self,
///         reader: &mut JsonReader<'_>,
///         default: (i32, i32),
///     ) -> Result<(i32, i32), JsonReaderError> {
///         if reader.is_next_token(b'n')? {
///             return reader.read_null_or_error(default, "expected '{' or null");
///         }
///         reader.rollback_token()?;
///         let mut x = 0;
///         let mut y = 0;
///         if !reader.is_next_token(b'{')? {
///             return Err(reader.decode_error("expected '{'"));
///         }
///         if !reader.is_next_token(b'}')? {
///             reader.rollback_token()?;
///             loop {
///                 match reader.read_key()?.as_str() {
///                     "x" => x = reader.read_i32()?,
///                     "y" => y = reader.read_i32()?,
///                     name => return Err(reader.unexpected_key_error(name)),
///                 }
///                 if !reader.is_next_token(b',')? {
///                     break;
///                 }
///             }
///             if !reader.is_current_token(b'}')? {
///                 return Err(reader.decode_error("expected '}' or ','"));
///             }
///         }
///         Ok((x, y))
///     }
///
///     fn encode_value(
///         &self,
///         x: &(i32, i32),
///         writer: &mut JsonWriter<'_>,
///     ) -> Result<(), JsonWriterError> {
///         writer.write_object_start()?;
///         writer.write_key("x")?;
///         writer.write_i32(x.0)?;
///         writer.write_key("y")?;
///         writer.write_i32(x.1)?;
///         writer.write_object_end()
///     }
///
///     fn null_value(&self) -> (i32, i32) {
///         (0, 0)
///     }
/// }
///
/// let point = read_from_slice(&PointCodec, br#"{"x":1,"y":2}"#, Default::default()).unwrap();
/// assert_eq!(point, (1, 2));
/// ```
#[derive(Debug)]
pub struct JsonReader<'s> {
    buf: ReaderBuf<'s>,
    head: usize,
    tail: usize,
    mark: Option<usize>,
    /// Bytes discarded by ring compaction so far; `total_shift + pos` is the
    /// absolute input offset of buffer position `pos`.
    total_shift: u64,
    source: Source<'s>,
    pub(crate) char_buf: String,
    pub(crate) config: ReaderConfig,
}

impl<'s> JsonReader<'s> {
    pub(crate) fn from_slice(input: &'s [u8], char_buf: String, config: ReaderConfig) -> Self {
        Self {
            buf: ReaderBuf::Borrowed(input),
            head: 0,
            tail: input.len(),
            mark: None,
            total_shift: 0,
            source: Source::None,
            char_buf,
            config,
        }
    }

    pub(crate) fn from_stream(
        source: &'s mut dyn io::Read,
        mut buf: Vec<u8>,
        char_buf: String,
        config: ReaderConfig,
    ) -> Self {
        if buf.len() < config.preferred_buf_size {
            buf.resize(config.preferred_buf_size, 0);
        }
        Self {
            buf: ReaderBuf::Owned(buf),
            head: 0,
            tail: 0,
            mark: None,
            total_shift: 0,
            source: Source::Stream(source),
            char_buf,
            config,
        }
    }

    /// Hands the reusable buffers back to the entry point's scratch pool.
    pub(crate) fn into_scratch(self) -> (Vec<u8>, String) {
        let buf = match self.buf {
            ReaderBuf::Owned(v) => v,
            ReaderBuf::Borrowed(_) => Vec::new(),
        };
        (buf, self.char_buf)
    }

    /// Number of input bytes consumed so far (slice carrier only).
    pub(crate) fn consumed(&self) -> usize {
        self.head
    }

    #[inline(always)]
    pub(crate) fn bytes(&self) -> &[u8] {
        match &self.buf {
            ReaderBuf::Borrowed(b) => b,
            ReaderBuf::Owned(v) => v,
        }
    }

    // --------------------------------------------------------------------
    // Token operations
    // --------------------------------------------------------------------

    /// Returns the byte at the head position and advances past it.
    #[inline(always)]
    pub fn next_byte(&mut self) -> Result<u8, JsonReaderError> {
        let mut pos = self.head;
        if pos >= self.tail {
            pos = self.load_more_or_error(pos)?;
        }
        self.head = pos + 1;
        Ok(self.bytes()[pos])
    }

    /// Skips JSON whitespace and returns the next byte, advancing past it.
    #[inline(always)]
    pub fn next_token(&mut self) -> Result<u8, JsonReaderError> {
        let mut pos = self.head;
        loop {
            if pos >= self.tail {
                pos = self.load_more_or_error(pos)?;
            }
            let b = self.bytes()[pos];
            pos += 1;
            if !matches!(b, b' ' | b'\t' | b'\n' | b'\r') {
                self.head = pos;
                return Ok(b);
            }
        }
    }

    /// Like [`next_token`](Self::next_token) but reports whether the token
    /// equals `t`. The head always advances past the inspected byte.
    #[inline(always)]
    pub fn is_next_token(&mut self, t: u8) -> Result<bool, JsonReaderError> {
        Ok(self.next_token()? == t)
    }

    /// Examines the most recently consumed byte without moving the head.
    pub fn is_current_token(&self, t: u8) -> Result<bool, JsonReaderError> {
        if self.head == 0 {
            return Err(self.illegal_state_error(
                "expected preceding call of 'next_token()' or 'is_next_token()'",
            ));
        }
        Ok(self.bytes()[self.head - 1] == t)
    }

    /// Puts the most recently consumed byte back.
    pub fn rollback_token(&mut self) -> Result<(), JsonReaderError> {
        if self.head == 0 {
            return Err(self.illegal_state_error(
                "expected preceding call of 'next_token()' or 'is_next_token()'",
            ));
        }
        self.head -= 1;
        Ok(())
    }

    /// Anchors the current position so the bytes from it onward survive
    /// refills until the mark is released.
    pub fn set_mark(&mut self) -> Result<(), JsonReaderError> {
        if self.mark.is_some() {
            return Err(self.illegal_state_error(
                "expected preceding call of 'reset_mark()' or 'rollback_to_mark()'",
            ));
        }
        self.mark = Some(self.head);
        Ok(())
    }

    /// Releases the mark without moving the head.
    pub fn reset_mark(&mut self) -> Result<(), JsonReaderError> {
        if self.mark.is_none() {
            return Err(self.illegal_state_error("expected preceding call of 'set_mark()'"));
        }
        self.mark = None;
        Ok(())
    }

    /// Moves the head back to the marked position and releases the mark.
    pub fn rollback_to_mark(&mut self) -> Result<(), JsonReaderError> {
        let Some(mark) = self.mark.take() else {
            return Err(self.illegal_state_error("expected preceding call of 'set_mark()'"));
        };
        self.head = mark;
        Ok(())
    }

    // --------------------------------------------------------------------
    // Booleans and null
    // --------------------------------------------------------------------

    /// Reads `true` or `false`.
    pub fn read_boolean(&mut self) -> Result<bool, JsonReaderError> {
        let b = self.next_token()?;
        self.parse_boolean(b)
    }

    /// Reads a `"true"` or `"false"` object key followed by a colon.
    pub fn read_key_as_boolean(&mut self) -> Result<bool, JsonReaderError> {
        self.next_token_expect_quote()?;
        let b = self.next_byte()?;
        let x = self.parse_boolean(b)?;
        self.next_byte_expect_quote()?;
        self.read_colon()?;
        Ok(x)
    }

    fn parse_boolean(&mut self, first: u8) -> Result<bool, JsonReaderError> {
        match first {
            b't' => {
                self.expect_bytes(b"rue", ReaderErrorKind::IllegalBoolean)?;
                Ok(true)
            }
            b'f' => {
                self.expect_bytes(b"alse", ReaderErrorKind::IllegalBoolean)?;
                Ok(false)
            }
            _ => Err(self.error_at_prev(ReaderErrorKind::IllegalBoolean)),
        }
    }

    /// Consumes the `ull` of a `null` literal whose `n` was already taken
    /// (usually via `is_next_token(b'n')`) and returns `default`.
    pub fn read_null_or_error<T>(
        &mut self,
        default: T,
        msg: &'static str,
    ) -> Result<T, JsonReaderError> {
        if !self.is_current_token(b'n')? {
            return Err(self.error_at_prev(ReaderErrorKind::Msg(msg.to_string())));
        }
        self.expect_bytes(b"ull", ReaderErrorKind::Msg(msg.to_string()))?;
        Ok(default)
    }

    /// Like [`read_null_or_error`](Self::read_null_or_error) but composes
    /// the message from the expected structural token.
    pub fn read_null_or_token_error<T>(
        &mut self,
        default: T,
        token: u8,
    ) -> Result<T, JsonReaderError> {
        if self.head != 0 && self.bytes()[self.head - 1] == b'n' {
            let msg = format!("expected '{}' or null", token as char);
            self.expect_bytes(b"ull", ReaderErrorKind::Msg(msg))?;
            return Ok(default);
        }
        Err(self.error_at_prev(ReaderErrorKind::Msg(format!(
            "expected '{}' or null",
            token as char
        ))))
    }

    pub(crate) fn expect_bytes(
        &mut self,
        expected: &[u8],
        kind: ReaderErrorKind,
    ) -> Result<(), JsonReaderError> {
        for &e in expected {
            let b = self.next_byte()?;
            if b != e {
                return Err(self.error_at_prev(kind.clone()));
            }
        }
        Ok(())
    }

    // --------------------------------------------------------------------
    // Keys
    // --------------------------------------------------------------------

    /// Reads an object key and its trailing colon, returning the key text.
    pub fn read_key(&mut self) -> Result<String, JsonReaderError> {
        self.next_token_expect_quote()?;
        self.parse_string()?;
        self.read_colon()?;
        Ok(self.char_buf.clone())
    }

    /// Within the current object, reads keys and skips their values until
    /// `key` matches (leaving the reader just past the colon, returning
    /// `true`) or the object's closing brace is consumed (returning
    /// `false`).
    pub fn skip_to_key(&mut self, key: &str) -> Result<bool, JsonReaderError> {
        loop {
            let b = self.next_token()?;
            if b == b'}' {
                return Ok(false);
            }
            if b != b'"' {
                return Err(self.error_at_prev(ReaderErrorKind::UnexpectedToken("'\"' or '}'")));
            }
            self.parse_string()?;
            self.read_colon()?;
            if self.char_buf == key {
                return Ok(true);
            }
            self.skip()?;
            let c = self.next_token()?;
            if c == b'}' {
                return Ok(false);
            }
            if c != b',' {
                return Err(self.error_at_prev(ReaderErrorKind::UnexpectedToken("'}' or ','")));
            }
        }
    }

    pub(crate) fn read_colon(&mut self) -> Result<(), JsonReaderError> {
        if self.next_token()? != b':' {
            return Err(self.error_at_prev(ReaderErrorKind::UnexpectedToken("':'")));
        }
        Ok(())
    }

    pub(crate) fn next_token_expect_quote(&mut self) -> Result<(), JsonReaderError> {
        if self.next_token()? != b'"' {
            return Err(self.error_at_prev(ReaderErrorKind::UnexpectedToken("'\"'")));
        }
        Ok(())
    }

    pub(crate) fn next_byte_expect_quote(&mut self) -> Result<(), JsonReaderError> {
        if self.next_byte()? != b'"' {
            return Err(self.error_at_prev(ReaderErrorKind::UnexpectedToken("'\"'")));
        }
        Ok(())
    }

    // --------------------------------------------------------------------
    // Structural skip and raw values
    // --------------------------------------------------------------------

    /// Skips exactly one JSON value, leaving the head one past its last
    /// byte.
    pub fn skip(&mut self) -> Result<(), JsonReaderError> {
        let b = self.next_token()?;
        match b {
            b'"' => self.skip_string(),
            b'-' | b'0'..=b'9' => self.skip_number(),
            b'n' | b't' => self.skip_fixed_bytes(3),
            b'f' => self.skip_fixed_bytes(4),
            b'{' => self.skip_nested(b'{', b'}'),
            b'[' => self.skip_nested(b'[', b']'),
            _ => Err(self.error_at_prev(ReaderErrorKind::UnexpectedToken("value"))),
        }
    }

    fn skip_string(&mut self) -> Result<(), JsonReaderError> {
        let mut even_back_slashes = true;
        loop {
            let b = self.next_byte()?;
            if even_back_slashes {
                if b == b'"' {
                    return Ok(());
                }
                even_back_slashes = b != b'\\';
            } else {
                even_back_slashes = true;
            }
        }
    }

    fn skip_number(&mut self) -> Result<(), JsonReaderError> {
        let mut pos = self.head;
        loop {
            if pos >= self.tail {
                pos = self.load_more(pos)?;
                if pos >= self.tail {
                    break;
                }
            }
            let b = self.bytes()[pos];
            if matches!(b, b'0'..=b'9' | b'.' | b'e' | b'E' | b'+' | b'-') {
                pos += 1;
            } else {
                break;
            }
        }
        self.head = pos;
        Ok(())
    }

    fn skip_fixed_bytes(&mut self, n: usize) -> Result<(), JsonReaderError> {
        for _ in 0..n {
            self.next_byte()?;
        }
        Ok(())
    }

    fn skip_nested(&mut self, open: u8, close: u8) -> Result<(), JsonReaderError> {
        let mut level = 1usize;
        while level > 0 {
            let b = self.next_byte()?;
            if b == b'"' {
                self.skip_string()?;
            } else if b == close {
                level -= 1;
            } else if b == open {
                level += 1;
            }
        }
        Ok(())
    }

    /// Returns a copy of the raw bytes of the next value without
    /// interpreting it. Leading whitespace is excluded; interior whitespace
    /// is preserved verbatim.
    pub fn read_raw_val_as_bytes(&mut self) -> Result<Vec<u8>, JsonReaderError> {
        // Position at the first non-whitespace byte.
        self.next_token()?;
        self.head -= 1;
        let start = self.head;
        let old_mark = self.mark;
        let anchored = old_mark.unwrap_or(start);
        self.mark = Some(anchored);
        let res = self.skip();
        // Compaction shifts the anchor to zero at most once; the delta maps
        // the starting position into post-refill coordinates.
        let shift = anchored - self.mark.unwrap_or(anchored);
        self.mark = old_mark.map(|m| m - shift);
        res?;
        let from = start - shift;
        Ok(self.bytes()[from..self.head].to_vec())
    }

    // --------------------------------------------------------------------
    // Refill
    // --------------------------------------------------------------------

    /// Pulls more bytes, compacting or growing the ring as needed. Returns
    /// the caller's position translated into post-compaction coordinates;
    /// when the position still equals the tail no more data is available.
    pub(crate) fn load_more(&mut self, pos: usize) -> Result<usize, JsonReaderError> {
        let Source::Stream(_) = self.source else {
            return Ok(pos);
        };
        let offset = self.mark.unwrap_or(pos);
        let ReaderBuf::Owned(buf) = &mut self.buf else {
            return Ok(pos);
        };
        if offset > 0 {
            buf.copy_within(offset..self.tail, 0);
        } else if self.tail == buf.len() {
            let new_len = (buf.len() * 2).min(self.config.max_buf_size);
            if new_len == buf.len() {
                return Err(self.error_at(ReaderErrorKind::TooLongInput, pos));
            }
            buf.resize(new_len, 0);
        }
        let tail = self.tail - offset;
        self.head = pos - offset;
        self.tail = tail;
        self.mark = self.mark.map(|m| m - offset);
        self.total_shift += offset as u64;
        let ReaderBuf::Owned(buf) = &mut self.buf else {
            unreachable!()
        };
        let Source::Stream(src) = &mut self.source else {
            unreachable!()
        };
        let free = buf.len() - tail;
        if free > 0 {
            let n = loop {
                match src.read(&mut buf[tail..]) {
                    Ok(n) => break n,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                    Err(e) => {
                        let err = JsonReaderError {
                            kind: ReaderErrorKind::Io,
                            offset: self.total_shift + pos as u64,
                            msg: format!("i/o error: {e}"),
                            cause: Some(e),
                        };
                        return Err(err);
                    }
                }
            };
            self.tail += n;
        }
        Ok(pos - offset)
    }

    /// Like [`load_more`](Self::load_more) but fails with
    /// `UnexpectedEndOfInput` when no byte becomes available.
    pub(crate) fn load_more_or_error(&mut self, pos: usize) -> Result<usize, JsonReaderError> {
        let new_pos = self.load_more(pos)?;
        if new_pos >= self.tail {
            return Err(self.error_at(ReaderErrorKind::UnexpectedEndOfInput, new_pos));
        }
        Ok(new_pos)
    }

    /// Verifies that only whitespace remains in the input.
    pub(crate) fn check_end_of_input(&mut self) -> Result<(), JsonReaderError> {
        if self.has_remaining()? {
            return Err(self.error_at(ReaderErrorKind::UnexpectedToken("end of input"), self.head));
        }
        Ok(())
    }

    /// Skips whitespace and reports whether a further byte is available,
    /// without consuming it.
    pub(crate) fn has_remaining(&mut self) -> Result<bool, JsonReaderError> {
        let mut pos = self.head;
        loop {
            if pos >= self.tail {
                pos = self.load_more(pos)?;
                if pos >= self.tail {
                    self.head = pos;
                    return Ok(false);
                }
            }
            let b = self.bytes()[pos];
            if matches!(b, b' ' | b'\t' | b'\n' | b'\r') {
                pos += 1;
            } else {
                self.head = pos;
                return Ok(true);
            }
        }
    }

    // --------------------------------------------------------------------
    // Error composition
    // --------------------------------------------------------------------

    /// Composes a decode failure with a caller-supplied message at the
    /// current position. Codec implementations use this for structural
    /// errors of their own.
    #[must_use]
    pub fn decode_error(&self, msg: &str) -> JsonReaderError {
        self.error_at_prev(ReaderErrorKind::Msg(msg.to_string()))
    }

    /// A `RequiredFieldMissing` failure for codecs validating field sets.
    #[must_use]
    pub fn required_field_error(&self, name: &str) -> JsonReaderError {
        self.error_at_prev(ReaderErrorKind::RequiredFieldMissing(name.to_string()))
    }

    /// A `DuplicatedKey` failure for codecs tracking seen keys.
    #[must_use]
    pub fn duplicated_key_error(&self, name: &str) -> JsonReaderError {
        self.error_at_prev(ReaderErrorKind::DuplicatedKey(name.to_string()))
    }

    /// An `UnexpectedKey` failure for codecs rejecting unknown keys.
    #[must_use]
    pub fn unexpected_key_error(&self, name: &str) -> JsonReaderError {
        self.error_at_prev(ReaderErrorKind::UnexpectedKey(name.to_string()))
    }

    /// A `DiscriminatorValueError` failure for sum-type codecs.
    #[must_use]
    pub fn discriminator_value_error(&self, value: &str) -> JsonReaderError {
        self.error_at_prev(ReaderErrorKind::DiscriminatorValueError(value.to_string()))
    }

    pub(crate) fn illegal_state_error(&self, msg: &'static str) -> JsonReaderError {
        JsonReaderError {
            kind: ReaderErrorKind::IllegalState(msg),
            offset: self.total_shift + self.head as u64,
            msg: format!("illegal state: {msg}"),
            cause: None,
        }
    }

    /// Failure at the byte just consumed.
    pub(crate) fn error_at_prev(&self, kind: ReaderErrorKind) -> JsonReaderError {
        self.error_at(kind, self.head.saturating_sub(1))
    }

    pub(crate) fn error_at(&self, kind: ReaderErrorKind, pos: usize) -> JsonReaderError {
        let offset = self.total_shift + pos as u64;
        let mut msg = format!("{kind}, offset: 0x{offset:08x}");
        if self.config.append_hex_dump_to_parse_exception {
            msg.push_str(", buf:\n");
            self.append_hex_dump(&mut msg, pos);
        }
        JsonReaderError {
            kind,
            offset,
            msg,
            cause: None,
        }
    }

    /// Appends a bordered 16-bytes-per-row dump with a printable-ASCII
    /// sidebar, covering `hex_dump_size` rows on each side of `pos`.
    fn append_hex_dump(&self, out: &mut String, pos: usize) {
        const ROW: u64 = 16;
        let abs = self.total_shift + pos as u64;
        let side = self.config.hex_dump_size as u64 * ROW;
        let start = (abs & !(ROW - 1)).saturating_sub(side);
        let end = (abs & !(ROW - 1)) + side + ROW;
        let available_from = self.total_shift;
        let available_to = self.total_shift + self.tail as u64;
        let start = start.max(available_from & !(ROW - 1));
        out.push_str("           +-------------------------------------------------+\n");
        out.push_str("           |  0  1  2  3  4  5  6  7  8  9  a  b  c  d  e  f |\n");
        out.push_str("+----------+-------------------------------------------------+------------------+\n");
        let mut row = start;
        while row < end && row < available_to {
            let _ = write!(out, "| {:08x} |", row);
            let mut ascii = String::with_capacity(16);
            for i in 0..ROW {
                let a = row + i;
                if a >= available_from && a < available_to {
                    let b = self.bytes()[(a - self.total_shift) as usize];
                    let _ = write!(out, " {b:02x}");
                    ascii.push(if (0x20..0x7F).contains(&b) {
                        b as char
                    } else {
                        '.'
                    });
                } else {
                    out.push_str("   ");
                    ascii.push(' ');
                }
            }
            let _ = writeln!(out, " | {ascii} |");
            row += ROW;
        }
        out.push_str("+----------+-------------------------------------------------+------------------+");
    }
}
