//! String, character, binary-blob and UUID emission.
//!
//! The escape scan bulk-copies runs of non-escaped ASCII and handles the
//! rest per code point: the short escapes, `\u00XX` for remaining control
//! bytes, and either raw UTF-8 or `\uXXXX` (surrogate pairs for non-BMP)
//! depending on [`WriterConfig::escape_unicode`].
//!
//! [`WriterConfig::escape_unicode`]: crate::WriterConfig::escape_unicode

use uuid::Uuid;

use crate::error::JsonWriterError;
use crate::reader::{BASE64_ALPHABET, BASE64_URL_ALPHABET};
use crate::writer::JsonWriter;

static HEX_LOWER: &[u8; 16] = b"0123456789abcdef";
static HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

impl JsonWriter<'_> {
    /// Emits a quoted, escaped string value.
    pub fn write_string(&mut self, s: &str) -> Result<(), JsonWriterError> {
        self.write_comma_and_indention()?;
        self.write_escaped_string(s)
    }

    /// Emits a string whose every byte the caller promises to be
    /// non-escaped ASCII; the escape scan is skipped entirely.
    pub fn write_non_escaped_ascii_val(&mut self, s: &str) -> Result<(), JsonWriterError> {
        self.write_comma_and_indention()?;
        self.put(b'"')?;
        self.put_slice(s.as_bytes())?;
        self.put(b'"')
    }

    /// Emits a single scalar value as a one-character string.
    pub fn write_char(&mut self, c: char) -> Result<(), JsonWriterError> {
        self.write_comma_and_indention()?;
        self.put(b'"')?;
        self.put_escaped_char(c)?;
        self.put(b'"')
    }

    /// Emits a one-character object key followed by a colon.
    pub fn write_key_as_char(&mut self, c: char) -> Result<(), JsonWriterError> {
        self.write_comma_and_indention()?;
        self.put(b'"')?;
        self.put_escaped_char(c)?;
        self.put(b'"')?;
        self.write_colon()
    }

    pub(crate) fn write_escaped_string(&mut self, s: &str) -> Result<(), JsonWriterError> {
        self.put(b'"')?;
        let bytes = s.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            let start = i;
            while i < bytes.len() {
                let b = bytes[i];
                if b >= 0x80 || b == b'"' || b == b'\\' || b < 0x20 {
                    break;
                }
                i += 1;
            }
            if i > start {
                self.put_slice(&bytes[start..i])?;
            }
            if i >= bytes.len() {
                break;
            }
            let b = bytes[i];
            if b < 0x80 {
                i += 1;
                self.put_short_escape(b)?;
            } else {
                // A run break is always a character boundary.
                let Some(c) = s[i..].chars().next() else { break };
                i += c.len_utf8();
                self.put_non_ascii(c)?;
            }
        }
        self.put(b'"')
    }

    fn put_escaped_char(&mut self, c: char) -> Result<(), JsonWriterError> {
        if crate::writer::is_non_escaped_ascii(c) {
            self.put(c as u8)
        } else if (c as u32) < 0x80 {
            self.put_short_escape(c as u8)
        } else {
            self.put_non_ascii(c)
        }
    }

    /// The short-escape set, with `\u00XX` for the remaining controls.
    fn put_short_escape(&mut self, b: u8) -> Result<(), JsonWriterError> {
        match b {
            b'"' => self.put_slice(b"\\\""),
            b'\\' => self.put_slice(b"\\\\"),
            0x08 => self.put_slice(b"\\b"),
            0x0C => self.put_slice(b"\\f"),
            b'\n' => self.put_slice(b"\\n"),
            b'\r' => self.put_slice(b"\\r"),
            b'\t' => self.put_slice(b"\\t"),
            _ => self.put_unicode_escape(u32::from(b)),
        }
    }

    fn put_non_ascii(&mut self, c: char) -> Result<(), JsonWriterError> {
        if self.config.escape_unicode {
            let cp = c as u32;
            if cp <= 0xFFFF {
                self.put_unicode_escape(cp)
            } else {
                let u = cp - 0x10000;
                self.put_unicode_escape(0xD800 + (u >> 10))?;
                self.put_unicode_escape(0xDC00 + (u & 0x3FF))
            }
        } else {
            let mut utf8 = [0u8; 4];
            self.put_slice(c.encode_utf8(&mut utf8).as_bytes())
        }
    }

    fn put_unicode_escape(&mut self, unit: u32) -> Result<(), JsonWriterError> {
        self.put_slice(&[
            b'\\',
            b'u',
            HEX_LOWER[(unit >> 12) as usize & 0xF],
            HEX_LOWER[(unit >> 8) as usize & 0xF],
            HEX_LOWER[(unit >> 4) as usize & 0xF],
            HEX_LOWER[unit as usize & 0xF],
        ])
    }

    // --------------------------------------------------------------------
    // Binary blobs
    // --------------------------------------------------------------------

    /// Emits the bytes as a quoted base16 string.
    pub fn write_base16_val(&mut self, bytes: &[u8], lower_case: bool) -> Result<(), JsonWriterError> {
        self.write_comma_and_indention()?;
        let sigils = if lower_case { HEX_LOWER } else { HEX_UPPER };
        self.put(b'"')?;
        for &b in bytes {
            self.put_slice(&[sigils[(b >> 4) as usize], sigils[(b & 0xF) as usize]])?;
        }
        self.put(b'"')
    }

    /// Emits the bytes as a quoted RFC 4648 base64 string.
    pub fn write_base64_val(&mut self, bytes: &[u8], do_padding: bool) -> Result<(), JsonWriterError> {
        self.write_comma_and_indention()?;
        self.put_base64(bytes, BASE64_ALPHABET, do_padding)
    }

    /// Emits the bytes as a quoted RFC 4648 base64url string (`-`/`_`).
    pub fn write_base64_url_val(
        &mut self,
        bytes: &[u8],
        do_padding: bool,
    ) -> Result<(), JsonWriterError> {
        self.write_comma_and_indention()?;
        self.put_base64(bytes, BASE64_URL_ALPHABET, do_padding)
    }

    fn put_base64(
        &mut self,
        bytes: &[u8],
        alphabet: &[u8; 64],
        do_padding: bool,
    ) -> Result<(), JsonWriterError> {
        self.put(b'"')?;
        let mut chunks = bytes.chunks_exact(3);
        for chunk in &mut chunks {
            let acc = (u32::from(chunk[0]) << 16) | (u32::from(chunk[1]) << 8) | u32::from(chunk[2]);
            self.put_slice(&[
                alphabet[(acc >> 18) as usize & 0x3F],
                alphabet[(acc >> 12) as usize & 0x3F],
                alphabet[(acc >> 6) as usize & 0x3F],
                alphabet[acc as usize & 0x3F],
            ])?;
        }
        match chunks.remainder() {
            &[b0] => {
                let acc = u32::from(b0) << 4;
                self.put_slice(&[
                    alphabet[(acc >> 6) as usize & 0x3F],
                    alphabet[acc as usize & 0x3F],
                ])?;
                if do_padding {
                    self.put_slice(b"==")?;
                }
            }
            &[b0, b1] => {
                let acc = (u32::from(b0) << 10) | (u32::from(b1) << 2);
                self.put_slice(&[
                    alphabet[(acc >> 12) as usize & 0x3F],
                    alphabet[(acc >> 6) as usize & 0x3F],
                    alphabet[acc as usize & 0x3F],
                ])?;
                if do_padding {
                    self.put(b'=')?;
                }
            }
            _ => {}
        }
        self.put(b'"')
    }

    // --------------------------------------------------------------------
    // UUID
    // --------------------------------------------------------------------

    /// Emits the UUID in its canonical lowercase 8-4-4-4-12 form.
    pub fn write_uuid(&mut self, x: &Uuid) -> Result<(), JsonWriterError> {
        self.write_comma_and_indention()?;
        self.put_uuid(x)
    }

    /// Emits the UUID as a quoted object key followed by a colon.
    pub fn write_key_as_uuid(&mut self, x: &Uuid) -> Result<(), JsonWriterError> {
        self.write_comma_and_indention()?;
        self.put_uuid(x)?;
        self.write_colon()
    }

    fn put_uuid(&mut self, x: &Uuid) -> Result<(), JsonWriterError> {
        let v = x.as_u128();
        let mut out = [0u8; 38];
        out[0] = b'"';
        out[37] = b'"';
        let mut nibble = 0;
        for (i, slot) in out[1..37].iter_mut().enumerate() {
            if matches!(i, 8 | 13 | 18 | 23) {
                *slot = b'-';
            } else {
                *slot = HEX_LOWER[((v >> (124 - nibble * 4)) & 0xF) as usize];
                nibble += 1;
            }
        }
        self.put_slice(&out)
    }
}
