//! Configuration for readers and writers.
//!
//! Both configs are plain `Copy` structs with documented defaults; the entry
//! points in [`crate::codec`] take them by value. Invalid combinations are
//! rejected by the checked `with_*` builders rather than at use sites.

/// Configuration options for [`JsonReader`](crate::JsonReader).
///
/// # Examples
///
/// ```rust
/// use jsonwire::ReaderConfig;
///
/// let config = ReaderConfig::default()
///     .with_check_for_end_of_input(false)
///     .with_hex_dump_size(4);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ReaderConfig {
    /// Whether the entry point verifies that nothing but whitespace follows
    /// the top-level value.
    ///
    /// # Default
    ///
    /// `true`
    pub check_for_end_of_input: bool,

    /// Byte size the input buffer is trimmed back to between calls when a
    /// previous call grew it.
    ///
    /// # Default
    ///
    /// `16384`
    pub preferred_buf_size: usize,

    /// Byte size the character-output buffer is trimmed back to between
    /// calls when a previous call grew it.
    ///
    /// # Default
    ///
    /// `4096`
    pub preferred_char_buf_size: usize,

    /// Hard ceiling for the input buffer; exceeding it fails with
    /// `TooLongInput`.
    ///
    /// # Default
    ///
    /// `33_554_432`
    pub max_buf_size: usize,

    /// Hard ceiling for the character-output buffer; exceeding it fails with
    /// `TooLongString`.
    ///
    /// # Default
    ///
    /// `4_194_304`
    pub max_char_buf_size: usize,

    /// Whether decode errors carry a bordered 16-bytes-per-line hex dump of
    /// the input around the error offset.
    ///
    /// # Default
    ///
    /// `true`
    pub append_hex_dump_to_parse_exception: bool,

    /// Number of 16-byte hex-dump lines shown on each side of the error
    /// offset.
    ///
    /// # Default
    ///
    /// `2`
    pub hex_dump_size: usize,

    /// Maximum number of decimal digits accepted when parsing an
    /// arbitrary-precision integer.
    ///
    /// # Default
    ///
    /// `308`
    pub big_int_digits_limit: usize,

    /// Maximum number of mantissa digits accepted when parsing an
    /// arbitrary-precision decimal.
    ///
    /// # Default
    ///
    /// `308`
    pub big_decimal_digits_limit: usize,

    /// Maximum scale magnitude accepted when parsing an arbitrary-precision
    /// decimal. Independent of the digit limits, not derived from them.
    ///
    /// # Default
    ///
    /// `6178`
    pub big_decimal_scale_limit: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            check_for_end_of_input: true,
            preferred_buf_size: 16384,
            preferred_char_buf_size: 4096,
            max_buf_size: 33_554_432,
            max_char_buf_size: 4_194_304,
            append_hex_dump_to_parse_exception: true,
            hex_dump_size: 2,
            big_int_digits_limit: 308,
            big_decimal_digits_limit: 308,
            big_decimal_scale_limit: 6178,
        }
    }
}

impl ReaderConfig {
    #[must_use]
    pub fn with_check_for_end_of_input(mut self, check: bool) -> Self {
        self.check_for_end_of_input = check;
        self
    }

    /// # Panics
    ///
    /// Panics when `size` is zero or exceeds `max_buf_size`.
    #[must_use]
    pub fn with_preferred_buf_size(mut self, size: usize) -> Self {
        assert!(
            size > 0 && size <= self.max_buf_size,
            "'preferred_buf_size' must be non-zero and not exceed 'max_buf_size'"
        );
        self.preferred_buf_size = size;
        self
    }

    /// # Panics
    ///
    /// Panics when `size` is zero or exceeds `max_char_buf_size`.
    #[must_use]
    pub fn with_preferred_char_buf_size(mut self, size: usize) -> Self {
        assert!(
            size > 0 && size <= self.max_char_buf_size,
            "'preferred_char_buf_size' must be non-zero and not exceed 'max_char_buf_size'"
        );
        self.preferred_char_buf_size = size;
        self
    }

    /// # Panics
    ///
    /// Panics when `size` is below `preferred_buf_size`.
    #[must_use]
    pub fn with_max_buf_size(mut self, size: usize) -> Self {
        assert!(
            size >= self.preferred_buf_size,
            "'max_buf_size' must not be less than 'preferred_buf_size'"
        );
        self.max_buf_size = size;
        self
    }

    /// # Panics
    ///
    /// Panics when `size` is below `preferred_char_buf_size`.
    #[must_use]
    pub fn with_max_char_buf_size(mut self, size: usize) -> Self {
        assert!(
            size >= self.preferred_char_buf_size,
            "'max_char_buf_size' must not be less than 'preferred_char_buf_size'"
        );
        self.max_char_buf_size = size;
        self
    }

    #[must_use]
    pub fn with_append_hex_dump_to_parse_exception(mut self, append: bool) -> Self {
        self.append_hex_dump_to_parse_exception = append;
        self
    }

    #[must_use]
    pub fn with_hex_dump_size(mut self, lines: usize) -> Self {
        self.hex_dump_size = lines;
        self
    }

    #[must_use]
    pub fn with_big_int_digits_limit(mut self, limit: usize) -> Self {
        self.big_int_digits_limit = limit;
        self
    }

    #[must_use]
    pub fn with_big_decimal_digits_limit(mut self, limit: usize) -> Self {
        self.big_decimal_digits_limit = limit;
        self
    }

    #[must_use]
    pub fn with_big_decimal_scale_limit(mut self, limit: usize) -> Self {
        self.big_decimal_scale_limit = limit;
        self
    }
}

/// Configuration options for [`JsonWriter`](crate::JsonWriter).
///
/// # Examples
///
/// ```rust
/// use jsonwire::WriterConfig;
///
/// let pretty = WriterConfig::default().with_indention_step(2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct WriterConfig {
    /// Number of spaces per nesting level; `0` emits compact output.
    ///
    /// # Default
    ///
    /// `0`
    pub indention_step: usize,

    /// When `true`, every code point at or above 128 is emitted as one or
    /// two `\uXXXX` escapes.
    ///
    /// # Default
    ///
    /// `false`
    pub escape_unicode: bool,

    /// Byte size the output buffer is trimmed back to between calls when a
    /// previous call grew it.
    ///
    /// # Default
    ///
    /// `16384`
    pub preferred_buf_size: usize,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            indention_step: 0,
            escape_unicode: false,
            preferred_buf_size: 16384,
        }
    }
}

impl WriterConfig {
    #[must_use]
    pub fn with_indention_step(mut self, step: usize) -> Self {
        self.indention_step = step;
        self
    }

    #[must_use]
    pub fn with_escape_unicode(mut self, escape: bool) -> Self {
        self.escape_unicode = escape;
        self
    }

    /// # Panics
    ///
    /// Panics when `size` is zero.
    #[must_use]
    pub fn with_preferred_buf_size(mut self, size: usize) -> Self {
        assert!(size > 0, "'preferred_buf_size' must be non-zero");
        self.preferred_buf_size = size;
        self
    }
}
