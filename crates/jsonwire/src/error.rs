//! Error types for the reader and writer.
//!
//! Every decode failure is a [`JsonReaderError`]: a taxonomy kind plus the
//! absolute byte offset where the failure was detected, pre-composed into a
//! message that optionally carries a hex dump of the surrounding input (see
//! [`ReaderConfig::append_hex_dump_to_parse_exception`]).
//!
//! [`ReaderConfig::append_hex_dump_to_parse_exception`]:
//! crate::ReaderConfig::append_hex_dump_to_parse_exception

use thiserror::Error;

/// The distinguishable kinds of decode failure.
///
/// The kind is what tests and callers should match on; the composed
/// [`JsonReaderError`] message is for humans.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ReaderErrorKind {
    /// Structural mismatch, e.g. `expected ','` or `expected '}' or ','`.
    #[error("expected {0}")]
    UnexpectedToken(&'static str),
    #[error("illegal number")]
    IllegalNumber,
    #[error("illegal number with leading zero")]
    LeadingZero,
    /// Integer literal does not fit the requested type; the payload names
    /// the type (`"i8"`, `"u64"`, ...).
    #[error("value is too large for {0}")]
    IntOverflow(&'static str),
    #[error("value exceeds limit for number of digits")]
    DigitsLimit,
    #[error("value exceeds limit for scale")]
    ScaleLimit,
    #[error("illegal boolean")]
    IllegalBoolean,
    #[error("illegal escape sequence")]
    IllegalEscape,
    #[error("expected hex digit")]
    HexDigit,
    #[error("illegal surrogate character pair")]
    IllegalSurrogatePair,
    #[error("unescaped control character")]
    UnescapedControl,
    /// Malformed UTF-8; the payload lists the offending bytes in hex.
    #[error("malformed byte(s): {0}")]
    MalformedBytes(String),
    #[error("illegal character")]
    IllegalChar,
    #[error("expected base16 digit")]
    Base16Digit,
    #[error("expected base64 digit")]
    Base64Digit,
    #[error("illegal duration")]
    IllegalDuration,
    #[error("illegal period")]
    IllegalPeriod,
    #[error("illegal year")]
    IllegalYear,
    #[error("illegal month")]
    IllegalMonth,
    #[error("illegal day")]
    IllegalDay,
    #[error("illegal hour")]
    IllegalHour,
    #[error("illegal minute")]
    IllegalMinute,
    #[error("illegal second")]
    IllegalSecond,
    #[error("illegal nanosecond")]
    IllegalNanosecond,
    #[error("illegal date")]
    IllegalDate,
    #[error("illegal timezone")]
    IllegalTimezone,
    #[error("illegal timezone offset")]
    IllegalTimezoneOffset,
    #[error("illegal timezone offset hour")]
    IllegalTimezoneOffsetHour,
    #[error("illegal timezone offset minute")]
    IllegalTimezoneOffsetMinute,
    #[error("illegal timezone offset second")]
    IllegalTimezoneOffsetSecond,
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("too long part of input exceeded 'max_buf_size'")]
    TooLongInput,
    #[error("too long string exceeded 'max_char_buf_size'")]
    TooLongString,
    #[error("missing required field \"{0}\"")]
    RequiredFieldMissing(String),
    #[error("duplicated field \"{0}\"")]
    DuplicatedKey(String),
    #[error("unexpected field \"{0}\"")]
    UnexpectedKey(String),
    #[error("illegal value of discriminator field \"{0}\"")]
    DiscriminatorValueError(String),
    /// API misuse (mark/token operations out of order). Travels the same
    /// `Result` channel but is not a decode failure.
    #[error("illegal state: {0}")]
    IllegalState(&'static str),
    /// Free-form message raised through [`JsonReader::decode_error`].
    ///
    /// [`JsonReader::decode_error`]: crate::JsonReader::decode_error
    #[error("{0}")]
    Msg(String),
    #[error("i/o error")]
    Io,
}

/// A decode failure with its absolute input offset and composed message.
#[derive(Error, Debug)]
#[error("{msg}")]
pub struct JsonReaderError {
    pub(crate) kind: ReaderErrorKind,
    pub(crate) offset: u64,
    pub(crate) msg: String,
    #[source]
    pub(crate) cause: Option<std::io::Error>,
}

impl JsonReaderError {
    /// The taxonomy kind of this failure.
    #[must_use]
    pub fn kind(&self) -> &ReaderErrorKind {
        &self.kind
    }

    /// Absolute offset of the failure in the input, counted from the first
    /// byte handed to the entry point.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset
    }
}

/// An encode failure.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum JsonWriterError {
    /// A non-finite float was passed to a numeric emitter.
    #[error("illegal number: {0}")]
    IllegalNumber(String),
    /// `write_timestamp` was given nanoseconds outside `[0, 1_000_000_000)`.
    #[error("illegal nanoseconds value: {0}")]
    IllegalNanoseconds(i64),
    /// The fixed output subrange cannot hold the encoded value.
    #[error("too long output exceeded the target capacity")]
    TooLongOutput,
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_messages() {
        assert_eq!(
            ReaderErrorKind::UnexpectedToken("','").to_string(),
            "expected ','"
        );
        assert_eq!(
            ReaderErrorKind::IntOverflow("i64").to_string(),
            "value is too large for i64"
        );
        assert_eq!(
            ReaderErrorKind::DuplicatedKey("id".into()).to_string(),
            "duplicated field \"id\""
        );
    }

    #[test]
    fn writer_error_messages() {
        assert_eq!(
            JsonWriterError::IllegalNumber("NaN".into()).to_string(),
            "illegal number: NaN"
        );
        assert_eq!(
            JsonWriterError::IllegalNanoseconds(-1).to_string(),
            "illegal nanoseconds value: -1"
        );
    }
}
