//! The shared wire codec every network event uses.
//!
//! A payload is a flat list of fields, each written as canonical decimal
//! text and joined with [`DELIMITER`]:
//!
//! ```text
//! 3::17::5::-2::0
//! ```
//!
//! Event types never split strings or parse numbers themselves. They
//! describe their field order through [`WirePayload`], and the
//! [`TokenWriter`]/[`TokenReader`] pair does the rest, so delimiter
//! handling and error reporting are identical across the whole family.
//!
//! Decoding is strict. The token count is checked before any field is
//! parsed, every token must be a base-10 `i32` (optional leading sign,
//! no whitespace), and a value the field rejects is an error rather than
//! something to clamp.

use crate::error::{FormatError, TokenError};
use crate::types::{Direction, InstanceId, PlayerId, TemplateId};

/// Separator between fields. No canonical field text contains it.
pub const DELIMITER: &str = "::";

// ---------------------------------------------------------------------------
// WireField: one token
// ---------------------------------------------------------------------------

/// A value that occupies exactly one token on the wire.
pub trait WireField: Sized {
    /// Canonical text for this value.
    fn to_token(&self) -> String;

    /// Parses a single token. The reader adds index and field name to any
    /// error returned here.
    fn from_token(token: &str) -> Result<Self, TokenError>;
}

impl WireField for i32 {
    fn to_token(&self) -> String {
        self.to_string()
    }

    fn from_token(token: &str) -> Result<Self, TokenError> {
        token.parse::<i32>().map_err(TokenError::NotAnInteger)
    }
}

/// Directions travel as their ordinal.
impl WireField for Direction {
    fn to_token(&self) -> String {
        self.ordinal().to_token()
    }

    fn from_token(token: &str) -> Result<Self, TokenError> {
        let ordinal = i32::from_token(token)?;
        Direction::from_ordinal(ordinal).ok_or(TokenError::OutOfRange(ordinal))
    }
}

/// Ids are `i32` on the wire. Their constructors reject negatives, so
/// encode and decode enforce the same range.
impl WireField for TemplateId {
    fn to_token(&self) -> String {
        self.get().to_token()
    }

    fn from_token(token: &str) -> Result<Self, TokenError> {
        i32::from_token(token).and_then(TemplateId::new)
    }
}

impl WireField for InstanceId {
    fn to_token(&self) -> String {
        self.get().to_token()
    }

    fn from_token(token: &str) -> Result<Self, TokenError> {
        i32::from_token(token).and_then(InstanceId::new)
    }
}

impl WireField for PlayerId {
    fn to_token(&self) -> String {
        self.get().to_token()
    }

    fn from_token(token: &str) -> Result<Self, TokenError> {
        i32::from_token(token).and_then(PlayerId::new)
    }
}

// ---------------------------------------------------------------------------
// Writer / Reader
// ---------------------------------------------------------------------------

/// Builds a payload string field by field.
#[derive(Debug, Default)]
pub struct TokenWriter {
    tokens: Vec<String>,
}

impl TokenWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the next field. Order of calls is the wire order.
    pub fn write<T: WireField>(&mut self, value: &T) -> &mut Self {
        self.tokens.push(value.to_token());
        self
    }

    /// Number of fields written so far.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Joins the fields with [`DELIMITER`].
    pub fn finish(self) -> String {
        self.tokens.join(DELIMITER)
    }
}

/// Consumes a payload string field by field, in wire order.
///
/// Construction already validates the token count, so a reader that
/// exists is known to hold exactly `expected` tokens.
#[derive(Debug)]
pub struct TokenReader<'a> {
    tokens: Vec<&'a str>,
    next: usize,
}

impl<'a> TokenReader<'a> {
    /// Splits `raw` on [`DELIMITER`] and checks the arity.
    ///
    /// # Errors
    /// Returns [`FormatError::Arity`] when the split does not produce
    /// exactly `expected` tokens.
    pub fn new(raw: &'a str, expected: usize) -> Result<Self, FormatError> {
        let tokens: Vec<&str> = raw.split(DELIMITER).collect();
        if tokens.len() != expected {
            return Err(FormatError::Arity {
                expected,
                found: tokens.len(),
            });
        }
        Ok(Self { tokens, next: 0 })
    }

    /// Decodes the next token as `T`.
    ///
    /// `field` is only used to label errors.
    pub fn read<T: WireField>(
        &mut self,
        field: &'static str,
    ) -> Result<T, FormatError> {
        let index = self.next;
        let token = self.tokens.get(index).copied().ok_or(FormatError::Arity {
            expected: index + 1,
            found: self.tokens.len(),
        })?;
        self.next += 1;

        T::from_token(token).map_err(|source| FormatError::Token {
            index,
            field,
            token: token.to_string(),
            source,
        })
    }

    /// Tokens not yet consumed.
    pub fn remaining(&self) -> usize {
        self.tokens.len() - self.next
    }
}

// ---------------------------------------------------------------------------
// WirePayload: a whole model
// ---------------------------------------------------------------------------

/// A model with a fixed positional wire layout.
///
/// Implementations list their fields once for writing and once for
/// reading, in the same order. [`encode_payload`] and [`decode_payload`]
/// handle everything else.
pub trait WirePayload: Sized {
    /// Number of tokens in the encoded form.
    const ARITY: usize;

    fn write_fields(&self, writer: &mut TokenWriter);

    fn read_fields(reader: &mut TokenReader<'_>) -> Result<Self, FormatError>;
}

/// Encodes a model into its canonical wire string.
pub fn encode_payload<P: WirePayload>(payload: &P) -> String {
    let mut writer = TokenWriter::new();
    payload.write_fields(&mut writer);
    debug_assert_eq!(writer.len(), P::ARITY, "payload wrote wrong field count");
    writer.finish()
}

/// Decodes a wire string into a model. Nothing is returned unless every
/// token decoded.
pub fn decode_payload<P: WirePayload>(raw: &str) -> Result<P, FormatError> {
    let mut reader = TokenReader::new(raw, P::ARITY)?;
    let payload = P::read_fields(&mut reader)?;
    debug_assert_eq!(reader.remaining(), 0, "payload left tokens unread");
    Ok(payload)
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::IntErrorKind;

    fn token_source(err: FormatError) -> TokenError {
        match err {
            FormatError::Token { source, .. } => source,
            other => panic!("expected token error, got {other:?}"),
        }
    }

    #[test]
    fn test_writer_joins_with_delimiter() {
        let mut w = TokenWriter::new();
        w.write(&1).write(&-2).write(&Direction::South);
        assert_eq!(w.finish(), "1::-2::2");
    }

    #[test]
    fn test_empty_writer_produces_empty_string() {
        let w = TokenWriter::new();
        assert!(w.is_empty());
        assert_eq!(w.finish(), "");
    }

    #[test]
    fn test_reader_rejects_wrong_arity() {
        let err = TokenReader::new("1::2::3", 2).unwrap_err();
        assert_eq!(
            err,
            FormatError::Arity {
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn test_empty_string_is_one_token() {
        // "" splits into one empty token, which then fails to parse.
        assert!(TokenReader::new("", 2).is_err());
        let mut r = TokenReader::new("", 1).unwrap();
        let err = r.read::<i32>("x").unwrap_err();
        assert!(matches!(token_source(err), TokenError::NotAnInteger(_)));
    }

    #[test]
    fn test_reader_reads_in_order() {
        let mut r = TokenReader::new("7::-8::3", 3).unwrap();
        assert_eq!(r.read::<i32>("a").unwrap(), 7);
        assert_eq!(r.read::<i32>("b").unwrap(), -8);
        assert_eq!(r.read::<Direction>("c").unwrap(), Direction::West);
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn test_reader_past_end_is_error_not_panic() {
        let mut r = TokenReader::new("1", 1).unwrap();
        r.read::<i32>("a").unwrap();
        assert!(r.read::<i32>("b").is_err());
    }

    #[test]
    fn test_token_error_carries_index_and_field() {
        let mut r = TokenReader::new("1::x", 2).unwrap();
        r.read::<i32>("first").unwrap();
        let err = r.read::<i32>("second").unwrap_err();
        match err {
            FormatError::Token {
                index,
                field,
                token,
                ..
            } => {
                assert_eq!(index, 1);
                assert_eq!(field, "second");
                assert_eq!(token, "x");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_i32_overflow_is_rejected() {
        let err = i32::from_token("2147483648").unwrap_err();
        match err {
            TokenError::NotAnInteger(e) => {
                assert_eq!(e.kind(), &IntErrorKind::PosOverflow)
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(i32::from_token("-2147483649").is_err());
    }

    #[test]
    fn test_i32_bounds_accepted() {
        assert_eq!(i32::from_token("2147483647"), Ok(i32::MAX));
        assert_eq!(i32::from_token("-2147483648"), Ok(i32::MIN));
    }

    #[test]
    fn test_i32_sign_handling() {
        assert_eq!(i32::from_token("+5"), Ok(5));
        assert_eq!(i32::from_token("-5"), Ok(-5));
        assert!(i32::from_token("--5").is_err());
        assert!(i32::from_token("-").is_err());
    }

    #[test]
    fn test_i32_rejects_non_digits_and_whitespace() {
        assert!(i32::from_token("abc").is_err());
        assert!(i32::from_token("1.5").is_err());
        assert!(i32::from_token(" 1").is_err());
        assert!(i32::from_token("1 ").is_err());
        assert!(i32::from_token("0x10").is_err());
    }

    #[test]
    fn test_direction_ordinal_out_of_range() {
        assert_eq!(Direction::from_token("9"), Err(TokenError::OutOfRange(9)));
        assert_eq!(Direction::from_token("-1"), Err(TokenError::OutOfRange(-1)));
        assert_eq!(Direction::from_token("2"), Ok(Direction::South));
    }

    #[test]
    fn test_ids_reject_negative_values() {
        assert_eq!(TemplateId::from_token("-1"), Err(TokenError::OutOfRange(-1)));
        assert_eq!(InstanceId::from_token("-3"), Err(TokenError::OutOfRange(-3)));
        assert_eq!(PlayerId::from_token("0"), Ok(PlayerId::from(0)));
    }
}
