//! Frames: a type tag in front of a payload.
//!
//! The payload format says nothing about which event it belongs to, so a
//! transport line carries the tag first:
//!
//! ```text
//! NewMonster::3::17::5::-2::0
//! └──tag───┘  └──payload───┘
//! ```
//!
//! Tags never contain the delimiter, so the first one always ends the tag.

use std::fmt;

use crate::codec::DELIMITER;
use crate::error::ProtocolError;

/// A borrowed view of one transport line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    pub tag: &'a str,
    pub payload: &'a str,
}

impl<'a> Frame<'a> {
    pub fn new(tag: &'a str, payload: &'a str) -> Self {
        Self { tag, payload }
    }

    /// Splits a line into tag and payload. The payload itself is not
    /// validated here.
    ///
    /// # Errors
    /// [`ProtocolError::InvalidFrame`] if there is no delimiter or the tag
    /// is empty.
    pub fn parse(line: &'a str) -> Result<Self, ProtocolError> {
        let (tag, payload) = line.split_once(DELIMITER).ok_or_else(|| {
            ProtocolError::InvalidFrame("missing tag delimiter".into())
        })?;
        if tag.is_empty() {
            return Err(ProtocolError::InvalidFrame("empty tag".into()));
        }
        Ok(Self { tag, payload })
    }
}

impl fmt::Display for Frame<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{DELIMITER}{}", self.tag, self.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splits_on_first_delimiter() {
        let frame = Frame::parse("NewMonster::3::17::5::-2::0").unwrap();
        assert_eq!(frame.tag, "NewMonster");
        assert_eq!(frame.payload, "3::17::5::-2::0");
    }

    #[test]
    fn test_parse_allows_empty_payload() {
        let frame = Frame::parse("NewMonster::").unwrap();
        assert_eq!(frame.payload, "");
    }

    #[test]
    fn test_parse_rejects_missing_delimiter() {
        let err = Frame::parse("NewMonster").unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidFrame(_)));
    }

    #[test]
    fn test_parse_rejects_empty_tag() {
        let err = Frame::parse("::3::17").unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidFrame(_)));
    }

    #[test]
    fn test_display_round_trips() {
        let line = "PlayerMoved::4::10::11::3";
        assert_eq!(Frame::parse(line).unwrap().to_string(), line);
    }
}
