//! Error types for the protocol layer.
//!
//! Each crate in dungeon-net defines its own error enum. A `ProtocolError`
//! always means the problem is in a payload or frame, never in the
//! connection underneath it.
//!
//! Nothing in this crate logs or recovers from these errors. They are
//! scoped to a single message and handed back to whoever owns the
//! connection, which decides whether to drop the message or the peer.

use std::num::ParseIntError;

use crate::EventKind;

/// Why a single token could not be turned into a field value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// Not a base-10 32-bit signed integer: non-digit characters, an
    /// empty token, or a value that overflows `i32`.
    #[error("not a 32-bit integer: {0}")]
    NotAnInteger(#[source] ParseIntError),

    /// A valid integer that the field does not accept, e.g. a direction
    /// ordinal with no matching member or a negative id.
    #[error("value {0} is out of range")]
    OutOfRange(i32),
}

/// A raw payload string that does not match its event's wire layout.
///
/// Decoding is all-or-nothing: when this is returned, no partially
/// filled model exists.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// The payload split into the wrong number of tokens.
    #[error("expected {expected} tokens, found {found}")]
    Arity { expected: usize, found: usize },

    /// One token failed to decode. `index` is zero-based, `field` names
    /// the model field the token was meant for.
    #[error("token {index} ({field}) {token:?}: {source}")]
    Token {
        index: usize,
        field: &'static str,
        token: String,
        #[source]
        source: TokenError,
    },
}

impl FormatError {
    /// Index of the offending token, if the error is about one token.
    pub fn token_index(&self) -> Option<usize> {
        match self {
            FormatError::Arity { .. } => None,
            FormatError::Token { index, .. } => Some(*index),
        }
    }
}

/// An operation was attempted on an event that is not ready for it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreconditionError {
    /// Encoding was requested for a draft that never got a payload.
    #[error("cannot encode {0} event: no payload assigned")]
    Unpopulated(EventKind),
}

/// Errors that can occur in the protocol layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    /// The payload for a known event kind was malformed.
    #[error("malformed {kind} payload: {source}")]
    Format {
        kind: EventKind,
        #[source]
        source: FormatError,
    },

    /// Encoding an event that has no payload.
    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    /// The type tag does not name any event in the family.
    #[error("unknown event type: {0:?}")]
    UnknownEvent(String),

    /// A transport line is not a `<tag>::<payload>` frame.
    #[error("invalid frame: {0}")]
    InvalidFrame(String),
}

impl ProtocolError {
    /// Returns the underlying format error, if this is one.
    pub fn as_format(&self) -> Option<&FormatError> {
        match self {
            ProtocolError::Format { source, .. } => Some(source),
            _ => None,
        }
    }
}
