//! Wire protocol for dungeon-net.
//!
//! This crate defines what the game server and client say to each other
//! about world state:
//!
//! - **Types** ([`MonsterInstance`], [`PositionModel`], [`Direction`], ids):
//!   the domain values events carry.
//! - **Codec** ([`WireField`], [`WirePayload`], [`TokenReader`],
//!   [`TokenWriter`]): the one `::`-delimited text format every event
//!   uses.
//! - **Events** ([`NetworkEvent`], [`NewMonster`], [`EventDraft`], ...):
//!   the closed message family.
//! - **Frames** ([`Frame`]): the type tag in front of a payload.
//! - **Errors** ([`FormatError`], [`PreconditionError`], [`ProtocolError`]).
//!
//! # Architecture
//!
//! ```text
//! Transport (text lines) → Protocol (NetworkEvent) → Dispatcher (game state)
//! ```
//!
//! Everything here is pure: no I/O, no logging, no shared state. Decoding
//! independent payloads on different threads needs no coordination.

mod codec;
mod error;
mod event;
mod frame;
mod types;

pub use codec::{
    DELIMITER, TokenReader, TokenWriter, WireField, WirePayload,
    decode_payload, encode_payload,
};
pub use error::{FormatError, PreconditionError, ProtocolError, TokenError};
pub use event::{
    EventDraft, EventKind, MonsterMoved, NetworkEvent, NewMonster,
    PlayerMoved, WireEvent,
};
pub use frame::Frame;
pub use types::{
    Direction, InstanceId, MonsterInstance, MonsterMovement, PlayerId,
    PlayerMovement, PositionModel, TemplateId,
};
