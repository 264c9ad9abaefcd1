//! The network event family.
//!
//! Every message the server sends about world state is one of the
//! variants of [`NetworkEvent`]. Each variant wraps a concrete event type
//! (e.g. [`NewMonster`]) which owns exactly one domain model and gets its
//! encode/decode pair from [`WireEvent`].
//!
//! Adding an event means: a model in [`types`](crate::types), a
//! [`WirePayload`] impl listing its fields, a struct implementing
//! [`WireEvent`], and a new [`EventKind`]/[`NetworkEvent`] variant.
//!
//! A concrete event always holds its model. The "not filled in yet" state
//! lives in [`EventDraft`], which can't be encoded without going through a
//! check, so an empty event can never silently turn into an empty string.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::codec::{
    TokenReader, TokenWriter, WirePayload, decode_payload, encode_payload,
};
use crate::error::{FormatError, PreconditionError, ProtocolError};
use crate::frame::Frame;
use crate::types::{
    MonsterInstance, MonsterMovement, PlayerMovement, PositionModel,
};

// ---------------------------------------------------------------------------
// EventKind: the type tag
// ---------------------------------------------------------------------------

/// Identifies which event a raw payload belongs to.
///
/// The text tag ([`EventKind::tag`]) is what travels in a frame. Tags
/// never contain the field delimiter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub enum EventKind {
    /// A monster appeared in the player's view.
    NewMonster,
    /// A visible monster moved or turned.
    MonsterMoved,
    /// Another player moved or turned.
    PlayerMoved,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [
        EventKind::NewMonster,
        EventKind::MonsterMoved,
        EventKind::PlayerMoved,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            EventKind::NewMonster => "NewMonster",
            EventKind::MonsterMoved => "MonsterMoved",
            EventKind::PlayerMoved => "PlayerMoved",
        }
    }

    /// Number of payload tokens this kind expects.
    pub fn arity(self) -> usize {
        match self {
            EventKind::NewMonster => MonsterInstance::ARITY,
            EventKind::MonsterMoved => MonsterMovement::ARITY,
            EventKind::PlayerMoved => PlayerMovement::ARITY,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for EventKind {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag() == s)
            .ok_or_else(|| ProtocolError::UnknownEvent(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Wire layouts
// ---------------------------------------------------------------------------

/// `X::Y::DirectionOrdinal`, embedded in every movement-bearing payload.
impl WirePayload for PositionModel {
    const ARITY: usize = 3;

    fn write_fields(&self, writer: &mut TokenWriter) {
        writer.write(&self.x).write(&self.y).write(&self.direction);
    }

    fn read_fields(reader: &mut TokenReader<'_>) -> Result<Self, FormatError> {
        Ok(PositionModel {
            x: reader.read("x")?,
            y: reader.read("y")?,
            direction: reader.read("direction")?,
        })
    }
}

/// `TemplateId::InstanceId::X::Y::DirectionOrdinal`
impl WirePayload for MonsterInstance {
    const ARITY: usize = 2 + PositionModel::ARITY;

    fn write_fields(&self, writer: &mut TokenWriter) {
        writer.write(&self.template_id).write(&self.instance_id);
        self.position.write_fields(writer);
    }

    fn read_fields(reader: &mut TokenReader<'_>) -> Result<Self, FormatError> {
        Ok(MonsterInstance {
            template_id: reader.read("template_id")?,
            instance_id: reader.read("instance_id")?,
            position: PositionModel::read_fields(reader)?,
        })
    }
}

/// `InstanceId::X::Y::DirectionOrdinal`
impl WirePayload for MonsterMovement {
    const ARITY: usize = 1 + PositionModel::ARITY;

    fn write_fields(&self, writer: &mut TokenWriter) {
        writer.write(&self.instance_id);
        self.position.write_fields(writer);
    }

    fn read_fields(reader: &mut TokenReader<'_>) -> Result<Self, FormatError> {
        Ok(MonsterMovement {
            instance_id: reader.read("instance_id")?,
            position: PositionModel::read_fields(reader)?,
        })
    }
}

/// `PlayerId::X::Y::DirectionOrdinal`
impl WirePayload for PlayerMovement {
    const ARITY: usize = 1 + PositionModel::ARITY;

    fn write_fields(&self, writer: &mut TokenWriter) {
        writer.write(&self.player_id);
        self.position.write_fields(writer);
    }

    fn read_fields(reader: &mut TokenReader<'_>) -> Result<Self, FormatError> {
        Ok(PlayerMovement {
            player_id: reader.read("player_id")?,
            position: PositionModel::read_fields(reader)?,
        })
    }
}

// ---------------------------------------------------------------------------
// WireEvent: one concrete event type
// ---------------------------------------------------------------------------

/// A concrete event carrying one model.
///
/// `encode` and `decode` come for free from the model's [`WirePayload`]
/// layout; implementors only say which kind they are and how to wrap and
/// unwrap the model.
pub trait WireEvent: Sized {
    const KIND: EventKind;

    type Model: WirePayload + Clone + PartialEq + fmt::Debug;

    fn from_model(model: Self::Model) -> Self;

    fn model(&self) -> &Self::Model;

    fn into_model(self) -> Self::Model;

    /// Canonical wire string for this event's model.
    fn encode(&self) -> String {
        encode_payload(self.model())
    }

    /// Builds the event from a raw payload.
    ///
    /// # Errors
    /// Returns a [`FormatError`] naming the failing token if the payload
    /// has the wrong arity or any token doesn't decode.
    fn decode(raw: &str) -> Result<Self, FormatError> {
        decode_payload(raw).map(Self::from_model)
    }
}

/// "A monster appeared": sent when a monster spawns or first comes into
/// view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NewMonster {
    model: MonsterInstance,
}

impl WireEvent for NewMonster {
    const KIND: EventKind = EventKind::NewMonster;
    type Model = MonsterInstance;

    fn from_model(model: MonsterInstance) -> Self {
        Self { model }
    }

    fn model(&self) -> &MonsterInstance {
        &self.model
    }

    fn into_model(self) -> MonsterInstance {
        self.model
    }
}

/// A visible monster moved or turned.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MonsterMoved {
    model: MonsterMovement,
}

impl WireEvent for MonsterMoved {
    const KIND: EventKind = EventKind::MonsterMoved;
    type Model = MonsterMovement;

    fn from_model(model: MonsterMovement) -> Self {
        Self { model }
    }

    fn model(&self) -> &MonsterMovement {
        &self.model
    }

    fn into_model(self) -> MonsterMovement {
        self.model
    }
}

/// Another player moved or turned.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerMoved {
    model: PlayerMovement,
}

impl WireEvent for PlayerMoved {
    const KIND: EventKind = EventKind::PlayerMoved;
    type Model = PlayerMovement;

    fn from_model(model: PlayerMovement) -> Self {
        Self { model }
    }

    fn model(&self) -> &PlayerMovement {
        &self.model
    }

    fn into_model(self) -> PlayerMovement {
        self.model
    }
}

// ---------------------------------------------------------------------------
// EventDraft: the unpopulated state
// ---------------------------------------------------------------------------

/// An event that may not have its model yet.
///
/// Game logic creates an empty draft, fills it in once the state is known,
/// then turns it into a concrete event. Once populated a draft stays
/// populated; [`populate`](Self::populate) only replaces the model.
///
/// ```rust
/// use dungeon_net_protocol::{
///     Direction, EventDraft, InstanceId, MonsterInstance, NewMonster,
///     PositionModel, TemplateId, WireEvent,
/// };
///
/// let mut draft = EventDraft::<NewMonster>::new();
/// assert!(draft.try_encode().is_err());
///
/// draft.populate(MonsterInstance {
///     template_id: TemplateId::from(1),
///     instance_id: InstanceId::from(2),
///     position: PositionModel::new(0, 0, Direction::South),
/// });
/// let event = draft.try_into_event().unwrap();
/// assert_eq!(event.encode(), "1::2::0::0::2");
/// ```
pub struct EventDraft<E: WireEvent> {
    model: Option<E::Model>,
}

impl<E: WireEvent> EventDraft<E> {
    /// An unpopulated draft.
    pub fn new() -> Self {
        Self { model: None }
    }

    pub fn is_populated(&self) -> bool {
        self.model.is_some()
    }

    pub fn model(&self) -> Option<&E::Model> {
        self.model.as_ref()
    }

    /// Assigns (or replaces) the model.
    pub fn populate(&mut self, model: E::Model) {
        self.model = Some(model);
    }

    /// Encodes the draft if it has a model.
    ///
    /// # Errors
    /// [`PreconditionError::Unpopulated`] if no model was assigned.
    pub fn try_encode(&self) -> Result<String, PreconditionError> {
        self.model
            .as_ref()
            .map(encode_payload)
            .ok_or(PreconditionError::Unpopulated(E::KIND))
    }

    /// Converts into the concrete event.
    ///
    /// # Errors
    /// [`PreconditionError::Unpopulated`] if no model was assigned.
    pub fn try_into_event(self) -> Result<E, PreconditionError> {
        self.model
            .map(E::from_model)
            .ok_or(PreconditionError::Unpopulated(E::KIND))
    }
}

impl<E: WireEvent> Default for EventDraft<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: WireEvent> Clone for EventDraft<E> {
    fn clone(&self) -> Self {
        Self {
            model: self.model.clone(),
        }
    }
}

impl<E: WireEvent> fmt::Debug for EventDraft<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDraft")
            .field("kind", &E::KIND)
            .field("model", &self.model)
            .finish()
    }
}

impl<E: WireEvent> From<E> for EventDraft<E> {
    fn from(event: E) -> Self {
        Self {
            model: Some(event.into_model()),
        }
    }
}

// ---------------------------------------------------------------------------
// NetworkEvent: the closed family
// ---------------------------------------------------------------------------

/// Any event the protocol knows about.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NetworkEvent {
    NewMonster(NewMonster),
    MonsterMoved(MonsterMoved),
    PlayerMoved(PlayerMoved),
}

impl NetworkEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            NetworkEvent::NewMonster(_) => EventKind::NewMonster,
            NetworkEvent::MonsterMoved(_) => EventKind::MonsterMoved,
            NetworkEvent::PlayerMoved(_) => EventKind::PlayerMoved,
        }
    }

    /// Payload string, without the type tag.
    pub fn encode(&self) -> String {
        match self {
            NetworkEvent::NewMonster(e) => e.encode(),
            NetworkEvent::MonsterMoved(e) => e.encode(),
            NetworkEvent::PlayerMoved(e) => e.encode(),
        }
    }

    /// The single decode entry point: routes `raw` to the decoder for
    /// `kind`.
    ///
    /// # Errors
    /// [`ProtocolError::Format`] if the payload doesn't match the layout
    /// for `kind`.
    pub fn decode(kind: EventKind, raw: &str) -> Result<Self, ProtocolError> {
        let decoded = match kind {
            EventKind::NewMonster => NewMonster::decode(raw).map(Self::NewMonster),
            EventKind::MonsterMoved => {
                MonsterMoved::decode(raw).map(Self::MonsterMoved)
            }
            EventKind::PlayerMoved => PlayerMoved::decode(raw).map(Self::PlayerMoved),
        };
        decoded.map_err(|source| ProtocolError::Format { kind, source })
    }

    /// Like [`decode`](Self::decode) but resolves the kind from its text tag.
    pub fn decode_tagged(tag: &str, raw: &str) -> Result<Self, ProtocolError> {
        Self::decode(tag.parse()?, raw)
    }

    /// `<tag>::<payload>`, ready for a transport.
    pub fn encode_frame(&self) -> String {
        Frame::new(self.kind().tag(), &self.encode()).to_string()
    }

    /// Parses and decodes a full frame line.
    pub fn decode_frame(line: &str) -> Result<Self, ProtocolError> {
        let frame = Frame::parse(line)?;
        Self::decode_tagged(frame.tag, frame.payload)
    }
}

impl From<NewMonster> for NetworkEvent {
    fn from(event: NewMonster) -> Self {
        NetworkEvent::NewMonster(event)
    }
}

impl From<MonsterMoved> for NetworkEvent {
    fn from(event: MonsterMoved) -> Self {
        NetworkEvent::MonsterMoved(event)
    }
}

impl From<PlayerMoved> for NetworkEvent {
    fn from(event: PlayerMoved) -> Self {
        NetworkEvent::PlayerMoved(event)
    }
}

// =========================================================================
// Tests
// =========================================================================
