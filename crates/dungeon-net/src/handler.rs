//! The `EventHandler` trait and the dispatcher that feeds it.
//!
//! `EventHandler` is the extension point for the game-state store: it gets
//! one callback per event kind, each with the decoded model by value. The
//! [`Dispatcher`] turns a type tag plus raw payload into the right call.

use dungeon_net_protocol::{
    EventKind, Frame, MonsterInstance, MonsterMovement, NetworkEvent,
    PlayerMovement, ProtocolError, WireEvent,
};

/// Receives decoded events.
///
/// Only `on_new_monster` is required; movement callbacks default to
/// no-ops so a store can start with the events it cares about.
pub trait EventHandler {
    /// A monster appeared.
    fn on_new_monster(&mut self, monster: MonsterInstance);

    /// A visible monster moved or turned. Default: no-op.
    fn on_monster_moved(&mut self, _movement: MonsterMovement) {}

    /// Another player moved or turned. Default: no-op.
    fn on_player_moved(&mut self, _movement: PlayerMovement) {}
}

/// Routes raw payloads to an [`EventHandler`].
///
/// Every method either calls the handler exactly once or returns an error
/// without calling it. Errors are returned as-is; deciding what to do about
/// a bad message belongs to the caller.
#[derive(Debug, Default)]
pub struct Dispatcher<H> {
    handler: H,
}

impl<H: EventHandler> Dispatcher<H> {
    pub fn new(handler: H) -> Self {
        Self { handler }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn into_handler(self) -> H {
        self.handler
    }

    /// Decodes `raw` as the event named by `tag` and forwards it.
    ///
    /// # Errors
    /// [`ProtocolError::UnknownEvent`] for an unrecognised tag,
    /// [`ProtocolError::Format`] for a malformed payload.
    pub fn dispatch(
        &mut self,
        tag: &str,
        raw: &str,
    ) -> Result<EventKind, ProtocolError> {
        let event = NetworkEvent::decode_tagged(tag, raw)?;
        Ok(self.dispatch_event(event))
    }

    /// Parses a `<tag>::<payload>` line and dispatches it.
    pub fn dispatch_frame(
        &mut self,
        line: &str,
    ) -> Result<EventKind, ProtocolError> {
        let frame = Frame::parse(line)?;
        self.dispatch(frame.tag, frame.payload)
    }

    /// Forwards an already-decoded event.
    pub fn dispatch_event(&mut self, event: NetworkEvent) -> EventKind {
        let kind = event.kind();
        match event {
            NetworkEvent::NewMonster(e) => {
                self.handler.on_new_monster(e.into_model())
            }
            NetworkEvent::MonsterMoved(e) => {
                self.handler.on_monster_moved(e.into_model())
            }
            NetworkEvent::PlayerMoved(e) => {
                self.handler.on_player_moved(e.into_model())
            }
        }
        kind
    }
}
