//! # dungeon-net
//!
//! Network event transport for the dungeon crawler.
//!
//! The server describes world-state changes (a monster appearing, an actor
//! moving) as [`NetworkEvent`]s, encodes them as compact `::`-delimited
//! text frames and sends them over a [`Connection`]. The receiving side
//! runs an [`EventPump`] that decodes each frame back into a typed model
//! and hands it to the game-state store's [`EventHandler`].
//!
//! ## Quick Start
//!
//! ```rust
//! use dungeon_net::prelude::*;
//!
//! #[derive(Default)]
//! struct Visible(Vec<MonsterInstance>);
//!
//! impl EventHandler for Visible {
//!     fn on_new_monster(&mut self, monster: MonsterInstance) {
//!         self.0.push(monster);
//!     }
//! }
//!
//! let mut dispatcher = Dispatcher::new(Visible::default());
//! dispatcher.dispatch("NewMonster", "3::17::5::-2::0").unwrap();
//! assert_eq!(dispatcher.handler().0[0].instance_id, InstanceId::from(17));
//! ```

mod config;
mod error;
mod handler;
mod pump;

pub use config::{MalformedPolicy, PumpConfig};
pub use error::DungeonNetError;
pub use handler::{Dispatcher, EventHandler};
pub use pump::{EventPump, EventSender, PumpStats};

pub use dungeon_net_protocol as protocol;
pub use dungeon_net_transport as transport;

#[doc(no_inline)]
pub use dungeon_net_protocol::NetworkEvent;
#[doc(no_inline)]
pub use dungeon_net_transport::Connection;

/// Everything a game client or server typically needs.
pub mod prelude {
    pub use crate::{
        Dispatcher, DungeonNetError, EventHandler, EventPump, EventSender,
        MalformedPolicy, PumpConfig, PumpStats,
    };
    pub use dungeon_net_protocol::{
        Direction, EventDraft, EventKind, InstanceId, MonsterInstance,
        MonsterMoved, MonsterMovement, NetworkEvent, NewMonster, PlayerId,
        PlayerMoved, PlayerMovement, PositionModel, TemplateId, WireEvent,
    };
    pub use dungeon_net_transport::{
        Connection, MemoryConnection, Transport, TransportError,
    };
    #[cfg(feature = "websocket")]
    pub use dungeon_net_transport::{WebSocketConnection, WebSocketTransport};
}
