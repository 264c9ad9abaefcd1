//! Moving events over a connection.
//!
//! [`EventPump`] reads frames off a connection and dispatches them until
//! the peer goes away. [`EventSender`] is the other direction: encode,
//! frame, send.
//!
//! This is the one place in the workspace that decides what happens to a
//! bad message, so it is also the one place that logs about them.

use dungeon_net_protocol::{
    EventDraft, EventKind, Frame, NetworkEvent, ProtocolError, WireEvent,
};
use dungeon_net_transport::{Connection, TransportError};

use crate::config::{MalformedPolicy, PumpConfig};
use crate::handler::{Dispatcher, EventHandler};
use crate::DungeonNetError;

/// Counters for one pump run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PumpStats {
    /// Frames decoded and handed to the handler.
    pub dispatched: u64,
    /// Frames rejected as malformed.
    pub dropped: u64,
}

// ---------------------------------------------------------------------------
// EventPump
// ---------------------------------------------------------------------------

/// Reads frames from a connection and dispatches them to a handler.
pub struct EventPump<C, H> {
    conn: C,
    dispatcher: Dispatcher<H>,
    config: PumpConfig,
    stats: PumpStats,
}

impl<C, H> EventPump<C, H>
where
    C: Connection<Error = TransportError>,
    H: EventHandler,
{
    pub fn new(conn: C, handler: H, config: PumpConfig) -> Self {
        Self {
            conn,
            dispatcher: Dispatcher::new(handler),
            config,
            stats: PumpStats::default(),
        }
    }

    pub fn handler(&self) -> &H {
        self.dispatcher.handler()
    }

    pub fn stats(&self) -> PumpStats {
        self.stats
    }

    /// Gives back the connection and the handler.
    pub fn into_parts(self) -> (C, H) {
        (self.conn, self.dispatcher.into_handler())
    }

    /// Runs until the connection closes or the receive timeout expires.
    ///
    /// Frames are dispatched in arrival order. A malformed frame is
    /// dropped or ends the run, per [`PumpConfig::on_malformed`].
    ///
    /// # Errors
    /// - [`DungeonNetError::Transport`] if receiving fails.
    /// - [`DungeonNetError::Protocol`] for a malformed frame under
    ///   [`MalformedPolicy::Disconnect`].
    pub async fn run(&mut self) -> Result<PumpStats, DungeonNetError> {
        let conn_id = self.conn.id();
        tracing::debug!(%conn_id, "event pump started");

        while let Some(line) = self.next_line().await? {
            match self.handle_line(&line) {
                Ok(kind) => {
                    self.stats.dispatched += 1;
                    tracing::trace!(%conn_id, %kind, "event dispatched");
                }
                Err(e) => {
                    self.stats.dropped += 1;
                    tracing::debug!(
                        %conn_id, error = %e, "malformed frame"
                    );
                    if self.config.on_malformed == MalformedPolicy::Disconnect {
                        return Err(e.into());
                    }
                }
            }
        }

        tracing::debug!(
            %conn_id,
            dispatched = self.stats.dispatched,
            dropped = self.stats.dropped,
            "event pump finished"
        );
        Ok(self.stats)
    }

    /// Next line, or `None` when the pump should stop quietly.
    async fn next_line(&self) -> Result<Option<String>, DungeonNetError> {
        let conn_id = self.conn.id();
        let received = match self.config.recv_timeout {
            Some(limit) => {
                match tokio::time::timeout(limit, self.conn.recv()).await {
                    Ok(result) => result,
                    Err(_) => {
                        tracing::info!(%conn_id, "connection timed out");
                        return Ok(None);
                    }
                }
            }
            None => self.conn.recv().await,
        };

        match received {
            Ok(Some(line)) => Ok(Some(line)),
            Ok(None) => {
                tracing::info!(%conn_id, "connection closed cleanly");
                Ok(None)
            }
            Err(e) => {
                tracing::debug!(%conn_id, error = %e, "recv error");
                Err(e.into())
            }
        }
    }

    fn handle_line(&mut self, line: &str) -> Result<EventKind, ProtocolError> {
        if line.len() > self.config.max_frame_len {
            return Err(ProtocolError::InvalidFrame(format!(
                "{} bytes exceeds limit of {}",
                line.len(),
                self.config.max_frame_len
            )));
        }
        self.dispatcher.dispatch_frame(line)
    }
}

// ---------------------------------------------------------------------------
// EventSender
// ---------------------------------------------------------------------------

/// Encodes events as frames and sends them.
pub struct EventSender<C> {
    conn: C,
}

impl<C> EventSender<C>
where
    C: Connection<Error = TransportError>,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &C {
        &self.conn
    }

    /// Sends any event from the family.
    pub async fn send(&self, event: &NetworkEvent) -> Result<(), DungeonNetError> {
        self.send_line(event.kind(), &event.encode()).await
    }

    /// Sends one concrete event.
    pub async fn send_event<E: WireEvent>(
        &self,
        event: &E,
    ) -> Result<(), DungeonNetError> {
        self.send_line(E::KIND, &event.encode()).await
    }

    /// Sends a draft. Nothing is written if the draft has no model.
    ///
    /// # Errors
    /// [`ProtocolError::Precondition`] for an unpopulated draft.
    pub async fn send_draft<E: WireEvent>(
        &self,
        draft: &EventDraft<E>,
    ) -> Result<(), DungeonNetError> {
        let payload = draft.try_encode()?;
        self.send_line(E::KIND, &payload).await
    }

    async fn send_line(
        &self,
        kind: EventKind,
        payload: &str,
    ) -> Result<(), DungeonNetError> {
        let line = Frame::new(kind.tag(), payload).to_string();
        tracing::trace!(conn_id = %self.conn.id(), %kind, "sending event");
        self.conn.send(&line).await?;
        Ok(())
    }
}
