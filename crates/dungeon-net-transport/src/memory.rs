//! In-process connection pair backed by tokio channels.

use tokio::sync::Mutex;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::{Connection, ConnectionId, TransportError};

/// One end of an in-memory link.
///
/// Lines sent on one end arrive, in order, on the other. Closing either end
/// (or dropping it) makes the peer's `recv` return `Ok(None)` once buffered
/// lines are drained.
pub struct MemoryConnection {
    id: ConnectionId,
    tx: Mutex<Option<UnboundedSender<String>>>,
    rx: Mutex<UnboundedReceiver<String>>,
}

impl MemoryConnection {
    /// Creates two connected ends.
    pub fn pair() -> (Self, Self) {
        let (a_tx, b_rx) = mpsc::unbounded_channel();
        let (b_tx, a_rx) = mpsc::unbounded_channel();
        let a = Self {
            id: ConnectionId::next(),
            tx: Mutex::new(Some(a_tx)),
            rx: Mutex::new(a_rx),
        };
        let b = Self {
            id: ConnectionId::next(),
            tx: Mutex::new(Some(b_tx)),
            rx: Mutex::new(b_rx),
        };
        (a, b)
    }
}

impl Connection for MemoryConnection {
    type Error = TransportError;

    async fn send(&self, line: &str) -> Result<(), Self::Error> {
        let tx = self.tx.lock().await;
        let tx = tx.as_ref().ok_or_else(|| {
            TransportError::ConnectionClosed("closed locally".into())
        })?;
        tx.send(line.to_string()).map_err(|_| {
            TransportError::ConnectionClosed("peer dropped".into())
        })
    }

    async fn recv(&self) -> Result<Option<String>, Self::Error> {
        Ok(self.rx.lock().await.recv().await)
    }

    async fn close(&self) -> Result<(), Self::Error> {
        self.tx.lock().await.take();
        tracing::debug!(id = %self.id, "memory connection closed");
        Ok(())
    }

    fn id(&self) -> ConnectionId {
        self.id
    }
}
