//! Unified error type for dungeon-net.

use dungeon_net_protocol::{PreconditionError, ProtocolError};
use dungeon_net_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant lets `?` convert sub-crate
/// errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum DungeonNetError {
    /// A transport-level error (connection, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (unknown event, malformed frame or payload,
    /// unpopulated draft).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Configuration could not be parsed.
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
}

impl From<PreconditionError> for DungeonNetError {
    fn from(err: PreconditionError) -> Self {
        DungeonNetError::Protocol(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dungeon_net_protocol::EventKind;

    #[test]
    fn test_from_transport_error() {
        let err = TransportError::ConnectionClosed("gone".into());
        let net_err: DungeonNetError = err.into();
        assert!(matches!(net_err, DungeonNetError::Transport(_)));
        assert!(net_err.to_string().contains("gone"));
    }

    #[test]
    fn test_from_protocol_error() {
        let err = ProtocolError::InvalidFrame("bad".into());
        let net_err: DungeonNetError = err.into();
        assert!(matches!(net_err, DungeonNetError::Protocol(_)));
    }

    #[test]
    fn test_from_precondition_error() {
        let err = PreconditionError::Unpopulated(EventKind::NewMonster);
        let net_err: DungeonNetError = err.into();
        assert!(matches!(
            net_err,
            DungeonNetError::Protocol(ProtocolError::Precondition(_))
        ));
    }

    #[test]
    fn test_from_config_error() {
        let err = crate::PumpConfig::from_json("not json").unwrap_err();
        let net_err: DungeonNetError = err.into();
        assert!(matches!(net_err, DungeonNetError::Config(_)));
    }
}
