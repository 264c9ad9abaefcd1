//! Monster feed: a tiny server that announces monsters over WebSocket, and
//! a client that prints what it sees.
//!
//! ```text
//! RUST_LOG=debug cargo run -p monster-feed -- server --listen 127.0.0.1:9000
//! RUST_LOG=info  cargo run -p monster-feed -- client --connect ws://127.0.0.1:9000
//! ```

use clap::{Parser, Subcommand};
use dungeon_net::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Stream dungeon monster events over WebSocket")]
struct Args {
    #[clap(subcommand)]
    mode: Mode,
}

#[derive(Subcommand, Debug)]
enum Mode {
    Server(ServerArgs),
    Client(ClientArgs),
}

#[derive(Parser, Debug)]
struct ServerArgs {
    #[clap(long, value_name = "IP:PORT", default_value = "127.0.0.1:9000")]
    listen: String,

    /// Monsters announced to each client before it is disconnected.
    #[clap(long, default_value_t = 5)]
    monsters: u16,
}

#[derive(Parser, Debug)]
struct ClientArgs {
    #[clap(long, value_name = "URL", default_value = "ws://127.0.0.1:9000")]
    connect: String,
}

// ---------------------------------------------------------------------------
// Server side
// ---------------------------------------------------------------------------

/// A wave of goblins walking east along a corridor, then each one
/// stepping once.
fn spawn_wave(count: u16) -> Vec<NetworkEvent> {
    let spawns = (0..count).map(|i| {
        NetworkEvent::from(NewMonster::from_model(MonsterInstance {
            template_id: TemplateId::from(0),
            instance_id: InstanceId::from(i),
            position: PositionModel::new(i32::from(i) * 2, 0, Direction::East),
        }))
    });
    let steps = (0..count).map(|i| {
        NetworkEvent::from(MonsterMoved::from_model(MonsterMovement {
            instance_id: InstanceId::from(i),
            position: PositionModel::new(i32::from(i) * 2 + 1, 0, Direction::East),
        }))
    });
    spawns.chain(steps).collect()
}

/// Sends one wave to a client and hangs up. Send and close failures both
/// end the feed early.
async fn feed<C>(sender: &EventSender<C>, count: u16) -> Result<(), DungeonNetError>
where
    C: Connection<Error = TransportError>,
{
    for event in spawn_wave(count) {
        sender.send(&event).await?;
    }
    sender.connection().close().await?;
    Ok(())
}

async fn run_server(args: ServerArgs) -> Result<(), DungeonNetError> {
    let mut transport = WebSocketTransport::bind(&args.listen).await?;
    tracing::info!(addr = %args.listen, "monster feed running");

    loop {
        let conn = match transport.accept().await {
            Ok(conn) => conn,
            Err(e) => {
                tracing::error!(error = %e, "accept failed");
                continue;
            }
        };
        let count = args.monsters;
        tokio::spawn(async move {
            let conn_id = conn.id();
            match feed(&EventSender::new(conn), count).await {
                Ok(()) => tracing::info!(%conn_id, "feed complete"),
                Err(e) => tracing::debug!(%conn_id, error = %e, "feed stopped"),
            }
        });
    }
}

// ---------------------------------------------------------------------------
// Client side
// ---------------------------------------------------------------------------

/// Logs every event it receives.
struct Printer;

impl EventHandler for Printer {
    fn on_new_monster(&mut self, monster: MonsterInstance) {
        tracing::info!(
            template = %monster.template_id,
            instance = %monster.instance_id,
            x = monster.position.x,
            y = monster.position.y,
            facing = %monster.position.direction,
            "monster appeared"
        );
    }

    fn on_monster_moved(&mut self, movement: MonsterMovement) {
        tracing::info!(
            instance = %movement.instance_id,
            x = movement.position.x,
            y = movement.position.y,
            "monster moved"
        );
    }
}

async fn run_client(args: ClientArgs) -> Result<(), DungeonNetError> {
    let conn = WebSocketConnection::connect(&args.connect).await?;
    let mut pump = EventPump::new(conn, Printer, PumpConfig::default());
    let stats = pump.run().await?;
    tracing::info!(
        dispatched = stats.dispatched,
        dropped = stats.dropped,
        "feed ended"
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), DungeonNetError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match Args::parse().mode {
        Mode::Server(args) => run_server(args).await,
        Mode::Client(args) => run_client(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_wave_announces_then_moves() {
        let wave = spawn_wave(2);
        let kinds: Vec<_> = wave.iter().map(NetworkEvent::kind).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::NewMonster,
                EventKind::NewMonster,
                EventKind::MonsterMoved,
                EventKind::MonsterMoved,
            ]
        );
        assert_eq!(wave[1].encode_frame(), "NewMonster::0::1::2::0::1");
        assert_eq!(wave[3].encode_frame(), "MonsterMoved::1::3::0::1");
    }

    #[test]
    fn test_spawn_wave_empty() {
        assert!(spawn_wave(0).is_empty());
    }

    #[test]
    fn test_spawn_wave_largest_count_stays_encodable() {
        let wave = spawn_wave(u16::MAX);
        let last = wave.last().unwrap();
        let frame = last.encode_frame();
        assert_eq!(frame, "MonsterMoved::65534::131069::0::1");
        assert_eq!(NetworkEvent::decode_frame(&frame).unwrap(), *last);
    }

    #[tokio::test]
    async fn test_feed_sends_wave_then_closes() {
        let (server, client) = MemoryConnection::pair();
        feed(&EventSender::new(server), 2).await.unwrap();

        let mut lines = Vec::new();
        while let Some(line) = client.recv().await.unwrap() {
            lines.push(line);
        }
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "NewMonster::0::0::0::0::1");
    }

    #[tokio::test]
    async fn test_feed_reports_a_dead_peer() {
        let (server, client) = MemoryConnection::pair();
        drop(client);
        assert!(feed(&EventSender::new(server), 1).await.is_err());
    }

    #[test]
    fn test_cli_defaults() {
        let args = Args::parse_from(["monster-feed", "server"]);
        match args.mode {
            Mode::Server(s) => {
                assert_eq!(s.listen, "127.0.0.1:9000");
                assert_eq!(s.monsters, 5);
            }
            Mode::Client(_) => panic!("expected server mode"),
        }
    }
}
