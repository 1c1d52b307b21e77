//! FIX 4.4 acceptor over TCP.
//!
//! Frames the socket with [`FixCodec`], drives one [`Controller`] per
//! connection, and uses a [`HeartbeatManager`] tick to keep the session
//! alive. Pair it with the `session_drill` initiator logic or any FIX 4.4
//! initiator configured with matching CompIDs.
use ferrofix_core::CompId;
use ferrofix_session::{Controller, HeartbeatManager, SessionConfig, SessionRole, SessionState};
use ferrofix_transport::FixCodec;
use futures_util::{SinkExt, StreamExt};
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio_util::codec::Framed;
use tracing::{error, info, warn};
mod common;
use common::{ExampleConfig, init_logging};

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let cfg = ExampleConfig::acceptor();
    info!("Starting FIX.4.4 acceptor on {}", cfg.addr());
    let listener = TcpListener::bind(&cfg.addr()).await?;

    loop {
        let (socket, addr) = listener.accept().await?;
        info!("Connection from {}", addr);
        let cfg = cfg.clone();
        tokio::spawn(async move {
            if let Err(e) = handle(socket, cfg).await {
                error!("Session error: {}", e);
            }
        });
    }
}

async fn handle(
    socket: TcpStream,
    cfg: ExampleConfig,
) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut framed = Framed::new(socket, FixCodec::new());

    let session_config = SessionConfig::new(
        CompId::new(&cfg.sender_comp_id).ok_or("sender CompID too long")?,
        CompId::new(&cfg.target_comp_id).ok_or("target CompID too long")?,
        SessionRole::Acceptor,
    )
    .with_heartbeat_interval(Duration::from_secs(cfg.heartbeat_interval));

    let mut controller = Controller::new(session_config);
    let mut heartbeat = HeartbeatManager::new(controller.config().heartbeat_interval);
    let mut tick = tokio::time::interval(Duration::from_secs(1));
    let mut ping_seq = 0u64;

    loop {
        tokio::select! {
            frame = framed.next() => {
                let Some(frame) = frame else { break };
                let frame = frame?;

                let action = controller.on_message(&frame);
                info!(
                    "inbound: disposition={:?} events=[{}]",
                    action.disposition,
                    action.events.iter().map(|e| e.as_str()).collect::<Vec<_>>().join(",")
                );

                let fields = ferrofix_tagvalue::split_tags(&frame);
                let tag_value = |tag: u32| {
                    fields.iter().find(|f| f.tag == tag).and_then(|f| f.as_str().ok())
                };
                let is_heartbeat = tag_value(35) == Some("0");
                heartbeat.on_message_received(is_heartbeat, tag_value(112));

                for outbound in action.outbound {
                    framed.send(outbound).await?;
                    heartbeat.on_message_sent();
                }

                if controller.state() == SessionState::Terminated {
                    info!("Session terminated");
                    break;
                }
            }
            _ = tick.tick() => {
                if controller.state() != SessionState::Established {
                    continue;
                }
                if heartbeat.is_timed_out() {
                    warn!("Peer silent past the test request window, logging out");
                    let logout = controller.build_logout(Some("Heartbeat timeout"));
                    framed.send(logout).await?;
                    break;
                }
                if heartbeat.should_send_test_request() {
                    ping_seq += 1;
                    let id = format!("PING-{ping_seq}");
                    let frame = controller.build_test_request(&id);
                    framed.send(frame).await?;
                    heartbeat.on_test_request_sent(id);
                } else if heartbeat.should_send_heartbeat() {
                    let frame = controller.build_heartbeat(None);
                    framed.send(frame).await?;
                    heartbeat.on_message_sent();
                }
            }
        }
    }

    Ok(())
}
