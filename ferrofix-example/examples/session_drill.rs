//! In-process session drill: controller pairs exchange the session
//! repertoire (logon, test request, sequence gap, garbled frame, logout)
//! scene by scene, with every frame and event logged.
use ferrofix_core::CompId;
use ferrofix_session::{Action, Controller, SessionConfig, SessionRole};
use tracing::info;
mod common;
use common::init_logging;

fn pair() -> (Controller, Controller) {
    let initiator = Controller::new(SessionConfig::new(
        CompId::new("INITIATOR").unwrap(),
        CompId::new("ACCEPTOR").unwrap(),
        SessionRole::Initiator,
    ));
    let acceptor = Controller::new(SessionConfig::new(
        CompId::new("ACCEPTOR").unwrap(),
        CompId::new("INITIATOR").unwrap(),
        SessionRole::Acceptor,
    ));
    (initiator, acceptor)
}

fn deliver(label: &str, wire: &[u8], receiver: &mut Controller) -> Action {
    let mut last = Action::default();
    for frame in receiver.consume(wire) {
        let action = receiver.on_message(&frame);
        info!(
            "{label}: disposition={:?} events=[{}] outbound={}",
            action.disposition,
            action
                .events
                .iter()
                .map(|e| e.as_str())
                .collect::<Vec<_>>()
                .join(","),
            action.outbound.len()
        );
        last = action;
    }
    last
}

fn show(label: &str, frame: &[u8]) {
    info!("{label}: {}", String::from_utf8_lossy(frame).replace('\x01', "|"));
}

fn handshake(initiator: &mut Controller, acceptor: &mut Controller) {
    let logon = initiator.build_logon(false);
    show("initiator -> logon", &logon);
    let action = deliver("acceptor <- logon", &logon, acceptor);
    show("acceptor -> logon", &action.outbound[0]);
    deliver("initiator <- logon", &action.outbound[0], initiator);
    info!(
        "established: initiator={:?} acceptor={:?}",
        initiator.state(),
        acceptor.state()
    );
}

fn scene_handshake_and_test_request() {
    info!("--- scene: logon handshake + test request ---");
    let (mut initiator, mut acceptor) = pair();
    handshake(&mut initiator, &mut acceptor);

    let ping = initiator.build_test_request("DRILL-1");
    show("initiator -> test request", &ping);
    let action = deliver("acceptor <- test request", &ping, &mut acceptor);
    show("acceptor -> heartbeat", &action.outbound[0]);
    deliver("initiator <- heartbeat", &action.outbound[0], &mut initiator);
}

fn scene_sequence_gap() {
    info!("--- scene: sequence gap draws a resend request ---");
    let (mut initiator, mut acceptor) = pair();
    handshake(&mut initiator, &mut acceptor);

    initiator.skip_outbound_sequence(4);
    let gapped = initiator.build_heartbeat(None);
    show("initiator -> gapped heartbeat", &gapped);
    let action = deliver("acceptor <- gapped heartbeat", &gapped, &mut acceptor);
    show("acceptor -> resend request", &action.outbound[0]);
    info!(
        "acceptor still expects inbound seq {}",
        acceptor.expected_incoming_seq_num()
    );
}

fn scene_garbled_frame() {
    info!("--- scene: garbled frame draws a reject ---");
    let (mut initiator, mut acceptor) = pair();
    handshake(&mut initiator, &mut acceptor);

    let garbled = b"8=FIX.4.4|9=10|35=0|34=2|10=000|";
    show("initiator -> garbled", garbled);
    let action = deliver("acceptor <- garbled", garbled, &mut acceptor);
    show("acceptor -> reject", &action.outbound[0]);
    info!(
        "acceptor unshaken: state={:?} expects inbound seq {}",
        acceptor.state(),
        acceptor.expected_incoming_seq_num()
    );
}

fn scene_logout() {
    info!("--- scene: orderly logout ---");
    let (mut initiator, mut acceptor) = pair();
    handshake(&mut initiator, &mut acceptor);

    let logout = initiator.build_logout(Some("Done for the day"));
    show("initiator -> logout", &logout);
    let action = deliver("acceptor <- logout", &logout, &mut acceptor);
    show("acceptor -> logout ack", &action.outbound[0]);
    deliver("initiator <- logout ack", &action.outbound[0], &mut initiator);
    info!(
        "terminated: initiator={:?} acceptor={:?}",
        initiator.state(),
        acceptor.state()
    );
}

fn main() {
    init_logging();

    scene_handshake_and_test_request();
    scene_sequence_gap();
    scene_garbled_frame();
    scene_logout();
}
