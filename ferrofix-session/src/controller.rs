/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Session-level FIX controller.
//!
//! One [`Controller`] drives one peer session: it frames the inbound byte
//! stream, admits each frame (BodyLength, CheckSum, strict parse, CompIDs,
//! MsgSeqNum), runs the session state machine, and builds the outbound
//! admin frames (Logon, Heartbeat, TestRequest, ResendRequest, Logout,
//! Reject) plus arbitrary application messages.
//!
//! The controller never performs I/O and never throws past its API:
//! [`on_message`](Controller::on_message) reports every outcome through the
//! returned [`Action`]. A controller instance is not thread-safe; callers
//! serialize access.

use crate::config::{SessionConfig, SessionRole};
use bytes::Bytes;
use ferrofix_core::{SeqNum, Timestamp};
use ferrofix_tagvalue::frame::parse_uint;
use ferrofix_tagvalue::{
    Encoder, FrameSplitter, SOH, normalize, validate_body_length, validate_checksum,
};
use thiserror::Error;

/// High-level controller lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No active session yet.
    Disconnected,
    /// Logon has started but the counterparty logon is still pending.
    AwaitingLogon,
    /// Session is established and application flow is allowed.
    Established,
    /// Logout has been emitted and shutdown is in progress.
    LogoutSent,
    /// Session is terminated.
    Terminated,
}

/// Classification of how an inbound FIX frame was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Message passed session checks and was accepted.
    Accepted,
    /// Message sequence is out of sync with the expected incoming sequence.
    OutOfSync,
    /// Message is malformed or fails admission checks.
    Garbled,
}

/// Session events emitted while processing an inbound frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Logon accepted.
    Logon,
    /// Heartbeat received.
    Heartbeat,
    /// TestRequest received (a Heartbeat echo was queued).
    TestRequest,
    /// Logout received.
    Logout,
    /// ResendRequest received (acknowledged; no history is resent).
    ResendRequest,
    /// SequenceReset applied.
    SequenceReset,
    /// Inbound sequence number ran ahead of the expected one.
    SequenceGap,
    /// Inbound sequence number fell below the expected one.
    SequenceTooLow,
    /// Non-Logout traffic arrived before any Logon.
    LogonRequired,
    /// CompIDs did not match the configured identities.
    CompIdMismatch,
    /// Frame failed BodyLength, CheckSum, or parsing.
    GarbledMessage,
    /// Application-level message passed through.
    ApplicationMessage,
}

impl SessionEvent {
    /// Returns the stable event tag used in logs and tests.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Logon => "logon",
            Self::Heartbeat => "heartbeat",
            Self::TestRequest => "test_request",
            Self::Logout => "logout",
            Self::ResendRequest => "resend_request",
            Self::SequenceReset => "sequence_reset",
            Self::SequenceGap => "sequence_gap",
            Self::SequenceTooLow => "sequence_too_low",
            Self::LogonRequired => "logon_required",
            Self::CompIdMismatch => "comp_id_mismatch",
            Self::GarbledMessage => "garbled_message",
            Self::ApplicationMessage => "application_message",
        }
    }
}

impl std::fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons a frame is rejected as garbled, carried into the Reject's tag 58.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GarbledReason {
    /// A token was not terminated by SOH.
    #[error("Missing SOH-delimited field terminator")]
    MissingFieldTerminator,
    /// A token had no `=` separating tag and value.
    #[error("Malformed tag=value field")]
    MalformedTagValue,
    /// A token's tag did not parse as a number.
    #[error("Tag is not numeric")]
    TagNotNumeric,
    /// MsgSeqNum (34) did not parse as a non-negative integer.
    #[error("Invalid MsgSeqNum (tag 34)")]
    InvalidMsgSeqNum,
    /// MsgType (35) was absent.
    #[error("Missing MsgType (tag 35)")]
    MissingMsgType,
    /// MsgSeqNum (34) was absent.
    #[error("Missing MsgSeqNum (tag 34)")]
    MissingMsgSeqNum,
}

/// Controller reaction to an inbound message.
#[derive(Debug, Clone, Default)]
pub struct Action {
    /// Final acceptance classification for the processed inbound message.
    pub disposition: Disposition,
    /// Outbound frames to transmit, in order, fully framed and checksummed.
    pub outbound: Vec<Bytes>,
    /// Events emitted during processing, in order.
    pub events: Vec<SessionEvent>,
}

impl Default for Disposition {
    fn default() -> Self {
        Self::Accepted
    }
}

/// `(tag, value)` FIX field pair used when building messages.
pub type Field = (u32, String);

/// Strictly parsed inbound message, internal to the admission pipeline.
#[derive(Debug, Default)]
struct ParsedMessage {
    fields: Vec<(u32, String)>,
    msg_type: String,
    seq_num: u64,
}

impl ParsedMessage {
    fn field_value(&self, tag: u32) -> &str {
        self.fields
            .iter()
            .find(|(t, _)| *t == tag)
            .map_or("", |(_, v)| v.as_str())
    }
}

/// Strict tokenizer for the controller path: every token must be
/// `tag=value` with a numeric tag, and MsgType plus MsgSeqNum must be
/// present.
fn parse_message(normalized: &[u8]) -> Result<ParsedMessage, GarbledReason> {
    let mut result = ParsedMessage::default();

    let mut pos = 0;
    while pos < normalized.len() {
        let Some(rel_end) = memchr::memchr(SOH, &normalized[pos..]) else {
            return Err(GarbledReason::MissingFieldTerminator);
        };
        let token = &normalized[pos..pos + rel_end];

        let Some(eq) = memchr::memchr(b'=', token) else {
            return Err(GarbledReason::MalformedTagValue);
        };
        let Some(tag) = parse_uint(&token[..eq]) else {
            return Err(GarbledReason::TagNotNumeric);
        };
        let Ok(tag) = u32::try_from(tag) else {
            return Err(GarbledReason::TagNotNumeric);
        };

        let value = String::from_utf8_lossy(&token[eq + 1..]).into_owned();
        result.fields.push((tag, value));
        pos += rel_end + 1;
    }

    let mut seq_num = None;
    for (tag, value) in &result.fields {
        if *tag == 35 {
            result.msg_type = value.clone();
        } else if *tag == 34 {
            let Some(parsed) = parse_uint(value.as_bytes()) else {
                return Err(GarbledReason::InvalidMsgSeqNum);
            };
            seq_num = Some(parsed);
        }
    }

    if result.msg_type.is_empty() {
        return Err(GarbledReason::MissingMsgType);
    }
    let Some(seq_num) = seq_num else {
        return Err(GarbledReason::MissingMsgSeqNum);
    };
    result.seq_num = seq_num;

    Ok(result)
}

/// Session-level FIX controller for logon, sequencing, and admission.
///
/// One instance per peer session; controllers share no mutable state.
#[derive(Debug)]
pub struct Controller {
    config: SessionConfig,
    state: SessionState,
    expected_incoming: SeqNum,
    next_outgoing: SeqNum,
    logon_sent: bool,
    logon_received: bool,
    splitter: FrameSplitter,
}

impl Controller {
    /// Creates a disconnected controller for the configured identities.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            state: SessionState::Disconnected,
            expected_incoming: SeqNum::default(),
            next_outgoing: SeqNum::default(),
            logon_sent: false,
            logon_received: false,
            splitter: FrameSplitter::new(),
        }
    }

    /// Returns the current session state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Returns the session configuration.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Returns the next expected inbound MsgSeqNum (34).
    #[must_use]
    pub const fn expected_incoming_seq_num(&self) -> SeqNum {
        self.expected_incoming
    }

    /// Returns the next outbound MsgSeqNum (34) that will be assigned.
    #[must_use]
    pub const fn next_outgoing_seq_num(&self) -> SeqNum {
        self.next_outgoing
    }

    /// Advances the outbound sequence counter by `delta` (simulation helper).
    pub fn skip_outbound_sequence(&mut self, delta: u64) {
        self.next_outgoing = self.next_outgoing.advanced_by(delta);
    }

    fn build_message_with_seq(&self, msg_type: &str, fields: &[Field], seq_num: SeqNum) -> Bytes {
        let mut encoder = Encoder::new(self.config.begin_string.clone());
        encoder.put_str(35, msg_type);
        encoder.put_uint(34, seq_num.value());
        encoder.put_str(49, self.config.sender_comp_id.as_str());
        encoder.put_str(56, self.config.target_comp_id.as_str());
        encoder.put_str(52, Timestamp::now().format_millis().as_str());

        for (tag, value) in fields {
            encoder.put_str(*tag, value);
        }

        encoder.finish().freeze()
    }

    fn build_message(&mut self, msg_type: &str, fields: &[Field]) -> Bytes {
        let seq_num = self.next_outgoing;
        self.next_outgoing = seq_num.next();
        self.build_message_with_seq(msg_type, fields, seq_num)
    }

    /// Builds a Logon (`35=A`) and transitions to [`SessionState::AwaitingLogon`].
    ///
    /// With `reset_seq_num` the Logon carries `141=Y` and both sequence
    /// counters restart at 1.
    pub fn build_logon(&mut self, reset_seq_num: bool) -> Bytes {
        let mut fields: Vec<Field> = vec![
            (98, "0".to_string()),
            (108, self.config.heartbeat_interval_secs().to_string()),
        ];
        if reset_seq_num {
            fields.push((141, "Y".to_string()));
            self.expected_incoming = SeqNum::new(1);
            self.next_outgoing = SeqNum::new(1);
        }

        self.logon_sent = true;
        self.state = SessionState::AwaitingLogon;
        self.build_message("A", &fields)
    }

    /// Builds a Heartbeat (`35=0`), optionally echoing a TestReqID (112).
    pub fn build_heartbeat(&mut self, test_req_id: Option<&str>) -> Bytes {
        let mut fields: Vec<Field> = Vec::new();
        if let Some(id) = test_req_id
            && !id.is_empty()
        {
            fields.push((112, id.to_string()));
        }
        self.build_message("0", &fields)
    }

    /// Builds a TestRequest (`35=1`) with the required TestReqID (112).
    pub fn build_test_request(&mut self, test_req_id: &str) -> Bytes {
        self.build_message("1", &[(112, test_req_id.to_string())])
    }

    /// Builds a Logout (`35=5`) and transitions to [`SessionState::LogoutSent`].
    pub fn build_logout(&mut self, text: Option<&str>) -> Bytes {
        self.state = SessionState::LogoutSent;
        let mut fields: Vec<Field> = Vec::new();
        if let Some(text) = text
            && !text.is_empty()
        {
            fields.push((58, text.to_string()));
        }
        self.build_message("5", &fields)
    }

    /// Builds a ResendRequest (`35=2`) for the requested range; `end_seq_no`
    /// 0 means "through the latest".
    pub fn build_resend_request(&mut self, begin_seq_no: u64, end_seq_no: u64) -> Bytes {
        self.build_message(
            "2",
            &[
                (7, begin_seq_no.to_string()),
                (16, end_seq_no.to_string()),
            ],
        )
    }

    /// Builds an arbitrary application message (`35=<msg_type>`).
    pub fn build_application_message(&mut self, msg_type: &str, fields: &[Field]) -> Bytes {
        self.build_message(msg_type, fields)
    }

    fn build_reject(&mut self, reason: &str) -> Bytes {
        self.build_message("3", &[(58, reason.to_string())])
    }

    /// Splits raw inbound bytes into complete FIX frames.
    ///
    /// # Arguments
    /// * `incoming_bytes` - Byte stream chunk from the transport
    ///
    /// # Returns
    /// Zero or more complete frames ready for [`on_message`](Self::on_message).
    pub fn consume(&mut self, incoming_bytes: &[u8]) -> Vec<Bytes> {
        self.splitter.consume(incoming_bytes)
    }

    /// Processes one complete inbound FIX frame.
    ///
    /// Returns the disposition, the outbound frames to transmit, and the
    /// events emitted, in order. The expected incoming sequence number
    /// advances only when the frame is admitted with a matching MsgSeqNum.
    pub fn on_message(&mut self, raw_message: &[u8]) -> Action {
        let mut action = Action::default();

        let normalized = normalize(raw_message);
        if !validate_body_length(&normalized) || !validate_checksum(&normalized) {
            action.disposition = Disposition::Garbled;
            action.events.push(SessionEvent::GarbledMessage);
            let reject = self.build_reject("Invalid BodyLength or CheckSum");
            action.outbound.push(reject);
            return action;
        }

        let parsed = match parse_message(&normalized) {
            Ok(parsed) => parsed,
            Err(reason) => {
                action.disposition = Disposition::Garbled;
                action.events.push(SessionEvent::GarbledMessage);
                let reject = self.build_reject(&reason.to_string());
                action.outbound.push(reject);
                return action;
            }
        };

        if parsed.field_value(49) != self.config.target_comp_id.as_str()
            || parsed.field_value(56) != self.config.sender_comp_id.as_str()
        {
            action.disposition = Disposition::Garbled;
            action.events.push(SessionEvent::CompIdMismatch);
            let logout = self.build_logout(Some("CompID mismatch"));
            action.outbound.push(logout);
            self.state = SessionState::Terminated;
            return action;
        }

        if parsed.seq_num > self.expected_incoming.value() {
            action.disposition = Disposition::OutOfSync;
            action.events.push(SessionEvent::SequenceGap);
            let resend = self.build_resend_request(self.expected_incoming.value(), 0);
            action.outbound.push(resend);
            return action;
        }

        if parsed.seq_num < self.expected_incoming.value() {
            action.disposition = Disposition::OutOfSync;
            action.events.push(SessionEvent::SequenceTooLow);
            let logout = self.build_logout(Some("MsgSeqNum too low"));
            action.outbound.push(logout);
            self.state = SessionState::Terminated;
            return action;
        }

        self.expected_incoming = self.expected_incoming.next();

        if parsed.msg_type == "A" {
            self.logon_received = true;
            if !self.logon_sent && self.config.role == SessionRole::Acceptor {
                let logon = self.build_logon(false);
                action.outbound.push(logon);
            }
            self.state = SessionState::Established;
            action.events.push(SessionEvent::Logon);
            return action;
        }

        if !self.logon_received && parsed.msg_type != "5" {
            action.disposition = Disposition::OutOfSync;
            action.events.push(SessionEvent::LogonRequired);
            let logout = self.build_logout(Some("Expected Logon"));
            action.outbound.push(logout);
            self.state = SessionState::Terminated;
            return action;
        }

        match parsed.msg_type.as_str() {
            "1" => {
                action.events.push(SessionEvent::TestRequest);
                let test_req_id = parsed.field_value(112).to_string();
                let heartbeat = self.build_heartbeat(Some(&test_req_id));
                action.outbound.push(heartbeat);
            }
            "5" => {
                action.events.push(SessionEvent::Logout);
                if self.state != SessionState::LogoutSent {
                    let ack = self.build_logout(Some("Logout Ack"));
                    action.outbound.push(ack);
                }
                self.state = SessionState::Terminated;
            }
            "2" => {
                // Acknowledged only; resend or gap-fill is the caller's call.
                action.events.push(SessionEvent::ResendRequest);
            }
            "4" => {
                if let Some(new_seq) = parse_uint(parsed.field_value(36).as_bytes())
                    && new_seq >= self.expected_incoming.value()
                {
                    self.expected_incoming = SeqNum::new(new_seq);
                    action.events.push(SessionEvent::SequenceReset);
                }
            }
            "0" => {
                action.events.push(SessionEvent::Heartbeat);
            }
            _ => {
                action.events.push(SessionEvent::ApplicationMessage);
            }
        }

        action
    }
}
