/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # FerroFix
//!
//! A dictionary-driven FIX protocol decoder and session engine for Rust.
//!
//! FerroFix parses, validates, and drives FIX sessions for FIX 4.0 through
//! FIX 5.0 and the FIXT 1.1 transport. Its two central pieces are:
//!
//! - a **decoder** that turns raw FIX bytes into structured, typed, named,
//!   and structurally validated representations against QuickFIX-style XML
//!   dictionaries, and
//! - a **session controller** that frames the inbound byte stream, admits
//!   each frame (BodyLength, CheckSum, MsgSeqNum, CompIDs), drives the
//!   session state machine, and builds the outbound admin traffic.
//!
//! ## Quick Start
//!
//! ```rust
//! use ferrofix::prelude::*;
//!
//! let decoder = FixDecoder::new();
//! let decoded = decoder.decode(b"8=FIX.4.2|35=T|55=IBM|44=123.45|");
//! assert_eq!(decoded.msg_type, "T");
//! assert_eq!(decoded.field(44).unwrap().typed.as_f64(), Some(123.45));
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`]: Fundamental types and error definitions
//! - [`dictionary`]: FIX specification parsing and dictionary management
//! - [`tagvalue`]: Wire-level framing, tokenizing, and encoding
//! - [`decoder`]: Dictionary-driven typed decoding and validation
//! - [`session`]: Session layer controller and state machine
//! - [`transport`]: Tokio codec for TCP framing

pub mod core {
    //! Fundamental types and error definitions.
    pub use ferrofix_core::*;
}

pub mod dictionary {
    //! FIX specification parsing and dictionary management.
    pub use ferrofix_dictionary::*;
}

pub mod tagvalue {
    //! Wire-level framing, tokenizing, and encoding.
    pub use ferrofix_tagvalue::*;
}

pub mod decoder {
    //! Dictionary-driven typed decoding and validation.
    pub use ferrofix_decoder::*;
}

pub mod session {
    //! Session layer controller and state machine.
    pub use ferrofix_session::*;
}

pub mod transport {
    //! Tokio codec for TCP framing.
    pub use ferrofix_transport::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    // Core types
    pub use ferrofix_core::{
        CompId, DecodeError, DictionaryError, FieldRef, FixError, Result, SeqNum, Timestamp,
        TypedValue,
    };

    // Dictionary
    pub use ferrofix_dictionary::{
        Dictionary, DictionarySet, FieldDef, Member, MemberKind, MessageDef, MsgCat,
    };

    // Wire handling
    pub use ferrofix_tagvalue::{
        Encoder, FrameSplitter, MsgTypeKey, TagKey, calculate_checksum, split_tags,
        validate_body_length, validate_checksum,
    };

    // Decoder
    pub use ferrofix_decoder::{
        DecodedField, DecodedMessage, DecodedObject, FixDecoder, TypeCode, TypeRegistry,
    };

    // Session
    pub use ferrofix_session::{
        Action, Controller, Disposition, HeartbeatManager, SessionConfig, SessionEvent,
        SessionRole, SessionState,
    };

    // Transport
    pub use ferrofix_transport::{CodecError, FixCodec};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        let _seq = SeqNum::new(1);
        let _ts = Timestamp::now();
        let _decoder = FixDecoder::new();
    }

    #[test]
    fn test_end_to_end_session_and_decode() {
        let mut initiator = Controller::new(SessionConfig::new(
            CompId::new("INITIATOR").unwrap(),
            CompId::new("ACCEPTOR").unwrap(),
            SessionRole::Initiator,
        ));
        let mut acceptor = Controller::new(SessionConfig::new(
            CompId::new("ACCEPTOR").unwrap(),
            CompId::new("INITIATOR").unwrap(),
            SessionRole::Acceptor,
        ));

        let logon = initiator.build_logon(false);
        let frames = acceptor.consume(&logon);
        let action = acceptor.on_message(&frames[0]);
        assert_eq!(action.disposition, Disposition::Accepted);
        assert_eq!(acceptor.state(), SessionState::Established);

        // Every controller-built frame decodes cleanly.
        let decoder = FixDecoder::new();
        let decoded = decoder.decode(&action.outbound[0]);
        assert_eq!(decoded.begin_string, "FIX.4.4");
        assert_eq!(decoded.msg_type, "A");
    }
}
