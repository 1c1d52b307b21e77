/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Tag → type-code table for the FIXT 1.1 transport layer. Generated;
//! do not edit.
//!
//! FIXT carries only the session machinery; application fields are typed by
//! the dictionary selected through ApplVerID (1128).

use crate::typed::TypeCode;

/// BeginString advertised by FIXT 1.1 sessions.
pub const BEGIN_STRING: &str = "FIXT.1.1";

/// Resolves a tag to its FIXT 1.1 type code.
#[must_use]
pub const fn type_code_for(tag: u32) -> TypeCode {
    match tag {
        // Session layer
        7 | 16 | 34 | 36 | 369 => TypeCode::Int64,    // BeginSeqNo, EndSeqNo, MsgSeqNum, NewSeqNo, LastMsgSeqNumProcessed
        98 | 108 | 371 | 373 | 383 | 1156 | 1409 => TypeCode::Int64, // EncryptMethod, HeartBtInt, RefTagID, SessionRejectReason, MaxMessageSize, ApplExtID, SessionStatus
        43 | 97 | 123 | 141 | 464 => TypeCode::Bool,  // PossDupFlag, PossResend, GapFillFlag, ResetSeqNumFlag, TestMessageIndicator

        // Length-prefixed data
        9 | 90 | 93 | 95 => TypeCode::Int64,          // BodyLength, SecureDataLen, SignatureLength, RawDataLength
        89 | 91 | 96 => TypeCode::RawData,            // Signature, SecureData, RawData

        // Everything else in the FIXT header/trailer is a string
        // (49, 56, 52, 112, 58, 1128 ApplVerID, 1137 DefaultApplVerID, ...).
        _ => TypeCode::String,
    }
}
