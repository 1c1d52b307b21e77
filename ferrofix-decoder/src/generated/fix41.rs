/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Tag → type-code table for FIX 4.1. Generated; do not edit.

use crate::typed::TypeCode;

/// BeginString advertised by FIX 4.1 sessions.
pub const BEGIN_STRING: &str = "FIX.4.1";

/// Resolves a tag to its FIX 4.1 type code.
#[must_use]
pub const fn type_code_for(tag: u32) -> TypeCode {
    match tag {
        // Session layer
        7 | 16 | 34 | 36 => TypeCode::Int64,          // BeginSeqNo, EndSeqNo, MsgSeqNum, NewSeqNo
        9 | 90 | 93 | 95 => TypeCode::Int64,          // BodyLength, SecureDataLen, SignatureLength, RawDataLength
        98 | 108 => TypeCode::Int64,                  // EncryptMethod, HeartBtInt
        43 | 97 | 123 | 141 => TypeCode::Bool,        // PossDupFlag, PossResend, GapFillFlag, ResetSeqNumFlag
        89 | 91 | 96 => TypeCode::RawData,            // Signature, SecureData, RawData

        // Order entry / execution
        6 | 31 | 44 | 99 | 132 | 133 => TypeCode::Double, // AvgPx, LastPx, Price, StopPx, BidPx, OfferPx
        12 | 118 | 119 | 137 | 153 | 154 => TypeCode::Double, // Commission, NetMoney, SettlCurrAmt, MiscFeeAmt, AllocAvgPx, AllocNetMoney
        14 | 32 | 38 | 53 | 110 | 111 | 134 | 135 | 151 => TypeCode::Double, // CumQty, LastShares, OrderQty, Shares, MinQty, MaxFloor, BidSize, OfferSize, LeavesQty
        67 | 68 | 74 | 82 | 83 | 87 | 88 => TypeCode::Int64, // ListSeqNo, ListNoOrds, AvgPrxPrecision, NoRpts, RptSeq, AllocStatus, AllocRejCode
        102 | 103 | 157 | 169 => TypeCode::Int64,     // CxlRejReason, OrdRejReason, NumDaysInterest, StandInstDbType
        158 | 159 => TypeCode::Double,                // AccruedInterestRate, AccruedInterestAmt

        // Repeating groups
        73 | 78 | 124 | 136 => TypeCode::GroupCount,  // NoOrders, NoAllocs, NoExecs, NoMiscFees

        _ => TypeCode::String,
    }
}
