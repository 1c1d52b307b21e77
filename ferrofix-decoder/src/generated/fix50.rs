/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Tag → type-code table for FIX 5.0 (including SP1/SP2, which route to
//! this table through ApplVerID). Generated; do not edit.

use crate::typed::TypeCode;

/// BeginString used to select the FIX 5.0 application dictionary.
pub const BEGIN_STRING: &str = "FIX.5.0";

/// Resolves a tag to its FIX 5.0 type code.
#[must_use]
pub const fn type_code_for(tag: u32) -> TypeCode {
    match tag {
        // Session layer (carried by the FIXT transport header)
        7 | 16 | 34 | 36 | 369 => TypeCode::Int64,    // BeginSeqNo, EndSeqNo, MsgSeqNum, NewSeqNo, LastMsgSeqNumProcessed
        98 | 108 | 371 | 373 => TypeCode::Int64,      // EncryptMethod, HeartBtInt, RefTagID, SessionRejectReason
        43 | 97 | 123 | 141 | 464 => TypeCode::Bool,  // PossDupFlag, PossResend, GapFillFlag, ResetSeqNumFlag, TestMessageIndicator

        // Length-prefixed data
        9 | 90 | 93 | 95 | 212 | 348 | 350 | 352 | 354 | 356 | 358 | 360 | 362 | 364 | 445 => {
            TypeCode::Int64
        }
        89 | 91 | 96 | 213 | 349 | 351 | 353 | 355 | 357 | 359 | 361 | 363 | 365 | 446 => {
            TypeCode::RawData
        }

        // Flags
        114 | 121 | 208 | 325 | 377 | 570 | 650 | 1057 => TypeCode::Bool, // LocateReqd, ForexReq, NotifyBrokerOfCredit, UnsolicitedIndicator, SolicitedFlag, PreviouslyReported, LegalConfirm, AggressorIndicator

        // Prices and rates
        6 | 31 | 44 | 99 | 132 | 133 | 140 | 188 | 189 | 190 | 191 | 194 | 195 | 202 | 270
        | 316 | 332 | 333 | 366 | 631 | 640 | 645 | 646 | 662 | 669 | 681 | 684 | 730 | 734
        | 810 | 839 | 845 | 1025 | 1095 => TypeCode::Double,
        // Amounts
        12 | 118 | 119 | 137 | 154 | 158 | 159 | 238 | 239 | 381 | 451 | 651 => TypeCode::Double,
        // Quantities
        14 | 32 | 38 | 53 | 110 | 111 | 134 | 135 | 151 | 152 | 192 | 210 | 271 | 330 | 387
        | 687 | 704 | 705 | 708 | 751 | 1056 => TypeCode::Double,

        // Counters and enumerated ints
        67 | 68 | 74 | 82 | 83 | 87 | 88 | 102 | 103 | 157 | 169 | 290 | 315 | 346 | 368 | 378
        | 423 | 452 | 460 | 581 | 585 | 626 | 638 | 718 | 803 | 854 => TypeCode::Int64,

        // Repeating groups
        73 | 78 | 124 | 136 | 146 | 199 | 215 | 267 | 268 | 295 | 296 | 382 | 384 | 386 | 398
        | 420 | 428 | 453 | 454 | 457 | 473 | 539 | 552 | 555 | 576 | 580 | 711 | 753 | 768
        | 802 | 804 | 864 | 870 | 1116 | 1310 => TypeCode::GroupCount,

        _ => TypeCode::String,
    }
}
