/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # FerroFix Tag-Value
//!
//! FIX tag=value wire handling for the FerroFix engine.
//!
//! This crate provides the byte-level building blocks shared by the decoder
//! and the session controller:
//!
//! - **Checksum**: modulo-256 checksum calculation and trailer formatting
//! - **Framing**: streaming extraction of complete frames plus the
//!   BodyLength/CheckSum admission checks
//! - **Tokenizing**: lenient splitting of a frame into `(tag, value)` pairs
//! - **Encoding**: message building with automatic tags 8, 9, and 10
//! - **Tag keys**: allocation-free word-sized keys for dispatch maps

pub mod checksum;
pub mod encoder;
pub mod frame;
pub mod msg_key;
pub mod tokenizer;

pub use checksum::{calculate_checksum, format_checksum, parse_checksum};
pub use encoder::Encoder;
pub use frame::{FrameSplitter, SOH, normalize, validate_body_length, validate_checksum};
pub use msg_key::{MsgTypeKey, TagKey};
pub use tokenizer::{FieldVec, parse_tag, split_tags};
