/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # FerroFix Core
//!
//! Core types and error definitions for the FerroFix FIX protocol engine.
//!
//! This crate provides the fundamental building blocks used across all FerroFix crates:
//! - **Error types**: Unified error handling with `thiserror`
//! - **Field types**: `FieldRef` and the `TypedValue` decoded-value union
//! - **Core types**: `SeqNum`, `Timestamp`, `CompId`
//!
//! ## Zero-Copy Design
//!
//! Parsing works over borrowed views (`FieldRef`) while decoded outputs hold
//! their normalized bytes in a shared [`bytes::Bytes`] buffer; string values
//! are cheap sub-slices of that buffer, so they remain valid for exactly as
//! long as the decoded output that produced them.

pub mod error;
pub mod field;
pub mod types;

pub use error::{DecodeError, DictionaryError, FixError, Result};
pub use field::{FieldRef, TypedValue};
pub use types::{CompId, SeqNum, Timestamp};
