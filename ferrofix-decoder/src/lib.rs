/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # FerroFix Decoder
//!
//! Dictionary-driven FIX message decoding for the FerroFix engine.
//!
//! This crate turns raw FIX frames into structured, typed, named, and
//! structurally validated representations:
//!
//! - **Typed values**: per-type decode registry with user overrides
//! - **Version routing**: BeginString / ApplVerID selection of dictionaries
//!   and generated tag → type tables
//! - **Structural validation**: required members and repeating-group counts
//! - **Two output shapes**: ordered field lists and tag-indexed objects

pub mod decoder;
pub mod generated;
pub mod typed;
pub mod validate;
pub mod version;

pub use decoder::{DecodedField, DecodedMessage, DecodedObject, FixDecoder, ObjectLookup, ObjectNode};
pub use typed::{TypeCode, TypeRegistry, ValueDecoder};
pub use validate::validate_structure;
pub use version::{VersionSelection, appl_ver_id_to_begin_string, select_version};
