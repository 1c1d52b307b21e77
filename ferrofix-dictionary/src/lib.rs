/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # FerroFix Dictionary
//!
//! FIX specification parsing and dictionary management for the FerroFix engine.
//!
//! This crate provides:
//! - **Schema definitions**: Field, message, and component member trees
//! - **Dictionary parsing**: QuickFIX XML format loader
//! - **Dictionary sets**: Directory loading with BeginString lookup

pub mod loader;
pub mod schema;

pub use loader::DictionarySet;
pub use schema::{Dictionary, FieldDef, FieldEnum, Member, MemberKind, MessageDef, MsgCat};
