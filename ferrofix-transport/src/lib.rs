/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # FerroFix Transport
//!
//! Network transport layer for the FerroFix engine: a tokio codec that
//! frames FIX messages over a byte stream using the declared BodyLength.
//! The session controller stays I/O-free; this crate is the collaborator
//! that connects it to a real socket.

pub mod codec;

pub use codec::{CodecError, FixCodec};
