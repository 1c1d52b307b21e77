/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # FerroFix Examples
//!
//! Runnable demonstrators for the FerroFix engine. See the `examples/`
//! directory:
//!
//! - `session_drill`: two in-process controllers exchanging the session
//!   repertoire scene by scene
//! - `decode_tool`: decodes `|`-delimited FIX lines from argv or stdin
//! - `fix44_acceptor`: a tokio TCP acceptor driving one controller per
//!   connection
