/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Session configuration.
//!
//! This module provides the identity and session defaults for one
//! controller: CompIDs, role, BeginString, and heartbeat interval.

use ferrofix_core::CompId;
use std::time::Duration;

/// Endpoint role in a FIX session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionRole {
    /// Dials out and sends the initial Logon.
    Initiator,
    /// Listens and responds to the counterparty's Logon.
    Acceptor,
}

/// Configuration for a FIX session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Sender CompID (tag 49 in outbound messages).
    pub sender_comp_id: CompId,
    /// Target CompID (tag 56 in outbound messages).
    pub target_comp_id: CompId,
    /// Endpoint role.
    pub role: SessionRole,
    /// FIX version BeginString (e.g., "FIX.4.4").
    pub begin_string: String,
    /// Heartbeat interval (tag 108 in Logon).
    pub heartbeat_interval: Duration,
}

impl SessionConfig {
    /// Creates a session configuration with the usual defaults:
    /// BeginString `FIX.4.4` and a 30 second heartbeat interval.
    ///
    /// # Arguments
    /// * `sender_comp_id` - The sender CompID
    /// * `target_comp_id` - The target CompID
    /// * `role` - Initiator or acceptor behavior
    #[must_use]
    pub fn new(sender_comp_id: CompId, target_comp_id: CompId, role: SessionRole) -> Self {
        Self {
            sender_comp_id,
            target_comp_id,
            role,
            begin_string: "FIX.4.4".to_string(),
            heartbeat_interval: Duration::from_secs(30),
        }
    }

    /// Sets the BeginString.
    #[must_use]
    pub fn with_begin_string(mut self, begin_string: impl Into<String>) -> Self {
        self.begin_string = begin_string.into();
        self
    }

    /// Sets the heartbeat interval.
    #[must_use]
    pub fn with_heartbeat_interval(mut self, interval: Duration) -> Self {
        self.heartbeat_interval = interval;
        self
    }

    /// Returns the heartbeat interval in whole seconds.
    #[must_use]
    pub fn heartbeat_interval_secs(&self) -> u64 {
        self.heartbeat_interval.as_secs()
    }
}
