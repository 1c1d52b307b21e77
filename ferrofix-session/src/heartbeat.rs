/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Heartbeat and TestRequest timing.
//!
//! The controller builds heartbeats and test requests but never owns a
//! clock; timing is the caller's responsibility. [`HeartbeatManager`] is the
//! caller-side helper: it tracks send/receive times against the configured
//! interval and says when a Heartbeat or TestRequest is due and when the
//! peer has gone quiet for too long.

use std::time::{Duration, Instant};

/// Tracks heartbeat timing for one session.
#[derive(Debug)]
pub struct HeartbeatManager {
    /// Heartbeat interval.
    interval: Duration,
    /// Time of last message sent.
    last_sent: Instant,
    /// Time of last message received.
    last_received: Instant,
    /// Pending TestRequest ID, if any.
    test_request_pending: Option<String>,
    /// Time when the TestRequest was sent.
    test_request_sent_at: Option<Instant>,
}

impl HeartbeatManager {
    /// Creates a manager with the specified interval.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        let now = Instant::now();
        Self {
            interval,
            last_sent: now,
            last_received: now,
            test_request_pending: None,
            test_request_sent_at: None,
        }
    }

    /// Records that a message was sent.
    #[inline]
    pub fn on_message_sent(&mut self) {
        self.last_sent = Instant::now();
    }

    /// Records that a message was received.
    ///
    /// A Heartbeat echoing the pending TestReqID clears the pending request.
    ///
    /// # Arguments
    /// * `is_heartbeat` - Whether the received message is a Heartbeat
    /// * `test_req_id` - The TestReqID carried by the Heartbeat, if any
    pub fn on_message_received(&mut self, is_heartbeat: bool, test_req_id: Option<&str>) {
        self.last_received = Instant::now();

        if is_heartbeat
            && let (Some(pending), Some(received)) = (&self.test_request_pending, test_req_id)
            && pending == received
        {
            self.test_request_pending = None;
            self.test_request_sent_at = None;
        }
    }

    /// True when nothing was sent within the interval.
    #[must_use]
    pub fn should_send_heartbeat(&self) -> bool {
        self.last_sent.elapsed() >= self.interval
    }

    /// True when nothing was received within the interval plus a one second
    /// grace period and no TestRequest is already pending.
    #[must_use]
    pub fn should_send_test_request(&self) -> bool {
        if self.test_request_pending.is_some() {
            return false;
        }

        let grace = Duration::from_secs(1);
        self.last_received.elapsed() >= self.interval + grace
    }

    /// True when a TestRequest went unanswered for a full interval.
    #[must_use]
    pub fn is_timed_out(&self) -> bool {
        self.test_request_sent_at
            .is_some_and(|sent_at| sent_at.elapsed() >= self.interval)
    }

    /// Records that a TestRequest was sent.
    pub fn on_test_request_sent(&mut self, test_req_id: String) {
        self.test_request_pending = Some(test_req_id);
        self.test_request_sent_at = Some(Instant::now());
        self.last_sent = Instant::now();
    }

    /// Returns the pending TestRequest ID, if any.
    #[must_use]
    pub fn pending_test_request(&self) -> Option<&str> {
        self.test_request_pending.as_deref()
    }

    /// Returns the heartbeat interval.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_heartbeat_manager_new() {
        let mgr = HeartbeatManager::new(Duration::from_secs(30));
        assert_eq!(mgr.interval(), Duration::from_secs(30));
        assert!(mgr.pending_test_request().is_none());
        assert!(!mgr.is_timed_out());
    }

    #[test]
    fn test_should_send_heartbeat() {
        let mut mgr = HeartbeatManager::new(Duration::from_millis(10));
        assert!(!mgr.should_send_heartbeat());

        sleep(Duration::from_millis(15));
        assert!(mgr.should_send_heartbeat());

        mgr.on_message_sent();
        assert!(!mgr.should_send_heartbeat());
    }

    #[test]
    fn test_test_request_pending_cleared_by_echo() {
        let mut mgr = HeartbeatManager::new(Duration::from_secs(30));

        mgr.on_test_request_sent("PING-1".to_string());
        assert_eq!(mgr.pending_test_request(), Some("PING-1"));
        assert!(!mgr.should_send_test_request());

        mgr.on_message_received(true, Some("OTHER"));
        assert_eq!(mgr.pending_test_request(), Some("PING-1"));

        mgr.on_message_received(true, Some("PING-1"));
        assert!(mgr.pending_test_request().is_none());
    }

    #[test]
    fn test_timeout_after_unanswered_test_request() {
        let mut mgr = HeartbeatManager::new(Duration::from_millis(5));
        mgr.on_test_request_sent("PING-2".to_string());
        sleep(Duration::from_millis(10));
        assert!(mgr.is_timed_out());
    }
}
