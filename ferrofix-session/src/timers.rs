/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Heartbeat and receive-watchdog timing.
//!
//! Two deadlines drive the session's keepalive, both recomputed from the
//! last send/receive instants so they rearm on every message:
//!
//! - *heartbeat*: `last_sent + interval` — on expiry the engine sends a
//!   Heartbeat.
//! - *watchdog*: `last_received + 1.5 × interval` while no TestRequest is
//!   outstanding (on expiry send a TestRequest), then
//!   `last_received + 2.5 × interval` (on expiry disconnect).
//!
//! The engine awaits `sleep_until` on these deadlines; there is no polling.

use std::time::Duration;
use tokio::time::Instant;

/// What the engine must do when the watchdog deadline fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchdogAction {
    /// Nothing received for 1.5 x interval: probe with a TestRequest.
    SendTestRequest,
    /// Still nothing at 2.5 x interval: the peer is gone.
    Disconnect,
}

/// Keepalive clock for one session.
#[derive(Debug)]
pub struct SessionTimers {
    interval: Duration,
    last_sent: Instant,
    last_received: Instant,
    pending_test_request: Option<String>,
    test_req_counter: u64,
}

impl SessionTimers {
    /// Creates timers with the given heartbeat interval, both clocks
    /// starting now.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        let now = Instant::now();
        Self {
            interval,
            last_sent: now,
            last_received: now,
            pending_test_request: None,
            test_req_counter: 0,
        }
    }

    /// Replaces the interval with the value negotiated in the peer's Logon.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Returns the heartbeat interval.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Records that a message was sent.
    #[inline]
    pub fn on_sent(&mut self) {
        self.last_sent = Instant::now();
    }

    /// Records that a message was received.
    ///
    /// A Heartbeat whose TestReqID matches the outstanding TestRequest
    /// clears it.
    pub fn on_received(&mut self, heartbeat_test_req_id: Option<&str>) {
        self.last_received = Instant::now();
        if let (Some(pending), Some(received)) =
            (&self.pending_test_request, heartbeat_test_req_id)
            && pending == received
        {
            self.pending_test_request = None;
        }
    }

    /// Records that a TestRequest was sent.
    pub fn on_test_request_sent(&mut self, test_req_id: String) {
        self.pending_test_request = Some(test_req_id);
        self.last_sent = Instant::now();
    }

    /// Returns the outstanding TestReqID, if any.
    #[must_use]
    pub fn pending_test_request(&self) -> Option<&str> {
        self.pending_test_request.as_deref()
    }

    /// Deadline after which a Heartbeat must be sent.
    #[must_use]
    pub fn heartbeat_deadline(&self) -> Instant {
        self.last_sent + self.interval
    }

    /// Deadline after which the watchdog fires: 1.5 x interval of receive
    /// silence normally, 2.5 x once a TestRequest is outstanding.
    #[must_use]
    pub fn watchdog_deadline(&self) -> Instant {
        let factor = if self.pending_test_request.is_some() {
            2.5
        } else {
            1.5
        };
        self.last_received + self.interval.mul_f64(factor)
    }

    /// Returns what to do now that the watchdog deadline has passed.
    #[must_use]
    pub fn watchdog_action(&self) -> WatchdogAction {
        if self.pending_test_request.is_some() {
            WatchdogAction::Disconnect
        } else {
            WatchdogAction::SendTestRequest
        }
    }

    /// Generates a unique TestReqID for this session.
    pub fn next_test_req_id(&mut self) -> String {
        self.test_req_counter += 1;
        format!("TEST{}", self.test_req_counter)
    }

    /// Resets both clocks and clears any outstanding TestRequest.
    pub fn reset(&mut self) {
        let now = Instant::now();
        self.last_sent = now;
        self.last_received = now;
        self.pending_test_request = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_timers() {
        let timers = SessionTimers::new(Duration::from_secs(30));
        assert_eq!(timers.interval(), Duration::from_secs(30));
        assert!(timers.pending_test_request().is_none());
        assert_eq!(timers.watchdog_action(), WatchdogAction::SendTestRequest);
    }

    #[test]
    fn test_deadline_arithmetic() {
        let timers = SessionTimers::new(Duration::from_secs(10));
        let hb = timers.heartbeat_deadline();
        let wd = timers.watchdog_deadline();
        // Watchdog sits at 1.5x the interval, heartbeat at 1.0x.
        assert_eq!(wd - hb, Duration::from_secs(5));
    }

    #[test]
    fn test_watchdog_extends_when_test_request_outstanding() {
        let mut timers = SessionTimers::new(Duration::from_secs(10));
        let before = timers.watchdog_deadline();
        timers.on_test_request_sent("TEST1".to_string());
        let after = timers.watchdog_deadline();
        assert_eq!(after - before, Duration::from_secs(10));
        assert_eq!(timers.watchdog_action(), WatchdogAction::Disconnect);
    }

    #[test]
    fn test_matching_heartbeat_clears_pending() {
        let mut timers = SessionTimers::new(Duration::from_secs(10));
        timers.on_test_request_sent("TEST1".to_string());
        assert_eq!(timers.pending_test_request(), Some("TEST1"));

        timers.on_received(Some("TEST0"));
        assert_eq!(timers.pending_test_request(), Some("TEST1"));

        timers.on_received(Some("TEST1"));
        assert!(timers.pending_test_request().is_none());
    }

    #[test]
    fn test_test_req_ids_unique() {
        let mut timers = SessionTimers::new(Duration::from_secs(1));
        let a = timers.next_test_req_id();
        let b = timers.next_test_req_id();
        assert_ne!(a, b);
        assert!(a.starts_with("TEST"));
    }

    #[test]
    fn test_reset() {
        let mut timers = SessionTimers::new(Duration::from_secs(10));
        timers.on_test_request_sent("TEST1".to_string());
        timers.reset();
        assert!(timers.pending_test_request().is_none());
    }
}
