/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Session configuration.

use crate::authorizer::LogonAuthorizer;
use ferrofix_core::field::Field;
use ferrofix_core::types::{CompId, FixVersion};
use std::sync::Arc;
use std::time::Duration;

/// Default capacity of the sent-message replay buffer.
pub const DEFAULT_HISTORY_CAPACITY: usize = 1024;

/// Configuration for a FIX session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Local identity, SenderCompID (tag 49).
    pub sender_comp_id: CompId,
    /// Remote identity, TargetCompID (tag 56).
    pub target_comp_id: CompId,
    /// FIX version for BeginString (tag 8).
    pub version: FixVersion,
    /// Heartbeat interval (tag 108). The peer's Logon may renegotiate it.
    pub heartbeat_interval: Duration,
    /// Whether to send ResetSeqNumFlag=Y (tag 141) on Logon.
    pub reset_seq_num_on_logon: bool,
    /// Capacity of the replay buffer for resend requests.
    pub history_capacity: usize,
    /// How long to wait for the peer's Logon.
    pub logon_timeout: Duration,
    /// How long to wait for the peer's Logout confirmation.
    pub logout_timeout: Duration,
    /// Maximum inbound frame size in bytes.
    pub max_message_size: usize,
    /// Bound of the inbound application-message queue; once full, transport
    /// reads back-pressure until the reader catches up.
    pub inbound_queue: usize,
    /// Extra fields appended to the Logon body (venue credentials and the
    /// like).
    pub extra_logon_fields: Vec<Field>,
    /// Optional venue hook that contributes Logon fields at send time.
    pub logon_authorizer: Option<Arc<dyn LogonAuthorizer>>,
}

impl SessionConfig {
    /// Creates a configuration with the required identities and version.
    #[must_use]
    pub fn new(sender_comp_id: CompId, target_comp_id: CompId, version: FixVersion) -> Self {
        Self {
            sender_comp_id,
            target_comp_id,
            version,
            heartbeat_interval: Duration::from_secs(30),
            reset_seq_num_on_logon: false,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            logon_timeout: Duration::from_secs(10),
            logout_timeout: Duration::from_secs(10),
            max_message_size: 1024 * 1024,
            inbound_queue: 64,
            extra_logon_fields: Vec::new(),
            logon_authorizer: None,
        }
    }

    /// Sets the heartbeat interval.
    #[must_use]
    pub fn with_heartbeat_interval(mut self, interval: Duration) -> Self {
        self.heartbeat_interval = interval;
        self
    }

    /// Sets whether to reset sequence numbers on logon.
    #[must_use]
    pub const fn with_reset_seq_num_on_logon(mut self, reset: bool) -> Self {
        self.reset_seq_num_on_logon = reset;
        self
    }

    /// Sets the replay buffer capacity.
    #[must_use]
    pub const fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Sets the logon timeout.
    #[must_use]
    pub fn with_logon_timeout(mut self, timeout: Duration) -> Self {
        self.logon_timeout = timeout;
        self
    }

    /// Sets the logout timeout.
    #[must_use]
    pub fn with_logout_timeout(mut self, timeout: Duration) -> Self {
        self.logout_timeout = timeout;
        self
    }

    /// Sets the maximum inbound frame size.
    #[must_use]
    pub const fn with_max_message_size(mut self, size: usize) -> Self {
        self.max_message_size = size;
        self
    }

    /// Appends an extra Logon field.
    #[must_use]
    pub fn with_logon_field(mut self, field: Field) -> Self {
        self.extra_logon_fields.push(field);
        self
    }

    /// Installs a venue logon authorizer.
    #[must_use]
    pub fn with_logon_authorizer(mut self, authorizer: Arc<dyn LogonAuthorizer>) -> Self {
        self.logon_authorizer = Some(authorizer);
        self
    }

    /// Returns the heartbeat interval in whole seconds.
    #[must_use]
    pub fn heartbeat_interval_secs(&self) -> u64 {
        self.heartbeat_interval.as_secs()
    }
}

/// Builder for session configuration.
#[derive(Debug, Default)]
pub struct SessionConfigBuilder {
    sender_comp_id: Option<CompId>,
    target_comp_id: Option<CompId>,
    version: Option<FixVersion>,
    heartbeat_interval: Option<Duration>,
    reset_seq_num_on_logon: bool,
    history_capacity: Option<usize>,
}

impl SessionConfigBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sender CompID.
    #[must_use]
    pub fn sender_comp_id(mut self, id: CompId) -> Self {
        self.sender_comp_id = Some(id);
        self
    }

    /// Sets the target CompID.
    #[must_use]
    pub fn target_comp_id(mut self, id: CompId) -> Self {
        self.target_comp_id = Some(id);
        self
    }

    /// Sets the FIX version.
    #[must_use]
    pub const fn version(mut self, version: FixVersion) -> Self {
        self.version = Some(version);
        self
    }

    /// Sets the heartbeat interval.
    #[must_use]
    pub fn heartbeat_interval(mut self, interval: Duration) -> Self {
        self.heartbeat_interval = Some(interval);
        self
    }

    /// Sets whether to reset sequence numbers on logon.
    #[must_use]
    pub const fn reset_seq_num_on_logon(mut self, reset: bool) -> Self {
        self.reset_seq_num_on_logon = reset;
        self
    }

    /// Sets the replay buffer capacity.
    #[must_use]
    pub const fn history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = Some(capacity);
        self
    }

    /// Builds the configuration.
    ///
    /// # Panics
    /// Panics if the identities are not set.
    #[must_use]
    pub fn build(self) -> SessionConfig {
        let sender = self.sender_comp_id.expect("sender_comp_id is required");
        let target = self.target_comp_id.expect("target_comp_id is required");
        let version = self.version.unwrap_or(FixVersion::Fix44);

        let mut config = SessionConfig::new(sender, target, version);
        if let Some(interval) = self.heartbeat_interval {
            config.heartbeat_interval = interval;
        }
        if let Some(capacity) = self.history_capacity {
            config.history_capacity = capacity;
        }
        config.reset_seq_num_on_logon = self.reset_seq_num_on_logon;
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comp(s: &str) -> CompId {
        CompId::new(s).unwrap()
    }

    #[test]
    fn test_session_config_defaults() {
        let config = SessionConfig::new(comp("CLIENT"), comp("VENUE"), FixVersion::Fix44);
        assert_eq!(config.heartbeat_interval, Duration::from_secs(30));
        assert_eq!(config.history_capacity, DEFAULT_HISTORY_CAPACITY);
        assert!(!config.reset_seq_num_on_logon);
        assert!(config.extra_logon_fields.is_empty());
        assert!(config.logon_authorizer.is_none());
    }

    #[test]
    fn test_session_config_fluent() {
        let config = SessionConfig::new(comp("CLIENT"), comp("VENUE"), FixVersion::Fix44)
            .with_heartbeat_interval(Duration::from_secs(5))
            .with_reset_seq_num_on_logon(true)
            .with_history_capacity(16)
            .with_logon_field(Field::str(553, "user"));

        assert_eq!(config.heartbeat_interval_secs(), 5);
        assert!(config.reset_seq_num_on_logon);
        assert_eq!(config.history_capacity, 16);
        assert_eq!(config.extra_logon_fields.len(), 1);
    }

    #[test]
    fn test_session_config_builder() {
        let config = SessionConfigBuilder::new()
            .sender_comp_id(comp("CLIENT"))
            .target_comp_id(comp("VENUE"))
            .version(FixVersion::Fix42)
            .heartbeat_interval(Duration::from_secs(60))
            .reset_seq_num_on_logon(true)
            .history_capacity(8)
            .build();

        assert_eq!(config.version, FixVersion::Fix42);
        assert_eq!(config.heartbeat_interval, Duration::from_secs(60));
        assert!(config.reset_seq_num_on_logon);
        assert_eq!(config.history_capacity, 8);
    }
}
