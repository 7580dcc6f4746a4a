/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Reconnect loop with backoff and lifecycle events.

use ferrofix_core::error::{FixError, Result, SessionError};
use ferrofix_core::registry::FieldRegistry;
use ferrofix_session::{DisconnectReason, SessionConfig, SessionEvent, SessionHandle};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpStream, lookup_host};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Exponential backoff between reconnect attempts.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Delay before the first retry.
    pub initial: Duration,
    /// Upper bound on the delay.
    pub max: Duration,
    /// Growth factor per failed attempt.
    pub multiplier: f64,
}

impl RetryPolicy {
    /// Returns the delay before retry number `attempt` (1-based).
    #[must_use]
    pub fn delay(&self, attempt: u32) -> Duration {
        let exp = self.multiplier.powi(attempt.saturating_sub(1) as i32);
        self.initial.mul_f64(exp).min(self.max)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial: Duration::from_millis(500),
            max: Duration::from_secs(30),
            multiplier: 2.0,
        }
    }
}

/// Connector configuration: where to connect and how to retry.
#[derive(Debug, Clone)]
pub struct ConnectorConfig {
    /// Venue hostname, re-resolved on every attempt.
    pub host: String,
    /// Venue port.
    pub port: u16,
    /// Backoff policy between attempts.
    pub retry: RetryPolicy,
    /// Consecutive failed connection attempts tolerated before giving up;
    /// `None` retries forever. The counter resets after a successful logon.
    pub max_attempts: Option<u32>,
}

impl ConnectorConfig {
    /// Creates a connector configuration with the default retry policy.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            retry: RetryPolicy::default(),
            max_attempts: None,
        }
    }

    /// Sets the retry policy.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Bounds consecutive failed connection attempts.
    #[must_use]
    pub const fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = Some(attempts);
        self
    }
}

/// Connector lifecycle notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectorEvent {
    /// A connection attempt is starting.
    Attempting {
        /// 1-based attempt counter; resets after a successful logon.
        attempt: u32,
    },
    /// Address resolution is starting.
    Resolving,
    /// Address resolution produced a fresh endpoint.
    ResolvedAddress(SocketAddr),
    /// A session is up: logon completed.
    Connected,
    /// The current session ended.
    Disconnected {
        /// Why it ended.
        reason: DisconnectReason,
    },
    /// The attempt bound was exhausted; the connector stopped retrying.
    GaveUp,
}

/// Reconnecting wrapper around the session engine.
///
/// [`PersistentConnector::run`] delivers a fresh [`SessionHandle`] on every
/// successful logon and keeps retrying on any non-user disconnect. The user
/// closing a session handle ends the loop.
#[derive(Debug)]
pub struct PersistentConnector {
    config: ConnectorConfig,
    session_config: SessionConfig,
    registry: Arc<FieldRegistry>,
    events: Option<mpsc::UnboundedSender<ConnectorEvent>>,
    session_events: Option<mpsc::UnboundedSender<SessionEvent>>,
}

impl PersistentConnector {
    /// Creates a connector for the given endpoint and session settings.
    #[must_use]
    pub fn new(
        config: ConnectorConfig,
        session_config: SessionConfig,
        registry: Arc<FieldRegistry>,
    ) -> Self {
        Self {
            config,
            session_config,
            registry,
            events: None,
            session_events: None,
        }
    }

    /// Subscribes to connector lifecycle events.
    #[must_use]
    pub fn with_events(mut self, events: mpsc::UnboundedSender<ConnectorEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// Forwards per-session events to a subscriber.
    #[must_use]
    pub fn with_session_events(
        mut self,
        events: mpsc::UnboundedSender<SessionEvent>,
    ) -> Self {
        self.session_events = Some(events);
        self
    }

    fn emit(&self, event: ConnectorEvent) {
        if let Some(tx) = &self.events {
            let _ = tx.send(event);
        }
    }

    /// Runs the reconnect loop, sending each established session's handle
    /// through `sessions`.
    ///
    /// Returns `Ok(())` when the user closes a session or drops the
    /// `sessions` receiver. Connection and logon failures are retried with
    /// backoff until `max_attempts` consecutive failures, at which point the
    /// connector emits [`ConnectorEvent::GaveUp`] and returns the error.
    pub async fn run(self, sessions: mpsc::Sender<SessionHandle>) -> Result<()> {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            self.emit(ConnectorEvent::Attempting { attempt });

            let (handle, mut session_events) = match self.connect_once().await {
                Ok(pair) => pair,
                Err(err) => {
                    self.emit(ConnectorEvent::Disconnected {
                        reason: failure_reason(&err),
                    });
                    if let Some(max) = self.config.max_attempts
                        && attempt >= max
                    {
                        warn!(error = %err, attempt, "attempt bound exhausted, giving up");
                        self.emit(ConnectorEvent::GaveUp);
                        return Err(SessionError::Connection(format!(
                            "gave up after {} connection attempts: {}",
                            attempt, err
                        ))
                        .into());
                    }
                    let delay = self.config.retry.delay(attempt);
                    warn!(error = %err, attempt, ?delay, "connect failed, backing off");
                    tokio::time::sleep(delay).await;
                    continue;
                }
            };

            attempt = 0;
            self.emit(ConnectorEvent::Connected);
            if sessions.send(handle).await.is_err() {
                // Consumer is gone; nothing left to reconnect for.
                return Ok(());
            }

            let reason = loop {
                match session_events.recv().await {
                    Some(SessionEvent::Disconnected { reason }) => break reason,
                    Some(event) => {
                        if let Some(tx) = &self.session_events {
                            let _ = tx.send(event);
                        }
                    }
                    None => {
                        break DisconnectReason::Transport(
                            "session event channel closed".to_string(),
                        );
                    }
                }
            };
            info!(%reason, "session ended");
            self.emit(ConnectorEvent::Disconnected {
                reason: reason.clone(),
            });

            if reason.is_user_initiated() {
                return Ok(());
            }
            tokio::time::sleep(self.config.retry.delay(1)).await;
        }
    }

    /// Resolves the venue address and establishes one session.
    async fn connect_once(
        &self,
    ) -> Result<(SessionHandle, mpsc::UnboundedReceiver<SessionEvent>)> {
        self.emit(ConnectorEvent::Resolving);
        let addr = self.resolve().await?;
        self.emit(ConnectorEvent::ResolvedAddress(addr));

        let stream = TcpStream::connect(addr)
            .await
            .map_err(ferrofix_core::error::TransportError::from)?;
        stream
            .set_nodelay(true)
            .map_err(ferrofix_core::error::TransportError::from)?;

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let handle = ferrofix_session::connect(
            stream,
            self.session_config.clone(),
            Arc::clone(&self.registry),
            Some(events_tx),
        )
        .await?;
        Ok((handle, events_rx))
    }

    /// Resolves the configured host fresh, so DNS failover is picked up on
    /// every attempt.
    async fn resolve(&self) -> Result<SocketAddr> {
        let mut addrs = lookup_host((self.config.host.as_str(), self.config.port))
            .await
            .map_err(ferrofix_core::error::TransportError::from)?;
        addrs.next().ok_or_else(|| {
            SessionError::Connection(format!("no address for {}", self.config.host)).into()
        })
    }
}

/// Maps a connect failure to the reason reported to subscribers.
fn failure_reason(err: &FixError) -> DisconnectReason {
    match err {
        FixError::Transport(transport) => DisconnectReason::Transport(transport.to_string()),
        FixError::Session(SessionError::LogonRejected { reason }) => {
            DisconnectReason::Protocol(format!("logon rejected: {}", reason))
        }
        FixError::Session(SessionError::Timeout { .. }) => DisconnectReason::LogonTimeout,
        other => DisconnectReason::Protocol(other.to_string()),
    }
}
