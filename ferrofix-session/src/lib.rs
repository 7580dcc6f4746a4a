/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # FerroFix Session
//!
//! FIX session layer for the FerroFix engine.
//!
//! This crate provides:
//! - **Session engine**: a single-task event loop layering logon, sequence
//!   numbering, heartbeat/test-request keepalive, gap detection with resend
//!   requests, and sequence resets on top of a byte-duplex transport
//! - **Configuration**: `SessionConfig` with fluent setters and builder
//! - **Timers**: heartbeat and receive-watchdog deadlines
//! - **History**: bounded replay buffer for satisfying resend requests
//! - **Admin builders**: pure constructors for the administrative messages
//! - **Events**: session lifecycle notifications
//! - **Venue seam**: the [`LogonAuthorizer`] hook for adapter logon fields
//!
//! The engine exposes a message pipe: a lazy sequence of inbound application
//! messages and a sink for outbound application messages. Administrative
//! traffic is absorbed.

pub mod admin;
pub mod authorizer;
pub mod config;
pub mod engine;
pub mod events;
pub mod history;
pub mod state;
pub mod timers;

pub use authorizer::LogonAuthorizer;
pub use config::{SessionConfig, SessionConfigBuilder};
pub use engine::{Inbound, SessionHandle, connect};
pub use events::{DisconnectReason, SessionEvent};
pub use history::{ReplayBuffer, SentEntry};
pub use state::SessionPhase;
pub use timers::{SessionTimers, WatchdogAction};
