/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # FerroFix Connect
//!
//! Persistent connector for the FerroFix FIX engine.
//!
//! Wraps [`ferrofix_session::connect`] in a reconnect loop: on any
//! disconnect the user did not ask for, it waits out an exponential backoff,
//! re-resolves the venue address, and establishes a fresh session. Lifecycle
//! events go to an optional subscriber.

pub mod connector;

pub use connector::{ConnectorConfig, ConnectorEvent, PersistentConnector, RetryPolicy};
