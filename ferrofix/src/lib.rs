/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # FerroFix
//!
//! A client-side FIX protocol engine for Rust, versions 4.x and 5.x (FIXT).
//!
//! FerroFix layers a sequenced, heartbeated FIX session on top of any
//! byte-duplex transport and exposes an application message pipe: decoded
//! inbound messages out, typed outbound messages in. Administrative traffic
//! (logon, keepalive, gap recovery, sequence resets, logout) is handled
//! transparently.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use ferrofix::prelude::*;
//! use std::sync::Arc;
//!
//! let registry = Arc::new(FieldRegistry::standard());
//! let config = SessionConfig::new(
//!     CompId::new("CLIENT").unwrap(),
//!     CompId::new("VENUE").unwrap(),
//!     FixVersion::Fix44,
//! );
//!
//! let stream = tokio::net::TcpStream::connect("fix.example.com:9876").await?;
//! let mut session = ferrofix::session::connect(stream, config, registry, None).await?;
//!
//! session.send(Message::new(MsgType::NewOrderSingle)
//!     .with(Field::str(11, "ORD-1"))
//!     .with(Field::str(55, "BTC-USD")))
//!     .await?;
//! while let Some(inbound) = session.recv().await {
//!     println!("{:?}", inbound.message);
//! }
//! ```
//!
//! ## Crate organization
//!
//! - [`core`]: scalar types, code sets, field registry, message model, errors
//! - [`codec`]: tag-value encoding/decoding, checksum, stream framing
//! - [`session`]: the session engine, configuration, timers, replay history
//! - [`connect`]: persistent reconnecting connector

pub mod core {
    //! Core types, field registry, and message model.
    pub use ferrofix_core::*;
}

pub mod codec {
    //! Tag-value wire codec and stream framing.
    pub use ferrofix_codec::*;
}

pub mod session {
    //! Session layer: engine, configuration, history, events.
    pub use ferrofix_session::*;
}

pub mod connect {
    //! Persistent reconnecting connector.
    pub use ferrofix_connect::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use ferrofix_codec::{FrameCodec, decode_message, encode_message};
    pub use ferrofix_connect::{ConnectorConfig, ConnectorEvent, PersistentConnector, RetryPolicy};
    pub use ferrofix_core::{
        CompId, ConfigError, DecodeError, EncodeError, Field, FieldDescriptor, FieldRegistry,
        FieldValue, FixError, FixVersion, Message, MsgType, OrdStatus, OrdType, Result, SeqNum,
        SessionError, Side, TimeInForce, TransportError, UtcTimestamp,
    };
    pub use ferrofix_session::{
        DisconnectReason, Inbound, LogonAuthorizer, SessionConfig, SessionEvent, SessionHandle,
        SessionPhase, connect,
    };
}
