/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # FerroFix Core
//!
//! Core types for the FerroFix FIX protocol engine.
//!
//! This crate provides the building blocks shared by every FerroFix crate:
//! - **Error types**: Unified error hierarchy with `thiserror`
//! - **Scalar types**: `UtcTimestamp`, `UtcDate`, `TzTimeOnly`, `FixVersion`,
//!   `SeqNum`, `CompId`
//! - **Code sets**: Full FIX 4.4 enumerations (`Side`, `OrdType`, `OrdStatus`, ...)
//! - **Field model**: `Field`, `FieldValue`, and the extensible `FieldRegistry`
//! - **Message model**: `MsgType` and the order-preserving `Message`
//!
//! ## Field universe
//!
//! Field values range over a closed tagged union covering the FIX scalar
//! types plus an `Unknown` arm that carries raw bytes for tags the registry
//! does not know. Unknown-but-valid tags always flow through decoding intact.

pub mod enums;
pub mod error;
pub mod field;
pub mod groups;
pub mod message;
pub mod registry;
pub mod tags;
pub mod types;

pub use enums::{
    EncryptMethod, ExecType, MDEntryType, OrdStatus, OrdType, SessionRejectReason, Side,
    SubscriptionRequestType, TimeInForce,
};
pub use error::{
    ConfigError, DecodeError, EncodeError, FixError, Result, SessionError, TransportError,
};
pub use field::{Field, FieldValue};
pub use groups::{GroupSpec, group_spec, split_blocks};
pub use message::{GroupView, Message, MsgType};
pub use registry::{FieldCodec, FieldDescriptor, FieldRegistry, ValueKind, parse_raw};
pub use types::{CompId, FixVersion, SeqNum, TzOffset, TzTimeOnly, UtcDate, UtcTimestamp};
