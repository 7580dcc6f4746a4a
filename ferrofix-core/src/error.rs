/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Error types for the FerroFix FIX protocol engine.
//!
//! This module provides a unified error hierarchy using `thiserror` for typed,
//! domain-specific errors across all FerroFix operations.
//!
//! Propagation policy: decode errors that name a referent tag become outbound
//! `Reject` (35=3) messages; header-level failures terminate the session;
//! transport errors are always terminal for the session; configuration errors
//! are raised at startup before any session exists.

use thiserror::Error;

/// Result type alias using [`FixError`] as the error type.
pub type Result<T> = std::result::Result<T, FixError>;

/// Top-level error type for all FerroFix operations.
#[derive(Debug, Error)]
pub enum FixError {
    /// Error during message decoding.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Error during message encoding.
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    /// Error in session layer operations.
    #[error("session error: {0}")]
    Session(#[from] SessionError),

    /// Error in the byte transport below the session.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Startup configuration error.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

impl From<std::io::Error> for FixError {
    fn from(err: std::io::Error) -> Self {
        Self::Transport(TransportError::from(err))
    }
}

/// Errors that occur during FIX message decoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Message does not start with the `8=`/`9=`/`35=` header sequence.
    #[error("malformed header: expected 8=BeginString, 9=BodyLength, 35=MsgType")]
    MalformedHeader,

    /// Declared body length exceeds the available bytes.
    #[error("truncated message: body shorter than declared BodyLength")]
    Truncated,

    /// Invalid BodyLength value (tag 9).
    #[error("invalid body length value")]
    InvalidBodyLength,

    /// Missing MsgType field (tag 35) at the head of the body.
    #[error("missing msg type field (tag 35)")]
    MissingMsgType,

    /// Checksum mismatch between calculated and declared values.
    #[error("checksum mismatch: calculated {calculated}, declared {declared}")]
    ChecksumMismatch {
        /// Calculated checksum value.
        calculated: u8,
        /// Declared checksum value in the message trailer.
        declared: u8,
    },

    /// A field carried an empty value (`55=\x01`).
    #[error("empty value for tag {tag}")]
    EmptyValue {
        /// The tag whose value was empty.
        tag: u32,
    },

    /// Tag part of a `tag=value` pair is missing or not a positive integer.
    #[error("invalid tag format: {0}")]
    InvalidTag(String),

    /// Field value could not be parsed as the registered type.
    #[error("invalid field value for tag {tag}: {reason}")]
    InvalidFieldValue {
        /// The tag number of the field.
        tag: u32,
        /// Description of why the value is invalid.
        reason: String,
    },

    /// Repeating group count does not match the delimiter-initiated blocks.
    #[error("group count mismatch for tag {count_tag}: declared {declared}, found {actual}")]
    GroupCountMismatch {
        /// The tag carrying the group count.
        count_tag: u32,
        /// Declared number of group blocks.
        declared: u32,
        /// Actual number of blocks found.
        actual: u32,
    },

    /// A standard-header tag (8/9/34/35/49/56/52) appeared more than once.
    #[error("duplicate header field: tag {tag}")]
    DuplicateHeaderField {
        /// The duplicated header tag.
        tag: u32,
    },

    /// Message exceeds the maximum allowed size.
    #[error("message too large: {size} bytes exceeds maximum {max_size}")]
    MessageTooLarge {
        /// Actual message size in bytes.
        size: usize,
        /// Maximum allowed size in bytes.
        max_size: usize,
    },

    /// Invalid UTF-8 in a string field.
    #[error("invalid utf-8 in field: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// Errors that occur during FIX message encoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// Missing required field during encoding.
    #[error("missing required field: tag {tag}")]
    MissingRequiredField {
        /// The tag number of the missing field.
        tag: u32,
    },

    /// Field value cannot be rendered to the wire.
    #[error("invalid field value for tag {tag}: {reason}")]
    InvalidFieldValue {
        /// The tag number of the field.
        tag: u32,
        /// Description of why the value is invalid.
        reason: String,
    },
}

/// Errors in FIX session layer operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Logon was rejected by the counterparty.
    #[error("logon rejected: {reason}")]
    LogonRejected {
        /// Reason text from the peer's Logout, if any.
        reason: String,
    },

    /// Sequence number below expected without PossDupFlag=Y (fatal per FIX).
    #[error("duplicate without PossDupFlag: expected {expected}, received {received}")]
    DuplicateWithoutPossDup {
        /// Expected sequence number.
        expected: u64,
        /// Received sequence number.
        received: u64,
    },

    /// Standard header of an inbound message is unusable.
    #[error("header error: {reason}")]
    HeaderError {
        /// Description of the header problem.
        reason: String,
    },

    /// An administrative exchange did not complete in time.
    #[error("timeout while {during}")]
    Timeout {
        /// What the engine was waiting for.
        during: String,
    },

    /// Received a message type that is invalid in the current phase.
    #[error("unexpected msg type {msg_type} in phase {phase}")]
    UnexpectedMsgType {
        /// The offending message type.
        msg_type: String,
        /// The session phase at the time.
        phase: String,
    },

    /// Session configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Connection-level failure.
    #[error("connection error: {0}")]
    Connection(String),
}

/// Errors in the byte transport below the session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The peer closed the connection.
    #[error("transport closed by peer")]
    Eof,

    /// I/O error from the underlying stream.
    #[error("io error: {0}")]
    Io(String),
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::UnexpectedEof => Self::Eof,
            _ => Self::Io(err.to_string()),
        }
    }
}

/// Startup configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A field descriptor collides with an existing registration.
    #[error("registry collision: tag {tag} / name {name}")]
    RegistryCollision {
        /// The colliding tag.
        tag: u32,
        /// The colliding name.
        name: String,
    },

    /// Lookup by name found no descriptor.
    #[error("unknown field name: {0}")]
    UnknownField(String),

    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
