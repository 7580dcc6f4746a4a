/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Field values and fields for FIX protocol messages.
//!
//! A [`Field`] is an immutable `(tag, value)` pair. Values range over the
//! closed [`FieldValue`] union: the FIX scalar types, the enumerated code
//! sets, and an `Unknown` arm carrying the raw bytes of tags the registry
//! does not know. Two fields are equal iff their tags and wire
//! representations match.

use crate::enums::{
    EncryptMethod, ExecType, MDEntryType, OrdStatus, OrdType, SessionRejectReason, Side,
    SubscriptionRequestType, TimeInForce,
};
use crate::message::MsgType;
use crate::types::{FixVersion, TzTimeOnly, UtcDate, UtcTimestamp};
use bytes::{BufMut, Bytes, BytesMut};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// SOH field delimiter.
pub const SOH: u8 = 0x01;

/// Typed FIX field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    /// String value.
    Str(String),
    /// Signed integer value.
    Int(i64),
    /// Unsigned integer value (sequence numbers, counts, lengths).
    UInt(u64),
    /// Decimal value (prices, quantities).
    Decimal(Decimal),
    /// Boolean value, `Y`/`N` on the wire.
    Bool(bool),
    /// Single character value.
    Char(char),
    /// UTC timestamp value.
    Timestamp(UtcTimestamp),
    /// Local date value.
    Date(UtcDate),
    /// Time-of-day value with optional timezone.
    TzTime(TzTimeOnly),
    /// FIX version value (BeginString, DefaultApplVerID).
    Version(FixVersion),
    /// Message type value (RefMsgType).
    MsgType(MsgType),
    /// Side code set (tag 54).
    Side(Side),
    /// OrdType code set (tag 40).
    OrdType(OrdType),
    /// OrdStatus code set (tag 39).
    OrdStatus(OrdStatus),
    /// TimeInForce code set (tag 59).
    TimeInForce(TimeInForce),
    /// ExecType code set (tag 150).
    ExecType(ExecType),
    /// EncryptMethod code set (tag 98).
    EncryptMethod(EncryptMethod),
    /// SessionRejectReason code set (tag 373).
    SessionRejectReason(SessionRejectReason),
    /// MDEntryType code set (tag 269).
    MDEntryType(MDEntryType),
    /// SubscriptionRequestType code set (tag 263).
    SubscriptionRequestType(SubscriptionRequestType),
    /// Raw bytes of a tag unknown to the registry. Preserved verbatim so
    /// unknown-but-valid tags flow through decode and re-encode untouched.
    Unknown(Bytes),
}

impl FieldValue {
    /// Returns the value as a string slice, if it is a `Str` variant.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as a u64 for `UInt` or non-negative `Int` variants.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::UInt(v) => Some(*v),
            Self::Int(v) if *v >= 0 => Some(*v as u64),
            _ => None,
        }
    }

    /// Returns the value as an i64, if it is an integer variant.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::UInt(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Returns the value as a Decimal, if it is a `Decimal` variant.
    #[must_use]
    pub const fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Decimal(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as a bool, if it is a `Bool` variant.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as a char, if it is a `Char` variant.
    #[must_use]
    pub const fn as_char(&self) -> Option<char> {
        match self {
            Self::Char(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as a timestamp, if it is a `Timestamp` variant.
    #[must_use]
    pub const fn as_timestamp(&self) -> Option<UtcTimestamp> {
        match self {
            Self::Timestamp(v) => Some(*v),
            _ => None,
        }
    }

    /// Appends the exact wire bytes of this value to a buffer.
    pub fn append_wire(&self, buf: &mut BytesMut) {
        match self {
            Self::Str(s) => buf.put_slice(s.as_bytes()),
            Self::Int(v) => {
                let mut itoa_buf = itoa::Buffer::new();
                buf.put_slice(itoa_buf.format(*v).as_bytes());
            }
            Self::UInt(v) => {
                let mut itoa_buf = itoa::Buffer::new();
                buf.put_slice(itoa_buf.format(*v).as_bytes());
            }
            Self::Decimal(v) => buf.put_slice(v.to_string().as_bytes()),
            Self::Bool(v) => buf.put_slice(if *v { b"Y" } else { b"N" }),
            Self::Char(c) => {
                let mut char_buf = [0u8; 4];
                buf.put_slice(c.encode_utf8(&mut char_buf).as_bytes());
            }
            Self::Timestamp(v) => buf.put_slice(v.print().as_bytes()),
            Self::Date(v) => buf.put_slice(v.print().as_bytes()),
            Self::TzTime(v) => buf.put_slice(v.print().as_bytes()),
            Self::Version(v) => buf.put_slice(v.begin_string().as_bytes()),
            Self::MsgType(v) => buf.put_slice(v.as_str().as_bytes()),
            Self::Side(v) => buf.put_u8(*v as u8),
            Self::OrdType(v) => buf.put_u8(*v as u8),
            Self::OrdStatus(v) => buf.put_u8(*v as u8),
            Self::TimeInForce(v) => buf.put_u8(*v as u8),
            Self::ExecType(v) => buf.put_u8(*v as u8),
            Self::EncryptMethod(v) => buf.put_u8(*v as u8),
            Self::SessionRejectReason(v) => buf.put_slice(v.as_wire().as_bytes()),
            Self::MDEntryType(v) => buf.put_u8(*v as u8),
            Self::SubscriptionRequestType(v) => buf.put_u8(*v as u8),
            Self::Unknown(raw) => buf.put_slice(raw),
        }
    }

    /// Renders the wire form as an owned string (lossy for `Unknown` bytes).
    #[must_use]
    pub fn wire_string(&self) -> String {
        let mut buf = BytesMut::new();
        self.append_wire(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_string())
    }
}

/// An immutable FIX field: a tag paired with a typed value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// The field tag number.
    pub tag: u32,
    /// The typed value.
    pub value: FieldValue,
}

impl Field {
    /// Creates a field from a tag and value.
    #[inline]
    #[must_use]
    pub const fn new(tag: u32, value: FieldValue) -> Self {
        Self { tag, value }
    }

    /// Creates a string field.
    #[must_use]
    pub fn str(tag: u32, value: impl Into<String>) -> Self {
        Self::new(tag, FieldValue::Str(value.into()))
    }

    /// Creates a signed integer field.
    #[must_use]
    pub const fn int(tag: u32, value: i64) -> Self {
        Self::new(tag, FieldValue::Int(value))
    }

    /// Creates an unsigned integer field.
    #[must_use]
    pub const fn uint(tag: u32, value: u64) -> Self {
        Self::new(tag, FieldValue::UInt(value))
    }

    /// Creates a decimal field.
    #[must_use]
    pub const fn decimal(tag: u32, value: Decimal) -> Self {
        Self::new(tag, FieldValue::Decimal(value))
    }

    /// Creates a boolean (`Y`/`N`) field.
    #[must_use]
    pub const fn bool(tag: u32, value: bool) -> Self {
        Self::new(tag, FieldValue::Bool(value))
    }

    /// Creates a single-character field.
    #[must_use]
    pub const fn char(tag: u32, value: char) -> Self {
        Self::new(tag, FieldValue::Char(value))
    }

    /// Creates a UTC timestamp field.
    #[must_use]
    pub const fn timestamp(tag: u32, value: UtcTimestamp) -> Self {
        Self::new(tag, FieldValue::Timestamp(value))
    }

    /// Encodes `tag=value<SOH>` into the buffer.
    ///
    /// Returns the number of bytes written and their byte sum, which feeds
    /// the message checksum.
    pub fn encode(&self, buf: &mut BytesMut) -> (usize, u32) {
        let start = buf.len();
        let mut itoa_buf = itoa::Buffer::new();
        buf.put_slice(itoa_buf.format(self.tag).as_bytes());
        buf.put_u8(b'=');
        self.value.append_wire(buf);
        buf.put_u8(SOH);
        let written = &buf[start..];
        let sum: u32 = written.iter().map(|&b| u32::from(b)).sum();
        (written.len(), sum)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.tag, self.value)
    }
}
