/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Field registry: the extensible catalog mapping tag ↔ name ↔ typed codec.
//!
//! The registry is populated at startup ([`FieldRegistry::standard`] plus any
//! venue registrations) and then shared immutably behind an `Arc`. Tags and
//! names are both injective; registering a collision is a startup error.
//!
//! Tags absent from the registry decode to [`FieldValue::Unknown`] carrying
//! the raw bytes — FIX requires unknown-but-valid tags to flow through for
//! inspection, so they are never dropped.

use crate::enums::{
    EncryptMethod, ExecType, MDEntryType, OrdStatus, OrdType, SessionRejectReason, Side,
    SubscriptionRequestType, TimeInForce,
};
use crate::error::{ConfigError, DecodeError};
use crate::field::{Field, FieldValue};
use crate::message::MsgType;
use crate::types::{FixVersion, TzTimeOnly, UtcDate, UtcTimestamp};
use bytes::Bytes;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Builtin value kinds a descriptor may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Free-form string.
    Str,
    /// Signed integer.
    Int,
    /// Unsigned integer (SeqNum, NumInGroup, Length).
    UInt,
    /// Decimal (Price, Qty, Amt).
    Decimal,
    /// Boolean `Y`/`N`.
    Bool,
    /// Single character.
    Char,
    /// UTCTimestamp.
    Timestamp,
    /// Local market date.
    Date,
    /// Time of day with optional timezone.
    TzTime,
    /// BeginString version.
    Version,
    /// Message type code.
    MsgType,
    /// Side code set.
    Side,
    /// OrdType code set.
    OrdType,
    /// OrdStatus code set.
    OrdStatus,
    /// TimeInForce code set.
    TimeInForce,
    /// ExecType code set.
    ExecType,
    /// EncryptMethod code set.
    EncryptMethod,
    /// SessionRejectReason code set.
    SessionRejectReason,
    /// MDEntryType code set.
    MDEntryType,
    /// SubscriptionRequestType code set.
    SubscriptionRequestType,
}

impl ValueKind {
    /// Parses a raw wire value into a typed [`FieldValue`].
    ///
    /// # Errors
    /// Returns `DecodeError::InvalidFieldValue` naming the tag on parse
    /// failure, including unknown code-set values.
    pub fn decode(self, tag: u32, raw: &str) -> Result<FieldValue, DecodeError> {
        let invalid = |reason: String| DecodeError::InvalidFieldValue { tag, reason };
        let unknown_code = || invalid(format!("unknown code '{}'", raw));

        match self {
            Self::Str => Ok(FieldValue::Str(raw.to_string())),
            Self::Int => raw
                .parse::<i64>()
                .map(FieldValue::Int)
                .map_err(|_| invalid(format!("'{}' is not an integer", raw))),
            Self::UInt => raw
                .parse::<u64>()
                .map(FieldValue::UInt)
                .map_err(|_| invalid(format!("'{}' is not an unsigned integer", raw))),
            Self::Decimal => raw
                .parse::<Decimal>()
                .map(FieldValue::Decimal)
                .map_err(|_| invalid(format!("'{}' is not a decimal", raw))),
            Self::Bool => match raw {
                "Y" => Ok(FieldValue::Bool(true)),
                "N" => Ok(FieldValue::Bool(false)),
                _ => Err(invalid(format!("'{}' is not Y or N", raw))),
            },
            Self::Char => {
                let mut chars = raw.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(FieldValue::Char(c)),
                    _ => Err(invalid(format!("'{}' is not a single character", raw))),
                }
            }
            Self::Timestamp => UtcTimestamp::parse(raw)
                .map(FieldValue::Timestamp)
                .map_err(|_| invalid(format!("'{}' is not a UTCTimestamp", raw))),
            Self::Date => UtcDate::parse(raw)
                .map(FieldValue::Date)
                .map_err(|_| invalid(format!("'{}' is not a date", raw))),
            Self::TzTime => TzTimeOnly::parse(raw)
                .map(FieldValue::TzTime)
                .map_err(|_| invalid(format!("'{}' is not a time of day", raw))),
            Self::Version => FixVersion::parse(raw)
                .map(FieldValue::Version)
                .ok_or_else(|| invalid(format!("'{}' is not a FIX version", raw))),
            Self::MsgType => match raw.parse::<MsgType>() {
                Ok(parsed) => Ok(FieldValue::MsgType(parsed)),
                Err(never) => match never {},
            },
            Self::Side => single_char(raw)
                .and_then(Side::from_char)
                .map(FieldValue::Side)
                .ok_or_else(unknown_code),
            Self::OrdType => single_char(raw)
                .and_then(OrdType::from_char)
                .map(FieldValue::OrdType)
                .ok_or_else(unknown_code),
            Self::OrdStatus => single_char(raw)
                .and_then(OrdStatus::from_char)
                .map(FieldValue::OrdStatus)
                .ok_or_else(unknown_code),
            Self::TimeInForce => single_char(raw)
                .and_then(TimeInForce::from_char)
                .map(FieldValue::TimeInForce)
                .ok_or_else(unknown_code),
            Self::ExecType => single_char(raw)
                .and_then(ExecType::from_char)
                .map(FieldValue::ExecType)
                .ok_or_else(unknown_code),
            Self::EncryptMethod => single_char(raw)
                .and_then(EncryptMethod::from_char)
                .map(FieldValue::EncryptMethod)
                .ok_or_else(unknown_code),
            Self::SessionRejectReason => SessionRejectReason::from_wire(raw)
                .map(FieldValue::SessionRejectReason)
                .ok_or_else(unknown_code),
            Self::MDEntryType => single_char(raw)
                .and_then(MDEntryType::from_char)
                .map(FieldValue::MDEntryType)
                .ok_or_else(unknown_code),
            Self::SubscriptionRequestType => single_char(raw)
                .and_then(SubscriptionRequestType::from_char)
                .map(FieldValue::SubscriptionRequestType)
                .ok_or_else(unknown_code),
        }
    }
}

fn single_char(raw: &str) -> Option<char> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Custom field codec for adapter-registered descriptors.
///
/// Venue adapters implement this for tags whose wire form is not covered by
/// the builtin [`ValueKind`]s (signatures, venue-specific encodings).
pub trait FieldCodec: Send + Sync + fmt::Debug {
    /// Parses a raw wire value into a typed [`FieldValue`].
    ///
    /// # Errors
    /// Returns `DecodeError::InvalidFieldValue` on parse failure.
    fn decode(&self, tag: u32, raw: &str) -> Result<FieldValue, DecodeError>;
}

/// How a descriptor turns wire text into a typed value.
#[derive(Debug, Clone)]
pub enum Codec {
    /// One of the builtin kinds.
    Builtin(ValueKind),
    /// An adapter-provided codec.
    Custom(Arc<dyn FieldCodec>),
}

/// A field catalog entry: tag, printable name, and codec.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    /// Tag number, unique within the registry.
    pub tag: u32,
    /// Printable name, unique within the registry.
    pub name: String,
    /// Wire codec for this field's values.
    pub codec: Codec,
}

impl FieldDescriptor {
    /// Creates a descriptor with a builtin value kind.
    #[must_use]
    pub fn new(tag: u32, name: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            tag,
            name: name.into(),
            codec: Codec::Builtin(kind),
        }
    }

    /// Creates a descriptor with a custom codec.
    #[must_use]
    pub fn with_codec(tag: u32, name: impl Into<String>, codec: Arc<dyn FieldCodec>) -> Self {
        Self {
            tag,
            name: name.into(),
            codec: Codec::Custom(codec),
        }
    }
}

/// Splits a raw `tag=value` pair.
///
/// # Errors
/// Returns `DecodeError::InvalidTag` when there is no `=` or the tag part is
/// empty or not a positive integer.
pub fn parse_raw(s: &str) -> Result<(u32, &str), DecodeError> {
    let (tag_str, value) = s
        .split_once('=')
        .ok_or_else(|| DecodeError::InvalidTag(s.to_string()))?;
    if tag_str.is_empty() || !tag_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DecodeError::InvalidTag(tag_str.to_string()));
    }
    let tag: u32 = tag_str
        .parse()
        .map_err(|_| DecodeError::InvalidTag(tag_str.to_string()))?;
    if tag == 0 {
        return Err(DecodeError::InvalidTag(tag_str.to_string()));
    }
    Ok((tag, value))
}

/// The process-wide field catalog.
///
/// Built at startup, then shared immutably; there is no post-startup
/// mutation API.
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    by_tag: HashMap<u32, FieldDescriptor>,
    by_name: HashMap<String, u32>,
}

impl FieldRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry pre-populated with the standard FIX 4.4 fields the
    /// engine and common application messages use.
    #[must_use]
    pub fn standard() -> Self {
        let mut reg = Self::new();
        for (tag, name, kind) in STANDARD_FIELDS {
            reg.insert(FieldDescriptor::new(*tag, *name, *kind));
        }
        reg
    }

    /// Registers a descriptor.
    ///
    /// # Errors
    /// Returns `ConfigError::RegistryCollision` if the tag or the name is
    /// already registered.
    pub fn register(&mut self, descriptor: FieldDescriptor) -> Result<(), ConfigError> {
        if self.by_tag.contains_key(&descriptor.tag)
            || self.by_name.contains_key(&descriptor.name)
        {
            return Err(ConfigError::RegistryCollision {
                tag: descriptor.tag,
                name: descriptor.name,
            });
        }
        self.insert(descriptor);
        Ok(())
    }

    fn insert(&mut self, descriptor: FieldDescriptor) {
        self.by_name.insert(descriptor.name.clone(), descriptor.tag);
        self.by_tag.insert(descriptor.tag, descriptor);
    }

    /// Returns the descriptor for a tag.
    #[must_use]
    pub fn descriptor(&self, tag: u32) -> Option<&FieldDescriptor> {
        self.by_tag.get(&tag)
    }

    /// Returns the tag registered under a name.
    ///
    /// # Errors
    /// Returns `ConfigError::UnknownField` when the name is not registered.
    pub fn tag_by_name(&self, name: &str) -> Result<u32, ConfigError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| ConfigError::UnknownField(name.to_string()))
    }

    /// Returns the printable name of a tag, if registered.
    #[must_use]
    pub fn name_of(&self, tag: u32) -> Option<&str> {
        self.by_tag.get(&tag).map(|d| d.name.as_str())
    }

    /// Returns the number of registered descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_tag.len()
    }

    /// Returns true if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_tag.is_empty()
    }

    /// Decodes a raw value into a typed field.
    ///
    /// Unknown tags are preserved as [`FieldValue::Unknown`]; they are never
    /// dropped.
    ///
    /// # Errors
    /// Returns `DecodeError::EmptyValue` for empty values and
    /// `DecodeError::InvalidFieldValue` when the registered codec rejects
    /// the input.
    pub fn decode_field(&self, tag: u32, raw: &str) -> Result<Field, DecodeError> {
        if raw.is_empty() {
            return Err(DecodeError::EmptyValue { tag });
        }
        let value = match self.by_tag.get(&tag) {
            None => FieldValue::Unknown(Bytes::copy_from_slice(raw.as_bytes())),
            Some(descriptor) => match &descriptor.codec {
                Codec::Builtin(kind) => kind.decode(tag, raw)?,
                Codec::Custom(codec) => codec.decode(tag, raw)?,
            },
        };
        Ok(Field::new(tag, value))
    }
}

/// Standard FIX 4.4 catalog: (tag, name, kind).
const STANDARD_FIELDS: &[(u32, &str, ValueKind)] = &[
    (1, "Account", ValueKind::Str),
    (6, "AvgPx", ValueKind::Decimal),
    (7, "BeginSeqNo", ValueKind::UInt),
    (8, "BeginString", ValueKind::Version),
    (9, "BodyLength", ValueKind::UInt),
    (10, "CheckSum", ValueKind::Str),
    (11, "ClOrdID", ValueKind::Str),
    (14, "CumQty", ValueKind::Decimal),
    (15, "Currency", ValueKind::Str),
    (16, "EndSeqNo", ValueKind::UInt),
    (17, "ExecID", ValueKind::Str),
    (21, "HandlInst", ValueKind::Char),
    (22, "SecurityIDSource", ValueKind::Str),
    (31, "LastPx", ValueKind::Decimal),
    (32, "LastQty", ValueKind::Decimal),
    (34, "MsgSeqNum", ValueKind::UInt),
    (35, "MsgType", ValueKind::MsgType),
    (36, "NewSeqNo", ValueKind::UInt),
    (37, "OrderID", ValueKind::Str),
    (38, "OrderQty", ValueKind::Decimal),
    (39, "OrdStatus", ValueKind::OrdStatus),
    (40, "OrdType", ValueKind::OrdType),
    (41, "OrigClOrdID", ValueKind::Str),
    (43, "PossDupFlag", ValueKind::Bool),
    (44, "Price", ValueKind::Decimal),
    (45, "RefSeqNum", ValueKind::UInt),
    (48, "SecurityID", ValueKind::Str),
    (49, "SenderCompID", ValueKind::Str),
    (50, "SenderSubID", ValueKind::Str),
    (52, "SendingTime", ValueKind::Timestamp),
    (54, "Side", ValueKind::Side),
    (55, "Symbol", ValueKind::Str),
    (56, "TargetCompID", ValueKind::Str),
    (57, "TargetSubID", ValueKind::Str),
    (58, "Text", ValueKind::Str),
    (59, "TimeInForce", ValueKind::TimeInForce),
    (60, "TransactTime", ValueKind::Timestamp),
    (64, "SettlDate", ValueKind::Date),
    (75, "TradeDate", ValueKind::Date),
    (78, "NoAllocs", ValueKind::UInt),
    (79, "AllocAccount", ValueKind::Str),
    (80, "AllocQty", ValueKind::Decimal),
    (97, "PossResend", ValueKind::Bool),
    (98, "EncryptMethod", ValueKind::EncryptMethod),
    (99, "StopPx", ValueKind::Decimal),
    (102, "CxlRejReason", ValueKind::UInt),
    (103, "OrdRejReason", ValueKind::UInt),
    (108, "HeartBtInt", ValueKind::UInt),
    (112, "TestReqID", ValueKind::Str),
    (122, "OrigSendingTime", ValueKind::Timestamp),
    (123, "GapFillFlag", ValueKind::Bool),
    (141, "ResetSeqNumFlag", ValueKind::Bool),
    (146, "NoRelatedSym", ValueKind::UInt),
    (150, "ExecType", ValueKind::ExecType),
    (151, "LeavesQty", ValueKind::Decimal),
    (167, "SecurityType", ValueKind::Str),
    (262, "MDReqID", ValueKind::Str),
    (263, "SubscriptionRequestType", ValueKind::SubscriptionRequestType),
    (264, "MarketDepth", ValueKind::UInt),
    (265, "MDUpdateType", ValueKind::UInt),
    (267, "NoMDEntryTypes", ValueKind::UInt),
    (268, "NoMDEntries", ValueKind::UInt),
    (269, "MDEntryType", ValueKind::MDEntryType),
    (270, "MDEntryPx", ValueKind::Decimal),
    (271, "MDEntrySize", ValueKind::Decimal),
    (272, "MDEntryDate", ValueKind::Date),
    (273, "MDEntryTime", ValueKind::TzTime),
    (276, "QuoteCondition", ValueKind::Str),
    (279, "MDUpdateAction", ValueKind::Char),
    (280, "MDEntryRefID", ValueKind::Str),
    (311, "UnderlyingSymbol", ValueKind::Str),
    (336, "TradingSessionID", ValueKind::Str),
    (337, "ContraTrader", ValueKind::Str),
    (371, "RefTagID", ValueKind::UInt),
    (372, "RefMsgType", ValueKind::MsgType),
    (373, "SessionRejectReason", ValueKind::SessionRejectReason),
    (375, "ContraBroker", ValueKind::Str),
    (380, "BusinessRejectReason", ValueKind::UInt),
    (382, "NoContraBrokers", ValueKind::UInt),
    (437, "ContraTradeQty", ValueKind::Decimal),
    (438, "ContraTradeTime", ValueKind::Timestamp),
    (447, "PartyIDSource", ValueKind::Char),
    (448, "PartyID", ValueKind::Str),
    (452, "PartyRole", ValueKind::UInt),
    (453, "NoPartyIDs", ValueKind::UInt),
    (553, "Username", ValueKind::Str),
    (554, "Password", ValueKind::Str),
    (555, "NoLegs", ValueKind::UInt),
    (600, "LegSymbol", ValueKind::Str),
    (624, "LegSide", ValueKind::Side),
    (654, "LegRefID", ValueKind::Str),
    (711, "NoUnderlyings", ValueKind::UInt),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_raw() {
        assert_eq!(parse_raw("35=A").unwrap(), (35, "A"));
        assert_eq!(parse_raw("55=").unwrap(), (55, ""));
        assert!(parse_raw("no-equals").is_err());
        assert!(parse_raw("=value").is_err());
        assert!(parse_raw("abc=value").is_err());
        assert!(parse_raw("0=value").is_err());
    }

    #[test]
    fn test_standard_registry_lookups() {
        let reg = FieldRegistry::standard();
        assert_eq!(reg.name_of(35), Some("MsgType"));
        assert_eq!(reg.tag_by_name("HeartBtInt").unwrap(), 108);
        assert!(reg.tag_by_name("NoSuchField").is_err());
        assert!(reg.descriptor(9999).is_none());
    }

    #[test]
    fn test_register_collision() {
        let mut reg = FieldRegistry::standard();
        let err = reg
            .register(FieldDescriptor::new(35, "Whatever", ValueKind::Str))
            .unwrap_err();
        assert!(matches!(err, ConfigError::RegistryCollision { tag: 35, .. }));

        let err = reg
            .register(FieldDescriptor::new(9001, "MsgType", ValueKind::Str))
            .unwrap_err();
        assert!(matches!(err, ConfigError::RegistryCollision { tag: 9001, .. }));

        assert!(reg
            .register(FieldDescriptor::new(9001, "VenueSig", ValueKind::Str))
            .is_ok());
    }

    #[test]
    fn test_decode_field_typed() {
        let reg = FieldRegistry::standard();
        let field = reg.decode_field(108, "30").unwrap();
        assert_eq!(field.value, FieldValue::UInt(30));

        let field = reg.decode_field(54, "1").unwrap();
        assert_eq!(field.value, FieldValue::Side(Side::Buy));

        let field = reg.decode_field(52, "20200101-00:00:00").unwrap();
        assert!(matches!(field.value, FieldValue::Timestamp(_)));
    }

    #[test]
    fn test_decode_field_unknown_preserved() {
        let reg = FieldRegistry::standard();
        let field = reg.decode_field(9702, "venue-data").unwrap();
        assert_eq!(
            field.value,
            FieldValue::Unknown(Bytes::from_static(b"venue-data"))
        );
    }

    #[test]
    fn test_decode_field_empty_value() {
        let reg = FieldRegistry::standard();
        let err = reg.decode_field(55, "").unwrap_err();
        assert_eq!(err, DecodeError::EmptyValue { tag: 55 });
    }

    #[test]
    fn test_decode_field_unknown_enum_code() {
        let reg = FieldRegistry::standard();
        let err = reg.decode_field(54, "Z").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidFieldValue { tag: 54, .. }));
    }

    #[test]
    fn test_custom_codec() {
        #[derive(Debug)]
        struct UpperCodec;

        impl FieldCodec for UpperCodec {
            fn decode(&self, _tag: u32, raw: &str) -> Result<FieldValue, DecodeError> {
                Ok(FieldValue::Str(raw.to_uppercase()))
            }
        }

        let mut reg = FieldRegistry::standard();
        reg.register(FieldDescriptor::with_codec(
            9010,
            "VenueFlag",
            Arc::new(UpperCodec),
        ))
        .unwrap();

        let field = reg.decode_field(9010, "abc").unwrap();
        assert_eq!(field.value, FieldValue::Str("ABC".to_string()));
    }
}
