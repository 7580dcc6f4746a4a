/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Message types for FIX protocol.
//!
//! A [`Message`] is a message type plus an ordered sequence of body fields.
//! Repeating groups live inline in that sequence (count field followed by
//! its blocks) so field order is preserved exactly as received, which FIX
//! group semantics depend on. [`GroupView`] re-derives block structure from
//! the flat sequence using the static group table.
//!
//! The framing fields BeginString (8), BodyLength (9), and CheckSum (10) are
//! owned by the codec and never appear in a message body; the session header
//! fields (34/49/56/52) appear as ordinary fields once the engine stamps
//! them.

use crate::field::{Field, FieldValue};
use crate::groups::{group_spec, split_blocks};
use crate::tags;
use crate::types::UtcTimestamp;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// FIX message types.
///
/// Covers the administrative set and the common application messages; other
/// types are preserved as `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MsgType {
    /// Heartbeat (0) - session level.
    #[default]
    Heartbeat,
    /// Test Request (1) - session level.
    TestRequest,
    /// Resend Request (2) - session level.
    ResendRequest,
    /// Reject (3) - session level.
    Reject,
    /// Sequence Reset (4) - session level.
    SequenceReset,
    /// Logout (5) - session level.
    Logout,
    /// Logon (A) - session level.
    Logon,
    /// Execution Report (8).
    ExecutionReport,
    /// Order Cancel Reject (9).
    OrderCancelReject,
    /// News (B).
    News,
    /// New Order Single (D).
    NewOrderSingle,
    /// Order Cancel Request (F).
    OrderCancelRequest,
    /// Order Cancel/Replace Request (G).
    OrderCancelReplaceRequest,
    /// Order Status Request (H).
    OrderStatusRequest,
    /// Quote Request (R).
    QuoteRequest,
    /// Quote (S).
    Quote,
    /// Market Data Request (V).
    MarketDataRequest,
    /// Market Data Snapshot/Full Refresh (W).
    MarketDataSnapshotFullRefresh,
    /// Market Data Incremental Refresh (X).
    MarketDataIncrementalRefresh,
    /// Market Data Request Reject (Y).
    MarketDataRequestReject,
    /// Business Message Reject (j).
    BusinessMessageReject,
    /// Order Mass Cancel Request (q).
    OrderMassCancelRequest,
    /// Order Mass Cancel Report (r).
    OrderMassCancelReport,
    /// Security List Request (x).
    SecurityListRequest,
    /// Security List (y).
    SecurityList,
    /// Any other message type, preserved verbatim.
    Custom(String),
}

impl std::str::FromStr for MsgType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "0" => Self::Heartbeat,
            "1" => Self::TestRequest,
            "2" => Self::ResendRequest,
            "3" => Self::Reject,
            "4" => Self::SequenceReset,
            "5" => Self::Logout,
            "A" => Self::Logon,
            "8" => Self::ExecutionReport,
            "9" => Self::OrderCancelReject,
            "B" => Self::News,
            "D" => Self::NewOrderSingle,
            "F" => Self::OrderCancelRequest,
            "G" => Self::OrderCancelReplaceRequest,
            "H" => Self::OrderStatusRequest,
            "R" => Self::QuoteRequest,
            "S" => Self::Quote,
            "V" => Self::MarketDataRequest,
            "W" => Self::MarketDataSnapshotFullRefresh,
            "X" => Self::MarketDataIncrementalRefresh,
            "Y" => Self::MarketDataRequestReject,
            "j" => Self::BusinessMessageReject,
            "q" => Self::OrderMassCancelRequest,
            "r" => Self::OrderMassCancelReport,
            "x" => Self::SecurityListRequest,
            "y" => Self::SecurityList,
            other => Self::Custom(other.to_string()),
        })
    }
}

impl MsgType {
    /// Returns the wire string for this message type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Heartbeat => "0",
            Self::TestRequest => "1",
            Self::ResendRequest => "2",
            Self::Reject => "3",
            Self::SequenceReset => "4",
            Self::Logout => "5",
            Self::Logon => "A",
            Self::ExecutionReport => "8",
            Self::OrderCancelReject => "9",
            Self::News => "B",
            Self::NewOrderSingle => "D",
            Self::OrderCancelRequest => "F",
            Self::OrderCancelReplaceRequest => "G",
            Self::OrderStatusRequest => "H",
            Self::QuoteRequest => "R",
            Self::Quote => "S",
            Self::MarketDataRequest => "V",
            Self::MarketDataSnapshotFullRefresh => "W",
            Self::MarketDataIncrementalRefresh => "X",
            Self::MarketDataRequestReject => "Y",
            Self::BusinessMessageReject => "j",
            Self::OrderMassCancelRequest => "q",
            Self::OrderMassCancelReport => "r",
            Self::SecurityListRequest => "x",
            Self::SecurityList => "y",
            Self::Custom(s) => s.as_str(),
        }
    }

    /// Returns true if this is an administrative (session-level) message.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(
            self,
            Self::Heartbeat
                | Self::TestRequest
                | Self::ResendRequest
                | Self::Reject
                | Self::SequenceReset
                | Self::Logout
                | Self::Logon
        )
    }

    /// Returns true if this is an application message.
    #[must_use]
    pub fn is_app(&self) -> bool {
        !self.is_admin()
    }

    /// Returns true for types the engine does not recognize at all.
    #[must_use]
    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl fmt::Display for MsgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A FIX message: message type plus ordered body fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Message {
    msg_type: MsgType,
    fields: SmallVec<[Field; 16]>,
}

impl Message {
    /// Creates an empty message of the given type.
    #[must_use]
    pub fn new(msg_type: MsgType) -> Self {
        Self {
            msg_type,
            fields: SmallVec::new(),
        }
    }

    /// Returns the message type.
    #[inline]
    #[must_use]
    pub fn msg_type(&self) -> &MsgType {
        &self.msg_type
    }

    /// Appends a field, builder style.
    #[must_use]
    pub fn with(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Appends a field.
    #[inline]
    pub fn push(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Replaces the first field with the same tag in place, or appends.
    pub fn set(&mut self, field: Field) {
        match self.fields.iter_mut().find(|f| f.tag == field.tag) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }

    /// Appends a repeating group: the count field followed by the blocks,
    /// flattened in order.
    pub fn push_group(&mut self, count_tag: u32, blocks: Vec<Vec<Field>>) {
        self.fields
            .push(Field::uint(count_tag, blocks.len() as u64));
        for block in blocks {
            self.fields.extend(block);
        }
    }

    /// Returns an iterator over the body fields in order.
    #[inline]
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    /// Returns the number of body fields.
    #[inline]
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Returns the first field with the given tag.
    #[must_use]
    pub fn get_field(&self, tag: u32) -> Option<&Field> {
        self.fields.iter().find(|f| f.tag == tag)
    }

    /// Returns the first value with the given tag.
    #[must_use]
    pub fn get(&self, tag: u32) -> Option<&FieldValue> {
        self.get_field(tag).map(|f| &f.value)
    }

    /// Returns a string value by tag.
    #[must_use]
    pub fn get_str(&self, tag: u32) -> Option<&str> {
        self.get(tag).and_then(FieldValue::as_str)
    }

    /// Returns an unsigned integer value by tag.
    #[must_use]
    pub fn get_u64(&self, tag: u32) -> Option<u64> {
        self.get(tag).and_then(FieldValue::as_u64)
    }

    /// Returns a boolean value by tag.
    #[must_use]
    pub fn get_bool(&self, tag: u32) -> Option<bool> {
        self.get(tag).and_then(FieldValue::as_bool)
    }

    /// Returns a timestamp value by tag.
    #[must_use]
    pub fn get_timestamp(&self, tag: u32) -> Option<UtcTimestamp> {
        self.get(tag).and_then(FieldValue::as_timestamp)
    }

    /// Returns the MsgSeqNum (tag 34) header value.
    #[must_use]
    pub fn seq_num(&self) -> Option<u64> {
        self.get_u64(tags::MSG_SEQ_NUM)
    }

    /// Returns the SendingTime (tag 52) header value.
    #[must_use]
    pub fn sending_time(&self) -> Option<UtcTimestamp> {
        self.get_timestamp(tags::SENDING_TIME)
    }

    /// Returns true if PossDupFlag (tag 43) is present and `Y`.
    #[must_use]
    pub fn poss_dup(&self) -> bool {
        self.get_bool(tags::POSS_DUP_FLAG).unwrap_or(false)
    }

    /// Returns a view of the repeating group anchored at `count_tag`, or
    /// `None` if the count field is absent or the tag is not a known group.
    #[must_use]
    pub fn group(&self, count_tag: u32) -> Option<GroupView<'_>> {
        let spec = group_spec(count_tag)?;
        let pos = self.fields.iter().position(|f| f.tag == count_tag)?;
        let declared = self.fields[pos].value.as_u64().unwrap_or(0);
        let rest = &self.fields[pos + 1..];
        let (ranges, _) = split_blocks(spec, rest);
        let blocks = ranges.into_iter().map(|r| &rest[r]).collect();
        Some(GroupView { declared, blocks })
    }
}

/// A derived view over one repeating group of a message.
#[derive(Debug)]
pub struct GroupView<'a> {
    /// The count declared in the NumInGroup field.
    pub declared: u64,
    /// The delimiter-initiated blocks, in wire order.
    pub blocks: Vec<&'a [Field]>,
}

impl GroupView<'_> {
    /// Returns true when the declared count matches the actual blocks.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.declared as usize == self.blocks.len()
    }
}
