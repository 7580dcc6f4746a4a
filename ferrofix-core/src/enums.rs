/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Enumerated FIX code sets.
//!
//! Each enum maps wire strings (single characters or short digit strings) to
//! variants with full FIX 4.4 coverage. Parsing an unknown wire value fails;
//! printing always reproduces the exact wire form.

use num_derive::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order side enumeration (tag 54).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, FromPrimitive, ToPrimitive,
)]
#[repr(u8)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order.
    Buy = b'1',
    /// Sell order.
    Sell = b'2',
    /// Buy minus (sell short exempt).
    BuyMinus = b'3',
    /// Sell plus (buy to cover).
    SellPlus = b'4',
    /// Sell short.
    SellShort = b'5',
    /// Sell short exempt.
    SellShortExempt = b'6',
    /// Undisclosed.
    Undisclosed = b'7',
    /// Cross (both sides).
    Cross = b'8',
    /// Cross short.
    CrossShort = b'9',
    /// Cross short exempt.
    CrossShortExempt = b'A',
    /// As defined (for multileg).
    AsDefined = b'B',
    /// Opposite (for multileg).
    Opposite = b'C',
    /// Subscribe.
    Subscribe = b'D',
    /// Redeem.
    Redeem = b'E',
    /// Lend (for securities lending).
    Lend = b'F',
    /// Borrow (for securities lending).
    Borrow = b'G',
}

impl Side {
    /// Creates a Side from its wire character.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '1' => Some(Self::Buy),
            '2' => Some(Self::Sell),
            '3' => Some(Self::BuyMinus),
            '4' => Some(Self::SellPlus),
            '5' => Some(Self::SellShort),
            '6' => Some(Self::SellShortExempt),
            '7' => Some(Self::Undisclosed),
            '8' => Some(Self::Cross),
            '9' => Some(Self::CrossShort),
            'A' => Some(Self::CrossShortExempt),
            'B' => Some(Self::AsDefined),
            'C' => Some(Self::Opposite),
            'D' => Some(Self::Subscribe),
            'E' => Some(Self::Redeem),
            'F' => Some(Self::Lend),
            'G' => Some(Self::Borrow),
            _ => None,
        }
    }

    /// Returns the wire character for this side.
    #[must_use]
    pub const fn as_char(self) -> char {
        self as u8 as char
    }

    /// Returns true if this is a buy-side order.
    #[must_use]
    pub const fn is_buy(self) -> bool {
        matches!(self, Self::Buy | Self::BuyMinus)
    }

    /// Returns true if this is a sell-side order.
    #[must_use]
    pub const fn is_sell(self) -> bool {
        matches!(
            self,
            Self::Sell | Self::SellPlus | Self::SellShort | Self::SellShortExempt
        )
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Order type enumeration (tag 40).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum OrdType {
    /// Market order.
    Market = b'1',
    /// Limit order.
    Limit = b'2',
    /// Stop / stop loss order.
    Stop = b'3',
    /// Stop limit order.
    StopLimit = b'4',
    /// With or without.
    WithOrWithout = b'6',
    /// Limit or better.
    LimitOrBetter = b'7',
    /// Limit with or without.
    LimitWithOrWithout = b'8',
    /// On basis.
    OnBasis = b'9',
    /// Previously quoted.
    PreviouslyQuoted = b'D',
    /// Previously indicated.
    PreviouslyIndicated = b'E',
    /// Forex swap.
    ForexSwap = b'G',
    /// Funari (limit day order with unexecuted portion handled as market on close).
    Funari = b'I',
    /// Market if touched.
    MarketIfTouched = b'J',
    /// Market with left over as limit.
    MarketWithLeftOverAsLimit = b'K',
    /// Previous fund valuation point.
    PreviousFundValuationPoint = b'L',
    /// Next fund valuation point.
    NextFundValuationPoint = b'M',
    /// Pegged.
    Pegged = b'P',
}

impl OrdType {
    /// Creates an OrdType from its wire character.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '1' => Some(Self::Market),
            '2' => Some(Self::Limit),
            '3' => Some(Self::Stop),
            '4' => Some(Self::StopLimit),
            '6' => Some(Self::WithOrWithout),
            '7' => Some(Self::LimitOrBetter),
            '8' => Some(Self::LimitWithOrWithout),
            '9' => Some(Self::OnBasis),
            'D' => Some(Self::PreviouslyQuoted),
            'E' => Some(Self::PreviouslyIndicated),
            'G' => Some(Self::ForexSwap),
            'I' => Some(Self::Funari),
            'J' => Some(Self::MarketIfTouched),
            'K' => Some(Self::MarketWithLeftOverAsLimit),
            'L' => Some(Self::PreviousFundValuationPoint),
            'M' => Some(Self::NextFundValuationPoint),
            'P' => Some(Self::Pegged),
            _ => None,
        }
    }

    /// Returns the wire character for this order type.
    #[must_use]
    pub const fn as_char(self) -> char {
        self as u8 as char
    }
}

impl fmt::Display for OrdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Order status enumeration (tag 39).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum OrdStatus {
    /// New.
    New = b'0',
    /// Partially filled.
    PartiallyFilled = b'1',
    /// Filled.
    Filled = b'2',
    /// Done for day.
    DoneForDay = b'3',
    /// Canceled.
    Canceled = b'4',
    /// Replaced.
    Replaced = b'5',
    /// Pending cancel.
    PendingCancel = b'6',
    /// Stopped.
    Stopped = b'7',
    /// Rejected.
    Rejected = b'8',
    /// Suspended.
    Suspended = b'9',
    /// Pending new.
    PendingNew = b'A',
    /// Calculated.
    Calculated = b'B',
    /// Expired.
    Expired = b'C',
    /// Accepted for bidding.
    AcceptedForBidding = b'D',
    /// Pending replace.
    PendingReplace = b'E',
}

impl OrdStatus {
    /// Creates an OrdStatus from its wire character.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Self::New),
            '1' => Some(Self::PartiallyFilled),
            '2' => Some(Self::Filled),
            '3' => Some(Self::DoneForDay),
            '4' => Some(Self::Canceled),
            '5' => Some(Self::Replaced),
            '6' => Some(Self::PendingCancel),
            '7' => Some(Self::Stopped),
            '8' => Some(Self::Rejected),
            '9' => Some(Self::Suspended),
            'A' => Some(Self::PendingNew),
            'B' => Some(Self::Calculated),
            'C' => Some(Self::Expired),
            'D' => Some(Self::AcceptedForBidding),
            'E' => Some(Self::PendingReplace),
            _ => None,
        }
    }

    /// Returns the wire character for this order status.
    #[must_use]
    pub const fn as_char(self) -> char {
        self as u8 as char
    }

    /// Returns true if the order can no longer trade.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Filled | Self::Canceled | Self::Rejected | Self::Expired | Self::DoneForDay
        )
    }
}

impl fmt::Display for OrdStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Time in force enumeration (tag 59).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TimeInForce {
    /// Day (or session).
    Day = b'0',
    /// Good till cancel.
    GoodTillCancel = b'1',
    /// At the opening.
    AtTheOpening = b'2',
    /// Immediate or cancel.
    ImmediateOrCancel = b'3',
    /// Fill or kill.
    FillOrKill = b'4',
    /// Good till crossing.
    GoodTillCrossing = b'5',
    /// Good till date.
    GoodTillDate = b'6',
    /// At the close.
    AtTheClose = b'7',
}

impl TimeInForce {
    /// Creates a TimeInForce from its wire character.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Self::Day),
            '1' => Some(Self::GoodTillCancel),
            '2' => Some(Self::AtTheOpening),
            '3' => Some(Self::ImmediateOrCancel),
            '4' => Some(Self::FillOrKill),
            '5' => Some(Self::GoodTillCrossing),
            '6' => Some(Self::GoodTillDate),
            '7' => Some(Self::AtTheClose),
            _ => None,
        }
    }

    /// Returns the wire character for this time in force.
    #[must_use]
    pub const fn as_char(self) -> char {
        self as u8 as char
    }
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Execution type enumeration (tag 150).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ExecType {
    /// New.
    New = b'0',
    /// Done for day.
    DoneForDay = b'3',
    /// Canceled.
    Canceled = b'4',
    /// Replaced.
    Replaced = b'5',
    /// Pending cancel.
    PendingCancel = b'6',
    /// Stopped.
    Stopped = b'7',
    /// Rejected.
    Rejected = b'8',
    /// Suspended.
    Suspended = b'9',
    /// Pending new.
    PendingNew = b'A',
    /// Calculated.
    Calculated = b'B',
    /// Expired.
    Expired = b'C',
    /// Restated.
    Restated = b'D',
    /// Pending replace.
    PendingReplace = b'E',
    /// Trade (partial fill or fill).
    Trade = b'F',
    /// Trade correct.
    TradeCorrect = b'G',
    /// Trade cancel.
    TradeCancel = b'H',
    /// Order status.
    OrderStatus = b'I',
}

impl ExecType {
    /// Creates an ExecType from its wire character.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Self::New),
            '3' => Some(Self::DoneForDay),
            '4' => Some(Self::Canceled),
            '5' => Some(Self::Replaced),
            '6' => Some(Self::PendingCancel),
            '7' => Some(Self::Stopped),
            '8' => Some(Self::Rejected),
            '9' => Some(Self::Suspended),
            'A' => Some(Self::PendingNew),
            'B' => Some(Self::Calculated),
            'C' => Some(Self::Expired),
            'D' => Some(Self::Restated),
            'E' => Some(Self::PendingReplace),
            'F' => Some(Self::Trade),
            'G' => Some(Self::TradeCorrect),
            'H' => Some(Self::TradeCancel),
            'I' => Some(Self::OrderStatus),
            _ => None,
        }
    }

    /// Returns the wire character for this execution type.
    #[must_use]
    pub const fn as_char(self) -> char {
        self as u8 as char
    }
}

impl fmt::Display for ExecType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Encryption method enumeration (tag 98).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum EncryptMethod {
    /// None / other.
    NoneOther = b'0',
    /// PKCS (proprietary).
    Pkcs = b'1',
    /// DES (ECB mode).
    Des = b'2',
    /// PKCS/DES (proprietary).
    PkcsDes = b'3',
    /// PGP/DES (defunct).
    PgpDes = b'4',
    /// PGP/DES-MD5.
    PgpDesMd5 = b'5',
    /// PEM/DES-MD5.
    PemDesMd5 = b'6',
}

impl EncryptMethod {
    /// Creates an EncryptMethod from its wire character.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Self::NoneOther),
            '1' => Some(Self::Pkcs),
            '2' => Some(Self::Des),
            '3' => Some(Self::PkcsDes),
            '4' => Some(Self::PgpDes),
            '5' => Some(Self::PgpDesMd5),
            '6' => Some(Self::PemDesMd5),
            _ => None,
        }
    }

    /// Returns the wire character for this encryption method.
    #[must_use]
    pub const fn as_char(self) -> char {
        self as u8 as char
    }
}

impl fmt::Display for EncryptMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Session reject reason enumeration (tag 373).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, FromPrimitive, ToPrimitive,
)]
#[repr(u8)]
pub enum SessionRejectReason {
    /// Invalid tag number.
    InvalidTagNumber = 0,
    /// Required tag missing.
    RequiredTagMissing = 1,
    /// Tag not defined for this message type.
    TagNotDefinedForMessage = 2,
    /// Undefined tag.
    UndefinedTag = 3,
    /// Tag specified without a value.
    TagSpecifiedWithoutValue = 4,
    /// Value is incorrect (out of range) for this tag.
    ValueIsIncorrect = 5,
    /// Incorrect data format for value.
    IncorrectDataFormat = 6,
    /// Decryption problem.
    DecryptionProblem = 7,
    /// Signature problem.
    SignatureProblem = 8,
    /// CompID problem.
    CompIdProblem = 9,
    /// SendingTime accuracy problem.
    SendingTimeAccuracyProblem = 10,
    /// Invalid MsgType.
    InvalidMsgType = 11,
    /// XML validation error.
    XmlValidationError = 12,
    /// Tag appears more than once.
    TagAppearsMoreThanOnce = 13,
    /// Tag specified out of required order.
    TagSpecifiedOutOfOrder = 14,
    /// Repeating group fields out of order.
    RepeatingGroupFieldsOutOfOrder = 15,
    /// Incorrect NumInGroup count for repeating group.
    IncorrectNumInGroupCount = 16,
    /// Non-data value includes the SOH field delimiter.
    NonDataValueIncludesFieldDelimiter = 17,
    /// Other.
    Other = 99,
}

impl SessionRejectReason {
    /// Creates a SessionRejectReason from its wire digit string.
    #[must_use]
    pub fn from_wire(s: &str) -> Option<Self> {
        let code: u8 = s.parse().ok()?;
        num_traits::FromPrimitive::from_u8(code)
    }

    /// Returns the wire digit string for this reason.
    #[must_use]
    pub const fn as_wire(self) -> &'static str {
        match self {
            Self::InvalidTagNumber => "0",
            Self::RequiredTagMissing => "1",
            Self::TagNotDefinedForMessage => "2",
            Self::UndefinedTag => "3",
            Self::TagSpecifiedWithoutValue => "4",
            Self::ValueIsIncorrect => "5",
            Self::IncorrectDataFormat => "6",
            Self::DecryptionProblem => "7",
            Self::SignatureProblem => "8",
            Self::CompIdProblem => "9",
            Self::SendingTimeAccuracyProblem => "10",
            Self::InvalidMsgType => "11",
            Self::XmlValidationError => "12",
            Self::TagAppearsMoreThanOnce => "13",
            Self::TagSpecifiedOutOfOrder => "14",
            Self::RepeatingGroupFieldsOutOfOrder => "15",
            Self::IncorrectNumInGroupCount => "16",
            Self::NonDataValueIncludesFieldDelimiter => "17",
            Self::Other => "99",
        }
    }
}

impl fmt::Display for SessionRejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_wire())
    }
}

/// Market data entry type enumeration (tag 269).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum MDEntryType {
    /// Bid.
    Bid = b'0',
    /// Offer.
    Offer = b'1',
    /// Trade.
    Trade = b'2',
    /// Index value.
    IndexValue = b'3',
    /// Opening price.
    OpeningPrice = b'4',
    /// Closing price.
    ClosingPrice = b'5',
    /// Settlement price.
    SettlementPrice = b'6',
    /// Trading session high price.
    TradingSessionHighPrice = b'7',
    /// Trading session low price.
    TradingSessionLowPrice = b'8',
    /// Trading session VWAP price.
    TradingSessionVwapPrice = b'9',
    /// Imbalance.
    Imbalance = b'A',
    /// Trade volume.
    TradeVolume = b'B',
    /// Open interest.
    OpenInterest = b'C',
}

impl MDEntryType {
    /// Creates an MDEntryType from its wire character.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Self::Bid),
            '1' => Some(Self::Offer),
            '2' => Some(Self::Trade),
            '3' => Some(Self::IndexValue),
            '4' => Some(Self::OpeningPrice),
            '5' => Some(Self::ClosingPrice),
            '6' => Some(Self::SettlementPrice),
            '7' => Some(Self::TradingSessionHighPrice),
            '8' => Some(Self::TradingSessionLowPrice),
            '9' => Some(Self::TradingSessionVwapPrice),
            'A' => Some(Self::Imbalance),
            'B' => Some(Self::TradeVolume),
            'C' => Some(Self::OpenInterest),
            _ => None,
        }
    }

    /// Returns the wire character for this entry type.
    #[must_use]
    pub const fn as_char(self) -> char {
        self as u8 as char
    }
}

impl fmt::Display for MDEntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Subscription request type enumeration (tag 263).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SubscriptionRequestType {
    /// Snapshot only.
    Snapshot = b'0',
    /// Snapshot plus updates.
    SnapshotPlusUpdates = b'1',
    /// Disable previous snapshot plus updates.
    Unsubscribe = b'2',
}

impl SubscriptionRequestType {
    /// Creates a SubscriptionRequestType from its wire character.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Self::Snapshot),
            '1' => Some(Self::SnapshotPlusUpdates),
            '2' => Some(Self::Unsubscribe),
            _ => None,
        }
    }

    /// Returns the wire character for this subscription request type.
    #[must_use]
    pub const fn as_char(self) -> char {
        self as u8 as char
    }
}

impl fmt::Display for SubscriptionRequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
