/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Scalar types for FIX protocol fields.
//!
//! Every scalar here parses from and prints to its exact wire representation:
//! - [`UtcTimestamp`]: `YYYYMMDD-HH:MM:SS` or `YYYYMMDD-HH:MM:SS.sss`
//! - [`UtcDate`]: `YYYYMMDD`
//! - [`TzTimeOnly`]: `HH:MM:SS[.sss][Z|+HH|-HH|+HH:MM|-HH:MM]`
//! - [`FixVersion`]: `FIX.m.n` / `FIXT.1.1` BeginString values
//! - [`SeqNum`]: message sequence numbers starting at 1
//! - [`CompId`]: SenderCompID / TargetCompID identifiers

use crate::error::DecodeError;
use arrayvec::ArrayString;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum length for CompID strings in bytes.
pub const COMP_ID_MAX_LEN: usize = 32;

/// FIX message sequence number.
///
/// Sequence numbers start at 1 and increment for each message sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct SeqNum(u64);

impl SeqNum {
    /// Creates a new sequence number.
    #[inline]
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw sequence number value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Returns the next sequence number.
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Checks if this sequence number is valid (>= 1).
    #[inline]
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 >= 1
    }
}

impl Default for SeqNum {
    fn default() -> Self {
        Self(1)
    }
}

impl From<u64> for SeqNum {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<SeqNum> for u64 {
    fn from(seq: SeqNum) -> Self {
        seq.0
    }
}

impl fmt::Display for SeqNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Component identifier for FIX sessions.
///
/// Used for SenderCompID (tag 49) and TargetCompID (tag 56).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct CompId(ArrayString<COMP_ID_MAX_LEN>);

impl CompId {
    /// Creates a new CompId, or `None` if the string exceeds the maximum length.
    #[must_use]
    pub fn new(s: &str) -> Option<Self> {
        ArrayString::from(s).ok().map(Self)
    }

    /// Returns the CompId as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the length of the CompId in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the CompId is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for CompId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for CompId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CompId {
    type Err = arrayvec::CapacityError<()>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ArrayString::try_from(s)
            .map(Self)
            .map_err(|_| arrayvec::CapacityError::new(()))
    }
}

/// FIX UTCTimestamp (tags 52, 60, 122, ...).
///
/// Wire format is `YYYYMMDD-HH:MM:SS` or `YYYYMMDD-HH:MM:SS.sss`, all widths
/// fixed and zero-padded. Parsing accepts both forms; printing emits the
/// millisecond form only when the fractional part is nonzero. Precision is
/// truncated to milliseconds so values round-trip exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UtcTimestamp(DateTime<Utc>);

impl UtcTimestamp {
    const FMT_SECONDS: &'static str = "%Y%m%d-%H:%M:%S";
    const FMT_MILLIS: &'static str = "%Y%m%d-%H:%M:%S%.3f";

    /// Returns the current UTC time, truncated to millisecond precision.
    #[must_use]
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Creates a timestamp from a chrono datetime, truncating to milliseconds.
    #[must_use]
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        let millis = dt.timestamp_millis();
        Self(DateTime::from_timestamp_millis(millis).unwrap_or(DateTime::UNIX_EPOCH))
    }

    /// Creates a timestamp from milliseconds since the Unix epoch.
    #[must_use]
    pub fn from_millis(millis: i64) -> Self {
        Self(DateTime::from_timestamp_millis(millis).unwrap_or(DateTime::UNIX_EPOCH))
    }

    /// Returns milliseconds since the Unix epoch.
    #[inline]
    #[must_use]
    pub fn as_millis(self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Returns the underlying chrono datetime.
    #[inline]
    #[must_use]
    pub const fn to_datetime(self) -> DateTime<Utc> {
        self.0
    }

    /// Parses a wire-format timestamp.
    ///
    /// # Errors
    /// Returns `DecodeError::InvalidFieldValue` (tag 0) when the input matches
    /// neither the seconds nor the milliseconds form.
    pub fn parse(s: &str) -> Result<Self, DecodeError> {
        let fmt = match s.len() {
            17 => Self::FMT_SECONDS,
            21 => Self::FMT_MILLIS,
            _ => return Err(invalid_scalar(s, "UTCTimestamp")),
        };
        let naive = NaiveDateTime::parse_from_str(s, fmt)
            .map_err(|_| invalid_scalar(s, "UTCTimestamp"))?;
        Ok(Self(naive.and_utc()))
    }

    /// Prints the wire form, with milliseconds only when nonzero.
    #[must_use]
    pub fn print(&self) -> String {
        if self.0.timestamp_subsec_millis() == 0 {
            self.0.format(Self::FMT_SECONDS).to_string()
        } else {
            self.0.format(Self::FMT_MILLIS).to_string()
        }
    }
}

impl fmt::Display for UtcTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.print())
    }
}

/// FIX local market date (tags 64, 75, 272, ...), wire format `YYYYMMDD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UtcDate(NaiveDate);

impl UtcDate {
    /// Creates a date from a chrono `NaiveDate`.
    #[inline]
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns the underlying chrono date.
    #[inline]
    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.0
    }

    /// Parses a `YYYYMMDD` date.
    ///
    /// # Errors
    /// Returns `DecodeError::InvalidFieldValue` on malformed input.
    pub fn parse(s: &str) -> Result<Self, DecodeError> {
        if s.len() != 8 {
            return Err(invalid_scalar(s, "Date"));
        }
        NaiveDate::parse_from_str(s, "%Y%m%d")
            .map(Self)
            .map_err(|_| invalid_scalar(s, "Date"))
    }

    /// Prints the `YYYYMMDD` wire form.
    #[must_use]
    pub fn print(&self) -> String {
        self.0.format("%Y%m%d").to_string()
    }
}

impl fmt::Display for UtcDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.print())
    }
}

/// Timezone offset suffix of a [`TzTimeOnly`] value.
///
/// The shape of the offset (`Z`, `+HH`, `+HH:MM`) is part of the value so
/// printing reproduces the received bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TzOffset {
    /// UTC marker `Z`.
    Utc,
    /// Whole-hour offset, `+HH` or `-HH`.
    Hours(i8),
    /// Hour and minute offset, `+HH:MM` or `-HH:MM`. The sign lives on the
    /// hour component.
    HoursMinutes(i8, u8),
}

impl fmt::Display for TzOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utc => write!(f, "Z"),
            Self::Hours(h) => write!(f, "{:+03}", h),
            Self::HoursMinutes(h, m) => write!(f, "{:+03}:{:02}", h, m),
        }
    }
}

/// FIX TZTimeOnly (tag 273 and friends).
///
/// Wire format `HH:MM:SS[.sss][Z|+HH|-HH|+HH:MM|-HH:MM]`; the offset is
/// optional and its textual shape is preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TzTimeOnly {
    /// Time of day, millisecond precision.
    pub time: NaiveTime,
    /// Optional timezone suffix.
    pub offset: Option<TzOffset>,
}

impl TzTimeOnly {
    /// Creates a time-of-day value.
    #[inline]
    #[must_use]
    pub const fn new(time: NaiveTime, offset: Option<TzOffset>) -> Self {
        Self { time, offset }
    }

    /// Parses a wire-format time of day.
    ///
    /// # Errors
    /// Returns `DecodeError::InvalidFieldValue` on malformed input.
    pub fn parse(s: &str) -> Result<Self, DecodeError> {
        let bytes = s.as_bytes();
        if bytes.len() < 8 || bytes[2] != b':' || bytes[5] != b':' {
            return Err(invalid_scalar(s, "TZTimeOnly"));
        }
        let hour = fixed_digits(&s[0..2]).ok_or_else(|| invalid_scalar(s, "TZTimeOnly"))?;
        let min = fixed_digits(&s[3..5]).ok_or_else(|| invalid_scalar(s, "TZTimeOnly"))?;
        let sec = fixed_digits(&s[6..8]).ok_or_else(|| invalid_scalar(s, "TZTimeOnly"))?;

        let mut rest = &s[8..];
        let mut millis = 0;
        if let Some(frac) = rest.strip_prefix('.') {
            if frac.len() < 3 {
                return Err(invalid_scalar(s, "TZTimeOnly"));
            }
            millis = fixed_digits(&frac[0..3]).ok_or_else(|| invalid_scalar(s, "TZTimeOnly"))?;
            rest = &frac[3..];
        }

        let offset = match rest {
            "" => None,
            "Z" => Some(TzOffset::Utc),
            _ => Some(parse_offset(rest).ok_or_else(|| invalid_scalar(s, "TZTimeOnly"))?),
        };

        let time = NaiveTime::from_hms_milli_opt(hour, min, sec, millis)
            .ok_or_else(|| invalid_scalar(s, "TZTimeOnly"))?;
        Ok(Self { time, offset })
    }

    /// Prints the wire form, with milliseconds only when nonzero.
    #[must_use]
    pub fn print(&self) -> String {
        let millis = self.time.nanosecond() / 1_000_000;
        let mut out = if millis == 0 {
            self.time.format("%H:%M:%S").to_string()
        } else {
            self.time.format("%H:%M:%S%.3f").to_string()
        };
        if let Some(offset) = self.offset {
            out.push_str(&offset.to_string());
        }
        out
    }
}

impl fmt::Display for TzTimeOnly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.print())
    }
}

/// Parses `±HH` or `±HH:MM`.
fn parse_offset(s: &str) -> Option<TzOffset> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1i8, &s[1..]),
        b'-' => (-1i8, &s[1..]),
        _ => return None,
    };
    match rest.len() {
        2 => {
            let h: u32 = fixed_digits(rest)?;
            Some(TzOffset::Hours(sign * h as i8))
        }
        5 if rest.as_bytes()[2] == b':' => {
            let h: u32 = fixed_digits(&rest[0..2])?;
            let m: u32 = fixed_digits(&rest[3..5])?;
            Some(TzOffset::HoursMinutes(sign * h as i8, m as u8))
        }
        _ => None,
    }
}

/// Parses a fixed-width run of ASCII digits.
fn fixed_digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn invalid_scalar(raw: &str, kind: &str) -> DecodeError {
    DecodeError::InvalidFieldValue {
        tag: 0,
        reason: format!("'{}' is not a valid {}", raw, kind),
    }
}

/// FIX protocol version, as carried in BeginString (tag 8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FixVersion {
    /// FIX 4.0
    Fix40,
    /// FIX 4.1
    Fix41,
    /// FIX 4.2
    Fix42,
    /// FIX 4.3
    Fix43,
    /// FIX 4.4
    Fix44,
    /// FIX 5.0 (FIXT.1.1 transport)
    Fix50,
    /// FIX 5.0 SP1 (FIXT.1.1 transport)
    Fix50Sp1,
    /// FIX 5.0 SP2 (FIXT.1.1 transport)
    Fix50Sp2,
    /// FIXT 1.1 session layer
    Fixt11,
}

impl FixVersion {
    /// Returns the BeginString value for this version.
    #[must_use]
    pub const fn begin_string(&self) -> &'static str {
        match self {
            Self::Fix40 => "FIX.4.0",
            Self::Fix41 => "FIX.4.1",
            Self::Fix42 => "FIX.4.2",
            Self::Fix43 => "FIX.4.3",
            Self::Fix44 => "FIX.4.4",
            Self::Fix50 | Self::Fix50Sp1 | Self::Fix50Sp2 | Self::Fixt11 => "FIXT.1.1",
        }
    }

    /// Returns the ApplVerID for FIX 5.0+ versions.
    #[must_use]
    pub const fn appl_ver_id(&self) -> Option<&'static str> {
        match self {
            Self::Fix50 => Some("7"),
            Self::Fix50Sp1 => Some("8"),
            Self::Fix50Sp2 => Some("9"),
            _ => None,
        }
    }

    /// Returns true if this version uses the FIXT transport layer.
    #[must_use]
    pub const fn uses_fixt(&self) -> bool {
        matches!(
            self,
            Self::Fix50 | Self::Fix50Sp1 | Self::Fix50Sp2 | Self::Fixt11
        )
    }

    /// Parses a wire BeginString (`FIX.m.n` / `FIXT.1.1`).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "FIX.4.0" => Some(Self::Fix40),
            "FIX.4.1" => Some(Self::Fix41),
            "FIX.4.2" => Some(Self::Fix42),
            "FIX.4.3" => Some(Self::Fix43),
            "FIX.4.4" => Some(Self::Fix44),
            "FIX.5.0" => Some(Self::Fix50),
            "FIX.5.0SP1" => Some(Self::Fix50Sp1),
            "FIX.5.0SP2" => Some(Self::Fix50Sp2),
            "FIXT.1.1" => Some(Self::Fixt11),
            _ => None,
        }
    }
}

impl FromStr for FixVersion {
    type Err = crate::error::ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            crate::error::ConfigError::Invalid(format!("unknown FIX version '{}'", s))
        })
    }
}

impl fmt::Display for FixVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.begin_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_num_operations() {
        let seq = SeqNum::new(5);
        assert_eq!(seq.value(), 5);
        assert_eq!(seq.next().value(), 6);
        assert!(seq.is_valid());
        assert!(!SeqNum::new(0).is_valid());
    }

    #[test]
    fn test_comp_id() {
        let id = CompId::new("SENDER").unwrap();
        assert_eq!(id.as_str(), "SENDER");
        assert!(CompId::new(&"A".repeat(COMP_ID_MAX_LEN + 1)).is_none());
    }

    #[test]
    fn test_timestamp_parse_seconds() {
        let ts = UtcTimestamp::parse("20200101-00:00:00").unwrap();
        assert_eq!(ts.print(), "20200101-00:00:00");
    }

    #[test]
    fn test_timestamp_parse_millis() {
        let ts = UtcTimestamp::parse("20200101-12:34:56.789").unwrap();
        assert_eq!(ts.print(), "20200101-12:34:56.789");
    }

    #[test]
    fn test_timestamp_zero_millis_prints_short_form() {
        let ts = UtcTimestamp::parse("20200101-12:34:56.000").unwrap();
        assert_eq!(ts.print(), "20200101-12:34:56");
    }

    #[test]
    fn test_timestamp_rejects_unpadded() {
        assert!(UtcTimestamp::parse("2020101-1:2:3").is_err());
        assert!(UtcTimestamp::parse("garbage").is_err());
    }

    #[test]
    fn test_timestamp_zero_padded_output() {
        let ts = UtcTimestamp::parse("20200102-03:04:05").unwrap();
        assert_eq!(ts.print(), "20200102-03:04:05");
    }

    #[test]
    fn test_date_roundtrip() {
        let d = UtcDate::parse("20240229").unwrap();
        assert_eq!(d.print(), "20240229");
        assert!(UtcDate::parse("2024022").is_err());
        assert!(UtcDate::parse("20240230").is_err());
    }

    #[test]
    fn test_tz_time_plain() {
        let t = TzTimeOnly::parse("07:39:00").unwrap();
        assert_eq!(t.offset, None);
        assert_eq!(t.print(), "07:39:00");
    }

    #[test]
    fn test_tz_time_with_millis_and_zulu() {
        let t = TzTimeOnly::parse("07:39:00.123Z").unwrap();
        assert_eq!(t.offset, Some(TzOffset::Utc));
        assert_eq!(t.print(), "07:39:00.123Z");
    }

    #[test]
    fn test_tz_time_hour_offset() {
        let t = TzTimeOnly::parse("13:00:00-05").unwrap();
        assert_eq!(t.offset, Some(TzOffset::Hours(-5)));
        assert_eq!(t.print(), "13:00:00-05");
    }

    #[test]
    fn test_tz_time_hour_minute_offset() {
        let t = TzTimeOnly::parse("13:00:00+05:30").unwrap();
        assert_eq!(t.offset, Some(TzOffset::HoursMinutes(5, 30)));
        assert_eq!(t.print(), "13:00:00+05:30");
    }

    #[test]
    fn test_tz_time_rejects_garbage() {
        assert!(TzTimeOnly::parse("25:00:00").is_err());
        assert!(TzTimeOnly::parse("12:00").is_err());
        assert!(TzTimeOnly::parse("12:00:00+5").is_err());
    }

    #[test]
    fn test_version_parse_and_print() {
        assert_eq!(FixVersion::parse("FIX.4.4"), Some(FixVersion::Fix44));
        assert_eq!(FixVersion::parse("FIXT.1.1"), Some(FixVersion::Fixt11));
        assert_eq!(FixVersion::parse("FIX.9.9"), None);
        assert_eq!(FixVersion::Fix44.begin_string(), "FIX.4.4");
        assert_eq!(FixVersion::Fix50Sp2.begin_string(), "FIXT.1.1");
    }

    #[test]
    fn test_version_uses_fixt() {
        assert!(!FixVersion::Fix44.uses_fixt());
        assert!(FixVersion::Fix50.uses_fixt());
    }
}
