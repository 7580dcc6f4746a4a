/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! FIX message decoder.
//!
//! Turns one complete wire frame into a typed [`Message`] using the field
//! registry. The decoder verifies the `8=`/`9=`/`35=` header order, the
//! BodyLength arithmetic, and the trailing checksum before decoding fields.
//!
//! Duplicate non-group tags are accepted (order preserved) and logged;
//! duplicates of the standard-header tags are reported as
//! [`DecodeError::DuplicateHeaderField`], which the session layer treats as
//! a header error.

use crate::checksum::{checksum, parse_checksum};
use ferrofix_core::error::DecodeError;
use ferrofix_core::field::Field;
use ferrofix_core::groups::{GROUP_SPECS, group_spec, split_blocks};
use ferrofix_core::message::{Message, MsgType};
use ferrofix_core::registry::{FieldRegistry, parse_raw};
use ferrofix_core::tags;
use memchr::memchr;
use std::collections::HashSet;
use tracing::debug;

/// SOH field delimiter.
const SOH: u8 = 0x01;

/// Length of the `10=ccc<SOH>` trailer.
const TRAILER_LEN: usize = 7;

/// Decodes one complete wire frame into a typed message.
///
/// # Errors
/// - `MalformedHeader` when the `8=`/`9=` prefix is missing or out of order
/// - `InvalidBodyLength` / `Truncated` on body length problems
/// - `ChecksumMismatch` when the trailer disagrees with the byte sum
/// - `MissingMsgType` when the body does not start with `35=`
/// - `DuplicateHeaderField` when a standard-header tag repeats
/// - field-level errors from the registry (`EmptyValue`, `InvalidFieldValue`)
pub fn decode_message(input: &[u8], registry: &FieldRegistry) -> Result<Message, DecodeError> {
    let (body, body_end) = frame_body(input)?;
    verify_checksum(input, body_end)?;

    let mut fields: Vec<Field> = Vec::with_capacity(16);
    let mut msg_type: Option<MsgType> = None;
    // BeginString and BodyLength already appeared in the frame header.
    let mut seen_header: HashSet<u32> = HashSet::from([tags::BEGIN_STRING, tags::BODY_LENGTH]);
    let mut seen: HashSet<u32> = HashSet::new();

    let mut offset = 0;
    while offset < body.len() {
        let soh = memchr(SOH, &body[offset..])
            .ok_or_else(|| DecodeError::InvalidTag("unterminated field".to_string()))?;
        let segment = std::str::from_utf8(&body[offset..offset + soh])?;
        offset += soh + 1;

        let (tag, raw) = parse_raw(segment)?;

        if tag == tags::MSG_TYPE {
            if msg_type.is_some() {
                return Err(DecodeError::DuplicateHeaderField { tag });
            }
            if !fields.is_empty() {
                return Err(DecodeError::MissingMsgType);
            }
            if raw.is_empty() {
                return Err(DecodeError::EmptyValue { tag });
            }
            msg_type = raw.parse().ok();
            continue;
        }

        if tags::is_header_tag(tag) && !seen_header.insert(tag) {
            return Err(DecodeError::DuplicateHeaderField { tag });
        }
        if !seen.insert(tag) && !is_group_field(tag) {
            debug!(tag, "duplicate non-group tag in message");
        }

        fields.push(registry.decode_field(tag, raw)?);
    }

    let msg_type = msg_type.ok_or(DecodeError::MissingMsgType)?;
    validate_groups(&fields)?;

    let mut message = Message::new(msg_type);
    for field in fields {
        message.push(field);
    }
    Ok(message)
}

/// Validates the frame header and returns the body slice and its end offset.
fn frame_body(input: &[u8]) -> Result<(&[u8], usize), DecodeError> {
    if !input.starts_with(b"8=") {
        return Err(DecodeError::MalformedHeader);
    }
    let first_soh = memchr(SOH, input).ok_or(DecodeError::MalformedHeader)?;

    let after_begin = &input[first_soh + 1..];
    if !after_begin.starts_with(b"9=") {
        return Err(DecodeError::MalformedHeader);
    }
    let second_soh = memchr(SOH, after_begin).ok_or(DecodeError::MalformedHeader)?;

    let len_text = std::str::from_utf8(&after_begin[2..second_soh])?;
    let body_len: usize = len_text.parse().map_err(|_| DecodeError::InvalidBodyLength)?;

    let body_start = first_soh + 1 + second_soh + 1;
    let body_end = body_start + body_len;
    if input.len() < body_end + TRAILER_LEN {
        return Err(DecodeError::Truncated);
    }
    if body_len == 0 || input[body_end - 1] != SOH {
        return Err(DecodeError::InvalidBodyLength);
    }

    Ok((&input[body_start..body_end], body_end))
}

/// Checks the `10=ccc<SOH>` trailer against the computed sum.
fn verify_checksum(input: &[u8], body_end: usize) -> Result<(), DecodeError> {
    let trailer = &input[body_end..body_end + TRAILER_LEN];
    if !trailer.starts_with(b"10=") || trailer[TRAILER_LEN - 1] != SOH {
        return Err(DecodeError::InvalidFieldValue {
            tag: tags::CHECK_SUM,
            reason: "malformed checksum trailer".to_string(),
        });
    }
    let declared = parse_checksum(&trailer[3..6]).ok_or_else(|| DecodeError::InvalidFieldValue {
        tag: tags::CHECK_SUM,
        reason: "checksum is not three digits".to_string(),
    })?;
    let calculated = checksum(&input[..body_end]);
    if calculated != declared {
        return Err(DecodeError::ChecksumMismatch {
            calculated,
            declared,
        });
    }
    Ok(())
}

/// Checks declared group counts against the delimiter-initiated blocks.
fn validate_groups(fields: &[Field]) -> Result<(), DecodeError> {
    for (index, field) in fields.iter().enumerate() {
        let Some(spec) = group_spec(field.tag) else {
            continue;
        };
        let declared =
            field
                .value
                .as_u64()
                .ok_or_else(|| DecodeError::InvalidFieldValue {
                    tag: field.tag,
                    reason: "group count is not an unsigned integer".to_string(),
                })? as u32;
        let (blocks, _) = split_blocks(spec, &fields[index + 1..]);
        if blocks.len() as u32 != declared {
            return Err(DecodeError::GroupCountMismatch {
                count_tag: field.tag,
                declared,
                actual: blocks.len() as u32,
            });
        }
    }
    Ok(())
}

/// True for tags that legitimately repeat as part of a repeating group.
fn is_group_field(tag: u32) -> bool {
    GROUP_SPECS
        .iter()
        .any(|g| g.count_tag == tag || g.members.contains(&tag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::render_checksum;
    use ferrofix_core::enums::Side;
    use ferrofix_core::field::FieldValue;

    /// Frames a raw body (starting at `35=`) with header and checksum.
    fn frame(body: &str) -> Vec<u8> {
        let mut out = format!("8=FIX.4.4\x019={}\x01{}", body.len(), body).into_bytes();
        let cks = checksum(&out);
        out.extend_from_slice(b"10=");
        out.extend_from_slice(&render_checksum(cks));
        out.push(SOH);
        out
    }

    fn registry() -> FieldRegistry {
        FieldRegistry::standard()
    }

    #[test]
    fn test_decode_logon() {
        // Scenario: a FIX 4.4 Logon with heartbeat interval 30.
        let bytes = frame(
            "35=A\x0134=1\x0149=C\x0156=S\x0152=20200101-00:00:00\x0198=0\x01108=30\x01",
        );
        let msg = decode_message(&bytes, &registry()).unwrap();

        assert_eq!(*msg.msg_type(), MsgType::Logon);
        assert_eq!(msg.seq_num(), Some(1));
        assert_eq!(msg.get_str(49), Some("C"));
        assert_eq!(msg.get_str(56), Some("S"));
        assert_eq!(msg.get_u64(108), Some(30));
        assert!(matches!(
            msg.get(98),
            Some(FieldValue::EncryptMethod(
                ferrofix_core::enums::EncryptMethod::NoneOther
            ))
        ));
    }

    #[test]
    fn test_decode_bad_checksum() {
        let mut bytes = frame("35=0\x0134=2\x0149=C\x0156=S\x0152=20200101-00:00:00\x01");
        // Flip the last checksum digit.
        let len = bytes.len();
        bytes[len - 2] = if bytes[len - 2] == b'0' { b'1' } else { b'0' };

        let err = decode_message(&bytes, &registry()).unwrap_err();
        assert!(matches!(err, DecodeError::ChecksumMismatch { .. }));
    }

    #[test]
    fn test_decode_malformed_header() {
        assert!(matches!(
            decode_message(b"9=5\x0135=0\x0110=000\x01", &registry()),
            Err(DecodeError::MalformedHeader)
        ));
        assert!(matches!(
            decode_message(b"8=FIX.4.4\x0135=0\x0110=000\x01", &registry()),
            Err(DecodeError::MalformedHeader)
        ));
    }

    #[test]
    fn test_decode_truncated() {
        let bytes = frame("35=0\x0134=2\x01");
        let err = decode_message(&bytes[..bytes.len() - 10], &registry()).unwrap_err();
        assert_eq!(err, DecodeError::Truncated);
    }

    #[test]
    fn test_decode_empty_value() {
        let bytes = frame("35=D\x0155=\x01");
        let err = decode_message(&bytes, &registry()).unwrap_err();
        assert_eq!(err, DecodeError::EmptyValue { tag: 55 });
    }

    #[test]
    fn test_decode_missing_msg_type() {
        let bytes = frame("34=1\x0149=C\x01");
        let err = decode_message(&bytes, &registry()).unwrap_err();
        assert_eq!(err, DecodeError::MissingMsgType);
    }

    #[test]
    fn test_decode_duplicate_header_tag() {
        let bytes = frame("35=0\x0134=1\x0134=2\x01");
        let err = decode_message(&bytes, &registry()).unwrap_err();
        assert_eq!(err, DecodeError::DuplicateHeaderField { tag: 34 });
    }

    #[test]
    fn test_decode_duplicate_body_tag_preserved_in_order() {
        let bytes = frame("35=D\x0158=first\x0158=second\x01");
        let msg = decode_message(&bytes, &registry()).unwrap();
        let texts: Vec<&str> = msg
            .fields()
            .filter(|f| f.tag == 58)
            .filter_map(|f| f.value.as_str())
            .collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[test]
    fn test_decode_unknown_tag_flows_through() {
        let bytes = frame("35=D\x019702=venue\x0155=BTC-USD\x01");
        let msg = decode_message(&bytes, &registry()).unwrap();
        assert!(matches!(msg.get(9702), Some(FieldValue::Unknown(_))));
        assert_eq!(msg.get_str(55), Some("BTC-USD"));
    }

    #[test]
    fn test_decode_typed_side() {
        let bytes = frame("35=D\x0111=ORD1\x0154=1\x01");
        let msg = decode_message(&bytes, &registry()).unwrap();
        assert_eq!(msg.get(54), Some(&FieldValue::Side(Side::Buy)));
    }

    #[test]
    fn test_decode_group_count_ok() {
        let bytes = frame("35=V\x01262=r1\x01267=2\x01269=0\x01269=1\x01");
        let msg = decode_message(&bytes, &registry()).unwrap();
        let view = msg.group(267).unwrap();
        assert_eq!(view.blocks.len(), 2);
        assert!(view.is_consistent());
    }

    #[test]
    fn test_decode_group_count_mismatch() {
        let bytes = frame("35=V\x01262=r1\x01267=3\x01269=0\x01269=1\x01");
        let err = decode_message(&bytes, &registry()).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::GroupCountMismatch {
                count_tag: 267,
                declared: 3,
                actual: 2,
            }
        ));
    }

    #[test]
    fn test_decode_rejects_body_length_lies() {
        // Declared body length points into the middle of a field.
        let bytes = b"8=FIX.4.4\x019=3\x0135=0\x0110=000\x01";
        let err = decode_message(bytes, &registry()).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::InvalidBodyLength | DecodeError::Truncated | DecodeError::ChecksumMismatch { .. }
        ));
    }
}
