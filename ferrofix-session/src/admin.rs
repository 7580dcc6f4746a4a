/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Administrative message constructors.
//!
//! Pure builders for the session-level messages. The engine stamps the
//! standard header (34/49/56/52) at send time; these functions produce only
//! the message-specific body.

use crate::config::SessionConfig;
use ferrofix_core::enums::{EncryptMethod, SessionRejectReason};
use ferrofix_core::field::{Field, FieldValue};
use ferrofix_core::message::{Message, MsgType};
use ferrofix_core::tags;
use ferrofix_core::types::UtcTimestamp;

/// Builds a Logon (35=A) with EncryptMethod, HeartBtInt, the optional
/// ResetSeqNumFlag, configured extras, and authorizer fields.
#[must_use]
pub fn logon(config: &SessionConfig, now: UtcTimestamp) -> Message {
    let mut msg = Message::new(MsgType::Logon)
        .with(Field::new(
            tags::ENCRYPT_METHOD,
            FieldValue::EncryptMethod(EncryptMethod::NoneOther),
        ))
        .with(Field::uint(
            tags::HEART_BT_INT,
            config.heartbeat_interval.as_secs(),
        ));
    if config.reset_seq_num_on_logon {
        msg.push(Field::bool(tags::RESET_SEQ_NUM_FLAG, true));
    }
    for field in &config.extra_logon_fields {
        msg.push(field.clone());
    }
    if let Some(authorizer) = &config.logon_authorizer {
        for field in authorizer.logon_fields(config, now) {
            msg.push(field);
        }
    }
    msg
}

/// Builds a Logout (35=5) with optional Text.
#[must_use]
pub fn logout(text: Option<&str>) -> Message {
    let mut msg = Message::new(MsgType::Logout);
    if let Some(text) = text {
        msg.push(Field::str(tags::TEXT, text));
    }
    msg
}

/// Builds a Heartbeat (35=0), echoing a TestReqID when answering a
/// TestRequest.
#[must_use]
pub fn heartbeat(test_req_id: Option<&str>) -> Message {
    let mut msg = Message::new(MsgType::Heartbeat);
    if let Some(id) = test_req_id {
        msg.push(Field::str(tags::TEST_REQ_ID, id));
    }
    msg
}

/// Builds a TestRequest (35=1).
#[must_use]
pub fn test_request(test_req_id: &str) -> Message {
    Message::new(MsgType::TestRequest).with(Field::str(tags::TEST_REQ_ID, test_req_id))
}

/// Builds a ResendRequest (35=2) for `[begin, end]`; `end == 0` means
/// everything from `begin` on.
#[must_use]
pub fn resend_request(begin: u64, end: u64) -> Message {
    Message::new(MsgType::ResendRequest)
        .with(Field::uint(tags::BEGIN_SEQ_NO, begin))
        .with(Field::uint(tags::END_SEQ_NO, end))
}

/// Builds a SequenceReset (35=4): a gap fill (123=Y) or a hard reset.
#[must_use]
pub fn sequence_reset(new_seq_no: u64, gap_fill: bool) -> Message {
    let mut msg = Message::new(MsgType::SequenceReset);
    if gap_fill {
        msg.push(Field::bool(tags::GAP_FILL_FLAG, true));
    }
    msg.push(Field::uint(tags::NEW_SEQ_NO, new_seq_no));
    msg
}

/// Builds a session Reject (35=3) naming the offending message and tag.
#[must_use]
pub fn reject(
    ref_seq_num: u64,
    ref_tag_id: Option<u32>,
    reason: SessionRejectReason,
    text: &str,
) -> Message {
    let mut msg = Message::new(MsgType::Reject).with(Field::uint(tags::REF_SEQ_NUM, ref_seq_num));
    if let Some(tag) = ref_tag_id {
        msg.push(Field::uint(tags::REF_TAG_ID, u64::from(tag)));
    }
    msg.push(Field::new(
        tags::SESSION_REJECT_REASON,
        FieldValue::SessionRejectReason(reason),
    ));
    msg.push(Field::str(tags::TEXT, text));
    msg
}

/// Builds a BusinessMessageReject (35=j) for an unsupported message type.
#[must_use]
pub fn business_reject(ref_seq_num: u64, ref_msg_type: &str, text: &str) -> Message {
    Message::new(MsgType::BusinessMessageReject)
        .with(Field::uint(tags::REF_SEQ_NUM, ref_seq_num))
        .with(Field::str(tags::REF_MSG_TYPE, ref_msg_type))
        // BusinessRejectReason 3 = unsupported message type.
        .with(Field::uint(tags::BUSINESS_REJECT_REASON, 3))
        .with(Field::str(tags::TEXT, text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authorizer::LogonAuthorizer;
    use ferrofix_core::types::{CompId, FixVersion};
    use std::sync::Arc;
    use std::time::Duration;

    fn config() -> SessionConfig {
        SessionConfig::new(
            CompId::new("CLIENT").unwrap(),
            CompId::new("VENUE").unwrap(),
            FixVersion::Fix44,
        )
        .with_heartbeat_interval(Duration::from_secs(30))
    }

    #[test]
    fn test_logon_basics() {
        let msg = logon(&config(), UtcTimestamp::now());
        assert_eq!(*msg.msg_type(), MsgType::Logon);
        assert_eq!(msg.get_u64(tags::HEART_BT_INT), Some(30));
        assert!(msg.get(tags::ENCRYPT_METHOD).is_some());
        assert_eq!(msg.get_bool(tags::RESET_SEQ_NUM_FLAG), None);
    }

    #[test]
    fn test_logon_with_reset_flag_and_extras() {
        let cfg = config()
            .with_reset_seq_num_on_logon(true)
            .with_logon_field(Field::str(tags::USERNAME, "alice"));
        let msg = logon(&cfg, UtcTimestamp::now());
        assert_eq!(msg.get_bool(tags::RESET_SEQ_NUM_FLAG), Some(true));
        assert_eq!(msg.get_str(tags::USERNAME), Some("alice"));
    }

    #[test]
    fn test_logon_invokes_authorizer() {
        #[derive(Debug)]
        struct Stamp;
        impl LogonAuthorizer for Stamp {
            fn logon_fields(&self, _c: &SessionConfig, now: UtcTimestamp) -> Vec<Field> {
                vec![Field::str(9001, now.print())]
            }
        }

        let cfg = config().with_logon_authorizer(Arc::new(Stamp));
        let now = UtcTimestamp::from_millis(1_577_836_800_000);
        let msg = logon(&cfg, now);
        assert_eq!(msg.get_str(9001), Some(now.print().as_str()));
    }

    #[test]
    fn test_heartbeat_echo() {
        assert_eq!(heartbeat(None).get(tags::TEST_REQ_ID), None);
        assert_eq!(
            heartbeat(Some("abc")).get_str(tags::TEST_REQ_ID),
            Some("abc")
        );
    }

    #[test]
    fn test_resend_request_range() {
        let msg = resend_request(3, 0);
        assert_eq!(msg.get_u64(tags::BEGIN_SEQ_NO), Some(3));
        assert_eq!(msg.get_u64(tags::END_SEQ_NO), Some(0));
    }

    #[test]
    fn test_sequence_reset_forms() {
        let gap_fill = sequence_reset(17, true);
        assert_eq!(gap_fill.get_bool(tags::GAP_FILL_FLAG), Some(true));
        assert_eq!(gap_fill.get_u64(tags::NEW_SEQ_NO), Some(17));

        let reset = sequence_reset(9, false);
        assert_eq!(reset.get_bool(tags::GAP_FILL_FLAG), None);
        assert_eq!(reset.get_u64(tags::NEW_SEQ_NO), Some(9));
    }

    #[test]
    fn test_reject_fields() {
        let msg = reject(
            12,
            Some(55),
            SessionRejectReason::IncorrectDataFormat,
            "bad symbol",
        );
        assert_eq!(msg.get_u64(tags::REF_SEQ_NUM), Some(12));
        assert_eq!(msg.get_u64(tags::REF_TAG_ID), Some(55));
        assert_eq!(msg.get_str(tags::TEXT), Some("bad symbol"));
    }

    #[test]
    fn test_business_reject() {
        let msg = business_reject(4, "UX", "unsupported");
        assert_eq!(*msg.msg_type(), MsgType::BusinessMessageReject);
        assert_eq!(msg.get_u64(tags::BUSINESS_REJECT_REASON), Some(3));
    }
}
