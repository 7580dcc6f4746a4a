/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Well-known FIX tag numbers.
//!
//! Session-layer and common application tags, named per the FIX dictionary.

/// Account (1).
pub const ACCOUNT: u32 = 1;
/// AvgPx (6).
pub const AVG_PX: u32 = 6;
/// BeginString (8).
pub const BEGIN_STRING: u32 = 8;
/// BodyLength (9).
pub const BODY_LENGTH: u32 = 9;
/// CheckSum (10).
pub const CHECK_SUM: u32 = 10;
/// ClOrdID (11).
pub const CL_ORD_ID: u32 = 11;
/// CumQty (14).
pub const CUM_QTY: u32 = 14;
/// ExecID (17).
pub const EXEC_ID: u32 = 17;
/// HandlInst (21).
pub const HANDL_INST: u32 = 21;
/// MsgSeqNum (34).
pub const MSG_SEQ_NUM: u32 = 34;
/// MsgType (35).
pub const MSG_TYPE: u32 = 35;
/// NewSeqNo (36).
pub const NEW_SEQ_NO: u32 = 36;
/// OrderID (37).
pub const ORDER_ID: u32 = 37;
/// OrderQty (38).
pub const ORDER_QTY: u32 = 38;
/// OrdStatus (39).
pub const ORD_STATUS: u32 = 39;
/// OrdType (40).
pub const ORD_TYPE: u32 = 40;
/// OrigClOrdID (41).
pub const ORIG_CL_ORD_ID: u32 = 41;
/// PossDupFlag (43).
pub const POSS_DUP_FLAG: u32 = 43;
/// Price (44).
pub const PRICE: u32 = 44;
/// RefSeqNum (45).
pub const REF_SEQ_NUM: u32 = 45;
/// SenderCompID (49).
pub const SENDER_COMP_ID: u32 = 49;
/// SendingTime (52).
pub const SENDING_TIME: u32 = 52;
/// Side (54).
pub const SIDE: u32 = 54;
/// Symbol (55).
pub const SYMBOL: u32 = 55;
/// TargetCompID (56).
pub const TARGET_COMP_ID: u32 = 56;
/// Text (58).
pub const TEXT: u32 = 58;
/// TimeInForce (59).
pub const TIME_IN_FORCE: u32 = 59;
/// TransactTime (60).
pub const TRANSACT_TIME: u32 = 60;
/// BeginSeqNo (7).
pub const BEGIN_SEQ_NO: u32 = 7;
/// EndSeqNo (16).
pub const END_SEQ_NO: u32 = 16;
/// PossResend (97).
pub const POSS_RESEND: u32 = 97;
/// EncryptMethod (98).
pub const ENCRYPT_METHOD: u32 = 98;
/// HeartBtInt (108).
pub const HEART_BT_INT: u32 = 108;
/// TestReqID (112).
pub const TEST_REQ_ID: u32 = 112;
/// OrigSendingTime (122).
pub const ORIG_SENDING_TIME: u32 = 122;
/// GapFillFlag (123).
pub const GAP_FILL_FLAG: u32 = 123;
/// ResetSeqNumFlag (141).
pub const RESET_SEQ_NUM_FLAG: u32 = 141;
/// ExecType (150).
pub const EXEC_TYPE: u32 = 150;
/// LeavesQty (151).
pub const LEAVES_QTY: u32 = 151;
/// MDReqID (262).
pub const MD_REQ_ID: u32 = 262;
/// SubscriptionRequestType (263).
pub const SUBSCRIPTION_REQUEST_TYPE: u32 = 263;
/// MarketDepth (264).
pub const MARKET_DEPTH: u32 = 264;
/// NoMDEntryTypes (267).
pub const NO_MD_ENTRY_TYPES: u32 = 267;
/// NoMDEntries (268).
pub const NO_MD_ENTRIES: u32 = 268;
/// MDEntryType (269).
pub const MD_ENTRY_TYPE: u32 = 269;
/// RefTagID (371).
pub const REF_TAG_ID: u32 = 371;
/// RefMsgType (372).
pub const REF_MSG_TYPE: u32 = 372;
/// SessionRejectReason (373).
pub const SESSION_REJECT_REASON: u32 = 373;
/// BusinessRejectReason (380).
pub const BUSINESS_REJECT_REASON: u32 = 380;
/// Username (553).
pub const USERNAME: u32 = 553;
/// Password (554).
pub const PASSWORD: u32 = 554;

/// Standard-header tags that must appear exactly once per message.
pub const HEADER_TAGS: &[u32] = &[
    BEGIN_STRING,
    BODY_LENGTH,
    MSG_SEQ_NUM,
    MSG_TYPE,
    SENDER_COMP_ID,
    TARGET_COMP_ID,
    SENDING_TIME,
];

/// Returns true for the standard-header tags (8/9/34/35/49/56/52).
#[inline]
#[must_use]
pub fn is_header_tag(tag: u32) -> bool {
    HEADER_TAGS.contains(&tag)
}
