//! End-to-end session engine scenarios over an in-memory duplex transport.
//!
//! A scripted `Peer` plays the venue side of the pipe: it frames and decodes
//! with the real codec, stamps its own sequence numbers, and asserts on what
//! the engine puts on the wire.

use bytes::BytesMut;
use ferrofix_codec::decoder::decode_message;
use ferrofix_codec::encoder::encode_message;
use ferrofix_codec::framing::FrameCodec;
use ferrofix_core::error::{FixError, SessionError};
use ferrofix_core::field::Field;
use ferrofix_core::message::{Message, MsgType};
use ferrofix_core::registry::FieldRegistry;
use ferrofix_core::tags;
use ferrofix_core::types::{CompId, FixVersion, UtcTimestamp};
use ferrofix_session::{DisconnectReason, SessionConfig, SessionEvent, connect};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt, DuplexStream};
use tokio::sync::mpsc;
use tokio_util::codec::Decoder as _;

/// Scripted counterparty reading and writing real wire frames.
struct Peer {
    stream: DuplexStream,
    buf: BytesMut,
    codec: FrameCodec,
    registry: Arc<FieldRegistry>,
    seq: u64,
}

impl Peer {
    fn new(stream: DuplexStream, registry: Arc<FieldRegistry>) -> Self {
        Self {
            stream,
            buf: BytesMut::with_capacity(4096),
            codec: FrameCodec::new(),
            registry,
            seq: 1,
        }
    }

    async fn read_message(&mut self) -> Message {
        self.try_read_message().await.expect("peer: unexpected eof")
    }

    async fn try_read_message(&mut self) -> Option<Message> {
        loop {
            if let Some(frame) = self.codec.decode(&mut self.buf).unwrap() {
                return Some(decode_message(&frame, &self.registry).unwrap());
            }
            if self.stream.read_buf(&mut self.buf).await.unwrap() == 0 {
                return None;
            }
        }
    }

    /// Reads until a message of the wanted type arrives, skipping the rest.
    async fn read_until(&mut self, wanted: MsgType) -> Message {
        loop {
            let msg = self.read_message().await;
            if *msg.msg_type() == wanted {
                return msg;
            }
        }
    }

    async fn send(&mut self, msg: Message) {
        let seq = self.seq;
        self.seq += 1;
        self.send_with_seq(msg, seq).await;
    }

    async fn send_with_seq(&mut self, msg: Message, seq: u64) {
        let mut stamped = Message::new(msg.msg_type().clone());
        stamped.push(Field::uint(tags::MSG_SEQ_NUM, seq));
        stamped.push(Field::str(tags::SENDER_COMP_ID, "S"));
        stamped.push(Field::str(tags::TARGET_COMP_ID, "C"));
        stamped.push(Field::timestamp(tags::SENDING_TIME, UtcTimestamp::now()));
        for field in msg.fields() {
            stamped.push(field.clone());
        }
        let frame = encode_message(&stamped, FixVersion::Fix44);
        self.stream.write_all(&frame).await.unwrap();
    }

    async fn send_raw(&mut self, bytes: &[u8]) {
        self.stream.write_all(bytes).await.unwrap();
    }

    /// Standard server side of the logon handshake.
    async fn accept_logon(&mut self) {
        let logon = self.read_message().await;
        assert_eq!(*logon.msg_type(), MsgType::Logon);
        assert_eq!(logon.seq_num(), Some(1));
        assert!(logon.get_u64(tags::HEART_BT_INT).is_some());
        self.send(Message::new(MsgType::Logon).with(Field::uint(tags::ENCRYPT_METHOD, 0)))
            .await;
    }

    /// Confirms a client-initiated logout.
    async fn confirm_logout(&mut self) {
        self.read_until(MsgType::Logout).await;
        self.send(Message::new(MsgType::Logout)).await;
    }
}

fn config() -> SessionConfig {
    SessionConfig::new(
        CompId::new("C").unwrap(),
        CompId::new("S").unwrap(),
        FixVersion::Fix44,
    )
}

fn exec_report(exec_id: &str) -> Message {
    Message::new(MsgType::ExecutionReport).with(Field::str(tags::EXEC_ID, exec_id))
}

fn order(cl_ord_id: &str) -> Message {
    Message::new(MsgType::NewOrderSingle).with(Field::str(tags::CL_ORD_ID, cl_ord_id))
}

#[tokio::test]
async fn logon_handshake_and_clean_logout() {
    let registry = Arc::new(FieldRegistry::standard());
    let (client, server) = tokio::io::duplex(4096);
    let (events_tx, mut events_rx) = mpsc::unbounded_channel();

    let peer_registry = Arc::clone(&registry);
    let peer_task = tokio::spawn(async move {
        let mut peer = Peer::new(server, peer_registry);
        peer.accept_logon().await;
        peer.confirm_logout().await;
    });

    let handle = connect(client, config(), registry, Some(events_tx))
        .await
        .expect("logon should succeed");
    assert_eq!(events_rx.recv().await, Some(SessionEvent::LoggedOn));

    let reason = handle.close().await;
    assert_eq!(reason, DisconnectReason::UserInitiated);
    peer_task.await.unwrap();

    assert_eq!(
        events_rx.recv().await,
        Some(SessionEvent::Disconnected {
            reason: DisconnectReason::UserInitiated
        })
    );
}

#[tokio::test]
async fn logon_rejected_by_peer() {
    let registry = Arc::new(FieldRegistry::standard());
    let (client, server) = tokio::io::duplex(4096);

    let peer_registry = Arc::clone(&registry);
    tokio::spawn(async move {
        let mut peer = Peer::new(server, peer_registry);
        let logon = peer.read_message().await;
        assert_eq!(*logon.msg_type(), MsgType::Logon);
        peer.send(Message::new(MsgType::Logout).with(Field::str(tags::TEXT, "bad credentials")))
            .await;
    });

    let err = connect(client, config(), registry, None)
        .await
        .expect_err("logon should be rejected");
    match err {
        FixError::Session(SessionError::LogonRejected { reason }) => {
            assert_eq!(reason, "bad credentials");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn gap_detection_resend_and_in_order_delivery() {
    // Inbound seqs arrive 1 (Logon), 2, 5; the engine must request 3..,
    // absorb the replay, and deliver 2,3,4,5 in order exactly once.
    let registry = Arc::new(FieldRegistry::standard());
    let (client, server) = tokio::io::duplex(4096);
    let (events_tx, mut events_rx) = mpsc::unbounded_channel();

    let peer_registry = Arc::clone(&registry);
    let peer_task = tokio::spawn(async move {
        let mut peer = Peer::new(server, peer_registry);
        peer.accept_logon().await;

        peer.send(exec_report("E2")).await; // seq 2
        peer.send_with_seq(exec_report("E5"), 5).await; // gap: 3, 4 missing
        peer.seq = 6;

        let resend = peer.read_until(MsgType::ResendRequest).await;
        assert_eq!(resend.get_u64(tags::BEGIN_SEQ_NO), Some(3));
        assert_eq!(resend.get_u64(tags::END_SEQ_NO), Some(0));

        peer.send_with_seq(
            exec_report("E3").with(Field::bool(tags::POSS_DUP_FLAG, true)),
            3,
        )
        .await;
        peer.send_with_seq(
            exec_report("E4").with(Field::bool(tags::POSS_DUP_FLAG, true)),
            4,
        )
        .await;

        peer.confirm_logout().await;
    });

    let mut handle = connect(client, config(), registry, Some(events_tx))
        .await
        .unwrap();

    let mut exec_ids = Vec::new();
    for _ in 0..4 {
        let inbound = handle.recv().await.expect("app message");
        exec_ids.push(inbound.message.get_str(tags::EXEC_ID).unwrap().to_string());
    }
    assert_eq!(exec_ids, vec!["E2", "E3", "E4", "E5"]);

    let reason = handle.close().await;
    assert_eq!(reason, DisconnectReason::UserInitiated);
    peer_task.await.unwrap();

    let mut saw_resend_request = false;
    while let Ok(event) = events_rx.try_recv() {
        if let SessionEvent::ResendRequested { begin, end } = event {
            assert_eq!((begin, end), (3, 0));
            saw_resend_request = true;
        }
    }
    assert!(saw_resend_request);
}

#[tokio::test]
async fn resend_request_replays_apps_and_gap_fills_admin() {
    // Engine has sent Logon(1), apps 2-4, Heartbeat(5). Peer requests
    // 2..6: expect apps 2-4 with PossDupFlag + OrigSendingTime, then one
    // GapFill with NewSeqNo=6 covering the heartbeat.
    let registry = Arc::new(FieldRegistry::standard());
    let (client, server) = tokio::io::duplex(4096);

    let peer_registry = Arc::clone(&registry);
    let peer_task = tokio::spawn(async move {
        let mut peer = Peer::new(server, peer_registry);
        peer.accept_logon().await;

        for expected in ["A", "B", "C"] {
            let msg = peer.read_message().await;
            assert_eq!(*msg.msg_type(), MsgType::NewOrderSingle);
            assert_eq!(msg.get_str(tags::CL_ORD_ID), Some(expected));
        }

        peer.send(Message::new(MsgType::TestRequest).with(Field::str(tags::TEST_REQ_ID, "ping")))
            .await;
        let heartbeat = peer.read_until(MsgType::Heartbeat).await;
        assert_eq!(heartbeat.get_str(tags::TEST_REQ_ID), Some("ping"));
        assert_eq!(heartbeat.seq_num(), Some(5));

        peer.send(
            Message::new(MsgType::ResendRequest)
                .with(Field::uint(tags::BEGIN_SEQ_NO, 2))
                .with(Field::uint(tags::END_SEQ_NO, 6)),
        )
        .await;

        for (expected_seq, expected_id) in [(2, "A"), (3, "B"), (4, "C")] {
            let replayed = peer.read_message().await;
            assert_eq!(*replayed.msg_type(), MsgType::NewOrderSingle);
            assert_eq!(replayed.seq_num(), Some(expected_seq));
            assert_eq!(replayed.get_str(tags::CL_ORD_ID), Some(expected_id));
            assert!(replayed.poss_dup());
            assert!(replayed.get_timestamp(tags::ORIG_SENDING_TIME).is_some());
        }

        let gap_fill = peer.read_message().await;
        assert_eq!(*gap_fill.msg_type(), MsgType::SequenceReset);
        assert_eq!(gap_fill.seq_num(), Some(5));
        assert_eq!(gap_fill.get_bool(tags::GAP_FILL_FLAG), Some(true));
        assert_eq!(gap_fill.get_u64(tags::NEW_SEQ_NO), Some(6));
        assert!(gap_fill.poss_dup());

        peer.confirm_logout().await;
    });

    let handle = connect(client, config(), registry, None).await.unwrap();
    for id in ["A", "B", "C"] {
        handle.send(order(id)).await.unwrap();
    }

    // Give the peer script time to drive the whole exchange before closing.
    tokio::time::sleep(Duration::from_millis(200)).await;
    let reason = handle.close().await;
    assert_eq!(reason, DisconnectReason::UserInitiated);
    peer_task.await.unwrap();
}

#[tokio::test]
async fn duplicate_without_poss_dup_is_fatal() {
    let registry = Arc::new(FieldRegistry::standard());
    let (client, server) = tokio::io::duplex(4096);
    let (events_tx, mut events_rx) = mpsc::unbounded_channel();

    let peer_registry = Arc::clone(&registry);
    let peer_task = tokio::spawn(async move {
        let mut peer = Peer::new(server, peer_registry);
        peer.accept_logon().await;

        peer.send(exec_report("E2")).await; // seq 2
        peer.send_with_seq(exec_report("E2-again"), 2).await; // dup, no 43=Y

        // The engine must answer with Logout; confirm it.
        peer.read_until(MsgType::Logout).await;
        peer.send(Message::new(MsgType::Logout)).await;
    });

    let mut handle = connect(client, config(), registry, Some(events_tx))
        .await
        .unwrap();

    let first = handle.recv().await.expect("first delivery");
    assert_eq!(first.message.get_str(tags::EXEC_ID), Some("E2"));
    assert!(!first.duplicate);

    // Session ends on its own; the pipe closes.
    assert!(handle.recv().await.is_none());
    peer_task.await.unwrap();

    let mut reason = None;
    while let Ok(event) = events_rx.try_recv() {
        if let SessionEvent::Disconnected { reason: r } = event {
            reason = Some(r);
        }
    }
    match reason {
        Some(DisconnectReason::Protocol(text)) => {
            assert!(text.contains("PossDupFlag"), "unexpected reason: {text}");
        }
        other => panic!("expected protocol disconnect, got {other:?}"),
    }
}

#[tokio::test]
async fn poss_dup_redelivery_is_marked_duplicate() {
    let registry = Arc::new(FieldRegistry::standard());
    let (client, server) = tokio::io::duplex(4096);

    let peer_registry = Arc::clone(&registry);
    let peer_task = tokio::spawn(async move {
        let mut peer = Peer::new(server, peer_registry);
        peer.accept_logon().await;

        peer.send(exec_report("E2")).await; // seq 2
        // Replay of seq 2 with PossDupFlag: delivered as a duplicate marker.
        peer.send_with_seq(
            exec_report("E2").with(Field::bool(tags::POSS_DUP_FLAG, true)),
            2,
        )
        .await;
        peer.send(exec_report("E3")).await; // seq 3

        peer.confirm_logout().await;
    });

    let mut handle = connect(client, config(), registry, None).await.unwrap();

    let first = handle.recv().await.unwrap();
    assert!(!first.duplicate);
    let second = handle.recv().await.unwrap();
    assert!(second.duplicate);
    assert_eq!(second.message.get_str(tags::EXEC_ID), Some("E2"));
    let third = handle.recv().await.unwrap();
    assert_eq!(third.message.get_str(tags::EXEC_ID), Some("E3"));

    handle.close().await;
    peer_task.await.unwrap();
}

#[tokio::test]
async fn sequence_reset_hard_moves_counter() {
    let registry = Arc::new(FieldRegistry::standard());
    let (client, server) = tokio::io::duplex(4096);

    let peer_registry = Arc::clone(&registry);
    let peer_task = tokio::spawn(async move {
        let mut peer = Peer::new(server, peer_registry);
        peer.accept_logon().await;

        // Hard reset jumps the inbound counter to 10 regardless of its own
        // sequence number.
        peer.send(
            Message::new(MsgType::SequenceReset).with(Field::uint(tags::NEW_SEQ_NO, 10)),
        )
        .await;
        peer.send_with_seq(exec_report("E10"), 10).await;

        peer.confirm_logout().await;
    });

    let mut handle = connect(client, config(), registry, None).await.unwrap();
    let inbound = handle.recv().await.unwrap();
    assert_eq!(inbound.message.get_str(tags::EXEC_ID), Some("E10"));
    assert_eq!(inbound.message.seq_num(), Some(10));

    handle.close().await;
    peer_task.await.unwrap();
}

#[tokio::test]
async fn empty_field_value_draws_session_reject() {
    let registry = Arc::new(FieldRegistry::standard());
    let (client, server) = tokio::io::duplex(4096);

    let peer_registry = Arc::clone(&registry);
    let peer_task = tokio::spawn(async move {
        let mut peer = Peer::new(server, peer_registry);
        peer.accept_logon().await;

        // Frame with an empty Symbol value; checksum is still valid.
        let mut body = Message::new(MsgType::ExecutionReport);
        body.push(Field::uint(tags::MSG_SEQ_NUM, 2));
        body.push(Field::str(tags::SENDER_COMP_ID, "S"));
        body.push(Field::str(tags::TARGET_COMP_ID, "C"));
        body.push(Field::timestamp(tags::SENDING_TIME, UtcTimestamp::now()));
        body.push(Field::str(tags::SYMBOL, ""));
        let frame = encode_message(&body, FixVersion::Fix44);
        peer.send_raw(&frame).await;

        let reject = peer.read_until(MsgType::Reject).await;
        assert_eq!(reject.get_u64(tags::REF_TAG_ID), Some(u64::from(tags::SYMBOL)));
        assert_eq!(reject.get_u64(tags::REF_SEQ_NUM), Some(2));

        // The bad frame never counted; seq 2 is still expected.
        peer.send(exec_report("E2")).await;
        peer.seq = 3;

        peer.confirm_logout().await;
    });

    let mut handle = connect(client, config(), registry, None).await.unwrap();
    let inbound = handle.recv().await.unwrap();
    assert_eq!(inbound.message.get_str(tags::EXEC_ID), Some("E2"));

    handle.close().await;
    peer_task.await.unwrap();
}

#[tokio::test]
async fn bad_checksum_is_fatal_once_logged_on() {
    let registry = Arc::new(FieldRegistry::standard());
    let (client, server) = tokio::io::duplex(4096);
    let (events_tx, mut events_rx) = mpsc::unbounded_channel();

    let peer_registry = Arc::clone(&registry);
    let peer_task = tokio::spawn(async move {
        let mut peer = Peer::new(server, peer_registry);
        peer.accept_logon().await;

        // Valid frame, then flip the last checksum digit.
        let mut body = Message::new(MsgType::ExecutionReport);
        body.push(Field::uint(tags::MSG_SEQ_NUM, 2));
        body.push(Field::str(tags::SENDER_COMP_ID, "S"));
        body.push(Field::str(tags::TARGET_COMP_ID, "C"));
        body.push(Field::timestamp(tags::SENDING_TIME, UtcTimestamp::now()));
        let mut frame = encode_message(&body, FixVersion::Fix44).to_vec();
        let idx = frame.len() - 2;
        frame[idx] = if frame[idx] == b'0' { b'1' } else { b'0' };
        peer.send_raw(&frame).await;

        // Engine drops the session without a Logout exchange.
        while peer.try_read_message().await.is_some() {}
    });

    let mut handle = connect(client, config(), registry, Some(events_tx))
        .await
        .unwrap();
    assert!(handle.recv().await.is_none());
    peer_task.await.unwrap();

    let mut saw_protocol_disconnect = false;
    while let Ok(event) = events_rx.try_recv() {
        if let SessionEvent::Disconnected {
            reason: DisconnectReason::Protocol(text),
        } = event
        {
            assert!(text.contains("checksum"), "unexpected reason: {text}");
            saw_protocol_disconnect = true;
        }
    }
    assert!(saw_protocol_disconnect);
}

#[tokio::test]
async fn bad_checksum_during_logon_is_skipped() {
    // The corrupted frame lands while the engine is still in LogonSent:
    // the handshake must skip it, stay up, and accept the Logon behind it.
    let registry = Arc::new(FieldRegistry::standard());
    let (client, server) = tokio::io::duplex(4096);
    let (events_tx, mut events_rx) = mpsc::unbounded_channel();

    let peer_registry = Arc::clone(&registry);
    let peer_task = tokio::spawn(async move {
        let mut peer = Peer::new(server, peer_registry);
        let logon = peer.read_message().await;
        assert_eq!(*logon.msg_type(), MsgType::Logon);

        let mut junk = Message::new(MsgType::Heartbeat);
        junk.push(Field::uint(tags::MSG_SEQ_NUM, 99));
        junk.push(Field::str(tags::SENDER_COMP_ID, "S"));
        junk.push(Field::str(tags::TARGET_COMP_ID, "C"));
        junk.push(Field::timestamp(tags::SENDING_TIME, UtcTimestamp::now()));
        let mut frame = encode_message(&junk, FixVersion::Fix44).to_vec();
        let idx = frame.len() - 2;
        frame[idx] = if frame[idx] == b'0' { b'1' } else { b'0' };
        peer.send_raw(&frame).await;

        peer.send(Message::new(MsgType::Logon).with(Field::uint(tags::ENCRYPT_METHOD, 0)))
            .await;
        peer.confirm_logout().await;
    });

    let handle = connect(client, config(), registry, Some(events_tx))
        .await
        .expect("handshake survives the bad frame");
    assert_eq!(events_rx.recv().await, Some(SessionEvent::LoggedOn));

    let reason = handle.close().await;
    assert_eq!(reason, DisconnectReason::UserInitiated);
    peer_task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn heartbeat_test_request_and_timeout_timeline() {
    // Interval 1s, silent peer: Heartbeat at ~1s, TestRequest at ~1.5s,
    // disconnect at ~2.5s.
    let registry = Arc::new(FieldRegistry::standard());
    let (client, server) = tokio::io::duplex(4096);
    let (events_tx, mut events_rx) = mpsc::unbounded_channel();

    let peer_registry = Arc::clone(&registry);
    let peer_task = tokio::spawn(async move {
        let mut peer = Peer::new(server, peer_registry);
        peer.accept_logon().await;

        // Stay silent; just record what the engine sends until it hangs up.
        let mut seen = Vec::new();
        while let Some(msg) = peer.try_read_message().await {
            seen.push(msg.msg_type().clone());
        }
        seen
    });

    let config = config().with_heartbeat_interval(Duration::from_secs(1));
    let mut handle = connect(client, config, registry, Some(events_tx))
        .await
        .unwrap();

    // The session dies on its own at 2.5x the interval.
    assert!(handle.recv().await.is_none());
    let seen = peer_task.await.unwrap();

    assert_eq!(seen.first(), Some(&MsgType::Heartbeat));
    assert!(seen.contains(&MsgType::TestRequest));
    assert!(!seen.contains(&MsgType::Logout));

    let mut test_request_sent = false;
    let mut disconnect = None;
    while let Ok(event) = events_rx.try_recv() {
        match event {
            SessionEvent::TestRequestSent { .. } => test_request_sent = true,
            SessionEvent::Disconnected { reason } => disconnect = Some(reason),
            _ => {}
        }
    }
    assert!(test_request_sent);
    assert_eq!(disconnect, Some(DisconnectReason::TestRequestTimeout));
}

#[tokio::test]
async fn outbound_seq_nums_are_strictly_increasing() {
    let registry = Arc::new(FieldRegistry::standard());
    let (client, server) = tokio::io::duplex(4096);

    let peer_registry = Arc::clone(&registry);
    let peer_task = tokio::spawn(async move {
        let mut peer = Peer::new(server, peer_registry);
        peer.accept_logon().await;

        let mut seqs = Vec::new();
        for _ in 0..5 {
            let msg = peer.read_message().await;
            seqs.push(msg.seq_num().unwrap());
        }
        peer.confirm_logout().await;
        seqs
    });

    let handle = connect(client, config(), registry, None).await.unwrap();
    for i in 0..5 {
        handle.send(order(&format!("O{i}"))).await.unwrap();
    }
    tokio::time::sleep(Duration::from_millis(100)).await;
    handle.close().await;

    let seqs = peer_task.await.unwrap();
    // Logon took seq 1; the five orders follow in queue order.
    assert_eq!(seqs, vec![2, 3, 4, 5, 6]);
}
