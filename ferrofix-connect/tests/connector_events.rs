//! Connector lifecycle over a real local listener.
//!
//! A minimal scripted acceptor answers one logon and hangs up; the listener
//! then goes away so the retry fails and the bounded connector gives up.
//! Every lifecycle event is asserted on the subscriber channels.

use bytes::BytesMut;
use ferrofix_codec::encoder::encode_message;
use ferrofix_codec::framing::FrameCodec;
use ferrofix_connect::{ConnectorConfig, ConnectorEvent, PersistentConnector, RetryPolicy};
use ferrofix_core::field::Field;
use ferrofix_core::message::{Message, MsgType};
use ferrofix_core::registry::FieldRegistry;
use ferrofix_core::tags;
use ferrofix_core::types::{CompId, FixVersion, UtcTimestamp};
use ferrofix_session::{SessionConfig, SessionEvent};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_util::codec::Decoder as _;

async fn read_frame(stream: &mut TcpStream, buf: &mut BytesMut) -> BytesMut {
    let mut codec = FrameCodec::new();
    loop {
        if let Some(frame) = codec.decode(buf).unwrap() {
            return frame;
        }
        assert!(
            stream.read_buf(buf).await.unwrap() > 0,
            "acceptor: unexpected eof"
        );
    }
}

fn logon_reply() -> Vec<u8> {
    let mut msg = Message::new(MsgType::Logon);
    msg.push(Field::uint(tags::MSG_SEQ_NUM, 1));
    msg.push(Field::str(tags::SENDER_COMP_ID, "S"));
    msg.push(Field::str(tags::TARGET_COMP_ID, "C"));
    msg.push(Field::timestamp(tags::SENDING_TIME, UtcTimestamp::now()));
    msg.push(Field::uint(tags::ENCRYPT_METHOD, 0));
    msg.push(Field::uint(tags::HEART_BT_INT, 30));
    encode_message(&msg, FixVersion::Fix44).to_vec()
}

#[tokio::test]
async fn connector_emits_lifecycle_events_and_gives_up() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    // Accept exactly one session, answer the logon, then hang up. Dropping
    // the listener afterwards makes the reconnect attempt fail.
    let acceptor = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buf = BytesMut::with_capacity(4096);
        let frame = read_frame(&mut stream, &mut buf).await;
        assert!(frame.starts_with(b"8=FIX.4.4"));
        stream.write_all(&logon_reply()).await.unwrap();
    });

    let registry = Arc::new(FieldRegistry::standard());
    let session_config = SessionConfig::new(
        CompId::new("C").unwrap(),
        CompId::new("S").unwrap(),
        FixVersion::Fix44,
    );

    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let (session_events_tx, mut session_events_rx) = mpsc::unbounded_channel();
    let (sessions_tx, mut sessions_rx) = mpsc::channel(1);

    let connector = PersistentConnector::new(
        ConnectorConfig::new("127.0.0.1", port)
            .with_retry(RetryPolicy {
                initial: Duration::from_millis(10),
                max: Duration::from_millis(50),
                multiplier: 2.0,
            })
            .with_max_attempts(1),
        session_config,
        registry,
    )
    .with_events(events_tx)
    .with_session_events(session_events_tx);

    let run = tokio::spawn(connector.run(sessions_tx));

    // The connector hands over a live session handle.
    let _handle = sessions_rx.recv().await.expect("session handle");
    acceptor.await.unwrap();

    // The dead listener exhausts the single allowed retry.
    let result = run.await.unwrap();
    assert!(result.is_err());

    let mut events = Vec::new();
    while let Ok(event) = events_rx.try_recv() {
        events.push(event);
    }

    assert_eq!(events.first(), Some(&ConnectorEvent::Attempting { attempt: 1 }));
    assert!(events.contains(&ConnectorEvent::Resolving));
    assert!(events
        .iter()
        .any(|e| matches!(e, ConnectorEvent::ResolvedAddress(_))));
    assert!(events.contains(&ConnectorEvent::Connected));
    // Two disconnects: the hung-up session, then the refused reconnect.
    assert!(
        events
            .iter()
            .filter(|e| matches!(e, ConnectorEvent::Disconnected { .. }))
            .count()
            >= 2
    );
    assert_eq!(events.last(), Some(&ConnectorEvent::GaveUp));

    // Per-session events were forwarded through the connector.
    let mut forwarded = Vec::new();
    while let Ok(event) = session_events_rx.try_recv() {
        forwarded.push(event);
    }
    assert!(forwarded.contains(&SessionEvent::LoggedOn));
}

#[tokio::test]
async fn connector_gives_up_when_nothing_listens() {
    // Bind then immediately drop, so the port is very likely closed.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let registry = Arc::new(FieldRegistry::standard());
    let session_config = SessionConfig::new(
        CompId::new("C").unwrap(),
        CompId::new("S").unwrap(),
        FixVersion::Fix44,
    );
    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let (sessions_tx, _sessions_rx) = mpsc::channel(1);

    let connector = PersistentConnector::new(
        ConnectorConfig::new("127.0.0.1", port)
            .with_retry(RetryPolicy {
                initial: Duration::from_millis(5),
                max: Duration::from_millis(20),
                multiplier: 2.0,
            })
            .with_max_attempts(2),
        session_config,
        registry,
    )
    .with_events(events_tx);

    let result = connector.run(sessions_tx).await;
    assert!(result.is_err());

    let mut events = Vec::new();
    while let Ok(event) = events_rx.try_recv() {
        events.push(event);
    }

    let attempts: Vec<u32> = events
        .iter()
        .filter_map(|e| match e {
            ConnectorEvent::Attempting { attempt } => Some(*attempt),
            _ => None,
        })
        .collect();
    assert_eq!(attempts, vec![1, 2]);
    assert!(!events.contains(&ConnectorEvent::Connected));
    assert_eq!(events.last(), Some(&ConnectorEvent::GaveUp));
}
