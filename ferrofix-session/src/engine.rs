/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! The session engine.
//!
//! [`connect`] performs the Logon handshake over a byte-duplex transport and
//! returns a [`SessionHandle`]: a lazy stream of inbound application
//! messages and a sink for outbound ones. All administrative traffic
//! (MsgType 0/1/2/3/4/5/A) is handled here and absorbed.
//!
//! One spawned task owns every piece of mutable session state - sequence
//! counters, timers, replay history, the hold-back queue - and multiplexes
//! three sources: inbound frames, the outbound channel, and the two timer
//! deadlines. State is never observed between suspension points, so no lock
//! exists anywhere in the session layer.

use crate::admin;
use crate::config::SessionConfig;
use crate::events::{DisconnectReason, SessionEvent};
use crate::history::ReplayBuffer;
use crate::state::SessionPhase;
use crate::timers::{SessionTimers, WatchdogAction};
use bytes::BytesMut;
use ferrofix_codec::decoder::decode_message;
use ferrofix_codec::encoder::encode_message;
use ferrofix_codec::framing::{FrameCodec, FrameError};
use ferrofix_core::enums::SessionRejectReason;
use ferrofix_core::error::{DecodeError, Result, SessionError, TransportError};
use ferrofix_core::field::Field;
use ferrofix_core::message::{Message, MsgType};
use ferrofix_core::registry::FieldRegistry;
use ferrofix_core::tags;
use ferrofix_core::types::UtcTimestamp;
use futures::StreamExt;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until, timeout_at};
use tokio_util::codec::FramedRead;
use tracing::{debug, error, info, warn};

/// Bound of the outbound application-message channel.
const OUTBOUND_QUEUE: usize = 64;

/// An inbound application message.
#[derive(Debug, Clone)]
pub struct Inbound {
    /// The decoded message, header fields included.
    pub message: Message,
    /// True when this is a PossDup retransmission of something already
    /// delivered.
    pub duplicate: bool,
}

/// Handle to an established session: the application message pipe.
#[derive(Debug)]
pub struct SessionHandle {
    inbound: mpsc::Receiver<Inbound>,
    outbound: mpsc::Sender<Message>,
    task: JoinHandle<DisconnectReason>,
}

impl SessionHandle {
    /// Queues an outbound application message. The engine assigns the
    /// sequence number in queue order and writes frames in that same order.
    ///
    /// # Errors
    /// Returns `SessionError::Connection` if the session task has ended.
    pub async fn send(&self, message: Message) -> std::result::Result<(), SessionError> {
        self.outbound
            .send(message)
            .await
            .map_err(|_| SessionError::Connection("session task terminated".to_string()))
    }

    /// Receives the next inbound application message, in strict sequence
    /// order. Returns `None` once the session has ended.
    pub async fn recv(&mut self) -> Option<Inbound> {
        self.inbound.recv().await
    }

    /// Closes the outbound sink, triggering a graceful Logout, and waits
    /// for the session to end.
    pub async fn close(self) -> DisconnectReason {
        let Self {
            inbound,
            outbound,
            task,
        } = self;
        drop(outbound);
        drop(inbound);
        match task.await {
            Ok(reason) => reason,
            Err(_) => DisconnectReason::Transport("session task failed".to_string()),
        }
    }

    /// Hard-cancels the session: tears down timers and transport without a
    /// Logout exchange.
    pub fn abort(&self) {
        self.task.abort();
    }
}

/// Opens a session over `transport`: sends Logon, awaits the peer's Logon,
/// then spawns the engine task.
///
/// # Errors
/// - `SessionError::LogonRejected` when the peer answers with Logout
/// - `SessionError::Timeout` when no Logon arrives within `logon_timeout`
/// - transport and decode errors from the handshake
pub async fn connect<T>(
    transport: T,
    config: SessionConfig,
    registry: Arc<FieldRegistry>,
    events: Option<mpsc::UnboundedSender<SessionEvent>>,
) -> Result<SessionHandle>
where
    T: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    let (reader, writer) = tokio::io::split(transport);
    let framed = FramedRead::new(
        reader,
        FrameCodec::new().with_max_frame_size(config.max_message_size),
    );
    let (inbound_tx, inbound_rx) = mpsc::channel(config.inbound_queue);
    let (outbound_tx, outbound_rx) = mpsc::channel(OUTBOUND_QUEUE);

    let timers = SessionTimers::new(config.heartbeat_interval);
    let history = ReplayBuffer::new(config.history_capacity);

    let mut engine = Engine {
        framed,
        writer,
        config,
        registry,
        phase: SessionPhase::Connecting,
        next_outgoing: 1,
        next_incoming: 1,
        timers,
        history,
        holdback: BTreeMap::new(),
        resend_in_flight: false,
        inbound_tx,
        outbound_rx,
        events,
    };
    engine.handshake().await?;

    let task = tokio::spawn(engine.run());
    Ok(SessionHandle {
        inbound: inbound_rx,
        outbound: outbound_tx,
        task,
    })
}

/// What the multiplexer selected this iteration.
enum Step {
    Frame(Option<std::result::Result<BytesMut, FrameError>>),
    Outbound(Option<Message>),
    Heartbeat,
    Watchdog,
}

struct Engine<R, W> {
    framed: FramedRead<R, FrameCodec>,
    writer: W,
    config: SessionConfig,
    registry: Arc<FieldRegistry>,
    phase: SessionPhase,
    /// Next sequence number to send; the wire carries the pre-increment
    /// value, so the first message of a session is 34=1.
    next_outgoing: u64,
    /// Next sequence number expected from the peer.
    next_incoming: u64,
    timers: SessionTimers,
    history: ReplayBuffer,
    /// Out-of-order arrivals held until the gap before them is filled.
    holdback: BTreeMap<u64, Message>,
    resend_in_flight: bool,
    inbound_tx: mpsc::Sender<Inbound>,
    outbound_rx: mpsc::Receiver<Message>,
    events: Option<mpsc::UnboundedSender<SessionEvent>>,
}

impl<R, W> Engine<R, W>
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    fn emit(&self, event: SessionEvent) {
        if let Some(tx) = &self.events {
            let _ = tx.send(event);
        }
    }

    /// Sends Logon and waits for the peer's Logon.
    async fn handshake(&mut self) -> Result<()> {
        self.phase = SessionPhase::LogonSent;
        let logon = admin::logon(&self.config, UtcTimestamp::now());
        self.transmit(logon, true).await?;

        let deadline = Instant::now() + self.config.logon_timeout;
        loop {
            let bytes = match timeout_at(deadline, self.framed.next()).await {
                Err(_) => {
                    return Err(SessionError::Timeout {
                        during: "logon".to_string(),
                    }
                    .into());
                }
                Ok(None) => return Err(TransportError::Eof.into()),
                Ok(Some(Err(err))) => return Err(frame_error(err)),
                Ok(Some(Ok(bytes))) => bytes,
            };

            let msg = match decode_message(&bytes, &self.registry) {
                Ok(msg) => msg,
                Err(DecodeError::ChecksumMismatch {
                    calculated,
                    declared,
                }) => {
                    // Bad frames while waiting for Logon are skipped; the
                    // handshake keeps waiting for a valid one.
                    warn!(calculated, declared, "bad checksum during logon, frame skipped");
                    continue;
                }
                Err(err) => return Err(err.into()),
            };
            self.timers.on_received(None);

            match msg.msg_type().clone() {
                MsgType::Logon => {
                    if let Some(seconds) = msg.get_u64(tags::HEART_BT_INT) {
                        self.timers.set_interval(Duration::from_secs(seconds));
                    }
                    match msg.seq_num() {
                        Some(seq) if seq == self.next_incoming => self.next_incoming += 1,
                        Some(seq) if seq > self.next_incoming => {
                            // Gap behind the peer's Logon: recover it now.
                            let begin = self.next_incoming;
                            self.transmit(admin::resend_request(begin, 0), true).await?;
                            self.resend_in_flight = true;
                            self.emit(SessionEvent::ResendRequested { begin, end: 0 });
                        }
                        Some(seq) => {
                            return Err(SessionError::HeaderError {
                                reason: format!(
                                    "logon seq {} below expected {}",
                                    seq, self.next_incoming
                                ),
                            }
                            .into());
                        }
                        None => {
                            return Err(SessionError::HeaderError {
                                reason: "logon missing MsgSeqNum".to_string(),
                            }
                            .into());
                        }
                    }
                    self.phase = SessionPhase::LoggedOn;
                    self.timers.reset();
                    info!(
                        sender = %self.config.sender_comp_id,
                        target = %self.config.target_comp_id,
                        heartbeat_secs = self.timers.interval().as_secs(),
                        "logged on"
                    );
                    self.emit(SessionEvent::LoggedOn);
                    return Ok(());
                }
                MsgType::Logout => {
                    let text = msg.get_str(tags::TEXT).unwrap_or("").to_string();
                    self.emit(SessionEvent::LogonRejected { text: text.clone() });
                    return Err(SessionError::LogonRejected { reason: text }.into());
                }
                other => {
                    return Err(SessionError::UnexpectedMsgType {
                        msg_type: other.to_string(),
                        phase: self.phase.to_string(),
                    }
                    .into());
                }
            }
        }
    }

    /// Runs the session to completion and reports why it ended.
    async fn run(mut self) -> DisconnectReason {
        let reason = match self.main_loop().await {
            Ok(reason) => reason,
            Err(err) => {
                error!(error = %err, "session terminated");
                disconnect_reason(&err)
            }
        };
        self.phase = SessionPhase::Disconnected;
        self.emit(SessionEvent::Disconnected {
            reason: reason.clone(),
        });
        let _ = self.writer.shutdown().await;
        reason
    }

    async fn main_loop(&mut self) -> Result<DisconnectReason> {
        loop {
            let heartbeat_at = self.timers.heartbeat_deadline();
            let watchdog_at = self.timers.watchdog_deadline();
            let established = self.phase.is_established();

            let step = {
                let framed = &mut self.framed;
                let outbound = &mut self.outbound_rx;
                tokio::select! {
                    frame = framed.next() => Step::Frame(frame),
                    message = outbound.recv(), if established => Step::Outbound(message),
                    () = sleep_until(heartbeat_at), if established => Step::Heartbeat,
                    () = sleep_until(watchdog_at), if established => Step::Watchdog,
                }
            };

            match step {
                Step::Frame(None) => return Ok(DisconnectReason::Eof),
                Step::Frame(Some(Err(err))) => return Err(frame_error(err)),
                Step::Frame(Some(Ok(bytes))) => {
                    if let Some(reason) = self.on_frame(&bytes).await? {
                        return Ok(reason);
                    }
                }
                Step::Outbound(Some(message)) => self.transmit(message, false).await?,
                Step::Outbound(None) => {
                    // User closed the sink: graceful Logout.
                    return self
                        .finish_logout(DisconnectReason::UserInitiated, None)
                        .await;
                }
                Step::Heartbeat => self.transmit(admin::heartbeat(None), true).await?,
                Step::Watchdog => match self.timers.watchdog_action() {
                    WatchdogAction::SendTestRequest => {
                        let id = self.timers.next_test_req_id();
                        self.transmit(admin::test_request(&id), true).await?;
                        self.timers.on_test_request_sent(id.clone());
                        self.emit(SessionEvent::TestRequestSent { id });
                    }
                    WatchdogAction::Disconnect => {
                        warn!("no traffic since test request, disconnecting");
                        return Ok(DisconnectReason::TestRequestTimeout);
                    }
                },
            }
        }
    }

    /// Handles one inbound frame. `Ok(Some(reason))` ends the session.
    async fn on_frame(&mut self, bytes: &[u8]) -> Result<Option<DisconnectReason>> {
        let msg = match decode_message(bytes, &self.registry) {
            Ok(msg) => msg,
            Err(err) => return self.on_decode_error(err).await,
        };

        let heartbeat_id = if *msg.msg_type() == MsgType::Heartbeat {
            msg.get_str(tags::TEST_REQ_ID).map(str::to_string)
        } else {
            None
        };
        self.timers.on_received(heartbeat_id.as_deref());

        let Some(seq) = msg.seq_num() else {
            return Err(SessionError::HeaderError {
                reason: "missing MsgSeqNum".to_string(),
            }
            .into());
        };

        // SequenceReset moves the counter itself; it bypasses sequencing.
        if *msg.msg_type() == MsgType::SequenceReset {
            return self.on_sequence_reset(&msg, seq).await;
        }

        match seq.cmp(&self.next_incoming) {
            Ordering::Less => {
                if msg.poss_dup() {
                    debug!(seq, "PossDup retransmission");
                    if msg.msg_type().is_app() {
                        let _ = self
                            .inbound_tx
                            .send(Inbound {
                                message: msg,
                                duplicate: true,
                            })
                            .await;
                    }
                    Ok(None)
                } else {
                    // RFC-mandated: a low sequence number without
                    // PossDupFlag is a fatal error.
                    let err = SessionError::DuplicateWithoutPossDup {
                        expected: self.next_incoming,
                        received: seq,
                    };
                    warn!(error = %err, "terminating session");
                    let reason = DisconnectReason::Protocol(err.to_string());
                    self.finish_logout(reason, Some("MsgSeqNum too low")).await.map(Some)
                }
            }
            Ordering::Greater => {
                debug!(seq, expected = self.next_incoming, "sequence gap, holding back");
                self.holdback.insert(seq, msg);
                if !self.resend_in_flight {
                    let begin = self.next_incoming;
                    self.transmit(admin::resend_request(begin, 0), true).await?;
                    self.resend_in_flight = true;
                    self.emit(SessionEvent::ResendRequested { begin, end: 0 });
                }
                Ok(None)
            }
            Ordering::Equal => {
                self.next_incoming += 1;
                if let Some(reason) = self.process(msg).await? {
                    return Ok(Some(reason));
                }
                self.drain_holdback().await
            }
        }
    }

    /// Applies a SequenceReset: hard reset moves the counter
    /// unconditionally, a gap fill only when not stale.
    async fn on_sequence_reset(
        &mut self,
        msg: &Message,
        seq: u64,
    ) -> Result<Option<DisconnectReason>> {
        let Some(new_seq) = msg.get_u64(tags::NEW_SEQ_NO) else {
            return Err(SessionError::HeaderError {
                reason: "SequenceReset missing NewSeqNo".to_string(),
            }
            .into());
        };
        let gap_fill = msg.get_bool(tags::GAP_FILL_FLAG).unwrap_or(false);

        if gap_fill && seq < self.next_incoming {
            debug!(seq, new_seq, "stale gap fill ignored");
            return Ok(None);
        }
        info!(new_seq, gap_fill, "sequence reset");
        self.next_incoming = new_seq;
        self.emit(SessionEvent::SequenceReset { new_seq });

        let floor = self.next_incoming;
        self.holdback.retain(|held_seq, _| *held_seq >= floor);
        self.drain_holdback().await
    }

    /// Delivers held-back messages that are now in sequence.
    async fn drain_holdback(&mut self) -> Result<Option<DisconnectReason>> {
        while let Some(msg) = self.holdback.remove(&self.next_incoming) {
            self.next_incoming += 1;
            if let Some(reason) = self.process(msg).await? {
                return Ok(Some(reason));
            }
        }
        if self.holdback.is_empty() {
            self.resend_in_flight = false;
        }
        Ok(None)
    }

    /// Processes one in-sequence message.
    async fn process(&mut self, msg: Message) -> Result<Option<DisconnectReason>> {
        let msg_type = msg.msg_type().clone();
        match msg_type {
            MsgType::Heartbeat => Ok(None),
            MsgType::TestRequest => {
                let id = msg.get_str(tags::TEST_REQ_ID).map(str::to_string);
                self.transmit(admin::heartbeat(id.as_deref()), true).await?;
                Ok(None)
            }
            MsgType::ResendRequest => {
                let begin = msg.get_u64(tags::BEGIN_SEQ_NO).unwrap_or(1);
                let end = msg.get_u64(tags::END_SEQ_NO).unwrap_or(0);
                self.replay(begin, end).await?;
                Ok(None)
            }
            MsgType::Logout => {
                info!("peer initiated logout");
                self.transmit(admin::logout(None), true).await?;
                Ok(Some(DisconnectReason::PeerLogout))
            }
            MsgType::Logon => {
                warn!("unexpected Logon while logged on");
                let reject = admin::reject(
                    msg.seq_num().unwrap_or(self.next_incoming - 1),
                    None,
                    SessionRejectReason::Other,
                    "already logged on",
                );
                self.transmit(reject, true).await?;
                Ok(None)
            }
            MsgType::Reject => {
                let ref_seq = msg.get_u64(tags::REF_SEQ_NUM).unwrap_or(0);
                let text = msg.get_str(tags::TEXT).unwrap_or("").to_string();
                warn!(ref_seq, text = %text, "peer rejected our message");
                self.emit(SessionEvent::PeerRejected { ref_seq, text });
                Ok(None)
            }
            // Intercepted before sequencing.
            MsgType::SequenceReset => Ok(None),
            MsgType::Custom(ref unknown) => {
                warn!(msg_type = %unknown, "unsupported message type");
                let reject = admin::business_reject(
                    msg.seq_num().unwrap_or(0),
                    unknown,
                    "unsupported message type",
                );
                self.transmit(reject, true).await?;
                Ok(None)
            }
            _ => {
                // Application message: deliver in order. A dropped reader is
                // non-destructive; a full queue back-pressures the read loop.
                let _ = self
                    .inbound_tx
                    .send(Inbound {
                        message: msg,
                        duplicate: false,
                    })
                    .await;
                Ok(None)
            }
        }
    }

    /// Maps a decode failure to a Reject or a terminal error.
    async fn on_decode_error(&mut self, err: DecodeError) -> Result<Option<DisconnectReason>> {
        match err {
            DecodeError::EmptyValue { tag } => {
                self.send_reject(tag, SessionRejectReason::TagSpecifiedWithoutValue, &err.to_string())
                    .await?;
                Ok(None)
            }
            DecodeError::InvalidFieldValue { tag, .. } if tag != tags::CHECK_SUM => {
                self.send_reject(tag, SessionRejectReason::IncorrectDataFormat, &err.to_string())
                    .await?;
                Ok(None)
            }
            DecodeError::GroupCountMismatch { count_tag, .. } => {
                self.send_reject(
                    count_tag,
                    SessionRejectReason::IncorrectNumInGroupCount,
                    &err.to_string(),
                )
                .await?;
                Ok(None)
            }
            DecodeError::InvalidTag(_) => {
                self.send_reject(0, SessionRejectReason::InvalidTagNumber, &err.to_string())
                    .await?;
                Ok(None)
            }
            // Checksum failures and header malformation are fatal once
            // logged on.
            _ => Err(SessionError::HeaderError {
                reason: err.to_string(),
            }
            .into()),
        }
    }

    async fn send_reject(
        &mut self,
        ref_tag: u32,
        reason: SessionRejectReason,
        text: &str,
    ) -> Result<()> {
        let ref_tag = (ref_tag != 0).then_some(ref_tag);
        let reject = admin::reject(self.next_incoming, ref_tag, reason, text);
        self.transmit(reject, true).await
    }

    /// Replays `[begin, end]` for a peer ResendRequest: application entries
    /// go out again with PossDupFlag and OrigSendingTime; administrative
    /// entries and anything missing coalesce into SequenceReset-GapFills; a
    /// prefix older than the buffer is answered with a hard SequenceReset.
    async fn replay(&mut self, begin: u64, end: u64) -> Result<()> {
        let last_sent = self.next_outgoing.saturating_sub(1);
        let end = if end == 0 { last_sent } else { end.min(last_sent) };
        if last_sent == 0 || begin > end {
            return Ok(());
        }
        info!(begin, end, "replaying for peer resend request");
        self.emit(SessionEvent::Resending { begin, end });

        let mut seq = begin;
        match self.history.oldest() {
            None => {
                let reset = self.stamp_replay(admin::sequence_reset(self.next_outgoing, false), seq);
                return self.write_message(&reset).await;
            }
            Some(oldest) if seq < oldest => {
                let reset = self.stamp_replay(admin::sequence_reset(oldest, false), seq);
                self.write_message(&reset).await?;
                seq = oldest;
            }
            Some(_) => {}
        }

        while seq <= end {
            let app_entry = match self.history.get(seq) {
                Some(entry) if !entry.admin => {
                    Some((entry.message.clone(), entry.sending_time))
                }
                _ => None,
            };
            match app_entry {
                Some((mut msg, original_sending_time)) => {
                    msg.set(Field::bool(tags::POSS_DUP_FLAG, true));
                    msg.set(Field::timestamp(tags::ORIG_SENDING_TIME, original_sending_time));
                    msg.set(Field::timestamp(tags::SENDING_TIME, UtcTimestamp::now()));
                    self.write_message(&msg).await?;
                    seq += 1;
                }
                None => {
                    // Run of admin or evicted entries: one gap fill.
                    let run_start = seq;
                    while seq <= end && !self.is_app_in_history(seq) {
                        seq += 1;
                    }
                    let gap_fill = self.stamp_replay(admin::sequence_reset(seq, true), run_start);
                    self.write_message(&gap_fill).await?;
                }
            }
        }
        Ok(())
    }

    fn is_app_in_history(&self, seq: u64) -> bool {
        matches!(self.history.get(seq), Some(entry) if !entry.admin)
    }

    /// Stamps a replayed administrative message with an old sequence number
    /// and PossDupFlag.
    fn stamp_replay(&self, message: Message, seq: u64) -> Message {
        let mut stamped = self.stamp_header(message, seq, UtcTimestamp::now());
        stamped.set(Field::bool(tags::POSS_DUP_FLAG, true));
        stamped
    }

    /// Sends a fresh message: assigns the next sequence number, stamps the
    /// header, and records it for replay.
    async fn transmit(&mut self, message: Message, admin: bool) -> Result<()> {
        let seq = self.next_outgoing;
        self.next_outgoing += 1;
        let now = UtcTimestamp::now();
        let stamped = self.stamp_header(message, seq, now);
        self.write_message(&stamped).await?;
        self.history.record(seq, stamped, now, admin);
        Ok(())
    }

    /// Prepends MsgSeqNum, SenderCompID, TargetCompID, and SendingTime.
    fn stamp_header(&self, message: Message, seq: u64, now: UtcTimestamp) -> Message {
        let mut stamped = Message::new(message.msg_type().clone());
        stamped.push(Field::uint(tags::MSG_SEQ_NUM, seq));
        stamped.push(Field::str(
            tags::SENDER_COMP_ID,
            self.config.sender_comp_id.as_str(),
        ));
        stamped.push(Field::str(
            tags::TARGET_COMP_ID,
            self.config.target_comp_id.as_str(),
        ));
        stamped.push(Field::timestamp(tags::SENDING_TIME, now));
        for field in message.fields() {
            if !tags::is_header_tag(field.tag) {
                stamped.push(field.clone());
            }
        }
        stamped
    }

    async fn write_message(&mut self, message: &Message) -> Result<()> {
        let frame = encode_message(message, self.config.version);
        self.writer
            .write_all(&frame)
            .await
            .map_err(TransportError::from)?;
        self.timers.on_sent();
        Ok(())
    }

    /// Sends Logout and drains until the peer confirms or the timeout
    /// passes, then reports `reason`.
    async fn finish_logout(
        &mut self,
        reason: DisconnectReason,
        text: Option<&str>,
    ) -> Result<DisconnectReason> {
        self.transmit(admin::logout(text), true).await?;
        self.phase = SessionPhase::LogoutSent;

        let deadline = Instant::now() + self.config.logout_timeout;
        loop {
            match timeout_at(deadline, self.framed.next()).await {
                Err(_) => {
                    warn!("logout confirmation timed out");
                    return Ok(reason);
                }
                Ok(None) | Ok(Some(Err(_))) => return Ok(reason),
                Ok(Some(Ok(bytes))) => {
                    if let Ok(msg) = decode_message(&bytes, &self.registry)
                        && *msg.msg_type() == MsgType::Logout
                    {
                        return Ok(reason);
                    }
                    // Anything else during the drain is dropped.
                }
            }
        }
    }
}

/// Maps a framing error to the session error hierarchy.
fn frame_error(err: FrameError) -> ferrofix_core::error::FixError {
    match err {
        FrameError::Io(cause) => TransportError::Io(cause).into(),
        other => SessionError::HeaderError {
            reason: other.to_string(),
        }
        .into(),
    }
}

/// Maps a terminal error to the disconnect reason reported to subscribers.
fn disconnect_reason(err: &ferrofix_core::error::FixError) -> DisconnectReason {
    use ferrofix_core::error::FixError;
    match err {
        FixError::Transport(TransportError::Eof) => DisconnectReason::Eof,
        FixError::Transport(TransportError::Io(cause)) => {
            DisconnectReason::Transport(cause.clone())
        }
        other => DisconnectReason::Protocol(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disconnect_reason_mapping() {
        assert_eq!(
            disconnect_reason(&TransportError::Eof.into()),
            DisconnectReason::Eof
        );
        assert_eq!(
            disconnect_reason(&TransportError::Io("broken pipe".into()).into()),
            DisconnectReason::Transport("broken pipe".into())
        );
        assert!(matches!(
            disconnect_reason(
                &SessionError::HeaderError {
                    reason: "dup".into()
                }
                .into()
            ),
            DisconnectReason::Protocol(_)
        ));
    }

    #[test]
    fn test_frame_error_mapping() {
        assert!(matches!(
            frame_error(FrameError::Io("oops".into())),
            ferrofix_core::error::FixError::Transport(TransportError::Io(_))
        ));
        assert!(matches!(
            frame_error(FrameError::InvalidBeginString),
            ferrofix_core::error::FixError::Session(SessionError::HeaderError { .. })
        ));
    }
}
