/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Session lifecycle events.
//!
//! Events are pushed to an optional unbounded channel; a slow or absent
//! subscriber never blocks the engine.

use std::fmt;

/// Why a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisconnectReason {
    /// The user closed the outbound sink; Logout exchange completed or
    /// timed out.
    UserInitiated,
    /// The peer initiated a Logout.
    PeerLogout,
    /// The peer never answered our Logon.
    LogonTimeout,
    /// The peer went silent past 2.5 x the heartbeat interval.
    TestRequestTimeout,
    /// Protocol violation (header error, duplicate without PossDupFlag, ...).
    Protocol(String),
    /// The transport failed.
    Transport(String),
    /// The peer closed the connection.
    Eof,
}

impl DisconnectReason {
    /// Returns true when the user asked for the disconnect; the persistent
    /// connector treats every other reason as retryable.
    #[must_use]
    pub const fn is_user_initiated(&self) -> bool {
        matches!(self, Self::UserInitiated)
    }
}

impl fmt::Display for DisconnectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UserInitiated => write!(f, "user initiated"),
            Self::PeerLogout => write!(f, "peer logout"),
            Self::LogonTimeout => write!(f, "logon timeout"),
            Self::TestRequestTimeout => write!(f, "test request timeout"),
            Self::Protocol(reason) => write!(f, "protocol error: {}", reason),
            Self::Transport(reason) => write!(f, "transport error: {}", reason),
            Self::Eof => write!(f, "peer closed connection"),
        }
    }
}

/// Session lifecycle notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Logon handshake completed.
    LoggedOn,
    /// The peer rejected our Logon.
    LogonRejected {
        /// Text from the peer's Logout, if any.
        text: String,
    },
    /// We probed a silent peer.
    TestRequestSent {
        /// The TestReqID sent.
        id: String,
    },
    /// We detected an inbound gap and asked for a resend.
    ResendRequested {
        /// First missing sequence number.
        begin: u64,
        /// End of the requested range, 0 for open-ended.
        end: u64,
    },
    /// The peer asked us to resend; we replayed the range.
    Resending {
        /// First sequence number replayed.
        begin: u64,
        /// Last sequence number replayed.
        end: u64,
    },
    /// The incoming sequence counter was moved by a SequenceReset.
    SequenceReset {
        /// The new next-expected sequence number.
        new_seq: u64,
    },
    /// The peer rejected one of our messages.
    PeerRejected {
        /// RefSeqNum from the Reject.
        ref_seq: u64,
        /// Text from the Reject, if any.
        text: String,
    },
    /// The session ended.
    Disconnected {
        /// Why it ended.
        reason: DisconnectReason,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_initiated_is_terminal_for_connector() {
        assert!(DisconnectReason::UserInitiated.is_user_initiated());
        assert!(!DisconnectReason::PeerLogout.is_user_initiated());
        assert!(!DisconnectReason::Eof.is_user_initiated());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            DisconnectReason::Protocol("bad header".into()).to_string(),
            "protocol error: bad header"
        );
        assert_eq!(DisconnectReason::Eof.to_string(), "peer closed connection");
    }
}
