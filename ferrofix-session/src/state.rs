/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Session phase tracking.
//!
//! The session moves through a fixed set of phases driven by wire events:
//!
//! ```text
//! Disconnected → Connecting → LogonSent → LoggedOn → LogoutSent → Disconnected
//! ```
//!
//! Phases are a runtime enum because every transition is decided by inbound
//! traffic and timers, not by the call graph.

use std::fmt;

/// Logical phase of a FIX session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    /// No transport; no messages exchanged.
    Disconnected,
    /// Transport being established.
    Connecting,
    /// Logon sent, awaiting the peer's Logon.
    LogonSent,
    /// Session fully established.
    LoggedOn,
    /// Logout sent, awaiting the peer's confirmation.
    LogoutSent,
}

impl SessionPhase {
    /// Returns true when `next` is a legal successor of this phase.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Disconnected, Self::Connecting)
                | (Self::Connecting, Self::LogonSent)
                | (Self::Connecting, Self::Disconnected)
                | (Self::LogonSent, Self::LoggedOn)
                | (Self::LogonSent, Self::Disconnected)
                | (Self::LoggedOn, Self::LogoutSent)
                | (Self::LoggedOn, Self::Disconnected)
                | (Self::LogoutSent, Self::Disconnected)
        )
    }

    /// Returns true once the logon handshake has completed.
    #[must_use]
    pub const fn is_established(self) -> bool {
        matches!(self, Self::LoggedOn)
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Disconnected => "Disconnected",
            Self::Connecting => "Connecting",
            Self::LogonSent => "LogonSent",
            Self::LoggedOn => "LoggedOn",
            Self::LogoutSent => "LogoutSent",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_transitions() {
        assert!(SessionPhase::Disconnected.can_transition_to(SessionPhase::Connecting));
        assert!(SessionPhase::Connecting.can_transition_to(SessionPhase::LogonSent));
        assert!(SessionPhase::LogonSent.can_transition_to(SessionPhase::LoggedOn));
        assert!(SessionPhase::LoggedOn.can_transition_to(SessionPhase::LogoutSent));
        assert!(SessionPhase::LogoutSent.can_transition_to(SessionPhase::Disconnected));
    }

    #[test]
    fn test_illegal_transitions() {
        assert!(!SessionPhase::Disconnected.can_transition_to(SessionPhase::LoggedOn));
        assert!(!SessionPhase::LogoutSent.can_transition_to(SessionPhase::LoggedOn));
        assert!(!SessionPhase::LoggedOn.can_transition_to(SessionPhase::LogonSent));
    }

    #[test]
    fn test_is_established() {
        assert!(SessionPhase::LoggedOn.is_established());
        assert!(!SessionPhase::LogonSent.is_established());
    }
}
