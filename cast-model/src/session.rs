//! Session types
//!
//! A `Session` is the logical connection between the host and one
//! receiver. The tracker in `cast-session` owns the single live
//! instance; everything here is plain data.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::device::Device;
use crate::ids::SessionId;

/// Connection state of a session.
///
/// ```text
/// Idle ─▶ Starting ─▶ Started ─▶ Suspended ⇄ Resuming ─▶ Started
///              │                                  │
///              ├──────────▶ Failed ◀──────────────┘
///              │
///  (any non-Idle) ─▶ Ending ─▶ Idle
/// ```
///
/// `Idle` and `Failed` are terminal for a session instance; a new
/// `Starting` always begins a fresh instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Idle,
    Starting,
    Started,
    Suspended,
    Resuming,
    Ending,
    Failed,
}

impl SessionState {
    /// Terminal states admit a fresh session instance.
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionState::Idle | SessionState::Failed)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionState::Idle => "idle",
            SessionState::Starting => "starting",
            SessionState::Started => "started",
            SessionState::Suspended => "suspended",
            SessionState::Resuming => "resuming",
            SessionState::Ending => "ending",
            SessionState::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}

/// Snapshot of the active connection.
///
/// Re-emitted in full on every lifecycle callback; hosts render from
/// the snapshot rather than tracking deltas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Assigned by the SDK once the connection is established
    pub id: Option<SessionId>,
    pub device: Device,
    pub state: SessionState,
    /// Receiver volume in `0.0..=1.0`
    pub volume: f64,
    pub muted: bool,
    /// Last status text pushed by the receiver application
    pub status_text: Option<String>,
}

impl Session {
    /// A fresh session instance in `Starting` for the given device.
    pub fn starting(device: Device) -> Self {
        Self {
            id: None,
            device,
            state: SessionState::Starting,
            volume: 0.0,
            muted: false,
            status_text: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(SessionState::Idle.is_terminal());
        assert!(SessionState::Failed.is_terminal());
        assert!(!SessionState::Starting.is_terminal());
        assert!(!SessionState::Ending.is_terminal());
    }

    #[test]
    fn test_display() {
        assert_eq!(SessionState::Suspended.to_string(), "suspended");
    }
}
