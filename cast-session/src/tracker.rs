//! Single-writer tracker for the active session.

use tracing::debug;

use cast_model::{Device, Session, SessionLifecycleEvent, SessionState};

use crate::error::{Result, SessionError};
use crate::transition::transition;

/// Tracks the one active session and collapses scattered lifecycle
/// callbacks into an authoritative snapshot.
///
/// At most one session exists at a time; `begin` on a terminal state
/// discards the previous instance. The tracker does not distinguish
/// meaningful from cosmetic changes: every applied callback yields a
/// full snapshot, since hosts need volume and status-text updates even
/// without a formal state transition.
pub struct SessionTracker {
    session: Option<Session>,
}

impl SessionTracker {
    /// Create a tracker with no session (`Idle`)
    pub fn new() -> Self {
        Self { session: None }
    }

    /// Current connection state; `Idle` when no session exists.
    pub fn state(&self) -> SessionState {
        self.session
            .as_ref()
            .map(|s| s.state)
            .unwrap_or(SessionState::Idle)
    }

    /// Whether a session is live (neither `Idle` nor `Failed`)
    pub fn is_active(&self) -> bool {
        !self.state().is_terminal()
    }

    /// Current session snapshot; `None` means no session.
    pub fn snapshot(&self) -> Option<Session> {
        self.session.clone()
    }

    /// Begin a fresh session instance toward `device`.
    ///
    /// Valid only from a terminal state (`Idle` or `Failed`); a prior
    /// failed instance is discarded. Returns the `Starting` snapshot.
    ///
    /// # Errors
    ///
    /// `SessionError::InvalidState` when a session is already live.
    pub fn begin(&mut self, device: Device) -> Result<Session> {
        let state = self.state();
        if !state.is_terminal() {
            return Err(SessionError::InvalidState {
                current: state,
                required: "idle",
            });
        }

        let session = Session::starting(device);
        self.session = Some(session.clone());
        Ok(session)
    }

    /// Request termination of the live session.
    ///
    /// Valid from any non-`Idle` state. The actual teardown is driven
    /// by the SDK's `Ended` callback; this only moves the snapshot to
    /// `Ending`. Returns the updated snapshot.
    ///
    /// # Errors
    ///
    /// `SessionError::InvalidState` when no session exists.
    pub fn request_end(&mut self) -> Result<Session> {
        let state = self.state();
        let Some(session) = self.session.as_mut() else {
            return Err(SessionError::InvalidState {
                current: state,
                required: "any non-idle",
            });
        };

        session.state = SessionState::Ending;
        Ok(session.clone())
    }

    /// Apply an SDK lifecycle callback.
    ///
    /// Merges carried attributes (session id, volume, mute, status
    /// text), advances the state machine where the event defines a
    /// transition, and returns the snapshot to surface. `None` means
    /// "no session" — the host's quiescent representation — which is
    /// what `Ended` and stale callbacks resolve to.
    pub fn apply(&mut self, event: &SessionLifecycleEvent) -> Option<Session> {
        let Some(session) = self.session.as_mut() else {
            debug!(?event, "lifecycle event with no session, surfacing null");
            return None;
        };

        match event {
            SessionLifecycleEvent::Started { session_id } => {
                session.id = Some(session_id.clone());
            }
            SessionLifecycleEvent::StartFailed { reason }
            | SessionLifecycleEvent::ResumeFailed { reason }
            | SessionLifecycleEvent::Suspended { reason } => {
                session.status_text = Some(reason.clone());
            }
            SessionLifecycleEvent::VolumeChanged { level, muted } => {
                session.volume = *level;
                session.muted = *muted;
            }
            SessionLifecycleEvent::StatusText { text } => {
                session.status_text = Some(text.clone());
            }
            _ => {}
        }

        match transition(session.state, event) {
            Some(SessionState::Idle) => {
                // Clean end: the instance is gone, not merely idle.
                self.session = None;
                None
            }
            Some(next) => {
                session.state = next;
                Some(session.clone())
            }
            None => {
                if !is_attribute_event(event) {
                    debug!(state = %session.state, ?event, "lifecycle event without transition");
                }
                Some(session.clone())
            }
        }
    }

    /// Drop the session outright, without an `Ended` handshake
    pub fn reset(&mut self) {
        self.session = None;
    }
}

impl Default for SessionTracker {
    fn default() -> Self {
        Self::new()
    }
}

fn is_attribute_event(event: &SessionLifecycleEvent) -> bool {
    matches!(
        event,
        SessionLifecycleEvent::VolumeChanged { .. } | SessionLifecycleEvent::StatusText { .. }
    )
}
