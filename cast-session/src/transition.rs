//! Session state machine transition table.

use cast_model::{SessionLifecycleEvent, SessionState};

/// Compute the next state for a lifecycle event.
///
/// Returns `None` when the event carries no transition for the current
/// state: attribute-only events (`VolumeChanged`, `StatusText`) and
/// event/state pairs the machine does not define. The tracker keeps
/// the current state in both cases.
pub(crate) fn transition(state: SessionState, event: &SessionLifecycleEvent) -> Option<SessionState> {
    use SessionLifecycleEvent as E;
    use SessionState as S;

    match (state, event) {
        (S::Idle | S::Failed, E::Starting) => Some(S::Starting),
        (S::Starting, E::Started { .. }) => Some(S::Started),
        (S::Starting, E::StartFailed { .. }) => Some(S::Failed),
        (S::Started, E::Suspended { .. }) => Some(S::Suspended),
        (S::Suspended, E::Resuming) => Some(S::Resuming),
        // Some SDKs skip the explicit resuming step.
        (S::Resuming | S::Suspended, E::Resumed) => Some(S::Started),
        (S::Resuming, E::ResumeFailed { .. }) => Some(S::Failed),
        (S::Starting | S::Started | S::Suspended | S::Resuming, E::Ending) => Some(S::Ending),
        (s, E::Ended) if s != S::Idle => Some(S::Idle),
        _ => None,
    }
}
