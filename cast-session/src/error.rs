//! Error types for cast-session

use cast_model::SessionState;
use thiserror::Error;

/// Result type for cast-session operations
pub type Result<T> = std::result::Result<T, SessionError>;

/// Errors that can occur while driving the session lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// A command was issued in a state that forbids it
    #[error("invalid session state: {current} (command requires {required})")]
    InvalidState {
        current: SessionState,
        required: &'static str,
    },
}
