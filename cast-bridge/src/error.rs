//! Error types for cast-bridge

use thiserror::Error;

use cast_model::DeviceId;
use cast_session::SessionError;

use crate::adapter::AdapterError;

/// Result type for cast-bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Errors surfaced to the host as the result of a specific command.
///
/// Reconciliation-internal inconsistencies (unknown insert anchors,
/// duplicate ids, removal of absent ids) are normalized silently and
/// never appear here; only command-level and SDK-reported failures do.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// The requested device is not in the current discovery snapshot
    #[error("no discovered device with id {0}")]
    DeviceNotFound(DeviceId),

    /// A session command was issued in a state that forbids it
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The external SDK reported a failure for the originating command
    #[error(transparent)]
    Adapter(#[from] AdapterError),
}
