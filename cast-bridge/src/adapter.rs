//! External SDK adapter boundary
//!
//! The casting protocol, device transport, and media handling live in
//! an external SDK. [`CastAdapter`] is the abstract capability the
//! bridge consumes instead of vendor API surface: commands flow down
//! through its methods, notifications flow back up as
//! [`cast_model::AdapterEvent`] values fed to
//! [`crate::CastBridge::handle_event`].

use std::time::Duration;

use thiserror::Error;

use cast_model::{Device, ItemId};

use crate::command::{QueueCommand, TransportCommand};

/// Errors reported by the external SDK adapter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdapterError {
    /// The SDK reported a failure for the requested operation
    #[error("SDK operation failed: {0}")]
    Operation(String),

    /// The transport is not in a state to carry the operation
    #[error("transport unavailable: {0}")]
    Unavailable(String),
}

/// Abstract capability boundary over the external casting SDK.
///
/// Implementations wrap a vendor SDK and are expected to deliver their
/// callbacks as normalized [`cast_model::AdapterEvent`]s, serially and
/// in arrival order. All methods are non-blocking: operations that
/// take time on the network complete through a later event, never
/// through the return value.
pub trait CastAdapter: Send + 'static {
    /// Begin emitting `DeviceSighted`/`DeviceRemoved` events
    fn start_discovery(&mut self) -> Result<(), AdapterError>;

    /// Stop discovery; previously sighted routes are forgotten
    fn stop_discovery(&mut self) -> Result<(), AdapterError>;

    /// Open a connection to the receiver; lifecycle progress arrives
    /// as `SessionTransitioned` events
    fn connect(&mut self, device: &Device) -> Result<(), AdapterError>;

    /// Tear the connection down. `stop_receiver` also halts playback
    /// on the receiver; `false` disconnects and leaves it playing.
    fn disconnect(&mut self, stop_receiver: bool) -> Result<(), AdapterError>;

    /// Set receiver volume (`0.0..=1.0`)
    fn set_volume(&mut self, level: f64) -> Result<(), AdapterError>;

    fn set_mute(&mut self, muted: bool) -> Result<(), AdapterError>;

    /// Ask the receiver for its full queue id list; answered by a
    /// `QueueDelta::FullIdList` event
    fn fetch_queue_ids(&mut self) -> Result<(), AdapterError>;

    /// Ask the receiver for item content; answered by a
    /// `QueueDelta::Fetched` (or `FetchFailed`) event
    fn fetch_queue_items(&mut self, ids: &[ItemId]) -> Result<(), AdapterError>;

    /// Queue mutation passthrough (insert, remove, reorder, jump, ...)
    fn queue(&mut self, command: QueueCommand) -> Result<(), AdapterError>;

    /// Transport control passthrough (load, play, pause, seek, ...)
    fn transport(&mut self, command: TransportCommand) -> Result<(), AdapterError>;

    /// Best-effort current stream position, used by the position
    /// poller between status pushes
    fn approximate_position(&self) -> Duration;
}
