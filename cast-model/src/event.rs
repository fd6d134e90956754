//! Event types crossing the bridge boundaries
//!
//! The upstream SDK exposes deep listener interfaces with one method
//! per callback; these collapse into small closed enums dispatched
//! through a single handler. `AdapterEvent` flows inward from the SDK
//! adapter, `HostEvent` flows outward to the host application.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::device::{Device, DeviceSighting};
use crate::ids::{ItemId, RouteId, SessionId};
use crate::queue::QueueItem;
use crate::session::Session;
use crate::status::MediaStatus;

/// Normalized notification from the external SDK adapter.
///
/// Delivered serially, in arrival order, on the bridge's single
/// callback-processing context.
#[derive(Debug, Clone, PartialEq)]
pub enum AdapterEvent {
    /// A transport route announced or updated a receiver
    DeviceSighted(DeviceSighting),
    /// A transport route went away
    DeviceRemoved(RouteId),
    /// The session lifecycle advanced
    SessionTransitioned(SessionLifecycleEvent),
    /// The receiver reported a queue membership/content change
    QueueDelta(QueueDelta),
    /// The receiver pushed a fresh transport status
    StatusPushed(MediaStatus),
}

/// One step of the session lifecycle as reported by the SDK.
///
/// Attribute-only events (`VolumeChanged`, `StatusText`) carry no
/// state transition but are still surfaced to the host in full.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionLifecycleEvent {
    Starting,
    Started { session_id: SessionId },
    StartFailed { reason: String },
    Suspended { reason: String },
    Resuming,
    Resumed,
    ResumeFailed { reason: String },
    Ending,
    Ended,
    VolumeChanged { level: f64, muted: bool },
    StatusText { text: String },
}

/// Incremental queue notification.
///
/// The SDK never delivers the queue atomically: membership and
/// ordering arrive as id-level deltas, content arrives later via
/// `Fetched`, possibly out of order relative to the deltas.
#[derive(Debug, Clone, PartialEq)]
pub enum QueueDelta {
    /// Wholesale replacement of the queue ordering
    FullIdList(Vec<ItemId>),
    /// Items spliced in before `before`; `None` or an unknown anchor
    /// means append
    Inserted {
        ids: Vec<ItemId>,
        before: Option<ItemId>,
    },
    Removed(Vec<ItemId>),
    /// Content for these ids is stale and must be refetched
    Changed(Vec<ItemId>),
    /// Asynchronous completion of a content fetch
    Fetched(Vec<QueueItem>),
    /// A content fetch failed; ids stay absent until refetched
    FetchFailed { ids: Vec<ItemId>, reason: String },
}

/// Normalized event emitted to the host application.
///
/// One event per state change, never batched and never coalesced
/// across components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HostEvent {
    DevicesChanged(Vec<Device>),
    SessionChanged(Option<Session>),
    MediaStatusChanged(MediaStatus),
    QueueChanged(Vec<QueueItem>),
    /// Periodic stream-position refresh between status pushes
    PositionUpdated(Duration),
}
