//! Shared data model for the cast-bridge workspace
//!
//! Every crate in the workspace speaks in terms of these types:
//! identity newtypes, the receiver-facing entities (`Device`,
//! `Session`, `QueueItem`, `MediaStatus`), and the closed event sets
//! that replace the upstream SDK's sprawling listener interfaces.
//!
//! # Event flow
//!
//! ```text
//! External SDK ──▶ AdapterEvent ──▶ registry / tracker / reconciler
//!                                          │
//!                                          ▼
//! Host application ◀── HostEvent ◀── CastBridge (facade)
//! ```
//!
//! The model is deliberately free of behavior beyond identity
//! normalization; reconciliation logic lives in the sibling crates.

pub mod device;
pub mod event;
pub mod ids;
pub mod queue;
pub mod session;
pub mod status;

pub use device::{Device, DeviceSighting};
pub use event::{AdapterEvent, HostEvent, QueueDelta, SessionLifecycleEvent};
pub use ids::{DeviceId, ItemId, RouteId, SessionId};
pub use queue::{MediaInfo, QueueItem};
pub use session::{Session, SessionState};
pub use status::{IdleReason, MediaStatus, PlayerState, QueueRepeatMode};

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::device::{Device, DeviceSighting};
    pub use crate::event::{AdapterEvent, HostEvent, QueueDelta, SessionLifecycleEvent};
    pub use crate::ids::{DeviceId, ItemId, RouteId, SessionId};
    pub use crate::queue::{MediaInfo, QueueItem};
    pub use crate::session::{Session, SessionState};
    pub use crate::status::{IdleReason, MediaStatus, PlayerState, QueueRepeatMode};
}
