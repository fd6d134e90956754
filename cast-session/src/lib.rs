//! Session lifecycle tracking
//!
//! A receiver connection moves through many asynchronous states
//! reported via scattered SDK callbacks. The tracker collapses those
//! callbacks into one authoritative [`cast_model::Session`] snapshot,
//! re-emitted in full on every callback so host UIs never have to
//! piece state together from deltas.
//!
//! # Quick Start
//!
//! ```rust
//! use cast_model::{Device, DeviceId, SessionLifecycleEvent, SessionState};
//! use cast_session::SessionTracker;
//!
//! let device = Device {
//!     id: DeviceId::new("d1"),
//!     name: "Living Room".to_string(),
//!     model_name: "Receiver-X".to_string(),
//!     firmware_version: None,
//!     is_on_local_network: true,
//! };
//!
//! let mut tracker = SessionTracker::new();
//! let snapshot = tracker.begin(device).unwrap();
//! assert_eq!(snapshot.state, SessionState::Starting);
//!
//! // SDK callbacks drive all further transitions.
//! let snapshot = tracker.apply(&SessionLifecycleEvent::Started {
//!     session_id: "s1".into(),
//! });
//! assert_eq!(snapshot.unwrap().state, SessionState::Started);
//! ```

mod error;
mod tracker;
mod transition;

pub use error::{Result, SessionError};
pub use tracker::SessionTracker;
