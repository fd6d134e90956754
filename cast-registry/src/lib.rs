//! Deduplicated receiver device index
//!
//! Transports can report the same physical receiver through more than
//! one discovery route, sometimes with different native ids. The
//! registry folds those sightings into a stable, discovery-ordered
//! list of logical devices and tells its caller whether the visible
//! list actually changed, so no redundant notifications reach the
//! host.
//!
//! # Quick Start
//!
//! ```rust
//! use cast_model::{DeviceSighting, RouteId};
//! use cast_registry::DeviceRegistry;
//!
//! let mut registry = DeviceRegistry::new();
//!
//! let sighting = DeviceSighting {
//!     route_id: RouteId::new("route-1"),
//!     device_id: Some("d1".into()),
//!     name: "Living Room".to_string(),
//!     model_name: "Receiver-X".to_string(),
//!     firmware_version: None,
//!     is_on_local_network: true,
//! };
//!
//! assert!(registry.on_sighting(sighting));
//! assert_eq!(registry.snapshot().len(), 1);
//! ```

mod registry;

pub use registry::DeviceRegistry;
