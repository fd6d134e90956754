//! # cast-bridge
//!
//! High-level facade tying the state-reconciliation components into a
//! single host-facing surface for controlling a media-casting
//! receiver.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                     Host                        │
//! │        commands ↓            ↑ HostEvent        │
//! ├─────────────────────────────────────────────────┤
//! │                  CastBridge                     │
//! │  ┌────────────┐ ┌─────────────┐ ┌────────────┐  │
//! │  │  Device    │ │  Session    │ │   Queue    │  │
//! │  │  Registry  │ │  Tracker    │ │ Reconciler │  │
//! │  └────────────┘ └─────────────┘ └────────────┘  │
//! ├─────────────────────────────────────────────────┤
//! │              CastAdapter (trait)                │
//! │     commands ↓            ↑ AdapterEvent        │
//! ├─────────────────────────────────────────────────┤
//! │               External casting SDK              │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! The bridge owns one [`CastAdapter`] implementation, feeds its
//! normalized notifications through [`CastBridge::handle_event`], and
//! broadcasts resulting state changes as [`cast_model::HostEvent`]s.
//! Consistent local state is the contract: the host never talks to the
//! SDK directly and never sees a partially applied change.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cast_bridge::{BridgeConfig, CastBridge};
//!
//! let mut bridge = CastBridge::new(my_sdk_adapter, BridgeConfig::default());
//! let mut events = bridge.subscribe();
//!
//! bridge.start_discovery()?;
//! // ... feed SDK callbacks: bridge.handle_event(event)
//! // ... react to events: events.recv().await
//! ```

mod adapter;
mod bridge;
mod command;
mod config;
mod error;
pub mod logging;
mod poller;

pub use adapter::{AdapterError, CastAdapter};
pub use bridge::CastBridge;
pub use command::{
    Dispatch, MediaLoadRequest, QueueCommand, QueueLoadRequest, SeekRequest, TransportCommand,
};
pub use config::BridgeConfig;
pub use error::{BridgeError, Result};
pub use logging::{init_logging, init_logging_from_env, LoggingError, LoggingMode};

/// Convenience re-exports for hosts embedding the bridge
pub mod prelude {
    pub use crate::{
        AdapterError, BridgeConfig, BridgeError, CastAdapter, CastBridge, Dispatch, QueueCommand,
        TransportCommand,
    };
    pub use cast_model::prelude::*;
}
