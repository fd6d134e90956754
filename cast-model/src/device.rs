//! Receiver device types
//!
//! `DeviceSighting` is the raw, per-route input delivered by the
//! transport; `Device` is the deduplicated logical receiver the host
//! sees. The mapping between the two is the registry's job.

use serde::{Deserialize, Serialize};

use crate::ids::{DeviceId, RouteId};

/// A logical receiver device as exposed to the host.
///
/// At most one `Device` exists per physical receiver, even when the
/// transport reports it through several discovery routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Stable identity, SDK-assigned or derived from name+model
    pub id: DeviceId,
    /// Display name shown to the user
    pub name: String,
    /// Receiver hardware model
    pub model_name: String,
    /// Receiver firmware version, when the transport reports one
    pub firmware_version: Option<String>,
    /// Whether the receiver was found on the local network
    pub is_on_local_network: bool,
}

/// One raw route announcement from the transport.
///
/// The native id may be absent; the registry then falls back to the
/// (name, model) signature for identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSighting {
    /// The transport route this sighting arrived on
    pub route_id: RouteId,
    /// SDK-native unique id, when the transport provides one
    pub device_id: Option<DeviceId>,
    pub name: String,
    pub model_name: String,
    pub firmware_version: Option<String>,
    pub is_on_local_network: bool,
}

impl DeviceSighting {
    /// Whether this sighting carries enough identity to index.
    ///
    /// A sighting with neither a native id nor a name+model signature
    /// cannot be mapped to a logical device and is dropped by the
    /// registry.
    pub fn has_identity(&self) -> bool {
        self.device_id.is_some() || !(self.name.is_empty() && self.model_name.is_empty())
    }
}
