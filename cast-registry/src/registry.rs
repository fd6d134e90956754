//! Core registry logic: sighting dedup and route bookkeeping.

use std::collections::HashSet;

use tracing::{debug, warn};

use cast_model::{Device, DeviceId, DeviceSighting, RouteId};

/// One logical receiver and the transport routes that map to it.
struct Entry {
    device: Device,
    /// SDK-native id, once any route has reported one
    native_id: Option<DeviceId>,
    /// (name, model) fold key for routes without a usable native id
    signature: (String, String),
    routes: HashSet<RouteId>,
}

/// Deduplicated, discovery-ordered index of receiver devices.
///
/// Single-writer owned store: all mutations happen on the bridge's
/// callback-processing context, and readers get cloned snapshots
/// rather than references into the live table.
///
/// Dedup key is the SDK-native unique id when present. Sightings that
/// share a (name, model) signature are folded into one logical device
/// even when their native ids differ, because some transports report
/// the same physical receiver through more than one discovery route
/// under different ids. Known limitation, carried over deliberately:
/// two distinct receivers that share both display name and model will
/// collapse into one entry.
pub struct DeviceRegistry {
    /// Discovery order; snapshot order is stable across calls
    entries: Vec<Entry>,
}

impl DeviceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record a route sighting.
    ///
    /// Returns `true` when the visible device list changed: a new
    /// logical device appeared or an attribute of an existing one
    /// differs. Route-only updates (same device seen again via another
    /// route) return `false`.
    ///
    /// Malformed sightings with no identity at all are dropped
    /// silently; this is a best-effort index, not a transactional
    /// store.
    pub fn on_sighting(&mut self, sighting: DeviceSighting) -> bool {
        if !sighting.has_identity() {
            warn!(route = %sighting.route_id, "dropping sighting without identity");
            return false;
        }

        match self.find_entry(&sighting) {
            Some(index) => self.merge_into(index, sighting),
            None => {
                let entry = Entry::from_sighting(sighting);
                debug!(device = %entry.device.id, "new device discovered");
                self.entries.push(entry);
                true
            }
        }
    }

    /// Drop a transport route.
    ///
    /// The logical device disappears only when no surviving route
    /// still maps to it. Returns `true` when the visible list changed.
    pub fn on_removal(&mut self, route_id: &RouteId) -> bool {
        let Some(index) = self
            .entries
            .iter()
            .position(|entry| entry.routes.contains(route_id))
        else {
            return false;
        };

        let entry = &mut self.entries[index];
        entry.routes.remove(route_id);

        if entry.routes.is_empty() {
            let entry = self.entries.remove(index);
            debug!(device = %entry.device.id, "device lost its last route");
            true
        } else {
            false
        }
    }

    /// Current ordered device list (discovery order, copy-on-read).
    pub fn snapshot(&self) -> Vec<Device> {
        self.entries
            .iter()
            .map(|entry| entry.device.clone())
            .collect()
    }

    /// Look up a device by its stable id
    pub fn get(&self, id: &DeviceId) -> Option<Device> {
        self.entries
            .iter()
            .find(|entry| entry.device.id == *id)
            .map(|entry| entry.device.clone())
    }

    /// Drop everything (discovery stopped). Returns `true` if any
    /// devices were visible.
    pub fn clear(&mut self) -> bool {
        let had_entries = !self.entries.is_empty();
        self.entries.clear();
        had_entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Locate the logical entry a sighting belongs to: native id match
    /// first, then the name+model fold.
    fn find_entry(&self, sighting: &DeviceSighting) -> Option<usize> {
        if let Some(native) = &sighting.device_id {
            if let Some(index) = self
                .entries
                .iter()
                .position(|entry| entry.native_id.as_ref() == Some(native))
            {
                return Some(index);
            }
        }

        let signature = signature_of(sighting);
        if signature.0.is_empty() && signature.1.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .position(|entry| entry.signature == signature)
    }

    /// Fold a sighting into an existing entry, updating attributes in
    /// place. Returns `true` when any host-visible attribute changed.
    fn merge_into(&mut self, index: usize, sighting: DeviceSighting) -> bool {
        let entry = &mut self.entries[index];
        entry.routes.insert(sighting.route_id);

        let before = entry.device.clone();

        // A route may supply the native id the entry was missing; the
        // stable id upgrades from the derived form.
        if entry.native_id.is_none() {
            if let Some(native) = sighting.device_id {
                entry.device.id = native.clone();
                entry.native_id = Some(native);
            }
        }

        entry.device.name = sighting.name.clone();
        entry.device.model_name = sighting.model_name.clone();
        entry.signature = (sighting.name, sighting.model_name);
        if sighting.firmware_version.is_some() {
            entry.device.firmware_version = sighting.firmware_version;
        }
        entry.device.is_on_local_network = sighting.is_on_local_network;

        entry.device != before
    }
}

impl Default for DeviceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Entry {
    fn from_sighting(sighting: DeviceSighting) -> Self {
        let signature = signature_of(&sighting);
        let id = match &sighting.device_id {
            Some(native) => native.clone(),
            // Derived stable id for transports that never report one
            None => DeviceId::new(format!("{}#{}", signature.0, signature.1)),
        };

        let mut routes = HashSet::new();
        routes.insert(sighting.route_id);

        Self {
            device: Device {
                id,
                name: sighting.name.clone(),
                model_name: sighting.model_name.clone(),
                firmware_version: sighting.firmware_version,
                is_on_local_network: sighting.is_on_local_network,
            },
            native_id: sighting.device_id,
            signature,
            routes,
        }
    }
}

fn signature_of(sighting: &DeviceSighting) -> (String, String) {
    (sighting.name.clone(), sighting.model_name.clone())
}
