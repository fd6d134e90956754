//! The bridge facade
//!
//! `CastBridge` composes the device registry, the session tracker, and
//! the queue reconciler behind one context object. It is the single
//! point of contact with the external SDK adapter and the single point
//! of contact with the host: every inbound command maps to one
//! component method or a direct adapter passthrough, and every state
//! change goes out as exactly one host event.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use cast_model::{
    AdapterEvent, Device, DeviceId, HostEvent, ItemId, MediaStatus, QueueDelta, QueueItem,
    Session, SessionLifecycleEvent,
};
use cast_queue::QueueReconciler;
use cast_registry::DeviceRegistry;
use cast_session::SessionTracker;

use crate::adapter::CastAdapter;
use crate::command::{Dispatch, QueueCommand, TransportCommand};
use crate::config::BridgeConfig;
use crate::error::{BridgeError, Result};
use crate::poller::PositionPoller;

/// Host-facing facade over one casting receiver connection.
///
/// All state mutation happens through two entry points on one owner:
/// host commands (the public methods) and SDK notifications
/// ([`CastBridge::handle_event`]). The upstream SDK delivers its
/// callbacks serially, so the bridge needs no internal locking beyond
/// the adapter handle it shares with the position poller.
///
/// Constructed once at startup and passed around explicitly; there is
/// no ambient global state.
pub struct CastBridge<A: CastAdapter> {
    adapter: Arc<Mutex<A>>,
    registry: DeviceRegistry,
    tracker: SessionTracker,
    queue: QueueReconciler,
    media: Option<MediaStatus>,
    poller: PositionPoller,
    events_tx: broadcast::Sender<HostEvent>,
    config: BridgeConfig,
}

impl<A: CastAdapter> CastBridge<A> {
    /// Create a bridge over the given SDK adapter
    pub fn new(adapter: A, config: BridgeConfig) -> Self {
        let (events_tx, _) = broadcast::channel(config.event_capacity);
        Self {
            adapter: Arc::new(Mutex::new(adapter)),
            registry: DeviceRegistry::new(),
            tracker: SessionTracker::new(),
            queue: QueueReconciler::new(),
            media: None,
            poller: PositionPoller::new(config.position_poll_interval),
            events_tx,
            config,
        }
    }

    /// Subscribe to the host event stream.
    ///
    /// One event per state change, never batched, never coalesced
    /// across components.
    pub fn subscribe(&self) -> broadcast::Receiver<HostEvent> {
        self.events_tx.subscribe()
    }

    // ========================================================================
    // Snapshots (copy-on-read)
    // ========================================================================

    /// Current deduplicated device list, in discovery order
    pub fn devices(&self) -> Vec<Device> {
        self.registry.snapshot()
    }

    /// Current session snapshot; `None` when no session exists
    pub fn session(&self) -> Option<Session> {
        self.tracker.snapshot()
    }

    /// Latest pushed media status, if any
    pub fn media_status(&self) -> Option<MediaStatus> {
        self.media.clone()
    }

    /// Ordered queue mirror, skipping items whose content is still in
    /// flight
    pub fn queue_items(&self) -> Vec<QueueItem> {
        self.queue.ordered_snapshot()
    }

    // ========================================================================
    // Discovery commands
    // ========================================================================

    pub fn start_discovery(&mut self) -> Result<()> {
        self.adapter.lock().start_discovery()?;
        Ok(())
    }

    /// Stop discovery and drop all sighted devices
    pub fn stop_discovery(&mut self) -> Result<()> {
        self.adapter.lock().stop_discovery()?;
        if self.registry.clear() {
            self.emit(HostEvent::DevicesChanged(Vec::new()));
        }
        Ok(())
    }

    // ========================================================================
    // Session commands
    // ========================================================================

    /// Connect to a discovered device.
    ///
    /// Transitions the tracker to `Starting` and emits the snapshot;
    /// further progress arrives through lifecycle events. A connect
    /// failure from the SDK is returned as the command's error and
    /// folded into the session snapshot as a `Failed` state.
    ///
    /// # Errors
    ///
    /// - [`BridgeError::DeviceNotFound`] for an id outside the current
    ///   discovery snapshot
    /// - [`BridgeError::Session`] when a session is already live
    /// - [`BridgeError::Adapter`] when the SDK rejects the connect
    pub fn start_session(&mut self, device_id: &DeviceId) -> Result<()> {
        let device = self
            .registry
            .get(device_id)
            .ok_or_else(|| BridgeError::DeviceNotFound(device_id.clone()))?;

        let snapshot = self.tracker.begin(device.clone())?;

        if let Err(err) = self.adapter.lock().connect(&device) {
            let snapshot = self.tracker.apply(&SessionLifecycleEvent::StartFailed {
                reason: err.to_string(),
            });
            self.emit(HostEvent::SessionChanged(snapshot));
            return Err(err.into());
        }

        self.emit(HostEvent::SessionChanged(Some(snapshot)));
        Ok(())
    }

    /// Request termination of the live session.
    ///
    /// `stop_receiver = true` also halts playback on the receiver;
    /// `false` disconnects and leaves it playing (the host going to
    /// the background vs. an explicit "stop casting").
    pub fn end_session(&mut self, stop_receiver: bool) -> Result<()> {
        let snapshot = self.tracker.request_end()?;
        let result = self.adapter.lock().disconnect(stop_receiver);
        // The tracker is already in Ending; the host must see that
        // even when the SDK rejects the disconnect.
        self.emit(HostEvent::SessionChanged(Some(snapshot)));
        result?;
        Ok(())
    }

    /// Set receiver volume; no-op without a session. The updated
    /// level comes back through a `VolumeChanged` lifecycle event.
    pub fn set_volume(&mut self, level: f64) -> Result<Dispatch> {
        if !self.tracker.is_active() {
            return Ok(Dispatch::NoSession);
        }
        self.adapter.lock().set_volume(level)?;
        Ok(Dispatch::Forwarded)
    }

    /// Set receiver mute; no-op without a session
    pub fn set_mute(&mut self, muted: bool) -> Result<Dispatch> {
        if !self.tracker.is_active() {
            return Ok(Dispatch::NoSession);
        }
        self.adapter.lock().set_mute(muted)?;
        Ok(Dispatch::Forwarded)
    }

    // ========================================================================
    // Media commands (adapter passthrough)
    // ========================================================================

    /// Transport control; silent no-op without a session
    pub fn transport(&mut self, command: TransportCommand) -> Result<Dispatch> {
        if !self.tracker.is_active() {
            debug!(?command, "transport command with no session");
            return Ok(Dispatch::NoSession);
        }
        self.adapter.lock().transport(command)?;
        Ok(Dispatch::Forwarded)
    }

    /// Queue mutation; silent no-op without a session. Resulting
    /// membership changes come back as queue deltas.
    pub fn queue(&mut self, command: QueueCommand) -> Result<Dispatch> {
        if !self.tracker.is_active() {
            debug!(?command, "queue command with no session");
            return Ok(Dispatch::NoSession);
        }
        self.adapter.lock().queue(command)?;
        Ok(Dispatch::Forwarded)
    }

    // ========================================================================
    // Teardown
    // ========================================================================

    /// Apply the configured app-teardown policy.
    ///
    /// With `stop_receiver_on_teardown` set, a live session is ended
    /// with `stop_receiver = true`; otherwise the receiver keeps
    /// playing. The position poller stops either way.
    pub fn teardown(&mut self) {
        if self.config.stop_receiver_on_teardown && self.tracker.is_active() {
            if let Err(err) = self.end_session(true) {
                warn!(%err, "failed to end session during teardown");
            }
        }
        self.poller.stop();
    }

    // ========================================================================
    // SDK event intake
    // ========================================================================

    /// Apply one normalized SDK notification.
    ///
    /// The single serial entry point for all three event families;
    /// events must be fed in arrival order.
    pub fn handle_event(&mut self, event: AdapterEvent) {
        match event {
            AdapterEvent::DeviceSighted(sighting) => {
                if self.registry.on_sighting(sighting) {
                    self.emit(HostEvent::DevicesChanged(self.registry.snapshot()));
                }
            }
            AdapterEvent::DeviceRemoved(route_id) => {
                if self.registry.on_removal(&route_id) {
                    self.emit(HostEvent::DevicesChanged(self.registry.snapshot()));
                }
            }
            AdapterEvent::SessionTransitioned(event) => self.on_session_event(event),
            AdapterEvent::QueueDelta(delta) => self.on_queue_delta(delta),
            AdapterEvent::StatusPushed(status) => self.on_status(status),
        }
    }

    fn on_session_event(&mut self, event: SessionLifecycleEvent) {
        // Reattaching to a receiver that kept playing while we were
        // away: its queue is unknown to us, ask for the id list.
        if matches!(event, SessionLifecycleEvent::Resumed) {
            if let Err(err) = self.adapter.lock().fetch_queue_ids() {
                warn!(%err, "queue id refetch on resume failed");
            }
        }

        let terminal = matches!(
            event,
            SessionLifecycleEvent::Ended
                | SessionLifecycleEvent::StartFailed { .. }
                | SessionLifecycleEvent::ResumeFailed { .. }
        );

        let snapshot = self.tracker.apply(&event);
        self.emit(HostEvent::SessionChanged(snapshot));

        if terminal {
            self.poller.stop();
            self.media = None;
            self.queue.clear();
            self.emit(HostEvent::QueueChanged(Vec::new()));
        }
    }

    fn on_queue_delta(&mut self, delta: QueueDelta) {
        match delta {
            QueueDelta::FullIdList(ids) => {
                let visible = self.queue.ordered_snapshot();
                let fetch = self.queue.on_full_id_list(ids);
                // A reorder of already-cached items changes the visible
                // mirror without needing any fetch.
                self.emit_queue_if_changed(visible);
                self.request_fetch(fetch);
            }
            QueueDelta::Inserted { ids, before } => {
                let visible = self.queue.ordered_snapshot();
                let fetch = self.queue.on_items_inserted(ids, before);
                self.emit_queue_if_changed(visible);
                self.request_fetch(fetch);
            }
            QueueDelta::Removed(ids) => {
                if self.queue.on_items_removed(&ids) {
                    self.emit(HostEvent::QueueChanged(self.queue.ordered_snapshot()));
                }
            }
            QueueDelta::Changed(ids) => {
                let fetch = self.queue.on_items_changed(ids);
                self.request_fetch(fetch);
            }
            QueueDelta::Fetched(items) => {
                self.queue.on_items_fetched(items);
                self.emit(HostEvent::QueueChanged(self.queue.ordered_snapshot()));
            }
            QueueDelta::FetchFailed { ids, reason } => {
                // Not retried; the ids stay out of the snapshot until
                // a later fetch or removal.
                warn!(?ids, %reason, "queue content fetch failed");
            }
        }
    }

    fn on_status(&mut self, status: MediaStatus) {
        let finished = status.is_finished();

        self.media = Some(status.clone());
        self.poller
            .restart(Arc::clone(&self.adapter), self.events_tx.clone());
        self.emit(HostEvent::MediaStatusChanged(status));

        // Natural end of the queue: the receiver discards its media
        // session, mirror that by dropping ours.
        if finished {
            self.queue.clear();
            self.emit(HostEvent::QueueChanged(Vec::new()));
        }
    }

    /// Emit `QueueChanged` when the visible mirror differs from the
    /// snapshot taken before a delta was applied.
    fn emit_queue_if_changed(&self, before: Vec<QueueItem>) {
        let after = self.queue.ordered_snapshot();
        if after != before {
            self.emit(HostEvent::QueueChanged(after));
        }
    }

    /// Dispatch a content fetch for the given ids, if any.
    ///
    /// Fetches complete asynchronously through a `Fetched` delta; a
    /// failed dispatch is logged and not retried.
    fn request_fetch(&mut self, ids: Vec<ItemId>) {
        if ids.is_empty() {
            return;
        }
        if let Err(err) = self.adapter.lock().fetch_queue_items(&ids) {
            warn!(%err, ?ids, "failed to dispatch queue content fetch");
        }
    }

    fn emit(&self, event: HostEvent) {
        // No subscribers is fine; the host may not have attached yet.
        let _ = self.events_tx.send(event);
    }
}

impl<A: CastAdapter> Drop for CastBridge<A> {
    fn drop(&mut self) {
        self.poller.stop();
    }
}
