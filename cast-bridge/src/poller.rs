//! Stream-position polling timer
//!
//! The receiver only pushes a full `MediaStatus` on transport changes;
//! between pushes the stream position is derived locally by polling
//! the adapter on a fixed cadence. The timer is reset on every status
//! push, stopped on session end, and never outlives the bridge.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use cast_model::HostEvent;

use crate::adapter::CastAdapter;

/// Periodic `PositionUpdated` emitter.
///
/// One timer per bridge; `restart` replaces any running task so at
/// most one poll loop exists at a time.
pub(crate) struct PositionPoller {
    interval: Duration,
    task: Option<JoinHandle<()>>,
}

impl PositionPoller {
    pub(crate) fn new(interval: Duration) -> Self {
        Self {
            interval,
            task: None,
        }
    }

    /// Cancel any running poll loop and start a fresh one.
    ///
    /// Requires a tokio runtime context; without one, polling is
    /// disabled and position freshness degrades to status pushes only.
    pub(crate) fn restart<A: CastAdapter>(
        &mut self,
        adapter: Arc<Mutex<A>>,
        events: broadcast::Sender<HostEvent>,
    ) {
        self.stop();

        let Ok(handle) = Handle::try_current() else {
            debug!("no tokio runtime, position polling disabled");
            return;
        };

        let interval = self.interval;
        self.task = Some(handle.spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick of a tokio interval completes immediately;
            // the fresh status push already carried a position.
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let position = adapter.lock().approximate_position();
                // No receivers is fine; subscribers come and go.
                let _ = events.send(HostEvent::PositionUpdated(position));
            }
        }));
    }

    /// Cancel the poll loop, if one is running
    pub(crate) fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    pub(crate) fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for PositionPoller {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::AdapterError;
    use crate::command::{QueueCommand, TransportCommand};
    use cast_model::{Device, ItemId};

    struct FixedPositionAdapter(Duration);

    impl CastAdapter for FixedPositionAdapter {
        fn start_discovery(&mut self) -> Result<(), AdapterError> {
            Ok(())
        }
        fn stop_discovery(&mut self) -> Result<(), AdapterError> {
            Ok(())
        }
        fn connect(&mut self, _device: &Device) -> Result<(), AdapterError> {
            Ok(())
        }
        fn disconnect(&mut self, _stop_receiver: bool) -> Result<(), AdapterError> {
            Ok(())
        }
        fn set_volume(&mut self, _level: f64) -> Result<(), AdapterError> {
            Ok(())
        }
        fn set_mute(&mut self, _muted: bool) -> Result<(), AdapterError> {
            Ok(())
        }
        fn fetch_queue_ids(&mut self) -> Result<(), AdapterError> {
            Ok(())
        }
        fn fetch_queue_items(&mut self, _ids: &[ItemId]) -> Result<(), AdapterError> {
            Ok(())
        }
        fn queue(&mut self, _command: QueueCommand) -> Result<(), AdapterError> {
            Ok(())
        }
        fn transport(&mut self, _command: TransportCommand) -> Result<(), AdapterError> {
            Ok(())
        }
        fn approximate_position(&self) -> Duration {
            self.0
        }
    }

    #[tokio::test]
    async fn test_poller_emits_positions() {
        let adapter = Arc::new(Mutex::new(FixedPositionAdapter(Duration::from_secs(42))));
        let (tx, mut rx) = broadcast::channel(16);

        let mut poller = PositionPoller::new(Duration::from_millis(1));
        poller.restart(adapter, tx);
        assert!(poller.is_running());

        let event = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("poller should tick")
            .unwrap();
        assert_eq!(
            event,
            HostEvent::PositionUpdated(Duration::from_secs(42))
        );
    }

    #[tokio::test]
    async fn test_stop_halts_polling() {
        let adapter = Arc::new(Mutex::new(FixedPositionAdapter(Duration::ZERO)));
        let (tx, _rx) = broadcast::channel(16);

        let mut poller = PositionPoller::new(Duration::from_millis(1));
        poller.restart(adapter, tx);
        poller.stop();
        assert!(!poller.is_running());
    }

    #[tokio::test]
    async fn test_restart_replaces_previous_task() {
        let adapter = Arc::new(Mutex::new(FixedPositionAdapter(Duration::ZERO)));
        let (tx, _rx) = broadcast::channel(16);

        let mut poller = PositionPoller::new(Duration::from_millis(1));
        poller.restart(adapter.clone(), tx.clone());
        poller.restart(adapter, tx);
        assert!(poller.is_running());
    }

    #[test]
    fn test_restart_without_runtime_is_disabled() {
        let adapter = Arc::new(Mutex::new(FixedPositionAdapter(Duration::ZERO)));
        let (tx, _rx) = broadcast::channel(16);

        let mut poller = PositionPoller::new(Duration::from_millis(1));
        poller.restart(adapter, tx);
        assert!(!poller.is_running());
    }
}
