//! Walkthrough of the full bridge lifecycle against a simulated SDK:
//! discovery, session start, queue reconciliation, status pushes, and
//! teardown. No real receiver is contacted.
//!
//! Run with: cargo run --example simulated_receiver

use std::time::Duration;

use cast_bridge::{
    AdapterError, BridgeConfig, CastAdapter, CastBridge, LoggingMode, QueueCommand,
    TransportCommand,
};
use cast_model::{
    AdapterEvent, Device, DeviceId, DeviceSighting, HostEvent, IdleReason, ItemId, MediaInfo,
    MediaStatus, PlayerState, QueueDelta, QueueItem, RouteId, SessionId, SessionLifecycleEvent,
};

/// Adapter standing in for a vendor SDK; prints what a real
/// implementation would put on the wire.
struct SimulatedAdapter {
    position: Duration,
}

impl CastAdapter for SimulatedAdapter {
    fn start_discovery(&mut self) -> Result<(), AdapterError> {
        println!("  [sdk] discovery started");
        Ok(())
    }
    fn stop_discovery(&mut self) -> Result<(), AdapterError> {
        println!("  [sdk] discovery stopped");
        Ok(())
    }
    fn connect(&mut self, device: &Device) -> Result<(), AdapterError> {
        println!("  [sdk] connecting to {}", device.name);
        Ok(())
    }
    fn disconnect(&mut self, stop_receiver: bool) -> Result<(), AdapterError> {
        println!("  [sdk] disconnect (stop_receiver: {stop_receiver})");
        Ok(())
    }
    fn set_volume(&mut self, level: f64) -> Result<(), AdapterError> {
        println!("  [sdk] set volume {level}");
        Ok(())
    }
    fn set_mute(&mut self, muted: bool) -> Result<(), AdapterError> {
        println!("  [sdk] set mute {muted}");
        Ok(())
    }
    fn fetch_queue_ids(&mut self) -> Result<(), AdapterError> {
        println!("  [sdk] fetching queue id list");
        Ok(())
    }
    fn fetch_queue_items(&mut self, ids: &[ItemId]) -> Result<(), AdapterError> {
        println!("  [sdk] fetching content for {ids:?}");
        Ok(())
    }
    fn queue(&mut self, command: QueueCommand) -> Result<(), AdapterError> {
        println!("  [sdk] queue command {command:?}");
        Ok(())
    }
    fn transport(&mut self, command: TransportCommand) -> Result<(), AdapterError> {
        println!("  [sdk] transport command {command:?}");
        Ok(())
    }
    fn approximate_position(&self) -> Duration {
        self.position
    }
}

fn sighting(route: &str, name: &str) -> AdapterEvent {
    AdapterEvent::DeviceSighted(DeviceSighting {
        route_id: RouteId::new(route),
        device_id: Some(DeviceId::new("receiver-1")),
        name: name.to_string(),
        model_name: "SimCast 4K".to_string(),
        firmware_version: Some("1.42".to_string()),
        is_on_local_network: true,
    })
}

fn track(id: u32, title: &str) -> QueueItem {
    QueueItem::new(
        ItemId::new(id),
        MediaInfo::new(format!("http://media.local/{title}.mp3"), "audio/mp3"),
    )
}

fn drain(rx: &mut tokio::sync::broadcast::Receiver<HostEvent>) {
    while let Ok(event) = rx.try_recv() {
        match event {
            HostEvent::DevicesChanged(devices) => {
                println!("  [host] devices: {:?}", devices.iter().map(|d| &d.name).collect::<Vec<_>>());
            }
            HostEvent::SessionChanged(session) => match session {
                Some(s) => println!("  [host] session: {} on {}", s.state, s.device.name),
                None => println!("  [host] session: none"),
            },
            HostEvent::MediaStatusChanged(status) => {
                println!("  [host] media: {:?} at {:?}", status.player_state, status.stream_position);
            }
            HostEvent::QueueChanged(items) => {
                println!("  [host] queue: {:?}", items.iter().map(|i| i.item_id).collect::<Vec<_>>());
            }
            HostEvent::PositionUpdated(position) => {
                println!("  [host] position: {position:?}");
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    cast_bridge::logging::init_logging(LoggingMode::Development)?;

    let adapter = SimulatedAdapter {
        position: Duration::from_secs(12),
    };
    let config = BridgeConfig {
        position_poll_interval: Duration::from_millis(400),
        ..BridgeConfig::default()
    };
    let mut bridge = CastBridge::new(adapter, config);
    let mut events = bridge.subscribe();

    println!("1. Discovery");
    bridge.start_discovery()?;
    bridge.handle_event(sighting("route-a", "Living Room TV"));
    // Second route for the same receiver folds into one device.
    bridge.handle_event(sighting("route-b", "Living Room TV"));
    drain(&mut events);

    println!("\n2. Session start");
    bridge.start_session(&DeviceId::new("receiver-1"))?;
    bridge.handle_event(AdapterEvent::SessionTransitioned(
        SessionLifecycleEvent::Started {
            session_id: SessionId::new("session-1"),
        },
    ));
    drain(&mut events);

    println!("\n3. Queue load and reconciliation");
    bridge.queue(QueueCommand::Insert {
        items: vec![track(1, "intro"), track(2, "main-theme")],
        before: None,
    })?;
    // The receiver answers with an id-level delta, then content.
    bridge.handle_event(AdapterEvent::QueueDelta(QueueDelta::Inserted {
        ids: vec![ItemId::new(1), ItemId::new(2)],
        before: None,
    }));
    bridge.handle_event(AdapterEvent::QueueDelta(QueueDelta::Fetched(vec![
        track(1, "intro"),
        track(2, "main-theme"),
    ])));
    drain(&mut events);

    println!("\n4. Playback status and position polling");
    bridge.handle_event(AdapterEvent::StatusPushed(MediaStatus {
        player_state: PlayerState::Playing,
        current_item_id: Some(ItemId::new(1)),
        stream_position: Duration::from_secs(12),
        ..MediaStatus::default()
    }));
    tokio::time::sleep(Duration::from_millis(1100)).await;
    drain(&mut events);

    println!("\n5. Playback runs out");
    bridge.handle_event(AdapterEvent::StatusPushed(MediaStatus {
        player_state: PlayerState::Idle,
        idle_reason: IdleReason::Finished,
        ..MediaStatus::default()
    }));
    drain(&mut events);

    println!("\n6. Session end");
    bridge.end_session(false)?;
    bridge.handle_event(AdapterEvent::SessionTransitioned(
        SessionLifecycleEvent::Ended,
    ));
    drain(&mut events);

    bridge.teardown();
    println!("\nDone");
    Ok(())
}
