//! Media transport status
//!
//! `MediaStatus` is transient: each push from the receiver replaces
//! the previous snapshot wholesale, and the derived stream position is
//! kept fresh by the facade's polling timer between pushes.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ids::ItemId;

/// Player transport state reported by the receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    Unknown,
    Idle,
    Loading,
    Buffering,
    Playing,
    Paused,
}

/// Why the player is idle, when it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdleReason {
    None,
    /// Playback ran to the end of the queue
    Finished,
    Cancelled,
    Interrupted,
    Error,
}

/// Queue repeat behavior reported by the receiver.
///
/// Pass-through: the bridge forwards it without acting on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueueRepeatMode {
    Off,
    /// Repeat the whole queue
    All,
    /// Repeat the current item
    Single,
    /// Repeat the whole queue, reshuffling on wraparound
    AllAndShuffle,
}

/// Point-in-time snapshot of the receiver's transport state.
///
/// Not persisted; recomputed from the latest status push.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaStatus {
    /// Queue item currently playing, if any
    pub current_item_id: Option<ItemId>,
    /// Queue item being loaded, if any
    pub loading_item_id: Option<ItemId>,
    /// Queue item preloaded for gapless transition, if any
    pub preloaded_item_id: Option<ItemId>,
    pub player_state: PlayerState,
    pub idle_reason: IdleReason,
    /// Track ids active on the receiver (audio/subtitle selection)
    pub active_track_ids: Vec<i64>,
    /// 1.0 is normal speed
    pub playback_rate: f64,
    /// Position within the current stream at snapshot time
    pub stream_position: Duration,
    /// Number of items the receiver reports in its queue
    pub queue_item_count: usize,
    pub queue_repeat_mode: QueueRepeatMode,
    pub muted: bool,
    /// Receiver stream volume in `0.0..=1.0`
    pub stream_volume: f64,
}

impl MediaStatus {
    /// Whether this status marks the natural end of playback.
    ///
    /// The facade clears the queue mirror when it sees this, matching
    /// receiver behavior of discarding the media session.
    pub fn is_finished(&self) -> bool {
        self.player_state == PlayerState::Idle && self.idle_reason == IdleReason::Finished
    }
}

impl Default for MediaStatus {
    fn default() -> Self {
        Self {
            current_item_id: None,
            loading_item_id: None,
            preloaded_item_id: None,
            player_state: PlayerState::Unknown,
            idle_reason: IdleReason::None,
            active_track_ids: Vec::new(),
            playback_rate: 1.0,
            stream_position: Duration::ZERO,
            queue_item_count: 0,
            queue_repeat_mode: QueueRepeatMode::Off,
            muted: false,
            stream_volume: 1.0,
        }
    }
}
