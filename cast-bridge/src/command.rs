//! Host command types
//!
//! Transport and queue commands carry no reconciliation logic; they
//! are data passed through the adapter to the SDK. Their shape mirrors
//! the receiver's capability set (load, seek with relative offsets,
//! queue reorder by reference, jump, next/previous).

use serde::{Deserialize, Serialize};
use std::time::Duration;

use cast_model::{ItemId, MediaInfo, QueueItem};

/// Outcome of a media or queue command.
///
/// Media commands with no active session are a silent no-op reported
/// as [`Dispatch::NoSession`] rather than an error — transient
/// disconnects during user interaction are expected, and hosts treat
/// the null result as "nothing to do".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dispatch {
    /// The command was handed to the SDK adapter
    Forwarded,
    /// No active session; the command was dropped
    NoSession,
}

impl Dispatch {
    pub fn is_forwarded(self) -> bool {
        matches!(self, Dispatch::Forwarded)
    }
}

/// Load a single media item outside the queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaLoadRequest {
    pub media: MediaInfo,
    pub autoplay: bool,
    /// Start offset into the media
    pub position: Option<Duration>,
    pub playback_rate: Option<f64>,
    pub active_track_ids: Vec<i64>,
}

impl MediaLoadRequest {
    pub fn new(media: MediaInfo) -> Self {
        Self {
            media,
            autoplay: true,
            position: None,
            playback_rate: None,
            active_track_ids: Vec::new(),
        }
    }
}

/// Replace the receiver queue with a new item list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueLoadRequest {
    pub items: Vec<QueueItem>,
    /// Index of the item to start playback at
    pub start_index: usize,
    /// Start offset within the starting item
    pub play_position: Option<Duration>,
}

/// Seek within the current stream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeekRequest {
    pub position: Duration,
    /// Interpret `position` relative to the current position
    pub relative: bool,
}

/// Transport control commands, passed through to the SDK.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TransportCommand {
    Load(MediaLoadRequest),
    Play,
    Pause,
    Stop,
    Seek(SeekRequest),
    SetActiveTracks(Vec<i64>),
    SetPlaybackRate(f64),
}

/// Queue mutation commands, passed through to the SDK.
///
/// The resulting membership/ordering changes come back asynchronously
/// as `QueueDelta` events; the local mirror is never mutated directly
/// by a command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QueueCommand {
    Load(QueueLoadRequest),
    Insert {
        items: Vec<QueueItem>,
        /// Insert before this item; `None` appends
        before: Option<ItemId>,
    },
    InsertAndPlay {
        item: QueueItem,
        before: Option<ItemId>,
    },
    Remove(Vec<ItemId>),
    Reorder {
        ids: Vec<ItemId>,
        before: Option<ItemId>,
    },
    /// Make the given item current
    Jump(ItemId),
    Next,
    Previous,
}
