//! Queue item types
//!
//! Queue items are owned exclusively by the reconciler in
//! `cast-queue`; hosts only ever see read-only ordered snapshots.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ids::ItemId;

/// Media reference carried by a queue item.
///
/// Pass-through content: the bridge never inspects codec or track
/// details, it only moves them between host and SDK.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaInfo {
    /// Content locator understood by the receiver (usually a URL)
    pub content_id: String,
    /// MIME type of the content
    pub content_type: String,
    /// Opaque metadata block forwarded verbatim
    pub metadata: Option<serde_json::Value>,
}

impl MediaInfo {
    pub fn new(content_id: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            content_id: content_id.into(),
            content_type: content_type.into(),
            metadata: None,
        }
    }
}

/// One playable unit in the receiver's ordered queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueItem {
    /// Receiver-assigned id, unique for the session lifetime
    pub item_id: ItemId,
    pub media: MediaInfo,
    /// Start playback automatically when the item becomes current
    pub autoplay: bool,
    /// Offset into the media at which playback starts
    pub start_time: Option<Duration>,
    /// How far ahead of the item's turn the receiver may preload it
    pub preload_time: Option<Duration>,
    /// Playback duration cap, when shorter than the media itself
    pub playback_duration: Option<Duration>,
    /// Opaque per-item payload forwarded verbatim
    pub custom_data: Option<serde_json::Value>,
}

impl QueueItem {
    /// A minimal item with the given id and media, autoplay on.
    pub fn new(item_id: ItemId, media: MediaInfo) -> Self {
        Self {
            item_id,
            media,
            autoplay: true,
            start_time: None,
            preload_time: None,
            playback_duration: None,
            custom_data: None,
        }
    }
}
