//! Bridge configuration

use std::time::Duration;

/// Configuration for a [`crate::CastBridge`].
///
/// ```rust
/// use cast_bridge::BridgeConfig;
///
/// let config = BridgeConfig {
///     stop_receiver_on_teardown: true,
///     ..BridgeConfig::default()
/// };
/// assert!(config.stop_receiver_on_teardown);
/// ```
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Whether [`crate::CastBridge::teardown`] ends a live session
    /// with `stop_receiver = true`. Defaults to `false`: casting
    /// outlives the controlling application unless the host opts in
    /// to stopping it.
    pub stop_receiver_on_teardown: bool,

    /// Cadence of the stream-position poller while a session has
    /// media playing
    pub position_poll_interval: Duration,

    /// Capacity of the host event broadcast channel; slow subscribers
    /// past this lag lose the oldest events
    pub event_capacity: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            stop_receiver_on_teardown: false,
            position_poll_interval: Duration::from_secs(1),
            event_capacity: 256,
        }
    }
}
