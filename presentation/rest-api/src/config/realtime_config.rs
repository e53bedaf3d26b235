use std::env;

use realtime::DEFAULT_CHANNEL_CAPACITY;

/// Environment variables:
/// - REALTIME_CHANNEL_CAPACITY: events buffered per client before it lags (default: 256)
#[derive(Debug, Clone)]
pub struct RealtimeConfig {
    pub channel_capacity: usize,
}

impl RealtimeConfig {
    pub fn from_env() -> Self {
        let channel_capacity = env::var("REALTIME_CHANNEL_CAPACITY")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .filter(|capacity| *capacity > 0)
            .unwrap_or(DEFAULT_CHANNEL_CAPACITY);

        Self { channel_capacity }
    }
}
