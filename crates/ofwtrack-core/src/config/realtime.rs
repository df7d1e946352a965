//! Realtime delivery configuration.

use serde::{Deserialize, Serialize};

/// Which pub/sub backend carries realtime pushes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RealtimeBackend {
    /// In-process broadcast channels (single node).
    Memory,
    /// Redis `PUBLISH` (multi-node).
    Redis,
}

/// Realtime push settings for the notification dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Pub/sub backend.
    #[serde(default = "default_backend")]
    pub backend: RealtimeBackend,
    /// Redis URL, required when `backend = "redis"`.
    #[serde(default)]
    pub redis_url: Option<String>,
    /// Buffer size of each in-memory broadcast channel.
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer_size: usize,
    /// Upper bound for a single realtime push in milliseconds.
    #[serde(default = "default_push_timeout")]
    pub push_timeout_ms: u64,
    /// Persist and push non-requester fan-out entries concurrently.
    #[serde(default = "default_true")]
    pub parallel_fanout: bool,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            redis_url: None,
            channel_buffer_size: default_channel_buffer(),
            push_timeout_ms: default_push_timeout(),
            parallel_fanout: true,
        }
    }
}

fn default_backend() -> RealtimeBackend {
    RealtimeBackend::Memory
}

fn default_channel_buffer() -> usize {
    256
}

fn default_push_timeout() -> u64 {
    2000
}

fn default_true() -> bool {
    true
}
