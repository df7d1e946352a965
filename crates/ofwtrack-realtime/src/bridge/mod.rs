//! Pub/sub backends behind [`RealtimeChannel`].

pub mod memory_pubsub;
#[cfg(feature = "redis-pubsub")]
pub mod redis_pubsub;

use std::sync::Arc;

use ofwtrack_core::config::{RealtimeBackend, RealtimeConfig};
use ofwtrack_core::error::AppError;
use ofwtrack_core::result::AppResult;

use crate::channel::RealtimeChannel;

pub use memory_pubsub::MemoryPubSub;
#[cfg(feature = "redis-pubsub")]
pub use redis_pubsub::RedisPubSubBridge;

/// Build the configured realtime backend.
pub fn build_channel(config: &RealtimeConfig) -> AppResult<Arc<dyn RealtimeChannel>> {
    match config.backend {
        RealtimeBackend::Memory => Ok(Arc::new(MemoryPubSub::new(config.channel_buffer_size))),
        RealtimeBackend::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .ok_or_else(|| AppError::configuration("realtime.redis_url is required"))?;
            redis_channel(url)
        }
    }
}

#[cfg(feature = "redis-pubsub")]
fn redis_channel(url: &str) -> AppResult<Arc<dyn RealtimeChannel>> {
    Ok(Arc::new(RedisPubSubBridge::new(url)?))
}

#[cfg(not(feature = "redis-pubsub"))]
fn redis_channel(_url: &str) -> AppResult<Arc<dyn RealtimeChannel>> {
    Err(AppError::configuration(
        "realtime.backend = \"redis\" requires the redis-pubsub feature",
    ))
}
