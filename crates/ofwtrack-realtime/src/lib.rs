//! # ofwtrack-realtime
//!
//! Realtime side of the OFW Track notification engine. Provides:
//!
//! - The [`RealtimeChannel`] seam and per-user channel naming
//! - Outbound message envelopes pushed to subscribers
//! - In-memory broadcast pub/sub and an optional Redis publisher
//! - Dispatch counters
//! - The [`DispatchService`] that persists and pushes workflow notifications

pub mod bridge;
pub mod channel;
pub mod message;
pub mod metrics;
pub mod notification;

pub use bridge::{MemoryPubSub, build_channel};
pub use channel::RealtimeChannel;
pub use metrics::DispatchMetrics;
pub use notification::{DispatchReport, DispatchService, PushFailure};
