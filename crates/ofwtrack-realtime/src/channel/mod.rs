//! Realtime channel naming and the publish seam.

pub mod publisher;
pub mod types;

pub use publisher::RealtimeChannel;
pub use types::ChannelType;
