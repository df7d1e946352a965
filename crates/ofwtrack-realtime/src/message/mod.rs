//! Messages pushed to realtime subscribers.

pub mod builder;
pub mod types;

pub use types::OutboundMessage;
