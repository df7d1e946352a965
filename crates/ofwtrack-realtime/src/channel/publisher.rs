//! Publish seam between the dispatcher and the pub/sub backend.

use async_trait::async_trait;

use ofwtrack_core::result::AppResult;

use crate::message::types::OutboundMessage;

/// Best-effort push of a message to a named channel.
///
/// `Ok(true)` means the backend accepted the message; `Ok(false)` means it
/// had nowhere to send it. Neither outcome says anything about whether a
/// client actually received it.
#[async_trait]
pub trait RealtimeChannel: Send + Sync + std::fmt::Debug + 'static {
    /// Publish `message` on `channel`.
    async fn publish(&self, channel: &str, message: &OutboundMessage) -> AppResult<bool>;
}
