//! In-memory pub/sub for single-node deployments.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::sync::broadcast;

use ofwtrack_core::result::AppResult;

use crate::channel::RealtimeChannel;
use crate::message::types::OutboundMessage;

/// In-memory pub/sub implementation.
#[derive(Debug)]
pub struct MemoryPubSub {
    /// Channel name → broadcast sender
    channels: RwLock<HashMap<String, broadcast::Sender<OutboundMessage>>>,
    /// Buffer size for channels
    buffer_size: usize,
}

impl MemoryPubSub {
    /// Create a new in-memory pub/sub
    pub fn new(buffer_size: usize) -> Self {
        Self {
            channels: RwLock::new(HashMap::new()),
            buffer_size: buffer_size.max(1),
        }
    }

    /// Subscribe to a channel, returns a receiver
    pub async fn subscribe(&self, channel: &str) -> broadcast::Receiver<OutboundMessage> {
        let mut channels = self.channels.write().await;
        let tx = channels
            .entry(channel.to_string())
            .or_insert_with(|| broadcast::channel(self.buffer_size).0);
        tx.subscribe()
    }

    /// Drop channels nobody listens to any more.
    pub async fn prune(&self) -> usize {
        let mut channels = self.channels.write().await;
        let before = channels.len();
        channels.retain(|_, tx| tx.receiver_count() > 0);
        before - channels.len()
    }
}

#[async_trait]
impl RealtimeChannel for MemoryPubSub {
    /// Returns `false` when the channel has no live subscriber.
    async fn publish(&self, channel: &str, message: &OutboundMessage) -> AppResult<bool> {
        let channels = self.channels.read().await;
        Ok(match channels.get(channel) {
            Some(tx) => tx.send(message.clone()).is_ok(),
            None => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_reaches_subscriber() {
        let pubsub = MemoryPubSub::new(8);
        let mut rx = pubsub.subscribe("user:a").await;

        let msg = OutboundMessage::UnreadCount { count: 2 };
        assert!(pubsub.publish("user:a", &msg).await.unwrap());
        assert_eq!(rx.recv().await.unwrap(), msg);
    }

    #[tokio::test]
    async fn test_publish_without_subscriber() {
        let pubsub = MemoryPubSub::new(8);
        let msg = OutboundMessage::UnreadCount { count: 0 };
        assert!(!pubsub.publish("user:nobody", &msg).await.unwrap());

        let rx = pubsub.subscribe("user:gone").await;
        drop(rx);
        assert!(!pubsub.publish("user:gone", &msg).await.unwrap());
        assert_eq!(pubsub.prune().await, 1);
    }
}
