//! Redis pub/sub publisher for multi-node deployments.

use async_trait::async_trait;
use redis::AsyncCommands;
use tokio::sync::OnceCell;
use tracing::info;

use ofwtrack_core::error::{AppError, ErrorKind};
use ofwtrack_core::result::AppResult;

use crate::channel::RealtimeChannel;
use crate::message::types::OutboundMessage;

/// Publishes realtime messages with Redis `PUBLISH`.
pub struct RedisPubSubBridge {
    /// Redis client.
    client: redis::Client,
    /// Lazily established connection manager.
    conn: OnceCell<redis::aio::ConnectionManager>,
}

impl std::fmt::Debug for RedisPubSubBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisPubSubBridge")
            .field("connected", &self.conn.initialized())
            .finish()
    }
}

impl RedisPubSubBridge {
    /// Creates a new Redis publisher. No connection is made until the
    /// first publish.
    pub fn new(url: &str) -> AppResult<Self> {
        let client = redis::Client::open(url).map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, "Invalid Redis URL", e)
        })?;
        Ok(Self {
            client,
            conn: OnceCell::new(),
        })
    }

    async fn connection(&self) -> AppResult<redis::aio::ConnectionManager> {
        let conn = self
            .conn
            .get_or_try_init(|| async {
                let conn = self.client.get_connection_manager().await.map_err(|e| {
                    AppError::with_source(ErrorKind::Realtime, "Redis connection failed", e)
                })?;
                info!("Connected realtime publisher to Redis");
                Ok::<_, AppError>(conn)
            })
            .await?;
        Ok(conn.clone())
    }
}

#[async_trait]
impl RealtimeChannel for RedisPubSubBridge {
    /// Returns `false` when no node is subscribed to the channel.
    async fn publish(&self, channel: &str, message: &OutboundMessage) -> AppResult<bool> {
        let body = serde_json::to_string(message)?;
        let mut conn = self.connection().await?;
        let receivers: i64 = conn
            .publish(channel, body)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Realtime, "Redis PUBLISH failed", e))?;
        Ok(receivers > 0)
    }
}
