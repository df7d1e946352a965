//! Outbound message type definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ofwtrack_core::types::{NotificationId, RequestId};
use ofwtrack_entity::notification::{NotificationCategory, NotificationPriority};

/// Messages pushed to a subscriber's channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// A freshly persisted notification.
    Notification {
        /// Persisted notification id.
        id: NotificationId,
        /// Notification category.
        category: NotificationCategory,
        /// Notification title.
        title: String,
        /// Notification body.
        message: String,
        /// Priority level.
        priority: NotificationPriority,
        /// Whether the recipient must act.
        action_required: bool,
        /// The request it concerns.
        request_id: Option<RequestId>,
        /// Who triggered it.
        sender_name: Option<String>,
        /// Event-specific context.
        payload: serde_json::Value,
        /// Creation time.
        timestamp: DateTime<Utc>,
    },
    /// Current unread notification count.
    UnreadCount {
        /// Number of unread notifications.
        count: i64,
    },
}

impl OutboundMessage {
    /// The `type` tag this message serializes with.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Notification { .. } => "notification",
            Self::UnreadCount { .. } => "unread_count",
        }
    }
}
