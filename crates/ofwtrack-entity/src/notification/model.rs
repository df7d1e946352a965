//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use ofwtrack_core::types::{NotificationId, RequestId, UserId};

use super::category::NotificationCategory;
use super::priority::NotificationPriority;

/// A persisted notification.
///
/// Immutable once stored except for the `is_read`/`read_at` pair, which
/// only ever moves from unread to read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Store-assigned identifier.
    pub id: NotificationId,
    /// The recipient user.
    pub recipient_id: UserId,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Notification category.
    pub category: NotificationCategory,
    /// The request this notification is about.
    pub request_id: Option<RequestId>,
    /// Priority level.
    pub priority: NotificationPriority,
    /// Whether the recipient must act on the request.
    pub action_required: bool,
    /// Display name of the user who triggered the event.
    pub sender_name: Option<String>,
    /// Email of the user who triggered the event.
    pub sender_email: Option<String>,
    /// Event-specific context (JSON object).
    pub payload: serde_json::Value,
    /// Whether the recipient has read this notification.
    pub is_read: bool,
    /// When the notification was read.
    pub read_at: Option<DateTime<Utc>>,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Check if the notification is still unread.
    pub fn is_unread(&self) -> bool {
        !self.is_read
    }

    /// Look up a payload field.
    pub fn payload_field(&self, key: &str) -> Option<&serde_json::Value> {
        self.payload.get(key)
    }
}

/// A notification built but not yet persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewNotification {
    /// The recipient user.
    pub recipient_id: UserId,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Notification category.
    pub category: NotificationCategory,
    /// The request this notification is about.
    pub request_id: Option<RequestId>,
    /// Priority level.
    pub priority: NotificationPriority,
    /// Whether the recipient must act on the request.
    pub action_required: bool,
    /// Display name of the user who triggered the event.
    pub sender_name: Option<String>,
    /// Email of the user who triggered the event.
    pub sender_email: Option<String>,
    /// Event-specific context (JSON object).
    pub payload: serde_json::Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl NewNotification {
    /// Attach the store-assigned id, producing the persisted form.
    pub fn into_notification(self, id: NotificationId) -> Notification {
        Notification {
            id,
            recipient_id: self.recipient_id,
            title: self.title,
            message: self.message,
            category: self.category,
            request_id: self.request_id,
            priority: self.priority,
            action_required: self.action_required,
            sender_name: self.sender_name,
            sender_email: self.sender_email,
            payload: self.payload,
            is_read: false,
            read_at: None,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_notification_starts_unread() {
        let new = NewNotification {
            recipient_id: UserId::new(),
            title: "Request Completed".to_string(),
            message: "Your request #0a1b2c3d has been completed.".to_string(),
            category: NotificationCategory::RequestCompleted,
            request_id: Some(RequestId::new()),
            priority: NotificationPriority::Low,
            action_required: false,
            sender_name: Some("M. Reyes".to_string()),
            sender_email: None,
            payload: serde_json::json!({ "event": "completed" }),
            created_at: Utc::now(),
        };
        let id = NotificationId::new();
        let stored = new.clone().into_notification(id);

        assert_eq!(stored.id, id);
        assert!(stored.is_unread());
        assert!(stored.read_at.is_none());
        assert_eq!(stored.created_at, new.created_at);
        assert_eq!(
            stored.payload_field("event"),
            Some(&serde_json::json!("completed"))
        );
    }

    #[test]
    fn test_category_serializes_snake_case() {
        let json = serde_json::to_string(&NotificationCategory::RequestReadyPickup).unwrap();
        assert_eq!(json, "\"request_ready_pickup\"");
        let json = serde_json::to_string(&NotificationPriority::Urgent).unwrap();
        assert_eq!(json, "\"urgent\"");
    }
}
