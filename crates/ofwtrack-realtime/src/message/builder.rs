//! Builder helpers for constructing outbound messages.

use ofwtrack_entity::notification::Notification;

use super::types::OutboundMessage;

/// Build the push for a persisted notification.
pub fn build_notification(notification: &Notification) -> OutboundMessage {
    OutboundMessage::Notification {
        id: notification.id,
        category: notification.category,
        title: notification.title.clone(),
        message: notification.message.clone(),
        priority: notification.priority,
        action_required: notification.action_required,
        request_id: notification.request_id,
        sender_name: notification.sender_name.clone(),
        payload: notification.payload.clone(),
        timestamp: notification.created_at,
    }
}

/// Build an unread count update.
pub fn build_unread_count(count: i64) -> OutboundMessage {
    OutboundMessage::UnreadCount { count }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use ofwtrack_core::types::{NotificationId, RequestId, UserId};
    use ofwtrack_entity::notification::{
        NewNotification, NotificationCategory, NotificationPriority,
    };

    #[test]
    fn test_notification_message_shape() {
        let stored = NewNotification {
            recipient_id: UserId::new(),
            title: "Request Ready for Pickup".to_string(),
            message: "Your request OFW-0042 is ready for pickup.".to_string(),
            category: NotificationCategory::RequestReadyPickup,
            request_id: Some(RequestId::new()),
            priority: NotificationPriority::Medium,
            action_required: true,
            sender_name: Some("M. Reyes".to_string()),
            sender_email: None,
            payload: serde_json::json!({ "event": "ready_for_pickup" }),
            created_at: Utc::now(),
        }
        .into_notification(NotificationId::new());

        let msg = build_notification(&stored);
        assert_eq!(msg.type_name(), "notification");

        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "notification");
        assert_eq!(json["category"], "request_ready_pickup");
        assert_eq!(json["priority"], "medium");
        assert_eq!(json["id"], stored.id.to_string());
    }

    #[test]
    fn test_unread_count_tag() {
        let json = serde_json::to_value(build_unread_count(3)).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "unread_count", "count": 3 }));
    }
}
