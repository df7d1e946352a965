//! Notification category enumeration.

use serde::{Deserialize, Serialize};

/// Category of a notification, used for filtering and icon selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationCategory {
    /// A request was submitted.
    RequestCreated,
    /// An urgent request needs attention.
    UrgentRequest,
    /// A request was approved.
    RequestApproved,
    /// A request awaits final review.
    RequestUnderReview,
    /// A request was rejected.
    RequestRejected,
    /// A request is ready for pickup.
    RequestReadyPickup,
    /// A request was completed.
    RequestCompleted,
    /// Anything else, including generic status changes.
    General,
}

impl NotificationCategory {
    /// Return the category as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RequestCreated => "request_created",
            Self::UrgentRequest => "urgent_request",
            Self::RequestApproved => "request_approved",
            Self::RequestUnderReview => "request_under_review",
            Self::RequestRejected => "request_rejected",
            Self::RequestReadyPickup => "request_ready_pickup",
            Self::RequestCompleted => "request_completed",
            Self::General => "general",
        }
    }
}

impl std::fmt::Display for NotificationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
