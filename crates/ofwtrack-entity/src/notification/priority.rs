//! Notification priority levels.

use serde::{Deserialize, Serialize};

/// Notification priority levels.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "notification_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NotificationPriority {
    /// Informational.
    Low,
    /// Needs attention in the normal course of work.
    Medium,
    /// Needs immediate attention.
    Urgent,
}

impl NotificationPriority {
    /// `Urgent` for urgent requests, `Medium` otherwise.
    pub fn for_urgency(is_urgent: bool) -> Self {
        if is_urgent { Self::Urgent } else { Self::Medium }
    }

    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::Urgent => "urgent",
        }
    }
}

impl std::fmt::Display for NotificationPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
