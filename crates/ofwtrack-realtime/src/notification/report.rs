//! Outcome of dispatching one workflow event.

use serde::Serialize;

use ofwtrack_core::types::{NotificationId, UserId};
use ofwtrack_entity::notification::{Notification, NotificationCategory};

/// Why a realtime push did not go through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum PushFailureReason {
    /// The channel returned an error.
    Error(String),
    /// The channel accepted the call but had nowhere to deliver it.
    NotDelivered,
    /// The push exceeded the configured deadline.
    TimedOut,
}

impl std::fmt::Display for PushFailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error(e) => write!(f, "error: {e}"),
            Self::NotDelivered => f.write_str("not delivered"),
            Self::TimedOut => f.write_str("timed out"),
        }
    }
}

/// A persisted notification whose push failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushFailure {
    /// The persisted notification.
    pub notification_id: NotificationId,
    /// Its recipient.
    pub recipient_id: UserId,
    /// Its category.
    pub category: NotificationCategory,
    /// What went wrong.
    pub reason: PushFailureReason,
}

/// Everything one dispatch produced.
#[derive(Debug, Clone)]
pub struct DispatchReport {
    /// The record addressed to the request's owner.
    pub primary: Notification,
    /// Every persisted record, primary first.
    pub records: Vec<Notification>,
    /// Pushes that did not go through. The records are still persisted.
    pub push_failures: Vec<PushFailure>,
    /// Whether resolution failed and only the fallback record was written.
    pub degraded: bool,
}

impl DispatchReport {
    /// Records addressed to someone other than the requester.
    pub fn fan_out(&self) -> &[Notification] {
        self.records.get(1..).unwrap_or_default()
    }
}
