//! Workflow events that trigger notifications.

use serde::{Deserialize, Serialize};

use ofwtrack_entity::request::{ApprovalType, RequestStatus};

/// A transition in a request's approval lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WorkflowEvent {
    /// The request was submitted.
    Created,
    /// The request was approved at some stage.
    Approved {
        /// Which stage approved it.
        approval_type: ApprovalType,
    },
    /// The request was rejected.
    Rejected {
        /// Free-text reason given by the rejector.
        reason: Option<String>,
        /// Caller-defined rejection classification.
        rejection_type: Option<String>,
    },
    /// The request can be collected.
    ReadyForPickup,
    /// The request was closed out.
    Completed,
    /// Any other status transition.
    StatusChanged {
        /// Status before the change.
        old_status: RequestStatus,
        /// Status after the change.
        new_status: RequestStatus,
    },
}

/// Payload-free discriminant of [`WorkflowEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Created,
    Approved,
    Rejected,
    ReadyForPickup,
    Completed,
    StatusChanged,
}

impl WorkflowEvent {
    /// The event's discriminant.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Created => EventKind::Created,
            Self::Approved { .. } => EventKind::Approved,
            Self::Rejected { .. } => EventKind::Rejected,
            Self::ReadyForPickup => EventKind::ReadyForPickup,
            Self::Completed => EventKind::Completed,
            Self::StatusChanged { .. } => EventKind::StatusChanged,
        }
    }
}

impl EventKind {
    /// Return the kind as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::ReadyForPickup => "ready_for_pickup",
            Self::Completed => "completed",
            Self::StatusChanged => "status_changed",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
