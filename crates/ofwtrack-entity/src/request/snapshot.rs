//! Immutable view of a request at the moment an event fires.

use serde::{Deserialize, Serialize};

use ofwtrack_core::types::{DivisionId, RequestId, UserId};

use super::status::RequestStatus;

/// Snapshot of a business request, supplied by the caller at event time.
///
/// The engine never owns or persists it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSnapshot {
    /// Request identifier.
    pub id: RequestId,
    /// Human reference number (control number), when assigned.
    #[serde(default)]
    pub reference: Option<String>,
    /// The user who owns the request.
    pub requester_id: UserId,
    /// Division the request was filed under.
    pub division_id: Option<DivisionId>,
    /// Whether the request was flagged urgent.
    #[serde(default)]
    pub is_urgent: bool,
    /// Status at event time.
    pub status: RequestStatus,
}

impl RequestSnapshot {
    /// Create a snapshot with no reference number.
    pub fn new(
        id: RequestId,
        requester_id: UserId,
        division_id: Option<DivisionId>,
        is_urgent: bool,
        status: RequestStatus,
    ) -> Self {
        Self {
            id,
            reference: None,
            requester_id,
            division_id,
            is_urgent,
            status,
        }
    }

    /// Set the human reference number.
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Reference used in rendered text.
    pub fn display_ref(&self) -> String {
        match &self.reference {
            Some(r) if !r.trim().is_empty() => r.clone(),
            _ => self.id.short(),
        }
    }
}
