//! Request status values and their notification phrases.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a business request.
///
/// Unknown statuses are kept verbatim in [`RequestStatus::Other`] so a new
/// status added upstream never breaks event dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RequestStatus {
    /// Submitted, waiting for the first reviewer.
    Pending,
    /// Being evaluated.
    UnderReview,
    /// Approved (at any stage).
    Approved,
    /// Rejected.
    Rejected,
    /// Ready to be collected by the requester.
    ReadyForPickup,
    /// Closed out.
    Completed,
    /// Withdrawn or cancelled.
    Cancelled,
    /// A status this engine has no phrase for.
    Other(String),
}

impl RequestStatus {
    /// Return the status as a snake_case string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::UnderReview => "under_review",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::ReadyForPickup => "ready_for_pickup",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Other(s) => s,
        }
    }

    /// Phrase completing "Your request ... {phrase}." for a status change.
    pub fn phrase(&self) -> &'static str {
        match self {
            Self::Pending => "is pending review",
            Self::UnderReview => "is now under review",
            Self::Approved => "has been approved",
            Self::Rejected => "has been rejected",
            Self::ReadyForPickup => "is ready for pickup",
            Self::Completed => "has been completed",
            Self::Cancelled => "has been cancelled",
            Self::Other(_) => "has been updated",
        }
    }
}

impl From<&str> for RequestStatus {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "pending" => Self::Pending,
            "under_review" => Self::UnderReview,
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            "ready_for_pickup" => Self::ReadyForPickup,
            "completed" => Self::Completed,
            "cancelled" | "canceled" => Self::Cancelled,
            _ => Self::Other(s.to_string()),
        }
    }
}

impl From<String> for RequestStatus {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<RequestStatus> for String {
    fn from(status: RequestStatus) -> String {
        status.as_str().to_string()
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_status_phrase() {
        assert_eq!(
            RequestStatus::from("ready_for_pickup").phrase(),
            "is ready for pickup"
        );
        assert_eq!(RequestStatus::from("Canceled"), RequestStatus::Cancelled);
    }

    #[test]
    fn test_unknown_status_kept_verbatim() {
        let status = RequestStatus::from("on_hold");
        assert_eq!(status, RequestStatus::Other("on_hold".to_string()));
        assert_eq!(status.as_str(), "on_hold");
        assert_eq!(status.phrase(), "has been updated");
    }

    #[test]
    fn test_serde_as_plain_string() {
        let json = serde_json::to_string(&RequestStatus::UnderReview).unwrap();
        assert_eq!(json, "\"under_review\"");
        let parsed: RequestStatus = serde_json::from_str("\"archived\"").unwrap();
        assert_eq!(parsed, RequestStatus::Other("archived".to_string()));
    }
}
