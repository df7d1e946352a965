//! Approval stage enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use ofwtrack_core::AppError;

/// Which approval stage an `approved` event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalType {
    /// First-tier evaluation, normally by the division chief.
    Evaluator,
    /// Final approval by an admin.
    Admin,
}

impl ApprovalType {
    /// Return the stage as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Evaluator => "evaluator",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for ApprovalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ApprovalType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "evaluator" => Ok(Self::Evaluator),
            "admin" => Ok(Self::Admin),
            _ => Err(AppError::validation(format!(
                "Invalid approval type: '{s}'. Expected one of: evaluator, admin"
            ))),
        }
    }
}
