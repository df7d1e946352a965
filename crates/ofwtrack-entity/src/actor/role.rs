//! Actor role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use ofwtrack_core::AppError;

/// Roles that take part in the request approval workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "actor_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    /// Files requests on their own behalf.
    Requester,
    /// Files requests on behalf of a division; escalates to the division chief.
    FocalPerson,
    /// First-tier evaluator for a division.
    DivisionChief,
    /// Final approver.
    Admin,
}

impl ActorRole {
    /// Return the role as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Requester => "requester",
            Self::FocalPerson => "focal_person",
            Self::DivisionChief => "division_chief",
            Self::Admin => "admin",
        }
    }

    /// Human label used in notification titles, for roles that have one.
    pub fn title_label(&self) -> Option<&'static str> {
        match self {
            Self::DivisionChief => Some("Division Chief"),
            Self::Admin => Some("Admin"),
            Self::Requester | Self::FocalPerson => None,
        }
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ActorRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "requester" => Ok(Self::Requester),
            "focal_person" => Ok(Self::FocalPerson),
            "division_chief" => Ok(Self::DivisionChief),
            "admin" => Ok(Self::Admin),
            _ => Err(AppError::validation(format!(
                "Invalid actor role: '{s}'. Expected one of: requester, focal_person, division_chief, admin"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(
            "DIVISION_CHIEF".parse::<ActorRole>().unwrap(),
            ActorRole::DivisionChief
        );
        assert_eq!("admin".parse::<ActorRole>().unwrap(), ActorRole::Admin);
        assert!("manager".parse::<ActorRole>().is_err());
    }

    #[test]
    fn test_title_label() {
        assert_eq!(ActorRole::Admin.title_label(), Some("Admin"));
        assert_eq!(ActorRole::DivisionChief.title_label(), Some("Division Chief"));
        assert_eq!(ActorRole::FocalPerson.title_label(), None);
    }
}
