//! Actor snapshot model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use ofwtrack_core::types::{DivisionId, UserId};

use super::role::ActorRole;

/// A user reference acting as requester, approver, or rejector.
///
/// Owned by the directory; the engine only reads snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Actor {
    /// User identifier.
    pub id: UserId,
    /// Human-readable name.
    pub display_name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Workflow role.
    pub role: ActorRole,
    /// Division the user belongs to, if any.
    pub division_id: Option<DivisionId>,
}

impl Actor {
    /// Create an actor snapshot.
    pub fn new(
        id: UserId,
        display_name: impl Into<String>,
        role: ActorRole,
        division_id: Option<DivisionId>,
    ) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            email: None,
            role,
            division_id,
        }
    }

    /// Set the contact email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Whether this actor holds the given role.
    pub fn has_role(&self, role: ActorRole) -> bool {
        self.role == role
    }
}
