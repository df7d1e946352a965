//! Directory lookup trait.

use async_trait::async_trait;

use ofwtrack_core::result::AppResult;
use ofwtrack_core::types::{DivisionId, UserId};
use ofwtrack_entity::actor::{Actor, ActorRole};

/// Read-only view of the user directory.
///
/// `Ok(None)` / an empty list means "nobody matches"; `Err` means the
/// lookup itself failed.
#[async_trait]
pub trait DirectoryLookup: Send + Sync + std::fmt::Debug + 'static {
    /// Find a user by id.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<Actor>>;

    /// Find the user holding `role` in a division (e.g. its division chief).
    async fn find_by_role_and_division(
        &self,
        role: ActorRole,
        division_id: DivisionId,
    ) -> AppResult<Option<Actor>>;

    /// Find every user holding `role`.
    async fn find_all_by_role(&self, role: ActorRole) -> AppResult<Vec<Actor>>;
}
