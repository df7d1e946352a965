//! In-memory user directory.

use async_trait::async_trait;
use dashmap::DashMap;

use ofwtrack_core::result::AppResult;
use ofwtrack_core::types::{DivisionId, UserId};
use ofwtrack_entity::actor::{Actor, ActorRole};

use crate::traits::DirectoryLookup;

/// Directory backed by a concurrent map of actor snapshots.
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    actors: DashMap<UserId, Actor>,
}

impl MemoryDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory pre-populated with actors.
    pub fn with_actors(actors: impl IntoIterator<Item = Actor>) -> Self {
        let directory = Self::new();
        for actor in actors {
            directory.upsert(actor);
        }
        directory
    }

    /// Insert or replace an actor.
    pub fn upsert(&self, actor: Actor) {
        self.actors.insert(actor.id, actor);
    }

    /// Remove an actor.
    pub fn remove(&self, id: UserId) -> Option<Actor> {
        self.actors.remove(&id).map(|(_, actor)| actor)
    }

    fn matching(&self, pred: impl Fn(&Actor) -> bool) -> Vec<Actor> {
        let mut found: Vec<Actor> = self
            .actors
            .iter()
            .filter(|entry| pred(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        // DashMap iteration order is arbitrary; keep results stable.
        found.sort_by(|a, b| {
            a.display_name
                .cmp(&b.display_name)
                .then_with(|| a.id.cmp(&b.id))
        });
        found
    }
}

#[async_trait]
impl DirectoryLookup for MemoryDirectory {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<Actor>> {
        Ok(self.actors.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_by_role_and_division(
        &self,
        role: ActorRole,
        division_id: DivisionId,
    ) -> AppResult<Option<Actor>> {
        Ok(self
            .matching(|a| a.role == role && a.division_id == Some(division_id))
            .into_iter()
            .next())
    }

    async fn find_all_by_role(&self, role: ActorRole) -> AppResult<Vec<Actor>> {
        Ok(self.matching(|a| a.role == role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lookups() {
        let d1 = DivisionId::new();
        let d2 = DivisionId::new();
        let chief = Actor::new(UserId::new(), "C. Santos", ActorRole::DivisionChief, Some(d1));
        let admin_b = Actor::new(UserId::new(), "B. Admin", ActorRole::Admin, None);
        let admin_a = Actor::new(UserId::new(), "A. Admin", ActorRole::Admin, None);
        let directory =
            MemoryDirectory::with_actors([chief.clone(), admin_b.clone(), admin_a.clone()]);

        assert_eq!(directory.find_by_id(chief.id).await.unwrap(), Some(chief.clone()));
        assert_eq!(
            directory
                .find_by_role_and_division(ActorRole::DivisionChief, d1)
                .await
                .unwrap(),
            Some(chief)
        );
        assert!(
            directory
                .find_by_role_and_division(ActorRole::DivisionChief, d2)
                .await
                .unwrap()
                .is_none()
        );

        let admins = directory.find_all_by_role(ActorRole::Admin).await.unwrap();
        assert_eq!(admins, vec![admin_a, admin_b]);
    }
}
