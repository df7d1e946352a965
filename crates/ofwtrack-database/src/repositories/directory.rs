//! PostgreSQL directory repository.

use async_trait::async_trait;
use sqlx::PgPool;

use ofwtrack_core::error::{AppError, ErrorKind};
use ofwtrack_core::result::AppResult;
use ofwtrack_core::types::{DivisionId, UserId};
use ofwtrack_entity::actor::{Actor, ActorRole};

use crate::traits::DirectoryLookup;

const ACTOR_COLUMNS: &str = "id, display_name, email, role, division_id";

/// Read-only repository over the `users` directory table.
#[derive(Debug, Clone)]
pub struct DirectoryRepository {
    pool: PgPool,
}

impl DirectoryRepository {
    /// Create a new directory repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DirectoryLookup for DirectoryRepository {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<Actor>> {
        sqlx::query_as::<_, Actor>(&format!("SELECT {ACTOR_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    async fn find_by_role_and_division(
        &self,
        role: ActorRole,
        division_id: DivisionId,
    ) -> AppResult<Option<Actor>> {
        sqlx::query_as::<_, Actor>(&format!(
            "SELECT {ACTOR_COLUMNS} FROM users WHERE role = $1 AND division_id = $2 \
             ORDER BY display_name LIMIT 1"
        ))
        .bind(role)
        .bind(division_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find user by role and division", e)
        })
    }

    async fn find_all_by_role(&self, role: ActorRole) -> AppResult<Vec<Actor>> {
        sqlx::query_as::<_, Actor>(&format!(
            "SELECT {ACTOR_COLUMNS} FROM users WHERE role = $1 ORDER BY display_name, id"
        ))
        .bind(role)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users by role", e))
    }
}
