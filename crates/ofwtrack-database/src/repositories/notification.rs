//! PostgreSQL notification repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use ofwtrack_core::error::{AppError, ErrorKind};
use ofwtrack_core::result::AppResult;
use ofwtrack_core::types::{NotificationId, PageRequest, PageResponse, UserId};
use ofwtrack_entity::notification::{NewNotification, Notification};

use crate::traits::NotificationStore;

/// Repository for the `notifications` table.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationStore for NotificationRepository {
    async fn insert(&self, notification: &NewNotification) -> AppResult<NotificationId> {
        let id = NotificationId::from_uuid(Uuid::now_v7());

        sqlx::query(
            "INSERT INTO notifications (id, recipient_id, title, message, category, request_id, \
             priority, action_required, sender_name, sender_email, payload, is_read, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, FALSE, $12)",
        )
        .bind(id)
        .bind(notification.recipient_id)
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(notification.category)
        .bind(notification.request_id)
        .bind(notification.priority)
        .bind(notification.action_required)
        .bind(&notification.sender_name)
        .bind(&notification.sender_email)
        .bind(&notification.payload)
        .bind(notification.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create notification", e))?;

        Ok(id)
    }

    async fn find_by_id(&self, id: NotificationId) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, Notification>("SELECT * FROM notifications WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find notification", e)
            })
    }

    async fn find_by_recipient(
        &self,
        recipient_id: UserId,
        unread_only: bool,
        page: PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        let offset = i64::try_from(page.offset())
            .map_err(|_| AppError::validation("Page offset out of range"))?;
        let limit = i64::try_from(page.limit())
            .map_err(|_| AppError::validation("Page size out of range"))?;
        let total = self.count_where(recipient_id, unread_only).await?;

        let items = sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications \
             WHERE recipient_id = $1 AND ($2 = FALSE OR is_read = FALSE) \
             ORDER BY created_at DESC, id DESC LIMIT $3 OFFSET $4",
        )
        .bind(recipient_id)
        .bind(unread_only)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list notifications", e))?;

        Ok(PageResponse::new(items, page, u64::try_from(total).unwrap_or(0)))
    }

    async fn count_where(&self, recipient_id: UserId, unread_only: bool) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications \
             WHERE recipient_id = $1 AND ($2 = FALSE OR is_read = FALSE)",
        )
        .bind(recipient_id)
        .bind(unread_only)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count notifications", e))
    }

    async fn mark_read(
        &self,
        id: NotificationId,
        recipient_id: UserId,
        at: DateTime<Utc>,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE, read_at = $3 \
             WHERE id = $1 AND recipient_id = $2 AND is_read = FALSE",
        )
        .bind(id)
        .bind(recipient_id)
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark read", e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn update_many_unread_to_read(
        &self,
        recipient_id: UserId,
        at: DateTime<Utc>,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE, read_at = $2 \
             WHERE recipient_id = $1 AND is_read = FALSE",
        )
        .bind(recipient_id)
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark all read", e))?;

        Ok(result.rows_affected())
    }
}
