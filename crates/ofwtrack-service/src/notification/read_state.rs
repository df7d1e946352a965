//! Unread counts, listings and read marking.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use ofwtrack_core::result::AppResult;
use ofwtrack_core::types::{NotificationId, PageRequest, PageResponse, UserId};
use ofwtrack_database::NotificationStore;
use ofwtrack_entity::notification::Notification;

/// Read-side operations over a recipient's notifications.
#[derive(Debug, Clone)]
pub struct ReadStateManager {
    /// Notification store.
    store: Arc<dyn NotificationStore>,
}

impl ReadStateManager {
    /// Creates a new read-state manager.
    pub fn new(store: Arc<dyn NotificationStore>) -> Self {
        Self { store }
    }

    /// Counts a recipient's notifications, optionally only unread ones.
    pub async fn count(&self, recipient_id: UserId, unread_only: bool) -> AppResult<i64> {
        self.store.count_where(recipient_id, unread_only).await
    }

    /// Lists a recipient's notifications, newest first.
    pub async fn list(
        &self,
        recipient_id: UserId,
        page: PageRequest,
        unread_only: bool,
    ) -> AppResult<PageResponse<Notification>> {
        self.store
            .find_by_recipient(recipient_id, unread_only, page)
            .await
    }

    /// Marks one notification read.
    ///
    /// Returns `false` if it was already read or belongs to someone else.
    pub async fn mark_read(
        &self,
        notification_id: NotificationId,
        recipient_id: UserId,
    ) -> AppResult<bool> {
        let changed = self
            .store
            .mark_read(notification_id, recipient_id, Utc::now())
            .await?;
        if changed {
            info!(
                notification_id = %notification_id,
                recipient_id = %recipient_id,
                "Notification marked read"
            );
        }
        Ok(changed)
    }

    /// Marks every unread notification of a recipient read.
    ///
    /// Idempotent: a second call returns 0.
    pub async fn mark_all_read(&self, recipient_id: UserId) -> AppResult<u64> {
        let changed = self
            .store
            .update_many_unread_to_read(recipient_id, Utc::now())
            .await?;
        info!(
            recipient_id = %recipient_id,
            count = changed,
            "Marked notifications read"
        );
        Ok(changed)
    }
}
