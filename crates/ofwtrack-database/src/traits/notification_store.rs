//! Notification store trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use ofwtrack_core::result::AppResult;
use ofwtrack_core::types::{NotificationId, PageRequest, PageResponse, UserId};
use ofwtrack_entity::notification::{NewNotification, Notification};

/// Durable, append-only notification table.
///
/// Rows are never updated except for the unread→read transition and are
/// never deleted through this trait.
#[async_trait]
pub trait NotificationStore: Send + Sync + std::fmt::Debug + 'static {
    /// Persist a notification and return its assigned id.
    async fn insert(&self, notification: &NewNotification) -> AppResult<NotificationId>;

    /// Find a notification by id.
    async fn find_by_id(&self, id: NotificationId) -> AppResult<Option<Notification>>;

    /// List a recipient's notifications, newest first.
    async fn find_by_recipient(
        &self,
        recipient_id: UserId,
        unread_only: bool,
        page: PageRequest,
    ) -> AppResult<PageResponse<Notification>>;

    /// Count a recipient's notifications, optionally only unread ones.
    async fn count_where(&self, recipient_id: UserId, unread_only: bool) -> AppResult<i64>;

    /// Mark one notification read. Returns `true` only if it was unread.
    async fn mark_read(
        &self,
        id: NotificationId,
        recipient_id: UserId,
        at: DateTime<Utc>,
    ) -> AppResult<bool>;

    /// Mark every unread notification of a recipient read. Returns the number changed.
    async fn update_many_unread_to_read(
        &self,
        recipient_id: UserId,
        at: DateTime<Utc>,
    ) -> AppResult<u64>;
}
