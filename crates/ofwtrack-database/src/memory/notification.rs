//! In-memory notification store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use ofwtrack_core::error::AppError;
use ofwtrack_core::result::AppResult;
use ofwtrack_core::types::{NotificationId, PageRequest, PageResponse, UserId};
use ofwtrack_entity::notification::{NewNotification, Notification};

use crate::traits::NotificationStore;

/// Notification store keeping rows in insertion order.
#[derive(Debug, Default)]
pub struct MemoryNotificationStore {
    rows: RwLock<Vec<Notification>>,
}

impl MemoryNotificationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored row, in insertion order.
    pub async fn all(&self) -> Vec<Notification> {
        self.rows.read().await.clone()
    }

    /// Rows addressed to one recipient, in insertion order.
    pub async fn for_recipient(&self, recipient_id: UserId) -> Vec<Notification> {
        self.rows
            .read()
            .await
            .iter()
            .filter(|n| n.recipient_id == recipient_id)
            .cloned()
            .collect()
    }

    /// Number of stored rows.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl NotificationStore for MemoryNotificationStore {
    async fn insert(&self, notification: &NewNotification) -> AppResult<NotificationId> {
        let id = NotificationId::new();
        self.rows
            .write()
            .await
            .push(notification.clone().into_notification(id));
        debug!(notification_id = %id, recipient_id = %notification.recipient_id, "Stored notification");
        Ok(id)
    }

    async fn find_by_id(&self, id: NotificationId) -> AppResult<Option<Notification>> {
        Ok(self.rows.read().await.iter().find(|n| n.id == id).cloned())
    }

    async fn find_by_recipient(
        &self,
        recipient_id: UserId,
        unread_only: bool,
        page: PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        let offset = i64::try_from(page.offset())
            .map_err(|_| AppError::validation("Page offset out of range"))?;
        let rows = self.rows.read().await;
        let matching: Vec<&Notification> = rows
            .iter()
            .rev()
            .filter(|n| n.recipient_id == recipient_id && (!unread_only || n.is_unread()))
            .collect();
        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(page.limit() as usize)
            .cloned()
            .collect();
        Ok(PageResponse::new(items, page, total))
    }

    async fn count_where(&self, recipient_id: UserId, unread_only: bool) -> AppResult<i64> {
        let count = self
            .rows
            .read()
            .await
            .iter()
            .filter(|n| n.recipient_id == recipient_id && (!unread_only || n.is_unread()))
            .count();
        Ok(count as i64)
    }

    async fn mark_read(
        &self,
        id: NotificationId,
        recipient_id: UserId,
        at: DateTime<Utc>,
    ) -> AppResult<bool> {
        let mut rows = self.rows.write().await;
        match rows
            .iter_mut()
            .find(|n| n.id == id && n.recipient_id == recipient_id && n.is_unread())
        {
            Some(row) => {
                row.is_read = true;
                row.read_at = Some(at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_many_unread_to_read(
        &self,
        recipient_id: UserId,
        at: DateTime<Utc>,
    ) -> AppResult<u64> {
        let mut rows = self.rows.write().await;
        let mut changed = 0u64;
        for row in rows
            .iter_mut()
            .filter(|n| n.recipient_id == recipient_id && n.is_unread())
        {
            row.is_read = true;
            row.read_at = Some(at);
            changed += 1;
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ofwtrack_entity::notification::{NotificationCategory, NotificationPriority};

    fn new_for(recipient_id: UserId, title: &str) -> NewNotification {
        NewNotification {
            recipient_id,
            title: title.to_string(),
            message: format!("{title} message"),
            category: NotificationCategory::General,
            request_id: None,
            priority: NotificationPriority::Low,
            action_required: false,
            sender_name: None,
            sender_email: None,
            payload: serde_json::json!({}),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_count() {
        let store = MemoryNotificationStore::new();
        let alice = UserId::new();
        let bob = UserId::new();

        let id = store.insert(&new_for(alice, "one")).await.unwrap();
        store.insert(&new_for(alice, "two")).await.unwrap();
        store.insert(&new_for(bob, "three")).await.unwrap();

        assert_eq!(store.count_where(alice, false).await.unwrap(), 2);
        assert_eq!(store.count_where(alice, true).await.unwrap(), 2);
        assert_eq!(store.count_where(bob, false).await.unwrap(), 1);

        let found = store.find_by_id(id).await.unwrap().expect("stored row");
        assert_eq!(found.title, "one");
        assert!(found.is_unread());
    }

    #[tokio::test]
    async fn test_mark_read_is_monotonic() {
        let store = MemoryNotificationStore::new();
        let alice = UserId::new();
        let id = store.insert(&new_for(alice, "one")).await.unwrap();

        let first_at = Utc::now();
        assert!(store.mark_read(id, alice, first_at).await.unwrap());
        assert!(!store.mark_read(id, alice, Utc::now()).await.unwrap());

        let row = store.find_by_id(id).await.unwrap().unwrap();
        assert!(row.is_read);
        assert_eq!(row.read_at, Some(first_at));
    }

    #[tokio::test]
    async fn test_mark_read_wrong_recipient() {
        let store = MemoryNotificationStore::new();
        let id = store.insert(&new_for(UserId::new(), "one")).await.unwrap();
        assert!(!store.mark_read(id, UserId::new(), Utc::now()).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_many_only_touches_recipient() {
        let store = MemoryNotificationStore::new();
        let alice = UserId::new();
        let bob = UserId::new();
        store.insert(&new_for(alice, "one")).await.unwrap();
        store.insert(&new_for(alice, "two")).await.unwrap();
        store.insert(&new_for(bob, "three")).await.unwrap();

        assert_eq!(store.update_many_unread_to_read(alice, Utc::now()).await.unwrap(), 2);
        assert_eq!(store.update_many_unread_to_read(alice, Utc::now()).await.unwrap(), 0);
        assert_eq!(store.count_where(alice, true).await.unwrap(), 0);
        assert_eq!(store.count_where(bob, true).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_find_by_recipient_newest_first() {
        let store = MemoryNotificationStore::new();
        let alice = UserId::new();
        for title in ["one", "two", "three"] {
            store.insert(&new_for(alice, title)).await.unwrap();
        }

        let page = store
            .find_by_recipient(alice, false, PageRequest::new(1, 2))
            .await
            .unwrap();
        assert_eq!(page.total_items, 3);
        assert_eq!(page.total_pages, 2);
        let titles: Vec<_> = page.items.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["three", "two"]);
    }

    #[tokio::test]
    async fn test_find_by_recipient_out_of_range_page() {
        let store = MemoryNotificationStore::new();
        let alice = UserId::new();
        store.insert(&new_for(alice, "one")).await.unwrap();

        let far = store
            .find_by_recipient(alice, false, PageRequest::new(1_000_000, 100))
            .await
            .unwrap();
        assert!(far.items.is_empty());
        assert_eq!(far.total_items, 1);

        let err = store
            .find_by_recipient(alice, false, PageRequest::new(u64::MAX, 100))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ofwtrack_core::error::ErrorKind::Validation);
    }
}
