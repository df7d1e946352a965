//! Read-state management over the in-memory store.

use std::sync::Arc;

use chrono::Utc;

use ofwtrack_core::types::{PageRequest, UserId};
use ofwtrack_database::NotificationStore;
use ofwtrack_database::memory::MemoryNotificationStore;
use ofwtrack_entity::notification::{NewNotification, NotificationCategory, NotificationPriority};
use ofwtrack_service::ReadStateManager;

fn unread(recipient_id: UserId, title: &str) -> NewNotification {
    NewNotification {
        recipient_id,
        title: title.to_string(),
        message: format!("{title}."),
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

async fn seeded(recipient: UserId, n: usize) -> Arc<MemoryNotificationStore> {
    let store = Arc::new(MemoryNotificationStore::new());
    for i in 0..n {
        store
            .insert(&unread(recipient, &format!("Notice {i}")))
            .await
            .unwrap();
    }
    store
}

#[tokio::test]
async fn test_mark_all_read_is_idempotent() {
    let user = UserId::new();
    let store = seeded(user, 3).await;
    let manager = ReadStateManager::new(store.clone());

    assert_eq!(manager.mark_all_read(user).await.unwrap(), 3);
    assert_eq!(manager.mark_all_read(user).await.unwrap(), 0);
    assert_eq!(manager.count(user, true).await.unwrap(), 0);
    assert_eq!(manager.count(user, false).await.unwrap(), 3);
}

#[tokio::test]
async fn test_mark_all_read_leaves_other_recipients() {
    let alice = UserId::new();
    let bob = UserId::new();
    let store = seeded(alice, 2).await;
    store.insert(&unread(bob, "Bob's notice")).await.unwrap();
    let manager = ReadStateManager::new(store);

    assert_eq!(manager.mark_all_read(alice).await.unwrap(), 2);
    assert_eq!(manager.count(bob, true).await.unwrap(), 1);
}

#[tokio::test]
async fn test_mark_read_single() {
    let user = UserId::new();
    let store = seeded(user, 2).await;
    let target = store.for_recipient(user).await[0].id;
    let manager = ReadStateManager::new(store);

    assert!(manager.mark_read(target, user).await.unwrap());
    assert!(!manager.mark_read(target, user).await.unwrap());
    assert!(!manager.mark_read(target, UserId::new()).await.unwrap());
    assert_eq!(manager.count(user, true).await.unwrap(), 1);
}

#[tokio::test]
async fn test_list_newest_first_and_unread_filter() {
    let user = UserId::new();
    let store = seeded(user, 5).await;
    let oldest = store.for_recipient(user).await[0].id;
    let manager = ReadStateManager::new(store);

    let page = manager
        .list(user, PageRequest::new(1, 2), false)
        .await
        .unwrap();
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.total_items, 5);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.items[0].title, "Notice 4");

    manager.mark_read(oldest, user).await.unwrap();
    let unread_only = manager
        .list(user, PageRequest::new(1, 10), true)
        .await
        .unwrap();
    assert_eq!(unread_only.total_items, 4);
    assert!(unread_only.items.iter().all(|n| n.id != oldest));
}

#[tokio::test]
async fn test_mark_all_read_stamps_read_at() {
    let user = UserId::new();
    let store = seeded(user, 3).await;
    let manager = ReadStateManager::new(store.clone());
    let before = Utc::now();

    manager.mark_all_read(user).await.unwrap();

    let rows = store.for_recipient(user).await;
    assert_eq!(rows.len(), 3);
    for row in rows {
        assert!(row.is_read);
        let read_at = row.read_at.expect("read_at set");
        assert!(read_at >= before);
    }
}

#[tokio::test]
async fn test_list_rejects_unreachable_page() {
    let user = UserId::new();
    let manager = ReadStateManager::new(seeded(user, 2).await);

    let err = manager
        .list(user, PageRequest::new(u64::MAX, 100), false)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ofwtrack_core::error::ErrorKind::Validation);
}

#[tokio::test]
async fn test_list_with_deserialized_zero_page_size() {
    let user = UserId::new();
    let manager = ReadStateManager::new(seeded(user, 3).await);
    let page_req: PageRequest = serde_json::from_str(r#"{"page":1,"page_size":0}"#).unwrap();

    let page = manager.list(user, page_req, false).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.total_pages, 3);
}
