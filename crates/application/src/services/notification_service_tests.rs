use std::sync::Arc;

use domain::{NotificationKind, NotificationStatus, UserRole};

use crate::services::test_support::{requestor_of, InMemoryStore};
use crate::services::{
    CreateNotificationRequest, NotificationService, NotificationServiceDependencies,
    UpdateNotificationRequest,
};

fn service(store: &InMemoryStore) -> NotificationService {
    NotificationService::new(NotificationServiceDependencies {
        user_repository: Arc::new(store.clone()),
        notification_repository: Arc::new(store.clone()),
    })
}

#[tokio::test]
async fn new_notification_starts_unread() {
    let store = InMemoryStore::new();
    let user = store.seed_user(UserRole::Regular, false);
    let service = service(&store);

    let notification = service
        .create(
            requestor_of(&user),
            CreateNotificationRequest {
                user_id: user.id,
                content: "welcome".into(),
                kind: NotificationKind::Alert,
            },
        )
        .await
        .unwrap();
    assert_eq!(notification.status, NotificationStatus::Unread);
}

#[tokio::test]
async fn only_admin_creates_notifications_for_others() {
    let store = InMemoryStore::new();
    let user = store.seed_user(UserRole::Regular, false);
    let target = store.seed_user(UserRole::Regular, false);
    let admin = store.seed_user(UserRole::Administrator, false);
    let service = service(&store);

    let err = service
        .create(
            requestor_of(&user),
            CreateNotificationRequest {
                user_id: target.id,
                content: "hi".into(),
                kind: NotificationKind::Invite,
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());

    service
        .create(
            requestor_of(&admin),
            CreateNotificationRequest {
                user_id: target.id,
                content: "hi".into(),
                kind: NotificationKind::Invite,
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn listing_is_self_or_admin() {
    let store = InMemoryStore::new();
    let user = store.seed_user(UserRole::Regular, false);
    let other = store.seed_user(UserRole::Regular, false);
    let admin = store.seed_user(UserRole::Administrator, false);
    store.seed_notification(user.id, NotificationKind::Message);
    store.seed_notification(user.id, NotificationKind::Alert);
    let service = service(&store);

    let all = service
        .list_by_user(requestor_of(&user), user.id)
        .await
        .unwrap();
    assert_eq!(all.len(), 2);

    let alerts = service
        .list_by_user_and_kind(requestor_of(&admin), user.id, NotificationKind::Alert)
        .await
        .unwrap();
    assert_eq!(alerts.len(), 1);

    let err = service
        .list_by_user(requestor_of(&other), user.id)
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn mark_read_flips_status() {
    let store = InMemoryStore::new();
    let user = store.seed_user(UserRole::Regular, false);
    let notification = store.seed_notification(user.id, NotificationKind::Message);
    let service = service(&store);

    let updated = service
        .mark_read(requestor_of(&user), notification.id)
        .await
        .unwrap();
    assert_eq!(updated.status, NotificationStatus::Read);

    let unread = service
        .list_by_user_and_status(requestor_of(&user), user.id, NotificationStatus::Unread)
        .await
        .unwrap();
    assert!(unread.is_empty());
}

#[tokio::test]
async fn owner_updates_and_removes_own_notification() {
    let store = InMemoryStore::new();
    let user = store.seed_user(UserRole::Regular, false);
    let other = store.seed_user(UserRole::Regular, false);
    let notification = store.seed_notification(user.id, NotificationKind::Message);
    let service = service(&store);

    let err = service
        .update(
            requestor_of(&other),
            UpdateNotificationRequest {
                notification_id: notification.id,
                content: Some("changed".into()),
                status: None,
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());

    let updated = service
        .update(
            requestor_of(&user),
            UpdateNotificationRequest {
                notification_id: notification.id,
                content: Some("changed".into()),
                status: Some(NotificationStatus::Archived),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.content, "changed");
    assert_eq!(updated.status, NotificationStatus::Archived);

    service
        .remove(requestor_of(&user), notification.id)
        .await
        .unwrap();
    let err = service
        .get(requestor_of(&user), notification.id)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}
