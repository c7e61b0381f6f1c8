use std::sync::Arc;

use domain::{ChatRole, MessageId, UserRole};
use uuid::Uuid;

use crate::services::test_support::{requestor_of, FixedClock, InMemoryStore};
use crate::services::{
    EditMessageRequest, MessageService, MessageServiceDependencies, SendMessageRequest,
};

fn service(store: &InMemoryStore) -> MessageService {
    MessageService::new(MessageServiceDependencies {
        user_repository: Arc::new(store.clone()),
        chat_repository: Arc::new(store.clone()),
        membership_repository: Arc::new(store.clone()),
        message_repository: Arc::new(store.clone()),
        clock: Arc::new(FixedClock),
    })
}

#[tokio::test]
async fn member_sends_message() {
    let store = InMemoryStore::new();
    let user = store.seed_user(UserRole::Regular, false);
    let chat = store.seed_chat("general");
    store.seed_membership(user.id, chat.id, ChatRole::Regular);
    let service = service(&store);

    let message = service
        .send(
            requestor_of(&user),
            SendMessageRequest {
                chat_id: chat.id,
                content: "hello".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(message.content, "hello");
    assert_eq!(message.user_id, Uuid::from(user.id));
}

#[tokio::test]
async fn non_member_cannot_send_message() {
    let store = InMemoryStore::new();
    let user = store.seed_user(UserRole::Regular, false);
    let chat = store.seed_chat("general");
    let service = service(&store);

    let err = service
        .send(
            requestor_of(&user),
            SendMessageRequest {
                chat_id: chat.id,
                content: "hello".into(),
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(store.message_count(), 0);
}

#[tokio::test]
async fn empty_message_content_is_rejected() {
    let store = InMemoryStore::new();
    let user = store.seed_user(UserRole::Regular, false);
    let chat = store.seed_chat("general");
    store.seed_membership(user.id, chat.id, ChatRole::Regular);
    let service = service(&store);

    let err = service
        .send(
            requestor_of(&user),
            SendMessageRequest {
                chat_id: chat.id,
                content: "  ".into(),
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_invalid_argument());
}

#[tokio::test]
async fn only_sender_edits_content_even_against_admin_and_moderator() {
    let store = InMemoryStore::new();
    let sender = store.seed_user(UserRole::Regular, false);
    let admin = store.seed_user(UserRole::Administrator, false);
    let moderator = store.seed_user(UserRole::Regular, false);
    let chat = store.seed_chat("general");
    store.seed_membership(sender.id, chat.id, ChatRole::Regular);
    store.seed_membership(moderator.id, chat.id, ChatRole::Moderator);
    let message = store.seed_message(sender.id, chat.id, "original");
    let service = service(&store);

    for other in [&admin, &moderator] {
        let err = service
            .update(
                requestor_of(other),
                EditMessageRequest {
                    message_id: message.id,
                    content: "edited".into(),
                },
            )
            .await
            .unwrap_err();
        assert!(err.is_unauthorized());
    }

    let updated = service
        .update(
            requestor_of(&sender),
            EditMessageRequest {
                message_id: message.id,
                content: "edited".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.content, "edited");
}

#[tokio::test]
async fn message_read_is_sender_or_admin() {
    let store = InMemoryStore::new();
    let sender = store.seed_user(UserRole::Regular, false);
    let other = store.seed_user(UserRole::Regular, false);
    let admin = store.seed_user(UserRole::Administrator, false);
    let chat = store.seed_chat("general");
    let message = store.seed_message(sender.id, chat.id, "hello");
    let service = service(&store);

    service.get(requestor_of(&sender), message.id).await.unwrap();
    service.get(requestor_of(&admin), message.id).await.unwrap();

    let err = service
        .get(requestor_of(&other), message.id)
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn user_message_listing_is_self_or_admin() {
    let store = InMemoryStore::new();
    let sender = store.seed_user(UserRole::Regular, false);
    let other = store.seed_user(UserRole::Regular, false);
    let chat = store.seed_chat("general");
    store.seed_message(sender.id, chat.id, "one");
    store.seed_message(sender.id, chat.id, "two");
    let service = service(&store);

    let messages = service
        .list_by_user(requestor_of(&sender), sender.id)
        .await
        .unwrap();
    assert_eq!(messages.len(), 2);

    let err = service
        .list_by_user(requestor_of(&other), sender.id)
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn moderator_removes_message_in_own_chat() {
    let store = InMemoryStore::new();
    let sender = store.seed_user(UserRole::Regular, false);
    let moderator = store.seed_user(UserRole::Regular, false);
    let chat = store.seed_chat("general");
    store.seed_membership(sender.id, chat.id, ChatRole::Regular);
    store.seed_membership(moderator.id, chat.id, ChatRole::Moderator);
    let message = store.seed_message(sender.id, chat.id, "hello");
    let service = service(&store);

    service
        .remove(requestor_of(&moderator), message.id)
        .await
        .unwrap();
    assert_eq!(store.message_count(), 0);
}

#[tokio::test]
async fn uninvolved_member_cannot_remove_message() {
    let store = InMemoryStore::new();
    let sender = store.seed_user(UserRole::Regular, false);
    let member = store.seed_user(UserRole::Regular, false);
    let chat = store.seed_chat("general");
    store.seed_membership(sender.id, chat.id, ChatRole::Regular);
    store.seed_membership(member.id, chat.id, ChatRole::Regular);
    let message = store.seed_message(sender.id, chat.id, "hello");
    let service = service(&store);

    let err = service
        .remove(requestor_of(&member), message.id)
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn missing_message_is_not_found() {
    let store = InMemoryStore::new();
    let admin = store.seed_user(UserRole::Administrator, false);
    let service = service(&store);

    let err = service
        .get(requestor_of(&admin), MessageId::from(Uuid::new_v4()))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn chat_message_listing_requires_membership_or_admin() {
    let store = InMemoryStore::new();
    let member = store.seed_user(UserRole::Regular, false);
    let outsider = store.seed_user(UserRole::Regular, false);
    let chat = store.seed_chat("general");
    store.seed_membership(member.id, chat.id, ChatRole::Regular);
    store.seed_message(member.id, chat.id, "hello");
    let service = service(&store);

    let messages = service
        .list_by_chat(requestor_of(&member), chat.id)
        .await
        .unwrap();
    assert_eq!(messages.len(), 1);

    let err = service
        .list_by_chat(requestor_of(&outsider), chat.id)
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
}
