use std::sync::Arc;

use domain::{ChatRole, UserRole};

use crate::services::test_support::{requestor_of, FixedClock, InMemoryStore};
use crate::services::{
    ChangeRoleRequest, JoinChatRequest, MembershipService, MembershipServiceDependencies,
    RemoveMembershipRequest,
};

fn service(store: &InMemoryStore) -> MembershipService {
    MembershipService::new(MembershipServiceDependencies {
        user_repository: Arc::new(store.clone()),
        chat_repository: Arc::new(store.clone()),
        membership_repository: Arc::new(store.clone()),
        clock: Arc::new(FixedClock),
    })
}

#[tokio::test]
async fn user_joins_chat_as_regular_member() {
    let store = InMemoryStore::new();
    let user = store.seed_user(UserRole::Regular, false);
    let chat = store.seed_chat("general");
    let service = service(&store);

    let membership = service
        .join(
            requestor_of(&user),
            JoinChatRequest {
                user_id: user.id,
                chat_id: chat.id,
            },
        )
        .await
        .unwrap();
    assert_eq!(membership.role, ChatRole::Regular);
}

#[tokio::test]
async fn admin_cannot_join_on_behalf_of_another_user() {
    let store = InMemoryStore::new();
    let admin = store.seed_user(UserRole::Administrator, false);
    let user = store.seed_user(UserRole::Regular, false);
    let chat = store.seed_chat("general");
    let service = service(&store);

    let err = service
        .join(
            requestor_of(&admin),
            JoinChatRequest {
                user_id: user.id,
                chat_id: chat.id,
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn joining_twice_is_rejected() {
    let store = InMemoryStore::new();
    let user = store.seed_user(UserRole::Regular, false);
    let chat = store.seed_chat("general");
    store.seed_membership(user.id, chat.id, ChatRole::Regular);
    let service = service(&store);

    let err = service
        .join(
            requestor_of(&user),
            JoinChatRequest {
                user_id: user.id,
                chat_id: chat.id,
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_invalid_argument());
}

#[tokio::test]
async fn member_leaves_own_chat() {
    let store = InMemoryStore::new();
    let user = store.seed_user(UserRole::Regular, false);
    let chat = store.seed_chat("general");
    store.seed_membership(user.id, chat.id, ChatRole::Regular);
    let service = service(&store);

    service
        .remove(
            requestor_of(&user),
            RemoveMembershipRequest {
                user_id: user.id,
                chat_id: chat.id,
            },
        )
        .await
        .unwrap();
    assert!(store.membership_of(user.id, chat.id).is_none());
}

#[tokio::test]
async fn moderator_kicks_regular_member() {
    let store = InMemoryStore::new();
    let moderator = store.seed_user(UserRole::Regular, false);
    let member = store.seed_user(UserRole::Regular, false);
    let chat = store.seed_chat("general");
    store.seed_membership(moderator.id, chat.id, ChatRole::Moderator);
    store.seed_membership(member.id, chat.id, ChatRole::Regular);
    let service = service(&store);

    service
        .remove(
            requestor_of(&moderator),
            RemoveMembershipRequest {
                user_id: member.id,
                chat_id: chat.id,
            },
        )
        .await
        .unwrap();
    assert!(store.membership_of(member.id, chat.id).is_none());
}

#[tokio::test]
async fn regular_member_cannot_kick_others() {
    let store = InMemoryStore::new();
    let member = store.seed_user(UserRole::Regular, false);
    let target = store.seed_user(UserRole::Regular, false);
    let chat = store.seed_chat("general");
    store.seed_membership(member.id, chat.id, ChatRole::Regular);
    store.seed_membership(target.id, chat.id, ChatRole::Regular);
    let service = service(&store);

    let err = service
        .remove(
            requestor_of(&member),
            RemoveMembershipRequest {
                user_id: target.id,
                chat_id: chat.id,
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn removing_missing_membership_is_not_found_before_authorization() {
    let store = InMemoryStore::new();
    let user = store.seed_user(UserRole::Regular, false);
    let target = store.seed_user(UserRole::Regular, false);
    let chat = store.seed_chat("general");
    let service = service(&store);

    // 目标成员关系不存在：即便请求者也无权限，仍然先报资源不存在。
    let err = service
        .remove(
            requestor_of(&user),
            RemoveMembershipRequest {
                user_id: target.id,
                chat_id: chat.id,
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn moderator_promotes_member() {
    let store = InMemoryStore::new();
    let moderator = store.seed_user(UserRole::Regular, false);
    let member = store.seed_user(UserRole::Regular, false);
    let chat = store.seed_chat("general");
    store.seed_membership(moderator.id, chat.id, ChatRole::Moderator);
    store.seed_membership(member.id, chat.id, ChatRole::Regular);
    let service = service(&store);

    let updated = service
        .change_role(
            requestor_of(&moderator),
            ChangeRoleRequest {
                user_id: member.id,
                chat_id: chat.id,
                role: ChatRole::Moderator,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.role, ChatRole::Moderator);
}

#[tokio::test]
async fn role_change_requires_own_membership_unless_admin() {
    let store = InMemoryStore::new();
    let outsider = store.seed_user(UserRole::Regular, false);
    let admin = store.seed_user(UserRole::Administrator, false);
    let member = store.seed_user(UserRole::Regular, false);
    let chat = store.seed_chat("general");
    store.seed_membership(member.id, chat.id, ChatRole::Regular);
    let service = service(&store);

    let err = service
        .change_role(
            requestor_of(&outsider),
            ChangeRoleRequest {
                user_id: member.id,
                chat_id: chat.id,
                role: ChatRole::Moderator,
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    let updated = service
        .change_role(
            requestor_of(&admin),
            ChangeRoleRequest {
                user_id: member.id,
                chat_id: chat.id,
                role: ChatRole::Moderator,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.role, ChatRole::Moderator);
}

#[tokio::test]
async fn regular_member_cannot_change_roles() {
    let store = InMemoryStore::new();
    let member = store.seed_user(UserRole::Regular, false);
    let target = store.seed_user(UserRole::Regular, false);
    let chat = store.seed_chat("general");
    store.seed_membership(member.id, chat.id, ChatRole::Regular);
    store.seed_membership(target.id, chat.id, ChatRole::Regular);
    let service = service(&store);

    let err = service
        .change_role(
            requestor_of(&member),
            ChangeRoleRequest {
                user_id: target.id,
                chat_id: chat.id,
                role: ChatRole::Moderator,
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn chat_user_listing_requires_membership_or_admin() {
    let store = InMemoryStore::new();
    let member = store.seed_user(UserRole::Regular, false);
    let outsider = store.seed_user(UserRole::Regular, false);
    let admin = store.seed_user(UserRole::Administrator, false);
    let chat = store.seed_chat("general");
    store.seed_membership(member.id, chat.id, ChatRole::Regular);
    let service = service(&store);

    let users = service
        .list_users_in_chat(requestor_of(&member), chat.id)
        .await
        .unwrap();
    assert_eq!(users.len(), 1);

    let err = service
        .list_users_in_chat(requestor_of(&outsider), chat.id)
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());

    let users = service
        .list_users_in_chat(requestor_of(&admin), chat.id)
        .await
        .unwrap();
    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn user_chat_listing_is_self_or_admin() {
    let store = InMemoryStore::new();
    let user = store.seed_user(UserRole::Regular, false);
    let other = store.seed_user(UserRole::Regular, false);
    let admin = store.seed_user(UserRole::Administrator, false);
    let chat = store.seed_chat("general");
    store.seed_membership(user.id, chat.id, ChatRole::Regular);
    let service = service(&store);

    let chats = service
        .list_chats_of_user(requestor_of(&user), user.id)
        .await
        .unwrap();
    assert_eq!(chats.len(), 1);

    let err = service
        .list_chats_of_user(requestor_of(&other), user.id)
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());

    let chats = service
        .list_chats_of_user(requestor_of(&admin), user.id)
        .await
        .unwrap();
    assert_eq!(chats.len(), 1);
}
