//! 服务层测试夹具：内存仓储、固定时钟、明文伪哈希。

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use domain::{
    Chat, ChatId, ChatRole, MailAddress, Membership, Message, MessageId, Nickname, Notification,
    NotificationId, NotificationKind, NotificationStatus, PasswordHash, RepositoryError, Requestor,
    Timestamp, User, UserId, UserRole,
};
use uuid::Uuid;

use crate::clock::Clock;
use crate::password::{PasswordHasher, PasswordHasherError};
use crate::repository::{
    ChatRepository, MembershipRepository, MessageRepository, NotificationRepository,
    UserRepository,
};

#[derive(Default)]
struct StoreInner {
    users: HashMap<UserId, User>,
    chats: HashMap<ChatId, Chat>,
    memberships: HashMap<(UserId, ChatId), Membership>,
    messages: HashMap<MessageId, Message>,
    notifications: HashMap<NotificationId, Notification>,
}

/// 所有仓储契约的内存实现，供服务层测试共享同一份状态。
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap()
    }

    pub fn seed_user(&self, role: UserRole, banned: bool) -> User {
        let id = UserId::from(Uuid::new_v4());
        let mut user = User::register(
            id,
            Nickname::parse(format!("user-{}", &id.to_string()[..8])).unwrap(),
            MailAddress::parse(format!("{id}@example.com")).unwrap(),
            PasswordHash::new("hashed:secret").unwrap(),
            fixed_time(),
        );
        user.role = role;
        user.is_banned = banned;
        self.lock().users.insert(user.id, user.clone());
        user
    }

    pub fn seed_chat(&self, name: &str) -> Chat {
        let chat = Chat::new(ChatId::from(Uuid::new_v4()), name).unwrap();
        self.lock().chats.insert(chat.id, chat.clone());
        chat
    }

    pub fn seed_membership(&self, user_id: UserId, chat_id: ChatId, role: ChatRole) -> Membership {
        let membership = Membership::new(user_id, chat_id, role, fixed_time());
        self.lock()
            .memberships
            .insert((user_id, chat_id), membership.clone());
        membership
    }

    pub fn seed_message(&self, user_id: UserId, chat_id: ChatId, content: &str) -> Message {
        let message = Message::new(
            MessageId::from(Uuid::new_v4()),
            user_id,
            chat_id,
            content,
            fixed_time(),
        )
        .unwrap();
        self.lock().messages.insert(message.id, message.clone());
        message
    }

    pub fn seed_notification(&self, user_id: UserId, kind: NotificationKind) -> Notification {
        let notification = Notification::new(
            NotificationId::from(Uuid::new_v4()),
            user_id,
            "something happened",
            kind,
        );
        self.lock()
            .notifications
            .insert(notification.id, notification.clone());
        notification
    }

    pub fn membership_of(&self, user_id: UserId, chat_id: ChatId) -> Option<Membership> {
        self.lock().memberships.get(&(user_id, chat_id)).cloned()
    }

    pub fn chat_count(&self) -> usize {
        self.lock().chats.len()
    }

    pub fn message_count(&self) -> usize {
        self.lock().messages.len()
    }
}

pub fn requestor_of(user: &User) -> Requestor {
    Requestor::new(user.id, user.is_admin())
}

pub fn fixed_time() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: User) -> Result<User, RepositoryError> {
        let mut inner = self.lock();
        if inner.users.contains_key(&user.id) {
            return Err(RepositoryError::Conflict);
        }
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, RepositoryError> {
        let mut inner = self.lock();
        if !inner.users.contains_key(&user.id) {
            return Err(RepositoryError::NotFound);
        }
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_by_id(&self, id: UserId) -> Result<User, RepositoryError> {
        self.lock()
            .users
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn find_by_mail(&self, mail: &MailAddress) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .lock()
            .users
            .values()
            .find(|u| u.mail_address == *mail)
            .cloned())
    }

    async fn exists(&self, id: UserId) -> Result<bool, RepositoryError> {
        Ok(self.lock().users.contains_key(&id))
    }

    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self.lock().users.values().cloned().collect())
    }

    async fn remove(&self, id: UserId) -> Result<(), RepositoryError> {
        self.lock()
            .users
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

#[async_trait]
impl ChatRepository for InMemoryStore {
    async fn create_with_moderator(
        &self,
        chat: Chat,
        moderator: Membership,
    ) -> Result<Chat, RepositoryError> {
        let mut inner = self.lock();
        if inner.chats.contains_key(&chat.id) {
            return Err(RepositoryError::Conflict);
        }
        inner.chats.insert(chat.id, chat.clone());
        inner
            .memberships
            .insert((moderator.user_id, moderator.chat_id), moderator);
        Ok(chat)
    }

    async fn update(&self, chat: Chat) -> Result<Chat, RepositoryError> {
        let mut inner = self.lock();
        if !inner.chats.contains_key(&chat.id) {
            return Err(RepositoryError::NotFound);
        }
        inner.chats.insert(chat.id, chat.clone());
        Ok(chat)
    }

    async fn get_by_id(&self, id: ChatId) -> Result<Chat, RepositoryError> {
        self.lock()
            .chats
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn list(&self) -> Result<Vec<Chat>, RepositoryError> {
        Ok(self.lock().chats.values().cloned().collect())
    }

    async fn remove(&self, id: ChatId) -> Result<(), RepositoryError> {
        let mut inner = self.lock();
        if inner.chats.remove(&id).is_none() {
            return Err(RepositoryError::NotFound);
        }
        inner.memberships.retain(|(_, chat_id), _| *chat_id != id);
        inner.messages.retain(|_, m| m.chat_id != id);
        Ok(())
    }
}

#[async_trait]
impl MembershipRepository for InMemoryStore {
    async fn add(&self, membership: Membership) -> Result<Membership, RepositoryError> {
        let mut inner = self.lock();
        let key = (membership.user_id, membership.chat_id);
        if inner.memberships.contains_key(&key) {
            return Err(RepositoryError::Conflict);
        }
        inner.memberships.insert(key, membership.clone());
        Ok(membership)
    }

    async fn get(&self, user_id: UserId, chat_id: ChatId) -> Result<Membership, RepositoryError> {
        self.lock()
            .memberships
            .get(&(user_id, chat_id))
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn find(
        &self,
        user_id: UserId,
        chat_id: ChatId,
    ) -> Result<Option<Membership>, RepositoryError> {
        Ok(self.lock().memberships.get(&(user_id, chat_id)).cloned())
    }

    async fn is_member(&self, user_id: UserId, chat_id: ChatId) -> Result<bool, RepositoryError> {
        Ok(self.lock().memberships.contains_key(&(user_id, chat_id)))
    }

    async fn update_role(
        &self,
        user_id: UserId,
        chat_id: ChatId,
        role: ChatRole,
    ) -> Result<Membership, RepositoryError> {
        let mut inner = self.lock();
        let membership = inner
            .memberships
            .get_mut(&(user_id, chat_id))
            .ok_or(RepositoryError::NotFound)?;
        membership.set_role(role);
        Ok(membership.clone())
    }

    async fn remove(&self, user_id: UserId, chat_id: ChatId) -> Result<(), RepositoryError> {
        self.lock()
            .memberships
            .remove(&(user_id, chat_id))
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }

    async fn list_members_of_chat(
        &self,
        chat_id: ChatId,
    ) -> Result<Vec<Membership>, RepositoryError> {
        Ok(self
            .lock()
            .memberships
            .values()
            .filter(|m| m.chat_id == chat_id)
            .cloned()
            .collect())
    }

    async fn list_users_in_chat(&self, chat_id: ChatId) -> Result<Vec<User>, RepositoryError> {
        let inner = self.lock();
        Ok(inner
            .memberships
            .values()
            .filter(|m| m.chat_id == chat_id)
            .filter_map(|m| inner.users.get(&m.user_id).cloned())
            .collect())
    }

    async fn list_chats_of_user(&self, user_id: UserId) -> Result<Vec<Chat>, RepositoryError> {
        let inner = self.lock();
        Ok(inner
            .memberships
            .values()
            .filter(|m| m.user_id == user_id)
            .filter_map(|m| inner.chats.get(&m.chat_id).cloned())
            .collect())
    }
}

#[async_trait]
impl MessageRepository for InMemoryStore {
    async fn create(&self, message: Message) -> Result<Message, RepositoryError> {
        let mut inner = self.lock();
        if inner.messages.contains_key(&message.id) {
            return Err(RepositoryError::Conflict);
        }
        inner.messages.insert(message.id, message.clone());
        Ok(message)
    }

    async fn update(&self, message: Message) -> Result<Message, RepositoryError> {
        let mut inner = self.lock();
        if !inner.messages.contains_key(&message.id) {
            return Err(RepositoryError::NotFound);
        }
        inner.messages.insert(message.id, message.clone());
        Ok(message)
    }

    async fn get_by_id(&self, id: MessageId) -> Result<Message, RepositoryError> {
        self.lock()
            .messages
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Message>, RepositoryError> {
        Ok(self
            .lock()
            .messages
            .values()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_by_chat(&self, chat_id: ChatId) -> Result<Vec<Message>, RepositoryError> {
        Ok(self
            .lock()
            .messages
            .values()
            .filter(|m| m.chat_id == chat_id)
            .cloned()
            .collect())
    }

    async fn remove(&self, id: MessageId) -> Result<(), RepositoryError> {
        self.lock()
            .messages
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

#[async_trait]
impl NotificationRepository for InMemoryStore {
    async fn create(&self, notification: Notification) -> Result<Notification, RepositoryError> {
        let mut inner = self.lock();
        if inner.notifications.contains_key(&notification.id) {
            return Err(RepositoryError::Conflict);
        }
        inner
            .notifications
            .insert(notification.id, notification.clone());
        Ok(notification)
    }

    async fn update(&self, notification: Notification) -> Result<Notification, RepositoryError> {
        let mut inner = self.lock();
        if !inner.notifications.contains_key(&notification.id) {
            return Err(RepositoryError::NotFound);
        }
        inner
            .notifications
            .insert(notification.id, notification.clone());
        Ok(notification)
    }

    async fn get_by_id(&self, id: NotificationId) -> Result<Notification, RepositoryError> {
        self.lock()
            .notifications
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Notification>, RepositoryError> {
        Ok(self
            .lock()
            .notifications
            .values()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_by_user_and_kind(
        &self,
        user_id: UserId,
        kind: NotificationKind,
    ) -> Result<Vec<Notification>, RepositoryError> {
        Ok(self
            .lock()
            .notifications
            .values()
            .filter(|n| n.user_id == user_id && n.kind == kind)
            .cloned()
            .collect())
    }

    async fn list_by_user_and_status(
        &self,
        user_id: UserId,
        status: NotificationStatus,
    ) -> Result<Vec<Notification>, RepositoryError> {
        Ok(self
            .lock()
            .notifications
            .values()
            .filter(|n| n.user_id == user_id && n.status == status)
            .cloned()
            .collect())
    }

    async fn remove(&self, id: NotificationId) -> Result<(), RepositoryError> {
        self.lock()
            .notifications
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

/// 固定时间的时钟，测试中的时间戳可精确断言。
pub struct FixedClock;

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        fixed_time()
    }
}

/// 明文前缀伪哈希，避免测试承担 bcrypt 的开销。
pub struct FakePasswordHasher;

#[async_trait]
impl PasswordHasher for FakePasswordHasher {
    async fn hash(&self, plaintext: &str) -> Result<PasswordHash, PasswordHasherError> {
        PasswordHash::new(format!("hashed:{plaintext}"))
            .map_err(|e| PasswordHasherError::hash_error(e.to_string()))
    }

    async fn verify(
        &self,
        plaintext: &str,
        hashed: &PasswordHash,
    ) -> Result<bool, PasswordHasherError> {
        Ok(hashed.as_str() == format!("hashed:{plaintext}"))
    }
}
