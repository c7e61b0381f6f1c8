//! 仓储契约
//!
//! 身份存储以这些接口被应用层消费。`get_*` 类方法在记录
//! 缺失时返回 `RepositoryError::NotFound`；`find_*` 类方法
//! 仅用于存在性探测（例如邮箱唯一性、成员关系存在与否），
//! 返回 `Option`。删除对不存在的记录一律返回 `NotFound`。

use async_trait::async_trait;
use domain::{
    Chat, ChatId, ChatRole, MailAddress, Membership, Message, MessageId, Notification,
    NotificationId, NotificationKind, NotificationStatus, RepositoryError, User, UserId,
};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: User) -> Result<User, RepositoryError>;
    async fn update(&self, user: User) -> Result<User, RepositoryError>;
    async fn get_by_id(&self, id: UserId) -> Result<User, RepositoryError>;
    async fn find_by_mail(&self, mail: &MailAddress) -> Result<Option<User>, RepositoryError>;
    async fn exists(&self, id: UserId) -> Result<bool, RepositoryError>;
    async fn list(&self) -> Result<Vec<User>, RepositoryError>;
    async fn remove(&self, id: UserId) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// 创建聊天室并在同一事务内写入创建者的版主成员关系，
    /// 创建者绝不会失去对自己聊天室的管理权。
    async fn create_with_moderator(
        &self,
        chat: Chat,
        moderator: Membership,
    ) -> Result<Chat, RepositoryError>;
    async fn update(&self, chat: Chat) -> Result<Chat, RepositoryError>;
    async fn get_by_id(&self, id: ChatId) -> Result<Chat, RepositoryError>;
    async fn list(&self) -> Result<Vec<Chat>, RepositoryError>;
    async fn remove(&self, id: ChatId) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// 已存在同一 (user, chat) 记录时返回 `Conflict`。
    async fn add(&self, membership: Membership) -> Result<Membership, RepositoryError>;
    async fn get(&self, user_id: UserId, chat_id: ChatId) -> Result<Membership, RepositoryError>;
    async fn find(
        &self,
        user_id: UserId,
        chat_id: ChatId,
    ) -> Result<Option<Membership>, RepositoryError>;
    async fn is_member(&self, user_id: UserId, chat_id: ChatId) -> Result<bool, RepositoryError>;
    async fn update_role(
        &self,
        user_id: UserId,
        chat_id: ChatId,
        role: ChatRole,
    ) -> Result<Membership, RepositoryError>;
    async fn remove(&self, user_id: UserId, chat_id: ChatId) -> Result<(), RepositoryError>;
    async fn list_members_of_chat(
        &self,
        chat_id: ChatId,
    ) -> Result<Vec<Membership>, RepositoryError>;
    async fn list_users_in_chat(&self, chat_id: ChatId) -> Result<Vec<User>, RepositoryError>;
    async fn list_chats_of_user(&self, user_id: UserId) -> Result<Vec<Chat>, RepositoryError>;
}

#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn create(&self, message: Message) -> Result<Message, RepositoryError>;
    async fn update(&self, message: Message) -> Result<Message, RepositoryError>;
    async fn get_by_id(&self, id: MessageId) -> Result<Message, RepositoryError>;
    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Message>, RepositoryError>;
    async fn list_by_chat(&self, chat_id: ChatId) -> Result<Vec<Message>, RepositoryError>;
    async fn remove(&self, id: MessageId) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn create(&self, notification: Notification) -> Result<Notification, RepositoryError>;
    async fn update(&self, notification: Notification) -> Result<Notification, RepositoryError>;
    async fn get_by_id(&self, id: NotificationId) -> Result<Notification, RepositoryError>;
    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Notification>, RepositoryError>;
    async fn list_by_user_and_kind(
        &self,
        user_id: UserId,
        kind: NotificationKind,
    ) -> Result<Vec<Notification>, RepositoryError>;
    async fn list_by_user_and_status(
        &self,
        user_id: UserId,
        status: NotificationStatus,
    ) -> Result<Vec<Notification>, RepositoryError>;
    async fn remove(&self, id: NotificationId) -> Result<(), RepositoryError>;
}
