//! 聊天应用核心领域模型
//!
//! 包含用户、聊天室、成员关系、消息、通知等核心实体，
//! 以及贯穿所有服务的授权判定原语。

pub mod access;
pub mod chat;
pub mod errors;
pub mod membership;
pub mod message;
pub mod notification;
pub mod user;
pub mod value_objects;

pub use access::Requestor;
pub use chat::Chat;
pub use errors::{DomainError, DomainResult, RepositoryError, RepositoryResult};
pub use membership::{ChatRole, Membership};
pub use message::Message;
pub use notification::{Notification, NotificationKind, NotificationStatus};
pub use user::{User, UserRole};
pub use value_objects::{
    ChatId, MailAddress, MessageId, Nickname, NotificationId, PasswordHash, Timestamp, UserId,
};
