use domain::{
    Chat, ChatRole, Membership, Message, Notification, NotificationKind, NotificationStatus,
    Timestamp, User, UserRole,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: Uuid,
    pub nickname: String,
    pub mail_address: String,
    pub join_date: Timestamp,
    pub is_banned: bool,
    pub role: UserRole,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: Uuid::from(user.id),
            nickname: user.nickname.as_str().to_owned(),
            mail_address: user.mail_address.as_str().to_owned(),
            join_date: user.join_date,
            is_banned: user.is_banned,
            role: user.role,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatDto {
    pub id: Uuid,
    pub name: String,
}

impl From<&Chat> for ChatDto {
    fn from(chat: &Chat) -> Self {
        Self {
            id: Uuid::from(chat.id),
            name: chat.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipDto {
    pub user_id: Uuid,
    pub chat_id: Uuid,
    pub role: ChatRole,
    pub joined_at: Timestamp,
}

impl From<&Membership> for MembershipDto {
    fn from(membership: &Membership) -> Self {
        Self {
            user_id: Uuid::from(membership.user_id),
            chat_id: Uuid::from(membership.chat_id),
            role: membership.role,
            joined_at: membership.joined_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDto {
    pub id: Uuid,
    pub content: String,
    pub timestamp: Timestamp,
    pub user_id: Uuid,
    pub chat_id: Uuid,
}

impl From<&Message> for MessageDto {
    fn from(message: &Message) -> Self {
        Self {
            id: Uuid::from(message.id),
            content: message.content.clone(),
            timestamp: message.timestamp,
            user_id: Uuid::from(message.user_id),
            chat_id: Uuid::from(message.chat_id),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationDto {
    pub id: Uuid,
    pub content: String,
    pub kind: NotificationKind,
    pub status: NotificationStatus,
    pub user_id: Uuid,
}

impl From<&Notification> for NotificationDto {
    fn from(notification: &Notification) -> Self {
        Self {
            id: Uuid::from(notification.id),
            content: notification.content.clone(),
            kind: notification.kind,
            status: notification.status,
            user_id: Uuid::from(notification.user_id),
        }
    }
}
