//! 通知实体定义

use serde::{Deserialize, Serialize};

use crate::value_objects::{NotificationId, UserId};

/// 通知类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    Message,
    Invite,
    Alert,
}

/// 通知状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationStatus {
    Unread,
    Read,
    Archived,
}

/// 通知实体，归属于单个用户。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub content: String,
    pub kind: NotificationKind,
    pub status: NotificationStatus,
    pub user_id: UserId,
}

impl Notification {
    pub fn new(
        id: NotificationId,
        user_id: UserId,
        content: impl Into<String>,
        kind: NotificationKind,
    ) -> Self {
        Self {
            id,
            content: content.into(),
            kind,
            status: NotificationStatus::Unread,
            user_id,
        }
    }

    pub fn mark_read(&mut self) {
        self.status = NotificationStatus::Read;
    }
}
