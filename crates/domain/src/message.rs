//! 消息实体定义

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::{ChatId, MessageId, Timestamp, UserId};

/// 消息实体
///
/// 消息总是引用一个存在的用户（发送者）和聊天室；
/// 发送时发送者必须是该聊天室的成员。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub content: String,
    pub timestamp: Timestamp,
    pub user_id: UserId,
    pub chat_id: ChatId,
}

impl Message {
    pub fn new(
        id: MessageId,
        user_id: UserId,
        chat_id: ChatId,
        content: impl Into<String>,
        timestamp: Timestamp,
    ) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::invalid_argument("content", "cannot be empty"));
        }
        Ok(Self {
            id,
            content,
            timestamp,
            user_id,
            chat_id,
        })
    }

    /// 内容只能由原发送者修改，调用方负责该授权检查。
    pub fn edit_content(&mut self, content: impl Into<String>) -> Result<(), DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::invalid_argument("content", "cannot be empty"));
        }
        self.content = content;
        Ok(())
    }

    pub fn is_sender(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}
