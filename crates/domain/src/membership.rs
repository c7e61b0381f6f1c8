//! 成员关系实体定义
//!
//! Membership 是承载授权的连接边：记录存在即意味着
//! "用户是该聊天室成员"，缺失即不是。每个 (user, chat)
//! 组合至多一条记录。

use serde::{Deserialize, Serialize};

use crate::value_objects::{ChatId, Timestamp, UserId};

/// 聊天室内角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatRole {
    /// 普通成员
    Regular,
    /// 版主：可删除聊天室、移除成员、变更成员角色（仅限本聊天室）
    Moderator,
}

impl Default for ChatRole {
    fn default() -> Self {
        Self::Regular
    }
}

/// 成员关系实体，(user_id, chat_id) 为复合主键。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub user_id: UserId,
    pub chat_id: ChatId,
    pub role: ChatRole,
    pub joined_at: Timestamp,
}

impl Membership {
    pub fn new(user_id: UserId, chat_id: ChatId, role: ChatRole, joined_at: Timestamp) -> Self {
        Self {
            user_id,
            chat_id,
            role,
            joined_at,
        }
    }

    pub fn is_moderator(&self) -> bool {
        self.role == ChatRole::Moderator
    }

    pub fn set_role(&mut self, role: ChatRole) {
        self.role = role;
    }
}
