//! 用户实体定义

use serde::{Deserialize, Serialize};

use crate::value_objects::{MailAddress, Nickname, PasswordHash, Timestamp, UserId};

/// 全局用户角色
///
/// `Administrator` 绕过所有基于聊天室成员关系的角色检查。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Regular,
    Administrator,
}

impl Default for UserRole {
    fn default() -> Self {
        Self::Regular
    }
}

/// 用户实体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub nickname: Nickname,
    pub mail_address: MailAddress,
    /// 密码字段不暴露给客户端
    #[serde(skip_serializing)]
    pub password: PasswordHash,
    pub join_date: Timestamp,
    pub is_banned: bool,
    pub role: UserRole,
}

impl User {
    /// 注册新用户：加入时间取当前时刻，未封禁，普通角色。
    pub fn register(
        id: UserId,
        nickname: Nickname,
        mail_address: MailAddress,
        password: PasswordHash,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            nickname,
            mail_address,
            password,
            join_date: now,
            is_banned: false,
            role: UserRole::Regular,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Administrator
    }

    pub fn set_nickname(&mut self, nickname: Nickname) {
        self.nickname = nickname;
    }

    pub fn set_mail_address(&mut self, mail_address: MailAddress) {
        self.mail_address = mail_address;
    }

    pub fn set_password(&mut self, password: PasswordHash) {
        self.password = password;
    }

    pub fn set_banned(&mut self, banned: bool) {
        self.is_banned = banned;
    }
}
