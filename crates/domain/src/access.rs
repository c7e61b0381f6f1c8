//! 授权判定原语
//!
//! 请求者身份从认证令牌中提取后，以显式参数的形式贯穿
//! 每一次服务调用，绝不从环境/线程局部状态读取。
//! 管理员分支与 "本人" 分支总是作为独立的 OR 条件短路，
//! 二者从不同时要求。

use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};
use crate::membership::Membership;
use crate::value_objects::UserId;

/// 发起请求的已认证身份。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requestor {
    pub id: UserId,
    pub is_admin: bool,
}

impl Requestor {
    pub fn new(id: UserId, is_admin: bool) -> Self {
        Self { id, is_admin }
    }

    /// 请求者是否就是目标用户本人。
    pub fn is_self(&self, target: UserId) -> bool {
        self.id == target
    }

    /// 本人或管理员：User / Message 所有权检查的通用模式。
    pub fn is_self_or_admin(&self, target: UserId) -> bool {
        self.is_admin || self.is_self(target)
    }

    /// 要求本人或管理员，否则以给定动作描述拒绝。
    pub fn require_self_or_admin(&self, target: UserId, action: &str) -> DomainResult<()> {
        if self.is_self_or_admin(target) {
            return Ok(());
        }
        Err(DomainError::unauthorized(action))
    }

    /// 要求管理员，否则以给定动作描述拒绝。
    pub fn require_admin(&self, action: &str) -> DomainResult<()> {
        if self.is_admin {
            return Ok(());
        }
        Err(DomainError::unauthorized(action))
    }

    /// 管理员或给定成员关系是版主。
    ///
    /// 用于删除/重命名聊天室、变更成员角色等版主级操作，
    /// 成员关系为调用方已取出的 *请求者本人* 的记录。
    pub fn is_admin_or_moderator(&self, membership: &Membership) -> bool {
        self.is_admin || membership.is_moderator()
    }
}
