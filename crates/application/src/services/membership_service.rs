//! 成员关系服务
//!
//! 加入聊天室只能由本人发起；移除成员允许本人退出、
//! 管理员移除、或同一聊天室的版主踢人。角色变更要求
//! 请求者自身先持有该聊天室的成员关系。

use std::sync::Arc;

use domain::{
    Chat, ChatId, ChatRole, DomainError, Membership, RepositoryError, Requestor, UserId,
};

use crate::clock::Clock;
use crate::dto::{ChatDto, MembershipDto, UserDto};
use crate::errors::ApplicationResult;
use crate::repository::{ChatRepository, MembershipRepository, UserRepository};

pub struct JoinChatRequest {
    pub user_id: UserId,
    pub chat_id: ChatId,
}

pub struct RemoveMembershipRequest {
    pub user_id: UserId,
    pub chat_id: ChatId,
}

pub struct ChangeRoleRequest {
    pub user_id: UserId,
    pub chat_id: ChatId,
    pub role: ChatRole,
}

pub struct MembershipServiceDependencies {
    pub user_repository: Arc<dyn UserRepository>,
    pub chat_repository: Arc<dyn ChatRepository>,
    pub membership_repository: Arc<dyn MembershipRepository>,
    pub clock: Arc<dyn Clock>,
}

pub struct MembershipService {
    deps: MembershipServiceDependencies,
}

impl MembershipService {
    pub fn new(deps: MembershipServiceDependencies) -> Self {
        Self { deps }
    }

    /// 以普通成员身份加入聊天室。只能为自己加入，管理员也不能代为加入。
    pub async fn join(
        &self,
        requestor: Requestor,
        request: JoinChatRequest,
    ) -> ApplicationResult<MembershipDto> {
        if !requestor.is_self(request.user_id) {
            return Err(
                DomainError::unauthorized("users can only join chats as themselves").into(),
            );
        }
        self.require_user_exists(request.user_id).await?;
        self.get_chat(request.chat_id).await?;

        let membership = Membership::new(
            request.user_id,
            request.chat_id,
            ChatRole::Regular,
            self.deps.clock.now(),
        );
        let membership = match self.deps.membership_repository.add(membership).await {
            Ok(membership) => membership,
            Err(RepositoryError::Conflict) => {
                return Err(DomainError::invalid_argument(
                    "membership",
                    "user is already a member of this chat",
                )
                .into())
            }
            Err(err) => return Err(err.into()),
        };

        tracing::info!(user_id = %request.user_id, chat_id = %request.chat_id, "用户已加入聊天室");
        Ok(MembershipDto::from(&membership))
    }

    /// 移除成员关系：本人退出、管理员移除、或同聊天室版主踢出。
    /// 目标成员关系不存在时先返回资源不存在，再谈权限。
    pub async fn remove(
        &self,
        requestor: Requestor,
        request: RemoveMembershipRequest,
    ) -> ApplicationResult<()> {
        self.get_membership(request.user_id, request.chat_id).await?;

        if !self.can_remove(requestor, request.user_id, request.chat_id).await? {
            return Err(
                DomainError::unauthorized("not allowed to remove this chat member").into(),
            );
        }

        match self
            .deps
            .membership_repository
            .remove(request.user_id, request.chat_id)
            .await
        {
            Ok(()) => {
                tracing::info!(user_id = %request.user_id, chat_id = %request.chat_id, "成员已移出聊天室");
                Ok(())
            }
            Err(RepositoryError::NotFound) => {
                Err(DomainError::not_found("membership", request.chat_id).into())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// 变更成员在聊天室内的角色，要求管理员或该聊天室的版主。
    pub async fn change_role(
        &self,
        requestor: Requestor,
        request: ChangeRoleRequest,
    ) -> ApplicationResult<MembershipDto> {
        if !requestor.is_admin {
            let own = self
                .deps
                .membership_repository
                .find(requestor.id, request.chat_id)
                .await?
                .ok_or_else(|| DomainError::not_found("membership", request.chat_id))?;
            if !own.is_moderator() {
                return Err(DomainError::unauthorized(
                    "only moderators and admins can change member roles",
                )
                .into());
            }
        }

        self.get_membership(request.user_id, request.chat_id).await?;
        let membership = self
            .deps
            .membership_repository
            .update_role(request.user_id, request.chat_id, request.role)
            .await?;

        tracing::info!(
            user_id = %request.user_id,
            chat_id = %request.chat_id,
            role = ?request.role,
            "成员角色已变更"
        );
        Ok(MembershipDto::from(&membership))
    }

    /// 列出聊天室的全部用户，要求管理员或该聊天室的成员。
    pub async fn list_users_in_chat(
        &self,
        requestor: Requestor,
        chat_id: ChatId,
    ) -> ApplicationResult<Vec<UserDto>> {
        self.require_member_or_admin(requestor, chat_id).await?;
        let users = self
            .deps
            .membership_repository
            .list_users_in_chat(chat_id)
            .await?;
        Ok(users.iter().map(UserDto::from).collect())
    }

    /// 列出聊天室的全部成员关系（含角色），访问规则与用户列表一致。
    pub async fn list_members_of_chat(
        &self,
        requestor: Requestor,
        chat_id: ChatId,
    ) -> ApplicationResult<Vec<MembershipDto>> {
        self.require_member_or_admin(requestor, chat_id).await?;
        let members = self
            .deps
            .membership_repository
            .list_members_of_chat(chat_id)
            .await?;
        Ok(members.iter().map(MembershipDto::from).collect())
    }

    /// 列出用户加入的全部聊天室，仅限本人或管理员。
    pub async fn list_chats_of_user(
        &self,
        requestor: Requestor,
        user_id: UserId,
    ) -> ApplicationResult<Vec<ChatDto>> {
        requestor.require_self_or_admin(user_id, "unauthorized call of get all user's chats")?;
        self.require_user_exists(user_id).await?;
        let chats = self
            .deps
            .membership_repository
            .list_chats_of_user(user_id)
            .await?;
        Ok(chats.iter().map(ChatDto::from).collect())
    }

    pub async fn get(
        &self,
        requestor: Requestor,
        user_id: UserId,
        chat_id: ChatId,
    ) -> ApplicationResult<MembershipDto> {
        self.require_member_or_admin(requestor, chat_id).await?;
        let membership = self.get_membership(user_id, chat_id).await?;
        Ok(MembershipDto::from(&membership))
    }

    async fn can_remove(
        &self,
        requestor: Requestor,
        target: UserId,
        chat_id: ChatId,
    ) -> ApplicationResult<bool> {
        if requestor.is_self_or_admin(target) {
            return Ok(true);
        }
        let own = self
            .deps
            .membership_repository
            .find(requestor.id, chat_id)
            .await?;
        Ok(own.is_some_and(|m| m.is_moderator()))
    }

    async fn require_member_or_admin(
        &self,
        requestor: Requestor,
        chat_id: ChatId,
    ) -> ApplicationResult<()> {
        self.get_chat(chat_id).await?;
        if requestor.is_admin {
            return Ok(());
        }
        if self
            .deps
            .membership_repository
            .is_member(requestor.id, chat_id)
            .await?
        {
            return Ok(());
        }
        Err(DomainError::unauthorized("unauthorized call of get all users in chat").into())
    }

    async fn require_user_exists(&self, user_id: UserId) -> ApplicationResult<()> {
        if self.deps.user_repository.exists(user_id).await? {
            return Ok(());
        }
        Err(DomainError::not_found("user", user_id).into())
    }

    async fn get_chat(&self, chat_id: ChatId) -> ApplicationResult<Chat> {
        match self.deps.chat_repository.get_by_id(chat_id).await {
            Ok(chat) => Ok(chat),
            Err(RepositoryError::NotFound) => Err(DomainError::not_found("chat", chat_id).into()),
            Err(err) => Err(err.into()),
        }
    }

    async fn get_membership(
        &self,
        user_id: UserId,
        chat_id: ChatId,
    ) -> ApplicationResult<Membership> {
        match self.deps.membership_repository.get(user_id, chat_id).await {
            Ok(membership) => Ok(membership),
            Err(RepositoryError::NotFound) => {
                Err(DomainError::not_found("membership", chat_id).into())
            }
            Err(err) => Err(err.into()),
        }
    }
}
