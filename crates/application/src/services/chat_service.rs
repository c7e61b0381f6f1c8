//! 聊天室服务
//!
//! 创建聊天室的用户在同一事务内成为该聊天室的版主；
//! 删除与重命名要求管理员或版主身份。

use std::sync::Arc;

use domain::{Chat, ChatId, ChatRole, DomainError, Membership, RepositoryError, Requestor, User};
use uuid::Uuid;

use crate::clock::Clock;
use crate::dto::ChatDto;
use crate::errors::ApplicationResult;
use crate::repository::{ChatRepository, MembershipRepository, UserRepository};

pub struct CreateChatRequest {
    pub name: String,
}

pub struct RenameChatRequest {
    pub chat_id: ChatId,
    pub name: String,
}

pub struct ChatServiceDependencies {
    pub user_repository: Arc<dyn UserRepository>,
    pub chat_repository: Arc<dyn ChatRepository>,
    pub membership_repository: Arc<dyn MembershipRepository>,
    pub clock: Arc<dyn Clock>,
}

pub struct ChatService {
    deps: ChatServiceDependencies,
}

impl ChatService {
    pub fn new(deps: ChatServiceDependencies) -> Self {
        Self { deps }
    }

    /// 创建聊天室，创建者同时获得版主成员关系。
    pub async fn create(
        &self,
        requestor: Requestor,
        request: CreateChatRequest,
    ) -> ApplicationResult<ChatDto> {
        let creator = self.get_requestor_user(requestor).await?;
        if creator.is_banned {
            return Err(DomainError::unauthorized("banned users cannot create chats").into());
        }

        let chat = Chat::new(ChatId::from(Uuid::new_v4()), request.name)?;
        let membership = Membership::new(
            creator.id,
            chat.id,
            ChatRole::Moderator,
            self.deps.clock.now(),
        );

        let chat = self
            .deps
            .chat_repository
            .create_with_moderator(chat, membership)
            .await?;

        tracing::info!(chat_id = %chat.id, creator = %creator.id, "聊天室已创建");
        Ok(ChatDto::from(&chat))
    }

    /// 列出所有聊天室，仅限管理员。
    pub async fn list_all(&self, requestor: Requestor) -> ApplicationResult<Vec<ChatDto>> {
        requestor.require_admin("only admins can list all chats")?;
        let chats = self.deps.chat_repository.list().await?;
        Ok(chats.iter().map(ChatDto::from).collect())
    }

    /// 查看单个聊天室，任何已注册用户均可。
    pub async fn get(&self, requestor: Requestor, chat_id: ChatId) -> ApplicationResult<ChatDto> {
        self.get_requestor_user(requestor).await?;
        let chat = self.get_chat(chat_id).await?;
        Ok(ChatDto::from(&chat))
    }

    pub async fn rename(
        &self,
        requestor: Requestor,
        request: RenameChatRequest,
    ) -> ApplicationResult<ChatDto> {
        self.require_moderator(
            requestor,
            request.chat_id,
            "only moderators and admins can rename chat rooms",
        )
        .await?;

        let mut chat = self.get_chat(request.chat_id).await?;
        chat.rename(request.name)?;
        let chat = self.deps.chat_repository.update(chat).await?;

        tracing::info!(chat_id = %chat.id, "聊天室已重命名");
        Ok(ChatDto::from(&chat))
    }

    pub async fn remove(&self, requestor: Requestor, chat_id: ChatId) -> ApplicationResult<()> {
        self.require_moderator(
            requestor,
            chat_id,
            "only moderators and admins can remove chat rooms",
        )
        .await?;

        match self.deps.chat_repository.remove(chat_id).await {
            Ok(()) => {
                tracing::info!(chat_id = %chat_id, "聊天室已删除");
                Ok(())
            }
            Err(RepositoryError::NotFound) => {
                Err(DomainError::not_found("chat", chat_id).into())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// 管理员直接放行；否则请求者必须持有该聊天室的版主成员关系。
    /// 成员关系缺失按资源不存在处理，而非权限不足。
    async fn require_moderator(
        &self,
        requestor: Requestor,
        chat_id: ChatId,
        action: &str,
    ) -> ApplicationResult<()> {
        if requestor.is_admin {
            return Ok(());
        }
        let membership = self
            .deps
            .membership_repository
            .find(requestor.id, chat_id)
            .await?
            .ok_or_else(|| DomainError::not_found("membership", chat_id))?;
        if membership.is_moderator() {
            return Ok(());
        }
        Err(DomainError::unauthorized(action).into())
    }

    async fn get_requestor_user(&self, requestor: Requestor) -> ApplicationResult<User> {
        match self.deps.user_repository.get_by_id(requestor.id).await {
            Ok(user) => Ok(user),
            Err(RepositoryError::NotFound) => {
                Err(DomainError::not_found("user", requestor.id).into())
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn get_chat(&self, chat_id: ChatId) -> ApplicationResult<Chat> {
        match self.deps.chat_repository.get_by_id(chat_id).await {
            Ok(chat) => Ok(chat),
            Err(RepositoryError::NotFound) => Err(DomainError::not_found("chat", chat_id).into()),
            Err(err) => Err(err.into()),
        }
    }
}
