//! 消息服务
//!
//! 发送消息要求发送者是目标聊天室的成员；内容只能由
//! 原发送者修改，删除则额外向管理员与该聊天室的版主开放。

use std::sync::Arc;

use domain::{
    ChatId, DomainError, Message, MessageId, RepositoryError, Requestor, UserId,
};
use uuid::Uuid;

use crate::clock::Clock;
use crate::dto::MessageDto;
use crate::errors::ApplicationResult;
use crate::repository::{
    ChatRepository, MembershipRepository, MessageRepository, UserRepository,
};

pub struct SendMessageRequest {
    pub chat_id: ChatId,
    pub content: String,
}

pub struct EditMessageRequest {
    pub message_id: MessageId,
    pub content: String,
}

pub struct MessageServiceDependencies {
    pub user_repository: Arc<dyn UserRepository>,
    pub chat_repository: Arc<dyn ChatRepository>,
    pub membership_repository: Arc<dyn MembershipRepository>,
    pub message_repository: Arc<dyn MessageRepository>,
    pub clock: Arc<dyn Clock>,
}

pub struct MessageService {
    deps: MessageServiceDependencies,
}

impl MessageService {
    pub fn new(deps: MessageServiceDependencies) -> Self {
        Self { deps }
    }

    /// 以请求者本人的身份向聊天室发送消息。
    pub async fn send(
        &self,
        requestor: Requestor,
        request: SendMessageRequest,
    ) -> ApplicationResult<MessageDto> {
        if !self.deps.user_repository.exists(requestor.id).await? {
            return Err(DomainError::not_found("user", requestor.id).into());
        }
        self.require_chat_exists(request.chat_id).await?;
        if !self
            .deps
            .membership_repository
            .is_member(requestor.id, request.chat_id)
            .await?
        {
            return Err(
                DomainError::unauthorized("user must be a member of the chat to send messages")
                    .into(),
            );
        }

        let message = Message::new(
            MessageId::from(Uuid::new_v4()),
            requestor.id,
            request.chat_id,
            request.content,
            self.deps.clock.now(),
        )?;
        let message = self.deps.message_repository.create(message).await?;

        tracing::info!(message_id = %message.id, chat_id = %message.chat_id, "消息已发送");
        Ok(MessageDto::from(&message))
    }

    /// 读取单条消息，仅限发送者本人或管理员。
    pub async fn get(
        &self,
        requestor: Requestor,
        message_id: MessageId,
    ) -> ApplicationResult<MessageDto> {
        let message = self.get_message(message_id).await?;
        requestor.require_self_or_admin(message.user_id, "unauthorized access of message")?;
        Ok(MessageDto::from(&message))
    }

    /// 列出用户发送过的全部消息，仅限本人或管理员。
    pub async fn list_by_user(
        &self,
        requestor: Requestor,
        user_id: UserId,
    ) -> ApplicationResult<Vec<MessageDto>> {
        requestor.require_self_or_admin(user_id, "unauthorized access of user's messages")?;
        if !self.deps.user_repository.exists(user_id).await? {
            return Err(DomainError::not_found("user", user_id).into());
        }
        let messages = self.deps.message_repository.list_by_user(user_id).await?;
        Ok(messages.iter().map(MessageDto::from).collect())
    }

    /// 列出聊天室内的全部消息，要求管理员或该聊天室的成员。
    pub async fn list_by_chat(
        &self,
        requestor: Requestor,
        chat_id: ChatId,
    ) -> ApplicationResult<Vec<MessageDto>> {
        self.require_chat_exists(chat_id).await?;
        if !requestor.is_admin
            && !self
                .deps
                .membership_repository
                .is_member(requestor.id, chat_id)
                .await?
        {
            return Err(DomainError::unauthorized("unauthorized access of chat messages").into());
        }
        let messages = self.deps.message_repository.list_by_chat(chat_id).await?;
        Ok(messages.iter().map(MessageDto::from).collect())
    }

    /// 修改消息内容。只有原发送者可以修改，管理员与版主也不行。
    pub async fn update(
        &self,
        requestor: Requestor,
        request: EditMessageRequest,
    ) -> ApplicationResult<MessageDto> {
        let mut message = self.get_message(request.message_id).await?;
        if !message.is_sender(requestor.id) {
            return Err(
                DomainError::unauthorized("only the sender can edit message content").into(),
            );
        }
        message.edit_content(request.content)?;
        let message = self.deps.message_repository.update(message).await?;

        tracing::info!(message_id = %message.id, "消息内容已修改");
        Ok(MessageDto::from(&message))
    }

    /// 删除消息：发送者本人、管理员、或消息所在聊天室的版主。
    pub async fn remove(
        &self,
        requestor: Requestor,
        message_id: MessageId,
    ) -> ApplicationResult<()> {
        let message = self.get_message(message_id).await?;

        let allowed = if requestor.is_self_or_admin(message.user_id) {
            true
        } else {
            self.deps
                .membership_repository
                .find(requestor.id, message.chat_id)
                .await?
                .is_some_and(|m| m.is_moderator())
        };
        if !allowed {
            return Err(DomainError::unauthorized("not allowed to remove this message").into());
        }

        match self.deps.message_repository.remove(message_id).await {
            Ok(()) => {
                tracing::info!(message_id = %message_id, "消息已删除");
                Ok(())
            }
            Err(RepositoryError::NotFound) => {
                Err(DomainError::not_found("message", message_id).into())
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn require_chat_exists(&self, chat_id: ChatId) -> ApplicationResult<()> {
        match self.deps.chat_repository.get_by_id(chat_id).await {
            Ok(_) => Ok(()),
            Err(RepositoryError::NotFound) => Err(DomainError::not_found("chat", chat_id).into()),
            Err(err) => Err(err.into()),
        }
    }

    async fn get_message(&self, message_id: MessageId) -> ApplicationResult<Message> {
        match self.deps.message_repository.get_by_id(message_id).await {
            Ok(message) => Ok(message),
            Err(RepositoryError::NotFound) => {
                Err(DomainError::not_found("message", message_id).into())
            }
            Err(err) => Err(err.into()),
        }
    }
}
