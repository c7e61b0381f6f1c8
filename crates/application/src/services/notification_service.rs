//! 通知服务
//!
//! 通知归属单个用户，读写一律遵循 "本人或管理员" 模式；
//! 为他人创建通知同样只对管理员开放。

use std::sync::Arc;

use domain::{
    DomainError, Notification, NotificationId, NotificationKind, NotificationStatus,
    RepositoryError, Requestor, UserId,
};
use uuid::Uuid;

use crate::dto::NotificationDto;
use crate::errors::ApplicationResult;
use crate::repository::{NotificationRepository, UserRepository};

pub struct CreateNotificationRequest {
    pub user_id: UserId,
    pub content: String,
    pub kind: NotificationKind,
}

pub struct UpdateNotificationRequest {
    pub notification_id: NotificationId,
    pub content: Option<String>,
    pub status: Option<NotificationStatus>,
}

pub struct NotificationServiceDependencies {
    pub user_repository: Arc<dyn UserRepository>,
    pub notification_repository: Arc<dyn NotificationRepository>,
}

pub struct NotificationService {
    deps: NotificationServiceDependencies,
}

impl NotificationService {
    pub fn new(deps: NotificationServiceDependencies) -> Self {
        Self { deps }
    }

    /// 创建通知，初始状态为未读。
    pub async fn create(
        &self,
        requestor: Requestor,
        request: CreateNotificationRequest,
    ) -> ApplicationResult<NotificationDto> {
        requestor
            .require_self_or_admin(request.user_id, "cannot create notifications for other users")?;
        if request.content.trim().is_empty() {
            return Err(DomainError::invalid_argument("content", "cannot be empty").into());
        }
        if !self.deps.user_repository.exists(request.user_id).await? {
            return Err(DomainError::not_found("user", request.user_id).into());
        }

        let notification = Notification::new(
            NotificationId::from(Uuid::new_v4()),
            request.user_id,
            request.content,
            request.kind,
        );
        let notification = self.deps.notification_repository.create(notification).await?;

        tracing::info!(notification_id = %notification.id, user_id = %request.user_id, "通知已创建");
        Ok(NotificationDto::from(&notification))
    }

    pub async fn get(
        &self,
        requestor: Requestor,
        notification_id: NotificationId,
    ) -> ApplicationResult<NotificationDto> {
        let notification = self.get_notification(notification_id).await?;
        requestor
            .require_self_or_admin(notification.user_id, "unauthorized access of notification")?;
        Ok(NotificationDto::from(&notification))
    }

    pub async fn list_by_user(
        &self,
        requestor: Requestor,
        user_id: UserId,
    ) -> ApplicationResult<Vec<NotificationDto>> {
        self.require_owner(requestor, user_id).await?;
        let notifications = self.deps.notification_repository.list_by_user(user_id).await?;
        Ok(notifications.iter().map(NotificationDto::from).collect())
    }

    pub async fn list_by_user_and_kind(
        &self,
        requestor: Requestor,
        user_id: UserId,
        kind: NotificationKind,
    ) -> ApplicationResult<Vec<NotificationDto>> {
        self.require_owner(requestor, user_id).await?;
        let notifications = self
            .deps
            .notification_repository
            .list_by_user_and_kind(user_id, kind)
            .await?;
        Ok(notifications.iter().map(NotificationDto::from).collect())
    }

    pub async fn list_by_user_and_status(
        &self,
        requestor: Requestor,
        user_id: UserId,
        status: NotificationStatus,
    ) -> ApplicationResult<Vec<NotificationDto>> {
        self.require_owner(requestor, user_id).await?;
        let notifications = self
            .deps
            .notification_repository
            .list_by_user_and_status(user_id, status)
            .await?;
        Ok(notifications.iter().map(NotificationDto::from).collect())
    }

    /// 更新通知的内容或状态。
    pub async fn update(
        &self,
        requestor: Requestor,
        request: UpdateNotificationRequest,
    ) -> ApplicationResult<NotificationDto> {
        let mut notification = self.get_notification(request.notification_id).await?;
        requestor
            .require_self_or_admin(notification.user_id, "unauthorized access of notification")?;

        if let Some(content) = request.content {
            if content.trim().is_empty() {
                return Err(DomainError::invalid_argument("content", "cannot be empty").into());
            }
            notification.content = content;
        }
        if let Some(status) = request.status {
            notification.status = status;
        }

        let notification = self.deps.notification_repository.update(notification).await?;
        Ok(NotificationDto::from(&notification))
    }

    /// 将通知标记为已读。
    pub async fn mark_read(
        &self,
        requestor: Requestor,
        notification_id: NotificationId,
    ) -> ApplicationResult<NotificationDto> {
        let mut notification = self.get_notification(notification_id).await?;
        requestor
            .require_self_or_admin(notification.user_id, "unauthorized access of notification")?;
        notification.mark_read();
        let notification = self.deps.notification_repository.update(notification).await?;
        Ok(NotificationDto::from(&notification))
    }

    pub async fn remove(
        &self,
        requestor: Requestor,
        notification_id: NotificationId,
    ) -> ApplicationResult<()> {
        let notification = self.get_notification(notification_id).await?;
        requestor
            .require_self_or_admin(notification.user_id, "unauthorized access of notification")?;

        match self.deps.notification_repository.remove(notification_id).await {
            Ok(()) => Ok(()),
            Err(RepositoryError::NotFound) => {
                Err(DomainError::not_found("notification", notification_id).into())
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn require_owner(&self, requestor: Requestor, user_id: UserId) -> ApplicationResult<()> {
        requestor.require_self_or_admin(user_id, "unauthorized access of notifications")?;
        if !self.deps.user_repository.exists(user_id).await? {
            return Err(DomainError::not_found("user", user_id).into());
        }
        Ok(())
    }

    async fn get_notification(
        &self,
        notification_id: NotificationId,
    ) -> ApplicationResult<Notification> {
        match self
            .deps
            .notification_repository
            .get_by_id(notification_id)
            .await
        {
            Ok(notification) => Ok(notification),
            Err(RepositoryError::NotFound) => {
                Err(DomainError::not_found("notification", notification_id).into())
            }
            Err(err) => Err(err.into()),
        }
    }
}
