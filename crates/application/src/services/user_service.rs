//! 用户服务
//!
//! 注册与登录对外开放；其余读写一律遵循 "本人或管理员" 模式。
//! 邮箱与密码的修改要求携带当前密码以二次确认。

use std::sync::Arc;

use domain::{
    DomainError, MailAddress, Nickname, RepositoryError, Requestor, User, UserId,
};
use uuid::Uuid;

use crate::clock::Clock;
use crate::dto::UserDto;
use crate::errors::ApplicationResult;
use crate::password::PasswordHasher;
use crate::repository::UserRepository;

pub struct RegisterUserRequest {
    pub nickname: String,
    pub mail_address: String,
    pub password: String,
}

pub struct AuthenticateRequest {
    pub mail_address: String,
    pub password: String,
}

/// 常规资料更新。封禁状态仅对管理员生效，本人请求中会被忽略。
pub struct UpdateUserRequest {
    pub nickname: Option<String>,
    pub is_banned: Option<bool>,
}

pub struct UpdateMailRequest {
    pub mail_address: String,
    pub current_password: String,
}

pub struct UpdatePasswordRequest {
    pub new_password: String,
    pub current_password: String,
}

pub struct UserServiceDependencies {
    pub user_repository: Arc<dyn UserRepository>,
    pub password_hasher: Arc<dyn PasswordHasher>,
    pub clock: Arc<dyn Clock>,
}

pub struct UserService {
    deps: UserServiceDependencies,
}

impl UserService {
    pub fn new(deps: UserServiceDependencies) -> Self {
        Self { deps }
    }

    /// 注册新用户。邮箱全局唯一。
    pub async fn register(&self, request: RegisterUserRequest) -> ApplicationResult<UserDto> {
        if request.password.trim().is_empty() {
            return Err(DomainError::invalid_argument("password", "cannot be empty").into());
        }
        let nickname = Nickname::parse(request.nickname)?;
        let mail_address = MailAddress::parse(request.mail_address)?;

        if self
            .deps
            .user_repository
            .find_by_mail(&mail_address)
            .await?
            .is_some()
        {
            return Err(DomainError::invalid_argument(
                "mail_address",
                "an account with this mail address already exists",
            )
            .into());
        }

        let password = self.deps.password_hasher.hash(&request.password).await?;
        let user = User::register(
            UserId::from(Uuid::new_v4()),
            nickname,
            mail_address,
            password,
            self.deps.clock.now(),
        );
        let user = self.deps.user_repository.create(user).await?;

        tracing::info!(user_id = %user.id, "用户注册成功");
        Ok(UserDto::from(&user))
    }

    /// 校验邮箱与密码，成功时返回用户资料供令牌签发使用。
    pub async fn authenticate(&self, request: AuthenticateRequest) -> ApplicationResult<UserDto> {
        if request.password.trim().is_empty() {
            return Err(DomainError::invalid_argument("password", "cannot be empty").into());
        }
        let mail_address = MailAddress::parse(request.mail_address)?;

        let user = self
            .deps
            .user_repository
            .find_by_mail(&mail_address)
            .await?
            .ok_or_else(|| DomainError::not_found("user", mail_address.as_str()))?;

        let verified = self
            .deps
            .password_hasher
            .verify(&request.password, &user.password)
            .await?;
        if !verified {
            return Err(DomainError::unauthorized("wrong password").into());
        }

        tracing::info!(user_id = %user.id, "用户登录成功");
        Ok(UserDto::from(&user))
    }

    /// 列出全部用户，仅限管理员。
    pub async fn list_all(&self, requestor: Requestor) -> ApplicationResult<Vec<UserDto>> {
        requestor.require_admin("only admins can list all users")?;
        let users = self.deps.user_repository.list().await?;
        Ok(users.iter().map(UserDto::from).collect())
    }

    /// 读取用户资料，仅限本人或管理员。
    pub async fn get(&self, requestor: Requestor, user_id: UserId) -> ApplicationResult<UserDto> {
        requestor.require_self_or_admin(user_id, "users cannot read other user profiles")?;
        let user = self.get_user(user_id).await?;
        Ok(UserDto::from(&user))
    }

    /// 更新昵称与封禁状态。封禁位仅管理员可以改动。
    pub async fn update(
        &self,
        requestor: Requestor,
        user_id: UserId,
        request: UpdateUserRequest,
    ) -> ApplicationResult<UserDto> {
        requestor.require_self_or_admin(user_id, "users cannot update other user profiles")?;
        let mut user = self.get_user(user_id).await?;

        if let Some(nickname) = request.nickname {
            user.set_nickname(Nickname::parse(nickname)?);
        }
        if let Some(banned) = request.is_banned {
            requestor.require_admin("only admins can ban or unban users")?;
            user.set_banned(banned);
        }

        let user = self.deps.user_repository.update(user).await?;
        tracing::info!(user_id = %user.id, "用户资料已更新");
        Ok(UserDto::from(&user))
    }

    /// 更换邮箱，要求携带当前密码并保持邮箱全局唯一。
    pub async fn update_mail(
        &self,
        requestor: Requestor,
        user_id: UserId,
        request: UpdateMailRequest,
    ) -> ApplicationResult<UserDto> {
        requestor.require_self_or_admin(user_id, "users cannot update other user profiles")?;
        let mut user = self.get_user(user_id).await?;

        let verified = self
            .deps
            .password_hasher
            .verify(&request.current_password, &user.password)
            .await?;
        if !verified {
            return Err(DomainError::unauthorized("wrong password").into());
        }

        let mail_address = MailAddress::parse(request.mail_address)?;
        if let Some(holder) = self.deps.user_repository.find_by_mail(&mail_address).await? {
            if holder.id != user.id {
                return Err(DomainError::invalid_argument(
                    "mail_address",
                    "an account with this mail address already exists",
                )
                .into());
            }
        }

        user.set_mail_address(mail_address);
        let user = self.deps.user_repository.update(user).await?;
        tracing::info!(user_id = %user.id, "用户邮箱已更换");
        Ok(UserDto::from(&user))
    }

    /// 更换密码，要求携带当前密码，且新密码不得与当前密码相同。
    pub async fn update_password(
        &self,
        requestor: Requestor,
        user_id: UserId,
        request: UpdatePasswordRequest,
    ) -> ApplicationResult<UserDto> {
        requestor.require_self_or_admin(user_id, "users cannot update other user profiles")?;
        if request.new_password.trim().is_empty() {
            return Err(DomainError::invalid_argument("password", "cannot be empty").into());
        }
        let mut user = self.get_user(user_id).await?;

        let verified = self
            .deps
            .password_hasher
            .verify(&request.current_password, &user.password)
            .await?;
        if !verified {
            return Err(DomainError::unauthorized("wrong password").into());
        }
        if request.new_password == request.current_password {
            return Err(DomainError::invalid_argument(
                "password",
                "new password cannot be the same as the old password",
            )
            .into());
        }

        let password = self.deps.password_hasher.hash(&request.new_password).await?;
        user.set_password(password);
        let user = self.deps.user_repository.update(user).await?;
        tracing::info!(user_id = %user.id, "用户密码已更换");
        Ok(UserDto::from(&user))
    }

    /// 删除用户，仅限本人或管理员。用户不存在时返回资源不存在。
    pub async fn remove(&self, requestor: Requestor, user_id: UserId) -> ApplicationResult<()> {
        requestor.require_self_or_admin(user_id, "users cannot delete other users")?;
        match self.deps.user_repository.remove(user_id).await {
            Ok(()) => {
                tracing::info!(user_id = %user_id, "用户已删除");
                Ok(())
            }
            Err(RepositoryError::NotFound) => Err(DomainError::not_found("user", user_id).into()),
            Err(err) => Err(err.into()),
        }
    }

    async fn get_user(&self, user_id: UserId) -> ApplicationResult<User> {
        match self.deps.user_repository.get_by_id(user_id).await {
            Ok(user) => Ok(user),
            Err(RepositoryError::NotFound) => Err(DomainError::not_found("user", user_id).into()),
            Err(err) => Err(err.into()),
        }
    }
}
