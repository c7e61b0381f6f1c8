//! 应用层错误定义

use domain::{DomainError, RepositoryError};
use thiserror::Error;

use crate::password::PasswordHasherError;

/// 应用层错误类型
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 领域错误（参数缺失 / 资源不存在 / 权限不足）
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// 仓储层错误
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// 密码哈希错误
    #[error("password error: {0}")]
    Password(#[from] PasswordHasherError),
}

/// 应用层结果类型
pub type ApplicationResult<T> = Result<T, ApplicationError>;

impl ApplicationError {
    /// 访问的是领域层 `NotFound` 或仓储层 `NotFound` 之一。
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Domain(DomainError::NotFound { .. }) | Self::Repository(RepositoryError::NotFound)
        )
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Domain(DomainError::Unauthorized { .. }))
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::Domain(DomainError::InvalidArgument { .. }))
    }
}
