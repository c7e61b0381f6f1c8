//! 领域错误定义
//!
//! 所有授权判定的失败结果都落在三种终态之一：
//! 参数缺失、资源不存在、权限不足。它们直接映射到 API 边界，
//! 不做重试。

use thiserror::Error;

/// 领域错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// 缺失或非法的必填数据
    #[error("invalid argument {field}: {reason}")]
    InvalidArgument { field: String, reason: String },

    /// 引用的实体不存在
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    /// 实体存在，但调用者缺少所需的角色或身份
    #[error("permission denied: {action}")]
    Unauthorized { action: String },
}

impl DomainError {
    pub fn invalid_argument(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    pub fn unauthorized(action: impl Into<String>) -> Self {
        Self::Unauthorized {
            action: action.into(),
        }
    }
}

/// 领域结果类型
pub type DomainResult<T> = Result<T, DomainError>;

/// 仓储层错误类型
///
/// 仓储的 get 类方法在记录缺失时返回 `NotFound`，
/// 不以 null/None 作为跨层的错误信号。
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,

    #[error("record already exists")]
    Conflict,

    #[error("storage error: {message}")]
    Storage { message: String },
}

impl RepositoryError {
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

/// 仓储结果类型
pub type RepositoryResult<T> = Result<T, RepositoryError>;
