//! API 错误响应。
//!
//! 权限不足映射到 403 而非 401：401 保留给令牌本身缺失或无效。

use application::ApplicationError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::{DomainError, RepositoryError};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                code,
                message: message.into(),
            },
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<ApplicationError> for ApiError {
    fn from(error: ApplicationError) -> Self {
        match &error {
            ApplicationError::Domain(DomainError::InvalidArgument { .. }) => {
                ApiError::new(StatusCode::BAD_REQUEST, "INVALID_ARGUMENT", error.to_string())
            }
            ApplicationError::Domain(DomainError::NotFound { .. })
            | ApplicationError::Repository(RepositoryError::NotFound) => {
                ApiError::new(StatusCode::NOT_FOUND, "NOT_FOUND", error.to_string())
            }
            ApplicationError::Domain(DomainError::Unauthorized { .. }) => {
                ApiError::new(StatusCode::FORBIDDEN, "FORBIDDEN", error.to_string())
            }
            ApplicationError::Repository(RepositoryError::Conflict) => {
                ApiError::new(StatusCode::CONFLICT, "CONFLICT", error.to_string())
            }
            ApplicationError::Repository(RepositoryError::Storage { .. })
            | ApplicationError::Password(_) => {
                tracing::error!(error = %error, "内部错误");
                ApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "internal server error",
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
