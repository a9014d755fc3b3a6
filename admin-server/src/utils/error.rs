//! 统一错误处理
//!
//! 提供应用级错误类型：[`AppError`]
//!
//! # 错误码规范
//!
//! | 错误码 | 分类 | HTTP |
//! |--------|------|------|
//! | E0001 | 数据库错误 | 500 |
//! | E0002 | 验证失败 | 400 |
//! | E0003 | 资源不存在 | 404 |
//! | E0006 | 上传失败 | 502 |
//! | E0007 | 无效请求 | 400 |
//! | E0008 | 内部错误 | 500 |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shared::ApiResponse;
use tracing::error;

/// 应用错误枚举
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Resource not found: {0}")]
    /// 资源不存在 (404)
    NotFound(String),

    #[error("Validation failed: {0}")]
    /// 验证失败 (400)
    Validation(String),

    #[error("Upload failed: {0}")]
    /// 媒体上传失败 (502)
    Upload(String),

    #[error("Database error: {0}")]
    /// 数据库错误 (500)
    Database(String),

    #[error("Invalid request: {0}")]
    /// 无效请求 (400)
    Invalid(String),

    #[error("Internal server error: {0}")]
    /// 内部错误 (500)
    Internal(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn upload(msg: impl Into<String>) -> Self {
        AppError::Upload(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        AppError::Database(msg.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        AppError::Invalid(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "E0003", msg.as_str()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "E0002", msg.as_str()),
            AppError::Upload(msg) => (StatusCode::BAD_GATEWAY, "E0006", msg.as_str()),
            AppError::Database(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "E0001", msg.as_str()),
            AppError::Invalid(msg) => (StatusCode::BAD_REQUEST, "E0007", msg.as_str()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "E0008", msg.as_str()),
        };

        if status.is_server_error() {
            error!(code, message, "Request failed");
        }

        let body: ApiResponse<()> = ApiResponse::error(code, message);
        (status, Json(body)).into_response()
    }
}

impl From<crate::db::repository::RepoError> for AppError {
    fn from(err: crate::db::repository::RepoError) -> Self {
        use crate::db::repository::RepoError;
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl From<crate::ingest::IngestError> for AppError {
    fn from(err: crate::ingest::IngestError) -> Self {
        use crate::ingest::IngestError;
        match err {
            IngestError::Validation(issues) => AppError::Validation(issues.join("; ")),
            IngestError::Upload(e) => AppError::Upload(e.to_string()),
            IngestError::Persistence(msg) | IngestError::Deletion(msg) => AppError::Database(msg),
            IngestError::Stage(e) => AppError::Validation(e.to_string()),
        }
    }
}

impl From<crate::ingest::StageError> for AppError {
    fn from(err: crate::ingest::StageError) -> Self {
        use crate::ingest::StageError;
        match err {
            StageError::NoSuchAsset(index) => {
                AppError::NotFound(format!("No staged asset at index {index}"))
            }
            StageError::Preview(msg) => AppError::Internal(msg),
            other => AppError::Validation(other.to_string()),
        }
    }
}

impl From<axum::extract::multipart::MultipartError> for AppError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        AppError::Invalid(format!("Invalid multipart request: {err}"))
    }
}
