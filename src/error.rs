//! 统一错误模型
//! 定义所有错误类型和错误响应格式

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;

/// 结果类型别名
pub type Result<T> = std::result::Result<T, AppError>;

/// 缺少必填字段时返回的消息
pub const FIELDS_REQUIRED: &str = "All fields are required";

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("User already registered with this email")]
    Conflict,

    /// 未知邮箱与密码错误共用此变体，避免暴露账户是否存在
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("No token provided")]
    MissingToken,

    /// 签名错误、格式错误、过期统一为此变体
    #[error("Invalid token")]
    InvalidToken,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    /// 基础设施错误，附带所属操作的对外消息
    #[error("{message}: {source}")]
    Unexpected {
        message: &'static str,
        #[source]
        source: Box<AppError>,
    },
}

impl AppError {
    /// 获取 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Conflict => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::MissingToken | AppError::InvalidToken => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Database(_)
            | AppError::Config(_)
            | AppError::Internal(_)
            | AppError::Unexpected { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 获取用户友好的错误消息（不包含敏感信息）
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Conflict => "User already registered with this email".to_string(),
            AppError::InvalidCredentials => "Invalid credentials".to_string(),
            AppError::MissingToken => "No token provided".to_string(),
            AppError::InvalidToken => "Invalid token".to_string(),
            AppError::Unexpected { message, .. } => (*message).to_string(),
            AppError::Database(_) | AppError::Config(_) | AppError::Internal(_) => {
                "Internal server error".to_string()
            }
        }
    }

    /// 获取错误码
    pub fn code(&self) -> u16 {
        self.status_code().as_u16()
    }

    /// 是否为基础设施类错误（500）
    pub fn is_unexpected(&self) -> bool {
        self.status_code() == StatusCode::INTERNAL_SERVER_ERROR
    }

    /// 为基础设施错误附加操作级别的对外消息，其他错误原样返回
    pub fn or_unexpected(self, message: &'static str) -> Self {
        match self {
            AppError::Unexpected { source, .. } => AppError::Unexpected { message, source },
            e if e.is_unexpected() => AppError::Unexpected {
                message,
                source: Box::new(e),
            },
            e => e,
        }
    }

    // 便捷方法
    pub fn validation(msg: &str) -> Self {
        AppError::Validation(msg.to_string())
    }

    pub fn internal_error(msg: &str) -> Self {
        AppError::Internal(msg.to_string())
    }
}

/// 错误响应 DTO
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 内部细节只写入日志
        if self.is_unexpected() {
            tracing::error!(code = self.code(), error = %self, "Request failed");
        } else {
            tracing::debug!(code = self.code(), error = %self, "Request rejected");
        }

        let body = ErrorResponse {
            message: self.user_message(),
        };

        (status, Json(body)).into_response()
    }
}

/// 从 config::ConfigError 转换
impl From<config::ConfigError> for AppError {
    fn from(e: config::ConfigError) -> Self {
        AppError::Config(e.to_string())
    }
}
