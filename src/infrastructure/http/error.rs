//! HTTP Error Handling
//!
//! 错误体统一为 `{"detail": "..."}`。上游与存储错误只记录日志，
//! 返回给客户端的是通用描述。

use axum::{
    extract::{multipart::MultipartError, rejection::PathRejection},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::ApplicationError;

/// 错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    PayloadTooLarge(String),
    TooManyRequests { retry_after_secs: u64 },
    /// 外部模型服务失败，消息仅用于日志
    BadGateway(String),
    /// 本地错误，消息仅用于日志
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::TooManyRequests { .. } => StatusCode::TOO_MANY_REQUESTS,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let detail = match &self {
            ApiError::BadRequest(msg) => {
                tracing::warn!(status = status.as_u16(), error = %msg, "Bad request");
                msg.clone()
            }
            ApiError::PayloadTooLarge(msg) => {
                tracing::warn!(status = status.as_u16(), error = %msg, "Payload too large");
                msg.clone()
            }
            ApiError::TooManyRequests { retry_after_secs } => {
                format!(
                    "Rate limit exceeded. Please wait {} seconds.",
                    retry_after_secs
                )
            }
            ApiError::BadGateway(msg) => {
                tracing::error!(status = status.as_u16(), error = %msg, "Upstream model failure");
                "Story or speech generation failed upstream. Please try again later.".to_string()
            }
            ApiError::Internal(msg) => {
                tracing::error!(status = status.as_u16(), error = %msg, "Internal server error");
                "Internal server error".to_string()
            }
        };

        let mut response = (status, Json(ErrorResponse::new(detail))).into_response();

        if let ApiError::TooManyRequests { retry_after_secs } = self {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(retry_after_secs));
        }

        response
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::RateLimited { retry_after_secs } => {
                ApiError::TooManyRequests { retry_after_secs }
            }
            ApplicationError::ValidationError(msg) => ApiError::BadRequest(msg),
            ApplicationError::UpstreamError(msg) => ApiError::BadGateway(msg),
            ApplicationError::StorageError(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(e.body_text())
        } else {
            ApiError::BadRequest(format!("Failed to read multipart field: {}", e.body_text()))
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(e: PathRejection) -> Self {
        ApiError::BadRequest(format!("Invalid path parameter: {}", e.body_text()))
    }
}
