//! HTTP Middleware
//!
//! 按状态码记录错误请求日志

use axum::{
    extract::{ConnectInfo, Request},
    middleware::Next,
    response::Response,
};
use std::net::SocketAddr;
use std::time::Instant;

/// HTTP 错误日志中间件
///
/// 4xx 记 warn，5xx 记 error，附带客户端地址和耗时。
/// 错误详情在 `ApiError::into_response()` 中记录。
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            client = %client,
            status = status.as_u16(),
            elapsed_ms = elapsed_ms,
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            client = %client,
            status = status.as_u16(),
            elapsed_ms = elapsed_ms,
            "HTTP client error"
        );
    }

    response
}
