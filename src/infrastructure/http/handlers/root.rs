//! Root Handler
//!
//! 健康检查

use axum::Json;

use crate::infrastructure::http::dto::HealthResponse;

/// GET / - 健康检查
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "Image-to-Speech GenAI API is running",
        version: env!("CARGO_PKG_VERSION"),
    })
}
