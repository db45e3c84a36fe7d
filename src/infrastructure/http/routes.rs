//! HTTP Routes
//!
//! API Endpoints:
//! - /                      GET     健康检查
//! - /api/generate          POST    图片 → 有声故事（限流）
//! - /api/history           GET     历史列表（id 降序）
//! - /api/history/:id       DELETE  删除历史记录
//! - /history/*             GET     历史音频静态文件

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes(history_dir: &Path) -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::health))
        .nest("/api", api_routes())
        .nest_service("/history", ServeDir::new(history_dir))
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/generate", post(handlers::generate))
        .route("/history", get(handlers::list_history))
        .route("/history/:id", delete(handlers::delete_history))
}
