//! History HTTP Handlers

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use std::sync::Arc;

use crate::application::{DeleteHistoryEntry, ListHistory};
use crate::domain::history::{HistoryEntry, HistoryId};
use crate::infrastructure::http::dto::StatusResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// GET /api/history - 按 id 降序列出
pub async fn list_history(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<HistoryEntry>>, ApiError> {
    let entries = state.list_history_handler.handle(ListHistory).await?;
    Ok(Json(entries))
}

/// DELETE /api/history/:id - 幂等删除
pub async fn delete_history(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<StatusResponse>, ApiError> {
    let Path(id) = id?;
    let command = DeleteHistoryEntry {
        id: HistoryId::new(id),
    };
    state.delete_history_handler.handle(command).await?;

    Ok(Json(StatusResponse::success()))
}
