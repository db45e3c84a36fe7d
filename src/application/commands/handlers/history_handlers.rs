//! History Command Handlers

use std::sync::Arc;

use crate::application::commands::DeleteHistoryEntry;
use crate::application::error::ApplicationError;
use crate::application::ports::HistoryStorePort;

/// DeleteHistoryEntry Handler
///
/// 幂等：记录不存在同样视为成功
pub struct DeleteHistoryEntryHandler {
    history_store: Arc<dyn HistoryStorePort>,
}

impl DeleteHistoryEntryHandler {
    pub fn new(history_store: Arc<dyn HistoryStorePort>) -> Self {
        Self { history_store }
    }

    pub async fn handle(&self, command: DeleteHistoryEntry) -> Result<(), ApplicationError> {
        self.history_store.delete(command.id).await?;

        tracing::info!(history_id = %command.id, "History entry deleted");

        Ok(())
    }
}
