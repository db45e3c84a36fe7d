//! History Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::HistoryStorePort;
use crate::application::queries::ListHistory;
use crate::domain::history::HistoryEntry;

/// ListHistory Handler
pub struct ListHistoryHandler {
    history_store: Arc<dyn HistoryStorePort>,
}

impl ListHistoryHandler {
    pub fn new(history_store: Arc<dyn HistoryStorePort>) -> Self {
        Self { history_store }
    }

    pub async fn handle(&self, _query: ListHistory) -> Result<Vec<HistoryEntry>, ApplicationError> {
        Ok(self.history_store.list_all().await?)
    }
}
