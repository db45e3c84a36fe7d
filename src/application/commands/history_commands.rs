//! History Commands

use crate::domain::history::HistoryId;

/// 删除历史记录命令
#[derive(Debug, Clone)]
pub struct DeleteHistoryEntry {
    pub id: HistoryId,
}
