//! History Queries

/// 列出所有历史记录（按 id 降序）
#[derive(Debug, Clone)]
pub struct ListHistory;
