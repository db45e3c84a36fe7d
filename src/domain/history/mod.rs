//! History Context - 生成历史限界上下文

mod entry;

pub use entry::{make_preview, HistoryEntry, HistoryId, PREVIEW_CHARS};
