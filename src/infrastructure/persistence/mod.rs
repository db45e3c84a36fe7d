//! Persistence Layer - 持久化层
//!
//! 历史记录以文件对的形式存储在本地目录

mod file_history_store;

pub use file_history_store::FileHistoryStore;
