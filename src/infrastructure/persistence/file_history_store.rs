//! File History Store - 目录式历史存储
//!
//! 实现 HistoryStorePort：每条记录对应 `{id}.wav` + `{id}.json` 两个文件。
//! 写入先落到隐藏临时文件再 rename，音频在前、元数据在后，
//! 列表只读取 `.json`，因此不会看到缺少音频的记录。

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

use crate::application::ports::{HistoryStoreError, HistoryStorePort};
use crate::domain::history::{HistoryEntry, HistoryId};

/// 临时文件后缀
const TEMP_SUFFIX: &str = ".tmp";

/// 文件系统历史存储
pub struct FileHistoryStore {
    /// 存储目录
    dir: PathBuf,
}

impl FileHistoryStore {
    /// 创建存储，目录不存在时自动创建，并清理上次异常退出遗留的临时文件
    pub async fn new(dir: impl AsRef<Path>) -> Result<Self, HistoryStoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).await?;

        let store = Self { dir };
        let removed = store.remove_stale_temp_files().await?;
        if removed > 0 {
            tracing::warn!(
                dir = %store.dir.display(),
                removed = removed,
                "Removed stale temporary history files"
            );
        }

        Ok(store)
    }

    /// 存储目录（用于静态文件服务）
    pub fn history_dir(&self) -> &Path {
        &self.dir
    }

    fn audio_path(&self, id: HistoryId) -> PathBuf {
        self.dir.join(id.audio_file_name())
    }

    fn metadata_path(&self, id: HistoryId) -> PathBuf {
        self.dir.join(id.metadata_file_name())
    }

    fn temp_path(&self, file_name: &str) -> PathBuf {
        self.dir
            .join(format!(".{}.{}{}", file_name, Uuid::new_v4().simple(), TEMP_SUFFIX))
    }

    /// 写入临时文件后原子 rename 到目标路径
    async fn write_atomic(&self, target: &Path, data: &[u8]) -> Result<(), HistoryStoreError> {
        let file_name = target
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let temp = self.temp_path(&file_name);

        if let Err(e) = fs::write(&temp, data).await {
            let _ = fs::remove_file(&temp).await;
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&temp, target).await {
            let _ = fs::remove_file(&temp).await;
            return Err(e.into());
        }

        Ok(())
    }

    async fn remove_if_exists(path: &Path) -> Result<bool, HistoryStoreError> {
        match fs::remove_file(path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn remove_stale_temp_files(&self) -> Result<u64, HistoryStoreError> {
        let mut removed = 0u64;
        let mut entries = fs::read_dir(&self.dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with('.') && name.ends_with(TEMP_SUFFIX) {
                if Self::remove_if_exists(&entry.path()).await? {
                    removed += 1;
                }
            }
        }

        Ok(removed)
    }

    async fn read_entry(path: &Path) -> Result<HistoryEntry, HistoryStoreError> {
        let raw = fs::read(path).await?;
        Ok(serde_json::from_slice(&raw)?)
    }
}

#[async_trait]
impl HistoryStorePort for FileHistoryStore {
    async fn append(&self, entry: &HistoryEntry, audio: &[u8]) -> Result<(), HistoryStoreError> {
        let metadata = serde_json::to_vec(entry)?;
        let audio_path = self.audio_path(entry.id);

        self.write_atomic(&audio_path, audio).await?;

        if let Err(e) = self.write_atomic(&self.metadata_path(entry.id), &metadata).await {
            if let Err(cleanup) = Self::remove_if_exists(&audio_path).await {
                tracing::warn!(history_id = %entry.id, error = %cleanup, "Failed to remove orphaned audio");
            }
            return Err(e);
        }

        tracing::debug!(
            history_id = %entry.id,
            audio_bytes = audio.len(),
            "History entry written"
        );

        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<HistoryEntry>, HistoryStoreError> {
        let mut items = Vec::new();

        let mut dir = match fs::read_dir(&self.dir).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(items),
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = dir.next_entry().await? {
            let path = entry.path();
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }

            match Self::read_entry(&path).await {
                Ok(item) => items.push(item),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable history entry");
                }
            }
        }

        items.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(items)
    }

    async fn delete(&self, id: HistoryId) -> Result<(), HistoryStoreError> {
        // 先删元数据，记录立即从列表中消失
        let metadata_removed = Self::remove_if_exists(&self.metadata_path(id)).await?;
        let audio_removed = Self::remove_if_exists(&self.audio_path(id)).await?;

        tracing::debug!(
            history_id = %id,
            metadata_removed = metadata_removed,
            audio_removed = audio_removed,
            "History files removed"
        );

        Ok(())
    }
}
