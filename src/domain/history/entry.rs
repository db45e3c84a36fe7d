//! History Context - 历史记录实体

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::story::StoryOptions;

/// 预览截取的字符数
pub const PREVIEW_CHARS: usize = 100;

/// 历史记录 ID（创建时间的毫秒时间戳）
///
/// 同时作为主键、排序键和配对文件的文件名前缀。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryId(i64);

impl HistoryId {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }

    /// 音频文件名
    pub fn audio_file_name(&self) -> String {
        format!("{}.wav", self.0)
    }

    /// 元数据文件名
    pub fn metadata_file_name(&self) -> String {
        format!("{}.json", self.0)
    }
}

impl std::fmt::Display for HistoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 一次生成的持久化记录
///
/// 创建后不再修改，只能整体删除。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: HistoryId,
    /// 创建日期 `YYYY-MM-DD`
    pub date: String,
    pub story: String,
    pub audio_url: String,
    pub style: String,
    pub voice: String,
    pub language: String,
    pub preview: String,
}

impl HistoryEntry {
    /// 由生成结果构造记录
    ///
    /// `audio_base_url` 为静态音频目录的公开地址，例如 `http://localhost:8000/history`
    pub fn new(
        id: HistoryId,
        date: NaiveDate,
        story: String,
        audio_base_url: &str,
        options: &StoryOptions,
    ) -> Self {
        Self {
            id,
            date: date.format("%Y-%m-%d").to_string(),
            audio_url: format!(
                "{}/{}",
                audio_base_url.trim_end_matches('/'),
                id.audio_file_name()
            ),
            style: options.style.clone(),
            voice: options.voice.clone(),
            language: options.language.clone(),
            preview: make_preview(&story),
            story,
        }
    }
}

/// 前 100 个字符加省略号
pub fn make_preview(story: &str) -> String {
    let mut preview: String = story.chars().take(PREVIEW_CHARS).collect();
    preview.push_str("...");
    preview
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_truncates_by_chars() {
        let story = "é".repeat(150);
        let preview = make_preview(&story);
        assert_eq!(preview.chars().count(), PREVIEW_CHARS + 3);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn test_preview_of_short_story_still_has_ellipsis() {
        assert_eq!(make_preview("Once."), "Once....");
    }

    #[test]
    fn test_entry_fields() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
        let entry = HistoryEntry::new(
            HistoryId::new(1715900000123),
            date,
            "A fox ran.".to_string(),
            "http://localhost:8000/history/",
            &StoryOptions::default(),
        );

        assert_eq!(entry.date, "2024-05-17");
        assert_eq!(entry.audio_url, "http://localhost:8000/history/1715900000123.wav");
        assert_eq!(entry.voice, "Aoede");
        assert_eq!(entry.preview, "A fox ran....");
    }

    #[test]
    fn test_entry_json_shape() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let entry = HistoryEntry::new(
            HistoryId::new(42),
            date,
            "Tale".to_string(),
            "http://h/history",
            &StoryOptions::default(),
        );

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["id"], 42);
        assert_eq!(value["audio_url"], "http://h/history/42.wav");
        assert_eq!(value["style"], "Creative");

        let back: HistoryEntry = serde_json::from_value(value).unwrap();
        assert_eq!(back, entry);
    }
}
