//! Generate Commands

use crate::domain::story::{ImagePart, StoryOptions};

/// 由图片生成有声故事
#[derive(Debug, Clone)]
pub struct GenerateStory {
    /// 按上传顺序排列
    pub images: Vec<ImagePart>,
    pub options: StoryOptions,
}
