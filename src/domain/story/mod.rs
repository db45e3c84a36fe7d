//! Story Context - 故事限界上下文
//!
//! 职责:
//! - 输入图片与生成参数
//! - 故事提示词构造

mod prompt;
mod value_objects;

pub use prompt::build_story_prompt;
pub use value_objects::{
    ImagePart, StoryOptions, DEFAULT_LANGUAGE, DEFAULT_STYLE, DEFAULT_VOICE, FALLBACK_IMAGE_MIME,
};
