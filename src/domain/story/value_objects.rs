//! Story Context - Value Objects

/// 默认故事风格
pub const DEFAULT_STYLE: &str = "Creative";
/// 默认音色（Gemini 预置音色名）
pub const DEFAULT_VOICE: &str = "Aoede";
/// 默认语言
pub const DEFAULT_LANGUAGE: &str = "English";
/// 上传部件缺少 Content-Type 时使用的 MIME
pub const FALLBACK_IMAGE_MIME: &str = "image/jpeg";

/// 一张输入图片
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePart {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl ImagePart {
    /// 创建图片，缺失或泛化的 MIME 回退为 `image/jpeg`
    pub fn new(mime_type: Option<&str>, data: impl Into<Vec<u8>>) -> Self {
        let mime_type = match mime_type.map(str::trim) {
            None | Some("") | Some("application/octet-stream") => FALLBACK_IMAGE_MIME.to_string(),
            Some(mime) => mime.to_ascii_lowercase(),
        };
        Self {
            mime_type,
            data: data.into(),
        }
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// 故事生成参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryOptions {
    pub style: String,
    pub voice: String,
    pub language: String,
    /// 额外指令，空白文本视为无
    pub custom_prompt: Option<String>,
}

impl StoryOptions {
    /// 从表单字段构造，缺省或空白字段使用默认值
    pub fn from_fields(
        style: Option<String>,
        voice: Option<String>,
        language: Option<String>,
        custom_prompt: Option<String>,
    ) -> Self {
        Self {
            style: non_blank(style).unwrap_or_else(|| DEFAULT_STYLE.to_string()),
            voice: non_blank(voice).unwrap_or_else(|| DEFAULT_VOICE.to_string()),
            language: non_blank(language).unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            custom_prompt: non_blank(custom_prompt),
        }
    }
}

impl Default for StoryOptions {
    fn default() -> Self {
        Self::from_fields(None, None, None, None)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = StoryOptions::default();
        assert_eq!(options.style, "Creative");
        assert_eq!(options.voice, "Aoede");
        assert_eq!(options.language, "English");
        assert_eq!(options.custom_prompt, None);
    }

    #[test]
    fn test_blank_fields_fall_back() {
        let options = StoryOptions::from_fields(
            Some("  ".to_string()),
            Some("Puck".to_string()),
            None,
            Some("\n".to_string()),
        );
        assert_eq!(options.style, "Creative");
        assert_eq!(options.voice, "Puck");
        assert_eq!(options.custom_prompt, None);
    }

    #[test]
    fn test_image_mime_fallback() {
        assert_eq!(ImagePart::new(None, vec![1]).mime_type, "image/jpeg");
        assert_eq!(
            ImagePart::new(Some("application/octet-stream"), vec![1]).mime_type,
            "image/jpeg"
        );
        assert_eq!(ImagePart::new(Some("Image/PNG"), vec![1]).mime_type, "image/png");
        assert!(!ImagePart::new(Some("text/plain"), vec![1]).is_image());
    }
}
