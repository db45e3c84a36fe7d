//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// Gemini API 配置
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// 生成请求限制
    #[serde(default)]
    pub generation: GenerationConfig,

    /// 存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 限流配置
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 公开访问的 Base URL（用于生成历史音频地址）
    /// 如果未设置，则使用 http://{host}:{port}
    #[serde(default)]
    pub base_url: Option<String>,

    /// 请求体大小上限（字节），默认 50MB
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_max_upload_size() -> usize {
    50 * 1024 * 1024 // 50 MB
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_url: None,
            max_upload_size: default_max_upload_size(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// 获取公开的 Base URL
    pub fn public_base_url(&self) -> String {
        self.base_url
            .as_deref()
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| {
                let host = if self.host == "0.0.0.0" {
                    "localhost"
                } else {
                    &self.host
                };
                format!("http://{}:{}", host, self.port)
            })
    }

    /// 历史音频的公开地址前缀
    pub fn history_base_url(&self) -> String {
        format!("{}/history", self.public_base_url())
    }
}

/// Gemini API 配置
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    /// API Key，未设置时回退到 `GOOGLE_API_KEY`
    #[serde(default)]
    pub api_key: String,

    /// API 基础 URL
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,

    /// 故事生成模型
    #[serde(default = "default_story_model")]
    pub story_model: String,

    /// 语音合成模型
    #[serde(default = "default_tts_model")]
    pub tts_model: String,

    /// 请求超时时间（秒），0 表示不限制
    #[serde(default = "default_gemini_timeout")]
    pub timeout_secs: u64,
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_story_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_tts_model() -> String {
    "gemini-2.5-flash-preview-tts".to_string()
}

fn default_gemini_timeout() -> u64 {
    300
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_gemini_base_url(),
            story_model: default_story_model(),
            tts_model: default_tts_model(),
            timeout_secs: default_gemini_timeout(),
        }
    }
}

/// 生成请求限制
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    /// 单次请求最多图片数
    #[serde(default = "default_max_images")]
    pub max_images: usize,

    /// 单张图片最大字节数，默认 10MB
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: usize,
}

fn default_max_images() -> usize {
    10
}

fn default_max_image_bytes() -> usize {
    10 * 1024 * 1024 // 10 MB
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_images: default_max_images(),
            max_image_bytes: default_max_image_bytes(),
        }
    }
}

/// 存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 历史记录目录（音频 + 元数据）
    #[serde(default = "default_history_dir")]
    pub history_dir: PathBuf,
}

fn default_history_dir() -> PathBuf {
    PathBuf::from("history")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            history_dir: default_history_dir(),
        }
    }
}

/// 限流配置
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// 是否启用
    #[serde(default = "default_rate_limit_enabled")]
    pub enabled: bool,

    /// 同一客户端两次生成请求的最小间隔（秒）
    #[serde(default = "default_cooldown")]
    pub cooldown_secs: u64,

    /// 过期记录清理间隔（秒）
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

fn default_rate_limit_enabled() -> bool {
    true
}

fn default_cooldown() -> u64 {
    15
}

fn default_sweep_interval() -> u64 {
    60
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_rate_limit_enabled(),
            cooldown_secs: default_cooldown(),
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.gemini.story_model, "gemini-2.5-flash");
        assert_eq!(config.gemini.tts_model, "gemini-2.5-flash-preview-tts");
        assert_eq!(config.rate_limit.cooldown_secs, 15);
        assert_eq!(config.storage.history_dir, PathBuf::from("history"));
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:8000");
    }

    #[test]
    fn test_history_base_url() {
        let mut config = ServerConfig::default();
        assert_eq!(config.history_base_url(), "http://localhost:8000/history");

        config.base_url = Some("https://stories.example.com/".to_string());
        assert_eq!(
            config.history_base_url(),
            "https://stories.example.com/history"
        );
    }
}
