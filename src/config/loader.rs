//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// Gemini API Key 的通用环境变量
const FALLBACK_API_KEY_VAR: &str = "GOOGLE_API_KEY";

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `PICVOX_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `PICVOX_SERVER__PORT=8000`
/// - `PICVOX_GEMINI__API_KEY=...`（或 `GOOGLE_API_KEY`）
/// - `PICVOX_STORAGE__HISTORY_DIR=/data/history`
/// - `PICVOX_RATE_LIMIT__COOLDOWN_SECS=30`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8000)?
        .set_default("gemini.api_key", "")?
        .set_default("gemini.base_url", "https://generativelanguage.googleapis.com/v1beta")?
        .set_default("gemini.story_model", "gemini-2.5-flash")?
        .set_default("gemini.tts_model", "gemini-2.5-flash-preview-tts")?
        .set_default("gemini.timeout_secs", 300)?
        .set_default("generation.max_images", 10)?
        .set_default("generation.max_image_bytes", 10 * 1024 * 1024)?
        .set_default("storage.history_dir", "history")?
        .set_default("rate_limit.enabled", true)?
        .set_default("rate_limit.cooldown_secs", 15)?
        .set_default("rate_limit.sweep_interval_secs", 60)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: PICVOX_GEMINI__API_KEY=xxx
    builder = builder.add_source(
        Environment::with_prefix("PICVOX")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let mut app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    // 4. API Key 回退到 GOOGLE_API_KEY
    if app_config.gemini.api_key.trim().is_empty() {
        app_config.gemini.api_key = std::env::var(FALLBACK_API_KEY_VAR).unwrap_or_default();
    }

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
///
/// 缺少 API Key 不视为错误，只在启动时告警。
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.gemini.base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Gemini base URL cannot be empty".to_string(),
        ));
    }

    if config.gemini.story_model.is_empty() || config.gemini.tts_model.is_empty() {
        return Err(ConfigError::ValidationError(
            "Gemini model names cannot be empty".to_string(),
        ));
    }

    if config.storage.history_dir.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "History directory cannot be empty".to_string(),
        ));
    }

    if config.generation.max_images == 0 {
        return Err(ConfigError::ValidationError(
            "generation.max_images must be at least 1".to_string(),
        ));
    }

    if config.rate_limit.enabled && config.rate_limit.cooldown_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Rate limit cooldown cannot be 0 when rate limiting is enabled".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Public Base URL: {}", config.server.public_base_url());
    tracing::info!("Max Upload Size: {} bytes", config.server.max_upload_size);
    tracing::info!("Gemini Base URL: {}", config.gemini.base_url);
    tracing::info!("Story Model: {}", config.gemini.story_model);
    tracing::info!("TTS Model: {}", config.gemini.tts_model);
    tracing::info!("Gemini Timeout: {}s", config.gemini.timeout_secs);
    tracing::info!(
        "Gemini API Key: {}",
        if config.gemini.api_key.is_empty() { "missing" } else { "configured" }
    );
    tracing::info!("History Directory: {:?}", config.storage.history_dir);
    tracing::info!("Rate Limit Enabled: {}", config.rate_limit.enabled);
    if config.rate_limit.enabled {
        tracing::info!("Rate Limit Cooldown: {}s", config.rate_limit.cooldown_secs);
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_model() {
        let mut config = AppConfig::default();
        config.gemini.tts_model = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_cooldown() {
        let mut config = AppConfig::default();
        config.rate_limit.cooldown_secs = 0;
        assert!(validate_config(&config).is_err());

        config.rate_limit.enabled = false;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_missing_api_key_is_not_an_error() {
        let mut config = AppConfig::default();
        config.gemini.api_key = String::new();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nport = 9100\n\n[gemini]\napi_key = \"file-key\"\n\n[rate_limit]\ncooldown_secs = 30"
        )
        .unwrap();

        let config = load_config_from_path(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.gemini.api_key, "file-key");
        assert_eq!(config.rate_limit.cooldown_secs, 30);
        assert_eq!(config.gemini.story_model, "gemini-2.5-flash");
    }
}
