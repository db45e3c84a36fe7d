//! Picvox - 图片生成有声故事服务
//!
//! 启动流程：
//! - 加载配置（.env + config.toml + 环境变量）
//! - 组装 Gemini 适配器、历史存储、限流器
//! - 启动 HTTP 服务器

use std::sync::Arc;
use std::time::Duration;

use picvox::application::{GenerateLimits, RateLimiterPort};
use picvox::config::{load_config, print_config, AppConfig};
use picvox::infrastructure::adapters::{
    GeminiClient, GeminiClientConfig, GeminiSpeechModel, GeminiStoryModel,
};
use picvox::infrastructure::http::{AppState, HttpServer, ServerConfig};
use picvox::infrastructure::memory::InMemoryRateLimiter;
use picvox::infrastructure::persistence::FileHistoryStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 不存在时忽略
    dotenvy::dotenv().ok();

    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("Picvox - Image-to-Speech story service");
    print_config(&config);

    if config.gemini.api_key.is_empty() {
        tracing::warn!(
            "Gemini API key is not set (PICVOX_GEMINI__API_KEY or GOOGLE_API_KEY); generation requests will fail"
        );
    }

    // 历史存储（目录不存在时自动创建）
    let history_store = Arc::new(FileHistoryStore::new(&config.storage.history_dir).await?);

    // Gemini 适配器，故事与语音共用同一个 HTTP 客户端
    let client_config = GeminiClientConfig::new(config.gemini.api_key.clone())
        .with_base_url(config.gemini.base_url.clone())
        .with_timeout(config.gemini.timeout_secs);
    let client = GeminiClient::new(client_config)?;
    let story_model = Arc::new(GeminiStoryModel::new(
        client.clone(),
        config.gemini.story_model.clone(),
    ));
    let speech_model = Arc::new(GeminiSpeechModel::new(client, config.gemini.tts_model.clone()));

    // 限流器，关闭时冷却时间为 0
    let cooldown = if config.rate_limit.enabled {
        Duration::from_secs(config.rate_limit.cooldown_secs)
    } else {
        Duration::ZERO
    };
    let rate_limiter = Arc::new(InMemoryRateLimiter::new(cooldown));

    if config.rate_limit.enabled {
        spawn_rate_limit_sweeper(
            rate_limiter.clone(),
            Duration::from_secs(config.rate_limit.sweep_interval_secs.max(1)),
        );
    }

    let limits = GenerateLimits {
        max_images: config.generation.max_images,
        max_image_bytes: config.generation.max_image_bytes,
    };

    let state = AppState::new(
        story_model,
        speech_model,
        history_store.clone(),
        rate_limiter,
        config.server.history_base_url(),
        limits,
    );

    let server_config = ServerConfig::new(&config.server.host, config.server.port)
        .with_history_dir(history_store.history_dir())
        .with_max_upload_size(config.server.max_upload_size);

    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for ctrl-c: {}", e);
                return;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// 初始化日志，`RUST_LOG` 优先于配置中的级别
fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},picvox={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// 定期清理过期的限流记录
fn spawn_rate_limit_sweeper(rate_limiter: Arc<InMemoryRateLimiter>, interval: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            let evicted = rate_limiter.evict_expired();
            if evicted > 0 {
                tracing::debug!(
                    evicted,
                    remaining = rate_limiter.tracked_clients(),
                    "Evicted expired rate limit entries"
                );
            }
        }
    });
}
