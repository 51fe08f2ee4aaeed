pub mod access;
pub mod api;
pub mod config;
pub mod content;
pub mod error;
pub mod snapshot;
pub mod source;
pub mod state;

use tracing_subscriber::{EnvFilter, fmt::time::ChronoLocal};

use config::Config;
use state::AppState;

/// 初始化日志，级别由环境变量 `WPNOTE_LOG` 控制
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S%.3f".to_string()))
        .with_env_filter(EnvFilter::from_env("WPNOTE_LOG"))
        .init();
}

pub async fn run() {
    init_tracing();

    let config = Config::from_env().expect("invalid configuration");
    tracing::info!(posts_url = %config.posts_url, "content source configured");

    let app = AppState::new(config).expect("Failed to build content source");

    api::run_server(app).await
}
