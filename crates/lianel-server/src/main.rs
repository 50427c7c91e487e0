mod app;
mod sessions;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use lianel::{Config, HttpProfileApi};
use tracing::{info, warn};

use crate::app::{router, AppState};

/// How often abandoned signup forms are swept
const SWEEP_PERIOD: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is normal outside development
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::load_default()
        .unwrap_or_else(|e| {
            warn!("Failed to load lianel.toml: {:#}, using defaults", e);
            Config::default()
        })
        .apply_env_overrides()?;

    let api = HttpProfileApi::from_config(&config.api).context("failed to build profile API client")?;
    info!(base_url = %config.api.base_url, "profile service");

    let state = AppState::new(&config, Arc::new(api));
    state.sessions.spawn_sweeper(SWEEP_PERIOD);
    info!(base_path = %state.ctx.base_path, ttl_secs = config.session.ttl_secs, "routing configured");
    let app = router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("{} v{} listening on http://{}", config.project.name, config.project.version, addr);
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
