use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use trailquote_web::cache::{self, AppCache};
use trailquote_web::upstream::AdminApi;
use trailquote_web::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,trailquote_web=debug".into()),
        )
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
    let admin_api_url = std::env::var("ADMIN_API_URL")
        .context("ADMIN_API_URL environment variable is required")?;

    let api = AdminApi::new(&admin_api_url)?;
    let cache = AppCache::new();

    // Keep the rate config warm so most quotes never wait on upstream.
    tokio::spawn(cache::start_cache_warmer(cache.clone(), api.clone()));

    let state = AppState { api, cache };

    let listener = TcpListener::bind(&bind_addr).await?;
    info!(address = %bind_addr, "trailquote-web listening");

    axum::serve(listener, app(state)).await?;

    Ok(())
}
