//! Booking quote service for the TrailPeaks Holidays website.
//!
//! Hosts the pure booking price engine ([`pricing::calculators`]) behind an
//! HTTP/JSON surface, assembling its inputs (rate config, tour records,
//! coupons) from the external admin API.

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod cache;
pub mod error;
pub mod pricing;
pub mod routes;
pub mod upstream;

use cache::AppCache;
use upstream::AdminApi;

/// Shared state available to all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Client for the external admin API
    pub api: AdminApi,
    /// Upstream snapshot cache
    pub cache: AppCache,
}

/// Build the application router with middleware layers applied.
///
/// CORS is wide open: the booking UI is served from its own origin and
/// calls this API cross-origin.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/cache/stats", get(routes::cache_stats))
        .route("/cache/invalidate", post(routes::cache_invalidate))
        .nest("/api/pricing", pricing::router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}
