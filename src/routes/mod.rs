//! Operational route handlers

use axum::{extract::State, Json};

use crate::cache::CacheStats;
use crate::AppState;

/// Liveness probe
pub async fn health() -> &'static str {
    "OK"
}

/// Cache statistics for monitoring
pub async fn cache_stats(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.stats())
}

/// Drop every cached upstream snapshot (the admin panel's "clear cache"
/// button calls this after editing rates or coupons)
pub async fn cache_invalidate(State(state): State<AppState>) -> &'static str {
    state.cache.invalidate_all();
    "OK"
}
