//! In-memory caching using moka
//!
//! Holds upstream snapshots: the global rate config, tour records, and
//! coupons. The rate config changes rarely, so it gets the longest TTL and
//! a background warmer keeps it fresh across quote traffic.

use moka::future::Cache;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn};

use crate::pricing::models::{Coupon, RateTable, Tour};
use crate::upstream::AdminApi;

/// Application cache holding upstream snapshots
#[derive(Clone)]
pub struct AppCache {
    /// Global rate config (singleton under [`Self::RATES_KEY`])
    pub rates: Cache<String, Arc<RateTable>>,
    /// Tour records (slug -> Tour)
    pub tours: Cache<String, Arc<Tour>>,
    /// Coupons (canonical code -> Coupon)
    pub coupons: Cache<String, Arc<Coupon>>,
}

impl AppCache {
    /// Key for the rate config singleton
    pub const RATES_KEY: &'static str = "rates";

    /// Create a new cache instance with configured TTLs
    pub fn new() -> Self {
        Self {
            // Rate config: 1 entry, 30 min TTL; the warmer refreshes it anyway
            rates: Cache::builder()
                .max_capacity(1)
                .time_to_live(Duration::from_secs(30 * 60))
                .build(),

            // Tours: 200 entries, 15 min TTL, 5 min idle
            tours: Cache::builder()
                .max_capacity(200)
                .time_to_live(Duration::from_secs(15 * 60))
                .time_to_idle(Duration::from_secs(5 * 60))
                .build(),

            // Coupons: 500 entries, 5 min TTL (admins toggle these often)
            coupons: Cache::builder()
                .max_capacity(500)
                .time_to_live(Duration::from_secs(5 * 60))
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            rates_cached: self.rates.entry_count() > 0,
            tours_size: self.tours.entry_count(),
            coupons_size: self.coupons.entry_count(),
        }
    }

    /// Invalidate all caches
    pub fn invalidate_all(&self) {
        self.rates.invalidate_all();
        self.tours.invalidate_all();
        self.coupons.invalidate_all();
        info!("All caches invalidated");
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub rates_cached: bool,
    pub tours_size: u64,
    pub coupons_size: u64,
}

/// Start background cache warmer
///
/// Warms the rate config on startup and refreshes every 10 minutes.
pub async fn start_cache_warmer(cache: AppCache, api: AdminApi) {
    // Initial warm-up
    warm_cache(&cache, &api).await;

    // Periodic refresh every 10 minutes
    let mut interval = interval(Duration::from_secs(10 * 60));
    loop {
        interval.tick().await;
        warm_cache(&cache, &api).await;
    }
}

/// Warm the cache with the rate config every quote needs
async fn warm_cache(cache: &AppCache, api: &AdminApi) {
    info!("Starting cache warm-up...");

    match api.get_rate_config().await {
        Ok(rates) => {
            cache
                .rates
                .insert(AppCache::RATES_KEY.to_string(), Arc::new(rates))
                .await;
        }
        Err(e) => warn!("Failed to warm rate config cache: {}", e),
    }

    info!("Cache warm-up complete. Stats: {:?}", cache.stats());
}
