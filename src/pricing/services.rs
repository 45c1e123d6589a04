//! Quote assembly with upstream access.
//!
//! Fetches the rate config, tour records, and coupons (cache-first),
//! normalizes the trip selection, and runs the calculators. Everything
//! fallible lives here; the calculators stay total.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use crate::cache::AppCache;
use crate::upstream::UpstreamError;
use crate::AppState;

use super::calculators::{apply_coupon, compute_costs, resolve_rates};
use super::models::{Coupon, RateTable, Tour};
use super::requests::{QuoteRequest, TourQuoteRequest, TourSnapshot};
use super::responses::QuoteResponse;

/// Errors surfaced while assembling a quote.
#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    #[error("Tour not found: {slug}")]
    TourNotFound { slug: String },

    #[error("Coupon code not found: {code}")]
    CouponNotFound { code: String },

    #[error("Coupon is not currently active: {code}")]
    CouponNotActive { code: String },

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Build a quote from a caller-supplied snapshot.
///
/// Pure passthrough to the calculators; cannot fail for any
/// deserializable request.
pub fn quote_from_snapshot(request: &QuoteRequest) -> QuoteResponse {
    let config = request.trip.to_config(&request.tour);
    let rates = resolve_rates(&request.rates, request.tour.pricing.as_ref());
    let costs = compute_costs(&config, &rates);
    let discounted = apply_coupon(&costs, request.coupon.as_ref());

    QuoteResponse::from_breakdown(
        &costs,
        &discounted,
        config.adults,
        request.coupon.as_ref().map(|c| c.code.clone()),
    )
}

/// Build a full quote for a catalogued tour, fetching the inputs
/// server-side.
pub async fn quote_for_tour(
    state: &AppState,
    slug: &str,
    request: &TourQuoteRequest,
) -> Result<QuoteResponse, PricingError> {
    let rates = load_rates(state).await?;
    let tour = load_tour(state, slug).await?;
    let coupon = match request.coupon_code.as_deref() {
        Some(code) if !code.trim().is_empty() => Some(load_coupon(state, code).await?),
        _ => None,
    };

    let snapshot = TourSnapshot::from(tour.as_ref());
    let config = request.trip.to_config(&snapshot);
    let resolved = resolve_rates(&rates, snapshot.pricing.as_ref());
    let costs = compute_costs(&config, &resolved);
    let discounted = apply_coupon(&costs, coupon.as_deref());

    Ok(QuoteResponse::from_breakdown(
        &costs,
        &discounted,
        config.adults,
        coupon.map(|c| c.code.clone()),
    ))
}

/// Current rate config, cache-first.
pub async fn load_rates(state: &AppState) -> Result<Arc<RateTable>, PricingError> {
    if let Some(cached) = state.cache.rates.get(AppCache::RATES_KEY).await {
        debug!("Cache HIT for rate config");
        return Ok(cached);
    }

    debug!("Cache MISS for rate config");
    let rates = Arc::new(state.api.get_rate_config().await?);
    state
        .cache
        .rates
        .insert(AppCache::RATES_KEY.to_string(), rates.clone())
        .await;
    Ok(rates)
}

/// Tour record by slug, cache-first. Inactive tours quote as not found.
pub async fn load_tour(state: &AppState, slug: &str) -> Result<Arc<Tour>, PricingError> {
    let tour = if let Some(cached) = state.cache.tours.get(slug).await {
        debug!(slug, "Cache HIT for tour");
        cached
    } else {
        debug!(slug, "Cache MISS for tour");
        let fetched = state.api.get_tour(slug).await.map_err(|e| match e {
            UpstreamError::NotFound { .. } => PricingError::TourNotFound {
                slug: slug.to_string(),
            },
            other => PricingError::Upstream(other),
        })?;
        let tour = Arc::new(fetched);
        state
            .cache
            .tours
            .insert(slug.to_string(), tour.clone())
            .await;
        tour
    };

    if !tour.active {
        return Err(PricingError::TourNotFound {
            slug: slug.to_string(),
        });
    }
    Ok(tour)
}

/// Coupon by code, cache-first, validated against its activation window.
pub async fn load_coupon(state: &AppState, code: &str) -> Result<Arc<Coupon>, PricingError> {
    let canonical = code.trim().to_uppercase();

    let coupon = if let Some(cached) = state.cache.coupons.get(&canonical).await {
        debug!(code = %canonical, "Cache HIT for coupon");
        cached
    } else {
        debug!(code = %canonical, "Cache MISS for coupon");
        let fetched = state.api.get_coupon(&canonical).await.map_err(|e| match e {
            UpstreamError::NotFound { .. } => PricingError::CouponNotFound {
                code: canonical.clone(),
            },
            other => PricingError::Upstream(other),
        })?;
        let coupon = Arc::new(fetched);
        state
            .cache
            .coupons
            .insert(canonical.clone(), coupon.clone())
            .await;
        coupon
    };

    if !coupon.is_valid_at(Utc::now()) {
        return Err(PricingError::CouponNotActive { code: canonical });
    }
    Ok(coupon)
}
