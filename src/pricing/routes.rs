//! HTTP handlers for the pricing API.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

use crate::error::Result;
use crate::AppState;

use super::requests::{QuoteRequest, TourQuoteRequest};
use super::responses::{CouponResponse, QuoteResponse};
use super::services;

/// Pricing API router, nested under `/api/pricing`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/quote", post(quote))
        .route("/tours/:slug/quote", post(tour_quote))
        .route("/coupons/:code", get(coupon_lookup))
}

/// Self-contained quote: the caller supplies the complete pricing
/// snapshot and the computation is pure.
async fn quote(Json(request): Json<QuoteRequest>) -> Json<QuoteResponse> {
    Json(services::quote_from_snapshot(&request))
}

/// Quote for a catalogued tour; tour, rates, and coupon are fetched
/// server-side, cache-first.
async fn tour_quote(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(request): Json<TourQuoteRequest>,
) -> Result<Json<QuoteResponse>> {
    let quote = services::quote_for_tour(&state, &slug, &request).await?;
    Ok(Json(quote))
}

/// Coupon lookup for the booking form's "apply coupon" box.
async fn coupon_lookup(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<CouponResponse>> {
    let coupon = services::load_coupon(&state, &code).await?;
    Ok(Json(CouponResponse::from(coupon.as_ref())))
}
