//! Error handling for the application

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::pricing::services::PricingError;
use crate::upstream::UpstreamError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error body returned to the booking UI
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    error_type: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            AppError::Pricing(PricingError::TourNotFound { .. }) => {
                (StatusCode::NOT_FOUND, "tour_not_found", self.to_string())
            }
            AppError::Pricing(PricingError::CouponNotFound { .. }) => {
                (StatusCode::NOT_FOUND, "coupon_not_found", self.to_string())
            }
            AppError::Pricing(PricingError::CouponNotActive { .. }) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "coupon_not_active",
                self.to_string(),
            ),
            AppError::Pricing(PricingError::Upstream(e)) | AppError::Upstream(e) => {
                tracing::error!("Upstream error: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "upstream_error",
                    "Admin API request failed".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody {
            error_type,
            message,
        }))
            .into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
