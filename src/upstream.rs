//! Typed client for the external admin API.
//!
//! The admin service owns tours, the global rate config, and coupons; this
//! module is the only place that talks to it. Responses deserialize
//! straight into the domain models in [`crate::pricing::models`].

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::pricing::models::{Coupon, RateTable, Tour};

/// Errors from the admin API boundary.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("Admin API request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Admin API returned {status} for {endpoint}")]
    Status { status: StatusCode, endpoint: String },

    #[error("Not found upstream: {endpoint}")]
    NotFound { endpoint: String },
}

/// Client for the admin API.
#[derive(Clone)]
pub struct AdminApi {
    base_url: String,
    http: reqwest::Client,
}

impl AdminApi {
    /// Build a client for the given base URL.
    pub fn new(base_url: &str) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Global rate configuration.
    pub async fn get_rate_config(&self) -> Result<RateTable, UpstreamError> {
        self.get_json("/api/config/rates").await
    }

    /// Tour record by slug.
    pub async fn get_tour(&self, slug: &str) -> Result<Tour, UpstreamError> {
        self.get_json(&format!("/api/tours/{slug}")).await
    }

    /// Coupon record by code.
    pub async fn get_coupon(&self, code: &str) -> Result<Coupon, UpstreamError> {
        self.get_json(&format!("/api/coupons/{code}")).await
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, UpstreamError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self.http.get(&url).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(UpstreamError::NotFound {
                endpoint: endpoint.to_string(),
            }),
            status if !status.is_success() => Err(UpstreamError::Status {
                status,
                endpoint: endpoint.to_string(),
            }),
            _ => Ok(response.json::<T>().await?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_trimmed() {
        let api = AdminApi::new("http://admin.example.com/").unwrap();
        assert_eq!(api.base_url, "http://admin.example.com");
    }

    #[test]
    fn test_upstream_error_display() {
        let err = UpstreamError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            endpoint: "/api/config/rates".to_string(),
        };
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("/api/config/rates"));
    }
}
