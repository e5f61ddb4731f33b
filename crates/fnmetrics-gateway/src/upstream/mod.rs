//! Provider proxy: the base function-listing handler.
//!
//! Forwards `GET /system/functions` (query string included, e.g.
//! `?namespace=`) to the configured provider and relays status, content type
//! and body. It knows nothing about metrics; the enrichment middleware wraps it.

use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
};

use fnmetrics_core::error::{FnMetricsError, Result};

use crate::app_state::AppState;
use crate::config::ProviderSection;

pub const FUNCTIONS_PATH: &str = "/system/functions";

#[derive(Debug, Clone)]
pub struct ProviderClient {
    client: reqwest::Client,
    base_url: String,
}

impl ProviderClient {
    pub fn new(cfg: &ProviderSection) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(cfg.timeout())
            .build()
            .map_err(|e| FnMetricsError::Internal(format!("build provider client: {e}")))?;
        Ok(Self {
            client,
            base_url: cfg.base_url().to_string(),
        })
    }

    pub fn functions_url(&self, query: Option<&str>) -> String {
        match query {
            Some(q) if !q.is_empty() => format!("{}{}?{}", self.base_url, FUNCTIONS_PATH, q),
            _ => format!("{}{}", self.base_url, FUNCTIONS_PATH),
        }
    }
}

pub async fn list_functions(State(state): State<AppState>, uri: Uri) -> Response {
    let provider = state.provider();
    let url = provider.functions_url(uri.query());

    let resp = match provider.client.get(&url).send().await {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "provider unreachable");
            state.metrics().provider_errors.inc(&[("reason", "unreachable")]);
            return (StatusCode::BAD_GATEWAY, "provider unreachable").into_response();
        }
    };

    let status = resp.status();
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .cloned()
        .unwrap_or_else(|| header::HeaderValue::from_static("application/json"));

    match resp.bytes().await {
        Ok(body) => (status, [(header::CONTENT_TYPE, content_type)], body).into_response(),
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "provider body read failed");
            state.metrics().provider_errors.inc(&[("reason", "body")]);
            (StatusCode::BAD_GATEWAY, "provider body read failed").into_response()
        }
    }
}
