//! Prometheus HTTP API client (`/api/v1/query`).

use async_trait::async_trait;

use fnmetrics_core::error::{FnMetricsError, Result};
use fnmetrics_core::query::QueryResponse;

use super::QueryFetcher;
use crate::config::PrometheusSection;

#[derive(Debug, Clone)]
pub struct PrometheusClient {
    client: reqwest::Client,
    base_url: String,
}

impl PrometheusClient {
    pub fn new(cfg: &PrometheusSection) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(cfg.timeout())
            .build()
            .map_err(|e| FnMetricsError::Internal(format!("build prometheus client: {e}")))?;

        let base_url = format!("http://{}:{}", cfg.host, cfg.port);
        tracing::debug!(base_url = %base_url, "prometheus client initialized");
        Ok(Self { client, base_url })
    }

    /// Point at an explicit base URL (scheme + authority).
    pub fn with_base_url(cfg: &PrometheusSection, base_url: impl Into<String>) -> Result<Self> {
        let mut this = Self::new(cfg)?;
        this.base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(this)
    }

    pub fn query_url(&self, encoded_expr: &str) -> String {
        format!("{}/api/v1/query?query={}", self.base_url, encoded_expr)
    }
}

#[async_trait]
impl QueryFetcher for PrometheusClient {
    async fn fetch(&self, encoded_expr: &str) -> Result<QueryResponse> {
        let url = self.query_url(encoded_expr);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FnMetricsError::MetricsBackend(format!("GET {url}: {e}")))?;

        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .map_err(|e| FnMetricsError::MetricsBackend(format!("read body: {e}")))?;

        if status != reqwest::StatusCode::OK {
            return Err(FnMetricsError::MetricsBackend(format!(
                "unexpected status code from prometheus want: 200, got: {}, body: {}",
                status.as_u16(),
                String::from_utf8_lossy(&body)
            )));
        }

        QueryResponse::from_slice(&body)
    }
}
