//! Shared application state for the fnmetrics gateway.
//!
//! Everything here is immutable after boot (config, clients) or internally
//! synchronized (counters). Request data never lives here.

use std::sync::Arc;

use fnmetrics_core::error::Result;

use crate::backend::{PrometheusClient, QueryFetcher};
use crate::config::GatewayConfig;
use crate::obs::GatewayMetrics;
use crate::upstream::ProviderClient;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    fetcher: Arc<dyn QueryFetcher>,
    metrics: Arc<GatewayMetrics>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    provider: ProviderClient,
}

impl AppState {
    /// Build application state with the Prometheus backend from config.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn new(cfg: GatewayConfig) -> Result<Self> {
        let prometheus = PrometheusClient::new(&cfg.prometheus)?;
        Self::with_fetcher(cfg, Arc::new(prometheus))
    }

    /// Build application state around any metrics fetch capability.
    pub fn with_fetcher(cfg: GatewayConfig, fetcher: Arc<dyn QueryFetcher>) -> Result<Self> {
        let provider = ProviderClient::new(&cfg.provider)?;

        tracing::info!(
            provider = %cfg.provider.base_url(),
            prometheus = %format!("{}:{}", cfg.prometheus.host, cfg.prometheus.port),
            "gateway state ready"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner { cfg, provider }),
            fetcher,
            metrics: Arc::new(GatewayMetrics::default()),
        })
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn provider(&self) -> &ProviderClient {
        &self.inner.provider
    }

    pub fn fetcher(&self) -> Arc<dyn QueryFetcher> {
        Arc::clone(&self.fetcher)
    }

    pub fn metrics(&self) -> Arc<GatewayMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn max_upstream_body_bytes(&self) -> usize {
        self.inner.cfg.gateway.max_upstream_body_bytes
    }
}
