use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;
use fnmetrics_core::error::{FnMetricsError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    pub provider: ProviderSection,

    #[serde(default)]
    pub prometheus: PrometheusSection,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(FnMetricsError::UnsupportedVersion);
        }

        self.gateway.validate()?;
        self.provider.validate()?;
        self.prometheus.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Upper bound on a buffered upstream function list.
    #[serde(default = "default_max_upstream_body_bytes")]
    pub max_upstream_body_bytes: usize,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            max_upstream_body_bytes: default_max_upstream_body_bytes(),
        }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if !(1024..=64 * 1024 * 1024).contains(&self.max_upstream_body_bytes) {
            return Err(FnMetricsError::BadConfig(
                "gateway.max_upstream_body_bytes must be between 1024 and 67108864".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|_| {
            FnMetricsError::BadConfig(format!(
                "gateway.listen must be a valid SocketAddr: {}",
                self.listen
            ))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_max_upstream_body_bytes() -> usize {
    4 * 1024 * 1024
}

/// Function provider serving the base function list.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderSection {
    pub url: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl ProviderSection {
    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(&self.url)
            .map_err(|e| FnMetricsError::BadConfig(format!("provider.url invalid: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FnMetricsError::BadConfig(
                "provider.url must use http or https".into(),
            ));
        }
        validate_timeout("provider.timeout_ms", self.timeout_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

/// Time-series query backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrometheusSection {
    #[serde(default = "default_prometheus_host")]
    pub host: String,

    #[serde(default = "default_prometheus_port")]
    pub port: u16,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for PrometheusSection {
    fn default() -> Self {
        Self {
            host: default_prometheus_host(),
            port: default_prometheus_port(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl PrometheusSection {
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(FnMetricsError::BadConfig("prometheus.host must not be empty".into()));
        }
        if self.port == 0 {
            return Err(FnMetricsError::BadConfig("prometheus.port must not be 0".into()));
        }
        validate_timeout("prometheus.timeout_ms", self.timeout_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn validate_timeout(field: &str, ms: u64) -> Result<()> {
    if !(100..=60000).contains(&ms) {
        return Err(FnMetricsError::BadConfig(format!(
            "{field} must be between 100 and 60000"
        )));
    }
    Ok(())
}

fn default_prometheus_host() -> String {
    "prometheus".into()
}
fn default_prometheus_port() -> u16 {
    9090
}
fn default_timeout_ms() -> u64 {
    5000
}
