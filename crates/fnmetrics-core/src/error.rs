//! Shared error type across fnmetrics crates.

use thiserror::Error;

/// Stable error kinds (used in logs, counters and tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Wrapped listing handler answered with a non-OK status.
    UpstreamUnavailable,
    /// Upstream body is not a function list.
    UpstreamMalformed,
    /// Upstream body could not be read.
    MissingUpstreamBody,
    /// Metrics backend unreachable or returned garbage.
    MetricsBackend,
    /// A single sample value could not be parsed.
    MetricValueParse,
    /// Enriched list could not be serialized.
    Serialization,
    /// Invalid configuration.
    BadConfig,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal error.
    Internal,
}

impl ErrorKind {
    /// String representation used in logs and counter labels.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::UpstreamUnavailable => "UPSTREAM_UNAVAILABLE",
            ErrorKind::UpstreamMalformed => "UPSTREAM_MALFORMED",
            ErrorKind::MissingUpstreamBody => "MISSING_UPSTREAM_BODY",
            ErrorKind::MetricsBackend => "METRICS_BACKEND",
            ErrorKind::MetricValueParse => "METRIC_VALUE_PARSE",
            ErrorKind::Serialization => "SERIALIZATION",
            ErrorKind::BadConfig => "BAD_CONFIG",
            ErrorKind::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorKind::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, FnMetricsError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum FnMetricsError {
    #[error("upstream returned status {0}")]
    UpstreamUnavailable(u16),
    #[error("upstream body is not a function list: {0}")]
    UpstreamMalformed(String),
    #[error("upstream body unavailable: {0}")]
    MissingUpstreamBody(String),
    #[error("metrics backend: {0}")]
    MetricsBackend(String),
    #[error("unable to convert value for metric: {0}")]
    MetricValueParse(String),
    #[error("serialize function list: {0}")]
    Serialization(String),
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl FnMetricsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FnMetricsError::UpstreamUnavailable(_) => ErrorKind::UpstreamUnavailable,
            FnMetricsError::UpstreamMalformed(_) => ErrorKind::UpstreamMalformed,
            FnMetricsError::MissingUpstreamBody(_) => ErrorKind::MissingUpstreamBody,
            FnMetricsError::MetricsBackend(_) => ErrorKind::MetricsBackend,
            FnMetricsError::MetricValueParse(_) => ErrorKind::MetricValueParse,
            FnMetricsError::Serialization(_) => ErrorKind::Serialization,
            FnMetricsError::BadConfig(_) => ErrorKind::BadConfig,
            FnMetricsError::UnsupportedVersion => ErrorKind::UnsupportedVersion,
            FnMetricsError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Short caller-facing diagnostic. Never carries the wrapped error text.
    pub fn client_message(&self) -> String {
        match self {
            FnMetricsError::UpstreamUnavailable(code) => {
                format!("Error pulling metrics from provider/backend. Status code: {code}")
            }
            FnMetricsError::UpstreamMalformed(_) => {
                "Error parsing metrics from upstream provider/backend.".into()
            }
            FnMetricsError::MissingUpstreamBody(_) => {
                "Error reading function list from upstream provider/backend.".into()
            }
            FnMetricsError::Serialization(_) => {
                "Error serializing function list with metrics.".into()
            }
            _ => "Internal error.".into(),
        }
    }
}
