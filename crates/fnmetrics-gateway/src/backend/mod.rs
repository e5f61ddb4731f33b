//! Metrics backend access.
//!
//! The enrichment middleware only sees the `QueryFetcher` capability; the
//! binary plugs in `PrometheusClient`, tests plug in stubs.

pub mod prometheus;

use async_trait::async_trait;

use fnmetrics_core::error::Result;
use fnmetrics_core::query::QueryResponse;

pub use prometheus::PrometheusClient;

/// Fetch one instant-vector query result by expression.
///
/// `encoded_expr` is already escaped for use as a query-string value.
#[async_trait]
pub trait QueryFetcher: Send + Sync {
    async fn fetch(&self, encoded_expr: &str) -> Result<QueryResponse>;
}
