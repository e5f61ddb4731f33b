//! fnmetrics core: function list model, metrics query model, and the merge
//! engine that enriches function records with invocation/latency samples.
//!
//! This crate carries no HTTP or runtime dependencies. The gateway crate feeds
//! it raw bytes (upstream function list, backend query responses) and gets back
//! enriched records or a `FnMetricsError`.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed backend data degrades to zero-valued fields instead of crashing
//! the request.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod expr;
pub mod function;
pub mod merge;
pub mod query;
pub mod value;

/// Shared result type.
pub use error::{FnMetricsError, Result};
pub use expr::MetricQuery;
pub use function::FunctionRecord;
pub use merge::{merge, MetricSet};
pub use query::{MetricValue, QueryResponse, Sample};
