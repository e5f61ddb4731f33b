//! fnmetrics gateway library entry.
//!
//! This crate wires the provider proxy, the metrics backend client, and the
//! enrichment middleware into an axum router. It is intended to be consumed by
//! the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod backend;
pub mod config;
pub mod enrich;
pub mod obs;
pub mod ops;
pub mod router;
pub mod upstream;
