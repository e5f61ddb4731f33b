//! Top-level facade crate for fnmetrics.
//!
//! Re-exports the domain crate and the gateway library so users can depend on a single crate.

pub mod core {
    pub use fnmetrics_core::*;
}

pub mod gateway {
    pub use fnmetrics_gateway::*;
}
