//! Axum router wiring.
//!
//! `/system/functions` is the provider proxy wrapped by the enrichment
//! middleware; `/healthz` and `/metrics` are operational.

use axum::{middleware, routing::get, routing::MethodRouter, Router};

use crate::{app_state::AppState, enrich, ops, upstream};

pub fn build_router(state: AppState) -> Router {
    build_router_with_listing(state, get(upstream::list_functions))
}

/// Same routes, with `listing` as the handler behind the enrichment middleware.
///
/// The layer sits on the method router itself so only the listing's own
/// methods are enriched; anything else gets axum's plain 405.
pub fn build_router_with_listing(state: AppState, listing: MethodRouter<AppState>) -> Router {
    let listing =
        listing.route_layer(middleware::from_fn_with_state(state.clone(), enrich::add_metrics));

    Router::new()
        .route(upstream::FUNCTIONS_PATH, listing)
        .route("/healthz", get(ops::healthz))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
