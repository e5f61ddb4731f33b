//! Enrichment middleware for the function-listing route.
//!
//! Request flow:
//! - run the wrapped listing handler; its response is captured here and never
//!   reaches the client directly
//! - buffer the body, check status, decode the function list
//! - fan out the four metric queries, join them
//! - merge samples into the records and answer with the enriched list
//!
//! Metrics are best-effort: if any query fails the captured upstream body is
//! returned verbatim with 200. Upstream failures become a 500 with a short
//! plain-text diagnostic.

use std::time::Instant;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use futures_util::future::try_join4;

use fnmetrics_core::error::{FnMetricsError, Result};
use fnmetrics_core::function::{parse_function_list, to_json};
use fnmetrics_core::query::QueryResponse;
use fnmetrics_core::{merge, MetricQuery, MetricSet};

use crate::app_state::AppState;
use crate::obs::Outcome;

pub async fn add_metrics(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let upstream = next.run(req).await;

    match enrich(&state, upstream).await {
        Ok((outcome, body)) => {
            state.metrics().record_outcome(outcome);
            json_ok(body)
        }
        Err(e) => {
            state.metrics().record_outcome(Outcome::for_error(&e));
            plain_error(&e)
        }
    }
}

async fn enrich(state: &AppState, upstream: Response) -> Result<(Outcome, Bytes)> {
    let (parts, body) = upstream.into_parts();

    let raw = axum::body::to_bytes(body, state.max_upstream_body_bytes())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "upstream call had no readable body");
            FnMetricsError::MissingUpstreamBody(e.to_string())
        })?;

    if parts.status != StatusCode::OK {
        tracing::warn!(status = parts.status.as_u16(), "upstream listing failed");
        return Err(FnMetricsError::UpstreamUnavailable(parts.status.as_u16()));
    }

    let mut functions = parse_function_list(&raw).map_err(|e| {
        tracing::warn!(error = %e, "metrics upstream error");
        e
    })?;

    let metrics = match fetch_all(state).await {
        Ok(m) => m,
        Err(e) => {
            tracing::warn!(error = %e, "error querying metrics backend, returning list without metrics");
            return Ok((Outcome::Fallback, raw));
        }
    };

    merge(&mut functions, &metrics);

    let out = to_json(&functions).map_err(|e| {
        tracing::error!(error = %e, "enriched function list not serializable");
        e
    })?;

    tracing::debug!(functions = functions.len(), "function list enriched");
    Ok((Outcome::Enriched, Bytes::from(out)))
}

/// Issue the four queries concurrently. The first failure cancels the rest.
async fn fetch_all(state: &AppState) -> Result<MetricSet> {
    let (invocations, invocations_2xx, invocations_non_2xx, average_response_time) = try_join4(
        fetch_one(state, MetricQuery::Invocations),
        fetch_one(state, MetricQuery::Invocations2xx),
        fetch_one(state, MetricQuery::InvocationsNon2xx),
        fetch_one(state, MetricQuery::AverageResponseTime),
    )
    .await?;

    Ok(MetricSet {
        invocations,
        invocations_2xx,
        invocations_non_2xx,
        average_response_time,
    })
}

async fn fetch_one(state: &AppState, query: MetricQuery) -> Result<QueryResponse> {
    let started = Instant::now();
    let res = state.fetcher().fetch(&query.encoded()).await;

    let labels = [("query", query.label())];
    state
        .metrics()
        .backend_query_duration
        .observe(&labels, started.elapsed());
    if let Err(e) = &res {
        state.metrics().backend_query_errors.inc(&labels);
        tracing::debug!(query = query.label(), error = %e, "metrics query failed");
    }
    res
}

fn json_ok(body: Bytes) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Body::from(body),
    )
        .into_response()
}

fn plain_error(e: &FnMetricsError) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONTENT_TYPE, "text/plain")],
        e.client_message(),
    )
        .into_response()
}
