//! Full router: provider proxy behind the enrichment middleware.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::RawQuery,
    http::{Request, StatusCode},
    routing::get,
    Router,
};
use tower::ServiceExt;

use fnmetrics_core::error::Result;
use fnmetrics_core::query::{MetricValue, QueryResponse, Sample, SampleLabels};
use fnmetrics_core::MetricQuery;
use fnmetrics_gateway::app_state::AppState;
use fnmetrics_gateway::backend::QueryFetcher;
use fnmetrics_gateway::{config, router};

struct CountsOnly;

#[async_trait]
impl QueryFetcher for CountsOnly {
    async fn fetch(&self, encoded_expr: &str) -> Result<QueryResponse> {
        if encoded_expr == MetricQuery::Invocations.encoded() {
            return Ok(QueryResponse::from_samples(vec![Sample {
                metric: SampleLabels {
                    function_name: Some("figlet".into()),
                    code: Some("200".into()),
                },
                value: (0.0, MetricValue::Text("7".into())),
            }]));
        }
        Ok(QueryResponse::default())
    }
}

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn state_for(provider_url: &str) -> AppState {
    let yaml = format!("version: 1\nprovider:\n  url: \"{provider_url}\"\n");
    let cfg = config::load_from_str(&yaml).unwrap();
    AppState::with_fetcher(cfg, Arc::new(CountsOnly)).unwrap()
}

async fn get_body(app: Router, uri: &str) -> (StatusCode, String) {
    let resp = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn proxies_provider_list_and_enriches() {
    let provider = Router::new().route(
        "/system/functions",
        get(|RawQuery(q): RawQuery| async move {
            let ns = q
                .and_then(|q| q.strip_prefix("namespace=").map(str::to_string))
                .unwrap_or_else(|| "default".into());
            serde_json::json!([{ "name": "figlet", "namespace": ns, "replicas": 1 }]).to_string()
        }),
    );
    let base = spawn(provider).await;

    let app = router::build_router(state_for(&base));
    let (status, body) = get_body(app, "/system/functions?namespace=openfaas-fn").await;
    assert_eq!(status, StatusCode::OK);

    let out: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(out[0]["name"], "figlet");
    assert_eq!(out[0]["namespace"], "openfaas-fn");
    assert_eq!(out[0]["replicas"], 1);
    assert_eq!(out[0]["invocationCount"], 7.0);
    assert_eq!(out[0]["averageResponseTime"], 0.0);
}

#[tokio::test]
async fn provider_error_status_is_reported() {
    let provider = Router::new().route(
        "/system/functions",
        get(|| async { (StatusCode::NOT_FOUND, "no such namespace") }),
    );
    let base = spawn(provider).await;

    let app = router::build_router(state_for(&base));
    let (status, body) = get_body(app, "/system/functions").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("404"), "{body}");
}

#[tokio::test]
async fn provider_unreachable_is_reported_as_502() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let state = state_for(&format!("http://{addr}"));
    let app = router::build_router(state.clone());
    let (status, body) = get_body(app, "/system/functions").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("502"), "{body}");
    assert_eq!(state.metrics().provider_errors.get(&[("reason", "unreachable")]), 1);
}
