//! Prometheus client against an in-process HTTP server.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::HashMap;

use axum::{extract::Query, http::StatusCode, response::IntoResponse, routing::get, Router};

use fnmetrics_core::query::MetricValue;
use fnmetrics_core::MetricQuery;
use fnmetrics_gateway::backend::{PrometheusClient, QueryFetcher};
use fnmetrics_gateway::config::PrometheusSection;

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn echo_query(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    let expr = params.get("query").cloned().unwrap_or_default();
    serde_json::json!({
        "status": "success",
        "data": {
            "resultType": "vector",
            "result": [
                { "metric": { "function_name": expr }, "value": [1700000000.5, "3"] }
            ]
        }
    })
    .to_string()
}

fn client(base: &str) -> PrometheusClient {
    PrometheusClient::with_base_url(&PrometheusSection::default(), base).unwrap()
}

#[test]
fn default_base_url_from_config() {
    let c = PrometheusClient::new(&PrometheusSection::default()).unwrap();
    assert_eq!(c.query_url("up"), "http://prometheus:9090/api/v1/query?query=up");
}

#[tokio::test]
async fn fetch_decodes_vector_and_sends_expression() {
    let base = spawn(Router::new().route("/api/v1/query", get(echo_query))).await;
    let c = client(&base);

    let q = MetricQuery::InvocationsNon2xx;
    let resp = c.fetch(&q.encoded()).await.unwrap();
    let sample = &resp.samples()[0];
    // the server saw the decoded expression
    assert_eq!(sample.function_name(), Some(q.expression()));
    assert_eq!(sample.metric_value(), &MetricValue::Text("3".into()));
}

#[tokio::test]
async fn non_200_is_backend_error() {
    let app = Router::new().route(
        "/api/v1/query",
        get(|| async { (StatusCode::BAD_REQUEST, "parse error at char 4") }),
    );
    let base = spawn(app).await;

    let err = client(&base).fetch("up").await.expect_err("must fail");
    assert_eq!(err.kind().as_str(), "METRICS_BACKEND");
    let msg = err.to_string();
    assert!(msg.contains("400"), "{msg}");
    assert!(msg.contains("parse error at char 4"), "{msg}");
}

#[tokio::test]
async fn garbage_body_is_backend_error() {
    let app = Router::new().route("/api/v1/query", get(|| async { "not json" }));
    let base = spawn(app).await;

    let err = client(&base).fetch("up").await.expect_err("must fail");
    assert_eq!(err.kind().as_str(), "METRICS_BACKEND");
}

#[tokio::test]
async fn unreachable_backend_is_backend_error() {
    // bind then drop to get a port nobody listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{addr}"))
        .fetch("up")
        .await
        .expect_err("must fail");
    assert_eq!(err.kind().as_str(), "METRICS_BACKEND");
}
