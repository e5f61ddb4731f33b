//! Facade re-export paths.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use fnmetrics::core::function::parse_function_list;
use fnmetrics::core::{merge, MetricQuery, MetricSet};
use fnmetrics::gateway::config;

#[test]
fn core_reachable_through_facade() {
    let mut functions = parse_function_list(br#"[{"name":"fn1","invocationCount":3}]"#).unwrap();
    merge(&mut functions, &MetricSet::default());
    assert_eq!(functions[0].invocation_count, 0.0);
    assert!(MetricQuery::Invocations.expression().starts_with("sum("));
}

#[test]
fn gateway_reachable_through_facade() {
    let cfg = config::load_from_str("version: 1\nprovider:\n  url: \"http://faas-provider:8081\"\n")
        .unwrap();
    assert_eq!(cfg.prometheus.port, 9090);
}
