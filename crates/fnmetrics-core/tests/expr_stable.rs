//! Query expression contract tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use fnmetrics_core::MetricQuery;

#[test]
fn expressions_are_stable() {
    assert_eq!(
        MetricQuery::Invocations.expression(),
        r#"sum(gateway_function_invocation_total{function_name=~".*", code=~".*"}) by (function_name, code)"#
    );
    assert_eq!(
        MetricQuery::Invocations2xx.expression(),
        r#"sum(gateway_function_invocation_total {function_name=~".*", code=~"2.*"}) by (function_name)"#
    );
    assert_eq!(
        MetricQuery::InvocationsNon2xx.expression(),
        r#"sum(gateway_function_invocation_total {function_name=~".*", code!~"2.*"}) by (function_name)"#
    );
    assert_eq!(
        MetricQuery::AverageResponseTime.expression(),
        r#"avg(gateway_functions_seconds_sum/gateway_functions_seconds_count {function_name=~".*"}) by (function_name)"#
    );
}

#[test]
fn encoded_round_trips_through_query_string() {
    for q in MetricQuery::ALL {
        let encoded = q.encoded();
        assert!(!encoded.contains(' '));
        assert!(!encoded.contains('"'));
        assert!(!encoded.contains('{'));

        let qs = format!("query={encoded}");
        let (key, value) = url::form_urlencoded::parse(qs.as_bytes()).next().unwrap();
        assert_eq!(key, "query");
        assert_eq!(value, q.expression());
    }
}

#[test]
fn encoded_uses_plus_for_space() {
    let encoded = MetricQuery::Invocations2xx.encoded();
    assert!(encoded.starts_with("sum%28gateway_function_invocation_total+%7B"));
}

#[test]
fn labels_are_unique() {
    let mut labels: Vec<_> = MetricQuery::ALL.iter().map(|q| q.label()).collect();
    labels.sort();
    labels.dedup();
    assert_eq!(labels.len(), 4);
}
