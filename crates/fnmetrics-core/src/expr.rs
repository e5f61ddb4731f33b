//! The fixed aggregation expressions sent to the metrics backend.
//!
//! These strings are a contract with any drop-in backend; do not reformat them.

/// One of the four enrichment queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricQuery {
    /// All invocations, grouped by function and status code.
    Invocations,
    /// Invocations with a 2xx status code.
    Invocations2xx,
    /// Invocations with any other status code.
    InvocationsNon2xx,
    /// Mean of duration sum over observation count.
    AverageResponseTime,
}

impl MetricQuery {
    pub const ALL: [MetricQuery; 4] = [
        MetricQuery::Invocations,
        MetricQuery::Invocations2xx,
        MetricQuery::InvocationsNon2xx,
        MetricQuery::AverageResponseTime,
    ];

    /// Raw expression text.
    pub fn expression(self) -> &'static str {
        match self {
            MetricQuery::Invocations => {
                r#"sum(gateway_function_invocation_total{function_name=~".*", code=~".*"}) by (function_name, code)"#
            }
            MetricQuery::Invocations2xx => {
                r#"sum(gateway_function_invocation_total {function_name=~".*", code=~"2.*"}) by (function_name)"#
            }
            MetricQuery::InvocationsNon2xx => {
                r#"sum(gateway_function_invocation_total {function_name=~".*", code!~"2.*"}) by (function_name)"#
            }
            MetricQuery::AverageResponseTime => {
                r#"avg(gateway_functions_seconds_sum/gateway_functions_seconds_count {function_name=~".*"}) by (function_name)"#
            }
        }
    }

    /// Expression escaped for use as a query-string value (space becomes `+`).
    pub fn encoded(self) -> String {
        url::form_urlencoded::byte_serialize(self.expression().as_bytes()).collect()
    }

    /// Short stable name for logs and counter labels.
    pub fn label(self) -> &'static str {
        match self {
            MetricQuery::Invocations => "invocations",
            MetricQuery::Invocations2xx => "invocations_2xx",
            MetricQuery::InvocationsNon2xx => "invocations_non_2xx",
            MetricQuery::AverageResponseTime => "average_response_time",
        }
    }
}
