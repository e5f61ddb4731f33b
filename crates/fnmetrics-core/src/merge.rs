//! Merge engine: fold query results into function records.
//!
//! Invariant: every derived field is reset before accumulation, so merging the
//! same inputs twice gives the same records as merging once.

use crate::function::FunctionRecord;
use crate::query::QueryResponse;

/// The four query results of one enrichment pass.
#[derive(Debug, Clone, Default)]
pub struct MetricSet {
    /// Invocations per function and code (summed across codes).
    pub invocations: QueryResponse,
    pub invocations_2xx: QueryResponse,
    pub invocations_non_2xx: QueryResponse,
    /// Average response time per function, seconds.
    pub average_response_time: QueryResponse,
}

/// Reset then accumulate the derived fields of every record.
///
/// Samples match on exact `function_name == record.name`. Duplicate samples
/// for one function are summed. Unmatched or unparseable samples contribute
/// nothing. Never fails.
pub fn merge(functions: &mut [FunctionRecord], metrics: &MetricSet) {
    for f in functions.iter_mut() {
        f.reset_metrics();
    }
    if functions.is_empty() {
        return;
    }

    let invocations = metrics.invocations.totals_by_function();
    let ok = metrics.invocations_2xx.totals_by_function();
    let not_ok = metrics.invocations_non_2xx.totals_by_function();
    let latency = metrics.average_response_time.totals_by_function();

    for f in functions.iter_mut() {
        let name = f.name.as_str();
        f.invocation_count += invocations.get(name).copied().unwrap_or(0.0);
        f.invocation_count_2xx += ok.get(name).copied().unwrap_or(0.0);
        f.invocation_count_non_2xx += not_ok.get(name).copied().unwrap_or(0.0);
        f.average_response_time += latency.get(name).copied().unwrap_or(0.0);
    }
}
