//! Sample value parsing.

use crate::error::{FnMetricsError, Result};
use crate::query::MetricValue;

/// Convert a sample value into a number.
///
/// Strings are parsed as base-10 floats. Non-finite results (`NaN`, `+Inf`)
/// are rejected: they would not survive JSON encoding as numbers. Errors are
/// logged here; callers treat them as "no value".
pub fn parse_metric_value(value: &MetricValue) -> Result<f64> {
    match value {
        MetricValue::Text(s) => match s.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            Ok(_) => {
                tracing::warn!(value = %s, "non-finite metric value");
                Err(FnMetricsError::MetricValueParse(format!("non-finite value: {s}")))
            }
            Err(e) => {
                tracing::warn!(value = %s, error = %e, "unable to convert value for metric");
                Err(FnMetricsError::MetricValueParse(format!("{s:?}: {e}")))
            }
        },
        MetricValue::Unsupported(v) => {
            tracing::warn!(value = %v, "unsupported metric value type");
            Err(FnMetricsError::MetricValueParse(format!("unsupported value type: {v}")))
        }
    }
}
