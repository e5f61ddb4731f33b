//! Instant-vector query responses from the metrics backend.
//!
//! Wire shape:
//! `{ "status": "success", "data": { "resultType": "vector", "result": [
//!    { "metric": { "function_name": "fn1", "code": "200" }, "value": [1700000000.1, "10"] } ] } }`
//!
//! The sample value is closed over at the deserialization boundary: either a
//! string (the normal case) or anything else, kept as `Unsupported`.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::{FnMetricsError, Result};
use crate::value::parse_metric_value;

/// Backend-native scalar of a sample.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Text(String),
    Unsupported(serde_json::Value),
}

/// Labels of a sample. Only the ones used for matching are typed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SampleLabels {
    #[serde(default)]
    pub function_name: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

/// One labeled observation: `(timestamp, value)`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Sample {
    #[serde(default)]
    pub metric: SampleLabels,
    pub value: (f64, MetricValue),
}

impl Sample {
    pub fn function_name(&self) -> Option<&str> {
        self.metric.function_name.as_deref()
    }

    pub fn timestamp(&self) -> f64 {
        self.value.0
    }

    pub fn metric_value(&self) -> &MetricValue {
        &self.value.1
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct QueryData {
    #[serde(rename = "resultType", default)]
    pub result_type: Option<String>,
    #[serde(default)]
    pub result: Vec<Sample>,
}

/// Parsed query response. Owned by the request that fetched it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub data: QueryData,
}

impl QueryResponse {
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body)
            .map_err(|e| FnMetricsError::MetricsBackend(format!("decode query response: {e}")))
    }

    pub fn from_samples(samples: Vec<Sample>) -> Self {
        Self {
            status: Some("success".into()),
            data: QueryData {
                result_type: Some("vector".into()),
                result: samples,
            },
        }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.data.result
    }

    pub fn is_empty(&self) -> bool {
        self.data.result.is_empty()
    }

    /// Sum of parsed values per `function_name`.
    ///
    /// Samples without the label or with an unparseable value contribute nothing.
    pub fn totals_by_function(&self) -> HashMap<&str, f64> {
        let mut totals: HashMap<&str, f64> = HashMap::new();
        for sample in self.samples() {
            let Some(name) = sample.function_name() else {
                continue;
            };
            if let Ok(v) = parse_metric_value(sample.metric_value()) {
                *totals.entry(name).or_insert(0.0) += v;
            }
        }
        totals
    }
}
