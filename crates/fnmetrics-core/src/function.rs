//! Function records as exposed by the listing endpoint.
//!
//! Only the identity (`name`) and the four derived metric fields are typed.
//! Every other field the provider sends is kept in `extra` and written back
//! untouched.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{FnMetricsError, Result};

/// One deployed function plus its derived invocation metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionRecord {
    /// Unique key used to match metric samples (`function_name` label).
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    /// Total invocations, all status codes.
    #[serde(rename = "invocationCount", default, deserialize_with = "null_as_default")]
    pub invocation_count: f64,

    /// Invocations answered with a 2xx code.
    #[serde(rename = "invocationCount2XX", default, deserialize_with = "null_as_default")]
    pub invocation_count_2xx: f64,

    /// Invocations answered with anything but 2xx.
    #[serde(rename = "invocationCountNon2XX", default, deserialize_with = "null_as_default")]
    pub invocation_count_non_2xx: f64,

    /// Average response time in seconds.
    #[serde(rename = "averageResponseTime", default, deserialize_with = "null_as_default")]
    pub average_response_time: f64,

    /// Provider metadata (image, replicas, labels, ...), passed through as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FunctionRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Zero the four derived fields.
    pub fn reset_metrics(&mut self) {
        self.invocation_count = 0.0;
        self.invocation_count_2xx = 0.0;
        self.invocation_count_non_2xx = 0.0;
        self.average_response_time = 0.0;
    }
}

/// `null` reads as the type's zero value, like an absent field.
fn null_as_default<'de, D, T>(de: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

/// Decode an upstream function list. A JSON `null` is an empty list.
pub fn parse_function_list(body: &[u8]) -> Result<Vec<FunctionRecord>> {
    let list: Option<Vec<FunctionRecord>> = serde_json::from_slice(body)
        .map_err(|e| FnMetricsError::UpstreamMalformed(e.to_string()))?;
    Ok(list.unwrap_or_default())
}

/// Encode a function list for the outbound response.
pub fn to_json(functions: &[FunctionRecord]) -> Result<Vec<u8>> {
    serde_json::to_vec(functions).map_err(|e| FnMetricsError::Serialization(e.to_string()))
}
