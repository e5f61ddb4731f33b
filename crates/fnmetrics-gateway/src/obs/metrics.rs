//! Minimal metrics registry for the gateway.
//!
//! Labels are flattened into sorted key vectors backed by `DashMap` to keep
//! deterministic series identity. Histogram buckets are fixed in microseconds
//! to avoid floating point math.

use dashmap::DashMap;
use fnmetrics_core::error::{ErrorKind, FnMetricsError};
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn label_key(labels: &[(&str, &str)]) -> Vec<(String, String)> {
    let mut key: Vec<(String, String)> = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

fn label_str(key: &[(String, String)]) -> String {
    key.iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<Vec<(String, String)>, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let counter = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value of one series (0 if never touched).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} counter", name);
        for r in self.map.iter() {
            let val = r.value().load(Ordering::Relaxed);
            let _ = writeln!(out, "{}{{{}}} {}", name, label_str(r.key()), val);
        }
    }
}

// 1ms, 5ms, 10ms, 50ms, 100ms, 500ms, 1s, 5s, 10s
const BUCKETS_MICROS: [u64; 9] = [
    1_000, 5_000, 10_000, 50_000, 100_000, 500_000, 1_000_000, 5_000_000, 10_000_000,
];

#[derive(Default)]
struct AtomicHistogram {
    count: AtomicU64,
    sum: AtomicU64,
    buckets: [AtomicU64; 9],
}

#[derive(Default)]
pub struct HistogramVec {
    map: DashMap<Vec<(String, String)>, AtomicHistogram>,
}

impl HistogramVec {
    /// Observe a duration into cumulative buckets (microsecond scale).
    pub fn observe(&self, labels: &[(&str, &str)], duration: Duration) {
        let hist = self
            .map
            .entry(label_key(labels))
            .or_insert_with(AtomicHistogram::default);
        let micros = duration.as_micros() as u64;

        hist.count.fetch_add(1, Ordering::Relaxed);
        hist.sum.fetch_add(micros, Ordering::Relaxed);

        for (i, &b) in BUCKETS_MICROS.iter().enumerate() {
            if micros <= b {
                hist.buckets[i].fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Number of observations of one series.
    pub fn count(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|h| h.count.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} histogram", name);
        for r in self.map.iter() {
            let hist = r.value();
            let labels = label_str(r.key());
            let prefix = if labels.is_empty() {
                String::new()
            } else {
                format!("{},", labels)
            };

            for (i, &le) in BUCKETS_MICROS.iter().enumerate() {
                let count = hist.buckets[i].load(Ordering::Relaxed);
                let _ = writeln!(out, "{}_bucket{{{}le=\"{}\"}} {}", name, prefix, le, count);
            }
            let count = hist.count.load(Ordering::Relaxed);
            let _ = writeln!(out, "{}_bucket{{{}le=\"+Inf\"}} {}", name, prefix, count);

            let sum = hist.sum.load(Ordering::Relaxed);
            let _ = writeln!(out, "{}_sum{{{}}} {}", name, labels, sum);
            let _ = writeln!(out, "{}_count{{{}}} {}", name, labels, count);
        }
    }
}

/// Terminal state of one pass through the enrichment middleware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Enriched,
    /// Metrics backend failed; upstream body passed through.
    Fallback,
    UpstreamError,
    UpstreamMalformed,
    MissingBody,
    SerializeFailed,
    /// Any other error surfacing from the enrichment pass.
    Internal,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Enriched => "enriched",
            Outcome::Fallback => "fallback",
            Outcome::UpstreamError => "upstream_error",
            Outcome::UpstreamMalformed => "upstream_malformed",
            Outcome::MissingBody => "missing_body",
            Outcome::SerializeFailed => "serialize_failed",
            Outcome::Internal => "internal",
        }
    }

    /// Outcome counted for a request that ended in `e`.
    pub fn for_error(e: &FnMetricsError) -> Self {
        match e.kind() {
            ErrorKind::UpstreamUnavailable => Outcome::UpstreamError,
            ErrorKind::UpstreamMalformed => Outcome::UpstreamMalformed,
            ErrorKind::MissingUpstreamBody => Outcome::MissingBody,
            ErrorKind::Serialization => Outcome::SerializeFailed,
            ErrorKind::MetricsBackend
            | ErrorKind::MetricValueParse
            | ErrorKind::BadConfig
            | ErrorKind::UnsupportedVersion
            | ErrorKind::Internal => Outcome::Internal,
        }
    }
}

#[derive(Default)]
pub struct GatewayMetrics {
    pub enrichment_outcomes: CounterVec,
    pub backend_query_errors: CounterVec,
    pub backend_query_duration: HistogramVec, // In Microseconds
    pub provider_errors: CounterVec,
}

impl GatewayMetrics {
    pub fn record_outcome(&self, outcome: Outcome) {
        self.enrichment_outcomes.inc(&[("outcome", outcome.as_str())]);
    }

    pub fn outcome_count(&self, outcome: Outcome) -> u64 {
        self.enrichment_outcomes.get(&[("outcome", outcome.as_str())])
    }

    /// Render all registered metrics in Prometheus text exposition format.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.enrichment_outcomes.render("fnmetrics_enrichment_total", &mut out);
        self.backend_query_errors.render("fnmetrics_backend_query_errors_total", &mut out);
        self.backend_query_duration
            .render("fnmetrics_backend_query_duration_micros", &mut out);
        self.provider_errors.render("fnmetrics_provider_errors_total", &mut out);
        out
    }
}
