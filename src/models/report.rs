use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

/// A single value returned by one introspection query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Text(String),
    Integer(i64),
    Timestamp(DateTime<Utc>),
    Null,
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Text(s) => write!(f, "{}", s),
            MetricValue::Integer(n) => write!(f, "{}", n),
            MetricValue::Timestamp(t) => write!(f, "{}", t),
            MetricValue::Null => write!(f, "N/A"),
        }
    }
}

impl MetricValue {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            MetricValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetricValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Wall-clock timings for one probe, in seconds rounded to millisecond
/// precision. All three values stay zero when the probe never got as far as
/// opening a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub connection_time: f64,
    pub query_time: f64,
    pub total_time: f64,
}

impl PerformanceMetrics {
    pub fn from_durations(connection: Duration, query: Duration, total: Duration) -> Self {
        Self {
            connection_time: round_seconds(connection),
            query_time: round_seconds(query),
            total_time: round_seconds(total),
        }
    }
}

/// Seconds with 3 decimal digits. Rounding is monotonic, so
/// `total >= connection` survives it.
pub(crate) fn round_seconds(d: Duration) -> f64 {
    (d.as_secs_f64() * 1000.0).round() / 1000.0
}

/// Outcome of one probe run. Always returned, never thrown: every failure
/// path lands in `error_message` instead.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionTestResult {
    pub host_reachable: bool,
    pub connection_successful: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Ordered metric map, present only after a session was established.
    /// When a query mid-battery fails, the entries gathered before it stay
    /// and a single `error` entry is appended.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detailed_info: Option<IndexMap<String, MetricValue>>,
    pub performance_metrics: PerformanceMetrics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_millisecond_precision() {
        assert_eq!(round_seconds(Duration::from_micros(1_234_567)), 1.235);
        assert_eq!(round_seconds(Duration::from_millis(42)), 0.042);
        assert_eq!(round_seconds(Duration::ZERO), 0.0);
    }

    #[test]
    fn metric_value_serializes_untagged() {
        let json = serde_json::to_string(&MetricValue::Integer(7)).unwrap();
        assert_eq!(json, "7");
        let json = serde_json::to_string(&MetricValue::Text("14 MB".into())).unwrap();
        assert_eq!(json, "\"14 MB\"");
        let json = serde_json::to_string(&MetricValue::Null).unwrap();
        assert_eq!(json, "null");
    }

    #[test]
    fn result_serializes_camel_case() {
        let result = ConnectionTestResult {
            host_reachable: true,
            ..Default::default()
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["hostReachable"], true);
        assert_eq!(json["connectionSuccessful"], false);
        assert!(json.get("errorMessage").is_none());
        assert_eq!(json["performanceMetrics"]["totalTime"], 0.0);
    }
}
