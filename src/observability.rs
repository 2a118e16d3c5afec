//! Metric names and recording helpers for catalog traffic.
//!
//! Recording goes through the `metrics` facade; nothing is exported unless the
//! embedding application installs a recorder.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    RequestsIssued,
    RequestFailures,
    RequestDuration,
    MeasuresFetches,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::RequestsIssued => "redlist_requests_total",
            MetricName::RequestFailures => "redlist_request_failures_total",
            MetricName::RequestDuration => "redlist_request_duration_seconds",
            MetricName::MeasuresFetches => "redlist_measures_fetches_total",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub mod catalog {
    use super::MetricName;

    /// Record an outbound request for a stage
    pub fn request_issued(stage: &'static str) {
        ::metrics::counter!(MetricName::RequestsIssued.as_str(), "stage" => stage).increment(1);
    }

    /// Record a failed request, transport and decode alike
    pub fn request_failed(stage: &'static str) {
        ::metrics::counter!(MetricName::RequestFailures.as_str(), "stage" => stage).increment(1);
    }

    pub fn request_duration(stage: &'static str, secs: f64) {
        ::metrics::histogram!(MetricName::RequestDuration.as_str(), "stage" => stage).record(secs);
    }

    /// Size of one fan-out batch
    pub fn measures_fanout(count: usize) {
        ::metrics::counter!(MetricName::MeasuresFetches.as_str()).increment(count as u64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_names_are_prefixed() {
        for name in [
            MetricName::RequestsIssued,
            MetricName::RequestFailures,
            MetricName::RequestDuration,
            MetricName::MeasuresFetches,
        ] {
            assert!(name.to_string().starts_with("redlist_"));
        }
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        catalog::request_issued("regions");
        catalog::request_failed("regions");
        catalog::request_duration("regions", 0.25);
        catalog::measures_fanout(3);
    }
}
