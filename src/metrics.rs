//! Metric names and recording helpers for pipeline runs.
//!
//! Recording goes through the `metrics` facade; nothing is exported unless the
//! embedding application installs a recorder.

use std::fmt;

/// All metric names emitted by the crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    PipelineRunsSuccess,
    PipelineRunsError,
    PipelineDuration,
    PipelineBytesRead,
    PipelineRecordsParsed,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::PipelineRunsSuccess => "etl_pipeline_runs_success_total",
            MetricName::PipelineRunsError => "etl_pipeline_runs_error_total",
            MetricName::PipelineDuration => "etl_pipeline_duration_seconds",
            MetricName::PipelineBytesRead => "etl_pipeline_bytes_read",
            MetricName::PipelineRecordsParsed => "etl_pipeline_records_parsed_total",
        }
    }

    pub fn all_metrics() -> impl Iterator<Item = MetricName> {
        [
            MetricName::PipelineRunsSuccess,
            MetricName::PipelineRunsError,
            MetricName::PipelineDuration,
            MetricName::PipelineBytesRead,
            MetricName::PipelineRecordsParsed,
        ]
        .into_iter()
    }

    /// (description, unit)
    pub fn metadata(&self) -> (&'static str, Option<&'static str>) {
        match self {
            MetricName::PipelineRunsSuccess => ("Successful pipeline runs", None),
            MetricName::PipelineRunsError => ("Failed pipeline runs by error kind", None),
            MetricName::PipelineDuration => ("Pipeline run duration", Some("s")),
            MetricName::PipelineBytesRead => ("Raw source size", Some("bytes")),
            MetricName::PipelineRecordsParsed => ("Records produced by parse", None),
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registers descriptions with whatever recorder is installed.
pub fn describe_all() {
    for metric in MetricName::all_metrics() {
        let (description, _) = metric.metadata();
        match metric {
            MetricName::PipelineDuration | MetricName::PipelineBytesRead => {
                ::metrics::describe_histogram!(metric.as_str(), description);
            }
            _ => {
                ::metrics::describe_counter!(metric.as_str(), description);
            }
        }
    }
}

// ============================================================================
// Pipeline Metrics
// ============================================================================

pub mod pipeline {
    use super::MetricName;

    pub fn run_success(pipeline: &'static str) {
        ::metrics::counter!(MetricName::PipelineRunsSuccess.as_str(), "pipeline" => pipeline)
            .increment(1);
    }

    pub fn run_error(pipeline: &'static str, error_kind: &'static str) {
        ::metrics::counter!(
            MetricName::PipelineRunsError.as_str(),
            "pipeline" => pipeline,
            "error_kind" => error_kind
        )
        .increment(1);
    }

    pub fn duration(pipeline: &'static str, secs: f64) {
        ::metrics::histogram!(MetricName::PipelineDuration.as_str(), "pipeline" => pipeline)
            .record(secs);
    }

    pub fn bytes_read(pipeline: &'static str, bytes: usize) {
        ::metrics::histogram!(MetricName::PipelineBytesRead.as_str(), "pipeline" => pipeline)
            .record(bytes as f64);
    }

    pub fn records_parsed(pipeline: &'static str, count: usize) {
        ::metrics::counter!(MetricName::PipelineRecordsParsed.as_str(), "pipeline" => pipeline)
            .increment(count as u64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_names_follow_convention() {
        for metric in MetricName::all_metrics() {
            assert!(metric.as_str().starts_with("etl_pipeline_"));
            assert_eq!(metric.to_string(), metric.as_str());
        }
        assert_eq!(MetricName::all_metrics().count(), 5);
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        describe_all();
        pipeline::run_success("csv_to_json");
        pipeline::run_error("json_stats", "format");
        pipeline::duration("csv_to_json", 0.01);
        pipeline::bytes_read("csv_to_json", 42);
        pipeline::records_parsed("json_stats", 3);
    }
}
