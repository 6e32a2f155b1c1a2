use crate::constants;
use crate::error::{PipelineError, Result};
use crate::metrics;
use crate::pipeline::template::{Pipeline, PipelineSteps};
use serde::Serialize;
use serde_json::{Number, Value};
use tracing::{debug, info};

/// Summary of a JSON array of numbers.
///
/// `max` keeps the JSON representation of the winning element, so an integer
/// input serializes back as an integer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pub count: usize,
    pub avg: f64,
    pub max: Option<Number>,
}

impl Stats {
    pub fn from_values(values: &[Value]) -> Result<Self> {
        let mut sum = 0.0_f64;
        let mut max: Option<(f64, &Number)> = None;

        for (index, value) in values.iter().enumerate() {
            let (number, as_float) = match value {
                Value::Number(n) => match n.as_f64() {
                    Some(f) => (n, f),
                    None => return Err(non_numeric(index, value)),
                },
                _ => return Err(non_numeric(index, value)),
            };
            sum += as_float;
            // First occurrence wins on ties.
            if max.map_or(true, |(current, _)| as_float > current) {
                max = Some((as_float, number));
            }
        }

        let count = values.len();
        Ok(Self {
            count,
            avg: if count == 0 { 0.0 } else { sum / count as f64 },
            max: max.map(|(_, n)| n.clone()),
        })
    }
}

fn non_numeric(index: usize, value: &Value) -> PipelineError {
    PipelineError::NonNumeric {
        index,
        value: value.to_string(),
    }
}

impl TryFrom<Vec<Value>> for Stats {
    type Error = PipelineError;

    fn try_from(values: Vec<Value>) -> Result<Self> {
        Stats::from_values(&values)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Reads a JSON array of numbers and returns its [`Stats`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonStats;

pub type JsonStatsPipeline = Pipeline<JsonStats>;

impl PipelineSteps for JsonStats {
    type Records = Vec<Value>;
    type Transformed = Stats;
    type Output = Stats;

    fn name(&self) -> &'static str {
        constants::JSON_STATS
    }

    fn parse(&self, raw: &str) -> Result<Vec<Value>> {
        debug!("JsonStats: start bytes_len={}", raw.len());
        match serde_json::from_str::<Value>(raw)? {
            Value::Array(values) => {
                info!("JsonStats: found array count={}", values.len());
                metrics::pipeline::records_parsed(self.name(), values.len());
                Ok(values)
            }
            other => Err(PipelineError::TypeMismatch {
                expected: "array",
                found: json_type_name(&other),
            }),
        }
    }

    fn transform(&self, values: Vec<Value>) -> Result<Stats> {
        let stats = Stats::from_values(&values)?;
        debug!(
            "JsonStats: count={} avg={} max={:?}",
            stats.count, stats.avg, stats.max
        );
        Ok(stats)
    }

    fn write(&self, stats: Stats) -> Result<Stats> {
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn pipeline_for(raw: &'static str) -> JsonStatsPipeline {
        Pipeline::with_reader(JsonStats, move |_: &str| -> Result<String> {
            Ok(raw.to_string())
        })
    }

    #[test]
    fn test_json_stats_pipeline() {
        let stats = pipeline_for("[10, 20, 30]").run("nums.json").unwrap();

        assert_eq!(stats.count, 3);
        assert_eq!(stats.avg, 20.0);
        assert_eq!(stats.max, Some(Number::from(30)));
        assert_eq!(
            serde_json::to_string(&stats).unwrap(),
            r#"{"count":3,"avg":20.0,"max":30}"#
        );
    }

    #[test]
    fn test_empty_array() {
        let stats = pipeline_for("[]").run("empty.json").unwrap();
        assert_eq!(
            stats,
            Stats {
                count: 0,
                avg: 0.0,
                max: None
            }
        );
        assert_eq!(
            serde_json::to_value(&stats).unwrap(),
            serde_json::json!({"count": 0, "avg": 0.0, "max": null})
        );
    }

    #[test]
    fn test_mixed_int_and_float() {
        let stats = pipeline_for("[1, 2.5, -4]").run("mixed.json").unwrap();
        assert_eq!(stats.count, 3);
        assert!((stats.avg - (-0.5 / 3.0)).abs() < 1e-12);
        assert_eq!(stats.max.unwrap().as_f64(), Some(2.5));
    }

    #[test]
    fn test_non_array_is_type_mismatch() {
        for raw in [r#"{"a":1}"#, "42", r#""text""#, "null"] {
            let err = pipeline_for(raw).run("file.json").unwrap_err();
            assert_eq!(err.kind(), ErrorKind::TypeMismatch, "input {}", raw);
        }

        let err = pipeline_for(r#"{"a": 1}"#).run("file.json").unwrap_err();
        assert_eq!(err.to_string(), "Type mismatch: expected array, found object");
    }

    #[test]
    fn test_malformed_json_is_format_error() {
        let err = pipeline_for("[1, 2,").run("broken.json").unwrap_err();
        assert!(matches!(err, PipelineError::Json(_)));
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_non_numeric_element() {
        let err = pipeline_for(r#"[1, "two", 3]"#).run("bad.json").unwrap_err();
        match err {
            PipelineError::NonNumeric { index, value } => {
                assert_eq!(index, 1);
                assert_eq!(value, r#""two""#);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_max_keeps_first_of_equal_values() {
        let values = vec![serde_json::json!(3), serde_json::json!(3.0)];
        let stats = JsonStats.transform(values).unwrap();
        assert_eq!(stats.max, Some(Number::from(3)));
    }

    #[test]
    fn test_transform_hook_computes_stats() {
        let values = vec![serde_json::json!(4), serde_json::json!(8)];
        let stats = JsonStats.transform(values.clone()).unwrap();

        assert_eq!(stats, Stats::try_from(values).unwrap());
        assert_eq!(stats.count, 2);
        assert_eq!(stats.avg, 6.0);
        assert_eq!(stats.max, Some(Number::from(8)));
    }
}
