use crate::constants;
use crate::error::{PipelineError, Result};
use crate::metrics;
use crate::pipeline::template::{Pipeline, PipelineSteps};
use crate::types::Record;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

/// How rows whose field count differs from the header are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RaggedRows {
    /// Any mismatch is a format error.
    #[default]
    Strict,
    /// Short rows are padded with empty strings; long rows are still rejected.
    Pad,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CsvOptions {
    pub delimiter: char,
    pub ragged_rows: RaggedRows,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            ragged_rows: RaggedRows::Strict,
        }
    }
}

impl CsvOptions {
    pub fn delimiter_byte(&self) -> Result<u8> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(PipelineError::Config(format!(
                "CSV delimiter '{}' must be a single ASCII character",
                self.delimiter
            )))
        }
    }
}

/// Reads CSV with a header row and renders it as a pretty JSON array of
/// objects. Cell values stay strings.
#[derive(Debug, Clone, Default)]
pub struct CsvToJson {
    options: CsvOptions,
}

impl CsvToJson {
    pub fn new(options: CsvOptions) -> Self {
        Self { options }
    }
}

pub type CsvToJsonPipeline = Pipeline<CsvToJson>;

impl PipelineSteps for CsvToJson {
    type Records = Vec<Record>;
    type Transformed = Vec<Record>;
    type Output = String;

    fn name(&self) -> &'static str {
        constants::CSV_TO_JSON
    }

    fn parse(&self, raw: &str) -> Result<Vec<Record>> {
        debug!("CsvToJson: start bytes_len={}", raw.len());
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.options.delimiter_byte()?)
            .has_headers(true)
            .flexible(true)
            .from_reader(raw.as_bytes());

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            warn!("CsvToJson: input has no header row");
            return Err(PipelineError::MissingHeader);
        }

        let mut out = Vec::new();
        for result in reader.records() {
            let row = result?;
            let line = row.position().map(|p| p.line()).unwrap_or_default();

            if row.len() > headers.len()
                || (row.len() < headers.len() && self.options.ragged_rows == RaggedRows::Strict)
            {
                return Err(PipelineError::RaggedRow {
                    line,
                    expected: headers.len(),
                    found: row.len(),
                });
            }
            if row.len() < headers.len() {
                debug!(
                    "CsvToJson: padding line={} from {} to {} fields",
                    line,
                    row.len(),
                    headers.len()
                );
            }

            let mut record = Record::new();
            for (i, name) in headers.iter().enumerate() {
                let cell = row.get(i).unwrap_or_default();
                record.insert(name.to_string(), Value::String(cell.to_string()));
            }
            out.push(record);
        }

        info!(
            "CsvToJson: parsed rows count={} columns={}",
            out.len(),
            headers.len()
        );
        metrics::pipeline::records_parsed(self.name(), out.len());
        Ok(out)
    }

    fn write(&self, records: Vec<Record>) -> Result<String> {
        Ok(serde_json::to_string_pretty(&records)?)
    }
}
