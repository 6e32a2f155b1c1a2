// ETL pipeline: template, source readers and concrete steps

pub mod reader;
pub mod steps;
pub mod template;

pub use reader::{FileReader, SourceReader};
pub use steps::csv_to_json::{CsvOptions, CsvToJson, CsvToJsonPipeline, RaggedRows};
pub use steps::json_stats::{JsonStats, JsonStatsPipeline, Stats};
pub use template::{Pipeline, PipelineSteps};
