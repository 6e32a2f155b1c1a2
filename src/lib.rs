pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod pipeline;
pub mod types;

pub use error::{ErrorKind, PipelineError, Result};
pub use pipeline::{
    CsvOptions, CsvToJson, CsvToJsonPipeline, FileReader, JsonStats, JsonStatsPipeline, Pipeline,
    PipelineSteps, RaggedRows, SourceReader, Stats,
};
pub use types::Record;
