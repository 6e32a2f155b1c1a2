use crate::error::{PipelineError, Result};
use crate::metrics;
use crate::pipeline::reader::{FileReader, SourceReader};
use std::time::Instant;
use tracing::{debug, error, info, info_span};

/// The customizable steps of a pipeline.
///
/// `parse` and `write` must be provided. `transform` converts the parsed
/// records into `Self::Transformed` through `TryFrom`; when both types are the
/// same this is the reflexive conversion, i.e. the identity.
pub trait PipelineSteps {
    type Records;
    type Transformed: TryFrom<Self::Records, Error: Into<PipelineError>>;
    type Output;

    /// Short identifier used in spans and metric labels.
    fn name(&self) -> &'static str;

    fn parse(&self, raw: &str) -> Result<Self::Records>;

    fn transform(&self, records: Self::Records) -> Result<Self::Transformed> {
        <Self::Transformed as TryFrom<Self::Records>>::try_from(records).map_err(Into::into)
    }

    fn write(&self, transformed: Self::Transformed) -> Result<Self::Output>;
}

/// Runs read → parse → transform → write over a set of steps.
///
/// The reader is injected at construction; [`Pipeline::new`] falls back to
/// [`FileReader`].
pub struct Pipeline<S: PipelineSteps> {
    reader: Box<dyn SourceReader>,
    steps: S,
}

impl<S: PipelineSteps> Pipeline<S> {
    pub fn new(steps: S) -> Self {
        Self::with_reader(steps, FileReader)
    }

    pub fn with_reader(steps: S, reader: impl SourceReader + 'static) -> Self {
        Self {
            reader: Box::new(reader),
            steps,
        }
    }

    pub fn read(&self, source_path: &str) -> Result<String> {
        self.reader.read(source_path)
    }

    pub fn run(&self, source_path: &str) -> Result<S::Output> {
        let name = self.steps.name();
        let span = info_span!("pipeline_run", pipeline = name, source = %source_path);
        let _enter = span.enter();

        if source_path.is_empty() {
            error!("Rejected empty source path");
            metrics::pipeline::run_error(name, "invalid_argument");
            return Err(PipelineError::InvalidArgument(
                "source_path must be a non-empty string".to_string(),
            ));
        }

        let start_time = Instant::now();
        match self.execute(source_path) {
            Ok(output) => {
                info!("Pipeline finished in {:?}", start_time.elapsed());
                metrics::pipeline::run_success(name);
                metrics::pipeline::duration(name, start_time.elapsed().as_secs_f64());
                Ok(output)
            }
            Err(e) => {
                error!("Pipeline failed: {}", e);
                metrics::pipeline::run_error(name, e.kind().as_str());
                metrics::pipeline::duration(name, start_time.elapsed().as_secs_f64());
                Err(e)
            }
        }
    }

    fn execute(&self, source_path: &str) -> Result<S::Output> {
        let raw = self.read(source_path)?;
        debug!("read bytes_len={}", raw.len());
        metrics::pipeline::bytes_read(self.steps.name(), raw.len());

        let records = self.steps.parse(&raw)?;
        let transformed = self.steps.transform(records)?;
        self.steps.write(transformed)
    }
}

impl<S: PipelineSteps + Default> Default for Pipeline<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}
