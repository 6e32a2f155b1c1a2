use crate::error::{PipelineError, Result};
use std::fs;
use tracing::debug;

/// Produces the raw text of a data source.
///
/// Implemented for every `Fn(&str) -> Result<String>` closure, so tests and
/// callers can hand an in-memory fixture to a pipeline instead of a file.
pub trait SourceReader: Send + Sync {
    fn read(&self, path: &str) -> Result<String>;
}

impl<F> SourceReader for F
where
    F: Fn(&str) -> Result<String> + Send + Sync,
{
    fn read(&self, path: &str) -> Result<String> {
        self(path)
    }
}

/// Default reader: loads the whole file at `path` as UTF-8 text.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileReader;

impl SourceReader for FileReader {
    fn read(&self, path: &str) -> Result<String> {
        let content = fs::read_to_string(path).map_err(|source| PipelineError::Read {
            path: path.to_string(),
            source,
        })?;
        debug!("FileReader: read path={} bytes_len={}", path, content.len());
        Ok(content)
    }
}
