use std::convert::Infallible;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to read source '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV format error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV input has no header row")]
    MissingHeader,

    #[error("CSV row {line} has {found} fields, header has {expected}")]
    RaggedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("JSON format error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Non-numeric element at index {index}: {value}")]
    NonNumeric { index: usize, value: String },

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse classification of [`PipelineError`], used for metric labels and
/// for callers that only care about the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    Io,
    Format,
    TypeMismatch,
    NonNumeric,
    Config,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::Io => "io",
            ErrorKind::Format => "format",
            ErrorKind::TypeMismatch => "type_mismatch",
            ErrorKind::NonNumeric => "non_numeric",
            ErrorKind::Config => "config",
        }
    }
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            PipelineError::Read { .. } => ErrorKind::Io,
            PipelineError::Csv(_)
            | PipelineError::MissingHeader
            | PipelineError::RaggedRow { .. }
            | PipelineError::Json(_) => ErrorKind::Format,
            PipelineError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            PipelineError::NonNumeric { .. } => ErrorKind::NonNumeric,
            PipelineError::Toml(_) | PipelineError::Config(_) => ErrorKind::Config,
        }
    }
}

// Lets the identity transform (`T: TryFrom<T>`) satisfy the step error bound.
impl From<Infallible> for PipelineError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
