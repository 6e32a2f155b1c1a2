use crate::config::LoggingConfig;
use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("etl_pipeline={}", config.level)))
}

/// Initializes console logging on stderr plus, when enabled, a daily rolling
/// JSON log file.
///
/// `RUST_LOG` takes precedence over the configured level. The returned guard
/// must be held until exit so buffered file logs are flushed.
pub fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    let (file_writer, guard) = if config.file_output {
        // Ensure logs directory exists
        let _ = fs::create_dir_all(&config.directory);

        let file_appender =
            tracing_appender::rolling::daily(&config.directory, &config.file_prefix);
        let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);
        (Some(non_blocking_writer), Some(guard))
    } else {
        (None, None)
    };

    // `Option<Layer>` is itself a layer; `None` disables file output
    let file_layer = file_writer.map(|writer| fmt::layer().json().with_writer(writer));

    // stdout carries pipeline output, so the console layer writes to stderr
    let console_layer = fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(file_layer)
        .with(console_layer)
        .init();

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_without_file_output() {
        let config = LoggingConfig {
            file_output: false,
            ..LoggingConfig::default()
        };
        assert!(init_logging(&config).is_none());
    }
}
