use crate::constants;
use crate::error::{PipelineError, Result};
use crate::pipeline::CsvOptions;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub csv: CsvOptions,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub directory: String,
    pub file_prefix: String,
    pub level: String,
    pub file_output: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: constants::DEFAULT_LOG_DIR.to_string(),
            file_prefix: constants::DEFAULT_LOG_FILE_PREFIX.to_string(),
            level: constants::DEFAULT_LOG_LEVEL.to_string(),
            file_output: true,
        }
    }
}

impl Config {
    /// Loads `config_path`, or `$ETL_CONFIG`, or `config.toml`.
    ///
    /// A missing file is not an error; every setting has a default.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let env_path = std::env::var(constants::CONFIG_PATH_ENV).ok();
        let config_path = config_path
            .or(env_path.as_deref())
            .unwrap_or(constants::DEFAULT_CONFIG_PATH);

        if !Path::new(config_path).exists() {
            return Ok(Self::default());
        }
        Self::from_file(config_path)
    }

    pub fn from_file(config_path: &str) -> Result<Self> {
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            PipelineError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path, e
            ))
        })?;
        config_content.parse()
    }
}

impl std::str::FromStr for Config {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)?;
        config.csv.delimiter_byte()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::pipeline::RaggedRows;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = "".parse().unwrap();
        assert_eq!(config.csv, CsvOptions::default());
        assert_eq!(config.logging.directory, "logs");
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.file_output);
    }

    #[test]
    fn test_overrides() {
        let config: Config = r#"
            [logging]
            level = "debug"
            file_output = false

            [csv]
            delimiter = ";"
            ragged_rows = "pad"
        "#
        .parse()
        .unwrap();

        assert_eq!(config.logging.level, "debug");
        assert!(!config.logging.file_output);
        assert_eq!(config.logging.file_prefix, "etl.log");
        assert_eq!(config.csv.delimiter, ';');
        assert_eq!(config.csv.ragged_rows, RaggedRows::Pad);
    }

    #[test]
    fn test_malformed_toml() {
        let err = "[csv\ndelimiter = ".parse::<Config>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);

        let err = "[csv]\nragged_rows = \"truncate\"".parse::<Config>().unwrap_err();
        assert!(matches!(err, PipelineError::Toml(_)));
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let err = "[csv]\ndelimiter = \"é\"".parse::<Config>().unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }

    #[test]
    fn test_load_from_explicit_path() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[csv]\ndelimiter = \"\\t\"\n").unwrap();

        let config = Config::load(file.path().to_str()).unwrap();
        assert_eq!(config.csv.delimiter, '\t');
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let config = Config::load(missing.to_str()).unwrap();
        assert_eq!(config.csv, CsvOptions::default());
    }
}
