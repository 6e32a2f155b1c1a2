/// Pipeline names, shared by the CLI, tracing spans and metric labels

pub const CSV_TO_JSON: &str = "csv_to_json";
pub const JSON_STATS: &str = "json_stats";

// Defaults for the optional configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const CONFIG_PATH_ENV: &str = "ETL_CONFIG";
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_LOG_FILE_PREFIX: &str = "etl.log";
pub const DEFAULT_LOG_LEVEL: &str = "info";
