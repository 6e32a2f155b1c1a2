use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use tracing::info;

use etl_pipeline::config::Config;
use etl_pipeline::constants;
use etl_pipeline::logging;
use etl_pipeline::metrics;
use etl_pipeline::pipeline::{CsvToJson, CsvToJsonPipeline, JsonStats, JsonStatsPipeline, RaggedRows};

#[derive(Parser)]
#[command(name = "etl")]
#[command(about = "Run read → parse → transform → write pipelines over local files")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to the TOML configuration file (defaults to $ETL_CONFIG, then config.toml)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a CSV file with a header row into a JSON array of objects
    CsvToJson {
        /// CSV file to read
        path: String,
        /// Write the JSON here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Field delimiter (overrides the configuration file)
        #[arg(long)]
        delimiter: Option<char>,
        /// Pad short rows with empty strings instead of failing
        #[arg(long)]
        pad_ragged_rows: bool,
    },
    /// Print count, average and maximum of a JSON array of numbers
    JsonStats {
        /// JSON file to read
        path: String,
    },
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    let _guard = logging::init_logging(&config.logging);
    metrics::describe_all();

    match cli.command {
        Commands::CsvToJson {
            path,
            output,
            delimiter,
            pad_ragged_rows,
        } => {
            let mut options = config.csv.clone();
            if let Some(delimiter) = delimiter {
                options.delimiter = delimiter;
            }
            if pad_ragged_rows {
                options.ragged_rows = RaggedRows::Pad;
            }

            let pipeline = CsvToJsonPipeline::new(CsvToJson::new(options));
            let json = pipeline
                .run(&path)
                .with_context(|| format!("{} pipeline failed for '{}'", constants::CSV_TO_JSON, path))?;

            match output {
                Some(output) => {
                    fs::write(&output, json)
                        .with_context(|| format!("Failed to write '{}'", output.display()))?;
                    info!("Wrote JSON to {}", output.display());
                }
                None => println!("{}", json),
            }
        }
        Commands::JsonStats { path } => {
            let pipeline = JsonStatsPipeline::new(JsonStats);
            let stats = pipeline
                .run(&path)
                .with_context(|| format!("{} pipeline failed for '{}'", constants::JSON_STATS, path))?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }

    Ok(())
}
