mod explore;
mod options;
mod report;

use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use trendboard_core::{AppConfig, Choice, FilterSelection, OutputFormat};
use trendboard_pipeline::{DatasetCache, Pipeline, PipelineConfig};

#[derive(Debug, Parser)]
#[command(name = "trendboard")]
#[command(about = "Fashion trend dashboard tables from a CSV dataset")]
struct Cli {
    /// Dataset CSV path (overrides `TRENDBOARD_DATASET_PATH`)
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,

    /// Output format: text or json (overrides `TRENDBOARD_OUTPUT_FORMAT`)
    #[arg(long, global = true)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Location, category and year filters; each defaults to `All`.
#[derive(Debug, Clone, Args)]
struct ScopeArgs {
    /// Region to keep, or All
    #[arg(long, default_value = "All")]
    location: Choice<String>,

    /// Product category to keep, or All
    #[arg(long, default_value = "All")]
    category: Choice<String>,

    /// Launch year to keep, or All for the most recent window
    #[arg(long, default_value = "All")]
    year: Choice<i32>,
}

impl ScopeArgs {
    fn selection(&self, platform: Choice<String>) -> FilterSelection {
        FilterSelection {
            location: self.location.clone(),
            category: self.category.clone(),
            year: self.year.clone(),
            platform,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the values each filter can take
    Options {
        #[command(flatten)]
        scope: ScopeArgs,
    },
    /// Compute every dashboard table for one filter selection
    Report {
        #[command(flatten)]
        scope: ScopeArgs,

        /// Platform to keep, or All
        #[arg(long, default_value = "All")]
        platform: Choice<String>,
    },
    /// Read filter selections from stdin and recompute after each line
    Explore,
}

fn main() -> anyhow::Result<()> {
    // Parse first so --help and argument errors never depend on the environment.
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = trendboard_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let stdout = std::io::stdout();
    let stdin = std::io::stdin();
    run(cli, &config, stdin.lock(), &mut stdout.lock())
}

fn run<R: BufRead, W: Write>(
    cli: Cli,
    config: &AppConfig,
    input: R,
    out: &mut W,
) -> anyhow::Result<()> {
    let dataset = cli
        .dataset
        .unwrap_or_else(|| config.dataset_path.clone());
    let format = cli.format.unwrap_or(config.output_format);
    let pipeline = Pipeline::new(PipelineConfig::from_app_config(config));
    let mut cache = DatasetCache::new(config.csv_delimiter);

    match cli.command {
        Some(Commands::Options { scope }) => options::run_options(
            &mut cache,
            &pipeline,
            &dataset,
            &scope.selection(Choice::All),
            format,
            out,
        ),
        Some(Commands::Report { scope, platform }) => report::run_report(
            &mut cache,
            &pipeline,
            &dataset,
            &scope.selection(platform),
            format,
            out,
        ),
        Some(Commands::Explore) => explore::run_explore(&mut cache, &pipeline, &dataset, input, out),
        None => {
            write!(out, "{}", Cli::command().render_help())?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests;
