use chartwright::config::ChartConfig;
use chartwright::{CHART_TYPES, LayoutOptions, layout_chart};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_ENV: &str = "CHARTWRIGHT_LOG";

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config file {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: Box<CliError>,
    },
    #[error(transparent)]
    Layout(#[from] chartwright::Error),
}

/// Headless chart geometry: reads a JSON chart request and prints its layout as JSON.
#[derive(Parser, Debug)]
#[command(name = "chartwright-cli", version)]
struct Cli {
    /// Log at debug level unless CHARTWRIGHT_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lay out a chart request read from a file or stdin
    Layout {
        /// Request file; omit or pass `-` to read stdin
        input: Option<String>,

        /// Effective-config JSON with per-chart sections
        #[arg(long)]
        config: Option<PathBuf>,

        /// Pretty-print the layout JSON
        #[arg(long)]
        pretty: bool,
    },
    /// List the supported chart `type` tags
    Types,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<ChartConfig, CliError> {
    let Some(path) = path else {
        return Ok(ChartConfig::default());
    };
    let wrap = |source: CliError| CliError::Config {
        path: path.clone(),
        source: Box::new(source),
    };
    let text = std::fs::read_to_string(path).map_err(|e| wrap(e.into()))?;
    let value: Value = serde_json::from_str(&text).map_err(|e| wrap(e.into()))?;
    Ok(ChartConfig::from_value(&value))
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    let stdout = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(stdout, value)?;
    } else {
        serde_json::to_writer(stdout, value)?;
    }
    println!();
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Types => {
            for t in CHART_TYPES {
                println!("{t}");
            }
            Ok(())
        }
        Command::Layout {
            input,
            config,
            pretty,
        } => {
            let config = load_config(config.as_ref())?;
            let text = read_input(input.as_deref())?;
            let request: Value = serde_json::from_str(&text)?;
            tracing::debug!(input = input.as_deref().unwrap_or("-"), "read chart request");

            let layout = layout_chart(&request, &config, &LayoutOptions::default())?;
            write_json(&layout, pretty)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
