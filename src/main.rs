//! Route Tree - command line entry point.
//!
//! Loads a route table from configuration and matches paths against it.

use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use route_tree::config::{self, ConfigLoader, LogConfig, RtreeConfig};
use route_tree::error::{
    report_error, set_error_reporter, ErrorContext, RtreeError, RtreeResult, TracingErrorReporter,
};
use route_tree::routes::RouteTable;

/// Command line arguments for the route tree tool.
#[derive(Parser, Debug)]
#[clap(name = "rtree", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Match a path against the configured routes
    Match {
        /// Request path, e.g. /api/products/1
        path: String,
    },

    /// Find the route with the longest literal prefix of a path
    Longest {
        /// Request path
        path: String,
    },

    /// List the configured routes in tree order
    Routes,

    /// Validate the configuration file
    Validate,

    /// Generate a sample configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// Initialize the logging system.
fn init_logging(log: &LogConfig) -> RtreeResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&log.level))
        .map_err(|e| RtreeError::Custom(format!("Invalid log filter: {e}")))?;

    let fmt_layer = if log.json {
        fmt::layer()
            .json()
            .with_file(log.source_location)
            .with_line_number(log.source_location)
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        fmt::layer()
            .with_file(log.source_location)
            .with_line_number(log.source_location)
            .with_writer(std::io::stderr)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(tracing_error::ErrorLayer::default())
        .try_init()
        .map_err(|e| RtreeError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}

fn load_config(path: Option<&PathBuf>) -> RtreeResult<RtreeConfig> {
    Ok(ConfigLoader::new(path, config::ENV_PREFIX).load()?)
}

fn print_json<T: serde::Serialize>(value: &T) -> RtreeResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn write_sample_config(output: &Path) -> RtreeResult<()> {
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let toml = toml::to_string_pretty(&RtreeConfig::sample())
        .map_err(|e| RtreeError::Custom(format!("Failed to serialize config: {e}")))?;
    std::fs::write(output, toml)?;

    info!("Sample configuration written to {:?}", output);
    Ok(())
}

/// Runs a command against an already loaded configuration, returning whether
/// it produced a result.
#[tracing::instrument(skip_all, fields(command = ?command))]
fn run(command: Command, config: RtreeResult<RtreeConfig>) -> RtreeResult<bool> {
    if let Command::GenConfig { output } = &command {
        return write_sample_config(output).map(|_| true);
    }

    let rtree_config = config?;
    let table = RouteTable::from_config(&rtree_config.routes)?;

    match command {
        Command::Match { path } => match table.resolve(&path) {
            Some(matched) => print_json(&matched).map(|_| true),
            None => {
                println!("no match");
                Ok(false)
            }
        },
        Command::Longest { path } => match table.longest_prefix(&path) {
            Some(route) => print_json(&route).map(|_| true),
            None => {
                println!("no match");
                Ok(false)
            }
        },
        Command::Routes => {
            for route in table.routes() {
                println!("{:<16} {}", route.name, route.path);
            }
            Ok(true)
        }
        Command::Validate => {
            info!(routes = table.len(), "Configuration validated successfully");
            Ok(true)
        }
        Command::GenConfig { .. } => Ok(true),
    }
}

/// Main entry point for the application.
fn main() {
    let args = Args::parse();

    // Logging settings come from the config file when it can be read.
    let config = load_config(args.config.as_ref());
    let log = config
        .as_ref()
        .map(|config| config.log.clone())
        .unwrap_or_default();

    if let Err(e) = init_logging(&log) {
        eprintln!("{e}");
    }

    set_error_reporter(Arc::new(TracingErrorReporter));

    match run(args.command, config) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            report_error(ErrorContext::new(e, "rtree").with_span_trace());
            process::exit(1);
        }
    }
}
