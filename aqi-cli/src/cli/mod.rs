//! CLI command definitions and handlers

mod report;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use aqi_core::{parse_concentration, Pollutant, Reading};
use aqi_standards::{Standard, GLOBAL_REGISTRY};
use clap::{Parser, Subcommand, ValueEnum};

/// Parse a `<pollutant>=<concentration>` argument
fn parse_reading(s: &str) -> Result<Reading, String> {
    s.parse::<Reading>().map_err(|e| e.to_string())
}

/// Parse a pollutant id such as `pm25` or `o3_8h`
fn parse_pollutant(s: &str) -> Result<Pollutant, String> {
    s.parse::<Pollutant>().map_err(|e| e.to_string())
}

/// Output format for every command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables
    Text,
    /// One JSON document on stdout
    Json,
}

/// aqi - Air Quality Index calculator
#[derive(Parser, Debug)]
#[command(name = "aqi")]
#[command(
    version,
    about = "Compute Air Quality Index values from pollutant concentrations",
    after_help = "\
Examples:
  aqi index pm25=35.4 pm10=155            Overall AQI under US EPA
  aqi --standard mep index pm25=75 -v     Per-pollutant breakdown under China MEP
  aqi iaqi o3_8h 0.078                    One pollutant's iAQI
  aqi --table local.json pollutants       Inspect a custom breakpoint table
  aqi --format json index pm25=12         JSON output for scripting"
)]
pub struct Cli {
    /// Built-in standard to use (epa, mep)
    #[arg(long, short = 's', global = true, env = "AQI_STANDARD", default_value = "epa")]
    pub standard: String,

    /// JSON breakpoint table to use instead of a built-in standard
    #[arg(long, global = true, value_name = "FILE")]
    pub table: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Overall AQI of one or more readings
    Index {
        /// Readings as <pollutant>=<concentration>, e.g. pm25=35.4
        #[arg(required = true, value_parser = parse_reading)]
        readings: Vec<Reading>,

        /// Show every pollutant's iAQI and the dominant pollutant
        #[arg(long, short = 'v')]
        verbose: bool,
    },

    /// iAQI of a single pollutant concentration
    Iaqi {
        /// Pollutant id, e.g. pm25, pm10, o3_8h, co_8h
        #[arg(value_parser = parse_pollutant)]
        pollutant: Pollutant,

        /// Concentration in the unit of the standard's table
        #[arg(allow_hyphen_values = true)]
        concentration: String,
    },

    /// List the pollutants the selected standard covers
    Pollutants,

    /// List the built-in standards
    Standards,
}

/// Resolve the breakpoint standard selected on the command line
fn load_standard(name: &str, table: Option<&Path>) -> Result<Arc<Standard>> {
    if let Some(path) = table {
        let standard = Standard::from_path(path)
            .with_context(|| format!("Failed to load breakpoint table {}", path.display()))?;
        tracing::info!("Using breakpoint table '{}' from {}", standard.name(), path.display());
        return Ok(Arc::new(standard));
    }

    GLOBAL_REGISTRY.get(name).with_context(|| {
        let available = GLOBAL_REGISTRY.names().unwrap_or_default().join(", ");
        format!("Unknown standard '{}' (available: {})", name, available)
    })
}

/// Run a command and return what it prints
pub fn execute(cli: &Cli) -> Result<String> {
    let selected = || load_standard(&cli.standard, cli.table.as_deref());

    match &cli.command {
        Commands::Index { readings, verbose } => {
            let standard = selected()?;
            tracing::debug!("Computing AQI of {} readings", readings.len());
            let assessment = standard
                .engine()
                .assess(readings)
                .with_context(|| format!("Cannot compute AQI under '{}'", standard.name()))?;
            report::assessment(&standard, &assessment, *verbose, cli.format)
        }

        Commands::Iaqi {
            pollutant,
            concentration,
        } => {
            let standard = selected()?;
            let value = parse_concentration(*pollutant, concentration)?;
            let sub_index = standard
                .engine()
                .sub_index(*pollutant, value)
                .with_context(|| format!("Cannot compute iAQI under '{}'", standard.name()))?;
            report::sub_index(&standard, &sub_index, cli.format)
        }

        Commands::Pollutants => {
            let standard = selected()?;
            report::pollutants(&standard, cli.format)
        }

        Commands::Standards => {
            let standards = GLOBAL_REGISTRY
                .names()?
                .iter()
                .map(|name| GLOBAL_REGISTRY.get(name))
                .collect::<Result<Vec<_>, _>>()?;
            report::standards(&standards, cli.format)
        }
    }
}

/// Run a parsed command line
pub fn run(cli: Cli) -> Result<()> {
    let output = execute(&cli)?;
    println!("{}", output);
    Ok(())
}
