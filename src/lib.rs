#![allow(clippy::const_is_empty)]
#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::type_complexity)]
#![allow(clippy::too_many_arguments)]

// Core modules
pub mod analysis;
pub mod config;
pub mod domain;
pub mod engine;
pub mod models;
pub mod report;
pub mod utils;

// Re-export commonly used types outside of crate
pub use config::{FORECAST, ForecastSettings};
pub use domain::{Candle, Horizon, InvalidInputError, InvalidInputKind, PriceSeries};
pub use engine::{FocusPackAssembler, assemble_all_horizons, assemble_focus_pack};
pub use models::{DataStatus, FallbackReason, FocusPack};

// CLI argument parsing
use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Analog-based price forecasts from candle history", long_about = None)]
pub struct Cli {
    /// JSON array of candles: [{"t":..,"o":..,"h":..,"l":..,"c":..}, ...]
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long, default_value = "BTCUSDT")]
    pub symbol: String,

    /// One of 7d, 14d, 30d, 90d, 180d, 365d
    #[arg(long, conflicts_with = "all_horizons")]
    pub horizon: Option<Horizon>,

    /// Produce one pack per horizon
    #[arg(long, default_value_t = false)]
    pub all_horizons: bool,

    /// Reference time (RFC3339) for the stale-data check. Defaults to now.
    #[arg(long)]
    pub as_of: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, default_value_t = false)]
    pub pretty: bool,
}

impl Cli {
    /// The only place the wall clock is read.
    pub fn as_of_ms(&self) -> Result<i64> {
        match &self.as_of {
            Some(text) => Ok(DateTime::parse_from_rfc3339(text)
                .with_context(|| format!("--as-of '{}' is not an RFC3339 timestamp", text))?
                .timestamp_millis()),
            None => Ok(Utc::now().timestamp_millis()),
        }
    }
}

pub fn load_series(path: &Path) -> Result<PriceSeries> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read candles from {}", path.display()))?;
    let candles: Vec<Candle> = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON array of candles", path.display()))?;
    Ok(PriceSeries::new(candles))
}

/// Runs one CLI invocation and returns the rendered output.
pub fn run_cli(args: &Cli) -> Result<String> {
    let series = load_series(&args.input)?;
    let assembler = FocusPackAssembler::default().as_of(args.as_of_ms()?);

    let packs = match (args.horizon, args.all_horizons) {
        (_, true) => assemble_all_horizons(&assembler, &args.symbol, &series)?,
        (Some(horizon), false) => vec![assembler.assemble(&args.symbol, horizon, &series)?],
        (None, false) => bail!("Pick a horizon with --horizon <7d|14d|30d|90d|180d|365d> or pass --all-horizons"),
    };

    match args.format {
        OutputFormat::Json => {
            report::to_json(&packs, args.pretty).context("Failed to serialize FocusPack")
        }
        OutputFormat::Table => Ok(report::summary_table(&packs)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_horizon_codes_and_format() {
        let cli = Cli::parse_from([
            "fractal-focus",
            "--input",
            "btc.json",
            "--horizon",
            "365d",
            "--format",
            "table",
            "--as-of",
            "2024-03-01T00:00:00Z",
        ]);
        assert_eq!(cli.horizon, Some(Horizon::D365));
        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.as_of_ms().unwrap(), 1_709_251_200_000);
    }

    #[test]
    fn horizon_and_all_horizons_conflict() {
        let parsed = Cli::try_parse_from([
            "fractal-focus",
            "--input",
            "x.json",
            "--horizon",
            "7d",
            "--all-horizons",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn bad_as_of_is_reported() {
        let cli = Cli::parse_from(["fractal-focus", "--input", "x.json", "--as-of", "yesterday"]);
        assert!(cli.as_of_ms().is_err());
    }
}
