//! Superstore Insights — seasonality and profitability analytics over the
//! Global Superstore order dataset, from the terminal.
//!
//! The library splits into a loader (spreadsheet → normalized records), a
//! pure analytics core, and a rendering layer; the dataset is loaded once
//! per invocation and passed by reference into the aggregation functions.

pub mod analytics;
pub mod config;
pub mod loader;
pub mod model;
pub mod report;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use rustc_hash::FxHashSet;

use analytics::{
    DetailLevel, ProfitabilityReport, SeasonalityReport, YearRange, compute_profitability,
    compute_seasonality, derive_insights,
};
use config::SsiConfig;
use loader::Dataset;

// ---------------------------------------------------------------------------
// CLI surface
// ---------------------------------------------------------------------------

#[derive(Debug, Parser)]
#[command(
    name = "ssi",
    version,
    about = "Analytics over the Global Superstore order dataset"
)]
pub struct Cli {
    /// Workbook (.xls/.xlsx) or directory of CSV sheets. Falls back to the
    /// `dataset` entry in the config file.
    #[arg(long, global = true, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Emit a machine-readable JSON envelope instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose logging on stderr (see also the SSI_LOG env var).
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Monthly sales/profit totals for a year range and region set.
    Seasonality {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Profit totals by taxonomy level, highest first.
    ///
    /// Always aggregates the whole dataset; the seasonality filters do not
    /// apply here.
    Profitability {
        #[arg(long, value_enum)]
        level: Option<LevelArg>,
    },
    /// Peak/trough months and top/bottom performers.
    Insights {
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(long, value_enum)]
        level: Option<LevelArg>,
    },
    /// The full report: seasonality, profitability, and insights.
    Summary {
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(long, value_enum)]
        level: Option<LevelArg>,
    },
    /// Row counts and join coverage for the loaded dataset.
    Dataset,
}

/// Filters applied to the seasonality aggregate.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Inclusive year range, `MIN:MAX` or a single year. Defaults to every
    /// year present in the dataset.
    #[arg(long, value_name = "MIN:MAX", value_parser = parse_year_range)]
    pub years: Option<YearRange>,

    /// Comma-separated region filter. Defaults to every region present.
    #[arg(long, value_delimiter = ',', value_name = "REGIONS")]
    pub regions: Vec<String>,
}

/// CLI-side mirror of [`DetailLevel`]; the library enum stays clap-free.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LevelArg {
    Category,
    SubCategory,
    ProductName,
}

impl From<LevelArg> for DetailLevel {
    fn from(level: LevelArg) -> Self {
        match level {
            LevelArg::Category => DetailLevel::Category,
            LevelArg::SubCategory => DetailLevel::SubCategory,
            LevelArg::ProductName => DetailLevel::ProductName,
        }
    }
}

fn parse_year_range(raw: &str) -> Result<YearRange, String> {
    let (lo, hi) = match raw.split_once(':') {
        Some((lo, hi)) => (lo, hi),
        None => (raw, raw),
    };
    let min: i32 = lo
        .trim()
        .parse()
        .map_err(|_| format!("invalid year '{}'", lo.trim()))?;
    let max: i32 = hi
        .trim()
        .parse()
        .map_err(|_| format!("invalid year '{}'", hi.trim()))?;
    YearRange::new(min, max).map_err(|e| e.to_string())
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Run a parsed CLI invocation to completion.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config = SsiConfig::load()?;
    let data_path = cli
        .data
        .clone()
        .or_else(|| config.dataset.clone())
        .context("no dataset: pass --data <PATH> or set `dataset` in the config file")?;
    let dataset = Dataset::load(&data_path)?;

    match cli.command {
        Commands::Seasonality { ref filter } => {
            let season = seasonality_report(&dataset, filter, &config);
            if cli.json {
                println!("{}", season.to_cli_json());
            } else {
                print!("{}", report::render_seasonality(&season));
            }
        }
        Commands::Profitability { level } => {
            let breakdown = profitability_report(&dataset, resolve_level(level, &config)?);
            if cli.json {
                println!("{}", breakdown.to_cli_json());
            } else {
                print!("{}", report::render_profitability(&breakdown));
            }
        }
        Commands::Insights { ref filter, level } => {
            let started = Instant::now();
            let season = seasonality_report(&dataset, filter, &config);
            let breakdown = profitability_report(&dataset, resolve_level(level, &config)?);
            let summary = derive_insights(&season.rows, &breakdown.rows);
            if cli.json {
                println!(
                    "{}",
                    summary.to_cli_json(started.elapsed().as_millis() as u64)
                );
            } else {
                print!("{}", report::render_insights(&summary));
            }
        }
        Commands::Summary { ref filter, level } => {
            let started = Instant::now();
            let season = seasonality_report(&dataset, filter, &config);
            let breakdown = profitability_report(&dataset, resolve_level(level, &config)?);
            let summary = derive_insights(&season.rows, &breakdown.rows);
            if cli.json {
                let payload = serde_json::json!({
                    "seasonality": season.to_cli_json(),
                    "profitability": breakdown.to_cli_json(),
                    "insights": summary.to_cli_json(started.elapsed().as_millis() as u64),
                });
                println!("{payload}");
            } else {
                print!("{}", report::render_seasonality(&season));
                print!("{}", report::render_profitability(&breakdown));
                print!("{}", report::render_insights(&summary));
            }
        }
        Commands::Dataset => {
            let status = dataset.status();
            if cli.json {
                println!("{}", status.to_cli_json());
            } else {
                print!("{}", report::render_status(&status));
            }
        }
    }
    Ok(())
}

/// Materialize the seasonality filter: explicit args win, then config
/// defaults, then everything present in the dataset.
fn seasonality_report(
    dataset: &Dataset,
    filter: &FilterArgs,
    config: &SsiConfig,
) -> SeasonalityReport {
    let started = Instant::now();
    let years = filter.years.unwrap_or_else(|| {
        dataset
            .year_span()
            .unwrap_or(YearRange { min: 0, max: 0 })
    });
    let regions: Vec<String> = if !filter.regions.is_empty() {
        filter.regions.clone()
    } else if !config.default_regions.is_empty() {
        config.default_regions.clone()
    } else {
        dataset.regions()
    };
    let region_set: FxHashSet<String> = regions.iter().cloned().collect();
    tracing::debug!(%years, regions = ?regions, "seasonality filter");
    let rows = compute_seasonality(&dataset.orders, years, &region_set);
    SeasonalityReport {
        rows,
        years,
        regions,
        elapsed_ms: started.elapsed().as_millis() as u64,
    }
}

fn profitability_report(dataset: &Dataset, level: DetailLevel) -> ProfitabilityReport {
    let started = Instant::now();
    let rows = compute_profitability(&dataset.orders, level);
    ProfitabilityReport {
        rows,
        level,
        elapsed_ms: started.elapsed().as_millis() as u64,
    }
}

fn resolve_level(cli_level: Option<LevelArg>, config: &SsiConfig) -> anyhow::Result<DetailLevel> {
    match cli_level {
        Some(level) => Ok(level.into()),
        None => Ok(config.level()?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn year_range_arg_forms() {
        assert_eq!(
            parse_year_range("2013:2015"),
            Ok(YearRange {
                min: 2013,
                max: 2015
            })
        );
        assert_eq!(parse_year_range("2014"), Ok(YearRange::single(2014)));
        assert!(parse_year_range("2016:2015").is_err());
        assert!(parse_year_range("20xx").is_err());
    }

    #[test]
    fn level_arg_maps_onto_detail_level() {
        assert_eq!(
            DetailLevel::from(LevelArg::SubCategory),
            DetailLevel::SubCategory
        );
        assert_eq!(
            DetailLevel::from(LevelArg::ProductName),
            DetailLevel::ProductName
        );
    }

    #[test]
    fn level_resolution_prefers_cli_over_config() {
        let config = SsiConfig {
            default_level: Some("product-name".into()),
            ..Default::default()
        };
        assert_eq!(
            resolve_level(Some(LevelArg::Category), &config).unwrap(),
            DetailLevel::Category
        );
        assert_eq!(
            resolve_level(None, &config).unwrap(),
            DetailLevel::ProductName
        );
    }
}
