//! Dataset ingestion.
//!
//! Reads the three Superstore sheets (Orders, Returns, People) from either a
//! workbook file (`.xls`/`.xlsx`, see [`workbook`]) or a directory of CSV
//! exports (see [`csv_dir`]), joins the side sheets left-outer onto the
//! orders (see [`join`]), and derives the calendar fields.
//!
//! Data-quality problems (unparseable dates, non-numeric money columns,
//! missing required columns) surface here as [`LoadError`] with sheet and row
//! context. The analytics layer assumes clean input and never re-validates.

pub mod csv_dir;
pub mod join;
pub mod workbook;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use itertools::Itertools;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::analytics::YearRange;
use crate::model::OrderRecord;

/// Errors raised while reading or validating the source dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    #[error("workbook has no sheet named '{0}'")]
    MissingSheet(String),

    #[error("sheet '{sheet}' is missing required column '{column}'")]
    MissingColumn { sheet: String, column: String },

    #[error("{sheet} row {row}: unparseable date '{value}'")]
    BadDate {
        sheet: String,
        row: usize,
        value: String,
    },

    #[error("{sheet} row {row}: column '{column}' is not a number: '{value}'")]
    BadNumber {
        sheet: String,
        row: usize,
        column: String,
        value: String,
    },

    #[error("failed to parse {file}: {source}")]
    Csv {
        file: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("dataset path {0} is neither a workbook file nor a directory of CSV sheets")]
    UnsupportedPath(PathBuf),
}

/// An order row as it appears on the Orders sheet, before joining.
#[derive(Debug, Clone)]
pub struct RawOrder {
    pub order_id: String,
    pub order_date: NaiveDate,
    pub region: String,
    pub category: String,
    pub sub_category: String,
    pub product_name: String,
    pub sales: f64,
    pub profit: f64,
}

/// A row from the Returns sheet.
#[derive(Debug, Clone)]
pub struct RawReturn {
    pub order_id: String,
    pub returned: bool,
}

/// A row from the People sheet.
#[derive(Debug, Clone)]
pub struct RawPerson {
    pub region: String,
    pub person: String,
}

/// The three sheets as read from disk, pre-join.
#[derive(Debug, Default)]
pub struct RawSheets {
    pub orders: Vec<RawOrder>,
    pub returns: Vec<RawReturn>,
    pub people: Vec<RawPerson>,
}

/// The loaded, joined dataset.
///
/// Loaded once at startup, owned immutably, and passed by reference into the
/// analytics functions. There is no ambient global copy.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub orders: Vec<OrderRecord>,
}

impl Dataset {
    /// Load a dataset from `path`.
    ///
    /// A directory is treated as a CSV export (`orders.csv`, `returns.csv`,
    /// `people.csv`); a file is treated as a workbook.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let started = std::time::Instant::now();
        let raw = if path.is_dir() {
            csv_dir::read_dir(path)?
        } else if path.is_file() {
            workbook::read_workbook(path)?
        } else {
            return Err(LoadError::UnsupportedPath(path.to_path_buf()));
        };
        let orders = join::join_sheets(raw);
        info!(
            orders = orders.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "dataset loaded"
        );
        Ok(Self { orders })
    }

    /// Inclusive span of years present in the data, or `None` when empty.
    pub fn year_span(&self) -> Option<YearRange> {
        let min = self.orders.iter().map(|o| o.year).min()?;
        let max = self.orders.iter().map(|o| o.year).max()?;
        Some(YearRange { min, max })
    }

    /// Sorted distinct region labels present in the data.
    pub fn regions(&self) -> Vec<String> {
        self.orders
            .iter()
            .map(|o| o.region.as_str())
            .unique()
            .sorted()
            .map(String::from)
            .collect()
    }

    /// Summary counters for the `dataset` command.
    pub fn status(&self) -> DatasetStatus {
        let distinct = |f: fn(&OrderRecord) -> &str| -> usize {
            self.orders.iter().map(f).unique().count()
        };
        let returned_count = self.orders.iter().filter(|o| o.returned).count();
        let with_salesperson = self.orders.iter().filter(|o| o.salesperson.is_some()).count();
        let coverage = if self.orders.is_empty() {
            0.0
        } else {
            let pct = (with_salesperson as f64 / self.orders.len() as f64) * 100.0;
            (pct * 100.0).round() / 100.0
        };
        DatasetStatus {
            order_count: self.orders.len(),
            years: self.year_span(),
            regions: self.regions(),
            category_count: distinct(|o| o.category.as_str()),
            sub_category_count: distinct(|o| o.sub_category.as_str()),
            product_count: distinct(|o| o.product_name.as_str()),
            returned_count,
            salesperson_coverage_pct: coverage,
        }
    }
}

/// Per-dataset statistics, mirroring what the loader observed.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetStatus {
    pub order_count: usize,
    pub years: Option<YearRange>,
    pub regions: Vec<String>,
    pub category_count: usize,
    pub sub_category_count: usize,
    pub product_count: usize,
    pub returned_count: usize,
    pub salesperson_coverage_pct: f64,
}

impl DatasetStatus {
    /// Produce the CLI-compatible JSON envelope.
    pub fn to_cli_json(&self) -> serde_json::Value {
        serde_json::json!({
            "order_count": self.order_count,
            "years": self.years.map(|y| y.to_string()),
            "regions": self.regions,
            "category_count": self.category_count,
            "sub_category_count": self.sub_category_count,
            "product_count": self.product_count,
            "returned_count": self.returned_count,
            "salesperson_coverage_pct": self.salesperson_coverage_pct,
        })
    }
}

/// Parse an order date from the formats seen in CSV exports.
///
/// Accepts ISO (`2015-01-10`), US slashed (`1/10/2015`), and ISO datetime
/// (`2015-01-10 00:00:00`).
pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    let v = value.trim();
    NaiveDate::parse_from_str(v, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(v, "%m/%d/%Y"))
        .or_else(|_| {
            chrono::NaiveDateTime::parse_from_str(v, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date())
        })
        .ok()
}
