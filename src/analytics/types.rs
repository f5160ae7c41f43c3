//! Shared types for the aggregation library.
//!
//! These are deliberately clap-free; the CLI converts its own arg structs
//! into these via `From` impls kept in lib.rs.

use serde::Serialize;
use thiserror::Error;

use crate::model::OrderRecord;

// ---------------------------------------------------------------------------
// YearRange
// ---------------------------------------------------------------------------

/// Inclusive year range filter.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

/// A range whose lower bound exceeds its upper bound is a caller error.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid year range: min {min} is greater than max {max}")]
pub struct InvalidYearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    pub fn new(min: i32, max: i32) -> Result<Self, InvalidYearRange> {
        if min > max {
            return Err(InvalidYearRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// A range covering a single year.
    pub fn single(year: i32) -> Self {
        Self {
            min: year,
            max: year,
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.min..=self.max).contains(&year)
    }
}

impl std::fmt::Display for YearRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}:{}", self.min, self.max)
        }
    }
}

// ---------------------------------------------------------------------------
// DetailLevel
// ---------------------------------------------------------------------------

/// Taxonomy level for the profitability breakdown. A closed set: anything
/// else is a caller/configuration error, caught when parsing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DetailLevel {
    #[default]
    Category,
    SubCategory,
    ProductName,
}

impl DetailLevel {
    /// The record field this level groups by.
    pub fn label_of<'a>(&self, record: &'a OrderRecord) -> &'a str {
        match self {
            Self::Category => &record.category,
            Self::SubCategory => &record.sub_category,
            Self::ProductName => &record.product_name,
        }
    }
}

impl std::fmt::Display for DetailLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Category => write!(f, "category"),
            Self::SubCategory => write!(f, "sub-category"),
            Self::ProductName => write!(f, "product-name"),
        }
    }
}

/// Raised when a level string (from the config file) is outside the closed
/// three-element set.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown detail level '{0}' (expected category, sub-category, or product-name)")]
pub struct ParseLevelError(pub String);

impl std::str::FromStr for DetailLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "category" => Ok(Self::Category),
            "sub-category" | "subcategory" | "sub category" => Ok(Self::SubCategory),
            "product-name" | "product name" | "product" => Ok(Self::ProductName),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregate rows
// ---------------------------------------------------------------------------

/// One (year, month) bucket of the seasonality aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonalityRow {
    pub year: i32,
    /// Calendar month, 1..=12.
    pub month: u32,
    pub total_sales: f64,
    pub total_profit: f64,
}

/// One group of the profitability aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfitRow {
    pub label: String,
    pub total_profit: f64,
}

// ---------------------------------------------------------------------------
// Report envelopes
// ---------------------------------------------------------------------------

/// Result of a seasonality query, with the filter echoed back for the
/// `_meta` block.
#[derive(Debug, Clone)]
pub struct SeasonalityReport {
    /// Ordered by year, then month.
    pub rows: Vec<SeasonalityRow>,
    pub years: YearRange,
    pub regions: Vec<String>,
    pub elapsed_ms: u64,
}

impl SeasonalityReport {
    pub fn total_sales(&self) -> f64 {
        self.rows.iter().map(|r| r.total_sales).sum()
    }

    pub fn total_profit(&self) -> f64 {
        self.rows.iter().map(|r| r.total_profit).sum()
    }

    /// Produce the CLI-compatible JSON envelope.
    pub fn to_cli_json(&self) -> serde_json::Value {
        let rows: Vec<serde_json::Value> = self
            .rows
            .iter()
            .map(|r| {
                serde_json::json!({
                    "year": r.year,
                    "month": r.month,
                    "sales": r.total_sales,
                    "profit": r.total_profit,
                })
            })
            .collect();
        serde_json::json!({
            "rows": rows,
            "row_count": self.rows.len(),
            "totals": {
                "sales": self.total_sales(),
                "profit": self.total_profit(),
            },
            "_meta": {
                "elapsed_ms": self.elapsed_ms,
                "years": self.years.to_string(),
                "regions": self.regions,
            }
        })
    }
}

/// Result of a profitability query.
#[derive(Debug, Clone)]
pub struct ProfitabilityReport {
    /// Ordered by total profit descending; ties keep dataset order.
    pub rows: Vec<ProfitRow>,
    pub level: DetailLevel,
    pub elapsed_ms: u64,
}

impl ProfitabilityReport {
    /// Produce the CLI-compatible JSON envelope.
    pub fn to_cli_json(&self) -> serde_json::Value {
        let rows: Vec<serde_json::Value> = self
            .rows
            .iter()
            .map(|r| {
                serde_json::json!({
                    "label": r.label,
                    "profit": r.total_profit,
                })
            })
            .collect();
        serde_json::json!({
            "level": self.level.to_string(),
            "rows": rows,
            "row_count": self.rows.len(),
            "_meta": {
                "elapsed_ms": self.elapsed_ms,
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Insight summary
// ---------------------------------------------------------------------------

/// A calendar-month extreme of the seasonality aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthExtreme {
    /// Calendar month, 1..=12.
    pub month: u32,
    /// Fixed three-letter month name.
    pub name: &'static str,
    /// Summed sales, rounded down to whole USD.
    pub sales_usd: i64,
}

/// A group extreme of the profitability aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupExtreme {
    pub label: String,
    /// Summed profit, rounded down to whole USD.
    pub profit_usd: i64,
}

/// Derived scalars from the two aggregates. `None` means the corresponding
/// aggregate was empty; renderers substitute the "no data" sentinel.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InsightSummary {
    pub peak: Option<MonthExtreme>,
    pub trough: Option<MonthExtreme>,
    pub top: Option<GroupExtreme>,
    pub bottom: Option<GroupExtreme>,
}

impl InsightSummary {
    /// Produce the CLI-compatible JSON envelope. Empty aggregates render as
    /// `null` extremes plus the sentinel in the text lines, so robot callers
    /// never have to parse prose.
    pub fn to_cli_json(&self, elapsed_ms: u64) -> serde_json::Value {
        serde_json::json!({
            "peak": self.peak,
            "trough": self.trough,
            "top": self.top,
            "bottom": self.bottom,
            "text": crate::report::insight_lines(self),
            "_meta": {
                "elapsed_ms": elapsed_ms,
            }
        })
    }
}
