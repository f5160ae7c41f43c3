//! Pure aggregation library.
//!
//! Stateless transformations from (order records, filter selection, detail
//! level) to the two aggregates and the derived insight summary. Every
//! function here is a pure function of its inputs: no caching, no shared
//! state, and empty input is a valid result, never an error.
//!
//! # Module structure
//!
//! - [`types`] — filter, level, result structs, parse errors
//! - [`seasonality`] — (year, month) sales/profit sums under a filter
//! - [`profitability`] — profit sums by taxonomy level, highest first
//! - [`insights`] — peak/trough month and top/bottom performer extraction

pub mod insights;
pub mod profitability;
pub mod seasonality;
pub mod types;

pub use insights::{MONTH_ABBREV, NO_DATA, derive_insights, month_name};
pub use profitability::compute_profitability;
pub use seasonality::compute_seasonality;
pub use types::{
    DetailLevel, GroupExtreme, InsightSummary, InvalidYearRange, MonthExtreme, ParseLevelError,
    ProfitRow, ProfitabilityReport, SeasonalityReport, SeasonalityRow, YearRange,
};
