//! Normalized entity structs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One order line after the side sheets have been joined and the calendar
/// fields derived.
///
/// `year` and `month` are computed once at load from `order_date` and are
/// read-only from then on; the analytics layer never re-derives them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_id: String,
    pub order_date: NaiveDate,
    pub region: String,
    pub category: String,
    pub sub_category: String,
    pub product_name: String,
    /// Sales amount in USD.
    pub sales: f64,
    /// Profit amount in USD; negative values are losses.
    pub profit: f64,
    /// From the Returns sheet; `false` when the order never matched a return row.
    pub returned: bool,
    /// From the People sheet; `None` when the region has no assigned salesperson.
    pub salesperson: Option<String>,
    /// Calendar year of `order_date`.
    pub year: i32,
    /// Calendar month of `order_date`, 1..=12.
    pub month: u32,
}
