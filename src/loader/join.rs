//! Sheet joining and calendar derivation.
//!
//! Both joins are left-outer: every order row survives, and orders without a
//! matching return or salesperson keep null-filled joined columns.

use chrono::Datelike;
use rustc_hash::{FxHashMap, FxHashSet};

use super::RawSheets;
use crate::model::OrderRecord;

/// Join the Returns and People sheets onto the orders and derive the
/// year/month fields.
pub fn join_sheets(sheets: RawSheets) -> Vec<OrderRecord> {
    let returned: FxHashSet<String> = sheets
        .returns
        .into_iter()
        .filter(|r| r.returned)
        .map(|r| r.order_id)
        .collect();
    let person_by_region: FxHashMap<String, String> = sheets
        .people
        .into_iter()
        .map(|p| (p.region, p.person))
        .collect();

    sheets
        .orders
        .into_iter()
        .map(|o| OrderRecord {
            returned: returned.contains(&o.order_id),
            salesperson: person_by_region.get(&o.region).cloned(),
            year: o.order_date.year(),
            month: o.order_date.month(),
            order_id: o.order_id,
            order_date: o.order_date,
            region: o.region,
            category: o.category,
            sub_category: o.sub_category,
            product_name: o.product_name,
            sales: o.sales,
            profit: o.profit,
        })
        .collect()
}
