//! CSV-directory ingestion.
//!
//! Reads `orders.csv`, `returns.csv`, and `people.csv` from a directory.
//! Column headers match the workbook sheet headers (`Order ID`, `Order
//! Date`, ...). The two side files are optional; a missing one is treated as
//! an empty sheet, which the left-outer join turns into null-filled columns.

use std::fs::File;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use super::{LoadError, RawOrder, RawPerson, RawReturn, RawSheets, parse_date};

#[derive(Debug, Deserialize)]
struct OrderRow {
    #[serde(rename = "Order ID")]
    order_id: String,
    #[serde(rename = "Order Date")]
    order_date: String,
    #[serde(rename = "Region")]
    region: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Sub-Category")]
    sub_category: String,
    #[serde(rename = "Product Name")]
    product_name: String,
    #[serde(rename = "Sales")]
    sales: f64,
    #[serde(rename = "Profit")]
    profit: f64,
}

#[derive(Debug, Deserialize)]
struct ReturnRow {
    #[serde(rename = "Order ID")]
    order_id: String,
    #[serde(rename = "Returned")]
    returned: String,
}

#[derive(Debug, Deserialize)]
struct PersonRow {
    #[serde(rename = "Region")]
    region: String,
    #[serde(rename = "Person")]
    person: String,
}

/// Read all three sheets from a directory of CSV exports.
pub fn read_dir(dir: &Path) -> Result<RawSheets, LoadError> {
    let orders = read_orders(&dir.join("orders.csv"))?;
    let returns = read_returns(&dir.join("returns.csv"))?;
    let people = read_people(&dir.join("people.csv"))?;
    Ok(RawSheets {
        orders,
        returns,
        people,
    })
}

fn open_reader(path: &Path) -> Result<csv::Reader<File>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(file))
}

fn read_orders(path: &Path) -> Result<Vec<RawOrder>, LoadError> {
    let mut reader = open_reader(path)?;
    let mut orders = Vec::new();
    for (i, result) in reader.deserialize().enumerate() {
        // Row 1 is the header, so data rows start at 2.
        let row_num = i + 2;
        let row: OrderRow = result.map_err(|source| LoadError::Csv {
            file: path.to_path_buf(),
            source,
        })?;
        let order_date = parse_date(&row.order_date).ok_or_else(|| LoadError::BadDate {
            sheet: "orders.csv".into(),
            row: row_num,
            value: row.order_date.clone(),
        })?;
        orders.push(RawOrder {
            order_id: row.order_id,
            order_date,
            region: row.region,
            category: row.category,
            sub_category: row.sub_category,
            product_name: row.product_name,
            sales: row.sales,
            profit: row.profit,
        });
    }
    Ok(orders)
}

fn read_returns(path: &Path) -> Result<Vec<RawReturn>, LoadError> {
    if !path.exists() {
        warn!(path = %path.display(), "returns sheet missing, treating as empty");
        return Ok(Vec::new());
    }
    let mut reader = open_reader(path)?;
    let mut returns = Vec::new();
    for result in reader.deserialize() {
        let row: ReturnRow = result.map_err(|source| LoadError::Csv {
            file: path.to_path_buf(),
            source,
        })?;
        returns.push(RawReturn {
            order_id: row.order_id,
            returned: parse_return_flag(&row.returned),
        });
    }
    Ok(returns)
}

fn read_people(path: &Path) -> Result<Vec<RawPerson>, LoadError> {
    if !path.exists() {
        warn!(path = %path.display(), "people sheet missing, treating as empty");
        return Ok(Vec::new());
    }
    let mut reader = open_reader(path)?;
    let mut people = Vec::new();
    for result in reader.deserialize() {
        let row: PersonRow = result.map_err(|source| LoadError::Csv {
            file: path.to_path_buf(),
            source,
        })?;
        people.push(RawPerson {
            region: row.region,
            person: row.person,
        });
    }
    Ok(people)
}

/// The Returns sheet marks returned orders with "Yes"; accept the usual
/// truthy spellings.
fn parse_return_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "yes" | "y" | "true" | "1"
    )
}
