//! Workbook ingestion via calamine.
//!
//! Reads the "Orders", "Returns", and "People" sheets from an `.xls` or
//! `.xlsx` workbook. The first row of each sheet is the header; columns are
//! located by name so the sheet column order does not matter.

use std::collections::HashMap;
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use chrono::{Days, NaiveDate};
use tracing::warn;

use super::{LoadError, RawOrder, RawPerson, RawReturn, RawSheets, parse_date};

const ORDERS_SHEET: &str = "Orders";
const RETURNS_SHEET: &str = "Returns";
const PEOPLE_SHEET: &str = "People";

/// Read all three sheets from a workbook file.
pub fn read_workbook(path: &Path) -> Result<RawSheets, LoadError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| LoadError::Workbook {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let sheet_names = workbook.sheet_names().to_vec();

    let has_sheet = |name: &str| sheet_names.iter().any(|s| s.as_str() == name);
    if !has_sheet(ORDERS_SHEET) {
        return Err(LoadError::MissingSheet(ORDERS_SHEET.into()));
    }

    let orders_range = workbook
        .worksheet_range(ORDERS_SHEET)
        .map_err(|e| LoadError::Workbook {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    let orders = read_orders(&orders_range)?;

    let mut returns = Vec::new();
    if has_sheet(RETURNS_SHEET) {
        let range = workbook
            .worksheet_range(RETURNS_SHEET)
            .map_err(|e| LoadError::Workbook {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        returns = read_returns(&range)?;
    } else {
        warn!("workbook has no Returns sheet, treating as empty");
    }

    let mut people = Vec::new();
    if has_sheet(PEOPLE_SHEET) {
        let range = workbook
            .worksheet_range(PEOPLE_SHEET)
            .map_err(|e| LoadError::Workbook {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        people = read_people(&range)?;
    } else {
        warn!("workbook has no People sheet, treating as empty");
    }

    Ok(RawSheets {
        orders,
        returns,
        people,
    })
}

fn read_orders(range: &calamine::Range<Data>) -> Result<Vec<RawOrder>, LoadError> {
    let mut rows = range.rows();
    let header = header_map(rows.next().unwrap_or_default());
    let id_col = col(&header, ORDERS_SHEET, "Order ID")?;
    let date_col = col(&header, ORDERS_SHEET, "Order Date")?;
    let region_col = col(&header, ORDERS_SHEET, "Region")?;
    let cat_col = col(&header, ORDERS_SHEET, "Category")?;
    let subcat_col = col(&header, ORDERS_SHEET, "Sub-Category")?;
    let product_col = col(&header, ORDERS_SHEET, "Product Name")?;
    let sales_col = col(&header, ORDERS_SHEET, "Sales")?;
    let profit_col = col(&header, ORDERS_SHEET, "Profit")?;

    let mut orders = Vec::new();
    for (i, row) in rows.enumerate() {
        let row_num = i + 2;
        let order_id = cell_str(row, id_col);
        if order_id.is_empty() {
            // Trailing blank rows are common in hand-edited workbooks.
            continue;
        }
        let date_cell = cell(row, date_col);
        let order_date = cell_date(date_cell).ok_or_else(|| LoadError::BadDate {
            sheet: ORDERS_SHEET.into(),
            row: row_num,
            value: cell_display(date_cell),
        })?;
        let sales = cell_f64(cell(row, sales_col)).ok_or_else(|| bad_number(
            row_num,
            "Sales",
            cell(row, sales_col),
        ))?;
        let profit = cell_f64(cell(row, profit_col)).ok_or_else(|| bad_number(
            row_num,
            "Profit",
            cell(row, profit_col),
        ))?;
        orders.push(RawOrder {
            order_id,
            order_date,
            region: cell_str(row, region_col),
            category: cell_str(row, cat_col),
            sub_category: cell_str(row, subcat_col),
            product_name: cell_str(row, product_col),
            sales,
            profit,
        });
    }
    Ok(orders)
}

fn read_returns(range: &calamine::Range<Data>) -> Result<Vec<RawReturn>, LoadError> {
    let mut rows = range.rows();
    let header = header_map(rows.next().unwrap_or_default());
    let id_col = col(&header, RETURNS_SHEET, "Order ID")?;
    let flag_col = col(&header, RETURNS_SHEET, "Returned")?;

    let mut returns = Vec::new();
    for row in rows {
        let order_id = cell_str(row, id_col);
        if order_id.is_empty() {
            continue;
        }
        let flag = cell_str(row, flag_col);
        returns.push(RawReturn {
            order_id,
            returned: matches!(
                flag.trim().to_ascii_lowercase().as_str(),
                "yes" | "y" | "true" | "1"
            ),
        });
    }
    Ok(returns)
}

fn read_people(range: &calamine::Range<Data>) -> Result<Vec<RawPerson>, LoadError> {
    let mut rows = range.rows();
    let header = header_map(rows.next().unwrap_or_default());
    let region_col = col(&header, PEOPLE_SHEET, "Region")?;
    let person_col = col(&header, PEOPLE_SHEET, "Person")?;

    let mut people = Vec::new();
    for row in rows {
        let region = cell_str(row, region_col);
        if region.is_empty() {
            continue;
        }
        people.push(RawPerson {
            region,
            person: cell_str(row, person_col),
        });
    }
    Ok(people)
}

// ---------------------------------------------------------------------------
// Cell helpers
// ---------------------------------------------------------------------------

fn header_map(header: &[Data]) -> HashMap<String, usize> {
    header
        .iter()
        .enumerate()
        .map(|(i, cell)| (cell_display(cell).trim().to_ascii_lowercase(), i))
        .collect()
}

fn col(header: &HashMap<String, usize>, sheet: &str, name: &str) -> Result<usize, LoadError> {
    header
        .get(&name.to_ascii_lowercase())
        .copied()
        .ok_or_else(|| LoadError::MissingColumn {
            sheet: sheet.into(),
            column: name.into(),
        })
}

fn cell(row: &[Data], idx: usize) -> &Data {
    row.get(idx).unwrap_or(&Data::Empty)
}

fn cell_display(cell: &Data) -> String {
    match cell {
        Data::String(v) => v.clone(),
        Data::Float(v) => v.to_string(),
        Data::Int(v) => v.to_string(),
        Data::Bool(v) => v.to_string(),
        Data::DateTime(v) => v.to_string(),
        Data::DateTimeIso(v) => v.clone(),
        Data::DurationIso(v) => v.clone(),
        Data::Error(v) => format!("{v:?}"),
        Data::Empty => String::new(),
    }
}

fn cell_str(row: &[Data], idx: usize) -> String {
    cell_display(cell(row, idx)).trim().to_string()
}

fn cell_f64(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(v) => Some(*v),
        Data::Int(v) => Some(*v as f64),
        Data::String(v) => v.trim().parse().ok(),
        _ => None,
    }
}

fn cell_date(cell: &Data) -> Option<NaiveDate> {
    match cell {
        Data::DateTime(v) => excel_serial_to_date(v.as_f64()),
        Data::DateTimeIso(v) => parse_date(v),
        Data::String(v) => parse_date(v),
        Data::Float(v) => excel_serial_to_date(*v),
        Data::Int(v) => excel_serial_to_date(*v as f64),
        _ => None,
    }
}

fn bad_number(row: usize, column: &str, cell: &Data) -> LoadError {
    LoadError::BadNumber {
        sheet: ORDERS_SHEET.into(),
        row,
        column: column.into(),
        value: cell_display(cell),
    }
}

/// Convert an Excel serial date (days since 1899-12-30, fractional part is
/// time of day) to a calendar date.
pub(crate) fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_days(Days::new(serial as u64))
}
