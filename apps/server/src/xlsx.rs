//! # Spreadsheet Boundary
//!
//! Reading uploaded catalog sheets (calamine) and building report
//! downloads (rust_xlsxwriter).
//!
//! This is the only place rupee decimals exist; everything behind this
//! module is integer paise. Product export uses the exact import column
//! set, so an exported sheet re-imports cleanly.

use std::collections::HashMap;
use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use serde::Serialize;
use thiserror::Error;

use dukaan_core::{tz, Money, ProductDetail, Sale};

/// Columns a product sheet must carry (case-insensitive).
pub const REQUIRED_COLUMNS: &[&str] = &[
    "barcode",
    "category",
    "manufacturer",
    "quantity",
    "cost_price",
    "sale_price",
];

/// Sheet-level failures that abort the whole upload.
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("Could not read workbook: {0}")]
    Workbook(String),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("The sheet has no data rows")]
    Empty,
}

/// One parsed product row, prices already converted to paise.
#[derive(Debug, Clone)]
pub struct ImportRow {
    /// 1-based spreadsheet row number, for error reporting.
    pub row: usize,
    pub barcode: String,
    pub category: String,
    pub manufacturer: String,
    pub quantity: i64,
    pub cost_price_paise: i64,
    pub sale_price_paise: i64,
}

/// A row that could not be parsed; the batch continues without it.
#[derive(Debug, Clone, Serialize)]
pub struct RowError {
    pub row: usize,
    pub message: String,
}

/// Parse result: usable rows plus per-row failures.
#[derive(Debug)]
pub struct ParsedSheet {
    pub total_rows: usize,
    pub rows: Vec<ImportRow>,
    pub errors: Vec<RowError>,
}

// =============================================================================
// Reading
// =============================================================================

/// Parses the first worksheet of an uploaded `.xlsx` file.
///
/// Row failures (missing or unreadable cells) are collected into
/// `errors` without aborting the batch; only a missing header column or
/// an unreadable workbook fails the whole upload.
pub fn parse_product_sheet(data: &[u8]) -> Result<ParsedSheet, SheetError> {
    let mut workbook: Xlsx<_> =
        Xlsx::new(Cursor::new(data)).map_err(|e| SheetError::Workbook(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SheetError::Empty)?
        .map_err(|e| SheetError::Workbook(e.to_string()))?;

    let mut rows = range.rows();
    let header = rows.next().ok_or(SheetError::Empty)?;

    let columns = header_map(header)?;

    let mut parsed = ParsedSheet {
        total_rows: 0,
        rows: Vec::new(),
        errors: Vec::new(),
    };

    for (i, row) in rows.enumerate() {
        // Header is row 1, data starts at row 2
        let row_number = i + 2;

        if row.iter().all(is_blank) {
            continue;
        }
        parsed.total_rows += 1;

        match parse_row(row_number, row, &columns) {
            Ok(import_row) => parsed.rows.push(import_row),
            Err(message) => parsed.errors.push(RowError {
                row: row_number,
                message,
            }),
        }
    }

    if parsed.total_rows == 0 {
        return Err(SheetError::Empty);
    }

    Ok(parsed)
}

fn header_map(header: &[Data]) -> Result<HashMap<String, usize>, SheetError> {
    let mut columns = HashMap::new();
    for (idx, cell) in header.iter().enumerate() {
        if let Some(name) = cell_string(cell) {
            columns.insert(name.to_lowercase(), idx);
        }
    }

    for required in REQUIRED_COLUMNS {
        if !columns.contains_key(*required) {
            return Err(SheetError::MissingColumn(required.to_string()));
        }
    }

    Ok(columns)
}

fn parse_row(
    row_number: usize,
    row: &[Data],
    columns: &HashMap<String, usize>,
) -> Result<ImportRow, String> {
    let text = |name: &str| -> Result<String, String> {
        columns
            .get(name)
            .and_then(|&idx| row.get(idx))
            .and_then(cell_string)
            .ok_or_else(|| format!("{} is missing", name))
    };
    let number = |name: &str| -> Result<f64, String> {
        columns
            .get(name)
            .and_then(|&idx| row.get(idx))
            .and_then(cell_number)
            .ok_or_else(|| format!("{} is not a number", name))
    };

    let quantity = number("quantity")?;
    if quantity.fract() != 0.0 {
        return Err("quantity must be a whole number".to_string());
    }

    Ok(ImportRow {
        row: row_number,
        barcode: text("barcode")?,
        category: text("category")?,
        manufacturer: text("manufacturer")?,
        quantity: quantity as i64,
        cost_price_paise: Money::from_rupee_decimal(number("cost_price")?).paise(),
        sale_price_paise: Money::from_rupee_decimal(number("sale_price")?).paise(),
    })
}

/// Reads a cell as trimmed text. Numeric cells are rendered as integers
/// when whole, and barcodes are left-padded to 8 digits (Excel strips
/// leading zeros from numeric cells).
fn cell_string(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => format!("{:08}", i),
        Data::Float(f) if f.fract() == 0.0 => format!("{:08}", *f as i64),
        Data::Float(f) => f.to_string(),
        _ => return None,
    };

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn cell_number(cell: &Data) -> Option<f64> {
    match cell {
        Data::Int(i) => Some(*i as f64),
        Data::Float(f) => Some(*f),
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

// =============================================================================
// Writing
// =============================================================================

/// Builds the product export workbook (same columns the import expects).
pub fn products_workbook(products: &[ProductDetail]) -> Result<Vec<u8>, SheetError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    write_header(sheet, REQUIRED_COLUMNS)?;

    for (i, product) in products.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet
            .write_string(row, 0, product.barcode.as_str())
            .and_then(|s| s.write_string(row, 1, product.category_name.as_str()))
            .and_then(|s| s.write_string(row, 2, product.manufacturer_name.as_str()))
            .and_then(|s| s.write_number(row, 3, product.quantity as f64))
            .and_then(|s| {
                s.write_number(
                    row,
                    4,
                    Money::from_paise(product.cost_price_paise).to_rupee_decimal(),
                )
            })
            .and_then(|s| {
                s.write_number(
                    row,
                    5,
                    Money::from_paise(product.sale_price_paise).to_rupee_decimal(),
                )
            })
            .map_err(|e| SheetError::Workbook(e.to_string()))?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| SheetError::Workbook(e.to_string()))
}

const SALE_COLUMNS: &[&str] = &[
    "number",
    "type",
    "date",
    "customer_name",
    "customer_mobile",
    "payment_mode",
    "remarks",
    "total_amount",
    "total_discount",
    "final_amount",
];

/// Builds the sales report export workbook from an already-filtered set.
pub fn sales_workbook(sales: &[Sale]) -> Result<Vec<u8>, SheetError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    write_header(sheet, SALE_COLUMNS)?;

    for (i, sale) in sales.iter().enumerate() {
        let row = (i + 1) as u32;
        let payment_mode = sale
            .payment_mode
            .map(|m| format!("{:?}", m).to_lowercase())
            .unwrap_or_default();

        sheet
            .write_string(row, 0, sale.number.as_str())
            .and_then(|s| s.write_string(row, 1, sale.sale_type.as_str()))
            .and_then(|s| s.write_string(row, 2, tz::format_local(sale.sale_date)))
            .and_then(|s| s.write_string(row, 3, sale.customer_name.as_str()))
            .and_then(|s| s.write_string(row, 4, sale.customer_mobile.as_deref().unwrap_or("")))
            .and_then(|s| s.write_string(row, 5, payment_mode))
            .and_then(|s| s.write_string(row, 6, sale.remarks.as_deref().unwrap_or("")))
            .and_then(|s| {
                s.write_number(
                    row,
                    7,
                    Money::from_paise(sale.total_amount_paise).to_rupee_decimal(),
                )
            })
            .and_then(|s| {
                s.write_number(
                    row,
                    8,
                    Money::from_paise(sale.total_discount_paise).to_rupee_decimal(),
                )
            })
            .and_then(|s| {
                s.write_number(
                    row,
                    9,
                    Money::from_paise(sale.final_amount_paise).to_rupee_decimal(),
                )
            })
            .map_err(|e| SheetError::Workbook(e.to_string()))?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| SheetError::Workbook(e.to_string()))
}

fn write_header(sheet: &mut Worksheet, columns: &[&str]) -> Result<(), SheetError> {
    let bold = Format::new().set_bold();
    for (col, name) in columns.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *name, &bold)
            .map_err(|e| SheetError::Workbook(e.to_string()))?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(barcode: &str, quantity: i64) -> ProductDetail {
        let now = Utc::now();
        ProductDetail {
            id: format!("id-{}", barcode),
            barcode: barcode.to_string(),
            category_id: "c-1".to_string(),
            category_name: "Grocery".to_string(),
            manufacturer_id: "m-1".to_string(),
            manufacturer_name: "Amul".to_string(),
            quantity,
            cost_price_paise: 1050,
            sale_price_paise: 1299,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_product_export_reimports_cleanly() {
        let products = vec![product("55012345", 10), product("00012346", 0)];
        let bytes = products_workbook(&products).unwrap();

        let parsed = parse_product_sheet(&bytes).unwrap();
        assert_eq!(parsed.total_rows, 2);
        assert_eq!(parsed.rows.len(), 2);
        assert!(parsed.errors.is_empty());

        let first = &parsed.rows[0];
        assert_eq!(first.row, 2);
        assert_eq!(first.barcode, "55012345");
        assert_eq!(first.category, "Grocery");
        assert_eq!(first.quantity, 10);
        assert_eq!(first.cost_price_paise, 1050);
        assert_eq!(first.sale_price_paise, 1299);

        // Leading zeros survive the numeric round trip
        assert_eq!(parsed.rows[1].barcode, "00012346");
    }

    fn sheet_from_rows(header: &[&str], rows: &[&[&str]]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, name) in header.iter().enumerate() {
            sheet.write_string(0, col as u16, *name).unwrap();
        }
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                sheet.write_string((r + 1) as u32, c as u16, *value).unwrap();
            }
        }
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_missing_column_rejected() {
        let bytes = sheet_from_rows(
            &["barcode", "category", "quantity"],
            &[&["55012345", "Grocery", "5"]],
        );
        let err = parse_product_sheet(&bytes).unwrap_err();
        assert!(matches!(err, SheetError::MissingColumn(c) if c == "manufacturer"));
    }

    #[test]
    fn test_bad_rows_collected_without_aborting() {
        let bytes = sheet_from_rows(
            REQUIRED_COLUMNS,
            &[
                &["55012345", "Grocery", "Amul", "5", "10.50", "12.99"],
                // quantity not a number
                &["55012346", "Grocery", "Amul", "many", "1", "2"],
                // barcode cell blank
                &["", "Grocery", "Amul", "5", "1", "2"],
            ],
        );

        let parsed = parse_product_sheet(&bytes).unwrap();
        assert_eq!(parsed.total_rows, 3);
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.errors.len(), 2);
        assert_eq!(parsed.errors[0].row, 3);
        assert_eq!(parsed.errors[1].row, 4);
    }

    #[test]
    fn test_header_is_case_insensitive() {
        let bytes = sheet_from_rows(
            &["Barcode", "CATEGORY", "Manufacturer", "Quantity", "Cost_Price", "Sale_Price"],
            &[&["55012345", "Grocery", "Amul", "5", "10.50", "12.99"]],
        );
        let parsed = parse_product_sheet(&bytes).unwrap();
        assert_eq!(parsed.rows.len(), 1);
    }

    #[test]
    fn test_empty_sheet_rejected() {
        let bytes = sheet_from_rows(REQUIRED_COLUMNS, &[]);
        assert!(matches!(
            parse_product_sheet(&bytes),
            Err(SheetError::Empty)
        ));
    }

    #[test]
    fn test_sales_workbook_builds() {
        use dukaan_core::{PaymentMode, SaleType};

        let now = Utc::now();
        let sale = Sale {
            id: "s-1".to_string(),
            sale_type: SaleType::Bill,
            number: "BILL-0001".to_string(),
            number_seq: 1,
            customer_name: "Walk In Customer".to_string(),
            customer_mobile: Some("9876543210".to_string()),
            payment_mode: Some(PaymentMode::Upi),
            remarks: None,
            total_amount_paise: 5000,
            total_discount_paise: 500,
            final_amount_paise: 4500,
            sale_date: now,
            created_at: now,
            updated_at: now,
        };

        let bytes = sales_workbook(&[sale]).unwrap();
        assert!(!bytes.is_empty());
    }
}
