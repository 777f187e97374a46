//! Mapping from SQLite rows to domain values.
//!
//! Rows are re-validated on the way in; a row that breaks a domain rule is
//! reported as corrupt instead of being handed to callers.

use core::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Row, TypeInfo, ValueRef};
use sqlx::sqlite::SqliteRow;

use stockledger_accounting::SaleLine;
use stockledger_core::{Money, ProductId, SaleId};
use stockledger_products::{NewProduct, Product};
use stockledger_sales::{Sale, SalesReportLine};

use crate::error::{LedgerError, LedgerResult};

pub(crate) const PRODUCT_COLUMNS: &str =
    "ProductID, ProductName, QuantityInStock, ReorderLevel, UnitPrice, CostPerUnit";

pub(crate) const SALE_COLUMNS: &str = "SaleID, ProductID, QuantitySold, SaleDate";

pub(crate) fn row_to_product(row: &SqliteRow) -> LedgerResult<Product> {
    let id: i64 = row.try_get("ProductID")?;
    let name: String = row.try_get("ProductName")?;
    let quantity_in_stock: i64 = row.try_get("QuantityInStock")?;
    let reorder_level: i64 = row.try_get("ReorderLevel")?;
    let unit_price = money_column(row, "UnitPrice")?;
    let cost_per_unit = money_column(row, "CostPerUnit")?;

    let details = NewProduct::new(name, quantity_in_stock, reorder_level, unit_price, cost_per_unit)
        .map_err(|e| LedgerError::corrupt(format!("Product {id}: {e}")))?;

    Ok(Product::new(ProductId::new(id), details))
}

pub(crate) fn row_to_sale(row: &SqliteRow) -> LedgerResult<Sale> {
    let id: i64 = row.try_get("SaleID")?;
    let product_id: i64 = row.try_get("ProductID")?;
    let quantity_sold: i64 = row.try_get("QuantitySold")?;
    let sale_date: NaiveDate = row.try_get("SaleDate")?;

    Sale::new(
        SaleId::new(id),
        ProductId::new(product_id),
        quantity_sold,
        sale_date,
    )
    .map_err(|e| LedgerError::corrupt(format!("Sales {id}: {e}")))
}

pub(crate) fn row_to_report_line(row: &SqliteRow) -> LedgerResult<SalesReportLine> {
    Ok(SalesReportLine {
        product_id: ProductId::new(row.try_get("ProductID")?),
        product_name: row.try_get("ProductName")?,
        total_quantity_sold: row.try_get("TotalSold")?,
    })
}

pub(crate) fn row_to_sale_line(row: &SqliteRow) -> LedgerResult<SaleLine> {
    Ok(SaleLine {
        quantity_sold: row.try_get("QuantitySold")?,
        unit_price: money_column(row, "UnitPrice")?,
        cost_per_unit: money_column(row, "CostPerUnit")?,
    })
}

/// Text encoding of an amount for the price columns.
pub(crate) fn money_to_column(money: Money) -> String {
    money.amount().to_string()
}

/// Prices written by this crate are decimal text. Tables created with `REAL`
/// price columns hold floats (or integers, for whole amounts) instead; those
/// are converted with `Decimal::try_from`.
fn money_column(row: &SqliteRow, column: &str) -> LedgerResult<Money> {
    let storage_class = row.try_get_raw(column)?.type_info().name().to_owned();
    let amount = match storage_class.as_str() {
        "REAL" => {
            let raw: f64 = row.try_get(column)?;
            Decimal::try_from(raw)
                .map_err(|e| LedgerError::corrupt(format!("{column} {raw}: {e}")))?
        }
        "INTEGER" => Decimal::from(row.try_get::<i64, _>(column)?),
        _ => {
            let raw: String = row.try_get(column)?;
            Decimal::from_str(&raw)
                .map_err(|e| LedgerError::corrupt(format!("{column} '{raw}': {e}")))?
        }
    };
    Money::new(amount).map_err(|e| LedgerError::corrupt(format!("{column}: {e}")))
}
