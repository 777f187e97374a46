//! Rendering of ledger data for the terminal. Amounts are rounded to cents
//! here and nowhere else.

use rust_decimal::{Decimal, RoundingStrategy};

use stockledger_accounting::FinancialSummary;
use stockledger_core::DomainError;
use stockledger_infra::LedgerError;
use stockledger_products::Product;
use stockledger_sales::{SALE_DATE_FORMAT, Sale, SalesReportLine};

use crate::table::Table;

pub const NO_PRODUCTS: &str = "No products in the inventory.";
pub const NO_SALES: &str = "No sales data available.";
pub const NO_ALERTS: &str = "No products need to be reordered.";
pub const NO_REPORT_DATA: &str = "No sales data available for generating reports.";
pub const NOTHING_SOLD_YET: &str = "No sales recorded yet.";

/// Two decimal places, halves rounded away from zero.
pub fn cents(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}

pub fn stock_table(products: &[Product]) -> Table {
    let mut table = Table::new([
        "Product ID",
        "Product Name",
        "Quantity in Stock",
        "Reorder Level",
        "Unit Price",
        "Cost Per Unit",
    ]);
    for p in products {
        table.add_row([
            p.id().to_string(),
            p.name().to_string(),
            p.quantity_in_stock().to_string(),
            p.reorder_level().to_string(),
            cents(p.unit_price().amount()),
            cents(p.cost_per_unit().amount()),
        ]);
    }
    table
}

pub fn sales_table(sales: &[Sale]) -> Table {
    let mut table = Table::new(["Sale ID", "Product ID", "Quantity Sold", "Sale Date"]);
    for s in sales {
        table.add_row([
            s.id().to_string(),
            s.product_id().to_string(),
            s.quantity_sold().to_string(),
            s.sale_date().format(SALE_DATE_FORMAT).to_string(),
        ]);
    }
    table
}

pub fn alerts_table(products: &[Product]) -> Table {
    let mut table = Table::new([
        "Product ID",
        "Product Name",
        "Quantity in Stock",
        "Reorder Level",
    ]);
    for p in products {
        table.add_row([
            p.id().to_string(),
            p.name().to_string(),
            p.quantity_in_stock().to_string(),
            p.reorder_level().to_string(),
        ]);
    }
    table
}

pub fn report_table(lines: &[SalesReportLine]) -> Table {
    let mut table = Table::new(["Product ID", "Product Name", "Total Quantity Sold"]);
    for line in lines {
        table.add_row([
            line.product_id.to_string(),
            line.product_name.clone(),
            line.total_quantity_sold.to_string(),
        ]);
    }
    table
}

pub fn summary_lines(summary: &FinancialSummary) -> [String; 3] {
    [
        format!("Total Revenue: ${}", cents(summary.total_revenue)),
        format!("Total Cost of Goods Sold: ${}", cents(summary.total_cogs)),
        format!(
            "Overall Profit Margin: {}%",
            cents(summary.profit_margin_percent)
        ),
    ]
}

pub fn reorder_banner(count: usize) -> Option<String> {
    (count > 0).then(|| {
        format!("\n{count} product(s) need to be reordered. Check option 3 for details.")
    })
}

/// Operator-facing text for a failed ledger call.
pub fn failure_message(err: &LedgerError) -> String {
    match err.as_domain() {
        Some(DomainError::InsufficientStock {
            requested,
            available,
            ..
        }) => format!(
            "Error: Quantity in stock ({available}) is less than quantity sold ({requested})."
        ),
        Some(DomainError::NotFound { entity: "product", id }) => {
            format!("Product with Product ID {id} does not exist.")
        }
        Some(other) => format!("Error: {other}"),
        None => format!("Error: {err}"),
    }
}
