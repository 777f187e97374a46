//! One-shot subcommands: run a single ledger operation, print the result and exit.

use std::io::Write;

use serde::Serialize;
use serde_json::json;

use stockledger_accounting::FinancialSummary;
use stockledger_infra::Ledger;
use stockledger_products::NewProduct;
use stockledger_sales::{NewSale, SalesReportLine};

use crate::settings::Command;
use crate::views;

#[derive(Debug, Serialize)]
struct ReportView<'a> {
    lines: &'a [SalesReportLine],
    summary: &'a FinancialSummary,
}

/// Execute `command` against the ledger, writing tables (or JSON when `json`
/// is set) to `out`.
///
/// Rejected operations surface as errors so the process exits non-zero.
pub async fn run<W: Write>(
    ledger: &mut Ledger,
    command: Command,
    json: bool,
    out: &mut W,
) -> anyhow::Result<()> {
    match command {
        Command::Products => {
            let products = ledger.list_products().await?;
            if json {
                write_json(out, &products)?;
            } else if products.is_empty() {
                writeln!(out, "{}", views::NO_PRODUCTS)?;
            } else {
                writeln!(out, "{}", views::stock_table(&products))?;
            }
        }
        Command::Sales => {
            let sales = ledger.list_sales().await?;
            if json {
                write_json(out, &sales)?;
            } else if sales.is_empty() {
                writeln!(out, "{}", views::NO_SALES)?;
            } else {
                writeln!(out, "{}", views::sales_table(&sales))?;
            }
        }
        Command::Alerts => {
            let alerts = ledger.reorder_alerts().await?;
            if json {
                write_json(out, &alerts)?;
            } else if alerts.is_empty() {
                writeln!(out, "{}", views::NO_ALERTS)?;
            } else {
                writeln!(out, "{}", views::alerts_table(&alerts))?;
            }
        }
        Command::Report => {
            let lines = ledger.sales_report().await?;
            let summary = ledger.financial_summary().await?;
            if json {
                write_json(
                    out,
                    &ReportView {
                        lines: &lines,
                        summary: &summary,
                    },
                )?;
            } else if lines.is_empty() {
                writeln!(out, "{}", views::NO_REPORT_DATA)?;
            } else {
                writeln!(out, "{}", views::report_table(&lines))?;
                for line in views::summary_lines(&summary) {
                    writeln!(out, "{line}")?;
                }
            }
        }
        Command::AddProduct(args) => {
            let details = NewProduct::new(
                args.name,
                args.quantity,
                args.reorder_level,
                args.unit_price,
                args.cost_per_unit,
            )?;
            let id = ledger.add_product(details).await?;
            if json {
                write_json(out, &json!({ "product_id": id }))?;
            } else {
                writeln!(out, "Product added successfully (Product ID {id}).")?;
            }
        }
        Command::UpdateProduct(args) => {
            let product = ledger.update_product(args.id, args.patch()).await?;
            if json {
                write_json(out, &product)?;
            } else {
                writeln!(out, "Product updated successfully.")?;
                writeln!(out, "{}", views::stock_table(std::slice::from_ref(&product)))?;
            }
        }
        Command::DeleteProduct { id } => {
            let sales_removed = ledger.delete_product(id).await?;
            if json {
                write_json(
                    out,
                    &json!({ "product_id": id, "sales_removed": sales_removed }),
                )?;
            } else {
                writeln!(
                    out,
                    "Product and associated sales data deleted successfully ({sales_removed} sale(s) removed)."
                )?;
            }
        }
        Command::Sell(args) => {
            let sale = NewSale::new(args.product_id, args.quantity, args.date)?;
            let sale_id = ledger.record_sale(sale).await?;
            if json {
                write_json(out, &json!({ "sale_id": sale_id }))?;
            } else {
                writeln!(out, "Sales data added successfully (Sale ID {sale_id}).")?;
            }
        }
    }

    out.flush()?;
    Ok(())
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
