//! The interactive numbered menu.
//!
//! A session loops until the operator picks "Exit" or input runs out. Failed
//! ledger calls are reported and the loop carries on; only terminal I/O
//! failures end the session early.

use std::io::{BufRead, Write};

use anyhow::Context;
use thiserror::Error;

use stockledger_core::DomainError;
use stockledger_infra::{Ledger, LedgerError};
use stockledger_products::{NewProduct, Product, ProductPatch};
use stockledger_sales::{NewSale, SalesReportLine, parse_sale_date};

use crate::console::{Console, ConsoleError, ConsoleResult};
use crate::views;

const MENU: &str = "\
1. View Stock Levels
2. View Sales Data
3. Generate Reorder Alerts
4. Generate Reports
5. Add Product
6. Update Product
7. Delete Product
8. Add Sales
9. Exit";

#[derive(Debug, Error)]
enum ActionError {
    #[error(transparent)]
    Console(#[from] ConsoleError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl From<DomainError> for ActionError {
    fn from(err: DomainError) -> Self {
        ActionError::Ledger(err.into())
    }
}

type ActionResult = Result<(), ActionError>;

/// Run a menu session reading answers from `input` and writing to `output`.
pub async fn run<R, W>(ledger: &mut Ledger, input: R, output: W) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut console = Console::new(input, output);
    match session(ledger, &mut console).await {
        Ok(()) | Err(ConsoleError::Closed) => Ok(()),
        Err(ConsoleError::Io(err)) => Err(err).context("terminal I/O failed"),
    }
}

async fn session<R: BufRead, W: Write>(
    ledger: &mut Ledger,
    console: &mut Console<R, W>,
) -> ConsoleResult<()> {
    loop {
        match ledger.reorder_alert_count().await {
            Ok(count) => {
                if let Some(banner) = views::reorder_banner(count) {
                    console.say(banner)?;
                }
            }
            Err(err) => report(console, &err)?,
        }

        console.say(format!("\n{MENU}"))?;
        let choice = console.ask("Enter your choice (1-9): ")?;

        let outcome = match choice.as_str() {
            "1" => view_stock_levels(ledger, console).await,
            "2" => view_sales_data(ledger, console).await,
            "3" => view_reorder_alerts(ledger, console).await,
            "4" => generate_reports(ledger, console).await,
            "5" => add_product(ledger, console).await,
            "6" => update_product(ledger, console).await,
            "7" => delete_product(ledger, console).await,
            "8" => add_sale(ledger, console).await,
            "9" => return console.say("Exiting the program. Goodbye!"),
            _ => {
                console.say("Invalid choice. Please enter a number from 1 to 9.")?;
                continue;
            }
        };

        match outcome {
            Ok(()) => {}
            Err(ActionError::Console(err)) => return Err(err),
            Err(ActionError::Ledger(err)) => report(console, &err)?,
        }
    }
}

fn report<R: BufRead, W: Write>(console: &mut Console<R, W>, err: &LedgerError) -> ConsoleResult<()> {
    if !err.is_recoverable() {
        tracing::error!(error = %err, "ledger operation failed");
    }
    console.say(views::failure_message(err))
}

async fn view_stock_levels<R: BufRead, W: Write>(
    ledger: &Ledger,
    console: &mut Console<R, W>,
) -> ActionResult {
    let products = ledger.list_products().await?;
    if products.is_empty() {
        console.say(views::NO_PRODUCTS)?;
    } else {
        console.say("\nStock Levels:")?;
        console.say(views::stock_table(&products))?;
    }
    Ok(())
}

async fn view_sales_data<R: BufRead, W: Write>(
    ledger: &Ledger,
    console: &mut Console<R, W>,
) -> ActionResult {
    let sales = ledger.list_sales().await?;
    if sales.is_empty() {
        console.say(views::NO_SALES)?;
    } else {
        console.say("\nSales Data:")?;
        console.say(views::sales_table(&sales))?;
    }
    Ok(())
}

async fn view_reorder_alerts<R: BufRead, W: Write>(
    ledger: &Ledger,
    console: &mut Console<R, W>,
) -> ActionResult {
    let alerts = ledger.reorder_alerts().await?;
    if alerts.is_empty() {
        console.say(views::NO_ALERTS)?;
    } else {
        console.say("\nReorder Alerts:")?;
        console.say(views::alerts_table(&alerts))?;
    }
    Ok(())
}

async fn add_product<R: BufRead, W: Write>(
    ledger: &mut Ledger,
    console: &mut Console<R, W>,
) -> ActionResult {
    console.say("\nEnter details for the new product:")?;
    let name = console.ask_until(
        "Product Name: ",
        "Invalid input. Product name cannot be blank.",
        |s| (!s.is_empty()).then(|| s.to_string()),
    )?;
    let quantity = console.ask_count("Quantity in Stock: ")?;
    let reorder_level = console.ask_count("Reorder Level: ")?;
    let cost_per_unit = console.ask_money("Cost Per Unit: ")?;
    let unit_price = console.ask_money("Unit Price: ")?;

    let details = NewProduct::new(name, quantity, reorder_level, unit_price, cost_per_unit)?;
    let id = ledger.add_product(details).await?;
    console.say(format!("Product added successfully (Product ID {id})."))?;
    Ok(())
}

async fn update_product<R: BufRead, W: Write>(
    ledger: &mut Ledger,
    console: &mut Console<R, W>,
) -> ActionResult {
    console.say("\nEnter the details to update the product:")?;
    let id = console.ask_product_id("Product ID: ")?;
    let current = ledger.product(id).await?;

    console.say("Leave a field blank to keep its current value.")?;
    let patch = ask_patch(console, &current)?;
    if patch.is_empty() {
        console.say("Nothing to update.")?;
        return Ok(());
    }

    ledger.update_product(id, patch).await?;
    console.say("Product updated successfully.")?;
    Ok(())
}

fn ask_patch<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    current: &Product,
) -> ConsoleResult<ProductPatch> {
    let name = console.ask(&format!("New Product Name [{}]: ", current.name()))?;
    let quantity_in_stock = console.ask_optional_count(&format!(
        "New Quantity in Stock [{}]: ",
        current.quantity_in_stock()
    ))?;
    let reorder_level = console.ask_optional_count(&format!(
        "New Reorder Level [{}]: ",
        current.reorder_level()
    ))?;
    let unit_price = console.ask_optional_money(&format!(
        "New Unit Price [{}]: ",
        views::cents(current.unit_price().amount())
    ))?;
    let cost_per_unit = console.ask_optional_money(&format!(
        "New Cost Per Unit [{}]: ",
        views::cents(current.cost_per_unit().amount())
    ))?;

    Ok(ProductPatch {
        name: (!name.is_empty()).then_some(name),
        quantity_in_stock,
        reorder_level,
        unit_price,
        cost_per_unit,
    })
}

async fn delete_product<R: BufRead, W: Write>(
    ledger: &mut Ledger,
    console: &mut Console<R, W>,
) -> ActionResult {
    let id = console.ask_product_id("\nEnter the Product ID to delete: ")?;
    let sales_removed = ledger.delete_product(id).await?;
    console.say(format!(
        "Product and associated sales data deleted successfully ({sales_removed} sale(s) removed)."
    ))?;
    Ok(())
}

async fn add_sale<R: BufRead, W: Write>(
    ledger: &mut Ledger,
    console: &mut Console<R, W>,
) -> ActionResult {
    console.say("\nEnter sales data:")?;
    let product = loop {
        let id = console.ask_product_id("Enter the Product ID for the product sold: ")?;
        match ledger.product(id).await {
            Ok(product) => break product,
            Err(LedgerError::Domain(DomainError::NotFound { .. })) => console.say(format!(
                "Product with Product ID {id} does not exist. Please enter a valid Product ID."
            ))?,
            Err(err) => return Err(err.into()),
        }
    };

    let quantity = console.ask_until(
        "Enter the quantity sold: ",
        "Invalid input. Please enter a valid integer for the quantity sold.",
        |s| s.parse::<i64>().ok().filter(|q| *q > 0),
    )?;

    // Refuse before asking for a date; record_sale checks again atomically.
    stockledger_inventory::withdraw(&product, quantity)?;

    let sale_date = console.ask_until(
        "Enter the sale date (YYYY-MM-DD, blank for today): ",
        "Invalid date format. Please use YYYY-MM-DD.",
        |s| parse_sale_date(s).ok(),
    )?;

    let sale = NewSale::new(product.id(), quantity, sale_date)?;
    ledger.record_sale(sale).await?;
    console.say("Sales data added successfully.")?;
    Ok(())
}

async fn generate_reports<R: BufRead, W: Write>(
    ledger: &Ledger,
    console: &mut Console<R, W>,
) -> ActionResult {
    let lines = ledger.sales_report().await?;
    if lines.is_empty() {
        console.say(views::NO_REPORT_DATA)?;
        return Ok(());
    }

    console.say("\nSales Report:")?;
    console.say(views::report_table(&lines))?;
    if !lines.iter().any(SalesReportLine::has_sales) {
        console.say(views::NOTHING_SOLD_YET)?;
    }

    let summary = ledger.financial_summary().await?;
    for line in views::summary_lines(&summary) {
        console.say(line)?;
    }
    Ok(())
}
