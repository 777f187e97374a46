//! Command line and environment configuration.
//!
//! Precedence: explicit flag, then environment variable, then default.

use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use stockledger_core::{DomainError, Money, ProductId};
use stockledger_observability::LogFormat;
use stockledger_products::ProductPatch;
use stockledger_sales::parse_sale_date;

/// File name used when no database path is configured.
pub const DEFAULT_DATABASE_FILE: &str = "inventory_management.db";

#[derive(Debug, Parser)]
#[command(
    name = "stockledger",
    about = "Track products, stock levels and sales. Runs the interactive menu when no command is given.",
    version
)]
pub struct Cli {
    /// SQLite database file. Created, with its tables, on first use.
    #[arg(long, env = "STOCKLEDGER_DB", value_name = "path", global = true)]
    pub database: Option<PathBuf>,

    /// Format of log lines written to stderr (`pretty` or `json`).
    #[arg(
        long,
        env = "STOCKLEDGER_LOG_FORMAT",
        value_name = "format",
        default_value_t = LogFormat::Pretty,
        global = true
    )]
    pub log_format: LogFormat,

    /// Print command results as JSON instead of tables.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show stock levels for every product.
    Products,
    /// Show every recorded sale.
    Sales,
    /// Show products at or below their reorder level.
    Alerts,
    /// Units sold per product, then revenue, cost of goods sold and margin.
    Report,
    /// Add a product.
    AddProduct(AddProductArgs),
    /// Change some fields of a product; omitted fields keep their value.
    UpdateProduct(UpdateProductArgs),
    /// Delete a product and every sale recorded against it.
    DeleteProduct {
        #[arg(long, value_name = "id")]
        id: ProductId,
    },
    /// Record a sale and take it out of stock.
    Sell(SellArgs),
}

#[derive(Debug, Clone, Args)]
pub struct AddProductArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long, value_name = "units")]
    pub quantity: i64,
    #[arg(long, value_name = "units")]
    pub reorder_level: i64,
    #[arg(long, value_name = "amount")]
    pub unit_price: Money,
    #[arg(long, value_name = "amount")]
    pub cost_per_unit: Money,
}

#[derive(Debug, Clone, Args)]
pub struct UpdateProductArgs {
    #[arg(long, value_name = "id")]
    pub id: ProductId,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long, value_name = "units")]
    pub quantity: Option<i64>,
    #[arg(long, value_name = "units")]
    pub reorder_level: Option<i64>,
    #[arg(long, value_name = "amount")]
    pub unit_price: Option<Money>,
    #[arg(long, value_name = "amount")]
    pub cost_per_unit: Option<Money>,
}

impl UpdateProductArgs {
    pub fn patch(&self) -> ProductPatch {
        ProductPatch {
            name: self.name.clone(),
            quantity_in_stock: self.quantity,
            reorder_level: self.reorder_level,
            unit_price: self.unit_price,
            cost_per_unit: self.cost_per_unit,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct SellArgs {
    #[arg(long, value_name = "id")]
    pub product_id: ProductId,
    #[arg(long, value_name = "units")]
    pub quantity: i64,
    /// Sale date as YYYY-MM-DD. Defaults to today.
    #[arg(long, value_name = "date", value_parser = parse_date_arg)]
    pub date: Option<NaiveDate>,
}

fn parse_date_arg(input: &str) -> Result<NaiveDate, DomainError> {
    parse_sale_date(input)?.ok_or_else(|| DomainError::invalid_argument("sale date cannot be blank"))
}

impl Cli {
    /// Database location, with its parent directory created.
    pub fn database_path(&self) -> anyhow::Result<PathBuf> {
        let path = match &self.database {
            Some(path) => path.clone(),
            None => default_database_path()?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create database directory at {parent:?}"))?;
        }
        Ok(path)
    }
}

/// `{app_data_dir}/stockledger/inventory_management.db`.
fn default_database_path() -> anyhow::Result<PathBuf> {
    let mut dir = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .context("failed to resolve OS app data directory - tried data_dir() and home_dir()/.local/share")?;

    dir.push("stockledger");
    dir.push(DEFAULT_DATABASE_FILE);
    Ok(dir)
}
