//! The inventory ledger: products, sales and the rules tying them together.
//!
//! ## Ownership
//!
//! A `Ledger` is built once at process start and owns the only connection to
//! its SQLite file. Presentation code receives it explicitly; there is no
//! ambient/global handle. Mutations take `&mut self`, reads take `&self`.
//!
//! ## Atomicity
//!
//! `record_sale` (stock decrement + sale insert) and `delete_product` (sales
//! delete + product delete) each run inside one transaction. Any early return
//! drops the transaction, which rolls it back, so a failed call leaves both
//! tables exactly as they were.

use core::str::FromStr;
use std::path::Path;

use chrono::Local;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteExecutor, SqlitePoolOptions};
use tracing::{debug, info, warn};

use stockledger_accounting::{FinancialSummary, SaleLine};
use stockledger_core::{DomainError, ProductId, SaleId};
use stockledger_products::{NewProduct, Product, ProductPatch};
use stockledger_sales::{NewSale, Sale, SalesReportLine};

use crate::error::LedgerResult;
use crate::rows::{
    PRODUCT_COLUMNS, SALE_COLUMNS, money_to_column, row_to_product, row_to_report_line,
    row_to_sale, row_to_sale_line,
};
use crate::schema;

#[derive(Debug)]
pub struct Ledger {
    pool: SqlitePool,
}

impl Ledger {
    /// Open (or create) the ledger database at `path` and make sure the tables exist.
    pub async fn open(path: impl AsRef<Path>) -> LedgerResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true)
            .foreign_keys(true);
        info!(path = %path.as_ref().display(), "opening inventory ledger");
        Self::connect_with(options).await
    }

    /// Private in-memory ledger; contents vanish when it is dropped.
    pub async fn in_memory() -> LedgerResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        Self::connect_with(options).await
    }

    async fn connect_with(options: SqliteConnectOptions) -> LedgerResult<Self> {
        // Exactly one long-lived connection: the ledger is its only user, and an
        // in-memory database lives and dies with its connection.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        schema::ensure(&pool).await?;
        Ok(Self { pool })
    }

    /// Flush and close the underlying connection.
    pub async fn close(self) {
        self.pool.close().await;
    }

    #[cfg(test)]
    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // ---------------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------------

    #[tracing::instrument(skip(self, product), fields(name = product.name()))]
    pub async fn add_product(&mut self, product: NewProduct) -> LedgerResult<ProductId> {
        let result = sqlx::query(
            r#"
            INSERT INTO Product (ProductName, QuantityInStock, ReorderLevel, UnitPrice, CostPerUnit)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(product.name())
        .bind(product.quantity_in_stock())
        .bind(product.reorder_level())
        .bind(money_to_column(product.unit_price()))
        .bind(money_to_column(product.cost_per_unit()))
        .execute(&self.pool)
        .await?;

        let id = ProductId::new(result.last_insert_rowid());
        info!(product_id = %id, "product added");
        Ok(id)
    }

    /// Change the supplied fields of a product and return the stored result.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_product(
        &mut self,
        id: ProductId,
        patch: ProductPatch,
    ) -> LedgerResult<Product> {
        let mut tx = self.pool.begin().await?;

        let mut product = fetch_product(&mut *tx, id)
            .await?
            .ok_or_else(|| DomainError::not_found("product", id))?;

        if patch.is_empty() {
            debug!(product_id = %id, "empty patch; nothing to update");
            return Ok(product);
        }

        product.apply_patch(&patch)?;

        sqlx::query(
            r#"
            UPDATE Product
            SET ProductName = ?2,
                QuantityInStock = ?3,
                ReorderLevel = ?4,
                UnitPrice = ?5,
                CostPerUnit = ?6
            WHERE ProductID = ?1
            "#,
        )
        .bind(id.get())
        .bind(product.name())
        .bind(product.quantity_in_stock())
        .bind(product.reorder_level())
        .bind(money_to_column(product.unit_price()))
        .bind(money_to_column(product.cost_per_unit()))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        info!(product_id = %id, "product updated");
        Ok(product)
    }

    /// Delete a product together with every sale recorded against it.
    ///
    /// Sales history for the product is destroyed, not archived. Returns the
    /// number of sales removed.
    #[tracing::instrument(skip(self))]
    pub async fn delete_product(&mut self, id: ProductId) -> LedgerResult<u64> {
        let mut tx = self.pool.begin().await?;

        if fetch_product(&mut *tx, id).await?.is_none() {
            return Err(DomainError::not_found("product", id).into());
        }

        // Sales first: they reference the product.
        let sales_removed = sqlx::query("DELETE FROM Sales WHERE ProductID = ?1")
            .bind(id.get())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM Product WHERE ProductID = ?1")
            .bind(id.get())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        info!(product_id = %id, sales_removed, "product deleted");
        Ok(sales_removed)
    }

    /// Record a sale and take its quantity out of stock, as one unit of work.
    ///
    /// Undated sales are dated today (local time).
    #[tracing::instrument(
        skip(self, sale),
        fields(product_id = %sale.product_id(), quantity_sold = sale.quantity_sold())
    )]
    pub async fn record_sale(&mut self, sale: NewSale) -> LedgerResult<SaleId> {
        let sale_date = sale.sale_date_or(Local::now().date_naive());
        let mut tx = self.pool.begin().await?;

        let product = fetch_product(&mut *tx, sale.product_id())
            .await?
            .ok_or_else(|| DomainError::not_found("product", sale.product_id()))?;

        let remaining = match stockledger_inventory::withdraw(&product, sale.quantity_sold()) {
            Ok(remaining) => remaining,
            Err(err) => {
                warn!(available = product.quantity_in_stock(), "sale rejected: {err}");
                return Err(err.into());
            }
        };
        let product = product.with_stock(remaining)?;

        sqlx::query("UPDATE Product SET QuantityInStock = ?2 WHERE ProductID = ?1")
            .bind(product.id().get())
            .bind(product.quantity_in_stock())
            .execute(&mut *tx)
            .await?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO Sales (ProductID, QuantitySold, SaleDate)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(product.id().get())
        .bind(sale.quantity_sold())
        .bind(sale_date)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        let sale_id = SaleId::new(inserted.last_insert_rowid());
        info!(sale_id = %sale_id, remaining, "sale recorded");
        Ok(sale_id)
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    pub async fn product(&self, id: ProductId) -> LedgerResult<Product> {
        Ok(fetch_product(&self.pool, id)
            .await?
            .ok_or_else(|| DomainError::not_found("product", id))?)
    }

    /// All products, in the order they were added.
    pub async fn list_products(&self) -> LedgerResult<Vec<Product>> {
        let rows = sqlx::query(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM Product ORDER BY ProductID"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "listed products");
        rows.iter().map(row_to_product).collect()
    }

    /// All sales, in the order they were recorded.
    pub async fn list_sales(&self) -> LedgerResult<Vec<Sale>> {
        let rows = sqlx::query(&format!(
            "SELECT {SALE_COLUMNS} FROM Sales ORDER BY SaleID"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "listed sales");
        rows.iter().map(row_to_sale).collect()
    }

    /// Products at or below their reorder level.
    pub async fn reorder_alerts(&self) -> LedgerResult<Vec<Product>> {
        let products = self.list_products().await?;
        Ok(stockledger_inventory::reorder_alerts(products))
    }

    pub async fn reorder_alert_count(&self) -> LedgerResult<usize> {
        Ok(self.reorder_alerts().await?.len())
    }

    /// Units sold per product. Every product appears, with 0 when it has no sales.
    pub async fn sales_report(&self) -> LedgerResult<Vec<SalesReportLine>> {
        let rows = sqlx::query(
            r#"
            SELECT p.ProductID,
                   p.ProductName,
                   COALESCE(SUM(s.QuantitySold), 0) AS TotalSold
            FROM Product p
            LEFT JOIN Sales s ON s.ProductID = p.ProductID
            GROUP BY p.ProductID, p.ProductName
            ORDER BY p.ProductID
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_report_line).collect()
    }

    /// Revenue, cost of goods sold and margin over every recorded sale, priced
    /// with each product's current unit price and cost.
    ///
    /// Totals too large for a `Decimal` fail with `InvalidArgument`.
    pub async fn financial_summary(&self) -> LedgerResult<FinancialSummary> {
        let rows = sqlx::query(
            r#"
            SELECT s.QuantitySold, p.UnitPrice, p.CostPerUnit
            FROM Sales s
            INNER JOIN Product p ON p.ProductID = s.ProductID
            ORDER BY s.SaleID
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let lines = rows
            .iter()
            .map(row_to_sale_line)
            .collect::<LedgerResult<Vec<SaleLine>>>()?;
        Ok(FinancialSummary::from_lines(&lines)?)
    }
}

async fn fetch_product<'e, E>(executor: E, id: ProductId) -> LedgerResult<Option<Product>>
where
    E: SqliteExecutor<'e>,
{
    let row = sqlx::query(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM Product WHERE ProductID = ?1"
    ))
    .bind(id.get())
    .fetch_optional(executor)
    .await?;

    row.as_ref().map(row_to_product).transpose()
}
