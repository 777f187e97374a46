//! Table bootstrap. Tables are created on first run and left alone afterwards.

use sqlx::SqlitePool;

use crate::error::LedgerResult;

/// Create the `Product` and `Sales` tables (and the lookup index) if absent.
///
/// Prices are stored as decimal text so they round-trip exactly.
pub(crate) async fn ensure(pool: &SqlitePool) -> LedgerResult<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS Product (
            ProductID       INTEGER PRIMARY KEY,
            ProductName     TEXT    NOT NULL,
            QuantityInStock INTEGER NOT NULL CHECK (QuantityInStock >= 0),
            ReorderLevel    INTEGER NOT NULL CHECK (ReorderLevel >= 0),
            UnitPrice       TEXT    NOT NULL,
            CostPerUnit     TEXT    NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS Sales (
            SaleID       INTEGER PRIMARY KEY,
            ProductID    INTEGER NOT NULL REFERENCES Product(ProductID),
            QuantitySold INTEGER NOT NULL CHECK (QuantitySold > 0),
            SaleDate     TEXT    NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_sales_product ON Sales (ProductID)")
        .execute(pool)
        .await?;

    tracing::debug!("inventory schema ready");
    Ok(())
}
