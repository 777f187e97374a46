use serde::{Deserialize, Serialize};

use stockledger_core::{DomainError, DomainResult, Money, ProductId};

/// A stocked product.
///
/// Instances only exist for products that are persisted; the store assigns the
/// id. Fields are private so that every construction path goes through the
/// validation in [`NewProduct::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    quantity_in_stock: i64,
    reorder_level: i64,
    unit_price: Money,
    cost_per_unit: Money,
}

impl Product {
    /// Attach a store-assigned id to validated product details.
    pub fn new(id: ProductId, details: NewProduct) -> Self {
        Self {
            id,
            name: details.name,
            quantity_in_stock: details.quantity_in_stock,
            reorder_level: details.reorder_level,
            unit_price: details.unit_price,
            cost_per_unit: details.cost_per_unit,
        }
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity_in_stock(&self) -> i64 {
        self.quantity_in_stock
    }

    pub fn reorder_level(&self) -> i64 {
        self.reorder_level
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn cost_per_unit(&self) -> Money {
        self.cost_per_unit
    }

    /// Apply an operator edit. Only the fields present in `patch` change.
    ///
    /// Validation happens before anything is written, so a rejected patch
    /// leaves the product untouched.
    pub fn apply_patch(&mut self, patch: &ProductPatch) -> DomainResult<()> {
        patch.validate()?;

        if let Some(name) = &patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(quantity) = patch.quantity_in_stock {
            self.quantity_in_stock = quantity;
        }
        if let Some(level) = patch.reorder_level {
            self.reorder_level = level;
        }
        if let Some(price) = patch.unit_price {
            self.unit_price = price;
        }
        if let Some(cost) = patch.cost_per_unit {
            self.cost_per_unit = cost;
        }
        Ok(())
    }

    /// Stock level after a sale has been taken out.
    ///
    /// Callers are expected to have checked availability first (see the
    /// inventory rules); this only refuses to go below zero.
    pub fn with_stock(&self, quantity_in_stock: i64) -> DomainResult<Self> {
        ensure_non_negative("quantity in stock", quantity_in_stock)?;
        Ok(Self {
            quantity_in_stock,
            ..self.clone()
        })
    }
}

/// Validated details of a product that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    name: String,
    quantity_in_stock: i64,
    reorder_level: i64,
    unit_price: Money,
    cost_per_unit: Money,
}

impl NewProduct {
    pub fn new(
        name: impl Into<String>,
        quantity_in_stock: i64,
        reorder_level: i64,
        unit_price: Money,
        cost_per_unit: Money,
    ) -> DomainResult<Self> {
        let name = name.into();
        ensure_name(&name)?;
        ensure_non_negative("quantity in stock", quantity_in_stock)?;
        ensure_non_negative("reorder level", reorder_level)?;

        Ok(Self {
            name: name.trim().to_string(),
            quantity_in_stock,
            reorder_level,
            unit_price,
            cost_per_unit,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity_in_stock(&self) -> i64 {
        self.quantity_in_stock
    }

    pub fn reorder_level(&self) -> i64 {
        self.reorder_level
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn cost_per_unit(&self) -> Money {
        self.cost_per_unit
    }
}

/// Partial update of a product. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub quantity_in_stock: Option<i64>,
    pub reorder_level: Option<i64>,
    pub unit_price: Option<Money>,
    pub cost_per_unit: Option<Money>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.quantity_in_stock.is_none()
            && self.reorder_level.is_none()
            && self.unit_price.is_none()
            && self.cost_per_unit.is_none()
    }

    pub fn validate(&self) -> DomainResult<()> {
        if let Some(name) = &self.name {
            ensure_name(name)?;
        }
        if let Some(quantity) = self.quantity_in_stock {
            ensure_non_negative("quantity in stock", quantity)?;
        }
        if let Some(level) = self.reorder_level {
            ensure_non_negative("reorder level", level)?;
        }
        Ok(())
    }
}

fn ensure_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::invalid_argument("name cannot be empty"));
    }
    Ok(())
}

fn ensure_non_negative(field: &str, value: i64) -> DomainResult<()> {
    if value < 0 {
        return Err(DomainError::invalid_argument(format!(
            "{field} cannot be negative (got {value})"
        )));
    }
    Ok(())
}
