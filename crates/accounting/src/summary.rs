use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockledger_core::{DomainError, DomainResult, Money};

/// A recorded sale joined with the pricing of its product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaleLine {
    pub quantity_sold: i64,
    pub unit_price: Money,
    pub cost_per_unit: Money,
}

impl SaleLine {
    pub fn revenue(&self) -> DomainResult<Decimal> {
        self.unit_price.times(self.quantity_sold)
    }

    /// Cost of goods sold for this line.
    pub fn cogs(&self) -> DomainResult<Decimal> {
        self.cost_per_unit.times(self.quantity_sold)
    }
}

/// Revenue / COGS / margin totals over every recorded sale.
///
/// Amounts are exact; rounding to cents is a display concern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub total_revenue: Decimal,
    pub total_cogs: Decimal,
    /// `100 * (revenue - cogs) / revenue`, or zero when there is no revenue.
    pub profit_margin_percent: Decimal,
}

impl FinancialSummary {
    /// Totals over `lines`.
    ///
    /// Any amount that does not fit in a `Decimal` (an extended line, a running
    /// total, or the margin itself) is reported as `InvalidArgument`.
    pub fn from_lines<'a, I>(lines: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = &'a SaleLine>,
    {
        let mut total_revenue = Decimal::ZERO;
        let mut total_cogs = Decimal::ZERO;
        for line in lines {
            total_revenue = checked(total_revenue.checked_add(line.revenue()?), "total revenue")?;
            total_cogs = checked(total_cogs.checked_add(line.cogs()?), "total cost of goods sold")?;
        }

        let profit_margin_percent = if total_revenue.is_zero() {
            Decimal::ZERO
        } else {
            let margin = total_revenue
                .checked_sub(total_cogs)
                .and_then(|profit| profit.checked_div(total_revenue))
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED));
            checked(margin, "profit margin")?
        };

        Ok(Self {
            total_revenue,
            total_cogs,
            profit_margin_percent,
        })
    }

    pub fn gross_profit(&self) -> Decimal {
        self.total_revenue - self.total_cogs
    }
}

fn checked(value: Option<Decimal>, what: &str) -> DomainResult<Decimal> {
    value.ok_or_else(|| DomainError::invalid_argument(format!("{what} is out of range")))
}
