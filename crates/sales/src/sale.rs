use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockledger_core::{DomainError, DomainResult, ProductId, SaleId};

/// Calendar format used for sale dates, both on input and in storage.
pub const SALE_DATE_FORMAT: &str = "%Y-%m-%d";

/// A recorded sale. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    id: SaleId,
    product_id: ProductId,
    quantity_sold: i64,
    sale_date: NaiveDate,
}

impl Sale {
    /// Rebuild a stored sale, re-checking its quantity.
    pub fn new(
        id: SaleId,
        product_id: ProductId,
        quantity_sold: i64,
        sale_date: NaiveDate,
    ) -> DomainResult<Self> {
        ensure_positive(quantity_sold)?;
        Ok(Self {
            id,
            product_id,
            quantity_sold,
            sale_date,
        })
    }

    pub fn id(&self) -> SaleId {
        self.id
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn quantity_sold(&self) -> i64 {
        self.quantity_sold
    }

    pub fn sale_date(&self) -> NaiveDate {
        self.sale_date
    }
}

/// A sale that has not been recorded yet.
///
/// Stock availability is not known here; the inventory rules check it against
/// the product when the sale is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSale {
    product_id: ProductId,
    quantity_sold: i64,
    sale_date: Option<NaiveDate>,
}

impl NewSale {
    pub fn new(
        product_id: ProductId,
        quantity_sold: i64,
        sale_date: Option<NaiveDate>,
    ) -> DomainResult<Self> {
        ensure_positive(quantity_sold)?;
        Ok(Self {
            product_id,
            quantity_sold,
            sale_date,
        })
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn quantity_sold(&self) -> i64 {
        self.quantity_sold
    }

    pub fn sale_date(&self) -> Option<NaiveDate> {
        self.sale_date
    }

    /// The explicit sale date, or `today` when none was given.
    pub fn sale_date_or(&self, today: NaiveDate) -> NaiveDate {
        self.sale_date.unwrap_or(today)
    }
}

/// Parse operator input for a sale date.
///
/// Blank input means "today" and yields `None`; anything else must be a
/// `YYYY-MM-DD` calendar date.
pub fn parse_sale_date(input: &str) -> DomainResult<Option<NaiveDate>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, SALE_DATE_FORMAT)
        .map(Some)
        .map_err(|e| {
            DomainError::invalid_argument(format!(
                "sale date '{trimmed}' is not a YYYY-MM-DD date: {e}"
            ))
        })
}

fn ensure_positive(quantity_sold: i64) -> DomainResult<()> {
    if quantity_sold <= 0 {
        return Err(DomainError::invalid_argument(format!(
            "quantity sold must be positive (got {quantity_sold})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn new_sale_requires_positive_quantity() {
        assert!(NewSale::new(ProductId::new(1), 1, None).is_ok());
        assert!(matches!(
            NewSale::new(ProductId::new(1), 0, None),
            Err(DomainError::InvalidArgument(_))
        ));
        assert!(NewSale::new(ProductId::new(1), -4, None).is_err());
    }

    #[test]
    fn sale_date_defaults_to_today() {
        let today = date(2024, 3, 1);
        let undated = NewSale::new(ProductId::new(1), 2, None).unwrap();
        let dated = NewSale::new(ProductId::new(1), 2, Some(date(2023, 12, 31))).unwrap();

        assert_eq!(undated.sale_date_or(today), today);
        assert_eq!(dated.sale_date_or(today), date(2023, 12, 31));
    }

    #[test]
    fn blank_date_input_means_today() {
        assert_eq!(parse_sale_date("").unwrap(), None);
        assert_eq!(parse_sale_date("   ").unwrap(), None);
    }

    #[test]
    fn parses_iso_dates() {
        assert_eq!(
            parse_sale_date("2024-02-29").unwrap(),
            Some(date(2024, 2, 29))
        );
    }

    #[test]
    fn malformed_dates_are_invalid_arguments() {
        for input in ["2023-02-29", "15/01/2024", "yesterday", "2024-13-01"] {
            assert!(
                matches!(parse_sale_date(input), Err(DomainError::InvalidArgument(_))),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn stored_sale_keeps_its_fields() {
        let sale = Sale::new(SaleId::new(9), ProductId::new(2), 30, date(2024, 1, 15)).unwrap();
        assert_eq!(sale.id(), SaleId::new(9));
        assert_eq!(sale.product_id(), ProductId::new(2));
        assert_eq!(sale.quantity_sold(), 30);
        assert_eq!(sale.sale_date(), date(2024, 1, 15));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: any valid calendar date written as YYYY-MM-DD parses back to itself.
            #[test]
            fn formatted_dates_parse_back(days in 0i64..200_000) {
                let day = date(1900, 1, 1) + chrono::Duration::days(days);
                let text = day.format(SALE_DATE_FORMAT).to_string();
                prop_assert_eq!(parse_sale_date(&text).unwrap(), Some(day));
            }
        }
    }
}
