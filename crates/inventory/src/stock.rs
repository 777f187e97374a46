use stockledger_core::{DomainError, DomainResult};
use stockledger_products::Product;

/// Take `quantity` units out of `product` for a sale.
///
/// Returns the stock level that remains. Fails with `InvalidArgument` for a
/// non-positive quantity and with `InsufficientStock` when the product holds
/// fewer units than requested. Selling the last unit is allowed.
pub fn withdraw(product: &Product, quantity: i64) -> DomainResult<i64> {
    if quantity <= 0 {
        return Err(DomainError::invalid_argument(format!(
            "quantity sold must be positive (got {quantity})"
        )));
    }

    let available = product.quantity_in_stock();
    if quantity > available {
        return Err(DomainError::insufficient_stock(
            product.id(),
            quantity,
            available,
        ));
    }

    Ok(available - quantity)
}

/// A product needs restocking once its stock is at or below its reorder level.
pub fn needs_reorder(product: &Product) -> bool {
    product.quantity_in_stock() <= product.reorder_level()
}

/// Keep only the products that need restocking, preserving their order.
pub fn reorder_alerts<I>(products: I) -> Vec<Product>
where
    I: IntoIterator<Item = Product>,
{
    products.into_iter().filter(needs_reorder).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockledger_core::{Money, ProductId};
    use stockledger_products::NewProduct;

    fn product(id: i64, stock: i64, reorder_level: i64) -> Product {
        let details =
            NewProduct::new(format!("P{id}"), stock, reorder_level, Money::ZERO, Money::ZERO)
                .unwrap();
        Product::new(ProductId::new(id), details)
    }

    #[test]
    fn withdraw_returns_remaining_stock() {
        assert_eq!(withdraw(&product(1, 100, 10), 30).unwrap(), 70);
    }

    #[test]
    fn withdraw_can_empty_the_shelf() {
        assert_eq!(withdraw(&product(1, 5, 0), 5).unwrap(), 0);
    }

    #[test]
    fn withdraw_more_than_stock_is_insufficient() {
        let err = withdraw(&product(4, 5, 0), 10).unwrap_err();
        assert_eq!(
            err,
            DomainError::insufficient_stock(ProductId::new(4), 10, 5)
        );
    }

    #[test]
    fn withdraw_rejects_non_positive_quantities() {
        let p = product(1, 5, 0);
        assert!(matches!(withdraw(&p, 0), Err(DomainError::InvalidArgument(_))));
        assert!(matches!(withdraw(&p, -2), Err(DomainError::InvalidArgument(_))));
    }

    #[test]
    fn reorder_level_boundary_is_inclusive() {
        assert!(needs_reorder(&product(1, 10, 10)));
        assert!(needs_reorder(&product(1, 9, 10)));
        assert!(!needs_reorder(&product(1, 11, 10)));
    }

    #[test]
    fn reorder_alerts_keep_input_order() {
        let alerts = reorder_alerts(vec![
            product(1, 3, 5),
            product(2, 50, 5),
            product(3, 5, 5),
        ]);
        let ids: Vec<i64> = alerts.iter().map(|p| p.id().get()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: withdrawal either succeeds with a non-negative remainder that
            /// accounts for every unit, or fails without a remainder.
            #[test]
            fn withdraw_never_goes_negative(stock in 0i64..1_000, quantity in -10i64..1_100) {
                let p = product(1, stock, 0);
                match withdraw(&p, quantity) {
                    Ok(remaining) => {
                        prop_assert!(remaining >= 0);
                        prop_assert_eq!(remaining + quantity, stock);
                    }
                    Err(DomainError::InsufficientStock { requested, available, .. }) => {
                        prop_assert!(requested > available);
                    }
                    Err(_) => prop_assert!(quantity <= 0),
                }
            }

            /// Property: the alert set is exactly the products at or below their threshold.
            #[test]
            fn alerts_match_threshold_rule(
                levels in proptest::collection::vec((0i64..50, 0i64..50), 0..30)
            ) {
                let products: Vec<Product> = levels
                    .iter()
                    .enumerate()
                    .map(|(i, (stock, level))| product(i as i64 + 1, *stock, *level))
                    .collect();

                let alerts = reorder_alerts(products.clone());

                let expected: Vec<Product> = products
                    .into_iter()
                    .filter(|p| p.quantity_in_stock() <= p.reorder_level())
                    .collect();
                prop_assert_eq!(alerts, expected);
            }
        }
    }
}
