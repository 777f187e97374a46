//! Scripted operator sessions driven through the interactive menu.

use stockledger_cli::menu;
use stockledger_core::ProductId;
use stockledger_infra::Ledger;

async fn session(ledger: &mut Ledger, script: &str) -> String {
    let mut out = Vec::new();
    menu::run(ledger, script.as_bytes(), &mut out)
        .await
        .expect("session ran");
    String::from_utf8(out).expect("utf-8 output")
}

/// Menu answers for option 5: name, quantity, reorder level, cost, price.
fn add_product(name: &str, quantity: i64, reorder: i64, cost: &str, price: &str) -> String {
    format!("5\n{name}\n{quantity}\n{reorder}\n{cost}\n{price}\n")
}

#[tokio::test]
async fn widget_day_of_trading() {
    let mut ledger = Ledger::in_memory().await.unwrap();
    let script = [
        add_product("Widget", 20, 5, "4.00", "10.00"),
        "8\n1\n15\n2024-01-15\n".to_string(),
        "4\n9\n".to_string(),
    ]
    .concat();

    let out = session(&mut ledger, &script).await;

    assert!(out.contains("Product added successfully (Product ID 1)."));
    assert!(out.contains("Sales data added successfully."));
    assert!(out.contains("1 product(s) need to be reordered. Check option 3 for details."));
    assert!(out.contains("Total Revenue: $150.00"));
    assert!(out.contains("Total Cost of Goods Sold: $60.00"));
    assert!(out.contains("Overall Profit Margin: 60.00%"));

    let widget = ledger.product(ProductId::new(1)).await.unwrap();
    assert_eq!(widget.quantity_in_stock(), 5);
}

#[tokio::test]
async fn overselling_is_refused_before_the_date_prompt() {
    let mut ledger = Ledger::in_memory().await.unwrap();
    let script = [add_product("Gadget", 5, 1, "2", "3"), "8\n1\n10\n9\n".to_string()].concat();

    let out = session(&mut ledger, &script).await;

    assert!(out.contains("Error: Quantity in stock (5) is less than quantity sold (10)."));
    assert!(!out.contains("Enter the sale date"));
    assert!(ledger.list_sales().await.unwrap().is_empty());
    assert_eq!(
        ledger
            .product(ProductId::new(1))
            .await
            .unwrap()
            .quantity_in_stock(),
        5
    );
}

#[tokio::test]
async fn unknown_product_id_is_asked_again() {
    let mut ledger = Ledger::in_memory().await.unwrap();
    let script = [
        add_product("Bolt", 100, 10, "0.10", "0.25"),
        "8\n42\n1\nabc\n0\n3\n01/02/2024\n\n9\n".to_string(),
    ]
    .concat();

    let out = session(&mut ledger, &script).await;

    assert!(out.contains(
        "Product with Product ID 42 does not exist. Please enter a valid Product ID."
    ));
    assert_eq!(
        out.matches("Invalid input. Please enter a valid integer for the quantity sold.")
            .count(),
        2
    );
    assert!(out.contains("Invalid date format. Please use YYYY-MM-DD."));

    let sales = ledger.list_sales().await.unwrap();
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0].quantity_sold(), 3);
    assert_eq!(sales[0].sale_date(), chrono::Local::now().date_naive());
}

#[tokio::test]
async fn update_with_blank_answers_keeps_other_fields() {
    let mut ledger = Ledger::in_memory().await.unwrap();
    let script = [
        add_product("Widget", 20, 5, "4", "10"),
        "6\n1\n\n\n8\n\n12.50\n9\n".to_string(),
    ]
    .concat();

    let out = session(&mut ledger, &script).await;

    assert!(out.contains("Product updated successfully."));
    let widget = ledger.product(ProductId::new(1)).await.unwrap();
    assert_eq!(widget.name(), "Widget");
    assert_eq!(widget.quantity_in_stock(), 20);
    assert_eq!(widget.reorder_level(), 8);
    assert_eq!(widget.unit_price().to_string(), "10");
    assert_eq!(widget.cost_per_unit().to_string(), "12.5");
}

#[tokio::test]
async fn deleting_a_product_takes_its_sales_with_it() {
    let mut ledger = Ledger::in_memory().await.unwrap();
    let script = [
        add_product("Widget", 20, 5, "4", "10"),
        "8\n1\n2\n2024-03-01\n".to_string(),
        "7\n1\n7\n1\n9\n".to_string(),
    ]
    .concat();

    let out = session(&mut ledger, &script).await;

    assert!(out.contains("Product and associated sales data deleted successfully (1 sale(s) removed)."));
    assert!(out.contains("Product with Product ID 1 does not exist."));
    assert!(ledger.list_products().await.unwrap().is_empty());
    assert!(ledger.list_sales().await.unwrap().is_empty());
}

#[tokio::test]
async fn empty_ledger_views_and_bad_choices() {
    let mut ledger = Ledger::in_memory().await.unwrap();

    let out = session(&mut ledger, "1\n2\n3\n4\n0\nten\n9\n").await;

    assert!(out.contains("No products in the inventory."));
    assert!(out.contains("No sales data available."));
    assert!(out.contains("No products need to be reordered."));
    assert!(out.contains("No sales data available for generating reports."));
    assert_eq!(
        out.matches("Invalid choice. Please enter a number from 1 to 9.")
            .count(),
        2
    );
    assert!(!out.contains("need to be reordered. Check option 3"));
}

#[tokio::test]
async fn report_with_products_but_no_sales() {
    let mut ledger = Ledger::in_memory().await.unwrap();
    let script = [add_product("Widget", 20, 5, "4", "10"), "4\n9\n".to_string()].concat();

    let out = session(&mut ledger, &script).await;

    assert!(out.contains("No sales recorded yet."));
    assert!(out.contains("Total Revenue: $0.00"));
    assert!(out.contains("Overall Profit Margin: 0.00%"));
}

#[tokio::test]
async fn end_of_input_ends_the_session_quietly() {
    let mut ledger = Ledger::in_memory().await.unwrap();

    // Input runs out in the middle of adding a product.
    let out = session(&mut ledger, "1\n5\nHalf\n3\n").await;

    assert!(out.contains("No products in the inventory."));
    assert!(ledger.list_products().await.unwrap().is_empty());
}

#[tokio::test]
async fn menu_keeps_the_familiar_option_numbers() {
    let mut ledger = Ledger::in_memory().await.unwrap();

    let out = session(&mut ledger, "9\n").await;

    let expected = "\
1. View Stock Levels
2. View Sales Data
3. Generate Reorder Alerts
4. Generate Reports
5. Add Product
6. Update Product
7. Delete Product
8. Add Sales
9. Exit";
    assert!(out.contains(expected));
}

#[tokio::test]
async fn option_four_is_reports_and_option_eight_is_sales() {
    let mut ledger = Ledger::in_memory().await.unwrap();
    let script = [
        add_product("Widget", 20, 5, "4", "10"),
        "8\n1\n2\n2024-01-15\n4\n9\n".to_string(),
    ]
    .concat();

    let out = session(&mut ledger, &script).await;

    assert!(out.contains("Enter the Product ID for the product sold: "));
    assert!(out.contains("Total Revenue: $20.00"));
    assert_eq!(ledger.list_sales().await.unwrap().len(), 1);
}

#[tokio::test]
async fn report_too_large_to_total_is_reported_and_the_menu_carries_on() {
    let mut ledger = Ledger::in_memory().await.unwrap();
    let script = [
        add_product("Bullion", 5, 0, "1", "50000000000000000000000000000"),
        "8\n1\n2\n2024-01-15\n4\n1\n9\n".to_string(),
    ]
    .concat();

    let out = session(&mut ledger, &script).await;

    assert!(out.contains("Error: invalid argument:"));
    assert!(!out.contains("Total Revenue:"));
    assert!(out.contains("Stock Levels:"));
}
