use serde::{Deserialize, Serialize};

use stockledger_core::ProductId;

/// One row of the sales report: every product, with its total units sold.
///
/// Products without sales are listed with a total of zero rather than left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesReportLine {
    pub product_id: ProductId,
    pub product_name: String,
    pub total_quantity_sold: i64,
}

impl SalesReportLine {
    pub fn has_sales(&self) -> bool {
        self.total_quantity_sold > 0
    }
}
