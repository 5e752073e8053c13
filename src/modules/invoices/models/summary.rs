use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::invoice_item::InvoiceItem;

/// Document-level totals over finalized items
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceSummary {
    pub item_count: usize,
    pub gross_amount: Decimal,
    pub discount_amount: Decimal,
    /// Value excluding tax
    pub net_amount: Decimal,
    pub sales_tax: Decimal,
    pub further_tax: Decimal,
    pub retail_price_total: Decimal,
    pub total_value: Decimal,
    /// Items that need a reference pair but ended up without one
    pub missing_references: usize,
}

impl InvoiceSummary {
    pub fn from_items(items: &[InvoiceItem]) -> Self {
        items.iter().fold(Self::default(), |mut summary, item| {
            summary.item_count += 1;
            summary.gross_amount += item.gross_amount;
            summary.discount_amount += item.discount_amount;
            summary.net_amount += item.net_amount;
            summary.sales_tax += item.primary_tax_amount;
            summary.further_tax += item.secondary_tax_amount;
            summary.retail_price_total += item.retail_price_total;
            summary.total_value += item.total_value;
            if item.is_missing_reference() {
                summary.missing_references += 1;
            }
            summary
        })
    }

    /// Every item that needs a reference pair has one
    pub fn is_complete(&self) -> bool {
        self.missing_references == 0
    }
}
