// Finalized invoice item handed to the submission and persistence layers.
//
// An item is finalized only through `DraftInvoiceItem::finalize`, which runs
// the reference guard exactly once. Finalized items always hold either both
// halves of the regulatory reference pair or neither.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::modules::references::models::{is_blank, ReferencePair, ScheduleQuery};
use crate::modules::invoices::services::reference_guard::ReferenceGuard;
use crate::modules::taxes::models::TaxRegime;

/// One line of the invoice as submitted to the tax authority
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub name: String,
    pub hs_code: String,
    pub quantity: Decimal,
    pub unit_of_measure: String,
    pub unit_price: Decimal,

    /// Line amount before discount
    pub gross_amount: Decimal,

    /// Value excluding tax after discount; zero for retail-price items
    pub net_amount: Decimal,

    pub display_tax_rate: Decimal,
    pub rate_label: String,
    pub primary_tax_amount: Decimal,

    /// Further tax
    pub secondary_tax_amount: Decimal,

    pub total_value: Decimal,
    pub retail_price_total: Decimal,
    pub discount_amount: Decimal,
    pub sale_type: String,
    pub scenario_code: String,

    /// Regulatory schedule citation, paired with `reference_serial`
    pub schedule_reference: Option<String>,
    pub reference_serial: Option<String>,

    /// The authority expects a reference pair for this item
    pub requires_reference: bool,
}

impl InvoiceItem {
    /// Both reference fields filled or both empty
    pub fn has_consistent_reference(&self) -> bool {
        is_blank(&self.schedule_reference) == is_blank(&self.reference_serial)
    }

    /// Requires a reference pair but has none
    pub fn is_missing_reference(&self) -> bool {
        self.requires_reference && is_blank(&self.schedule_reference)
    }
}

/// An assembled item waiting for reference enrichment
#[derive(Debug, Clone, PartialEq)]
pub struct DraftInvoiceItem {
    pub item: InvoiceItem,
    pub regime: TaxRegime,
    /// Lookup to run for this item; `None` when it needs no reference
    pub reference_query: Option<ScheduleQuery>,
}

impl DraftInvoiceItem {
    pub fn requires_reference(&self) -> bool {
        self.item.requires_reference
    }

    /// Apply the enrichment result through the reference guard
    pub fn finalize(self, pair: ReferencePair) -> InvoiceItem {
        let mut item = self.item;
        let consistent = ReferenceGuard::enforce(item.requires_reference, pair);
        item.schedule_reference = consistent.schedule_reference;
        item.reference_serial = consistent.reference_serial;
        item
    }
}
