// A raw ledger line as supplied by the accounting-system connector.
//
// Lines carry no explicit kind tag. Whether a line is an item, a discount or a
// computed subtotal is inferred later by the line classifier.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Custom field keys the engine understands (matched case-insensitively)
pub mod fields {
    pub const HS_CODE: &str = "hs_code";
    pub const SALE_TYPE: &str = "sale_type";
    pub const RETAIL_PRICE: &str = "retail_price";
    pub const TAX_RATE: &str = "tax_rate";
}

/// One line of a source sales document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLedgerLine {
    /// Stable position of the line within its document
    pub sequence_index: u32,

    /// Opaque item id, empty for computed rows
    #[serde(default)]
    pub item_reference: String,

    #[serde(default)]
    pub description: String,

    /// Type code declared by the connector, empty when unknown
    #[serde(default)]
    pub line_type: String,

    #[serde(default)]
    pub quantity: Option<Decimal>,

    #[serde(default)]
    pub unit_of_measure: String,

    /// Signed line amount; negative amounts are discounts
    pub amount: Decimal,

    #[serde(default)]
    pub custom_fields: HashMap<String, String>,
}

impl RawLedgerLine {
    /// Quantity is present and non-zero
    pub fn has_meaningful_quantity(&self) -> bool {
        self.quantity.is_some_and(|q| !q.is_zero())
    }

    pub fn has_item_reference(&self) -> bool {
        !self.item_reference.trim().is_empty()
    }

    pub fn has_line_type(&self) -> bool {
        !self.line_type.trim().is_empty()
    }

    /// Non-empty custom field value, key matched case-insensitively
    pub fn custom_field(&self, key: &str) -> Option<&str> {
        self.custom_fields
            .iter()
            .find(|(k, _)| k.trim().eq_ignore_ascii_case(key))
            .map(|(_, v)| v.trim())
            .filter(|v| !v.is_empty())
    }
}

/// Per-item auxiliary data resolved by the connector, keyed by item reference
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemAttributes {
    #[serde(default)]
    pub hs_code: Option<String>,

    #[serde(default)]
    pub sale_type: Option<String>,

    #[serde(default)]
    pub retail_price: Option<Decimal>,
}
