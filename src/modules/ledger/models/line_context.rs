use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Inferred kind of a ledger line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineLabel {
    Item,
    Discount,
    Subtotal,
}

impl LineLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Item => "item",
            Self::Discount => "discount",
            Self::Subtotal => "subtotal",
        }
    }
}

impl std::fmt::Display for LineLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Working state for one retained ledger line during a single
/// classification and allocation pass
#[derive(Debug, Clone, PartialEq)]
pub struct LineContext {
    /// Position of the source line in the document's line list
    pub index: usize,
    pub sequence_index: u32,
    pub amount: Decimal,
    pub item_reference: String,
    pub label: LineLabel,
    /// Discount attributed to this line, accumulated across discount lines
    pub attributed_discount: Decimal,
}

impl LineContext {
    pub fn new(
        index: usize,
        sequence_index: u32,
        amount: Decimal,
        item_reference: impl Into<String>,
        label: LineLabel,
    ) -> Self {
        Self {
            index,
            sequence_index,
            amount,
            item_reference: item_reference.into(),
            label,
            attributed_discount: Decimal::ZERO,
        }
    }

    pub fn is_item(&self) -> bool {
        self.label == LineLabel::Item
    }

    pub fn is_discount(&self) -> bool {
        self.label == LineLabel::Discount
    }

    pub fn is_subtotal(&self) -> bool {
        self.label == LineLabel::Subtotal
    }
}
