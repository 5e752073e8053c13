use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::raw_line::{ItemAttributes, RawLedgerLine};
use crate::core::{money, AppError, Result};
use crate::modules::scenarios::models::BuyerStatus;

fn default_tax_rate() -> Decimal {
    Decimal::from(18)
}

/// One sales document as fetched from the accounting-system connector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerDocument {
    pub document_number: String,

    pub document_date: NaiveDate,

    #[serde(default)]
    pub buyer_status: BuyerStatus,

    /// Document-level nominal tax rate in percent
    #[serde(default = "default_tax_rate")]
    pub tax_rate: Decimal,

    /// Sale type for items that declare none
    #[serde(default)]
    pub default_sale_type: Option<String>,

    /// Province of supply, falls back to the configured seller province
    #[serde(default)]
    pub province_code: Option<String>,

    pub lines: Vec<RawLedgerLine>,

    /// Auxiliary item data keyed by item reference
    #[serde(default)]
    pub item_attributes: HashMap<String, ItemAttributes>,
}

impl LedgerDocument {
    pub fn new(document_number: impl Into<String>, document_date: NaiveDate) -> Self {
        Self {
            document_number: document_number.into(),
            document_date,
            buyer_status: BuyerStatus::Registered,
            tax_rate: default_tax_rate(),
            default_sale_type: None,
            province_code: None,
            lines: Vec::new(),
            item_attributes: HashMap::new(),
        }
    }

    pub fn with_lines(mut self, lines: Vec<RawLedgerLine>) -> Self {
        self.lines = lines;
        self
    }

    /// Reject documents the engine cannot process at all
    pub fn validate(&self) -> Result<()> {
        if self.document_number.trim().is_empty() {
            return Err(AppError::validation("Document number cannot be empty"));
        }

        if self.tax_rate < Decimal::ZERO || self.tax_rate > Decimal::ONE_HUNDRED {
            return Err(AppError::validation(format!(
                "Document tax rate must be between 0 and 100, got: {}",
                self.tax_rate
            )));
        }

        let mut line_total = Decimal::ZERO;
        for line in &self.lines {
            line_total = line_total
                .checked_add(line.amount.abs())
                .filter(|total| *total <= money::max_amount())
                .ok_or_else(|| {
                    AppError::validation(format!(
                        "Line amounts exceed {} at line {}",
                        money::max_amount(),
                        line.sequence_index
                    ))
                })?;

            if let Some(quantity) = line.quantity {
                if quantity.abs() > money::max_quantity() {
                    return Err(AppError::validation(format!(
                        "Line {} quantity {} exceeds {}",
                        line.sequence_index,
                        quantity,
                        money::max_quantity()
                    )));
                }
            }
        }

        for (reference, attributes) in &self.item_attributes {
            if let Some(price) = attributes.retail_price {
                if price < Decimal::ZERO || price > money::max_amount() {
                    return Err(AppError::validation(format!(
                        "Retail price {} for item '{}' must be between 0 and {}",
                        price,
                        reference,
                        money::max_amount()
                    )));
                }
            }
        }

        Ok(())
    }

    pub fn attributes_for(&self, item_reference: &str) -> Option<&ItemAttributes> {
        if item_reference.is_empty() {
            return None;
        }
        self.item_attributes.get(item_reference)
    }
}
