use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::core::money;
use crate::modules::invoices::models::{DraftInvoiceItem, InvoiceItem};
use crate::modules::ledger::models::{fields, LedgerDocument, LineContext, RawLedgerLine};
use crate::modules::references::models::ScheduleQuery;
use crate::modules::taxes::models::{TaxInput, TaxRegime};
use crate::modules::taxes::services::{TaxCalculator, TaxResolver};

/// Attributes of an item line after applying connector precedence:
/// inline custom fields, then the keyed attribute map, then document defaults
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAttributes {
    pub hs_code: String,
    pub sale_type: String,
    pub retail_price: Option<Decimal>,
    pub tax_rate: Decimal,
}

/// Turns allocated item contexts into draft invoice items
pub struct ItemAssembler<'a> {
    resolver: &'a TaxResolver,
    calculator: &'a TaxCalculator,
    province_code: String,
}

impl<'a> ItemAssembler<'a> {
    pub fn new(resolver: &'a TaxResolver, calculator: &'a TaxCalculator, province_code: String) -> Self {
        Self {
            resolver,
            calculator,
            province_code,
        }
    }

    /// Resolve HS code, sale type, retail price and rate for one line
    pub fn resolve_attributes(&self, document: &LedgerDocument, line: &RawLedgerLine) -> ResolvedAttributes {
        let keyed = document.attributes_for(&line.item_reference);

        let hs_code = line
            .custom_field(fields::HS_CODE)
            .map(str::to_string)
            .or_else(|| keyed.and_then(|a| a.hs_code.clone()))
            .map(|code| code.trim().to_string())
            .unwrap_or_default();

        let sale_type = line
            .custom_field(fields::SALE_TYPE)
            .map(str::to_string)
            .or_else(|| keyed.and_then(|a| a.sale_type.clone()))
            .or_else(|| document.default_sale_type.clone())
            .unwrap_or_default();

        let retail_price = match line.custom_field(fields::RETAIL_PRICE) {
            Some(raw) => match money::parse_amount(raw) {
                Some(price) if price >= Decimal::ZERO && price <= money::max_amount() => Some(price),
                _ => {
                    warn!(
                        "Line {} has invalid retail price '{}'; ignored",
                        line.sequence_index, raw
                    );
                    None
                }
            },
            None => keyed.and_then(|a| a.retail_price),
        };

        let tax_rate = line
            .custom_field(fields::TAX_RATE)
            .and_then(|raw| {
                let rate = money::parse_amount(raw.trim_end_matches('%'));
                match rate {
                    Some(rate) if self.calculator.validate_tax_rate(rate).is_ok() => Some(rate),
                    _ => {
                        warn!(
                            "Line {} has invalid tax rate '{}'; using document rate {}",
                            line.sequence_index, raw, document.tax_rate
                        );
                        None
                    }
                }
            })
            .unwrap_or(document.tax_rate);

        ResolvedAttributes {
            hs_code,
            sale_type,
            retail_price,
            tax_rate,
        }
    }

    /// Build the draft for one item context.
    /// Returns `None` for item lines without any value to invoice.
    pub fn assemble(&self, document: &LedgerDocument, context: &LineContext) -> Option<DraftInvoiceItem> {
        let line = document.lines.get(context.index)?;

        if line.amount.is_zero() {
            debug!("Skipping zero-value item line {}", line.sequence_index);
            return None;
        }

        let attributes = self.resolve_attributes(document, line);
        if attributes.hs_code.is_empty() {
            warn!(
                "Item line {} ('{}') has no HS code",
                line.sequence_index, line.description
            );
        }

        // A billed line without a quantity is one unit
        let quantity = line
            .quantity
            .filter(|q| !q.is_zero())
            .map(|q| q.abs())
            .unwrap_or(Decimal::ONE);

        let gross_amount = line.amount;
        let resolution = self.resolver.resolve(
            &attributes.sale_type,
            document.buyer_status,
            attributes.tax_rate,
        );
        let regime = TaxRegime::select(&resolution, attributes.tax_rate);

        let computation = self.calculator.calculate(
            &regime,
            &TaxInput {
                gross_amount,
                attributed_discount: context.attributed_discount,
                quantity,
                declared_rate: attributes.tax_rate,
                retail_price: attributes.retail_price,
            },
        );

        let reference_query = resolution.requires_reference.then(|| ScheduleQuery {
            scenario_code: resolution.scenario_code.clone(),
            tax_rate: attributes.tax_rate,
            province_code: self.province_code.clone(),
            document_date: document.document_date,
        });

        let name = if line.description.trim().is_empty() {
            line.item_reference.clone()
        } else {
            line.description.trim().to_string()
        };

        let item = InvoiceItem {
            name,
            hs_code: attributes.hs_code,
            quantity,
            unit_of_measure: line.unit_of_measure.clone(),
            unit_price: money::round(gross_amount / quantity),
            gross_amount,
            net_amount: computation.net_amount,
            display_tax_rate: computation.display_tax_rate,
            rate_label: computation.rate_label,
            primary_tax_amount: computation.primary_tax,
            secondary_tax_amount: computation.secondary_tax,
            total_value: computation.total_value,
            retail_price_total: computation.retail_price_total,
            discount_amount: context.attributed_discount,
            sale_type: resolution.sale_type,
            scenario_code: resolution.scenario_code,
            schedule_reference: None,
            reference_serial: None,
            requires_reference: resolution.requires_reference,
        };

        Some(DraftInvoiceItem {
            item,
            regime,
            reference_query,
        })
    }
}
