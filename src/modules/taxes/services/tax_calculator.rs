use rust_decimal::Decimal;
use tracing::warn;

use crate::core::error::AppError;
use crate::core::money;
use crate::modules::taxes::models::{TaxComputation, TaxInput, TaxRegime, STANDARD_RATE};

/// TaxCalculator computes the per-item tax fields of a submission.
///
/// Each regime has its own formula. All of them are pure functions of the
/// item's inputs; amounts are rounded to the currency scale, half away from
/// zero.
pub struct TaxCalculator;

impl TaxCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Compute the tax fields for one item under `regime`
    pub fn calculate(&self, regime: &TaxRegime, input: &TaxInput) -> TaxComputation {
        let net_amount = Self::net_amount(input.gross_amount, input.attributed_discount);

        match regime {
            TaxRegime::Exempt => Self::exempt(net_amount),
            TaxRegime::ZeroRated => Self::zero_rated(net_amount),
            TaxRegime::FixedPerUnit { rate_per_unit, unit } => {
                Self::fixed_per_unit(net_amount, *rate_per_unit, unit, input.quantity)
            }
            TaxRegime::HybridPerUnit { rate_per_unit, unit } => {
                Self::hybrid_per_unit(net_amount, *rate_per_unit, unit, input.quantity)
            }
            TaxRegime::RetailPrice => {
                Self::retail_price(input.retail_price, input.quantity, input.declared_rate)
            }
            TaxRegime::SplitRate => Self::split_rate(net_amount, input.declared_rate),
            TaxRegime::Standard => Self::standard(net_amount, input.declared_rate),
        }
    }

    /// Amount after discount, floored at zero.
    /// A negative intermediate is a data-quality problem upstream.
    pub fn net_amount(gross_amount: Decimal, attributed_discount: Decimal) -> Decimal {
        let net = gross_amount - attributed_discount;
        if net < Decimal::ZERO {
            warn!(
                "Discount {} exceeds gross amount {}; net amount floored at zero",
                attributed_discount, gross_amount
            );
            return Decimal::ZERO;
        }
        money::round(net)
    }

    fn exempt(net_amount: Decimal) -> TaxComputation {
        TaxComputation {
            net_amount,
            display_tax_rate: Decimal::ZERO,
            rate_label: "Exempt".to_string(),
            primary_tax: Decimal::ZERO,
            secondary_tax: Decimal::ZERO,
            retail_price_total: Decimal::ZERO,
            total_value: net_amount,
        }
    }

    fn zero_rated(net_amount: Decimal) -> TaxComputation {
        TaxComputation {
            rate_label: "0%".to_string(),
            ..Self::exempt(net_amount)
        }
    }

    fn fixed_per_unit(
        net_amount: Decimal,
        rate_per_unit: Decimal,
        unit: &str,
        quantity: Decimal,
    ) -> TaxComputation {
        let fixed_component = money::round(rate_per_unit * quantity);

        TaxComputation {
            net_amount,
            display_tax_rate: Decimal::ZERO,
            rate_label: format!("Rs.{}/{}", rate_per_unit.normalize(), unit),
            primary_tax: fixed_component,
            secondary_tax: Decimal::ZERO,
            retail_price_total: fixed_component,
            total_value: net_amount + fixed_component,
        }
    }

    fn hybrid_per_unit(
        net_amount: Decimal,
        rate_per_unit: Decimal,
        unit: &str,
        quantity: Decimal,
    ) -> TaxComputation {
        let fixed_component = money::round(rate_per_unit * quantity);
        let primary_tax = money::percent_of(net_amount, STANDARD_RATE) + fixed_component;

        TaxComputation {
            net_amount,
            display_tax_rate: STANDARD_RATE,
            rate_label: format!(
                "{} along with rupees {} per {}",
                money::format_rate(STANDARD_RATE),
                rate_per_unit.normalize(),
                unit
            ),
            primary_tax,
            secondary_tax: Decimal::ZERO,
            retail_price_total: fixed_component,
            total_value: net_amount + primary_tax,
        }
    }

    /// Tax base is the notified retail price, not the transaction value, so
    /// the net amount is reported as zero.
    fn retail_price(
        retail_price: Option<Decimal>,
        quantity: Decimal,
        declared_rate: Decimal,
    ) -> TaxComputation {
        let unit_price = retail_price.unwrap_or_else(|| {
            warn!("Retail-price item has no retail price; tax base is zero");
            Decimal::ZERO
        });
        let retail_price_total = money::round(unit_price * quantity);
        let primary_tax = money::percent_of(retail_price_total, declared_rate);

        TaxComputation {
            net_amount: Decimal::ZERO,
            display_tax_rate: declared_rate,
            rate_label: money::format_rate(declared_rate),
            primary_tax,
            secondary_tax: Decimal::ZERO,
            retail_price_total,
            total_value: retail_price_total + primary_tax,
        }
    }

    fn split_rate(net_amount: Decimal, declared_rate: Decimal) -> TaxComputation {
        let primary_tax = money::percent_of(net_amount, STANDARD_RATE);
        let secondary_tax = money::percent_of(net_amount, declared_rate - STANDARD_RATE);

        TaxComputation {
            net_amount,
            display_tax_rate: STANDARD_RATE,
            rate_label: money::format_rate(STANDARD_RATE),
            primary_tax,
            secondary_tax,
            retail_price_total: Decimal::ZERO,
            total_value: net_amount + primary_tax + secondary_tax,
        }
    }

    fn standard(net_amount: Decimal, declared_rate: Decimal) -> TaxComputation {
        let primary_tax = money::percent_of(net_amount, declared_rate);

        TaxComputation {
            net_amount,
            display_tax_rate: declared_rate,
            rate_label: money::format_rate(declared_rate),
            primary_tax,
            secondary_tax: Decimal::ZERO,
            retail_price_total: Decimal::ZERO,
            total_value: net_amount + primary_tax,
        }
    }

    /// Validate a declared rate: percent between 0 and 100 with at most
    /// 4 decimal places
    pub fn validate_tax_rate(&self, tax_rate: Decimal) -> Result<(), AppError> {
        if tax_rate < Decimal::ZERO {
            return Err(AppError::Validation(
                "Tax rate cannot be negative".to_string()
            ));
        }

        if tax_rate > Decimal::ONE_HUNDRED {
            return Err(AppError::Validation(
                "Tax rate cannot exceed 100%".to_string()
            ));
        }

        if tax_rate.normalize().scale() > 4 {
            return Err(AppError::Validation(
                "Tax rate cannot have more than 4 decimal places".to_string()
            ));
        }

        Ok(())
    }
}

impl Default for TaxCalculator {
    fn default() -> Self {
        Self::new()
    }
}
