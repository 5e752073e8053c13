use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::modules::scenarios::models::TaxCategory;

/// Standard sales tax rate in percent. Rates above it carry further tax,
/// and any other rate needs a regulatory reference.
pub const STANDARD_RATE: Decimal = Decimal::from_parts(18, 0, 0, false, 0);

/// Scenario an item resolved to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioResolution {
    pub scenario_code: String,
    /// Canonical catalog label of the matched scenario
    pub sale_type: String,
    pub requires_reference: bool,
    pub category: TaxCategory,
    /// The declared label matched nothing and the baseline scenario was used
    pub fell_back: bool,
}

/// Formula an item's tax is computed with. Variants are listed in dispatch
/// precedence order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "regime", rename_all = "snake_case")]
pub enum TaxRegime {
    Exempt,
    ZeroRated,
    FixedPerUnit { rate_per_unit: Decimal, unit: String },
    HybridPerUnit { rate_per_unit: Decimal, unit: String },
    RetailPrice,
    SplitRate,
    Standard,
}

impl TaxRegime {
    /// Pick the regime for a resolved scenario and declared rate.
    /// A standard-category rate above the standard rate is split into sales
    /// tax and further tax.
    pub fn select(resolution: &ScenarioResolution, declared_rate: Decimal) -> Self {
        match &resolution.category {
            TaxCategory::Exempt => Self::Exempt,
            TaxCategory::ZeroRated => Self::ZeroRated,
            TaxCategory::FixedPerUnit { rate_per_unit, unit } => Self::FixedPerUnit {
                rate_per_unit: *rate_per_unit,
                unit: unit.clone(),
            },
            TaxCategory::HybridPerUnit { rate_per_unit, unit } => Self::HybridPerUnit {
                rate_per_unit: *rate_per_unit,
                unit: unit.clone(),
            },
            TaxCategory::RetailPrice => Self::RetailPrice,
            TaxCategory::Standard if declared_rate > STANDARD_RATE => Self::SplitRate,
            TaxCategory::Standard => Self::Standard,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exempt => "exempt",
            Self::ZeroRated => "zero_rated",
            Self::FixedPerUnit { .. } => "fixed_per_unit",
            Self::HybridPerUnit { .. } => "hybrid_per_unit",
            Self::RetailPrice => "retail_price",
            Self::SplitRate => "split_rate",
            Self::Standard => "standard",
        }
    }
}

impl std::fmt::Display for TaxRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Inputs to a single item's tax computation
#[derive(Debug, Clone, PartialEq)]
pub struct TaxInput {
    /// Line amount before discount
    pub gross_amount: Decimal,
    pub attributed_discount: Decimal,
    pub quantity: Decimal,
    /// Declared rate in percent
    pub declared_rate: Decimal,
    /// Notified retail price per unit, when the connector supplied one
    pub retail_price: Option<Decimal>,
}

/// Tax fields of one item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxComputation {
    pub net_amount: Decimal,
    pub display_tax_rate: Decimal,
    pub rate_label: String,
    pub primary_tax: Decimal,
    /// Further tax
    pub secondary_tax: Decimal,
    pub retail_price_total: Decimal,
    pub total_value: Decimal,
}
