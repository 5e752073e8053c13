use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Registration status of the buyer on the sales tax register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuyerStatus {
    #[default]
    Registered,
    Unregistered,
}

impl BuyerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Registered => "registered",
            Self::Unregistered => "unregistered",
        }
    }
}

impl std::fmt::Display for BuyerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BuyerStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "registered" => Ok(Self::Registered),
            "unregistered" => Ok(Self::Unregistered),
            _ => Err(format!("Invalid buyer status: {}", s)),
        }
    }
}

/// Legal basis a sale type is taxed under.
///
/// The category is a property of the sale type alone; the regime an item is
/// finally computed with also depends on its declared rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaxCategory {
    /// Ad valorem tax on the transaction value
    Standard,
    Exempt,
    ZeroRated,
    /// Fixed charge per unit of quantity
    FixedPerUnit { rate_per_unit: Decimal, unit: String },
    /// Standard percentage plus a fixed charge per unit of quantity
    HybridPerUnit { rate_per_unit: Decimal, unit: String },
    /// Tax on the notified retail price instead of the transaction value
    RetailPrice,
}

/// One entry of the scenario catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioDefinition {
    /// Sale-type label as declared on source documents
    pub sale_type: String,

    /// Scenario code submitted to the tax authority
    pub scenario_code: String,

    pub display_name: String,

    /// A regulatory schedule reference must accompany items of this scenario
    #[serde(default)]
    pub requires_reference: bool,

    /// The code differs by buyer registration status
    #[serde(default)]
    pub buyer_dependent: bool,

    /// Code used instead of `scenario_code` for unregistered buyers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unregistered_code: Option<String>,

    pub category: TaxCategory,
}

impl ScenarioDefinition {
    pub fn new(
        sale_type: &str,
        scenario_code: &str,
        display_name: &str,
        requires_reference: bool,
        category: TaxCategory,
    ) -> Self {
        Self {
            sale_type: sale_type.to_string(),
            scenario_code: scenario_code.to_string(),
            display_name: display_name.to_string(),
            requires_reference,
            buyer_dependent: false,
            unregistered_code: None,
            category,
        }
    }

    /// Marks the definition as a buyer-dependent pair
    pub fn with_unregistered_code(mut self, code: &str) -> Self {
        self.buyer_dependent = true;
        self.unregistered_code = Some(code.to_string());
        self
    }

    /// Scenario code for the given buyer status
    pub fn code_for(&self, buyer: BuyerStatus) -> &str {
        match (self.buyer_dependent, buyer, &self.unregistered_code) {
            (true, BuyerStatus::Unregistered, Some(code)) => code,
            _ => &self.scenario_code,
        }
    }
}
