use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::warn;

use crate::modules::scenarios::models::BuyerStatus;
use crate::modules::scenarios::services::ScenarioCatalog;
use crate::modules::taxes::models::{ScenarioResolution, STANDARD_RATE};

/// Resolves a declared sale type and rate to a scenario code and the
/// regulatory-reference requirement
#[derive(Debug, Clone)]
pub struct TaxResolver {
    catalog: Arc<ScenarioCatalog>,
}

impl TaxResolver {
    pub fn new(catalog: Arc<ScenarioCatalog>) -> Self {
        Self { catalog }
    }

    /// Resolve the scenario for an item.
    ///
    /// Unmatched labels resolve to the baseline standard-rate scenario. Any
    /// rate other than the standard rate requires a regulatory reference,
    /// whatever the catalog entry says.
    pub fn resolve(
        &self,
        sale_type: &str,
        buyer: BuyerStatus,
        tax_rate: Decimal,
    ) -> ScenarioResolution {
        let (definition, fell_back) = match self.catalog.find(sale_type) {
            Some(definition) => (definition, false),
            None => {
                if !sale_type.trim().is_empty() {
                    warn!(
                        "Sale type '{}' not in scenario catalog; using baseline scenario",
                        sale_type.trim()
                    );
                }
                (self.catalog.default_scenario(), true)
            }
        };

        let requires_reference = definition.requires_reference || tax_rate != STANDARD_RATE;

        ScenarioResolution {
            scenario_code: definition.code_for(buyer).to_string(),
            sale_type: definition.sale_type.clone(),
            requires_reference,
            category: definition.category.clone(),
            fell_back,
        }
    }

    pub fn catalog(&self) -> &ScenarioCatalog {
        &self.catalog
    }
}

impl Default for TaxResolver {
    fn default() -> Self {
        Self::new(Arc::new(ScenarioCatalog::default()))
    }
}
