use std::path::Path;
use std::sync::LazyLock;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, info};

use crate::core::{money, AppError, Result};
use crate::modules::scenarios::models::{ScenarioDefinition, TaxCategory};

/// Sale type of the baseline scenario every unmatched label falls back to
pub const DEFAULT_SALE_TYPE: &str = "Goods at standard rate (default)";

static BUILTIN: LazyLock<ScenarioCatalog> = LazyLock::new(ScenarioCatalog::builtin);

/// Immutable mapping from sale-type label to scenario definition.
///
/// Keys are normalized once at construction; every query goes through
/// [`normalize_sale_type`], so case and spacing variants need no entries of
/// their own. Declaration order is kept because substring fallback matching
/// returns the first hit.
#[derive(Debug, Clone)]
pub struct ScenarioCatalog {
    entries: Vec<(String, ScenarioDefinition)>,
    default_index: usize,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    scenarios: Vec<ScenarioDefinition>,
}

/// Normalizes a sale-type label for catalog lookup: trimmed, lowercased and
/// with internal whitespace runs collapsed to a single space.
pub fn normalize_sale_type(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

impl ScenarioCatalog {
    /// Process-wide built-in catalog
    pub fn global() -> &'static ScenarioCatalog {
        &BUILTIN
    }

    /// Build a catalog from definitions. The default scenario must be present.
    pub fn from_definitions(definitions: Vec<ScenarioDefinition>) -> Result<Self> {
        let mut entries: Vec<(String, ScenarioDefinition)> = Vec::with_capacity(definitions.len());

        for definition in definitions {
            let key = normalize_sale_type(&definition.sale_type);
            if key.is_empty() {
                return Err(AppError::configuration(format!(
                    "Scenario {} has an empty sale type",
                    definition.scenario_code
                )));
            }

            if let TaxCategory::FixedPerUnit { rate_per_unit, .. }
            | TaxCategory::HybridPerUnit { rate_per_unit, .. } = &definition.category
            {
                if *rate_per_unit < Decimal::ZERO || *rate_per_unit > money::max_amount() {
                    return Err(AppError::configuration(format!(
                        "Scenario {} has per-unit rate {} outside 0 to {}",
                        definition.scenario_code,
                        rate_per_unit,
                        money::max_amount()
                    )));
                }
            }

            // Later definitions replace earlier ones with the same key in place
            match entries.iter_mut().find(|(existing, _)| *existing == key) {
                Some(slot) => slot.1 = definition,
                None => entries.push((key, definition)),
            }
        }

        let default_key = normalize_sale_type(DEFAULT_SALE_TYPE);
        let default_index = entries
            .iter()
            .position(|(key, _)| *key == default_key)
            .ok_or_else(|| {
                AppError::configuration(format!(
                    "Scenario catalog has no entry for '{}'",
                    DEFAULT_SALE_TYPE
                ))
            })?;

        Ok(Self {
            entries,
            default_index,
        })
    }

    /// Built-in catalog, optionally extended by a YAML override file.
    ///
    /// Override entries replace built-in entries with the same normalized sale
    /// type and are appended otherwise.
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let Some(path) = override_path else {
            return Ok(Self::global().clone());
        };

        let content = std::fs::read_to_string(path)?;
        let file: CatalogFile = serde_yaml::from_str(&content)?;

        info!(
            "Loaded {} scenario overrides from {}",
            file.scenarios.len(),
            path.display()
        );

        let mut definitions = builtin_definitions();
        definitions.extend(file.scenarios);
        Self::from_definitions(definitions)
    }

    fn builtin() -> Self {
        let entries = builtin_definitions()
            .into_iter()
            .map(|definition| (normalize_sale_type(&definition.sale_type), definition))
            .collect::<Vec<_>>();
        let default_key = normalize_sale_type(DEFAULT_SALE_TYPE);
        let default_index = entries
            .iter()
            .position(|(key, _)| *key == default_key)
            .unwrap_or(0);

        Self {
            entries,
            default_index,
        }
    }

    /// Exact lookup on the normalized label
    pub fn get(&self, sale_type: &str) -> Option<&ScenarioDefinition> {
        let key = normalize_sale_type(sale_type);
        self.entries
            .iter()
            .find(|(existing, _)| *existing == key)
            .map(|(_, definition)| definition)
    }

    /// Exact match, then bidirectional substring match in catalog order.
    /// Returns `None` only when neither matches.
    pub fn find(&self, sale_type: &str) -> Option<&ScenarioDefinition> {
        let key = normalize_sale_type(sale_type);
        if key.is_empty() {
            return None;
        }

        if let Some(definition) = self.get(&key) {
            return Some(definition);
        }

        let fuzzy = self
            .entries
            .iter()
            .find(|(existing, _)| existing.contains(&key) || key.contains(existing.as_str()))
            .map(|(_, definition)| definition);

        if let Some(definition) = fuzzy {
            debug!(
                "Sale type '{}' matched '{}' by substring",
                sale_type, definition.sale_type
            );
        }

        fuzzy
    }

    /// Baseline standard-rate scenario
    pub fn default_scenario(&self) -> &ScenarioDefinition {
        &self.entries[self.default_index].1
    }

    pub fn definitions(&self) -> impl Iterator<Item = &ScenarioDefinition> {
        self.entries.iter().map(|(_, definition)| definition)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ScenarioCatalog {
    fn default() -> Self {
        Self::global().clone()
    }
}

fn builtin_definitions() -> Vec<ScenarioDefinition> {
    use TaxCategory::*;

    let per_kg = |rate: i64| Decimal::from(rate);

    vec![
        ScenarioDefinition::new(
            DEFAULT_SALE_TYPE,
            "SN001",
            "Goods at standard rate to registered buyers",
            false,
            Standard,
        )
        .with_unregistered_code("SN002"),
        ScenarioDefinition::new("Steel melting and re-rolling", "SN003", "Sale of Steel (Melted and Re-Rolled)", false, Standard),
        ScenarioDefinition::new("Ship breaking", "SN004", "Sale by Ship Breakers", false, Standard),
        ScenarioDefinition::new("Goods at Reduced Rate", "SN005", "Reduced rate sale", true, Standard),
        ScenarioDefinition::new("Exempt goods", "SN006", "Exempt goods sale", true, Exempt),
        ScenarioDefinition::new("Goods at zero-rate", "SN007", "Zero rated sale", true, ZeroRated),
        ScenarioDefinition::new("3rd Schedule Goods", "SN008", "Sale of 3rd schedule goods", false, RetailPrice),
        ScenarioDefinition::new("Cotton ginners", "SN009", "Cotton Ginners", false, Standard),
        ScenarioDefinition::new("Telecommunication services", "SN010", "Telecom services rendered or provided", false, Standard),
        ScenarioDefinition::new("Toll Manufacturing", "SN011", "Toll Manufacturing sale by Steel sector", false, Standard),
        ScenarioDefinition::new("Petroleum Products", "SN012", "Sale of Petroleum products", true, Standard),
        ScenarioDefinition::new("Electricity Supply to Retailers", "SN013", "Electricity Supply to Retailers", false, Standard),
        ScenarioDefinition::new("Gas to CNG stations", "SN014", "Sale of Gas to CNG stations", false, Standard),
        ScenarioDefinition::new("Mobile Phones", "SN015", "Sale of mobile phones", true, Standard),
        ScenarioDefinition::new("Processing/Conversion of Goods", "SN016", "Processing / Conversion of Goods", false, Standard),
        ScenarioDefinition::new("Goods (FED in ST Mode)", "SN017", "Sale of Goods where FED is charged in ST mode", false, Standard),
        ScenarioDefinition::new("Services (FED in ST Mode)", "SN018", "Services rendered or provided where FED is charged in ST mode", false, Standard),
        ScenarioDefinition::new("Services", "SN019", "Services rendered or provided", false, Standard),
        ScenarioDefinition::new("Electric Vehicle", "SN020", "Sale of Electric Vehicles", true, Standard),
        ScenarioDefinition::new(
            "Cement /Concrete Block",
            "SN021",
            "Sale of Cement /Concrete Block",
            false,
            FixedPerUnit { rate_per_unit: per_kg(3), unit: "KG".to_string() },
        ),
        ScenarioDefinition::new(
            "Potassium Chlorate",
            "SN022",
            "Sale of Potassium Chlorate",
            true,
            HybridPerUnit { rate_per_unit: per_kg(60), unit: "KG".to_string() },
        ),
        ScenarioDefinition::new("CNG Sales", "SN023", "Sale of CNG", true, Standard),
        ScenarioDefinition::new("Goods as per SRO.297(1)/2023", "SN024", "Goods sold that are listed in SRO 297(1)/2023", true, Standard),
        ScenarioDefinition::new("Non-Adjustable Supplies", "SN025", "Drugs sold at fixed ST rate", true, Standard),
    ]
}
