mod scenario;

pub use scenario::{BuyerStatus, ScenarioDefinition, TaxCategory};
