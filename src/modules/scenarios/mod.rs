// Scenarios module

pub mod models;
pub mod services;

pub use models::{BuyerStatus, ScenarioDefinition, TaxCategory};
pub use services::ScenarioCatalog;
