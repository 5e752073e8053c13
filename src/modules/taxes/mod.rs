pub mod models;
pub mod services;

pub use models::{ScenarioResolution, TaxComputation, TaxInput, TaxRegime};
pub use services::{TaxCalculator, TaxResolver};
