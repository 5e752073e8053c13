mod tax;

pub use tax::{ScenarioResolution, TaxComputation, TaxInput, TaxRegime, STANDARD_RATE};
