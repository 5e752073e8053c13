pub mod tax_calculator;
pub mod tax_resolver;

pub use tax_calculator::TaxCalculator;
pub use tax_resolver::TaxResolver;
