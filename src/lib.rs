//! Taxline invoice-line engine library
//!
//! Normalizes accounting-ledger lines into tax-authority invoice items:
//! line classification, discount allocation, scenario resolution, tax
//! computation and regulatory reference enrichment.

pub mod config;
pub mod core;
pub mod modules;

// Re-export commonly used types
pub use modules::invoices;
pub use modules::ledger;
pub use modules::references;
pub use modules::scenarios;
pub use modules::taxes;
