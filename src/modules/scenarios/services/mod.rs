pub mod scenario_catalog;

pub use scenario_catalog::{normalize_sale_type, ScenarioCatalog, DEFAULT_SALE_TYPE};
