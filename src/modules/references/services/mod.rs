pub mod cached_lookup;
pub mod fbr_client;
pub mod reference_enricher;
pub mod reference_lookup;

pub use cached_lookup::CachedReferenceLookup;
pub use fbr_client::FbrReferenceClient;
pub use reference_enricher::ReferenceEnricher;
pub use reference_lookup::{OfflineReferenceLookup, ReferenceLookup};
