// Regulatory reference lookups against the tax authority

pub mod models;
pub mod services;

pub use models::{ReferencePair, ScheduleDescriptor, ScheduleQuery, SerialCandidate};
pub use services::{
    CachedReferenceLookup, FbrReferenceClient, OfflineReferenceLookup, ReferenceEnricher,
    ReferenceLookup,
};
