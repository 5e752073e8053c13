use async_trait::async_trait;
use chrono::NaiveDate;

use crate::core::Result;
use crate::modules::references::models::{ScheduleDescriptor, ScheduleQuery, SerialCandidate};

/// Tax-authority reference lookup service.
///
/// Implementations answer each call independently; callers may issue calls
/// for different items concurrently.
#[async_trait]
pub trait ReferenceLookup: Send + Sync {
    /// Regulatory schedules applicable to a scenario, rate, province and date
    async fn schedule_candidates(&self, query: &ScheduleQuery) -> Result<Vec<ScheduleDescriptor>>;

    /// Serial numbers within a schedule as of a date
    async fn serial_candidates(
        &self,
        schedule_id: &str,
        document_date: NaiveDate,
    ) -> Result<Vec<SerialCandidate>>;

    /// Lookup implementation name
    fn name(&self) -> &str;
}

/// Lookup that never finds anything.
/// Used when no tax-authority credentials are configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineReferenceLookup;

#[async_trait]
impl ReferenceLookup for OfflineReferenceLookup {
    async fn schedule_candidates(&self, _query: &ScheduleQuery) -> Result<Vec<ScheduleDescriptor>> {
        Ok(Vec::new())
    }

    async fn serial_candidates(
        &self,
        _schedule_id: &str,
        _document_date: NaiveDate,
    ) -> Result<Vec<SerialCandidate>> {
        Ok(Vec::new())
    }

    fn name(&self) -> &str {
        "offline"
    }
}
