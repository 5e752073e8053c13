use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use tracing::debug;

use crate::core::Result;
use crate::modules::references::models::{ScheduleDescriptor, ScheduleQuery, SerialCandidate};
use super::reference_lookup::ReferenceLookup;

/// Memoizes successful lookups for the lifetime of the process.
///
/// Failures are not cached, so a later call retries the inner lookup.
pub struct CachedReferenceLookup {
    inner: Arc<dyn ReferenceLookup>,
    schedules: RwLock<HashMap<ScheduleQuery, Vec<ScheduleDescriptor>>>,
    serials: RwLock<HashMap<(String, NaiveDate), Vec<SerialCandidate>>>,
}

impl CachedReferenceLookup {
    pub fn new(inner: Arc<dyn ReferenceLookup>) -> Self {
        Self {
            inner,
            schedules: RwLock::new(HashMap::new()),
            serials: RwLock::new(HashMap::new()),
        }
    }

    /// Number of cached schedule and serial answers
    pub async fn cached_entries(&self) -> (usize, usize) {
        (self.schedules.read().await.len(), self.serials.read().await.len())
    }
}

#[async_trait]
impl ReferenceLookup for CachedReferenceLookup {
    async fn schedule_candidates(&self, query: &ScheduleQuery) -> Result<Vec<ScheduleDescriptor>> {
        if let Some(hit) = self.schedules.read().await.get(query) {
            debug!("Schedule cache hit for {}", query.scenario_code);
            return Ok(hit.clone());
        }

        let schedules = self.inner.schedule_candidates(query).await?;
        self.schedules
            .write()
            .await
            .insert(query.clone(), schedules.clone());

        Ok(schedules)
    }

    async fn serial_candidates(
        &self,
        schedule_id: &str,
        document_date: NaiveDate,
    ) -> Result<Vec<SerialCandidate>> {
        let key = (schedule_id.to_string(), document_date);
        if let Some(hit) = self.serials.read().await.get(&key) {
            return Ok(hit.clone());
        }

        let serials = self.inner.serial_candidates(schedule_id, document_date).await?;
        self.serials.write().await.insert(key, serials.clone());

        Ok(serials)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
