use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::{self, StreamExt};
use tracing::{debug, warn};

use crate::core::{AppError, Result};
use crate::modules::references::models::{ReferencePair, ScheduleQuery};
use super::reference_lookup::ReferenceLookup;

/// Finds the schedule reference and serial for items that need one.
///
/// Each item is looked up on its own: the first usable schedule, then the
/// first non-empty serial within it. Failures and timeouts are absorbed per
/// item and yield whatever part of the pair was found.
pub struct ReferenceEnricher {
    lookup: Arc<dyn ReferenceLookup>,
    timeout: Duration,
    concurrency: usize,
}

impl ReferenceEnricher {
    pub fn new(lookup: Arc<dyn ReferenceLookup>, timeout: Duration, concurrency: usize) -> Self {
        Self {
            lookup,
            timeout,
            concurrency: concurrency.max(1),
        }
    }

    async fn with_timeout<T>(&self, call: impl Future<Output = Result<T>>) -> Result<T> {
        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| AppError::Timeout(self.timeout.as_secs()))?
    }

    /// Look up one item's pair.
    ///
    /// A serial-lookup failure keeps the schedule that was already found;
    /// a schedule-lookup failure is returned as an error.
    pub async fn lookup_pair(&self, query: &ScheduleQuery) -> Result<ReferencePair> {
        let schedules = self.with_timeout(self.lookup.schedule_candidates(query)).await?;

        let Some(schedule) = schedules.into_iter().find(|s| s.is_usable()) else {
            debug!(
                "No schedule found for {} at {}%",
                query.scenario_code, query.tax_rate
            );
            return Ok(ReferencePair::empty());
        };

        let schedule_reference = Some(schedule.description.trim().to_string());

        let serial = match self
            .with_timeout(self.lookup.serial_candidates(&schedule.id, query.document_date))
            .await
        {
            Ok(serials) => serials
                .into_iter()
                .map(|s| s.description.trim().to_string())
                .find(|s| !s.is_empty()),
            Err(e) => {
                warn!(
                    "Serial lookup for schedule {} failed via {}: {}",
                    schedule.id,
                    self.lookup.name(),
                    e
                );
                None
            }
        };

        Ok(ReferencePair::new(schedule_reference, serial))
    }

    /// Look up one item's pair, absorbing any failure into an empty pair
    pub async fn enrich(&self, query: &ScheduleQuery) -> ReferencePair {
        match self.lookup_pair(query).await {
            Ok(pair) => pair,
            Err(e) => {
                warn!(
                    "Reference lookup for {} failed via {}: {}",
                    query.scenario_code,
                    self.lookup.name(),
                    e
                );
                ReferencePair::empty()
            }
        }
    }

    /// Enrich a batch of items with bounded concurrency.
    ///
    /// `None` entries need no reference and come back empty. Results are in
    /// input order regardless of completion order.
    pub async fn enrich_all(&self, queries: Vec<Option<ScheduleQuery>>) -> Vec<ReferencePair> {
        stream::iter(queries)
            .map(|query| async move {
                match query {
                    Some(query) => self.enrich(&query).await,
                    None => ReferencePair::empty(),
                }
            })
            .buffered(self.concurrency)
            .collect()
            .await
    }

    pub fn lookup_name(&self) -> &str {
        self.lookup.name()
    }
}
