use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Query for the regulatory schedules that justify a scenario at a rate
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleQuery {
    pub scenario_code: String,
    /// Rate in percent
    pub tax_rate: Decimal,
    pub province_code: String,
    pub document_date: NaiveDate,
}

/// A regulatory schedule returned by the lookup service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDescriptor {
    /// Identifier used to query the schedule's serial numbers
    pub id: String,
    /// Citation submitted as the schedule reference
    pub description: String,
}

impl ScheduleDescriptor {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
        }
    }

    /// Both the id and the citation are present
    pub fn is_usable(&self) -> bool {
        !self.id.trim().is_empty() && !self.description.trim().is_empty()
    }
}

/// A serial number (line item) within a regulatory schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerialCandidate {
    pub id: String,
    /// Serial number submitted alongside the schedule reference
    pub description: String,
}

impl SerialCandidate {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
        }
    }
}

/// Schedule reference and serial as found by enrichment.
///
/// Either side may be missing; the pair is made consistent by the reference
/// guard before it reaches an invoice item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferencePair {
    pub schedule_reference: Option<String>,
    pub reference_serial: Option<String>,
}

impl ReferencePair {
    pub fn new(schedule_reference: Option<String>, reference_serial: Option<String>) -> Self {
        Self {
            schedule_reference,
            reference_serial,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        is_blank(&self.schedule_reference) && is_blank(&self.reference_serial)
    }

    pub fn is_complete(&self) -> bool {
        !is_blank(&self.schedule_reference) && !is_blank(&self.reference_serial)
    }
}

/// `None`, empty or whitespace-only
pub fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}
