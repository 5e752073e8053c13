use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::config::LookupConfig;
use crate::modules::references::models::{ScheduleDescriptor, ScheduleQuery, SerialCandidate};
use super::reference_lookup::ReferenceLookup;

/// Date format the reference endpoints expect (04-Feb-2025)
const DATE_FORMAT: &str = "%d-%b-%Y";

/// Tax-authority reference data client.
///
/// Reads regulatory schedules and their serial numbers from the digital
/// invoicing reference endpoints with bearer-token authentication.
pub struct FbrReferenceClient {
    client: Client,
    api_token: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SroScheduleRecord {
    #[serde(rename = "srO_ID")]
    id: i64,
    #[serde(rename = "srO_DESC", default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct SroItemRecord {
    #[serde(rename = "srO_ITEM_ID")]
    id: i64,
    #[serde(rename = "srO_ITEM_DESC", default)]
    description: String,
}

impl FbrReferenceClient {
    pub fn new(api_token: String, base_url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_token,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &LookupConfig) -> Result<Self> {
        let api_token = config.api_token.clone().ok_or_else(|| {
            AppError::configuration("FBR_API_TOKEN is required for online reference lookups")
        })?;

        Self::new(
            api_token,
            config.base_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn format_date(date: NaiveDate) -> String {
        date.format(DATE_FORMAT).to_string()
    }

    fn schedule_params(query: &ScheduleQuery) -> Vec<(&'static str, String)> {
        vec![
            ("scenario_id", query.scenario_code.clone()),
            ("rate_value", query.tax_rate.normalize().to_string()),
            ("date", Self::format_date(query.document_date)),
            ("origination_supplier_csv", query.province_code.clone()),
        ]
    }

    fn serial_params(schedule_id: &str, document_date: NaiveDate) -> Vec<(&'static str, String)> {
        vec![
            ("date", Self::format_date(document_date)),
            ("sro_id", schedule_id.to_string()),
        ]
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_token)
            .query(params)
            .send()
            .await
            .map_err(|e| AppError::Lookup(format!("Reference API error: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            return Err(AppError::Lookup(format!(
                "Reference API error {}: {}",
                status, error_body
            )));
        }

        let body = response.text().await?;
        Self::parse_body(&body)
    }

    fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T> {
        // The service answers "no data" with an empty body
        let body = if body.trim().is_empty() { "[]" } else { body };
        serde_json::from_str(body)
            .map_err(|e| AppError::Lookup(format!("Failed to parse reference response: {}", e)))
    }

    fn into_schedules(records: Vec<SroScheduleRecord>) -> Vec<ScheduleDescriptor> {
        records
            .into_iter()
            .map(|r| ScheduleDescriptor::new(r.id.to_string(), r.description.trim()))
            .collect()
    }

    fn into_serials(records: Vec<SroItemRecord>) -> Vec<SerialCandidate> {
        records
            .into_iter()
            .map(|r| SerialCandidate::new(r.id.to_string(), r.description.trim()))
            .collect()
    }
}

#[async_trait]
impl ReferenceLookup for FbrReferenceClient {
    async fn schedule_candidates(&self, query: &ScheduleQuery) -> Result<Vec<ScheduleDescriptor>> {
        let records: Vec<SroScheduleRecord> = self
            .get_json("/pdi/v2/SroSchedule", &Self::schedule_params(query))
            .await?;

        debug!(
            "Reference API returned {} schedules for {} at {}%",
            records.len(),
            query.scenario_code,
            query.tax_rate
        );

        Ok(Self::into_schedules(records))
    }

    async fn serial_candidates(
        &self,
        schedule_id: &str,
        document_date: NaiveDate,
    ) -> Result<Vec<SerialCandidate>> {
        let records: Vec<SroItemRecord> = self
            .get_json("/pdi/v2/SROItem", &Self::serial_params(schedule_id, document_date))
            .await?;

        Ok(Self::into_serials(records))
    }

    fn name(&self) -> &str {
        "fbr"
    }
}
