use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{Config, LookupConfig};
use crate::core::Result;
use crate::modules::invoices::models::{DraftInvoiceItem, InvoiceItem, InvoiceSummary};
use crate::modules::ledger::models::LedgerDocument;
use crate::modules::ledger::services::{classify_lines, DiscountAllocator};
use crate::modules::references::services::{
    CachedReferenceLookup, FbrReferenceClient, OfflineReferenceLookup, ReferenceEnricher,
    ReferenceLookup,
};
use crate::modules::scenarios::services::ScenarioCatalog;
use crate::modules::taxes::services::{TaxCalculator, TaxResolver};

use super::item_assembler::ItemAssembler;

/// Finalized items of one document with their totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedInvoice {
    pub document_number: String,
    pub items: Vec<InvoiceItem>,
    pub summary: InvoiceSummary,
}

/// Build the reference lookup for a configuration.
///
/// Offline when asked to be or when no token is configured; the online
/// client is wrapped in the per-process cache when enabled.
pub fn build_lookup(config: &LookupConfig, offline: bool) -> Result<Arc<dyn ReferenceLookup>> {
    if offline || !config.is_online() {
        info!("Reference lookups disabled; reference pairs will stay empty");
        return Ok(Arc::new(OfflineReferenceLookup));
    }

    let client: Arc<dyn ReferenceLookup> = Arc::new(FbrReferenceClient::from_config(config)?);
    if config.cache_enabled {
        Ok(Arc::new(CachedReferenceLookup::new(client)))
    } else {
        Ok(client)
    }
}

/// Runs a ledger document through classification, discount allocation,
/// tax computation and reference enrichment
pub struct InvoiceService {
    resolver: TaxResolver,
    calculator: TaxCalculator,
    enricher: ReferenceEnricher,
    seller_province_code: String,
}

impl InvoiceService {
    pub fn new(
        resolver: TaxResolver,
        calculator: TaxCalculator,
        enricher: ReferenceEnricher,
        seller_province_code: impl Into<String>,
    ) -> Self {
        Self {
            resolver,
            calculator,
            enricher,
            seller_province_code: seller_province_code.into(),
        }
    }

    /// Wire the service from configuration: catalog overrides, lookup
    /// client and enrichment limits
    pub fn from_config(config: &Config, offline: bool) -> Result<Self> {
        let catalog = ScenarioCatalog::load(config.engine.scenario_catalog_path.as_deref())?;
        let lookup = build_lookup(&config.lookup, offline)?;
        let enricher = ReferenceEnricher::new(
            lookup,
            Duration::from_secs(config.lookup.timeout_secs),
            config.lookup.concurrency,
        );

        Ok(Self::new(
            TaxResolver::new(Arc::new(catalog)),
            TaxCalculator::new(),
            enricher,
            config.engine.seller_province_code.clone(),
        ))
    }

    pub fn resolver(&self) -> &TaxResolver {
        &self.resolver
    }

    fn province_code(&self, document: &LedgerDocument) -> String {
        document
            .province_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .unwrap_or(&self.seller_province_code)
            .to_string()
    }

    /// Synchronous part of the pipeline: every item computed, no references yet
    pub fn prepare_items(&self, document: &LedgerDocument) -> Result<Vec<DraftInvoiceItem>> {
        document.validate()?;

        let mut contexts = classify_lines(&document.lines);
        let allocations = DiscountAllocator::allocate(&mut contexts);
        for allocation in allocations.iter().filter(|a| !a.status.is_applied()) {
            debug!(
                "Discount at position {} not fully applied: {:?}",
                allocation.discount_position, allocation.status
            );
        }

        let assembler = ItemAssembler::new(
            &self.resolver,
            &self.calculator,
            self.province_code(document),
        );

        let drafts: Vec<DraftInvoiceItem> = contexts
            .iter()
            .filter(|context| context.is_item())
            .filter_map(|context| assembler.assemble(document, context))
            .collect();

        debug!(
            "Document {}: {} lines, {} invoice items",
            document.document_number,
            document.lines.len(),
            drafts.len()
        );

        Ok(drafts)
    }

    /// Enrich drafts with reference pairs and finalize them
    pub async fn finalize_items(&self, drafts: Vec<DraftInvoiceItem>) -> Vec<InvoiceItem> {
        let queries = drafts
            .iter()
            .map(|draft| draft.reference_query.clone())
            .collect();
        let pairs = self.enricher.enrich_all(queries).await;

        drafts
            .into_iter()
            .zip(pairs)
            .map(|(draft, pair)| draft.finalize(pair))
            .collect()
    }

    /// Process one document end to end
    pub async fn process_document(&self, document: &LedgerDocument) -> Result<ProcessedInvoice> {
        let drafts = self.prepare_items(document)?;
        let items = self.finalize_items(drafts).await;
        let summary = InvoiceSummary::from_items(&items);

        if !summary.is_complete() {
            warn!(
                "Document {}: {} item(s) still need a schedule reference (lookup: {})",
                document.document_number,
                summary.missing_references,
                self.enricher.lookup_name()
            );
        }

        info!(
            "Processed document {}: {} items, total {}",
            document.document_number, summary.item_count, summary.total_value
        );

        Ok(ProcessedInvoice {
            document_number: document.document_number.clone(),
            items,
            summary,
        })
    }
}
