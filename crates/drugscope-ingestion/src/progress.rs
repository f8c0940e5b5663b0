//! Progress reporting.
//!
//! The pipeline emits typed events through an injected observer so the core
//! has no direct console dependency. The binary installs `TracingProgress`;
//! tests use `NullProgress`.

use tracing::info;

#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Emitted every `progress_interval` records during the catalog scan.
    CatalogProgress { retrieved: usize },
    CatalogComplete { total: usize },
    /// One per recent drug whose targets were resolved.
    DrugResolved {
        index: usize,
        total: usize,
        chembl_id: String,
        name: String,
    },
    ResolutionComplete { drugs: usize },
    /// One per (drug, accession) pair enriched.
    KeywordFetched {
        index: usize,
        total: usize,
        chembl_id: String,
        accession: String,
    },
    EnrichmentComplete { pairs: usize },
}

pub trait ProgressObserver: Send + Sync {
    fn on_event(&self, event: &ProgressEvent);
}

/// Observer that discards all events.
pub struct NullProgress;

impl ProgressObserver for NullProgress {
    fn on_event(&self, _event: &ProgressEvent) {}
}

/// Observer that logs events through `tracing`.
pub struct TracingProgress;

impl ProgressObserver for TracingProgress {
    fn on_event(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::CatalogProgress { retrieved } => {
                info!(retrieved, "Retrieved molecules...");
            }
            ProgressEvent::CatalogComplete { total } => {
                info!(total, "Approved drug catalog retrieved");
            }
            ProgressEvent::DrugResolved { index, total, chembl_id, name } => {
                info!("({}/{}) Processed drug {} ({})", index, total, chembl_id, name);
            }
            ProgressEvent::ResolutionComplete { drugs } => {
                info!(drugs, "Protein target resolution complete");
            }
            ProgressEvent::KeywordFetched { index, total, chembl_id, accession } => {
                info!(
                    "({}/{}) Fetched keywords for {} (drug {})",
                    index, total, accession, chembl_id
                );
            }
            ProgressEvent::EnrichmentComplete { pairs } => {
                info!(pairs, "Keyword enrichment complete");
            }
        }
    }
}
