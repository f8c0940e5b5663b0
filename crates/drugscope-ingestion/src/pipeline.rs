//! End-to-end aggregation pipeline.
//!
//! Orchestrates the full flow for a single run:
//!   1. Scan the ChEMBL catalog for fully approved drugs (paginated)
//!   2. Sort by (approval year, name), unknown years last
//!   3. For drugs approved since the recency threshold, resolve
//!      mechanism-of-action records to single-protein targets and collect
//!      their UniProt accessions
//!   4. Fetch UniProt keywords for every (drug, accession) pair
//!   5. Assemble the output document
//!
//! Execution is strictly sequential: one request in flight at a time, with a
//! fixed pause after each drug resolution and each keyword lookup. Per-unit
//! failures in stages 3 and 4 are logged and skipped; only the catalog scan
//! and the final write are fatal.

use tracing::{info, warn};

use crate::models::{AccessionSet, DrugRecord, KeywordMap, OutputDocument};
use crate::pacing::Pacer;
use crate::progress::{ProgressEvent, ProgressObserver};
use crate::sources::chembl::{ChemblClient, SINGLE_PROTEIN};
use crate::sources::uniprot::UniProtClient;

// ── Job config ────────────────────────────────────────────────────────────────

/// Parameters for a single aggregation run.
#[derive(Debug, Clone)]
pub struct AggregationJob {
    /// Drugs first approved in this year or later get their targets resolved.
    pub recency_threshold: i32,
    /// Catalog-scan progress is reported every this many records.
    pub progress_interval: usize,
}

impl Default for AggregationJob {
    fn default() -> Self {
        Self {
            recency_threshold: 2019,
            progress_interval: 500,
        }
    }
}

// ── Result summary ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct AggregationResult {
    pub drugs_total: usize,
    pub drugs_recent: usize,
    pub accession_pairs: usize,
    pub keywords_fetched: usize,
    pub errors: Vec<String>,
    pub duration_ms: u64,
}

// ── Pipeline orchestrator ─────────────────────────────────────────────────────

/// Runs the aggregation pipeline for one job and returns the document ready
/// for serialization plus a run summary.
pub async fn run_aggregation(
    job: &AggregationJob,
    chembl: &ChemblClient,
    uniprot: &UniProtClient,
    pacer: &dyn Pacer,
    observer: &dyn ProgressObserver,
) -> drugscope_common::Result<(OutputDocument, AggregationResult)> {
    let t0 = std::time::Instant::now();
    let mut result = AggregationResult::default();

    // ── 1. Catalog scan ──────────────────────────────────────────────────────
    info!("Retrieving approved drugs from ChEMBL...");
    let mut drugs: Vec<DrugRecord> = Vec::new();
    let mut offset = 0usize;
    loop {
        // A failed catalog page is fatal: nothing useful can be produced
        // without the full catalog.
        let page = chembl.fetch_approved_drugs_page(offset).await?;
        for record in page.records {
            drugs.push(record);
            if job.progress_interval > 0 && drugs.len() % job.progress_interval == 0 {
                observer.on_event(&ProgressEvent::CatalogProgress { retrieved: drugs.len() });
            }
        }
        match page.next_offset {
            Some(next) => offset = next,
            None => break,
        }
    }
    result.drugs_total = drugs.len();
    observer.on_event(&ProgressEvent::CatalogComplete { total: drugs.len() });

    info!(total = drugs.len(), "Sorting drugs by approval year and name...");
    sort_drugs(&mut drugs);

    // ── 2. Target resolution ─────────────────────────────────────────────────
    let recent = recent_drugs(&drugs, job.recency_threshold);
    result.drugs_recent = recent.len();
    info!(
        count = recent.len(),
        threshold = job.recency_threshold,
        "Retrieving protein targets for recently approved drugs"
    );

    let mut accessions = AccessionSet::new();

    for (i, drug) in recent.iter().enumerate() {
        let mechanisms = match chembl.fetch_mechanisms(&drug.chembl_id).await {
            Ok(mechs) => mechs,
            Err(e) => {
                let msg = format!("mechanism fetch failed for {}: {e}", drug.chembl_id);
                warn!("{}", &msg);
                result.errors.push(msg);
                Vec::new()
            }
        };

        for mechanism in &mechanisms {
            let Some(ref target_id) = mechanism.target_chembl_id else {
                continue;
            };
            // Any failure resolving the target skips this mechanism record
            // only, never the drug or the run.
            let target = match chembl.fetch_target(target_id).await {
                Ok(Some(t)) => t,
                Ok(None) => continue,
                Err(e) => {
                    warn!(target_id = %target_id, error = %e, "Target resolution failed, skipping");
                    continue;
                }
            };
            if target.target_type != SINGLE_PROTEIN {
                continue;
            }
            for accession in target.accessions {
                accessions
                    .entry(drug.chembl_id.clone())
                    .or_default()
                    .insert(accession);
            }
        }

        observer.on_event(&ProgressEvent::DrugResolved {
            index: i + 1,
            total: recent.len(),
            chembl_id: drug.chembl_id.clone(),
            name: drug.name.clone(),
        });
        pacer.pause().await;
    }
    observer.on_event(&ProgressEvent::ResolutionComplete { drugs: recent.len() });

    // ── 3. Keyword enrichment ────────────────────────────────────────────────
    let pairs: Vec<(String, String)> = accessions
        .iter()
        .flat_map(|(drug_id, accs)| {
            accs.iter()
                .map(move |acc| (drug_id.clone(), acc.clone()))
        })
        .collect();
    result.accession_pairs = pairs.len();
    info!(pairs = pairs.len(), "Retrieving UniProt keywords for protein accessions");

    let mut keywords = KeywordMap::new();

    for (i, (drug_id, accession)) in pairs.iter().enumerate() {
        let names = match uniprot.fetch_keywords(accession).await {
            Ok(names) => {
                result.keywords_fetched += 1;
                names
            }
            Err(e) => {
                let msg = format!("keyword fetch failed for {accession} (drug {drug_id}): {e}");
                warn!("{}", &msg);
                result.errors.push(msg);
                Vec::new()
            }
        };
        keywords
            .entry(drug_id.clone())
            .or_default()
            .insert(accession.clone(), names);

        observer.on_event(&ProgressEvent::KeywordFetched {
            index: i + 1,
            total: pairs.len(),
            chembl_id: drug_id.clone(),
            accession: accession.clone(),
        });
        pacer.pause().await;
    }
    observer.on_event(&ProgressEvent::EnrichmentComplete { pairs: pairs.len() });

    result.duration_ms = t0.elapsed().as_millis() as u64;

    info!(
        drugs_total = result.drugs_total,
        drugs_recent = result.drugs_recent,
        accession_pairs = result.accession_pairs,
        keywords_fetched = result.keywords_fetched,
        duration_ms = result.duration_ms,
        errors = result.errors.len(),
        "Aggregation pipeline complete"
    );

    let document = OutputDocument {
        approved_drugs_sorted: drugs,
        drug_to_accessions: accessions,
        drug_protein_keywords: keywords,
    };

    Ok((document, result))
}

// ── Sorting and filtering ─────────────────────────────────────────────────────

/// Sort by composite key: unknown years last, then approval year ascending,
/// ties broken lexicographically by name.
pub fn sort_drugs(drugs: &mut [DrugRecord]) {
    drugs.sort_by(|a, b| {
        let ka = (a.approval_year.is_none(), a.approval_year.unwrap_or(0), &a.name);
        let kb = (b.approval_year.is_none(), b.approval_year.unwrap_or(0), &b.name);
        ka.cmp(&kb)
    });
}

/// Drugs with a known approval year at or past the threshold, in input order.
pub fn recent_drugs(sorted: &[DrugRecord], threshold: i32) -> Vec<DrugRecord> {
    sorted
        .iter()
        .filter(|d| d.approval_year.is_some_and(|y| y >= threshold))
        .cloned()
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
