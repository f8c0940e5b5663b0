//! Data models for the aggregation pipeline.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// One approved drug from the ChEMBL catalog, projected to the fields the
/// pipeline consumes. Immutable after stage 1.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DrugRecord {
    pub chembl_id: String,
    pub name: String,
    /// First-approval year; None when absent or unparseable in the catalog.
    pub approval_year: Option<i32>,
}

/// One mechanism-of-action record for a drug.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MechanismRecord {
    pub target_chembl_id: Option<String>,
}

/// A resolved target entry, projected to the fields the pipeline consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetEntry {
    pub target_type: String,
    /// UniProt accessions of the target's components.
    pub accessions: Vec<String>,
}

/// Drug id → set of UniProt accessions. Insertion-ordered so serialization
/// is deterministic; per-drug uniqueness enforced by the set.
pub type AccessionSet = IndexMap<String, IndexSet<String>>;

/// Drug id → accession → keyword names. A keyword entry without a name is
/// preserved as None rather than dropped.
pub type KeywordMap = IndexMap<String, IndexMap<String, Vec<Option<String>>>>;

/// The aggregate written to disk at the end of the run. Constructed once,
/// never mutated after write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputDocument {
    pub approved_drugs_sorted: Vec<DrugRecord>,
    pub drug_to_accessions: AccessionSet,
    pub drug_protein_keywords: KeywordMap,
}
