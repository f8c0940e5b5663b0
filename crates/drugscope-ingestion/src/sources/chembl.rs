//! ChEMBL API client.
//!
//! ChEMBL is a database of bioactive molecules with drug-like properties.
//! The pipeline consumes three of its resources:
//!   - molecule: approval phase, preferred name, first-approval year
//!   - mechanism: drug → target links
//!   - target: target type classification and component accessions
//!
//! API docs: https://chembl.gitbook.io/chembl-interface-documentation/web-resources/chembl-api
//! Endpoint: https://www.ebi.ac.uk/chembl/api/data

use drugscope_common::sandbox::SandboxClient as Client;
use drugscope_common::{DrugscopeError, Result};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::models::{DrugRecord, MechanismRecord, TargetEntry};

const CHEMBL_API_URL: &str = "https://www.ebi.ac.uk/chembl/api/data";

/// Max phase 4 marks a fully approved drug.
const MAX_PHASE_APPROVED: &str = "4";

/// Target type that passes the single-protein filter.
pub const SINGLE_PROTEIN: &str = "SINGLE PROTEIN";

/// One page of the approved-molecule scan.
#[derive(Debug)]
pub struct MoleculePage {
    pub records: Vec<DrugRecord>,
    /// Offset of the next page, None when the scan is exhausted.
    pub next_offset: Option<usize>,
}

/// ChEMBL client for molecule, mechanism and target data.
pub struct ChemblClient {
    client: Client,
    base_url: String,
    page_limit: usize,
}

impl ChemblClient {
    pub fn new() -> Self {
        Self::with_base_url(CHEMBL_API_URL)
    }

    /// Client against a non-default endpoint (mock servers in tests).
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: Client::new().unwrap(),
            base_url: base_url.trim_end_matches('/').to_string(),
            page_limit: 1000,
        }
    }

    pub fn with_page_limit(mut self, page_limit: usize) -> Self {
        self.page_limit = page_limit;
        self
    }

    /// Fetch one page of fully approved molecules, projected to
    /// {molecule_chembl_id, pref_name, first_approval}.
    #[instrument(skip(self))]
    pub async fn fetch_approved_drugs_page(&self, offset: usize) -> Result<MoleculePage> {
        let url = format!("{}/molecule.json", self.base_url);
        let limit = self.page_limit.to_string();
        let offset_str = offset.to_string();
        let params = [
            ("max_phase", MAX_PHASE_APPROVED),
            ("only", "molecule_chembl_id,pref_name,first_approval"),
            ("limit", limit.as_str()),
            ("offset", offset_str.as_str()),
        ];

        let resp = self.client.get(&url)?.query(&params).send().await?;
        if !resp.status().is_success() {
            return Err(DrugscopeError::Source(format!(
                "molecule page fetch failed: HTTP {} at offset {}",
                resp.status(),
                offset
            )));
        }

        let json: Value = resp.json().await?;
        let records: Vec<DrugRecord> = json["molecules"]
            .as_array()
            .map(|arr| arr.iter().map(parse_molecule).collect())
            .unwrap_or_default();

        debug!(offset, count = records.len(), "Molecule page retrieved");

        let next_offset = if json["page_meta"]["next"].is_null() || records.is_empty() {
            None
        } else {
            Some(offset + records.len())
        };

        Ok(MoleculePage { records, next_offset })
    }

    /// Fetch all mechanism-of-action records referencing a drug, following
    /// pagination until exhausted.
    #[instrument(skip(self))]
    pub async fn fetch_mechanisms(&self, molecule_chembl_id: &str) -> Result<Vec<MechanismRecord>> {
        let url = format!("{}/mechanism.json", self.base_url);
        let limit = self.page_limit.to_string();
        let mut mechanisms = Vec::new();
        let mut offset = 0usize;

        loop {
            let offset_str = offset.to_string();
            let params = [
                ("molecule_chembl_id", molecule_chembl_id),
                ("limit", limit.as_str()),
                ("offset", offset_str.as_str()),
            ];

            let resp = self.client.get(&url)?.query(&params).send().await?;
            if !resp.status().is_success() {
                return Err(DrugscopeError::Source(format!(
                    "mechanism fetch failed for {}: HTTP {}",
                    molecule_chembl_id,
                    resp.status()
                )));
            }

            let json: Value = resp.json().await?;
            let page: Vec<MechanismRecord> = json["mechanisms"]
                .as_array()
                .map(|arr| {
                    arr.iter()
                        .map(|m| MechanismRecord {
                            target_chembl_id: m["target_chembl_id"].as_str().map(String::from),
                        })
                        .collect()
                })
                .unwrap_or_default();

            let page_len = page.len();
            mechanisms.extend(page);

            if json["page_meta"]["next"].is_null() || page_len == 0 {
                break;
            }
            offset += page_len;
        }

        debug!(
            molecule_chembl_id,
            count = mechanisms.len(),
            "Mechanism records retrieved"
        );

        Ok(mechanisms)
    }

    /// Fetch a target entry by ChEMBL ID. Non-2xx responses resolve to None.
    #[instrument(skip(self))]
    pub async fn fetch_target(&self, target_chembl_id: &str) -> Result<Option<TargetEntry>> {
        let url = format!("{}/target/{}.json", self.base_url, target_chembl_id);

        debug!(target_chembl_id, "Fetching ChEMBL target");

        let resp = self.client.get(&url)?.send().await?;
        if !resp.status().is_success() {
            warn!(
                target_chembl_id,
                status = %resp.status(),
                "Target fetch returned non-success status"
            );
            return Ok(None);
        }

        let json: Value = resp.json().await?;

        Ok(Some(TargetEntry {
            target_type: json["target_type"].as_str().unwrap_or("").to_string(),
            accessions: json["target_components"]
                .as_array()
                .map(|arr| {
                    arr.iter()
                        .filter_map(|c| c["accession"].as_str())
                        .filter(|a| !a.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
        }))
    }
}

impl Default for ChemblClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Project a raw molecule entry to a DrugRecord. A malformed entry never
/// aborts the scan: missing fields default to empty/null.
pub fn parse_molecule(v: &Value) -> DrugRecord {
    DrugRecord {
        chembl_id: v["molecule_chembl_id"].as_str().unwrap_or("").to_string(),
        name: v["pref_name"].as_str().unwrap_or("").to_string(),
        approval_year: parse_approval_year(&v["first_approval"]),
    }
}

/// First-approval year arrives as a JSON number or a numeric string; absent
/// or non-numeric values resolve to None, not an error.
fn parse_approval_year(v: &Value) -> Option<i32> {
    match v {
        Value::Number(n) => n.as_i64().map(|y| y as i32),
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    }
}
