//! Run configuration.
//!
//! Loaded from `drugscope.toml` in the working directory when present;
//! every field has a built-in default, so the file is optional and may be
//! partial. There is no CLI surface beyond RUST_LOG for the log filter.

use std::path::PathBuf;

use serde::Deserialize;

const CONFIG_PATH: &str = "drugscope.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// ChEMBL REST API base URL.
    pub chembl_base_url: String,
    /// UniProtKB REST API base URL.
    pub uniprot_base_url: String,
    /// Drugs first approved in this year or later get their targets resolved.
    pub recency_threshold: i32,
    /// Fixed pause after each drug resolution and each keyword lookup.
    pub pause_ms: u64,
    /// Catalog-scan progress interval, in records.
    pub progress_interval: usize,
    /// Page size for paginated ChEMBL requests.
    pub page_limit: usize,
    /// Where the output document is written.
    pub output_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chembl_base_url: "https://www.ebi.ac.uk/chembl/api/data".to_string(),
            uniprot_base_url: "https://rest.uniprot.org/uniprotkb".to_string(),
            recency_threshold: 2019,
            pause_ms: 500,
            progress_interval: 500,
            page_limit: 1000,
            output_path: PathBuf::from(drugscope_ingestion::output::DEFAULT_OUTPUT_PATH),
        }
    }
}

impl Config {
    /// Load `drugscope.toml` if it exists, otherwise built-in defaults.
    pub fn load() -> anyhow::Result<Self> {
        if !std::path::Path::new(CONFIG_PATH).exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(CONFIG_PATH)?;
        let config = toml::from_str(&text)?;
        Ok(config)
    }
}
