//! UniProtKB REST API client.
//!
//! Endpoint: https://rest.uniprot.org/uniprotkb/{accession}.json
//!
//! The pipeline consumes one field: the entry's `keywords` list, each entry
//! optionally carrying a `name`.

use drugscope_common::sandbox::SandboxClient as Client;
use drugscope_common::{DrugscopeError, Result};
use serde_json::Value;
use tracing::{debug, instrument};

const UNIPROT_BASE_URL: &str = "https://rest.uniprot.org/uniprotkb";

pub struct UniProtClient {
    client: Client,
    base_url: String,
}

impl UniProtClient {
    pub fn new() -> Self {
        Self::with_base_url(UNIPROT_BASE_URL)
    }

    /// Client against a non-default endpoint (mock servers in tests).
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: Client::new().unwrap(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the keyword names attached to a protein entry. A keyword entry
    /// without a name contributes None rather than being dropped. Non-2xx
    /// responses are fetch failures.
    #[instrument(skip(self))]
    pub async fn fetch_keywords(&self, accession: &str) -> Result<Vec<Option<String>>> {
        let url = format!("{}/{}.json", self.base_url, accession);

        let resp = self
            .client
            .get(&url)?
            .header("Accept", "application/json")
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(DrugscopeError::Source(format!(
                "keyword fetch failed for {}: HTTP {}",
                accession,
                resp.status()
            )));
        }

        let json: Value = resp.json().await?;
        let keywords = parse_keywords(&json);

        debug!(accession, count = keywords.len(), "Keywords retrieved");

        Ok(keywords)
    }
}

impl Default for UniProtClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract keyword names from a UniProtKB entry body.
pub fn parse_keywords(entry: &Value) -> Vec<Option<String>> {
    entry["keywords"]
        .as_array()
        .map(|arr| {
            arr.iter()
                .map(|kw| kw["name"].as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_keywords_names() {
        let entry = json!({
            "keywords": [
                { "id": "KW-0002", "name": "3D-structure" },
                { "id": "KW-0067", "name": "ATP-binding" }
            ]
        });
        assert_eq!(
            parse_keywords(&entry),
            vec![Some("3D-structure".to_string()), Some("ATP-binding".to_string())]
        );
    }

    #[test]
    fn test_parse_keywords_missing_name_is_preserved_as_null() {
        let entry = json!({
            "keywords": [
                { "id": "KW-0002", "name": "3D-structure" },
                { "id": "KW-9999" }
            ]
        });
        let kws = parse_keywords(&entry);
        assert_eq!(kws.len(), 2);
        assert_eq!(kws[1], None);
    }

    #[test]
    fn test_parse_keywords_absent_list_is_empty() {
        assert!(parse_keywords(&json!({})).is_empty());
    }
}
