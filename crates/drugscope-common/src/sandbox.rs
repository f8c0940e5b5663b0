use reqwest::{Client, ClientBuilder};
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

use crate::error::DrugscopeError;

/// A sandbox-capped HTTP client that only allows requests to approved domains.
/// Every outbound request the pipeline makes goes through this wrapper.
#[derive(Debug, Clone)]
pub struct SandboxClient {
    client: Client,
    allowlist: HashSet<String>,
}

impl SandboxClient {
    /// Creates a new SandboxClient allowing the scientific data services the
    /// pipeline talks to, plus localhost for tests.
    pub fn new() -> Result<Self, DrugscopeError> {
        let mut allowlist = HashSet::new();
        let domains = vec![
            "www.ebi.ac.uk",      // ChEMBL REST API
            "rest.uniprot.org",   // UniProtKB REST API
            "localhost",          // mock servers in tests
            "127.0.0.1",          // localhost alt
        ];

        for d in domains {
            allowlist.insert(d.to_string());
        }

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| DrugscopeError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, allowlist })
    }

    /// Appends an exact hostname to the allowlist.
    pub fn allow_domain(&mut self, domain: &str) {
        self.allowlist.insert(domain.to_string());
    }

    /// Validates if a URL is permitted under the current sandbox policy.
    pub fn is_allowed(&self, url: &str) -> bool {
        if let Ok(parsed) = Url::parse(url) {
            if let Some(host) = parsed.host_str() {
                // Exact match or subdomain of an allowed domain
                for allowed in &self.allowlist {
                    if host == allowed || host.ends_with(&format!(".{}", allowed)) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Exposes the inner `reqwest::Client` builder pattern safely for GET requests.
    pub fn get(&self, url: &str) -> Result<reqwest::RequestBuilder, DrugscopeError> {
        if !self.is_allowed(url) {
            return Err(DrugscopeError::Security(format!(
                "Network capabilities capped: domain not in allowlist for URL {}",
                url
            )));
        }

        Ok(self.client.get(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_allowlist() {
        let client = SandboxClient::new().unwrap();
        assert!(client.is_allowed("https://www.ebi.ac.uk/chembl/api/data/molecule.json"));
        assert!(client.is_allowed("https://rest.uniprot.org/uniprotkb/P00533.json"));
        assert!(client.is_allowed("http://127.0.0.1:8080/anything"));
        assert!(!client.is_allowed("https://example.com/data"));
    }

    #[test]
    fn test_disallowed_get_is_rejected() {
        let client = SandboxClient::new().unwrap();
        let err = client.get("https://example.com/").unwrap_err();
        assert!(matches!(err, DrugscopeError::Security(_)));
    }

    #[test]
    fn test_allow_domain_extends_list() {
        let mut client = SandboxClient::new().unwrap();
        assert!(!client.is_allowed("https://data.example.org/x"));
        client.allow_domain("data.example.org");
        assert!(client.is_allowed("https://data.example.org/x"));
    }
}
