//! HTTP client for the modem's status endpoints.
//!
//! Two fetch surfaces: generation-1 status pages come back as raw markup,
//! and the generation-3 `walk` endpoint emulates an SNMP subtree walk as a
//! flat JSON object of full OID to scalar value. The client does one request
//! per source with no pooling or retries; a failed fetch fails the cycle.

use std::collections::BTreeMap;
use std::future::Future;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde_json::Value;
use tracing::debug;

use crate::config::HubConfig;

/// Raw result of one OID subtree walk: full OID to decoded scalar value.
pub type WalkDump = BTreeMap<String, String>;

/// Modem HTTP API client trait.
pub trait HubClient: Send + Sync {
    /// Fetch the raw markup of one status page.
    fn fetch_page(&self, page: &str) -> impl Future<Output = Result<String>> + Send;

    /// Walk one OID subtree, returning the flat OID-to-value dump.
    fn fetch_walk(&self, base_oid: &str) -> impl Future<Output = Result<WalkDump>> + Send;
}

/// HTTP-based modem client.
pub struct Client {
    http: reqwest::Client,
    endpoint: String,
}

impl Client {
    /// Create a new modem client.
    pub fn new(cfg: &HubConfig) -> Result<Self> {
        let timeout = if cfg.timeout.is_zero() {
            Duration::from_secs(10)
        } else {
            cfg.timeout
        };

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("building HTTP client")?;

        Ok(Self {
            http,
            endpoint: normalize_endpoint(&cfg.endpoint),
        })
    }

    /// Perform a GET request, failing on any non-success status.
    async fn get(&self, path_query: &str) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.endpoint, path_query);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("requesting {url}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("unexpected status {status} from {url}: {body}");
        }

        Ok(response)
    }
}

impl HubClient for Client {
    async fn fetch_page(&self, page: &str) -> Result<String> {
        debug!(page, "fetching status page");

        self.get(page)
            .await?
            .text()
            .await
            .with_context(|| format!("reading page {page}"))
    }

    async fn fetch_walk(&self, base_oid: &str) -> Result<WalkDump> {
        debug!(base = base_oid, "walking OID subtree");

        let raw: BTreeMap<String, Value> = self
            .get(&format!("walk?oids={base_oid}"))
            .await?
            .json()
            .await
            .with_context(|| format!("decoding walk response for {base_oid}"))?;

        raw.into_iter()
            .map(|(oid, value)| {
                let scalar = scalar_string(&oid, value)?;
                Ok((oid, scalar))
            })
            .collect()
    }
}

/// The walk endpoint serves both strings and bare numbers; everything
/// normalizes to strings before extraction.
fn scalar_string(oid: &str, value: Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => bail!("walk value for {oid} is not a scalar: {other}"),
    }
}

fn normalize_endpoint(endpoint: &str) -> String {
    if endpoint.ends_with('/') {
        endpoint.to_string()
    } else {
        format!("{endpoint}/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_endpoint() {
        assert_eq!(
            normalize_endpoint("http://192.168.100.1"),
            "http://192.168.100.1/"
        );
        assert_eq!(
            normalize_endpoint("http://192.168.100.1/"),
            "http://192.168.100.1/"
        );
    }

    #[test]
    fn test_scalar_string_passes_strings_through() {
        let value = scalar_string("1.2.3", Value::String("42 bps".to_string()));
        assert_eq!(value.expect("string scalar"), "42 bps");
    }

    #[test]
    fn test_scalar_string_renders_numbers() {
        assert_eq!(
            scalar_string("1.2.3", serde_json::json!(255)).expect("number scalar"),
            "255"
        );
        assert_eq!(
            scalar_string("1.2.3", serde_json::json!(-30)).expect("number scalar"),
            "-30"
        );
    }

    #[test]
    fn test_scalar_string_rejects_structures() {
        let result = scalar_string("1.2.3", serde_json::json!(["a", "b"]));
        assert!(result.is_err());
        assert!(result
            .expect_err("should fail")
            .to_string()
            .contains("1.2.3"));
    }
}
