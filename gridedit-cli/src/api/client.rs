//! The entire network surface: one unauthenticated GET returning a JSON
//! array of loosely typed records.

use anyhow::{Context, Result};

/// Default dataset endpoint.
pub const DEFAULT_DATASET_URL: &str = "https://jsonplaceholder.typicode.com/users";

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    url: String,
}

impl ApiClient {
    pub fn new(url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            url,
        }
    }

    /// Fetch the full record set. Records stay loosely typed until the
    /// mapper runs. Non-2xx status or an unparseable body is fatal for the
    /// fetch cycle; there is no retry and no timeout.
    pub async fn fetch_records(&self) -> Result<Vec<serde_json::Value>> {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("requesting {}", self.url))?
            .error_for_status()
            .with_context(|| format!("fetching {}", self.url))?;

        let records: Vec<serde_json::Value> = response
            .json()
            .await
            .context("parsing record payload")?;

        log::info!("fetched {} raw records from {}", records.len(), self.url);
        Ok(records)
    }
}
