use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::traits::Lookup;
use crate::app::ApiConfig;
use crate::domain::Resource;
use crate::utils::PokedexError;

/// PokeAPI client. One GET per lookup, no retries.
pub struct PokeApiClient {
    client: Client,
    base_url: String,
}

impl PokeApiClient {
    /// Create a client for the endpoint described by `config`
    pub fn new(config: &ApiConfig) -> Result<Self, PokedexError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| PokedexError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL of `identifier` under `resource`; identifiers are case-folded
    pub fn url_for(&self, resource: Resource, identifier: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            resource.path(),
            identifier.trim().to_lowercase()
        )
    }
}

#[async_trait]
impl Lookup for PokeApiClient {
    async fn fetch(&self, resource: Resource, identifier: &str) -> Result<Value, PokedexError> {
        let url = self.url_for(resource, identifier);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PokedexError::Network(format!("{}: {}", url, e)))?;

        if !response.status().is_success() {
            debug!("{} returned {}", url, response.status());
            return Err(PokedexError::NotFound(identifier.to_string()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| PokedexError::MalformedResponse {
                identifier: identifier.to_string(),
                reason: e.to_string(),
            })
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Bytes, PokedexError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PokedexError::Network(format!("{}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(PokedexError::NotFound(url.to_string()));
        }

        response
            .bytes()
            .await
            .map_err(|e| PokedexError::Network(format!("{}: {}", url, e)))
    }
}
