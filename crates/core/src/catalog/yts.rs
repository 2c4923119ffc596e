//! YTS listing API client.
//!
//! Every request carries a User-Agent picked at random from the configured
//! pool and is bounded by the configured timeout. Nothing is retried.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::{Client, RequestBuilder};
use tracing::{debug, warn};

use super::types::{ListMoviesResponse, MovieListing};
use super::user_agent::UserAgentPool;
use super::{CatalogApi, CatalogError};
use crate::config::ApiConfig;

/// HTTP client for the YTS catalog.
pub struct YtsClient {
    client: Client,
    base_url: String,
    user_agents: UserAgentPool,
}

impl YtsClient {
    /// Create a new client from API settings.
    pub fn new(config: &ApiConfig) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(CatalogError::Request)?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            user_agents: UserAgentPool::new(config.user_agents.clone()),
        })
    }

    fn get(&self, url: &str) -> RequestBuilder {
        let request = self.client.get(url);
        match self.user_agents.pick() {
            Some(agent) => request.header(USER_AGENT, agent),
            None => {
                warn!("Could not generate a random User-Agent, sending request without one");
                request
            }
        }
    }
}

#[async_trait]
impl CatalogApi for YtsClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_listing(&self, url: &str) -> Result<MovieListing, CatalogError> {
        debug!("GET {}", url);

        let response = self
            .get(url)
            .send()
            .await
            .map_err(|e| CatalogError::classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| CatalogError::classify(url, e))?;

        let parsed: ListMoviesResponse = serde_json::from_slice(&body)
            .map_err(|e| CatalogError::Decode(format!("Could not decode JSON: {}", e)))?;

        parsed.into_listing()
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, CatalogError> {
        debug!("GET {}", url);

        let response = self
            .get(url)
            .send()
            .await
            .map_err(|e| CatalogError::classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| CatalogError::classify(url, e))?;

        Ok(body.to_vec())
    }
}
