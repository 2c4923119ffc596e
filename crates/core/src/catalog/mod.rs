//! Movie catalog access.
//!
//! Provides the `CatalogApi` trait used by the scraper, the reqwest-backed
//! `YtsClient`, listing query construction and the catalog entry types.

mod query;
mod types;
mod user_agent;
mod yts;

pub use query::{page_from_url, ListingQuery, PAGE_LIMIT};
pub use types::{Movie, MovieListing, Torrent};
pub use user_agent::UserAgentPool;
pub use yts::YtsClient;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when talking to the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Server answered with a non-success status.
    #[error("HTTP error: {status} for {url}")]
    Status { status: u16, url: String },

    /// Could not connect to the server.
    #[error("Error connecting to {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Request exceeded the configured timeout.
    #[error("Timeout error for {url}")]
    Timeout { url: String },

    /// Any other request failure.
    #[error("There was an error: {0}")]
    Request(#[source] reqwest::Error),

    /// Response body was not the expected JSON.
    #[error("Malformed response: {0}")]
    Decode(String),
}

impl CatalogError {
    /// Sort a transport error into status, connection, timeout or generic.
    pub fn classify(url: &str, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else if error.is_connect() {
            Self::Connect {
                url: url.to_string(),
                source: error,
            }
        } else if let Some(status) = error.status() {
            Self::Status {
                status: status.as_u16(),
                url: url.to_string(),
            }
        } else if error.is_decode() {
            Self::Decode(error.to_string())
        } else {
            Self::Request(error)
        }
    }
}

/// Read access to a movie catalog.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Listing endpoint that queries are appended to.
    fn base_url(&self) -> &str;

    /// Fetch one listing page by full URL.
    async fn fetch_listing(&self, url: &str) -> Result<MovieListing, CatalogError>;

    /// Download a file (torrent or cover image) as raw bytes.
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, CatalogError>;
}
