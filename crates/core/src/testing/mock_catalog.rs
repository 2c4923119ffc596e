//! Mock catalog for testing.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::catalog::{page_from_url, CatalogApi, CatalogError, Movie, MovieListing};

/// In-memory implementation of `CatalogApi`.
///
/// Provides controllable behavior for testing:
/// - Serve listing pages by page number
/// - Track listing and download requests for assertions
/// - Simulate failures
#[derive(Debug)]
pub struct MockCatalog {
    /// Listing pages by page number.
    pages: Arc<RwLock<HashMap<u32, Vec<Movie>>>>,
    /// Reported total; defaults to the number of movies across all pages.
    movie_count: Arc<RwLock<Option<i64>>>,
    /// Download bodies by URL.
    files: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    failing_pages: Arc<RwLock<HashSet<u32>>>,
    listing_requests: Arc<RwLock<Vec<String>>>,
    byte_requests: Arc<RwLock<Vec<String>>>,
    /// If set, the next listing request fails with this error.
    next_error: Arc<RwLock<Option<CatalogError>>>,
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCatalog {
    pub const BASE_URL: &'static str = "http://catalog.test/api/v2/list_movies.json";

    pub fn new() -> Self {
        Self {
            pages: Arc::new(RwLock::new(HashMap::new())),
            movie_count: Arc::new(RwLock::new(None)),
            files: Arc::new(RwLock::new(HashMap::new())),
            failing_pages: Arc::new(RwLock::new(HashSet::new())),
            listing_requests: Arc::new(RwLock::new(Vec::new())),
            byte_requests: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Serve `movies` for listing page `page`.
    pub async fn set_page(&self, page: u32, movies: Vec<Movie>) {
        self.pages.write().await.insert(page, movies);
    }

    /// Override the reported `movie_count`.
    pub async fn set_movie_count(&self, count: i64) {
        *self.movie_count.write().await = Some(count);
    }

    /// Serve `body` for downloads of `url`.
    pub async fn set_file(&self, url: impl Into<String>, body: Vec<u8>) {
        self.files.write().await.insert(url.into(), body);
    }

    /// Make every request for listing page `page` fail.
    pub async fn fail_page(&self, page: u32) {
        self.failing_pages.write().await.insert(page);
    }

    /// Make the next listing request fail with `error`.
    pub async fn fail_next(&self, error: CatalogError) {
        *self.next_error.write().await = Some(error);
    }

    // =========================================================================
    // Assertions
    // =========================================================================

    /// Every listing URL requested so far, in order.
    pub async fn listing_requests(&self) -> Vec<String> {
        self.listing_requests.read().await.clone()
    }

    /// Every download URL requested so far, in order.
    pub async fn byte_requests(&self) -> Vec<String> {
        self.byte_requests.read().await.clone()
    }

    /// Default download body for a URL without a registered file.
    pub fn default_body(url: &str) -> Vec<u8> {
        format!("d8:announce{}:{}e", url.len(), url).into_bytes()
    }
}

#[async_trait]
impl CatalogApi for MockCatalog {
    fn base_url(&self) -> &str {
        Self::BASE_URL
    }

    async fn fetch_listing(&self, url: &str) -> Result<MovieListing, CatalogError> {
        self.listing_requests.write().await.push(url.to_string());

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }

        let page = page_from_url(url)
            .ok_or_else(|| CatalogError::Decode(format!("no page in {}", url)))?;

        if self.failing_pages.read().await.contains(&page) {
            return Err(CatalogError::Status {
                status: 500,
                url: url.to_string(),
            });
        }

        let pages = self.pages.read().await;
        let movie_count = match *self.movie_count.read().await {
            Some(count) => count,
            None => pages.values().map(|movies| movies.len() as i64).sum(),
        };

        Ok(MovieListing {
            movie_count,
            movies: pages.get(&page).cloned().unwrap_or_default(),
        })
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, CatalogError> {
        self.byte_requests.write().await.push(url.to_string());

        Ok(self
            .files
            .read()
            .await
            .get(url)
            .cloned()
            .unwrap_or_else(|| Self::default_body(url)))
    }
}
