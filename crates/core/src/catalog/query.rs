//! Listing query construction.

use crate::config::ScraperConfig;

/// Page size used for every listing request. The API caps `limit` at 50.
pub const PAGE_LIMIT: u32 = 50;

/// Filter parameters of a listing request, minus the page number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    pub quality: String,
    pub genre: String,
    pub minimum_rating: u8,
    pub sort_by: String,
    pub order_by: String,
    pub limit: u32,
}

impl ListingQuery {
    pub fn from_config(config: &ScraperConfig) -> Self {
        Self {
            quality: config.quality.api_value().to_string(),
            genre: config.genre.as_str().to_string(),
            minimum_rating: config.minimum_rating,
            sort_by: config.sort_by.api_value().to_string(),
            order_by: config.order_by().as_str().to_string(),
            limit: PAGE_LIMIT,
        }
    }

    /// Reusable listing URL ending in `page=`; append a page number to use it.
    pub fn url_prefix(&self, base_url: &str) -> String {
        format!(
            "{}?quality={}&genre={}&minimum_rating={}&sort_by={}&order_by={}&limit={}&page=",
            base_url.trim_end_matches('?'),
            urlencoding::encode(&self.quality),
            urlencoding::encode(&self.genre),
            self.minimum_rating,
            urlencoding::encode(&self.sort_by),
            urlencoding::encode(&self.order_by),
            self.limit
        )
    }
}

/// Extracts the page number from a listing URL. An empty `page=` means page 1.
pub fn page_from_url(url: &str) -> Option<u32> {
    let (_, page) = url.rsplit_once("page=")?;
    let page = page.split('&').next().unwrap_or_default();
    if page.is_empty() {
        Some(1)
    } else {
        page.parse().ok()
    }
}
