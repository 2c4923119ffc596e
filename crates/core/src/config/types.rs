use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::filters::{Categorize, Genre, Quality, SortBy, SortOrder};

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub scraper: ScraperConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

/// Catalog API connection settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Listing endpoint (default: https://yts.mx/api/v2/list_movies.json)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds (default: 5)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Pool of User-Agent strings, one is picked at random per request.
    /// An empty pool sends requests without the header.
    #[serde(default = "default_user_agents")]
    pub user_agents: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            user_agents: default_user_agents(),
        }
    }
}

fn default_base_url() -> String {
    "https://yts.mx/api/v2/list_movies.json".to_string()
}

fn default_timeout() -> u64 {
    5
}

fn default_user_agents() -> Vec<String> {
    [
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_4) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
        "Mozilla/5.0 (X11; Linux x86_64; rv:125.0) Gecko/20100101 Firefox/125.0",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0",
        "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36 Edg/124.0.0.0",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Filters and output options for one scraping run
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Output root. Defaults to the categorization scheme name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    pub quality: Quality,
    pub genre: Genre,
    /// Minimum IMDb rating, 0 to 9.
    pub minimum_rating: u8,
    pub sort_by: SortBy,
    pub categorize: Categorize,
    /// Movies released before this year are skipped.
    pub year_limit: u32,
    /// Also download the large cover image next to each torrent.
    pub poster: bool,
    /// Append the IMDb code to file names.
    pub imdb_id: bool,
    /// Process each page through a worker pool.
    pub concurrent: bool,
    /// Only log metadata to CSV, write no torrent or image files.
    pub csv_only: bool,
    /// Log metadata to CSV while downloading.
    pub csv_log: bool,
    pub csv_path: PathBuf,
    /// First listing page to fetch (1-based).
    pub page: u32,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            output: None,
            quality: Quality::default(),
            genre: Genre::default(),
            minimum_rating: 0,
            sort_by: SortBy::default(),
            categorize: Categorize::default(),
            year_limit: 0,
            poster: false,
            imdb_id: false,
            concurrent: false,
            csv_only: false,
            csv_log: false,
            csv_path: default_csv_path(),
            page: 1,
        }
    }
}

fn default_csv_path() -> PathBuf {
    PathBuf::from("YiFi-Scraper.csv")
}

impl ScraperConfig {
    /// Root directory all downloads are placed under.
    pub fn output_dir(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.categorize.folder_name()))
    }

    pub fn order_by(&self) -> SortOrder {
        self.sort_by.order()
    }

    /// Whether CSV rows are written during the run.
    pub fn csv_enabled(&self) -> bool {
        self.csv_only || self.csv_log
    }
}

/// Command line overrides layered on top of the file and environment.
///
/// Only fields that were given are serialized, so unset flags never mask
/// values from lower layers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScraperOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<Quality>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<Genre>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortBy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categorize: Option<Categorize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrent: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csv_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csv_log: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csv_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}
