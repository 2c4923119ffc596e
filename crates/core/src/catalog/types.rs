//! Types for catalog API responses.

use serde::{Deserialize, Serialize};

use super::CatalogError;

/// A movie entry from the catalog listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    /// Catalog movie ID.
    pub id: u64,
    /// Plain title, without year or decorations.
    pub title: String,
    /// Title with the release year appended, e.g. "Alien (1979)".
    #[serde(default)]
    pub title_long: String,
    /// IMDb rating.
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub year: u32,
    #[serde(default)]
    pub language: String,
    /// Catalog page for this movie.
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub imdb_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large_cover_image: Option<String>,
    #[serde(default)]
    pub torrents: Vec<Torrent>,
}

impl Movie {
    /// Title used for display and file names, before sanitizing.
    pub fn display_title(&self) -> &str {
        if self.title_long.is_empty() {
            &self.title
        } else {
            &self.title_long
        }
    }

    /// Genre tags used for genre-aware placement.
    ///
    /// Movies without genres are filed under a single `None` tag.
    pub fn genre_tags(&self) -> Vec<&str> {
        if self.genres.is_empty() {
            vec!["None"]
        } else {
            self.genres.iter().map(String::as_str).collect()
        }
    }

    /// IMDb title page for this movie.
    pub fn imdb_url(&self) -> String {
        format!("https://www.imdb.com/title/{}", self.imdb_code)
    }
}

/// One quality-specific torrent of a movie.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Torrent {
    /// Quality label as reported by the catalog, e.g. "1080p" or "3D".
    pub quality: String,
    /// Download URL of the .torrent file.
    pub url: String,
}

/// One page of listing results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieListing {
    /// Total number of movies matching the query, across all pages.
    pub movie_count: i64,
    /// Movies on the requested page. Empty past the last page.
    pub movies: Vec<Movie>,
}

// ============================================================================
// Wire format (private)
// ============================================================================

#[derive(Debug, Deserialize)]
pub(super) struct ListMoviesResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    status_message: Option<String>,
    #[serde(default)]
    data: Option<ListMoviesData>,
}

#[derive(Debug, Deserialize)]
struct ListMoviesData {
    movie_count: i64,
    #[serde(default)]
    movies: Option<Vec<Movie>>,
}

impl ListMoviesResponse {
    pub(super) fn into_listing(self) -> Result<MovieListing, CatalogError> {
        match self.data {
            Some(data) => Ok(MovieListing {
                movie_count: data.movie_count,
                movies: data.movies.unwrap_or_default(),
            }),
            None => Err(CatalogError::Decode(format!(
                "response has no data section (status: {}, message: {})",
                self.status.as_deref().unwrap_or("unknown"),
                self.status_message.as_deref().unwrap_or("none"),
            ))),
        }
    }
}
