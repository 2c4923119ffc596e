//! Testing utilities and mock implementations.
//!
//! Lets the scraper run end to end against an in-memory catalog and a
//! scripted user, without network access or a terminal.
//!
//! # Example
//!
//! ```rust,ignore
//! use yifi_core::testing::{fixtures, MockCatalog, ScriptedPrompt};
//!
//! let catalog = MockCatalog::new();
//! catalog.set_page(1, vec![fixtures::movie(1, "Alien", 1979, 8.5, &["Horror"], &["1080p"])]).await;
//!
//! let prompt = ScriptedPrompt::new(vec![PromptAnswer::Continue]);
//! ```

mod mock_catalog;
mod scripted_prompt;

pub use mock_catalog::MockCatalog;
pub use scripted_prompt::ScriptedPrompt;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::catalog::{Movie, Torrent};

    /// Create a catalog movie with one torrent per quality label.
    ///
    /// The long title is `"<title> (<year>)"` and a cover URL is always set.
    pub fn movie(
        id: u64,
        title: &str,
        year: u32,
        rating: f64,
        genres: &[&str],
        qualities: &[&str],
    ) -> Movie {
        let slug = title.to_lowercase().replace(' ', "-");
        Movie {
            id,
            title: title.to_string(),
            title_long: format!("{} ({})", title, year),
            rating,
            genres: genres.iter().map(|g| g.to_string()).collect(),
            year,
            language: "en".to_string(),
            url: format!("https://yts.mx/movies/{}-{}", slug, year),
            imdb_code: format!("tt{:07}", id),
            large_cover_image: Some(format!(
                "https://yts.mx/assets/images/movies/{}/large-cover.jpg",
                slug
            )),
            torrents: qualities
                .iter()
                .map(|q| torrent(id, q))
                .collect(),
        }
    }

    /// Create a torrent whose URL is unique per movie and quality.
    pub fn torrent(movie_id: u64, quality: &str) -> Torrent {
        Torrent {
            quality: quality.to_string(),
            url: format!("https://yts.mx/torrent/download/{}-{}", movie_id, quality),
        }
    }
}
