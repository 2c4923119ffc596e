//! Placer module for writing downloaded torrents into the output tree.
//!
//! Paths are built from the categorization scheme (rating bucket and/or
//! genre), an optional per-movie folder when covers are downloaded, and a
//! file name made of the sanitized title, the quality and optionally the
//! IMDb code.
//!
//! # Example
//!
//! ```ignore
//! use yifi_core::placer::{PathBuilder, PlacementRequest, TorrentWriter};
//!
//! let paths = PathBuilder::new(&config);
//! let request = PlacementRequest {
//!     name: "Alien (1979)",
//!     rating: 8.5,
//!     quality: "1080p",
//!     genre: None,
//!     imdb_code: "tt0078748",
//! };
//!
//! if let Some(stem) = paths.prepare(&request).await? {
//!     let outcome = TorrentWriter::new().write(&stem, &torrent_bytes, None).await?;
//! }
//! ```

mod error;
mod path;
mod writer;

pub use error::PlacerError;
pub use path::{rating_bucket, sanitize_name, PathBuilder, PlacementRequest, ILLEGAL_PATH_CHARS};
pub use writer::{TorrentWriter, WriteOutcome, IMAGE_EXTENSION, TORRENT_EXTENSION};
