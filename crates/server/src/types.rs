//! Types shared by the enricher, its cache and the orchestrator.

use data_loader::MovieId;
use serde::Serialize;

/// Display assets for one movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaAssets {
    /// Always set; the placeholder image when nothing better was found
    pub poster_url: String,
    /// A watch link, a search link, or nothing if no title was known
    pub trailer_url: Option<String>,
}

/// Cache key for a resolution: the exact inputs it was resolved from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaKey {
    pub movie_id: MovieId,
    pub title: Option<String>,
    pub release_date: Option<String>,
}

impl MediaKey {
    pub fn new(movie_id: MovieId, title: Option<&str>, release_date: Option<&str>) -> Self {
        Self {
            movie_id,
            title: title.map(str::to_string),
            release_date: release_date.map(str::to_string),
        }
    }
}
