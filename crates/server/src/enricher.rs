//! # Metadata Enricher
//!
//! Resolves a poster and a trailer link for a recommended movie.
//!
//! The resolution is a two-field state (poster, trailer) moved forward by
//! guarded steps:
//! 1. Direct lookup by catalog id: poster from the detail record, trailer
//!    from the first YouTube "Trailer" video
//! 2. Title search, only while the poster is missing: with the release
//!    year first, then without it; the first hit fills what is still empty
//! 3. Defaults: placeholder poster, trailer search link when a title is known
//!
//! A non-success status from the catalog is "no data" and keeps partial
//! results. A transport or decode failure anywhere gives up on the whole
//! resolution and returns the placeholder poster without a trailer.
//! `resolve` never fails.

use std::sync::Arc;

use data_loader::MovieId;
use reqwest::Url;
use tracing::{debug, instrument, warn};

use crate::cache::MetadataCache;
use crate::catalog::MediaCatalog;
use crate::types::{MediaAssets, MediaKey};

pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";
pub const DEFAULT_PLACEHOLDER_POSTER_URL: &str =
    "https://placehold.co/300x450/1a1a1a/e50914?text=Poster%0ANot%0AAvailable";
const TRAILER_WATCH_URL: &str = "https://www.youtube.com/watch";
const TRAILER_SEARCH_URL: &str = "https://www.youtube.com/results";

/// Fixed URLs the enricher builds asset links from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetUrls {
    /// Prefix for catalog poster paths (which start with `/`)
    pub image_base_url: String,
    pub placeholder_poster_url: String,
}

impl Default for AssetUrls {
    fn default() -> Self {
        Self {
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            placeholder_poster_url: DEFAULT_PLACEHOLDER_POSTER_URL.to_string(),
        }
    }
}

impl AssetUrls {
    pub fn poster(&self, poster_path: &str) -> String {
        format!("{}{}", self.image_base_url, poster_path)
    }

    pub fn trailer(&self, video_key: &str) -> String {
        format!("{}?v={}", TRAILER_WATCH_URL, video_key)
    }

    /// YouTube search for "<title> trailer", query-encoded
    pub fn trailer_search(&self, title: &str) -> String {
        let query = format!("{} trailer", title);
        match Url::parse_with_params(TRAILER_SEARCH_URL, &[("search_query", query.as_str())]) {
            Ok(url) => url.into(),
            Err(_) => format!("{}?search_query={}", TRAILER_SEARCH_URL, query.replace(' ', "+")),
        }
    }

    pub fn placeholder(&self) -> MediaAssets {
        MediaAssets {
            poster_url: self.placeholder_poster_url.clone(),
            trailer_url: None,
        }
    }
}

/// What has been resolved so far
#[derive(Debug, Default)]
struct Resolution {
    poster: Option<String>,
    trailer: Option<String>,
}

impl Resolution {
    fn needs_poster(&self) -> bool {
        self.poster.is_none()
    }

    fn needs_trailer(&self) -> bool {
        self.trailer.is_none()
    }

    /// Apply the defaults for whatever is still missing
    fn finish(self, title: Option<&str>, urls: &AssetUrls) -> MediaAssets {
        MediaAssets {
            poster_url: self
                .poster
                .unwrap_or_else(|| urls.placeholder_poster_url.clone()),
            trailer_url: self
                .trailer
                .or_else(|| title.map(|t| urls.trailer_search(t))),
        }
    }
}

/// Resolves [`MediaAssets`] through a [`MediaCatalog`], memoized in a
/// [`MetadataCache`].
pub struct MetadataEnricher {
    catalog: Arc<dyn MediaCatalog>,
    cache: Arc<dyn MetadataCache>,
    urls: AssetUrls,
}

impl MetadataEnricher {
    pub fn new(
        catalog: Arc<dyn MediaCatalog>,
        cache: Arc<dyn MetadataCache>,
        urls: AssetUrls,
    ) -> Self {
        Self {
            catalog,
            cache,
            urls,
        }
    }

    pub fn urls(&self) -> &AssetUrls {
        &self.urls
    }

    /// Poster and trailer for a movie. Never fails; see the module docs.
    #[instrument(skip(self))]
    pub async fn resolve(
        &self,
        movie_id: MovieId,
        title: Option<&str>,
        release_date: Option<&str>,
    ) -> MediaAssets {
        let key = MediaKey::new(movie_id, title, release_date);
        if let Some(assets) = self.cache.get(&key) {
            debug!("Media cache hit");
            return assets;
        }

        let title = title.filter(|t| !t.is_empty());
        let release_date = release_date.filter(|d| !d.is_empty());

        let assets = match self.resolve_uncached(movie_id, title, release_date).await {
            Ok(assets) => assets,
            Err(e) => {
                warn!(error = %e, "Media lookup failed, using placeholder");
                self.urls.placeholder()
            }
        };

        self.cache.insert(key, assets.clone());
        assets
    }

    async fn resolve_uncached(
        &self,
        movie_id: MovieId,
        title: Option<&str>,
        release_date: Option<&str>,
    ) -> tmdb_client::Result<MediaAssets> {
        let mut resolution = Resolution::default();

        self.lookup_by_id(i64::from(movie_id), &mut resolution).await?;

        if let Some(title) = title {
            if resolution.needs_poster() {
                self.search_by_title(title, release_date, &mut resolution)
                    .await?;
            }
        }

        Ok(resolution.finish(title, &self.urls))
    }

    /// Step 1: detail record, then its videos if the record was found
    async fn lookup_by_id(
        &self,
        movie_id: i64,
        resolution: &mut Resolution,
    ) -> tmdb_client::Result<()> {
        let Some(details) = self.catalog.movie_details(movie_id).await? else {
            debug!(movie_id, "No detail record");
            return Ok(());
        };

        resolution.poster = details
            .poster_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| self.urls.poster(p));
        resolution.trailer = self.find_trailer(movie_id).await?;
        Ok(())
    }

    /// Step 2: title search, narrowed by year when one can be derived
    async fn search_by_title(
        &self,
        title: &str,
        release_date: Option<&str>,
        resolution: &mut Resolution,
    ) -> tmdb_client::Result<()> {
        let year = release_date.and_then(release_year);

        let mut results = self
            .catalog
            .search_movies(title, year)
            .await?
            .unwrap_or_default();
        if results.is_empty() && year.is_some() {
            debug!(title, "No results with year, retrying without");
            results = self
                .catalog
                .search_movies(title, None)
                .await?
                .unwrap_or_default();
        }

        let Some(hit) = results.into_iter().next() else {
            debug!(title, "Search found nothing");
            return Ok(());
        };

        if resolution.needs_poster() {
            resolution.poster = hit
                .poster_path
                .as_deref()
                .filter(|p| !p.is_empty())
                .map(|p| self.urls.poster(p));
        }
        if resolution.needs_trailer() {
            if let Some(hit_id) = hit.id {
                resolution.trailer = self.find_trailer(hit_id).await?;
            }
        }
        Ok(())
    }

    /// Watch link for the first YouTube trailer, in catalog order
    async fn find_trailer(&self, movie_id: i64) -> tmdb_client::Result<Option<String>> {
        let videos = self.catalog.movie_videos(movie_id).await?.unwrap_or_default();
        Ok(videos
            .iter()
            .find(|v| v.is_youtube_trailer())
            .map(|v| self.urls.trailer(&v.key)))
    }
}

/// Year from the first four characters of a release date, if numeric
fn release_year(release_date: &str) -> Option<u16> {
    release_date.get(..4)?.parse().ok()
}
