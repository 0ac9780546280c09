//! The media catalog seam used by the enricher.
//!
//! Every operation answers `Ok(None)` when the catalog responded with a
//! non-success status ("no data") and `Err` only for transport or decoding
//! failures, which abort the whole resolution.

use async_trait::async_trait;
use tmdb_client::{MovieDetails, MovieSummary, SearchMovieParams, TmdbClient, Video};
use tracing::debug;

/// External movie catalog consumed by the metadata enricher
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaCatalog: Send + Sync {
    /// Detail record for a catalog id
    async fn movie_details(&self, movie_id: i64) -> tmdb_client::Result<Option<MovieDetails>>;

    /// Videos attached to a catalog id, in catalog order
    async fn movie_videos(&self, movie_id: i64) -> tmdb_client::Result<Option<Vec<Video>>>;

    /// Search by title, optionally restricted to a release year
    async fn search_movies(
        &self,
        title: &str,
        year: Option<u16>,
    ) -> tmdb_client::Result<Option<Vec<MovieSummary>>>;
}

#[async_trait]
impl MediaCatalog for TmdbClient {
    async fn movie_details(&self, movie_id: i64) -> tmdb_client::Result<Option<MovieDetails>> {
        no_data_on_status(self.get_movie(movie_id).await)
    }

    async fn movie_videos(&self, movie_id: i64) -> tmdb_client::Result<Option<Vec<Video>>> {
        no_data_on_status(self.get_movie_videos(movie_id).await)
            .map(|list| list.map(|list| list.results))
    }

    async fn search_movies(
        &self,
        title: &str,
        year: Option<u16>,
    ) -> tmdb_client::Result<Option<Vec<MovieSummary>>> {
        let mut params = SearchMovieParams::new(title);
        params.year = year;
        no_data_on_status(self.search_movie(&params).await).map(|page| page.map(|p| p.results))
    }
}

/// Turn a non-success status into `Ok(None)`, keep other errors
fn no_data_on_status<T>(result: tmdb_client::Result<T>) -> tmdb_client::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_api_status() => {
            debug!(error = %e, "Catalog returned no data");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tmdb_client::TmdbError;

    #[test]
    fn test_status_errors_become_no_data() {
        let result: tmdb_client::Result<u8> = Err(TmdbError::Api {
            status_code: 404,
            message: "missing".to_string(),
        });
        assert!(matches!(no_data_on_status(result), Ok(None)));
    }

    #[test]
    fn test_decode_errors_propagate() {
        let source = serde_json_error();
        let result: tmdb_client::Result<u8> = Err(TmdbError::Json {
            path: "id".to_string(),
            source,
        });
        assert!(no_data_on_status(result).is_err());
    }

    #[test]
    fn test_success_is_kept() {
        assert!(matches!(no_data_on_status(Ok(7u8)), Ok(Some(7))));
    }

    fn serde_json_error() -> serde_json::Error {
        serde_json::from_str::<u8>("not json").unwrap_err()
    }
}
