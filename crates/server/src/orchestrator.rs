//! # Recommendation Orchestrator
//!
//! Coordinates one recommendation round:
//! 1. Rank similar movies for the selected title (in-process, pure)
//! 2. Resolve poster/trailer assets for every pick, one task per movie
//! 3. Return the picks in ranking order with their assets attached
//!
//! Enrichment never fails a round; a movie whose lookup breaks simply gets
//! the placeholder assets.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use data_loader::{DataIndex, MovieRecord};
use recommender::{RecommendError, RecommendationResult, Recommender};
use tmdb_client::TmdbClient;

use crate::cache::TtlCache;
use crate::config::Config;
use crate::enricher::MetadataEnricher;
use crate::types::MediaAssets;

/// Final recommendation returned to the caller
#[derive(Debug, Clone, Serialize)]
pub struct MovieRecommendation {
    pub movie: RecommendationResult,
    pub media: MediaAssets,
}

/// Main orchestrator: load-once data plus the media enricher
#[derive(Clone)]
pub struct RecommendationOrchestrator {
    data_index: Arc<DataIndex>,
    recommender: Recommender,
    enricher: Arc<MetadataEnricher>,
}

impl RecommendationOrchestrator {
    pub fn new(data_index: Arc<DataIndex>, enricher: MetadataEnricher) -> Self {
        let recommender = Recommender::new(data_index.clone());
        Self {
            data_index,
            recommender,
            enricher: Arc::new(enricher),
        }
    }

    /// Wire a TMDB-backed enricher with a TTL cache from configuration
    pub fn from_config(data_index: Arc<DataIndex>, config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout())
            .build()
            .context("Failed to build HTTP client")?;

        let api_key = match &config.tmdb_api_key {
            Some(key) => key.clone(),
            None => {
                warn!("TMDB_API_KEY is not set; posters and trailers will use fallbacks");
                String::new()
            }
        };
        let tmdb = TmdbClient::new(http, api_key).with_base_url(config.tmdb_api_url.clone());
        let cache = TtlCache::new(config.metadata_cache_ttl());

        info!(
            "Media enricher using {} (cache ttl {:?})",
            tmdb.base_url(),
            cache.ttl()
        );

        let enricher = MetadataEnricher::new(Arc::new(tmdb), Arc::new(cache), config.asset_urls());
        Ok(Self::new(data_index, enricher))
    }

    pub fn data_index(&self) -> &Arc<DataIndex> {
        &self.data_index
    }

    /// Similar movies without media lookups
    pub fn recommend(
        &self,
        title: &str,
        count: usize,
    ) -> recommender::Result<Vec<RecommendationResult>> {
        self.recommender.recommend(title, count)
    }

    /// Main entry point: similar movies with posters and trailers
    ///
    /// # Returns
    /// `min(count, R - 1)` recommendations, most similar first, or
    /// `RecommendError::NotFound` for an unknown title.
    pub async fn get_recommendations(
        &self,
        title: &str,
        count: usize,
    ) -> std::result::Result<Vec<MovieRecommendation>, RecommendError> {
        let start_time = Instant::now();

        let picks = self.recommender.recommend(title, count)?;
        info!("Ranked {} similar movies for '{}'", picks.len(), title);

        let recommendations = self.enrich_all(picks).await;

        info!(
            "Total time to get recommendations for '{}': {:.2?}",
            title,
            start_time.elapsed()
        );
        Ok(recommendations)
    }

    /// Media for a single table row
    pub async fn resolve_media(&self, movie: &MovieRecord) -> MediaAssets {
        self.enricher
            .resolve(movie.id, Some(movie.title.as_str()), movie.release_date.as_deref())
            .await
    }

    /// Enrich every pick concurrently, keeping ranking order
    async fn enrich_all(&self, picks: Vec<RecommendationResult>) -> Vec<MovieRecommendation> {
        let handles: Vec<_> = picks
            .iter()
            .map(|pick| {
                let enricher = self.enricher.clone();
                let movie_id = pick.movie_id;
                let title = pick.title.clone();
                let release_date = pick.release_date.clone();
                tokio::spawn(async move {
                    enricher
                        .resolve(movie_id, Some(title.as_str()), release_date.as_deref())
                        .await
                })
            })
            .collect();

        let mut recommendations = Vec::with_capacity(picks.len());
        for (pick, handle) in picks.into_iter().zip(handles) {
            let media = match handle.await {
                Ok(media) => media,
                Err(e) => {
                    warn!(movie_id = pick.movie_id, error = %e, "Enrichment task failed");
                    self.enricher.urls().placeholder()
                }
            };
            recommendations.push(MovieRecommendation { movie: pick, media });
        }
        recommendations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MockMediaCatalog;
    use crate::enricher::{AssetUrls, DEFAULT_PLACEHOLDER_POSTER_URL};
    use data_loader::SimilarityMatrix;
    use std::time::Duration;
    use tmdb_client::{MovieDetails, TmdbError, Video};

    // ============================================================================
    // Test Fixtures
    // ============================================================================

    fn record(id: u32, title: &str, release_date: &str) -> MovieRecord {
        MovieRecord {
            id,
            title: title.to_string(),
            genres: "Action, Science Fiction".to_string(),
            release_date: Some(release_date.to_string()),
            vote_average: 7.5,
            overview: format!("{} overview", title),
            cast: "Keanu Reeves".to_string(),
            director: "The Wachowskis".to_string(),
        }
    }

    /// A small table with an aligned matrix
    fn build_test_data_index() -> Arc<DataIndex> {
        let movies = vec![
            record(603, "The Matrix", "1999-03-30"),
            record(604, "The Matrix Reloaded", "2003-05-15"),
            record(605, "The Matrix Revolutions", "2003-11-05"),
            record(862, "Toy Story", "1995-10-30"),
        ];
        let matrix = SimilarityMatrix::from_rows(vec![
            vec![1.0, 0.9, 0.8, 0.1],
            vec![0.9, 1.0, 0.95, 0.1],
            vec![0.8, 0.95, 1.0, 0.1],
            vec![0.1, 0.1, 0.1, 1.0],
        ])
        .unwrap();
        Arc::new(DataIndex::new(movies, matrix).unwrap())
    }

    /// Catalog whose posters are `/{id}.jpg` and trailers `trailer-{id}`;
    /// id 605 fails to decode.
    fn build_mock_catalog() -> MockMediaCatalog {
        let mut catalog = MockMediaCatalog::new();
        catalog.expect_movie_details().returning(|id| {
            if id == 605 {
                return Err(TmdbError::Json {
                    path: "poster_path".to_string(),
                    source: serde_json::from_str::<u8>("x").unwrap_err(),
                });
            }
            Ok(Some(MovieDetails {
                id,
                poster_path: Some(format!("/{}.jpg", id)),
                ..Default::default()
            }))
        });
        catalog.expect_movie_videos().returning(|id| {
            Ok(Some(vec![Video {
                key: format!("trailer-{}", id),
                site: "YouTube".to_string(),
                kind: "Trailer".to_string(),
                ..Default::default()
            }]))
        });
        catalog.expect_search_movies().never();
        catalog
    }

    fn build_test_orchestrator() -> RecommendationOrchestrator {
        let enricher = MetadataEnricher::new(
            Arc::new(build_mock_catalog()),
            Arc::new(TtlCache::new(Duration::from_secs(100))),
            AssetUrls::default(),
        );
        RecommendationOrchestrator::new(build_test_data_index(), enricher)
    }

    // ============================================================================
    // Unit Tests
    // ============================================================================

    #[tokio::test]
    async fn test_get_recommendations_keeps_ranking_order() {
        let orchestrator = build_test_orchestrator();

        let recs = orchestrator
            .get_recommendations("The Matrix Reloaded", 3)
            .await
            .expect("recommendations failed");

        let titles: Vec<_> = recs.iter().map(|r| r.movie.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["The Matrix Revolutions", "The Matrix", "Toy Story"]
        );
        assert!(
            recs.windows(2)
                .all(|w| w[0].movie.similarity_score >= w[1].movie.similarity_score)
        );
    }

    #[tokio::test]
    async fn test_get_recommendations_attaches_media() {
        let orchestrator = build_test_orchestrator();

        let recs = orchestrator
            .get_recommendations("Toy Story", 2)
            .await
            .expect("recommendations failed");

        let matrix = &recs[0];
        assert_eq!(matrix.movie.movie_id, 603);
        assert_eq!(matrix.media.poster_url, "https://image.tmdb.org/t/p/w500/603.jpg");
        assert_eq!(
            matrix.media.trailer_url.as_deref(),
            Some("https://www.youtube.com/watch?v=trailer-603")
        );
    }

    #[tokio::test]
    async fn test_failed_enrichment_degrades_to_placeholder() {
        let orchestrator = build_test_orchestrator();

        let recs = orchestrator
            .get_recommendations("The Matrix Reloaded", 1)
            .await
            .expect("recommendations failed");

        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].movie.movie_id, 605);
        assert_eq!(recs[0].media.poster_url, DEFAULT_PLACEHOLDER_POSTER_URL);
        assert_eq!(recs[0].media.trailer_url, None);
    }

    #[tokio::test]
    async fn test_unknown_title_is_not_found() {
        let orchestrator = build_test_orchestrator();

        let result = orchestrator.get_recommendations("The Matrix Resurrections", 5).await;
        assert!(matches!(result, Err(RecommendError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_resolve_media_for_row() {
        let orchestrator = build_test_orchestrator();
        let movie = orchestrator.data_index().get_movie(3).unwrap().clone();

        let media = orchestrator.resolve_media(&movie).await;
        assert_eq!(media.poster_url, "https://image.tmdb.org/t/p/w500/862.jpg");
    }

    #[test]
    fn test_recommend_without_media() {
        let orchestrator = build_test_orchestrator();

        let recs = orchestrator.recommend("The Matrix", 10).unwrap();
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0].title, "The Matrix Reloaded");
    }

    #[test]
    fn test_from_config_builds_without_api_key() {
        let config = Config::from_vars(Vec::new()).unwrap();
        let orchestrator = RecommendationOrchestrator::from_config(build_test_data_index(), &config);
        assert!(orchestrator.is_ok());
    }
}
