//! Similarity Recommender - nearest rows of a precomputed matrix
//!
//! ## Algorithm
//! 1. Find the first row whose title equals the query
//! 2. Pair every score in that matrix row with its column index
//! 3. Stable sort by score, highest first (ties keep table order)
//! 4. Skip the query row itself and take the next `count`
//! 5. Project each pick onto its MovieRecord

use crate::error::{RecommendError, Result};
use crate::types::RecommendationResult;
use data_loader::{DataIndex, RowIndex};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Ranks movies by their precomputed similarity to a query movie
#[derive(Clone)]
pub struct Recommender {
    /// Shared reference to the loaded data (read-only, so no lock needed)
    data_index: Arc<DataIndex>,
}

impl Recommender {
    pub fn new(data_index: Arc<DataIndex>) -> Self {
        Self { data_index }
    }

    /// Top `count` movies most similar to `title`, best first.
    ///
    /// Returns `min(count, R - 1)` results and never the query row.
    #[instrument(skip(self))]
    pub fn recommend(&self, title: &str, count: usize) -> Result<Vec<RecommendationResult>> {
        if count == 0 {
            return Err(RecommendError::InvalidCount);
        }

        let query_row = self
            .data_index
            .find_by_title(title)
            .ok_or_else(|| RecommendError::NotFound {
                title: title.to_string(),
            })?;

        let ranked = self.rank_row(query_row);
        debug!("Ranked {} movies against row {}", ranked.len(), query_row);

        let results: Vec<RecommendationResult> = ranked
            .into_iter()
            .filter(|&(row, _)| row != query_row)
            .take(count)
            .filter_map(|(row, score)| {
                let movie = self.data_index.get_movie(row)?;
                Some(RecommendationResult::from_record(row, movie, score))
            })
            .collect();

        debug!("Selected {} recommendations for '{}'", results.len(), title);
        Ok(results)
    }

    /// Every (row, score) pair of the query's matrix row, highest score first
    fn rank_row(&self, query_row: RowIndex) -> Vec<(RowIndex, f32)> {
        let mut ranked: Vec<(RowIndex, f32)> = self
            .data_index
            .similarity()
            .row(query_row)
            .map(|scores| scores.iter().copied().enumerate().collect())
            .unwrap_or_default();

        // `sort_by` is stable, so equal scores stay in row order
        ranked.sort_by(|a, b| descending(a.1, b.1));
        ranked
    }
}

/// NaN ranks below every real score
fn descending(a: f32, b: f32) -> Ordering {
    let key = |s: f32| if s.is_nan() { f32::NEG_INFINITY } else { s };
    key(b).total_cmp(&key(a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{MovieId, MovieRecord, SimilarityMatrix};

    fn record(id: MovieId, title: &str) -> MovieRecord {
        MovieRecord {
            id,
            title: title.to_string(),
            genres: "Drama".to_string(),
            release_date: Some("2001-01-01".to_string()),
            vote_average: 7.0,
            overview: format!("Overview of {}", title),
            cast: "Someone".to_string(),
            director: "Somebody".to_string(),
        }
    }

    fn build_recommender(titles: &[&str], rows: Vec<Vec<f32>>) -> Recommender {
        let movies = titles
            .iter()
            .enumerate()
            .map(|(i, t)| record(i as MovieId + 1, t))
            .collect();
        let matrix = SimilarityMatrix::from_rows(rows).unwrap();
        Recommender::new(Arc::new(DataIndex::new(movies, matrix).unwrap()))
    }

    fn abc() -> Recommender {
        build_recommender(
            &["A", "B", "C"],
            vec![
                vec![1.0, 0.8, 0.3],
                vec![0.8, 1.0, 0.5],
                vec![0.3, 0.5, 1.0],
            ],
        )
    }

    #[test]
    fn test_recommend_orders_by_similarity() {
        let results = abc().recommend("A", 2).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "B");
        assert_eq!(results[0].movie_id, 2);
        assert_eq!(results[0].similarity_score, 0.8);
        assert_eq!(results[1].title, "C");
        assert_eq!(results[1].similarity_score, 0.3);
    }

    #[test]
    fn test_recommend_unknown_title() {
        let result = abc().recommend("Z", 5);
        assert_eq!(
            result,
            Err(RecommendError::NotFound {
                title: "Z".to_string()
            })
        );
    }

    #[test]
    fn test_recommend_zero_count() {
        assert_eq!(abc().recommend("A", 0), Err(RecommendError::InvalidCount));
    }

    #[test]
    fn test_recommend_caps_at_table_size() {
        let results = abc().recommend("C", 10).unwrap();
        let titles: Vec<_> = results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A"]);
    }

    #[test]
    fn test_ties_keep_row_order() {
        let recommender = build_recommender(
            &["Q", "W", "E", "R"],
            vec![
                vec![1.0, 0.5, 0.5, 0.5],
                vec![0.5, 1.0, 0.0, 0.0],
                vec![0.5, 0.0, 1.0, 0.0],
                vec![0.5, 0.0, 0.0, 1.0],
            ],
        );

        let titles: Vec<_> = recommender
            .recommend("Q", 3)
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["W", "E", "R"]);
    }

    #[test]
    fn test_query_excluded_even_when_outranked() {
        // Row 1 scores itself lower than row 0; it must still never appear
        let recommender = build_recommender(
            &["X", "Y", "Z"],
            vec![
                vec![1.0, 0.9, 0.2],
                vec![0.9, 0.9, 0.4],
                vec![0.2, 0.4, 1.0],
            ],
        );

        let results = recommender.recommend("Y", 2).unwrap();
        let titles: Vec<_> = results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["X", "Z"]);
    }

    #[test]
    fn test_nan_scores_rank_last() {
        let recommender = build_recommender(
            &["A", "B", "C"],
            vec![
                vec![1.0, f32::NAN, 0.1],
                vec![f32::NAN, 1.0, 0.0],
                vec![0.1, 0.0, 1.0],
            ],
        );

        let results = recommender.recommend("A", 2).unwrap();
        assert_eq!(results[0].title, "C");
        assert_eq!(results[1].title, "B");
    }

    #[test]
    fn test_results_are_sorted_and_sized() {
        let n = 12;
        let titles: Vec<String> = (0..n).map(|i| format!("Movie {}", i)).collect();
        let title_refs: Vec<&str> = titles.iter().map(String::as_str).collect();
        let rows = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| if i == j { 1.0 } else { ((i * 7 + j * 13) % 10) as f32 / 10.0 })
                    .collect()
            })
            .collect();
        let recommender = build_recommender(&title_refs, rows);

        for title in &title_refs {
            for count in [1, 5, n - 1, n + 3] {
                let results = recommender.recommend(title, count).unwrap();
                assert_eq!(results.len(), count.min(n - 1));
                assert!(results.iter().all(|r| r.title != *title));
                assert!(
                    results
                        .windows(2)
                        .all(|pair| pair[0].similarity_score >= pair[1].similarity_score)
                );
            }
        }
    }
}
