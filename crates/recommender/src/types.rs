//! Output types of the recommender.

use data_loader::{MovieId, MovieRecord, RowIndex};
use serde::Serialize;

/// A recommended movie: the record's display fields plus its similarity
/// to the query movie.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationResult {
    pub row: RowIndex,
    pub movie_id: MovieId,
    pub title: String,
    pub similarity_score: f32,
    pub genres: String,
    pub release_date: Option<String>,
    pub vote_average: f32,
    pub overview: String,
    pub cast: String,
    pub director: String,
}

impl RecommendationResult {
    pub fn from_record(row: RowIndex, movie: &MovieRecord, similarity_score: f32) -> Self {
        Self {
            row,
            movie_id: movie.id,
            title: movie.title.clone(),
            similarity_score,
            genres: movie.genres.clone(),
            release_date: movie.release_date.clone(),
            vote_average: movie.vote_average,
            overview: movie.overview.clone(),
            cast: movie.cast.clone(),
            director: movie.director.clone(),
        }
    }
}
