//! Core domain types for the movie table and its similarity matrix.
//!
//! The table and the matrix are joined by row position: row `i` of the
//! matrix (and column `i`) belongs to the `i`-th [`MovieRecord`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// External catalog identifier for a movie (the TMDB id)
pub type MovieId = u32;

/// Position of a movie in the table, and of its row in the similarity matrix
pub type RowIndex = usize;

// =============================================================================
// Movie Records
// =============================================================================

/// One row of the movie table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: MovieId,
    /// Lookup key for recommendations. Assumed unique; the first row wins.
    pub title: String,
    pub genres: String,
    /// Release date as written in the dataset, usually `YYYY-MM-DD`
    pub release_date: Option<String>,
    pub vote_average: f32,
    pub overview: String,
    pub cast: String,
    pub director: String,
}

// =============================================================================
// Similarity Matrix
// =============================================================================

/// Square matrix of precomputed similarity scores, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    scores: Vec<f32>,
}

impl SimilarityMatrix {
    /// Build a matrix from its rows.
    ///
    /// Returns `None` unless every row has exactly `rows.len()` scores.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return None;
        }
        let scores = rows.into_iter().flatten().collect();
        Some(Self { size, scores })
    }

    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.size
    }

    /// Scores of `row` against every movie, or `None` if out of range
    pub fn row(&self, row: RowIndex) -> Option<&[f32]> {
        if row >= self.size {
            return None;
        }
        let start = row * self.size;
        Some(&self.scores[start..start + self.size])
    }

    /// Single score, or `None` if either index is out of range
    pub fn score(&self, row: RowIndex, col: RowIndex) -> Option<f32> {
        self.row(row).and_then(|r| r.get(col).copied())
    }
}

// =============================================================================
// DataIndex - Load-once, Read-only State
// =============================================================================

/// Movie table, title index and similarity matrix, aligned by row.
///
/// Built once at startup and shared behind an `Arc`. There are no mutators
/// after [`DataIndex::new`]; all access is through `&self`.
#[derive(Debug)]
pub struct DataIndex {
    pub(crate) movies: Vec<MovieRecord>,
    /// Exact title to first row carrying that title
    pub(crate) title_index: HashMap<String, RowIndex>,
    pub(crate) similarity: SimilarityMatrix,
}

impl DataIndex {
    /// Get a movie by row
    pub fn get_movie(&self, row: RowIndex) -> Option<&MovieRecord> {
        self.movies.get(row)
    }

    /// Row of the first movie whose title is exactly `title`
    pub fn find_by_title(&self, title: &str) -> Option<RowIndex> {
        self.title_index.get(title).copied()
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    /// Number of movies (equal to the matrix size)
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Case-insensitive substring search over titles.
    ///
    /// Exact (case-insensitive) matches come first, then substring matches;
    /// within each group higher `vote_average` wins, then table order.
    pub fn search_titles(&self, query: &str) -> Vec<RowIndex> {
        let query = query.to_lowercase();
        let mut matches: Vec<(RowIndex, u8)> = self
            .movies
            .iter()
            .enumerate()
            .filter_map(|(row, movie)| {
                let title = movie.title.to_lowercase();
                if title == query {
                    Some((row, 0))
                } else if title.contains(&query) {
                    Some((row, 1))
                } else {
                    None
                }
            })
            .collect();

        matches.sort_by(|a, b| {
            a.1.cmp(&b.1).then_with(|| {
                self.movies[b.0]
                    .vote_average
                    .total_cmp(&self.movies[a.0].vote_average)
            })
        });
        matches.into_iter().map(|(row, _)| row).collect()
    }
}
