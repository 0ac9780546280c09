//! DataIndex building and validation.
//!
//! Loads both artifacts in parallel, checks that the matrix is aligned with
//! the movie table, and builds the exact-title lookup.

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::Path;
use tracing::{info, warn};

/// File name of the movie table inside the data directory
pub const MOVIES_FILE: &str = "movies.dat";
/// File name of the similarity matrix inside the data directory
pub const SIMILARITY_FILE: &str = "similarity.dat";

impl DataIndex {
    /// Build an index from an already-parsed table and matrix.
    ///
    /// Fails if the matrix size differs from the number of movies.
    pub fn new(movies: Vec<MovieRecord>, similarity: SimilarityMatrix) -> Result<Self> {
        let mut index = Self {
            movies,
            title_index: HashMap::new(),
            similarity,
        };
        index.validate()?;
        index.build_title_index();
        Ok(index)
    }

    /// Load the movie table and similarity matrix from a directory
    ///
    /// Steps:
    /// 1. Parse movies.dat and similarity.dat in parallel
    /// 2. Validate row alignment
    /// 3. Build the title index
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        info!("Loading movie dataset from {:?}", data_dir);

        let movies_path = data_dir.join(MOVIES_FILE);
        let similarity_path = data_dir.join(SIMILARITY_FILE);

        // The matrix is by far the larger artifact; parse both at once
        let (movies, similarity) = rayon::join(
            || parser::parse_movies(&movies_path),
            || parser::parse_similarity_matrix(&similarity_path),
        );
        let movies = movies?;
        let similarity = similarity?;

        info!(
            "Loaded {} movies and a {}x{} similarity matrix",
            movies.len(),
            similarity.size(),
            similarity.size()
        );

        let index = Self::new(movies, similarity)?;
        info!("DataIndex successfully built and validated");
        Ok(index)
    }

    /// Map every title to the first row that carries it.
    ///
    /// Later duplicates are unreachable by exact-title lookup.
    fn build_title_index(&mut self) {
        let mut duplicates = 0usize;
        for (row, movie) in self.movies.iter().enumerate() {
            match self.title_index.entry(movie.title.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(row);
                }
                Entry::Occupied(first) => {
                    duplicates += 1;
                    warn!(
                        title = %movie.title,
                        first_row = *first.get(),
                        duplicate_row = row,
                        "Duplicate title; lookups resolve to the first row"
                    );
                }
            }
        }
        if duplicates > 0 {
            warn!("{} duplicate titles in movie table", duplicates);
        }
    }

    /// Validate that the matrix is aligned with the movie table
    pub fn validate(&self) -> Result<()> {
        if self.similarity.size() != self.movies.len() {
            return Err(DataLoadError::ValidationError(format!(
                "similarity matrix is {}x{} but the movie table has {} rows",
                self.similarity.size(),
                self.similarity.size(),
                self.movies.len()
            )));
        }
        Ok(())
    }
}
