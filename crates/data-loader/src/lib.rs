//! # Data Loader Crate
//!
//! Loads the movie table and its precomputed similarity matrix.
//!
//! ## Main Components
//!
//! - **types**: `MovieRecord`, `SimilarityMatrix`, `DataIndex`
//! - **parser**: Parse movies.dat and similarity.dat
//! - **index**: Validate row alignment and build the title lookup
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::DataIndex;
//! use std::path::Path;
//!
//! let index = DataIndex::load_from_files(Path::new("data"))?;
//!
//! let row = index.find_by_title("Avatar").unwrap();
//! let movie = index.get_movie(row).unwrap();
//! let scores = index.similarity().row(row).unwrap();
//! ```

pub mod error;
pub mod types;
pub mod parser;
pub mod index;

pub use error::{DataLoadError, Result};
pub use index::{MOVIES_FILE, SIMILARITY_FILE};
pub use types::{DataIndex, MovieId, MovieRecord, RowIndex, SimilarityMatrix};
