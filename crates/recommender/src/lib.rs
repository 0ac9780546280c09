//! # Recommender Crate
//!
//! Content-based recommendations from a precomputed similarity matrix:
//! "movies most similar to the one you picked".
//!
//! ## Example Usage
//!
//! ```ignore
//! use recommender::Recommender;
//! use data_loader::DataIndex;
//! use std::sync::Arc;
//!
//! let data_index = Arc::new(DataIndex::load_from_files(Path::new("data"))?);
//! let recommender = Recommender::new(data_index);
//!
//! for rec in recommender.recommend("Avatar", 5)? {
//!     println!("{} ({:.3})", rec.title, rec.similarity_score);
//! }
//! ```
//!
//! A title that is not in the table yields `RecommendError::NotFound`;
//! callers show it as "movie not found".

pub mod error;
pub mod similarity;
pub mod types;

pub use error::{RecommendError, Result};
pub use similarity::Recommender;
pub use types::RecommendationResult;
