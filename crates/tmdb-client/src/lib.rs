//! Async client for the three TMDB v3 endpoints the recommender needs:
//! movie details, movie videos, and movie search.
//!
//! Non-success statuses surface as [`TmdbError::Api`] so callers can tell
//! "TMDB said no" apart from transport or decoding failures.

mod client;
mod error;
mod movie;
mod search;
pub mod models;

pub use client::{TmdbClient, DEFAULT_BASE_URL};
pub use error::TmdbError;
pub use models::{MovieDetails, MovieSummary, PaginatedResponse, Video, VideoList};
pub use search::SearchMovieParams;

pub type Result<T> = std::result::Result<T, TmdbError>;
