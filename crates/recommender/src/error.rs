use thiserror::Error;

/// Reasons a recommendation request cannot be answered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecommendError {
    /// The query title is not in the movie table
    #[error("Movie not found: {title}")]
    NotFound { title: String },

    /// At least one recommendation must be requested
    #[error("Recommendation count must be at least 1")]
    InvalidCount,
}

pub type Result<T> = std::result::Result<T, RecommendError>;
