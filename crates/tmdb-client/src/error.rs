use thiserror::Error;

/// Errors that can occur when talking to TMDB
#[derive(Error, Debug)]
pub enum TmdbError {
    /// Transport failure: DNS, connect, timeout, body read
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// TMDB answered with a non-success status
    #[error("TMDB API error {status_code}: {message}")]
    Api { status_code: u16, message: String },

    /// The body did not match the expected shape
    #[error("Failed to decode response at '{path}': {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl TmdbError {
    /// True when TMDB responded but with a non-success status.
    ///
    /// Callers treat this as "no data" rather than a failure.
    pub fn is_api_status(&self) -> bool {
        matches!(self, TmdbError::Api { .. })
    }
}
