use crate::{
    models::{MovieSummary, PaginatedResponse},
    TmdbClient,
};

/// Parameters for GET /search/movie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMovieParams {
    pub query: String,
    /// Restrict to a release year
    pub year: Option<u16>,
}

impl SearchMovieParams {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            year: None,
        }
    }

    pub fn year(mut self, year: u16) -> Self {
        self.year = Some(year);
        self
    }
}

impl TmdbClient {
    /// Search movies by title, optionally filtered by release year
    ///
    /// GET /search/movie
    pub async fn search_movie(
        &self,
        params: &SearchMovieParams,
    ) -> crate::Result<PaginatedResponse<MovieSummary>> {
        let url = self.url("/search/movie");

        let mut query = vec![
            ("api_key", self.api_key().to_string()),
            ("query", params.query.clone()),
        ];
        if let Some(year) = params.year {
            query.push(("year", year.to_string()));
        }

        let response = self.client().get(&url).query(&query).send().await?;
        self.handle_response(response).await
    }
}
