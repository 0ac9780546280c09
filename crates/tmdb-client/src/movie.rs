use crate::{
    models::{MovieDetails, VideoList},
    TmdbClient,
};

impl TmdbClient {
    /// Get movie details
    ///
    /// GET /movie/{movie_id}
    pub async fn get_movie(&self, movie_id: i64) -> crate::Result<MovieDetails> {
        let url = self.url(&format!("/movie/{}", movie_id));
        let response = self
            .client()
            .get(&url)
            .query(&[("api_key", self.api_key())])
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Get the videos (trailers, teasers, clips) attached to a movie
    ///
    /// GET /movie/{movie_id}/videos
    pub async fn get_movie_videos(&self, movie_id: i64) -> crate::Result<VideoList> {
        let url = self.url(&format!("/movie/{}/videos", movie_id));
        let response = self
            .client()
            .get(&url)
            .query(&[("api_key", self.api_key())])
            .send()
            .await?;
        self.handle_response(response).await
    }
}
