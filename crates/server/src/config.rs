use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::enricher::{AssetUrls, DEFAULT_IMAGE_BASE_URL, DEFAULT_PLACEHOLDER_POSTER_URL};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB v3 API key; without it every lookup degrades to placeholders
    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Prefix for poster paths returned by TMDB
    #[serde(default = "default_image_base_url")]
    pub tmdb_image_base_url: String,

    /// Image shown when no poster can be found
    #[serde(default = "default_placeholder_poster_url")]
    pub placeholder_poster_url: String,

    /// Directory holding movies.dat and similarity.dat
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// How long resolved posters and trailers are reused
    #[serde(default = "default_metadata_cache_ttl_secs")]
    pub metadata_cache_ttl_secs: u64,

    /// Per-request timeout for TMDB calls
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

fn default_tmdb_api_url() -> String {
    tmdb_client::DEFAULT_BASE_URL.to_string()
}

fn default_image_base_url() -> String {
    DEFAULT_IMAGE_BASE_URL.to_string()
}

fn default_placeholder_poster_url() -> String {
    DEFAULT_PLACEHOLDER_POSTER_URL.to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_metadata_cache_ttl_secs() -> u64 {
    100
}

fn default_http_timeout_secs() -> u64 {
    10
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present)
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from explicit key/value pairs
    pub fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> anyhow::Result<Self> {
        envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn asset_urls(&self) -> AssetUrls {
        AssetUrls {
            image_base_url: self.tmdb_image_base_url.clone(),
            placeholder_poster_url: self.placeholder_poster_url.clone(),
        }
    }

    pub fn metadata_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.metadata_cache_ttl_secs)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
