//! Server crate for the Cinepolis recommender.
//!
//! This crate contains the orchestrator that turns a selected title into
//! enriched recommendations, plus the pieces it is built from: the media
//! catalog seam, the metadata enricher, its cache, and configuration.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod enricher;
pub mod orchestrator;
pub mod types;

pub use cache::{MetadataCache, TtlCache};
pub use catalog::MediaCatalog;
pub use config::Config;
pub use enricher::{AssetUrls, MetadataEnricher};
pub use orchestrator::{MovieRecommendation, RecommendationOrchestrator};
pub use types::{MediaAssets, MediaKey};
