//! Simple test harness for the recommendation orchestrator.
//!
//! Loads the dataset named by the configuration and prints enriched
//! recommendations for one title (the first argument, or the first movie
//! in the table).

use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use tracing::info;

use data_loader::DataIndex;
use server::{Config, RecommendationOrchestrator};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info,server=debug,recommender=debug")
        .init();

    info!("Starting Cinepolis orchestrator test harness");

    let config = Config::from_env()?;

    info!("Loading data index from {:?}...", config.data_dir);
    let data_index = Arc::new(
        DataIndex::load_from_files(&config.data_dir).context("Failed to load dataset")?,
    );
    info!("Data index loaded successfully");

    let orchestrator = RecommendationOrchestrator::from_config(data_index.clone(), &config)?;

    let title = match std::env::args().nth(1) {
        Some(title) => title,
        None => data_index
            .get_movie(0)
            .map(|m| m.title.clone())
            .ok_or_else(|| anyhow!("Dataset is empty"))?,
    };
    let limit = 5;

    info!("Getting recommendations for '{}' (limit: {})", title, limit);
    let recommendations = orchestrator.get_recommendations(&title, limit).await?;

    info!("Received {} recommendations:", recommendations.len());
    for (i, rec) in recommendations.iter().enumerate() {
        info!(
            "{}. {} ({}) - Similarity: {:.3} - Rating: {}/10",
            i + 1,
            rec.movie.title,
            rec.movie.release_date.as_deref().unwrap_or("????"),
            rec.movie.similarity_score,
            rec.movie.vote_average
        );
        info!("   Poster: {}", rec.media.poster_url);
        info!(
            "   Trailer: {}",
            rec.media.trailer_url.as_deref().unwrap_or("-")
        );
    }

    Ok(())
}
