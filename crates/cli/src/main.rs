use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{DataIndex, MovieRecord};
use recommender::{RecommendError, RecommendationResult};
use server::{Config, MediaAssets, MovieRecommendation, RecommendationOrchestrator};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Cinepolis - Movie Recommendation Engine
#[derive(Parser)]
#[command(name = "cinepolis")]
#[command(about = "Content-based movie recommendations with posters and trailers", long_about = None)]
struct Cli {
    /// Directory holding movies.dat and similarity.dat (overrides DATA_DIR)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get movies similar to a title
    Recommend {
        /// Exact title of the selected movie
        #[arg(long)]
        title: String,

        /// Number of recommendations to return
        #[arg(long, default_value = "5")]
        count: usize,

        /// Skip poster and trailer lookups
        #[arg(long)]
        no_media: bool,

        /// Show overview, cast and director for each recommendation
        #[arg(long)]
        explain: bool,
    },

    /// Search for movies by title
    Search {
        /// Movie title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,
    },

    /// Show one movie with its poster and trailer
    Movie {
        /// Exact title of the movie
        #[arg(long)]
        title: String,
    },

    /// Run benchmark to test ranking performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(data_dir) = cli.data_dir {
        debug!("Data directory overridden on the command line");
        config.data_dir = data_dir;
    }

    info!(data_dir = %config.data_dir.display(), "Loading dataset");
    let start = Instant::now();
    let data_index = Arc::new(
        DataIndex::load_from_files(&config.data_dir).context("Failed to load dataset")?,
    );
    info!(
        movies = data_index.len(),
        elapsed = ?start.elapsed(),
        "Dataset loaded"
    );
    println!("{} Loaded {} movies", "✓".green(), data_index.len());

    let orchestrator = RecommendationOrchestrator::from_config(data_index, &config)?;

    match cli.command {
        Commands::Recommend {
            title,
            count,
            no_media,
            explain,
        } => handle_recommend(&orchestrator, &title, count, no_media, explain).await?,
        Commands::Search { title } => handle_search(orchestrator.data_index(), &title),
        Commands::Movie { title } => handle_movie(&orchestrator, &title).await,
        Commands::Benchmark { requests } => handle_benchmark(&orchestrator, requests).await?,
    }

    Ok(())
}

/// Handle the 'recommend' command
async fn handle_recommend(
    orchestrator: &RecommendationOrchestrator,
    title: &str,
    count: usize,
    no_media: bool,
    explain: bool,
) -> Result<()> {
    let outcome = if no_media {
        orchestrator.recommend(title, count).map(|picks| {
            picks
                .into_iter()
                .map(|movie| (movie, None))
                .collect::<Vec<_>>()
        })
    } else {
        orchestrator
            .get_recommendations(title, count)
            .await
            .map(|recs| {
                recs.into_iter()
                    .map(|MovieRecommendation { movie, media }| (movie, Some(media)))
                    .collect::<Vec<_>>()
            })
    };

    match outcome {
        Ok(recommendations) => {
            print_recommendations(title, &recommendations, explain);
            Ok(())
        }
        Err(RecommendError::NotFound { .. }) => {
            println!("{}", "Movie not found!".red().bold());
            suggest_titles(orchestrator.data_index(), title);
            Ok(())
        }
        Err(e) => Err(anyhow!(e)),
    }
}

/// Handle the 'search' command
fn handle_search(data_index: &DataIndex, title: &str) {
    let rows = data_index.search_titles(title);

    println!("{}", format!("Search results for '{}':", title).bold().blue());
    if rows.is_empty() {
        println!("  (no matches)");
        return;
    }
    for movie in rows.iter().take(20).filter_map(|&row| data_index.get_movie(row)) {
        println!(
            "{}: {} ({}) [{}] rating {:.1}",
            movie.id,
            movie.title,
            year_of(movie.release_date.as_deref()),
            movie.genres,
            movie.vote_average
        );
    }
}

/// Handle the 'movie' command
async fn handle_movie(orchestrator: &RecommendationOrchestrator, title: &str) {
    let data_index = orchestrator.data_index();
    let Some(movie) = data_index
        .find_by_title(title)
        .and_then(|row| data_index.get_movie(row))
    else {
        println!("{}", "Movie not found!".red().bold());
        suggest_titles(data_index, title);
        return;
    };

    let media = orchestrator.resolve_media(movie).await;
    print_movie(movie, &media);
}

/// Handle the 'benchmark' command
async fn handle_benchmark(orchestrator: &RecommendationOrchestrator, requests: usize) -> Result<()> {
    let data_index = orchestrator.data_index();
    if data_index.is_empty() || requests == 0 {
        return Err(anyhow!("Nothing to benchmark"));
    }

    // Random titles from the table
    let titles: Vec<String> = (0..requests)
        .filter_map(|_| {
            let row = rand::random_range(0..data_index.len());
            data_index.get_movie(row).map(|m| m.title.clone())
        })
        .collect();

    let wall_clock = Instant::now();
    let mut handles = vec![];
    for title in titles {
        let orchestrator = orchestrator.clone();
        let handle = tokio::task::spawn_blocking(move || {
            let start = Instant::now();
            orchestrator.recommend(&title, 5)?;
            Ok::<_, RecommendError>(start.elapsed())
        });
        handles.push(handle);
    }

    let mut timings: Vec<Duration> = vec![];
    for handle in handles {
        let elapsed = handle.await??;
        timings.push(elapsed);
    }
    let total_time = wall_clock.elapsed();

    let latency_sum: Duration = timings.iter().sum();
    let avg_latency = latency_sum / (timings.len() as u32);
    timings.sort();
    let percentile = |p: f32| timings[((timings.len() as f32 * p) as usize).min(timings.len() - 1)];
    let throughput = timings.len() as f32 / total_time.as_secs_f32();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {}", timings.len());
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

fn suggest_titles(data_index: &DataIndex, title: &str) {
    let rows = data_index.search_titles(title);
    if rows.is_empty() {
        return;
    }
    println!("Did you mean:");
    for movie in rows.iter().take(5).filter_map(|&row| data_index.get_movie(row)) {
        println!("  - {}", movie.title);
    }
}

fn year_of(release_date: Option<&str>) -> &str {
    release_date
        .and_then(|date| date.get(..4))
        .unwrap_or("????")
}

fn print_movie(movie: &MovieRecord, media: &MediaAssets) {
    println!(
        "{}",
        format!("{} ({})", movie.title, year_of(movie.release_date.as_deref()))
            .bold()
            .blue()
    );
    println!("{}Rating: {:.1}/10", "• ".green(), movie.vote_average);
    println!("{}Genres: {}", "• ".green(), movie.genres);
    println!("{}Director: {}", "• ".green(), movie.director);
    println!("{}Cast: {}", "• ".green(), movie.cast);
    println!("{}Poster: {}", "• ".cyan(), media.poster_url);
    match &media.trailer_url {
        Some(url) => println!("{}Trailer: {}", "• ".cyan(), url),
        None => println!("{}Trailer: {}", "• ".cyan(), "not available".dimmed()),
    }
    println!();
    println!("{}", movie.overview);
}

/// Helper function to format and print recommendations
fn print_recommendations(
    title: &str,
    recommendations: &[(RecommendationResult, Option<MediaAssets>)],
    explain: bool,
) {
    println!(
        "{}",
        format!("Because you liked '{}':", title).bold().blue()
    );
    for (i, (movie, media)) in recommendations.iter().enumerate() {
        println!(
            "{}. {} ({}) [{}] - Rating: {:.1} - Similarity: {:.3}",
            (i + 1).to_string().green(),
            movie.title,
            year_of(movie.release_date.as_deref()),
            movie.genres,
            movie.vote_average,
            movie.similarity_score
        );
        if let Some(media) = media {
            println!("   Poster: {}", media.poster_url);
            if let Some(trailer) = &media.trailer_url {
                println!("   Trailer: {}", trailer);
            }
        }
        if explain {
            println!("   Director: {}", movie.director);
            println!("   Cast: {}", movie.cast);
            println!("   {}", movie.overview.dimmed());
        }
    }
}
