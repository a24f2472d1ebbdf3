use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use ranking::Recommendation;
use server::{RecommenderService, ServiceConfig};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::debug;

/// content-recs - Content-based movie recommendations
#[derive(Parser)]
#[command(name = "content-recs")]
#[command(about = "Recommend movies with similar genre, plot, director and cast", long_about = None)]
struct Cli {
    /// Path to the movie dataset (CSV)
    #[arg(
        short,
        long,
        env = "CONTENT_RECS_DATASET",
        default_value = "data/IMDB-Movie-Dataset(2023-1951).csv"
    )]
    dataset: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get movies similar to a title
    Recommend {
        /// Movie title (case-insensitive)
        #[arg(long)]
        title: String,

        /// Number of recommendations to return (5-20)
        #[arg(long, default_value = "10", value_parser = clap::value_parser!(u16).range(5..=20))]
        limit: u16,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Show the terms each recommendation shares with the query
        #[arg(long)]
        explain: bool,
    },

    /// List titles in the dataset, sorted
    Titles {
        /// Only print the first N titles
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Search for movies by title
    Search {
        /// Movie title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,

        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Show dataset and index statistics
    Stats,

    /// Run benchmark to test query performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "1000")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,

        /// Recommendations per request
        #[arg(long, default_value = "10")]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    // Building the index is the slow part
    eprintln!("Loading dataset from {}...", cli.dataset.display());
    let start = Instant::now();
    let service = RecommenderService::start_from_path(&cli.dataset, ServiceConfig::default())
        .await
        .context("Failed to load movie dataset")?;
    eprintln!(
        "{} Indexed {} movies in {:?}",
        "✓".green(),
        service.snapshot().len(),
        start.elapsed()
    );

    match cli.command {
        Commands::Recommend {
            title,
            limit,
            json,
            explain,
        } => handle_recommend(&service, &title, limit as usize, json, explain)?,
        Commands::Titles { limit } => handle_titles(&service, limit),
        Commands::Search { title, limit } => handle_search(&service, &title, limit),
        Commands::Stats => handle_stats(&service),
        Commands::Benchmark {
            requests,
            concurrent,
            limit,
        } => handle_benchmark(service, requests, concurrent, limit).await?,
    }

    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(
    service: &RecommenderService,
    title: &str,
    limit: usize,
    json: bool,
    explain: bool,
) -> Result<()> {
    let recommendations = service.recommend(title, limit);

    if json {
        println!("{}", serde_json::to_string_pretty(&recommendations)?);
        return Ok(());
    }

    if recommendations.is_empty() {
        println!("{}", "No recommendations found.".yellow());
        return Ok(());
    }

    print_recommendations(title, &recommendations);

    if explain {
        let index = service.snapshot();
        let Some(query) = ranking::resolve(&index, title) else {
            return Ok(());
        };
        println!();
        println!("{}", "Shared terms:".bold());
        for rec in &recommendations {
            let terms: Vec<String> = index
                .shared_terms(query, rec.position)
                .into_iter()
                .take(5)
                .map(|(term, weight)| format!("{term} ({weight:.3})"))
                .collect();
            let terms = if terms.is_empty() {
                "-".to_string()
            } else {
                terms.join(", ")
            };
            println!("{:>3}. {}: {}", rec.rank, rec.row.title, terms);
        }
    }
    Ok(())
}

/// Handle the 'titles' command
fn handle_titles(service: &RecommenderService, limit: Option<usize>) {
    let titles = service.titles();
    let shown = limit.unwrap_or(titles.len());
    for title in titles.iter().take(shown) {
        println!("{title}");
    }
    if shown < titles.len() {
        println!("... and {} more", titles.len() - shown);
    }
}

/// Handle the 'search' command
fn handle_search(service: &RecommenderService, title: &str, limit: usize) {
    let matches = service.search(title, limit);
    let index = service.snapshot();

    println!("{}", format!("Search results for '{}':", title).bold().blue());
    if matches.is_empty() {
        println!("{}", "No matching titles.".yellow());
        return;
    }
    for m in matches {
        let year = index
            .catalog()
            .get(m.position)
            .map(|item| item.year.as_str())
            .filter(|year| !year.is_empty())
            .unwrap_or("????");
        let marker = if m.exact { "=".green() } else { "~".normal() };
        println!("{} {} ({})", marker, m.title, year);
    }
}

/// Handle the 'stats' command
fn handle_stats(service: &RecommenderService) {
    let index = service.snapshot();
    let stats = index.stats();

    println!("{}", "Index statistics:".bold().blue());
    println!("{}Movies: {}", "• ".green(), stats.items);
    println!("{}Distinct titles: {}", "• ".green(), stats.distinct_titles);
    println!(
        "{}Columns: {}",
        "• ".green(),
        index.catalog().columns().names().join(", ")
    );
    println!("{}Vocabulary: {} terms", "• ".cyan(), stats.vocabulary);
    println!("{}Non-zero weights: {}", "• ".cyan(), stats.nonzero_weights);
    println!("{}Movies without terms: {}", "• ".cyan(), stats.zero_vectors);
    println!(
        "{}Similarity matrix: {:.1} MiB",
        "• ".cyan(),
        stats.matrix_bytes as f64 / (1024.0 * 1024.0)
    );
    println!("{}Build time: {:?}", "• ".cyan(), service.last_build_time());
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    service: RecommenderService,
    requests: usize,
    concurrent: usize,
    limit: usize,
) -> Result<()> {
    if requests == 0 || concurrent == 0 {
        bail!("--requests and --concurrent must be positive");
    }

    let titles = Arc::new(service.titles());
    if titles.is_empty() {
        bail!("Dataset has no titles to query");
    }

    let queries: Vec<String> = (0..requests)
        .map(|_| {
            let i = rand::random::<u64>() as usize % titles.len();
            titles[i].clone()
        })
        .collect();

    let permits = Arc::new(Semaphore::new(concurrent));
    let started = Instant::now();

    // Use tokio::spawn to make concurrent requests
    let mut handles = Vec::with_capacity(requests);
    for title in queries {
        let service = service.clone();
        let permits = permits.clone();
        handles.push(tokio::spawn(async move {
            let _permit = permits.acquire_owned().await?;
            let start = Instant::now();
            let recs =
                tokio::task::spawn_blocking(move || service.recommend(&title, limit)).await?;
            debug!("{} recommendations", recs.len());
            Ok::<_, anyhow::Error>(start.elapsed())
        }));
    }

    let mut timings = Vec::with_capacity(requests);
    for handle in handles {
        timings.push(handle.await??);
    }
    let wall = started.elapsed();

    timings.sort();
    let total: Duration = timings.iter().sum();
    let avg_latency = total / timings.len() as u32;
    let percentile = |p: f64| {
        let idx = ((timings.len() as f64 * p) as usize).min(timings.len() - 1);
        timings[idx]
    };
    let throughput = requests as f64 / wall.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {} ({} concurrent)", requests, concurrent);
    println!("Total time: {:?}", wall);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Print recommendations as a ranked list
fn print_recommendations(title: &str, recommendations: &[Recommendation]) {
    println!(
        "{}",
        format!("Movies similar to '{}':", title.trim()).bold().blue()
    );
    for rec in recommendations {
        let mut line = format!("{}. {}", rec.rank.to_string().green(), rec.row.title);
        if let Some(year) = rec.row.year.as_deref().filter(|y| !y.is_empty()) {
            line.push_str(&format!(" ({year})"));
        }
        if let Some(genre) = rec.row.genre.as_deref().filter(|g| !g.is_empty()) {
            line.push_str(&format!(" [{genre}]"));
        }
        line.push_str(&format!(" - Similarity: {:.3}", rec.similarity));
        println!("{line}");
        if let Some(director) = rec.row.director.as_deref().filter(|d| !d.is_empty()) {
            println!("   Director: {director}");
        }
    }
}
