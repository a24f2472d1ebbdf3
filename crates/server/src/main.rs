//! Simple test harness for the recommender service.
//!
//! Loads a dataset, builds the index and logs recommendations for a title.
//!
//! Usage: `server [DATASET] [TITLE]`

use std::env;

use anyhow::{Context, Result};
use tracing::{info, warn};

use server::{RecommenderService, ServiceConfig};

const DEFAULT_DATASET: &str = "data/IMDB-Movie-Dataset(2023-1951).csv";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server=debug,similarity=debug".into()),
        )
        .init();

    info!("Starting content recommender test harness");

    let mut args = env::args().skip(1);
    let dataset = args.next().unwrap_or_else(|| DEFAULT_DATASET.to_string());

    let service = RecommenderService::start_from_path(&dataset, ServiceConfig::default())
        .await
        .with_context(|| format!("Could not start recommender from {dataset}"))?;

    let title = match args.next() {
        Some(title) => title,
        None => service
            .titles()
            .into_iter()
            .next()
            .context("Catalog has no titles")?,
    };

    let limit = service.config().default_limit;
    info!("Getting recommendations for '{}' (limit: {})", title, limit);
    let recommendations = service.recommend(&title, limit);

    if recommendations.is_empty() {
        warn!("No recommendations found.");
        return Ok(());
    }

    info!("Received {} recommendations:", recommendations.len());
    for rec in &recommendations {
        info!(
            "{}. {} ({}) - Similarity: {:.3}",
            rec.rank,
            rec.row.title,
            rec.row.year.as_deref().unwrap_or("????"),
            rec.similarity
        );
        if let Some(genre) = &rec.row.genre {
            info!("   Genre: {}", genre);
        }
        if let Some(director) = &rec.row.director {
            info!("   Director: {}", director);
        }
    }

    Ok(())
}
