//! # Recommender Service
//!
//! Owns the current [`SimilarityIndex`] and answers queries against it:
//! 1. Build the first index off the async runtime
//! 2. Hand every query an `Arc` snapshot of the current index
//! 3. Rebuild on demand, one at a time, and publish by swapping the `Arc`
//!
//! A query that grabbed a snapshot keeps reading it even if a rebuild
//! publishes a new index meanwhile. A failed rebuild publishes nothing.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use catalog::Catalog;
use ranking::{Recommendation, TitleMatch};
use similarity::{SimilarityIndex, VectorizerConfig};

/// Limits and build settings for the service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Recommendations returned when the caller does not ask for a count
    pub default_limit: usize,
    /// Upper bound on recommendations per request
    pub max_limit: usize,
    pub vectorizer: VectorizerConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: 20,
            vectorizer: VectorizerConfig::default(),
        }
    }
}

impl ServiceConfig {
    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }

    pub fn with_max_limit(mut self, limit: usize) -> Self {
        self.max_limit = limit;
        self
    }

    pub fn with_vectorizer(mut self, vectorizer: VectorizerConfig) -> Self {
        self.vectorizer = vectorizer;
        self
    }
}

struct Shared {
    current: RwLock<Arc<SimilarityIndex>>,
    rebuild_lock: Mutex<()>,
    generation: AtomicU64,
    last_build_micros: AtomicU64,
    config: ServiceConfig,
}

/// Cloneable handle to the recommender; clones share the same index
#[derive(Clone)]
pub struct RecommenderService {
    shared: Arc<Shared>,
}

impl RecommenderService {
    /// Build the first index and start serving it
    ///
    /// # Arguments
    /// * `catalog` - The catalog to index
    /// * `config` - Limits and vectorizer settings
    #[instrument(skip_all)]
    pub async fn start(catalog: impl Into<Arc<Catalog>>, config: ServiceConfig) -> Result<Self> {
        let (index, elapsed) = build_index(catalog.into(), config.vectorizer.clone()).await?;
        info!("Recommender ready: {} items in {:?}", index.len(), elapsed);

        Ok(Self {
            shared: Arc::new(Shared {
                current: RwLock::new(Arc::new(index)),
                rebuild_lock: Mutex::new(()),
                generation: AtomicU64::new(1),
                last_build_micros: AtomicU64::new(elapsed.as_micros() as u64),
                config,
            }),
        })
    }

    /// Load a CSV dataset and start serving it
    pub async fn start_from_path(path: impl AsRef<Path>, config: ServiceConfig) -> Result<Self> {
        let catalog = load_catalog(path.as_ref()).await?;
        Self::start(catalog, config).await
    }

    /// The index currently being served
    pub fn snapshot(&self) -> Arc<SimilarityIndex> {
        let guard = self
            .shared
            .current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&guard)
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.shared.config
    }

    /// Number of successful builds so far (the initial build counts)
    pub fn generation(&self) -> u64 {
        self.shared.generation.load(Ordering::Acquire)
    }

    /// Wall time of the most recent successful build
    pub fn last_build_time(&self) -> Duration {
        Duration::from_micros(self.shared.last_build_micros.load(Ordering::Acquire))
    }

    /// Up to `n` items most similar to `title`, capped at `max_limit`
    pub fn recommend(&self, title: &str, n: usize) -> Vec<Recommendation> {
        let max = self.shared.config.max_limit;
        let n = if n > max {
            debug!("Requested {} recommendations, capping at {}", n, max);
            max
        } else {
            n
        };

        ranking::recommend(&self.snapshot(), title, n)
    }

    /// Recommendations using the configured default count
    pub fn recommend_default(&self, title: &str) -> Vec<Recommendation> {
        self.recommend(title, self.shared.config.default_limit)
    }

    /// Sorted distinct titles of the current catalog
    pub fn titles(&self) -> Vec<String> {
        ranking::all_titles(&self.snapshot())
    }

    pub fn search(&self, query: &str, limit: usize) -> Vec<TitleMatch> {
        ranking::search_titles(&self.snapshot(), query, limit)
    }

    /// Build a new index from `catalog` and publish it.
    ///
    /// Rebuilds are serialized. On error the current index stays in place.
    #[instrument(skip_all)]
    pub async fn rebuild(&self, catalog: impl Into<Arc<Catalog>>) -> Result<u64> {
        let _guard = self.shared.rebuild_lock.lock().await;

        let catalog = catalog.into();
        let items = catalog.len();
        let (index, elapsed) =
            match build_index(catalog, self.shared.config.vectorizer.clone()).await {
                Ok(built) => built,
                Err(e) => {
                    warn!("Rebuild failed, keeping generation {}: {:#}", self.generation(), e);
                    return Err(e);
                }
            };

        {
            let mut current = self
                .shared
                .current
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            *current = Arc::new(index);
        }
        self.shared
            .last_build_micros
            .store(elapsed.as_micros() as u64, Ordering::Release);
        let generation = self.shared.generation.fetch_add(1, Ordering::AcqRel) + 1;

        info!(
            "Published generation {} ({} items, built in {:?})",
            generation, items, elapsed
        );
        Ok(generation)
    }

    /// Re-read a CSV dataset and rebuild from it
    pub async fn reload(&self, path: impl AsRef<Path>) -> Result<u64> {
        let catalog = load_catalog(path.as_ref()).await?;
        self.rebuild(catalog).await
    }
}

/// Run the CPU-bound build on the blocking pool
async fn build_index(
    catalog: Arc<Catalog>,
    vectorizer: VectorizerConfig,
) -> Result<(SimilarityIndex, Duration)> {
    let built = tokio::task::spawn_blocking(move || {
        let start = Instant::now();
        SimilarityIndex::build_with(catalog, &vectorizer).map(|index| (index, start.elapsed()))
    })
    .await
    .context("Index build task panicked")?;

    built.context("Failed to build similarity index")
}

async fn load_catalog(path: &Path) -> Result<Catalog> {
    let owned = path.to_path_buf();
    let catalog = tokio::task::spawn_blocking(move || catalog::normalizer::load_csv(&owned))
        .await
        .context("Catalog load task panicked")?;

    catalog.with_context(|| format!("Failed to load catalog from {}", path.display()))
}
