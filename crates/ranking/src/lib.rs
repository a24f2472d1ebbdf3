//! Query side of the recommender.
//!
//! A request goes through three steps:
//! 1. [`resolve`]: title -> catalog position
//! 2. [`rank`]: every other item ordered by similarity, top `n` kept
//! 3. [`project`]: positions -> display rows
//!
//! [`recommend`] runs all three. Nothing here mutates the index, so any
//! number of queries can share one `SimilarityIndex`.

pub mod projection;
pub mod rank;
pub mod resolve;
pub mod titles;

pub use projection::{DisplayRow, Recommendation, project};
pub use rank::rank;
pub use resolve::resolve;
pub use titles::{TitleMatch, all_titles, search_titles};

use similarity::SimilarityIndex;
use tracing::debug;

/// Recommend the `n` items most similar to `title`.
///
/// # Arguments
/// * `index` - A built similarity index
/// * `title` - Query title, matched case-insensitively after trimming
/// * `n` - Maximum number of recommendations
///
/// # Returns
/// Recommendations in rank order. Empty when the title is unknown or `n`
/// is zero; never contains the query item itself.
pub fn recommend(index: &SimilarityIndex, title: &str, n: usize) -> Vec<Recommendation> {
    let Some(query) = resolve(index, title) else {
        debug!("No item titled '{}'", title.trim());
        return Vec::new();
    };

    let ranked = rank(index, query, n);
    debug!(
        "Ranked {} candidates for '{}' (position {})",
        ranked.len(),
        title.trim(),
        query
    );
    project(index, &ranked)
}
