//! Title resolution.

use catalog::Position;
use similarity::SimilarityIndex;

/// Resolve a user-supplied title to a catalog position.
///
/// The title is trimmed and lowercased before lookup. An unknown title is
/// `None`, never an error.
pub fn resolve(index: &SimilarityIndex, title: &str) -> Option<Position> {
    index.titles().lookup(title)
}
