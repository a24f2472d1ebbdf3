//! Ordering candidates by similarity to a query item.

use catalog::Position;
use similarity::SimilarityIndex;

/// Rank every item except `query` by similarity, most similar first.
///
/// Ties keep catalog order (the sort is stable). At most `n` pairs are
/// returned; an out-of-range `query` yields nothing.
pub fn rank(index: &SimilarityIndex, query: Position, n: usize) -> Vec<(Position, f64)> {
    if n == 0 {
        return Vec::new();
    }
    let Some(row) = index.matrix().row(query) else {
        return Vec::new();
    };

    let mut scored: Vec<(Position, f64)> = row
        .iter()
        .enumerate()
        .filter(|(position, _)| *position != query)
        .map(|(position, &score)| (position, score))
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(n);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{Catalog, Columns, Item};

    fn create_test_index() -> SimilarityIndex {
        let catalog = Catalog::from_items(
            vec![
                Item::new("Q", "drama", "river village"),
                Item::new("X", "comedy", "office party"),
                Item::new("Y", "drama", "river village"),
                Item::new("Z", "horror", "haunted house"),
            ],
            Columns::required_only(),
        );
        SimilarityIndex::build(catalog).unwrap()
    }

    #[test]
    fn test_excludes_query_and_sorts_descending() {
        let index = create_test_index();
        let ranked = rank(&index, 0, 10);

        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].0, 2);
        assert!(ranked.iter().all(|(p, _)| *p != 0));
        assert!(ranked.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let index = create_test_index();
        let ranked = rank(&index, 0, 10);

        // X and Z share nothing with Q: both score 0.0, X first
        assert_eq!(ranked[1], (1, 0.0));
        assert_eq!(ranked[2], (3, 0.0));
    }

    #[test]
    fn test_zero_and_out_of_range() {
        let index = create_test_index();
        assert!(rank(&index, 0, 0).is_empty());
        assert!(rank(&index, 99, 5).is_empty());
        assert_eq!(rank(&index, 0, 1).len(), 1);
    }
}
