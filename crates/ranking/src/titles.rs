//! Title listing and search for selection front ends.

use catalog::{Position, normalize_title};
use serde::Serialize;
use similarity::SimilarityIndex;
use std::collections::BTreeSet;

/// Every distinct display title, sorted
pub fn all_titles(index: &SimilarityIndex) -> Vec<String> {
    index
        .catalog()
        .iter()
        .map(|item| item.title.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitleMatch {
    pub position: Position,
    pub title: String,
    pub exact: bool,
}

/// Case-insensitive title search.
///
/// Exact matches come first, then titles containing `query`; catalog order
/// within each group. An empty query matches nothing.
pub fn search_titles(index: &SimilarityIndex, query: &str, limit: usize) -> Vec<TitleMatch> {
    let needle = normalize_title(query);
    if needle.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut exact = Vec::new();
    let mut partial = Vec::new();
    for (position, item) in index.catalog().iter().enumerate() {
        let key = item.title_key();
        if key == needle {
            exact.push((position, item, true));
        } else if key.contains(&needle) {
            partial.push((position, item, false));
        }
    }

    exact
        .into_iter()
        .chain(partial)
        .take(limit)
        .map(|(position, item, exact)| TitleMatch {
            position,
            title: item.title.clone(),
            exact,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{Catalog, Columns, Item};

    fn create_test_index() -> SimilarityIndex {
        let catalog = Catalog::from_items(
            vec![
                Item::new("Dhoom 2", "action", "thief"),
                Item::new("Dhoom", "action", "police"),
                Item::new("Andaz Apna Apna", "comedy", "two slackers"),
                Item::new("Dhoom", "action", "remake"),
            ],
            Columns::required_only(),
        );
        SimilarityIndex::build(catalog).unwrap()
    }

    #[test]
    fn test_all_titles_sorted_and_distinct() {
        let index = create_test_index();
        assert_eq!(all_titles(&index), vec!["Andaz Apna Apna", "Dhoom", "Dhoom 2"]);
    }

    #[test]
    fn test_exact_matches_first() {
        let index = create_test_index();
        let matches = search_titles(&index, "dhoom", 10);

        let positions: Vec<Position> = matches.iter().map(|m| m.position).collect();
        assert_eq!(positions, vec![1, 3, 0]);
        assert!(matches[0].exact && matches[1].exact && !matches[2].exact);
    }

    #[test]
    fn test_limit_and_empty_query() {
        let index = create_test_index();
        assert_eq!(search_titles(&index, "DHOOM", 1).len(), 1);
        assert!(search_titles(&index, "   ", 10).is_empty());
        assert!(search_titles(&index, "sholay", 10).is_empty());
    }
}
