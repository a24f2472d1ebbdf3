use catalog::{Catalog, Position, normalize_title};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::debug;

/// Case-insensitive title lookup. The first item carrying a title owns it.
#[derive(Debug, Clone, Default)]
pub struct TitleIndex {
    positions: HashMap<String, Position>,
}

impl TitleIndex {
    pub fn build(catalog: &Catalog) -> Self {
        let mut positions = HashMap::with_capacity(catalog.len());
        let mut duplicates = 0usize;

        for (position, item) in catalog.iter().enumerate() {
            match positions.entry(item.title_key()) {
                Entry::Vacant(slot) => {
                    slot.insert(position);
                }
                Entry::Occupied(_) => duplicates += 1,
            }
        }

        if duplicates > 0 {
            debug!("{} duplicate titles shadowed by earlier items", duplicates);
        }

        Self { positions }
    }

    /// Position of the item titled `title` (trimmed, any case)
    pub fn lookup(&self, title: &str) -> Option<Position> {
        self.positions.get(&normalize_title(title)).copied()
    }

    /// Number of distinct normalized titles
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{Columns, Item};

    #[test]
    fn test_lookup_is_case_insensitive_and_trimmed() {
        let catalog = Catalog::from_items(
            vec![Item::new("Mughal-E-Azam", "Drama", "a prince")],
            Columns::default(),
        );
        let index = TitleIndex::build(&catalog);

        assert_eq!(index.lookup("  mughal-e-azam "), Some(0));
        assert_eq!(index.lookup("MUGHAL-E-AZAM"), Some(0));
        assert_eq!(index.lookup("Mughal"), None);
    }

    #[test]
    fn test_first_duplicate_wins() {
        let catalog = Catalog::from_items(
            vec![
                Item::new("Don", "Action", "1978"),
                Item::new("Other", "Drama", "x"),
                Item::new("DON ", "Action", "2006"),
            ],
            Columns::default(),
        );
        let index = TitleIndex::build(&catalog);

        assert_eq!(index.lookup("don"), Some(0));
        assert_eq!(index.len(), 2);
    }
}
