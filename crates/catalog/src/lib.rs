//! # Catalog Crate
//!
//! Data model and dataset normalization for the content-based recommender.
//!
//! ## Main Components
//!
//! - **types**: `Item`, `Catalog`, `Columns`
//! - **normalizer**: read a CSV dataset and map its columns onto the canonical schema
//! - **error**: error types for catalog loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::normalizer;
//! use std::path::Path;
//!
//! let catalog = normalizer::load_csv(Path::new("data/IMDB-Movie-Dataset(2023-1951).csv"))?;
//! println!("{} movies, columns: {:?}", catalog.len(), catalog.columns().names());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod normalizer;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use types::{normalize_title, Catalog, Columns, Item, Position};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_creation() {
        let catalog = Catalog::new(Columns::default());

        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
        assert!(catalog.get(0).is_none());
    }

    #[test]
    fn test_push_returns_position() {
        let mut catalog = Catalog::new(Columns::all());

        let first = catalog.push(Item::new("Sholay", "Action", "bandit hunt"));
        let second = catalog.push(Item::new("Lagaan", "Sport", "cricket match"));

        assert_eq!(first, 0);
        assert_eq!(second, 1);
        assert_eq!(catalog.get(1).unwrap().title, "Lagaan");
    }

    #[test]
    fn test_composite_text_joins_fields() {
        let item = Item::new("Don", "Crime", "a gangster")
            .with_director("Chandra Barot")
            .with_cast("Amitabh Bachchan");

        assert_eq!(
            item.composite_text(),
            "Crime a gangster Chandra Barot Amitabh Bachchan"
        );
    }

    #[test]
    fn test_composite_text_with_missing_fields() {
        let item = Item::new("Don", "Crime", "");

        // Separators survive so the field layout is stable
        assert_eq!(item.composite_text(), "Crime   ");
    }

    #[test]
    fn test_identifier_falls_back_to_position() {
        let catalog = Catalog::from_items(
            vec![
                Item::new("A", "Drama", "x").with_id("tt001"),
                Item::new("B", "Drama", "y"),
            ],
            Columns::all(),
        );

        assert_eq!(catalog.identifier(0).as_deref(), Some("tt001"));
        assert_eq!(catalog.identifier(1).as_deref(), Some("1"));
        assert!(catalog.identifier(2).is_none());
    }

    #[test]
    fn test_title_key_normalization() {
        let item = Item::new("  Dilwale Dulhania Le Jayenge ", "Romance", "");
        assert_eq!(item.title_key(), "dilwale dulhania le jayenge");
        assert_eq!(normalize_title("ZINDAGI"), "zindagi");
    }

    #[test]
    fn test_column_names_in_display_order() {
        assert_eq!(
            Columns::all().names(),
            vec!["id", "title", "year", "genre", "overview", "director", "cast"]
        );
        assert_eq!(
            Columns::required_only().names(),
            vec!["title", "genre", "overview"]
        );
    }
}
