//! Core domain types for a movie catalog.
//!
//! The catalog is an ordered sequence: an item's position (`0..N-1`) is the
//! coordinate every downstream index uses. Items are appended in source
//! order and never reordered.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// =============================================================================
// Type Aliases
// =============================================================================

/// Position of an item inside its catalog (row index of the similarity matrix)
pub type Position = usize;

// =============================================================================
// Item
// =============================================================================

/// One catalog entry.
///
/// All text fields are plain `String`s: an unknown value is the empty string,
/// never a null. `title` is the only field that must be non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Stable identifier from the dataset, if it had one
    pub id: Option<String>,
    pub title: String,
    pub year: String,
    pub genre: String,
    pub overview: String,
    pub director: String,
    pub cast: String,
}

impl Item {
    /// Create an item with the three required fields set and everything else empty
    pub fn new(
        title: impl Into<String>,
        genre: impl Into<String>,
        overview: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            genre: genre.into(),
            overview: overview.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = year.into();
        self
    }

    pub fn with_director(mut self, director: impl Into<String>) -> Self {
        self.director = director.into();
        self
    }

    pub fn with_cast(mut self, cast: impl Into<String>) -> Self {
        self.cast = cast.into();
        self
    }

    /// The text that gets vectorized: genre, overview, director and cast,
    /// joined by single spaces. Empty fields still contribute their separator.
    pub fn composite_text(&self) -> String {
        let mut text = String::with_capacity(
            self.genre.len() + self.overview.len() + self.director.len() + self.cast.len() + 3,
        );
        text.push_str(&self.genre);
        text.push(' ');
        text.push_str(&self.overview);
        text.push(' ');
        text.push_str(&self.director);
        text.push(' ');
        text.push_str(&self.cast);
        text
    }

    /// Title in the form used as a lookup key (trimmed, lowercased)
    pub fn title_key(&self) -> String {
        normalize_title(&self.title)
    }
}

/// Normalize a title for case-insensitive lookup
pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

// =============================================================================
// Columns
// =============================================================================

/// Which optional columns the source dataset actually carried.
///
/// `title` and `overview` are always present. `genre` is required by the
/// CSV normalizer but may be absent in catalogs assembled by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Columns {
    pub id: bool,
    pub year: bool,
    pub genre: bool,
    pub director: bool,
    pub cast: bool,
}

impl Columns {
    /// Every optional column present
    pub fn all() -> Self {
        Self {
            id: true,
            year: true,
            genre: true,
            director: true,
            cast: true,
        }
    }

    /// Only the required `title`, `genre` and `overview` columns
    pub fn required_only() -> Self {
        Self {
            id: false,
            year: false,
            genre: true,
            director: false,
            cast: false,
        }
    }

    /// Canonical names of the present columns, in display order
    pub fn names(&self) -> Vec<&'static str> {
        let mut names = Vec::with_capacity(7);
        if self.id {
            names.push("id");
        }
        names.push("title");
        if self.year {
            names.push("year");
        }
        if self.genre {
            names.push("genre");
        }
        names.push("overview");
        if self.director {
            names.push("director");
        }
        if self.cast {
            names.push("cast");
        }
        names
    }
}

impl Default for Columns {
    fn default() -> Self {
        Self::required_only()
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Ordered, positionally-stable sequence of items.
///
/// Mutation is only possible while assembling; once the catalog is handed
/// to the similarity index it is wrapped in an `Arc` and frozen.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    items: Vec<Item>,
    columns: Columns,
}

impl Catalog {
    /// Create an empty catalog that declares the given columns
    pub fn new(columns: Columns) -> Self {
        Self {
            items: Vec::new(),
            columns,
        }
    }

    /// Build a catalog from items in order
    pub fn from_items(items: Vec<Item>, columns: Columns) -> Self {
        Self { items, columns }
    }

    /// Append an item, returning its position
    pub fn push(&mut self, item: Item) -> Position {
        self.items.push(item);
        self.items.len() - 1
    }

    pub fn get(&self, position: Position) -> Option<&Item> {
        self.items.get(position)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn columns(&self) -> Columns {
        self.columns
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Stable identifier of the item at `position`: its dataset id when it
    /// has one, otherwise the position itself.
    pub fn identifier(&self, position: Position) -> Option<Cow<'_, str>> {
        let item = self.items.get(position)?;
        Some(match &item.id {
            Some(id) => Cow::Borrowed(id.as_str()),
            None => Cow::Owned(position.to_string()),
        })
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
