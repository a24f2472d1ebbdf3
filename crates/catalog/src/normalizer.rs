//! CSV catalog normalizer.
//!
//! Turns a movie dataset with loosely named columns into a [`Catalog`]:
//! - header names are trimmed, lowercased and mapped to canonical names
//!   (`movie_name` / `name` -> `title`, `synopsis` / `description` -> `overview`,
//!   `actors` -> `cast`, ...)
//! - `title`, `genre` and `overview` are required
//! - missing cells become empty strings, rows without a title are skipped
//!
//! Cells are decoded as UTF-8 lossily: scraped datasets are frequently not
//! clean UTF-8 and one bad byte should not sink the whole load.

use crate::error::{CatalogError, Result};
use crate::types::{Catalog, Columns, Item};
use csv::{ByteRecord, ReaderBuilder};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Canonical column names understood by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Canonical {
    Id,
    Title,
    Year,
    Genre,
    Overview,
    Director,
    Cast,
}

impl Canonical {
    fn name(self) -> &'static str {
        match self {
            Canonical::Id => "id",
            Canonical::Title => "title",
            Canonical::Year => "year",
            Canonical::Genre => "genre",
            Canonical::Overview => "overview",
            Canonical::Director => "director",
            Canonical::Cast => "cast",
        }
    }
}

/// Map a normalized (trimmed, lowercased) header to its canonical column
fn canonical_column(header: &str) -> Option<Canonical> {
    match header {
        "movie_name" | "name" | "title" => Some(Canonical::Title),
        "movie id" | "movie_id" | "id" => Some(Canonical::Id),
        "year" => Some(Canonical::Year),
        "genre" | "genres" => Some(Canonical::Genre),
        "overview" | "synopsis" | "description" => Some(Canonical::Overview),
        "director" => Some(Canonical::Director),
        "cast" | "actors" => Some(Canonical::Cast),
        _ => None,
    }
}

fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_lowercase()
}

/// Source column index for each canonical column
#[derive(Debug, Default)]
struct ColumnMap {
    id: Option<usize>,
    title: Option<usize>,
    year: Option<usize>,
    genre: Option<usize>,
    overview: Option<usize>,
    director: Option<usize>,
    cast: Option<usize>,
}

impl ColumnMap {
    fn slot(&mut self, column: Canonical) -> &mut Option<usize> {
        match column {
            Canonical::Id => &mut self.id,
            Canonical::Title => &mut self.title,
            Canonical::Year => &mut self.year,
            Canonical::Genre => &mut self.genre,
            Canonical::Overview => &mut self.overview,
            Canonical::Director => &mut self.director,
            Canonical::Cast => &mut self.cast,
        }
    }

    /// Build the map from normalized headers. The left-most source column wins
    /// when several map to the same canonical name.
    fn from_headers(headers: &[String]) -> Self {
        let mut map = ColumnMap::default();
        for (idx, header) in headers.iter().enumerate() {
            let Some(column) = canonical_column(header) else {
                debug!("Ignoring column '{}'", header);
                continue;
            };
            let slot = map.slot(column);
            match slot {
                Some(first) => warn!(
                    "Column '{}' also maps to '{}'; keeping column {}",
                    header,
                    column.name(),
                    first
                ),
                None => *slot = Some(idx),
            }
        }
        map
    }

    fn require(&self, column: Canonical, headers: &[String]) -> Result<usize> {
        let idx = match column {
            Canonical::Id => self.id,
            Canonical::Title => self.title,
            Canonical::Year => self.year,
            Canonical::Genre => self.genre,
            Canonical::Overview => self.overview,
            Canonical::Director => self.director,
            Canonical::Cast => self.cast,
        };
        idx.ok_or_else(|| CatalogError::Schema {
            column: column.name().to_string(),
            found: headers.to_vec(),
        })
    }

    fn columns(&self) -> Columns {
        Columns {
            id: self.id.is_some(),
            year: self.year.is_some(),
            genre: self.genre.is_some(),
            director: self.director.is_some(),
            cast: self.cast.is_some(),
        }
    }
}

/// Read a cell as trimmed text; a missing cell is the empty string
fn cell(record: &ByteRecord, idx: Option<usize>) -> String {
    idx.and_then(|i| record.get(i))
        .map(|bytes| String::from_utf8_lossy(bytes).trim().to_string())
        .unwrap_or_default()
}

/// Load and normalize a CSV dataset from disk
pub fn load_csv(path: &Path) -> Result<Catalog> {
    info!("Loading catalog from {}", path.display());
    let file = File::open(path)?;
    from_reader(file)
}

/// Normalize a CSV dataset from any reader
pub fn from_reader<R: Read>(reader: R) -> Result<Catalog> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .byte_headers()?
        .iter()
        .map(|h| normalize_header(&String::from_utf8_lossy(h)))
        .collect();

    let map = ColumnMap::from_headers(&headers);
    let title = map.require(Canonical::Title, &headers)?;
    let genre = map.require(Canonical::Genre, &headers)?;
    let overview = map.require(Canonical::Overview, &headers)?;

    let mut catalog = Catalog::new(map.columns());
    let mut record = ByteRecord::new();
    let mut row = 0usize;
    let mut skipped = 0usize;

    while reader.read_byte_record(&mut record)? {
        row += 1;
        let item = Item {
            id: Some(cell(&record, map.id)).filter(|id| !id.is_empty()),
            title: cell(&record, Some(title)),
            year: cell(&record, map.year),
            genre: cell(&record, Some(genre)),
            overview: cell(&record, Some(overview)),
            director: cell(&record, map.director),
            cast: cell(&record, map.cast),
        };

        if item.title.is_empty() {
            warn!("Skipping row {}: empty title", row);
            skipped += 1;
            continue;
        }

        catalog.push(item);
    }

    if catalog.is_empty() {
        return Err(CatalogError::EmptyCatalog);
    }

    info!(
        "Loaded {} items ({} skipped), columns: {}",
        catalog.len(),
        skipped,
        map.columns().names().join(", ")
    );
    Ok(catalog)
}
