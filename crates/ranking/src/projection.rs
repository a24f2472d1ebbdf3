//! Turning ranked positions into display rows.

use catalog::Position;
use serde::Serialize;
use similarity::SimilarityIndex;

/// Fields shown for one recommended item. Optional fields are `None` when
/// the source catalog had no such column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRow {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// 1-based rank
    pub rank: usize,
    pub position: Position,
    pub id: String,
    pub similarity: f64,
    #[serde(flatten)]
    pub row: DisplayRow,
}

/// Project ranked `(position, similarity)` pairs, preserving their order
pub fn project(index: &SimilarityIndex, ranked: &[(Position, f64)]) -> Vec<Recommendation> {
    let catalog = index.catalog();
    let display = index.display();

    ranked
        .iter()
        .filter_map(|&(position, similarity)| {
            let item = catalog.get(position)?;
            let id = catalog.identifier(position)?.into_owned();
            Some((position, similarity, item, id))
        })
        .enumerate()
        .map(|(i, (position, similarity, item, id))| Recommendation {
            rank: i + 1,
            position,
            id,
            similarity,
            row: DisplayRow {
                title: item.title.clone(),
                year: display.year.then(|| item.year.clone()),
                genre: display.genre.then(|| item.genre.clone()),
                director: display.director.then(|| item.director.clone()),
            },
        })
        .collect()
}
