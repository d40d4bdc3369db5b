use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::artist::ArtistRef;
use super::entity_id::EntityId;
use super::track::Track;

/// A released album with its artists and track list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: EntityId,
    pub name: String,
    pub slug: Option<String>,
    pub genre: Option<String>,
    pub style: Option<String>,
    pub format: Option<String>,
    pub barcode: Option<String>,
    pub country: Option<String>,
    pub language: Option<String>,
    pub released: Option<NaiveDate>,
    pub cover_url: Option<String>,
    pub rating: Option<f64>,
    pub artists: Vec<ArtistRef>,
    pub tracks: Vec<Track>,
}

impl Album {
    /// Comma-joined artist names, for one-line display.
    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Short album reference carried by artists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumRef {
    pub id: EntityId,
    pub name: String,
    pub slug: Option<String>,
}
