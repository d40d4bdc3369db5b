use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::album::AlbumRef;
use super::entity_id::EntityId;

/// A performer or group in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: EntityId,
    pub name: String,
    pub slug: Option<String>,
    pub gender: Option<String>,
    pub area: Option<String>,
    pub begin_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub ipi: Option<String>,
    pub isni: Option<String>,
    pub image_url: Option<String>,
    pub rating: Option<f64>,
    pub albums: Vec<AlbumRef>,
}

/// Short artist reference carried by albums.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistRef {
    pub id: EntityId,
    pub name: String,
    pub slug: Option<String>,
}
