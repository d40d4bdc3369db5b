// Catalog API response types
//
// Raw JSON shapes returned by the catalog service. Identifiers arrive as
// `_id` on top-level documents and `id` on some nested ones, so both are
// accepted. Fields use `#[serde(default)]` liberally because documents
// imported from different sources are sparse.

use serde::{Deserialize, Serialize};

// ── Paging ───────────────────────────────────────────────────────────

/// Paged list envelope.
///
/// ```json
/// { "pagination": { "page": 1, "per_page": 50, "items": 1200 }, "results": [...] }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PageResponse<T> {
    #[serde(default)]
    pub pagination: Option<PaginationInfo>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PaginationInfo {
    #[serde(default)]
    pub page: u64,
    #[serde(default)]
    pub per_page: u64,
    /// Total number of documents across all pages.
    #[serde(default, alias = "total")]
    pub items: u64,
}

// ── Artist ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtistResponse {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug_name: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub ipi: Option<String>,
    #[serde(default)]
    pub isni: Option<String>,
    /// Epoch milliseconds or an ISO date, depending on the importer.
    #[serde(default)]
    pub begin_date: Option<serde_json::Value>,
    #[serde(default)]
    pub end_date: Option<serde_json::Value>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub albums: Vec<AlbumSummary>,
    /// Catch-all for fields not modelled above.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Artist reference embedded in album documents.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtistSummary {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug_name: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

// ── Album ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AlbumResponse {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug_name: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub released_date: Option<serde_json::Value>,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub artists: Vec<ArtistSummary>,
    #[serde(default)]
    pub tracks: Vec<TrackResponse>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Album reference embedded in artist documents.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AlbumSummary {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug_name: Option<String>,
    #[serde(default)]
    pub cover_image_url: Option<String>,
}

// ── Track ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackResponse {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    /// Duration in milliseconds.
    #[serde(default)]
    pub length: Option<u64>,
    #[serde(default)]
    pub position: Option<u32>,
}
