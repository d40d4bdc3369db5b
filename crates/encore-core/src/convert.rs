// ── API-to-domain type conversions ──
//
// Bridges raw `encore_api` response types into `encore_core::model`
// domain types. Dates arrive either as epoch milliseconds or as ISO
// strings depending on how a document was imported; both are accepted
// and anything else is dropped.

use chrono::{DateTime, NaiveDate};
use serde_json::Value;

use encore_api::{
    AlbumResponse, AlbumSummary, ArtistResponse, ArtistSummary, PageResponse, TrackResponse,
};

use crate::model::{Album, AlbumRef, Artist, ArtistRef, EntityId, Page, Track};

// ── Helpers ────────────────────────────────────────────────────────

fn parse_date(raw: Option<&Value>) -> Option<NaiveDate> {
    match raw? {
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map(|dt| dt.date_naive()),
        Value::String(s) => s.parse::<NaiveDate>().ok().or_else(|| {
            DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.date_naive())
        }),
        _ => None,
    }
}

/// Treat blank strings the same as absent ones.
fn non_empty(raw: Option<String>) -> Option<String> {
    raw.filter(|s| !s.trim().is_empty())
}

// ── Artist ─────────────────────────────────────────────────────────

impl From<ArtistResponse> for Artist {
    fn from(raw: ArtistResponse) -> Self {
        Self {
            id: EntityId::from(raw.id),
            name: raw.name,
            slug: non_empty(raw.slug_name),
            gender: non_empty(raw.gender),
            area: non_empty(raw.area),
            begin_date: parse_date(raw.begin_date.as_ref()),
            end_date: parse_date(raw.end_date.as_ref()),
            ipi: non_empty(raw.ipi),
            isni: non_empty(raw.isni),
            image_url: non_empty(raw.profile_image_url),
            rating: raw.rating,
            albums: raw.albums.into_iter().map(AlbumRef::from).collect(),
        }
    }
}

impl From<ArtistSummary> for ArtistRef {
    fn from(raw: ArtistSummary) -> Self {
        Self {
            id: EntityId::from(raw.id),
            name: raw.name,
            slug: non_empty(raw.slug_name),
        }
    }
}

// ── Album ──────────────────────────────────────────────────────────

impl From<AlbumResponse> for Album {
    fn from(raw: AlbumResponse) -> Self {
        let mut tracks: Vec<Track> = raw.tracks.into_iter().map(Track::from).collect();
        // Unpositioned tracks sink to the end, keeping their relative order.
        tracks.sort_by_key(|t| t.position.unwrap_or(u32::MAX));

        Self {
            id: EntityId::from(raw.id),
            name: raw.name,
            slug: non_empty(raw.slug_name),
            genre: non_empty(raw.genre),
            style: non_empty(raw.style),
            format: non_empty(raw.format),
            barcode: non_empty(raw.barcode),
            country: non_empty(raw.country),
            language: non_empty(raw.language),
            released: parse_date(raw.released_date.as_ref()),
            cover_url: non_empty(raw.cover_image_url),
            rating: raw.rating,
            artists: raw.artists.into_iter().map(ArtistRef::from).collect(),
            tracks,
        }
    }
}

impl From<AlbumSummary> for AlbumRef {
    fn from(raw: AlbumSummary) -> Self {
        Self {
            id: EntityId::from(raw.id),
            name: raw.name,
            slug: non_empty(raw.slug_name),
        }
    }
}

// ── Track ──────────────────────────────────────────────────────────

impl From<TrackResponse> for Track {
    fn from(raw: TrackResponse) -> Self {
        Self {
            id: EntityId::from(raw.id),
            name: raw.name,
            position: raw.position,
            length_ms: raw.length,
        }
    }
}

// ── Paging ─────────────────────────────────────────────────────────

impl<R, T: From<R>> From<PageResponse<R>> for Page<T> {
    fn from(raw: PageResponse<R>) -> Self {
        let items: Vec<T> = raw.results.into_iter().map(T::from).collect();
        let info = raw.pagination.unwrap_or_default();
        let count = u64::try_from(items.len()).unwrap_or(u64::MAX);
        Self {
            page: info.page.max(1),
            per_page: if info.per_page == 0 { count } else { info.per_page },
            total: info.items.max(count),
            items,
        }
    }
}
