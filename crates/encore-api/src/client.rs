// Catalog API HTTP client
//
// Wraps `reqwest::Client` with catalog URL construction, status mapping,
// and JSON decoding. Resource URLs are built segment by segment so that
// identifiers are always percent-encoded as a single path segment.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::models::{AlbumResponse, ArtistResponse, PageResponse, TrackResponse};
use crate::transport::TransportConfig;

/// Path prefix the catalog service mounts its REST resources under.
pub const DEFAULT_API_PREFIX: &str = "api/1.0";

const BODY_PREVIEW_CHARS: usize = 200;

// ── Paging & sorting ─────────────────────────────────────────────────

/// Sort direction accepted by list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("invalid sort order '{other}' (expected asc or desc)")),
        }
    }
}

/// Query parameters for paged list endpoints.
///
/// Unset fields are omitted so the server applies its own defaults
/// (first page, server-side page size, natural order).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub order: Option<SortOrder>,
    pub sort_fields: Vec<String>,
}

impl PageQuery {
    fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            pairs.push(("per_page", per_page.to_string()));
        }
        if let Some(order) = self.order {
            pairs.push(("sort_type", order.as_str().to_owned()));
        }
        if !self.sort_fields.is_empty() {
            pairs.push(("sort_fields", self.sort_fields.join(",")));
        }
        pairs
    }
}

// ── Client ───────────────────────────────────────────────────────────

/// HTTP client for the music catalog REST API.
///
/// Cheap to clone: the underlying `reqwest::Client` is reference counted.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
    prefix: String,
    timeout: Duration,
}

impl CatalogClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// The `base_url` is the service root (e.g. `https://music.example.com`);
    /// resources are resolved under [`DEFAULT_API_PREFIX`] unless
    /// [`with_prefix`](Self::with_prefix) says otherwise.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        let mut client = Self::with_client(http, base_url)?;
        client.timeout = transport.timeout;
        Ok(client)
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Result<Self, Error> {
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(
                url::ParseError::RelativeUrlWithCannotBeABaseBase,
            ));
        }
        Ok(Self {
            http,
            base_url,
            prefix: DEFAULT_API_PREFIX.to_owned(),
            timeout: TransportConfig::default().timeout,
        })
    }

    /// Override the resource path prefix (`""` mounts resources at the root).
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// The service base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The resource path prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/{prefix}/{segments..}`, encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `with_client` rejects cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            path.extend(self.prefix.split('/').filter(|s| !s.is_empty()));
            path.extend(segments);
        }
        url
    }

    /// Resource URL of a single artist.
    pub fn artist_url(&self, id: &str) -> Url {
        self.endpoint(&["artists", id])
    }

    /// Resource URL of a single album.
    pub fn album_url(&self, id: &str) -> Url {
        self.endpoint(&["albums", id])
    }

    // ── Artists ──────────────────────────────────────────────────────

    pub async fn get_artist(&self, id: &str) -> Result<ArtistResponse, Error> {
        self.get_json(self.artist_url(id), "artist", id).await
    }

    pub async fn list_artists(
        &self,
        query: &PageQuery,
    ) -> Result<PageResponse<ArtistResponse>, Error> {
        let mut url = self.endpoint(&["artists"]);
        apply_query(&mut url, query);
        self.get_json(url, "artists", "").await
    }

    // ── Albums ───────────────────────────────────────────────────────

    pub async fn get_album(&self, id: &str) -> Result<AlbumResponse, Error> {
        self.get_json(self.album_url(id), "album", id).await
    }

    /// Look an album up by its slug (readable, URL-friendly name).
    pub async fn get_album_by_slug(&self, slug: &str) -> Result<AlbumResponse, Error> {
        let url = self.endpoint(&["albums", "slug", slug]);
        self.get_json(url, "album", slug).await
    }

    pub async fn list_albums(
        &self,
        query: &PageQuery,
    ) -> Result<PageResponse<AlbumResponse>, Error> {
        let mut url = self.endpoint(&["albums"]);
        apply_query(&mut url, query);
        self.get_json(url, "albums", "").await
    }

    // ── Tracks ───────────────────────────────────────────────────────

    pub async fn list_album_tracks(&self, album_id: &str) -> Result<Vec<TrackResponse>, Error> {
        let url = self.endpoint(&["albums", album_id, "tracks"]);
        self.get_json(url, "album", album_id).await
    }

    pub async fn get_album_track(
        &self,
        album_id: &str,
        track_id: &str,
    ) -> Result<TrackResponse, Error> {
        let url = self.endpoint(&["albums", album_id, "tracks", track_id]);
        self.get_json(url, "track", track_id).await
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON body.
    ///
    /// `resource` and `id` only label a 404 so callers can report which
    /// lookup failed.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        resource: &'static str,
        id: &str,
    ) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = resp.status();
        trace!(%status, "catalog response");

        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound {
                resource,
                id: id.to_owned(),
            });
        }

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Http {
                status: status.as_u16(),
                message: preview(&body),
            });
        }

        let body = resp.text().await.map_err(|e| self.map_transport(e))?;

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(&body)),
            body,
        })
    }

    fn map_transport(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            Error::Transport(err)
        }
    }
}

fn apply_query(url: &mut Url, query: &PageQuery) {
    let pairs = query.to_pairs();
    if pairs.is_empty() {
        return;
    }
    let mut qp = url.query_pairs_mut();
    for (key, value) in &pairs {
        qp.append_pair(key, value);
    }
}

fn preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_CHARS).collect()
}
