// ── Catalog facade ──
//
// Single entry point for consumers: owns the HTTP client built from a
// `CatalogConfig`, returns domain types, and hands out entity sources
// and route binders wired to the same client.

use std::sync::Arc;

use futures_core::Stream;
use tracing::debug;

use encore_api::{CatalogClient, PageQuery};

use crate::binder::{BinderHandle, RouteBinder};
use crate::config::CatalogConfig;
use crate::error::CoreError;
use crate::model::{Album, Artist, Page, Track};
use crate::route::ParamMap;
use crate::source::{AlbumSource, ArtistSource};

/// Handle to one catalog service.
///
/// Cheaply cloneable via `Arc<CatalogInner>`.
#[derive(Clone)]
pub struct Catalog {
    inner: Arc<CatalogInner>,
}

struct CatalogInner {
    config: CatalogConfig,
    client: CatalogClient,
}

impl Catalog {
    /// Build the HTTP client described by `config`. Does not touch the network.
    pub fn new(config: CatalogConfig) -> Result<Self, CoreError> {
        let client = CatalogClient::new(config.url.clone(), &config.transport())?
            .with_prefix(config.api_prefix.clone());
        Ok(Self::from_parts(config, client))
    }

    /// Wrap an already-built client (tests, custom transports).
    pub fn with_client(config: CatalogConfig, client: CatalogClient) -> Self {
        Self::from_parts(config, client)
    }

    fn from_parts(config: CatalogConfig, client: CatalogClient) -> Self {
        Self {
            inner: Arc::new(CatalogInner { config, client }),
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.inner.config
    }

    pub fn client(&self) -> &CatalogClient {
        &self.inner.client
    }

    // ── Resource URLs ────────────────────────────────────────────

    pub fn artist_url(&self, id: &str) -> String {
        self.inner.client.artist_url(id).into()
    }

    pub fn album_url(&self, id: &str) -> String {
        self.inner.client.album_url(id).into()
    }

    // ── Artists ──────────────────────────────────────────────────

    pub async fn artist(&self, id: &str) -> Result<Artist, CoreError> {
        let raw = self.inner.client.get_artist(id).await?;
        Ok(Artist::from(raw))
    }

    pub async fn artists(&self, query: &PageQuery) -> Result<Page<Artist>, CoreError> {
        let page: Page<Artist> = self.inner.client.list_artists(query).await?.into();
        debug!(page = page.page, count = page.items.len(), "artists page fetched");
        Ok(page)
    }

    // ── Albums ───────────────────────────────────────────────────

    pub async fn album(&self, id: &str) -> Result<Album, CoreError> {
        let raw = self.inner.client.get_album(id).await?;
        Ok(Album::from(raw))
    }

    pub async fn album_by_slug(&self, slug: &str) -> Result<Album, CoreError> {
        let raw = self.inner.client.get_album_by_slug(slug).await?;
        Ok(Album::from(raw))
    }

    pub async fn albums(&self, query: &PageQuery) -> Result<Page<Album>, CoreError> {
        let page: Page<Album> = self.inner.client.list_albums(query).await?.into();
        debug!(page = page.page, count = page.items.len(), "albums page fetched");
        Ok(page)
    }

    // ── Tracks ───────────────────────────────────────────────────

    /// Track list of an album, in album order.
    pub async fn album_tracks(&self, album_id: &str) -> Result<Vec<Track>, CoreError> {
        let mut tracks: Vec<Track> = self
            .inner
            .client
            .list_album_tracks(album_id)
            .await?
            .into_iter()
            .map(Track::from)
            .collect();
        tracks.sort_by_key(|t| t.position.unwrap_or(u32::MAX));
        Ok(tracks)
    }

    pub async fn album_track(&self, album_id: &str, track_id: &str) -> Result<Track, CoreError> {
        let raw = self.inner.client.get_album_track(album_id, track_id).await?;
        Ok(Track::from(raw))
    }

    // ── Route binding ────────────────────────────────────────────

    pub fn artist_source(&self) -> ArtistSource {
        ArtistSource::new(self.inner.client.clone())
    }

    pub fn album_source(&self) -> AlbumSource {
        AlbumSource::new(self.inner.client.clone())
    }

    /// Bind an artist view to the `artistId` parameter of `params`.
    pub fn bind_artist<P>(&self, params: P) -> BinderHandle<Artist>
    where
        P: Stream<Item = ParamMap> + Send + Unpin + 'static,
    {
        RouteBinder::new(self.artist_source()).start(params)
    }

    /// Bind an album view to the `albumId` parameter of `params`.
    pub fn bind_album<P>(&self, params: P) -> BinderHandle<Album>
    where
        P: Stream<Item = ParamMap> + Send + Unpin + 'static,
    {
        RouteBinder::new(self.album_source()).start(params)
    }
}
