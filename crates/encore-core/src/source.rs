// ── Data-access seam ──
//
// `EntitySource` is what a `RouteBinder` needs from the outside world:
// a way to name a resource and a way to fetch it. The catalog-backed
// implementations live here; tests substitute their own.

use std::future::Future;

use encore_api::CatalogClient;

use crate::error::CoreError;
use crate::model::{Album, Artist};

/// Turns an identifier into a resource locator and an asynchronous fetch.
pub trait EntitySource: Send + Sync + 'static {
    type Entity: Send + Sync + 'static;

    /// Route parameter key this source is normally bound to.
    fn route_key(&self) -> &str {
        "id"
    }

    /// Resource locator for `id`. Pure and total.
    fn resource_url(&self, id: &str) -> String;

    /// Retrieve the entity named by `id`.
    fn fetch_by_id(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Self::Entity, CoreError>> + Send;
}

// ── Catalog-backed sources ───────────────────────────────────────────

/// Artists from the catalog, bound to the `artistId` route parameter.
#[derive(Debug, Clone)]
pub struct ArtistSource {
    client: CatalogClient,
}

impl ArtistSource {
    pub fn new(client: CatalogClient) -> Self {
        Self { client }
    }
}

impl EntitySource for ArtistSource {
    type Entity = Artist;

    fn route_key(&self) -> &str {
        "artistId"
    }

    fn resource_url(&self, id: &str) -> String {
        self.client.artist_url(id).into()
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Artist, CoreError> {
        let raw = self.client.get_artist(id).await?;
        Ok(Artist::from(raw))
    }
}

/// Albums from the catalog, bound to the `albumId` route parameter.
#[derive(Debug, Clone)]
pub struct AlbumSource {
    client: CatalogClient,
}

impl AlbumSource {
    pub fn new(client: CatalogClient) -> Self {
        Self { client }
    }
}

impl EntitySource for AlbumSource {
    type Entity = Album;

    fn route_key(&self) -> &str {
        "albumId"
    }

    fn resource_url(&self, id: &str) -> String {
        self.client.album_url(id).into()
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Album, CoreError> {
        let raw = self.client.get_album(id).await?;
        Ok(Album::from(raw))
    }
}
