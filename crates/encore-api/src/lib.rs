// encore-api: Async Rust client for the encore music catalog REST API

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::{CatalogClient, DEFAULT_API_PREFIX, PageQuery, SortOrder};
pub use error::Error;
pub use models::{
    AlbumResponse, AlbumSummary, ArtistResponse, ArtistSummary, PageResponse, PaginationInfo,
    TrackResponse,
};
pub use transport::{TlsMode, TransportConfig};
