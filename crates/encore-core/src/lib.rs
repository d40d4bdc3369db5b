// encore-core: Domain model and route-driven view state on top of encore-api.

pub mod binder;
pub mod catalog;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod route;
pub mod source;

// ── Primary re-exports ──────────────────────────────────────────────
pub use binder::{BinderHandle, RouteBinder, ViewState, ViewStream, ViewWatchStream};
pub use catalog::Catalog;
pub use config::{CatalogConfig, TlsVerification};
pub use error::CoreError;
pub use route::{ParamMap, ParamStream, Router};
pub use source::{AlbumSource, ArtistSource, EntitySource};

pub use model::{Album, AlbumRef, Artist, ArtistRef, EntityId, Page, Track};

// Query types callers pass straight through to the client.
pub use encore_api::{DEFAULT_API_PREFIX, PageQuery, SortOrder};
