// ── Domain model ──
//
// Canonical representation of catalog documents. Consumers (CLI, view
// state) depend on these types, never on the raw `encore_api` shapes.

pub mod album;
pub mod artist;
pub mod entity_id;
pub mod page;
pub mod track;

pub use album::{Album, AlbumRef};
pub use artist::{Artist, ArtistRef};
pub use entity_id::EntityId;
pub use page::Page;
pub use track::Track;
