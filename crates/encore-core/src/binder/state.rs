use std::fmt;
use std::sync::Arc;

use crate::error::CoreError;

/// What a view bound to a route shows right now.
///
/// `generation` counts route emissions seen by the binder. A fetch result
/// is applied only while its generation is still the current one, so
/// `entity` always belongs to the newest request that has completed
/// successfully.
pub struct ViewState<T> {
    /// Last successfully fetched entity. Kept across failures.
    pub entity: Option<Arc<T>>,
    /// Resource URL of the current request, set as soon as the route changes.
    pub source_url: Option<String>,
    /// Identifier of the current request.
    pub requested_id: Option<String>,
    pub generation: u64,
    /// A fetch for the current generation is in flight.
    pub loading: bool,
    /// Failure of the current generation, cleared by the next request.
    pub error: Option<Arc<CoreError>>,
}

impl<T> ViewState<T> {
    /// The entity shown belongs to the identifier currently requested.
    pub fn is_current(&self) -> bool {
        !self.loading && self.error.is_none() && self.entity.is_some()
    }
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            entity: None,
            source_url: None,
            requested_id: None,
            generation: 0,
            loading: false,
            error: None,
        }
    }
}

// Manual impls: `Arc<T>` is cloneable for any `T`.
impl<T> Clone for ViewState<T> {
    fn clone(&self) -> Self {
        Self {
            entity: self.entity.clone(),
            source_url: self.source_url.clone(),
            requested_id: self.requested_id.clone(),
            generation: self.generation,
            loading: self.loading,
            error: self.error.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ViewState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewState")
            .field("entity", &self.entity)
            .field("source_url", &self.source_url)
            .field("requested_id", &self.requested_id)
            .field("generation", &self.generation)
            .field("loading", &self.loading)
            .field("error", &self.error.as_ref().map(ToString::to_string))
            .finish()
    }
}
