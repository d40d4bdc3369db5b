// ── Core error types ──
//
// User-facing errors from encore-core. Consumers never see raw HTTP
// status handling or JSON parse failures; the `From<encore_api::Error>`
// impl translates transport-layer errors into domain variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach catalog at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Catalog request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    // ── Routing errors ───────────────────────────────────────────────
    #[error("Route parameter '{key}' is missing")]
    MissingParameter { key: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Returns `true` if retrying the same request could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::ConnectionFailed { .. } | Self::Timeout { .. } => true,
            Self::Api { status, .. } => status.is_some_and(|s| s >= 500 || s == 429),
            _ => false,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<encore_api::Error> for CoreError {
    fn from(err: encore_api::Error) -> Self {
        match err {
            encore_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            encore_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            encore_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            encore_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            encore_api::Error::NotFound { resource, id } => CoreError::NotFound {
                entity_type: resource.into(),
                identifier: id,
            },
            encore_api::Error::Http { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            encore_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_keeps_resource_and_id() {
        let err = CoreError::from(encore_api::Error::NotFound {
            resource: "album",
            id: "al1".into(),
        });
        assert!(matches!(
            err,
            CoreError::NotFound { ref entity_type, ref identifier }
                if entity_type == "album" && identifier == "al1"
        ));
        assert_eq!(err.to_string(), "album not found: al1");
    }

    #[test]
    fn http_status_survives_translation() {
        let err = CoreError::from(encore_api::Error::Http {
            status: 502,
            message: "bad gateway".into(),
        });
        assert!(matches!(err, CoreError::Api { status: Some(502), .. }));
        assert!(err.is_transient());
    }

    #[test]
    fn missing_parameter_is_not_transient() {
        let err = CoreError::MissingParameter {
            key: "artistId".into(),
        };
        assert!(!err.is_transient());
        assert_eq!(err.to_string(), "Route parameter 'artistId' is missing");
    }
}
