// ── Runtime connection configuration ──
//
// These types describe *how* to reach the catalog service. They never
// touch disk: the CLI (through encore-config) builds a `CatalogConfig`
// and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use encore_api::{DEFAULT_API_PREFIX, TlsMode, TransportConfig};

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (local development servers).
    DangerAcceptInvalid,
}

/// Configuration for talking to one catalog service.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Service root (e.g., `https://music.example.com`).
    pub url: Url,
    /// Path prefix the REST resources are mounted under.
    pub api_prefix: String,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
}

impl CatalogConfig {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            api_prefix: DEFAULT_API_PREFIX.to_owned(),
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        }
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }
}
