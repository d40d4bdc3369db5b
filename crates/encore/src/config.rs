//! CLI configuration: thin wrapper around `encore_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--server, --insecure, --timeout).

use std::time::Duration;

use encore_core::{CatalogConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use encore_config::{
    Config, Profile, config_path, load_config, load_config_or_default, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build a `CatalogConfig` from the config file, profile, and CLI overrides.
pub fn build_catalog_config(global: &GlobalOpts) -> Result<CatalogConfig, CliError> {
    let cfg = load_config()?;
    resolve(global, &cfg)
}

fn resolve(global: &GlobalOpts, cfg: &Config) -> Result<CatalogConfig, CliError> {
    let profile_name = active_profile_name(global, cfg);

    if let Some(profile) = cfg.profiles.get(&profile_name) {
        let mut config = encore_config::profile_to_catalog_config(profile, &cfg.defaults)?;
        apply_overrides(&mut config, global)?;
        return Ok(config);
    }

    // An explicitly requested profile must exist.
    if global.profile.is_some() && global.server.is_none() {
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: cfg.profile_names(),
        });
    }

    // No profile -- build from CLI flags / env vars alone.
    let url_str = global.server.as_deref().ok_or_else(|| CliError::NoConfig {
        path: config_path().display().to_string(),
    })?;
    let mut config = CatalogConfig::new(parse_server(url_str)?);
    config.tls = if cfg.defaults.insecure {
        TlsVerification::DangerAcceptInvalid
    } else {
        TlsVerification::SystemDefaults
    };
    config.timeout = Duration::from_secs(cfg.defaults.timeout);
    apply_overrides(&mut config, global)?;
    Ok(config)
}

/// Flags beat profile values.
fn apply_overrides(config: &mut CatalogConfig, global: &GlobalOpts) -> Result<(), CliError> {
    if let Some(ref server) = global.server {
        config.url = parse_server(server)?;
    }
    if global.insecure {
        config.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        config.timeout = Duration::from_secs(secs);
    }
    Ok(())
}

fn parse_server(url_str: &str) -> Result<url::Url, CliError> {
    url_str.parse().map_err(|_| CliError::Validation {
        field: "server".into(),
        reason: format!("invalid URL: {url_str}"),
    })
}
