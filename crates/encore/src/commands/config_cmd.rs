//! Config subcommand handlers.

use tabled::Tabled;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Clone, Tabled, serde::Serialize)]
struct ProfileRow {
    #[tabled(rename = "")]
    active: &'static str,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Server")]
    server: String,
    #[tabled(rename = "API prefix")]
    api_prefix: String,
}

fn profile_rows(cfg: &Config, active: &str) -> Vec<ProfileRow> {
    cfg.profiles
        .iter()
        .map(|(name, p)| ProfileRow {
            active: if name == active { "*" } else { "" },
            name: name.clone(),
            server: p.server.clone(),
            api_prefix: p.api_prefix.clone(),
        })
        .collect()
}

fn validate_server(url: &str) -> Result<(), CliError> {
    url.parse::<url::Url>()
        .map(|_| ())
        .map_err(|_| CliError::Validation {
            field: "server".into(),
            reason: format!("invalid URL: {url}"),
        })
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init {
            url,
            name,
            api_prefix,
            force,
        } => {
            validate_server(&url)?;
            let mut cfg = config::load_config()?;

            if cfg.profiles.contains_key(&name) && !force {
                return Err(CliError::Validation {
                    field: "name".into(),
                    reason: format!("profile '{name}' already exists (use --force to replace it)"),
                });
            }

            let mut profile = Profile::new(url);
            if let Some(prefix) = api_prefix {
                profile.api_prefix = prefix;
            }
            if cfg.profiles.is_empty() {
                cfg.default_profile = Some(name.clone());
            }
            cfg.profiles.insert(name.clone(), profile);

            let path = config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("Profile '{name}' written to {}", path.display());
            }
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            let out = output::render_single(
                &global.output,
                &cfg,
                |c| toml::to_string_pretty(c).unwrap_or_default(),
                |c| config::active_profile_name(global, c),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let active = config::active_profile_name(global, &cfg);
            let rows = profile_rows(&cfg, &active);
            let out = output::render_list(
                &global.output,
                &rows,
                ProfileRow::clone,
                |r| r.name.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config()?;
            cfg.profile(&name)?;
            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("Default profile set to '{name}'");
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_profile_is_marked() {
        let mut cfg = Config::default();
        cfg.profiles
            .insert("home".into(), Profile::new("https://music.example.com"));
        cfg.profiles
            .insert("dev".into(), Profile::new("http://localhost:8080"));

        let rows = profile_rows(&cfg, "home");
        let marked: Vec<_> = rows.iter().map(|r| (r.name.as_str(), r.active)).collect();
        assert_eq!(marked, vec![("dev", ""), ("home", "*")]);
    }

    #[test]
    fn init_rejects_bad_url() {
        assert!(validate_server("music example").is_err());
        assert!(validate_server("http://localhost:8080").is_ok());
    }
}
