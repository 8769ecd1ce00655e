//! Config subcommand handlers.

use std::io::BufRead;

use secrecy::SecretString;

use camara_config::Profile;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

const AUTH_MODES: &[&str] = &["bearer", "api-key", "none"];

// ── Helpers ─────────────────────────────────────────────────────────

fn available_profiles(cfg: &Config) -> String {
    let mut names: Vec<_> = cfg.profiles.keys().cloned().collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort();
    names.join(", ")
}

fn check_auth_mode(mode: &str) -> Result<(), CliError> {
    if AUTH_MODES.contains(&mode) {
        Ok(())
    } else {
        Err(CliError::Validation {
            field: "auth_mode".into(),
            reason: format!("must be one of: {}", AUTH_MODES.join(", ")),
        })
    }
}

fn parse_value<T: std::str::FromStr>(
    field: &str,
    value: &str,
    expected: &str,
) -> Result<T, CliError> {
    value.parse().map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("must be {expected}"),
    })
}

/// Copy of the config with plaintext tokens masked.
fn redacted(cfg: &Config) -> Config {
    let mut cfg = cfg.clone();
    for profile in cfg.profiles.values_mut() {
        if profile.token.is_some() {
            profile.token = Some("********".into());
        }
    }
    cfg
}

/// Apply `key = value` to a profile.
fn set_profile_value(profile: &mut Profile, key: &str, value: String) -> Result<(), CliError> {
    match key {
        "base_url" | "base-url" | "url" => {
            camara_config::parse_base_url(&value)?;
            profile.base_url = value;
        }
        "auth_mode" | "auth-mode" => {
            check_auth_mode(&value)?;
            profile.auth_mode = value;
        }
        "token_env" | "token-env" => profile.token_env = Some(value),
        "api_key_header" | "api-key-header" => profile.api_key_header = Some(value),
        "ca_cert" | "ca-cert" => profile.ca_cert = Some(value.into()),
        "insecure" => profile.insecure = Some(parse_value(key, &value, "'true' or 'false'")?),
        "timeout" => profile.timeout = Some(parse_value(key, &value, "a number (seconds)")?),
        "max_retries" | "max-retries" => {
            profile.max_retries = Some(parse_value(key, &value, "a non-negative number")?);
        }
        "auto_correlator" | "auto-correlator" => {
            profile.auto_correlator = Some(parse_value(key, &value, "'true' or 'false'")?);
        }
        other => {
            return Err(CliError::Validation {
                field: other.into(),
                reason: format!(
                    "unknown config key '{other}'. Valid keys: base_url, auth_mode, token_env, \
                     api_key_header, ca_cert, insecure, timeout, max_retries, auto_correlator"
                ),
            });
        }
    }
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init ────────────────────────────────────────────────────
        ConfigCommand::Init {
            name,
            url,
            auth_mode,
            token_env,
            api_key_header,
            default,
        } => {
            camara_config::parse_base_url(&url)?;
            check_auth_mode(&auth_mode)?;

            let mut cfg = config::load_config()?;
            let make_default = default || !cfg.profiles.contains_key(&cfg.profile_name(None));
            let profile = Profile {
                auth_mode,
                token_env,
                api_key_header,
                ..Profile::new(url)
            };
            let replaced = cfg.profiles.insert(name.clone(), profile).is_some();
            if make_default {
                cfg.default_profile = Some(name.clone());
            }

            let path = config::save_config(&cfg)?;
            let verb = if replaced { "Updated" } else { "Created" };
            output::status(
                &format!("✓ {verb} profile '{name}' in {}", path.display()),
                global.quiet,
            );
            output::status(
                &format!("  Store a token with: camara config set-token --profile {name}"),
                global.quiet,
            );
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let format = config::output_format(global, &cfg);
            output::emit(format, &redacted(&cfg), global.quiet)
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config()?;
            let profile_name = cfg.profile_name(global.profile.as_deref());
            let available = available_profiles(&cfg);

            let profile = cfg
                .profiles
                .get_mut(&profile_name)
                .ok_or_else(|| CliError::ProfileNotFound {
                    name: profile_name.clone(),
                    available,
                })?;
            set_profile_value(profile, &key, value)?;

            config::save_config(&cfg)?;
            output::status(&format!("✓ Set {key} on profile '{profile_name}'"), global.quiet);
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = config::load_config()?;
            let default = cfg.profile_name(None);
            if cfg.profiles.is_empty() {
                output::status(
                    "No profiles configured. Run: camara config init --url <URL>",
                    global.quiet,
                );
                return Ok(());
            }

            let mut names: Vec<_> = cfg.profiles.iter().collect();
            names.sort_by(|a, b| a.0.cmp(b.0));
            let lines: Vec<String> = names
                .into_iter()
                .map(|(name, profile)| {
                    let marker = if *name == default { " *" } else { "" };
                    format!("{name}{marker}\t{}", profile.base_url)
                })
                .collect();
            output::print_output(&lines.join("\n"), global.quiet);
            Ok(())
        }

        // ── Use <name> ──────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config()?;
            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    available: available_profiles(&cfg),
                    name,
                });
            }

            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            output::status(&format!("✓ Default profile set to '{name}'"), global.quiet);
            Ok(())
        }

        // ── SetToken ────────────────────────────────────────────────
        ConfigCommand::SetToken { value } => {
            let cfg = config::load_config()?;
            let profile_name = cfg.profile_name(global.profile.as_deref());
            if !cfg.profiles.contains_key(&profile_name) {
                return Err(CliError::ProfileNotFound {
                    available: available_profiles(&cfg),
                    name: profile_name,
                });
            }

            let token = match value {
                Some(token) => token,
                None => {
                    let mut line = String::new();
                    std::io::stdin().lock().read_line(&mut line)?;
                    line.trim().to_owned()
                }
            };
            if token.is_empty() {
                return Err(CliError::Validation {
                    field: "token".into(),
                    reason: "value cannot be empty".into(),
                });
            }

            camara_config::store_secret(&profile_name, &SecretString::from(token))?;
            output::status(
                &format!("✓ Token stored in system keyring for profile '{profile_name}'"),
                global.quiet,
            );
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }
    }
}
