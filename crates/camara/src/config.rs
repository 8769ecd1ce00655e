//! CLI configuration: thin wrapper around `camara_config`.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--base-url, --token, --insecure, --timeout, --retries).

use std::time::Duration;

use clap::ValueEnum;
use secrecy::SecretString;

use camara_api::{Credentials, RetryPolicy, TlsMode, TransportConfig};
use camara_config::{ConnectionSettings, Defaults, Profile};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

pub use camara_config::{Config, config_path, load_config, save_config};

/// Output format: `--output` flag, then `defaults.output`, then JSON.
pub fn output_format(global: &GlobalOpts, config: &Config) -> OutputFormat {
    global
        .output
        .or_else(|| OutputFormat::from_str(&config.defaults.output, true).ok())
        .unwrap_or(OutputFormat::Json)
}

/// Build connection settings from the config file, the active profile and
/// CLI flag overrides.
pub fn resolve_settings(
    global: &GlobalOpts,
    config: &Config,
) -> Result<ConnectionSettings, CliError> {
    let profile_name = config.profile_name(global.profile.as_deref());

    if let Some(profile) = config.profiles.get(&profile_name) {
        return resolve_profile(profile, &profile_name, &config.defaults, global);
    }

    // An explicitly requested profile must exist.
    if global.profile.is_some() {
        config.profile(&profile_name)?;
    }

    // No profile: build from flags alone.
    let base_url = global.base_url.as_deref().ok_or_else(|| CliError::NoConfig {
        path: config_path().display().to_string(),
    })?;
    let credentials = match global.token {
        Some(ref token) => Credentials::bearer(token.clone()),
        None => {
            return Err(CliError::NoCredentials {
                profile: profile_name,
            });
        }
    };

    let profile = Profile::new(base_url);
    Ok(ConnectionSettings {
        base_url: camara_config::parse_base_url(base_url)?,
        credentials,
        transport: apply_overrides(
            camara_config::transport_for(&profile, &config.defaults),
            global,
        ),
    })
}

/// Translate a `Profile` plus global flags into `ConnectionSettings`.
///
/// CLI flag overrides take priority over profile values.
pub fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
    global: &GlobalOpts,
) -> Result<ConnectionSettings, CliError> {
    // 1. Base URL (flag > env > profile)
    let url_str = global.base_url.as_deref().unwrap_or(&profile.base_url);
    let base_url = camara_config::parse_base_url(url_str)?;

    // 2. Credentials; --token supplies the secret for the profile's auth mode
    let credentials = match global.token {
        Some(ref token) => camara_config::credentials_for(
            profile,
            Some(SecretString::from(token.clone())),
            profile_name,
        )?,
        None => camara_config::resolve_auth(profile, profile_name)?,
    };

    // 3. Transport
    let transport = apply_overrides(camara_config::transport_for(profile, defaults), global);

    Ok(ConnectionSettings {
        base_url,
        credentials,
        transport,
    })
}

fn apply_overrides(mut transport: TransportConfig, global: &GlobalOpts) -> TransportConfig {
    if global.insecure {
        transport = transport.with_tls(TlsMode::DangerAcceptInvalid);
    }
    if let Some(secs) = global.timeout {
        transport = transport.with_timeout(Duration::from_secs(secs));
    }
    if let Some(retries) = global.retries {
        transport = transport.with_retry(RetryPolicy::new(retries));
    }
    transport
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use camara_api::AuthStrategy;
    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["camara"];
        argv.extend_from_slice(args);
        argv.extend_from_slice(&["qos-profiles", "list"]);
        Cli::try_parse_from(argv).unwrap().global
    }

    fn config_with(name: &str, profile: Profile) -> Config {
        let mut config = Config::default();
        config.profiles.insert(name.into(), profile);
        config
    }

    fn open_profile() -> Profile {
        Profile {
            auth_mode: "none".into(),
            timeout: Some(12),
            ..Profile::new("https://api.example.com/camara")
        }
    }

    #[test]
    fn flags_override_profile_values() {
        let config = config_with("default", open_profile());
        let opts = global(&[
            "--base-url",
            "https://sandbox.example.com",
            "--timeout",
            "3",
            "--retries",
            "2",
            "--insecure",
        ]);

        let settings = resolve_settings(&opts, &config).unwrap();
        assert_eq!(settings.base_url.as_str(), "https://sandbox.example.com/");
        assert_eq!(settings.transport.timeout, Duration::from_secs(3));
        assert_eq!(settings.transport.retry.max_retries, 2);
        assert!(matches!(settings.transport.tls, TlsMode::DangerAcceptInvalid));
    }

    #[test]
    fn profile_values_apply_without_flags() {
        let config = config_with("default", open_profile());
        let settings = resolve_settings(&global(&[]), &config).unwrap();

        assert_eq!(settings.base_url.as_str(), "https://api.example.com/camara");
        assert_eq!(settings.transport.timeout, Duration::from_secs(12));
        assert_eq!(settings.credentials.strategy(), AuthStrategy::None);
    }

    #[test]
    fn token_flag_skips_the_credential_chain() {
        let config = config_with("default", Profile::new("https://api.example.com"));
        let settings = resolve_settings(&global(&["--token", "t-1"]), &config).unwrap();
        assert_eq!(settings.credentials.strategy(), AuthStrategy::Bearer);
    }

    #[test]
    fn token_flag_feeds_api_key_profiles() {
        let profile = Profile {
            auth_mode: "api-key".into(),
            api_key_header: Some("apikey".into()),
            ..Profile::new("https://api.example.com")
        };
        let config = config_with("default", profile);

        let settings = resolve_settings(&global(&["--token", "k-123"]), &config).unwrap();
        match settings.credentials {
            Credentials::ApiKey { ref header, .. } => assert_eq!(header, "apikey"),
            ref other => panic!("expected api key credentials, got {:?}", other.strategy()),
        }
    }

    #[test]
    fn flags_alone_need_a_base_url() {
        let err = resolve_settings(&global(&["--token", "t"]), &Config::default()).unwrap_err();
        assert!(matches!(err, CliError::NoConfig { .. }), "got {err:?}");

        let settings = resolve_settings(
            &global(&["--base-url", "http://localhost:9091", "--token", "t"]),
            &Config::default(),
        )
        .unwrap();
        assert_eq!(settings.base_url.as_str(), "http://localhost:9091/");
    }

    #[test]
    fn explicit_unknown_profile_is_an_error() {
        let config = config_with("default", open_profile());
        let err = resolve_settings(&global(&["--profile", "prod"]), &config).unwrap_err();
        assert!(matches!(err, CliError::ProfileNotFound { .. }), "got {err:?}");
    }

    #[test]
    fn output_falls_back_to_config_default() {
        let mut config = Config::default();
        config.defaults.output = "yaml".into();

        assert!(matches!(output_format(&global(&[]), &config), OutputFormat::Yaml));
        assert!(matches!(
            output_format(&global(&["-o", "json-compact"]), &config),
            OutputFormat::JsonCompact
        ));
    }
}
