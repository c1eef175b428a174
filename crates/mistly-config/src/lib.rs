//! Configuration for the mistly CLI.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! and translation to `mistly_core::MistConfig`. Region, MSP id and
//! token live here rather than on the command line.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use mistly_core::{CloudRegion, MistConfig, RetryPolicy, TlsVerification};

/// Token environment variable consulted after a profile's `api_token_env`.
pub const TOKEN_ENV: &str = "MISTLY_API_TOKEN";

/// Keyring service name; entries are keyed `<profile>/api-token`.
pub const KEYRING_SERVICE: &str = "mistly";

const REDACTED: &str = "********";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' is not defined")]
    UnknownProfile { name: String },

    #[error("no API token configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    /// Global defaults, overridable per profile.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named cloud profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,

    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            retry_attempts: default_retry_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
            page_size: default_page_size(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}
fn default_retry_attempts() -> u32 {
    1
}
fn default_retry_backoff_ms() -> u64 {
    500
}
fn default_page_size() -> u32 {
    100
}

/// A named Mist cloud profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Cloud region name or key (e.g. "global01", "gc1", "emea01").
    #[serde(default = "default_region")]
    pub region: String,

    /// Override of the region's API base URL.
    pub base_url: Option<String>,

    /// MSP account to crawl for inventory.
    pub msp_id: Option<String>,

    /// API token (plaintext; prefer keyring or env var).
    pub api_token: Option<String>,

    /// Environment variable name containing the API token.
    pub api_token_env: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Skip TLS verification.
    pub insecure: Option<bool>,

    /// Override timeout, in seconds.
    pub timeout: Option<u64>,

    /// Override retry attempts (1 disables retries).
    pub retry_attempts: Option<u32>,

    /// Override linear retry backoff step, in milliseconds.
    pub retry_backoff_ms: Option<u64>,

    /// Override list page size.
    pub page_size: Option<u32>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            region: default_region(),
            base_url: None,
            msp_id: None,
            api_token: None,
            api_token_env: None,
            ca_cert: None,
            insecure: None,
            timeout: None,
            retry_attempts: None,
            retry_backoff_ms: None,
            page_size: None,
        }
    }
}

fn default_region() -> String {
    CloudRegion::Global01.name().to_ascii_lowercase()
}

impl Config {
    /// Look up a profile by explicit name, then `default_profile`, then "default".
    pub fn profile(&self, name: Option<&str>) -> Result<(String, &Profile), ConfigError> {
        let name = name
            .map(str::to_owned)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| "default".into());
        match self.profiles.get(&name) {
            Some(profile) => Ok((name, profile)),
            None => Err(ConfigError::UnknownProfile { name }),
        }
    }

    /// Copy with plaintext tokens masked.
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut masked = self.clone();
        for profile in masked.profiles.values_mut() {
            if profile.api_token.is_some() {
                profile.api_token = Some(REDACTED.into());
            }
        }
        masked
    }

    /// Pretty TOML with plaintext tokens masked.
    pub fn to_redacted_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(&self.redacted())?)
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "MISTLY_CONFIG";

/// Resolve the config file path: `MISTLY_CONFIG`, else XDG / platform conventions.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }
    ProjectDirs::from("com", "mistly", "mistly").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("mistly");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load Config from `path` (missing file is fine) merged with `MISTLY_` env vars.
///
/// Env keys nest on double underscores, e.g.
/// `MISTLY_PROFILES__DEFAULT__REGION=emea01`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("MISTLY_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the API token: `api_token_env` → `MISTLY_API_TOKEN` → keyring → plaintext.
pub fn resolve_api_token(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    // 1. Profile's api_token_env → env var lookup
    if let Some(ref env_name) = profile.api_token_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 2. Global token env var
    if let Ok(val) = std::env::var(TOKEN_ENV) {
        return Ok(SecretString::from(val));
    }

    // 3. System keyring
    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/api-token")) {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    // 4. Plaintext in config
    if let Some(ref token) = profile.api_token {
        return Ok(SecretString::from(token.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Save a profile's API token in the system keyring.
pub fn store_api_token(profile_name: &str, token: &SecretString) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/api-token"))?;
    entry.set_password(token.expose_secret())?;
    Ok(())
}

/// The profile's MSP id, required for inventory.
pub fn require_msp_id<'a>(profile: &'a Profile, profile_name: &str) -> Result<&'a str, ConfigError> {
    profile
        .msp_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ConfigError::Validation {
            field: "msp_id".into(),
            reason: format!("not set for profile '{profile_name}'"),
        })
}

/// Build a `MistConfig` from a profile and the global defaults.
pub fn profile_to_mist_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<MistConfig, ConfigError> {
    let region = CloudRegion::resolve(&profile.region).map_err(|e| ConfigError::Validation {
        field: "region".into(),
        reason: e.to_string(),
    })?;

    let token = resolve_api_token(profile, profile_name)?;
    let mut config = MistConfig::new(region, token).map_err(|e| ConfigError::Validation {
        field: "region".into(),
        reason: e.to_string(),
    })?;

    if let Some(ref raw) = profile.base_url {
        let url: url::Url = raw.parse().map_err(|_| ConfigError::Validation {
            field: "base_url".into(),
            reason: format!("invalid URL: {raw}"),
        })?;
        config = config.with_base_url(url);
    }

    config.tls = if profile.insecure.unwrap_or(false) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    config.timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));

    let max_attempts = profile.retry_attempts.unwrap_or(defaults.retry_attempts);
    if max_attempts == 0 {
        return Err(ConfigError::Validation {
            field: "retry_attempts".into(),
            reason: "must be at least 1".into(),
        });
    }
    config.retry = RetryPolicy {
        max_attempts,
        backoff: Duration::from_millis(
            profile.retry_backoff_ms.unwrap_or(defaults.retry_backoff_ms),
        ),
    };

    let page_size = profile.page_size.unwrap_or(defaults.page_size);
    if page_size == 0 {
        return Err(ConfigError::Validation {
            field: "page_size".into(),
            reason: "must be at least 1".into(),
        });
    }
    config.page_size = page_size;

    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const SAMPLE: &str = r#"
default_profile = "prod"

[defaults]
timeout = 45

[profiles.prod]
region = "emea01"
msp_id = "msp-1"
api_token = "plain-token"
retry_attempts = 3

[profiles.lab]
region = "gc2"
base_url = "http://127.0.0.1:8080/api/v1"
api_token = "lab-token"
page_size = 10
"#;

    fn load(contents: &str) -> Config {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, contents).unwrap();
        load_config_from(&path).unwrap()
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.default_profile.as_deref(), Some("default"));
        assert_eq!(config.defaults.retry_attempts, 1);
        assert!(config.profiles.is_empty());
    }

    #[test]
    fn selects_default_profile() {
        let config = load(SAMPLE);
        let (name, profile) = config.profile(None).unwrap();
        assert_eq!(name, "prod");
        assert_eq!(profile.region, "emea01");
        assert_eq!(require_msp_id(profile, &name).unwrap(), "msp-1");

        let (name, _) = config.profile(Some("lab")).unwrap();
        assert_eq!(name, "lab");
        assert!(matches!(
            config.profile(Some("nope")),
            Err(ConfigError::UnknownProfile { .. })
        ));
    }

    #[test]
    fn builds_mist_config_with_overrides() {
        let config = load(SAMPLE);
        let (name, profile) = config.profile(Some("prod")).unwrap();
        let mist = profile_to_mist_config(profile, &name, &config.defaults).unwrap();
        assert_eq!(mist.region, CloudRegion::Emea01);
        assert_eq!(mist.base_url.as_str(), "https://api.eu.mist.com/api/v1");
        assert_eq!(mist.timeout, Duration::from_secs(45));
        assert_eq!(mist.retry.max_attempts, 3);
        assert_eq!(mist.retry.backoff, Duration::from_millis(500));
        assert_eq!(mist.page_size, 100);

        let (name, lab) = config.profile(Some("lab")).unwrap();
        let mist = profile_to_mist_config(lab, &name, &config.defaults).unwrap();
        assert_eq!(mist.base_url.as_str(), "http://127.0.0.1:8080/api/v1");
        assert_eq!(mist.page_size, 10);
        assert_eq!(mist.retry.max_attempts, 1);
    }

    #[test]
    fn unknown_region_is_a_validation_error() {
        let profile = Profile {
            region: "mars01".into(),
            api_token: Some("t".into()),
            ..Profile::default()
        };
        let err = profile_to_mist_config(&profile, "x", &Defaults::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "region"));
    }

    #[test]
    fn plaintext_token_is_last_resort() {
        let profile = Profile {
            api_token: Some("from-file".into()),
            api_token_env: Some("MISTLY_TEST_TOKEN_THAT_IS_NEVER_SET".into()),
            ..Profile::default()
        };
        if std::env::var(TOKEN_ENV).is_err() {
            let token = resolve_api_token(&profile, "mistly-test-unused-profile").unwrap();
            assert_eq!(token.expose_secret(), "from-file");
        }
    }

    #[test]
    fn missing_msp_id_is_reported() {
        let profile = Profile {
            msp_id: Some("  ".into()),
            ..Profile::default()
        };
        assert!(matches!(
            require_msp_id(&profile, "default"),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn redacted_toml_hides_tokens() {
        let rendered = load(SAMPLE).to_redacted_toml().unwrap();
        assert!(!rendered.contains("plain-token"));
        assert!(rendered.contains(REDACTED));
        assert!(rendered.contains("emea01"));
    }

    #[test]
    fn defaults_carry_only_transport_settings() {
        let config = load("[defaults]\noutput = \"json\"\npage_size = 50\n");
        assert_eq!(config.defaults.page_size, 50);
        let rendered = config.to_redacted_toml().unwrap();
        assert!(rendered.contains("page_size = 50"));
        assert!(!rendered.contains("output"));
    }
}
