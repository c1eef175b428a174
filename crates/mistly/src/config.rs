//! GlobalOpts-aware wrappers over `mistly_config`.

use mistly_config::{Config, ConfigError, Profile};
use mistly_core::MistConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Everything a networked command needs from the selected profile.
#[derive(Debug)]
pub struct Session {
    pub profile_name: String,
    pub profile: Profile,
    pub mist: MistConfig,
}

impl Session {
    /// MSP id of the profile; required by `inventory`.
    pub fn msp_id(&self) -> Result<&str, CliError> {
        Ok(mistly_config::require_msp_id(&self.profile, &self.profile_name)?)
    }
}

/// Load the config file merged with the environment.
pub fn load() -> Result<Config, CliError> {
    Ok(mistly_config::load_config()?)
}

/// Resolve `--profile` against the config and build the core `MistConfig`.
pub fn open_session(global: &GlobalOpts) -> Result<Session, CliError> {
    let cfg = load()?;

    let (profile_name, profile) = match cfg.profile(global.profile.as_deref()) {
        Ok(found) => found,
        Err(ConfigError::UnknownProfile { name }) => {
            return Err(missing_profile(&cfg, name));
        }
        Err(other) => return Err(other.into()),
    };

    let mist = mistly_config::profile_to_mist_config(profile, &profile_name, &cfg.defaults)?;
    tracing::debug!(
        profile = %profile_name,
        region = %mist.region,
        base_url = %mist.base_url,
        "profile resolved"
    );

    Ok(Session {
        profile: profile.clone(),
        profile_name,
        mist,
    })
}

fn missing_profile(cfg: &Config, name: String) -> CliError {
    if cfg.profiles.is_empty() {
        return CliError::NoConfig {
            path: mistly_config::config_path().display().to_string(),
        };
    }
    let mut available: Vec<&str> = cfg.profiles.keys().map(String::as_str).collect();
    available.sort_unstable();
    CliError::ProfileNotFound {
        name,
        available: available.join(", "),
    }
}
