// ── Cloud region lookup ──
//
// Mist runs several independent cloud deployments. Each has a display
// name (e.g. "Global03") and a short key (e.g. "ac2") that forms the API
// host. The table is closed: an unknown key is a configuration error.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

use crate::error::CoreError;

/// A Mist cloud deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize)]
pub enum CloudRegion {
    Global01,
    Global02,
    Global03,
    Global04,
    #[serde(rename = "EMEA01")]
    Emea01,
    #[serde(rename = "EMEA02")]
    Emea02,
    #[serde(rename = "APAC01")]
    Apac01,
}

impl CloudRegion {
    /// Display name as shown in the Mist portal.
    pub fn name(self) -> &'static str {
        match self {
            Self::Global01 => "Global01",
            Self::Global02 => "Global02",
            Self::Global03 => "Global03",
            Self::Global04 => "Global04",
            Self::Emea01 => "EMEA01",
            Self::Emea02 => "EMEA02",
            Self::Apac01 => "APAC01",
        }
    }

    /// Short key used in the management and API hostnames.
    pub fn key(self) -> &'static str {
        match self {
            Self::Global01 => "mist",
            Self::Global02 => "gc1",
            Self::Global03 => "ac2",
            Self::Global04 => "gc2",
            Self::Emea01 => "eu",
            Self::Emea02 => "gc3",
            Self::Apac01 => "ac5",
        }
    }

    /// Hosting provider of the deployment.
    pub fn provider(self) -> &'static str {
        match self {
            Self::Global01 | Self::Global03 | Self::Emea01 | Self::Apac01 => "AWS",
            Self::Global02 | Self::Global04 | Self::Emea02 => "GCP",
        }
    }

    /// API hostname, e.g. `api.ac2.mist.com`. Global01 has no region label.
    pub fn api_host(self) -> String {
        match self {
            Self::Global01 => "api.mist.com".to_owned(),
            other => format!("api.{}.mist.com", other.key()),
        }
    }

    /// Management portal hostname, e.g. `manage.ac2.mist.com`.
    pub fn manage_host(self) -> String {
        match self {
            Self::Global01 => "manage.mist.com".to_owned(),
            other => format!("manage.{}.mist.com", other.key()),
        }
    }

    /// REST base URL, e.g. `https://api.ac2.mist.com/api/v1`.
    pub fn base_url(self) -> String {
        format!("https://{}/api/v1", self.api_host())
    }

    /// Look up a region by display name or short key (case-insensitive).
    pub fn resolve(key: &str) -> Result<Self, CoreError> {
        let wanted = key.trim();
        Self::iter()
            .find(|r| r.name().eq_ignore_ascii_case(wanted) || r.key().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let known: Vec<&str> = Self::iter().map(Self::name).collect();
                CoreError::configuration(format!(
                    "unknown cloud region '{wanted}' (expected one of: {})",
                    known.join(", ")
                ))
            })
    }
}

impl fmt::Display for CloudRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CloudRegion {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn resolves_display_names() {
        assert_eq!(
            CloudRegion::resolve("Global03").unwrap().base_url(),
            "https://api.ac2.mist.com/api/v1"
        );
        assert_eq!(
            CloudRegion::resolve("emea01").unwrap().base_url(),
            "https://api.eu.mist.com/api/v1"
        );
    }

    #[test]
    fn resolves_short_keys() {
        assert_eq!(CloudRegion::resolve("gc3").unwrap(), CloudRegion::Emea02);
        assert_eq!(CloudRegion::resolve("mist").unwrap(), CloudRegion::Global01);
    }

    #[test]
    fn global01_has_no_region_label() {
        assert_eq!(
            CloudRegion::Global01.base_url(),
            "https://api.mist.com/api/v1"
        );
        assert_eq!(CloudRegion::Global01.manage_host(), "manage.mist.com");
    }

    #[test]
    fn unknown_region_is_configuration_error() {
        let err = CloudRegion::resolve("Mars01").unwrap_err();
        assert!(matches!(err, CoreError::Configuration { .. }));
        assert!(err.to_string().contains("Mars01"));
    }

    #[test]
    fn table_has_seven_deployments() {
        assert_eq!(CloudRegion::iter().count(), 7);
        assert_eq!(CloudRegion::Apac01.to_string(), "APAC01");
        assert_eq!(CloudRegion::Global04.provider(), "GCP");
    }
}
