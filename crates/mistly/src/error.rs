//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use mistly_config::ConfigError;
use mistly_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const PARTIAL: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to the Mist cloud")]
    #[diagnostic(
        code(mistly::connection_failed),
        help(
            "Check network access and the profile's region.\n\
             Run: mistly regions"
        )
    )]
    ConnectionFailed {
        #[source]
        source: mistly_api::Error,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(mistly::timeout),
        help("Raise `timeout` in the profile or check connectivity to the region's API host.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed")]
    #[diagnostic(
        code(mistly::auth_failed),
        help(
            "Verify the API token and that it belongs to the profile's region.\n\
             Run: mistly config set-token"
        )
    )]
    AuthFailed { message: String },

    #[error("No API token configured for profile '{profile}'")]
    #[diagnostic(
        code(mistly::no_credentials),
        help(
            "Set MISTLY_API_TOKEN, or store one with: mistly config set-token --profile {profile}"
        )
    )]
    NoCredentials { profile: String },

    // ── Provisioning ─────────────────────────────────────────────────
    #[error("Could not clone org {source_org_id} as '{org_name}'; no sites were created")]
    #[diagnostic(code(mistly::clone_failed), help("API response: {payload}"))]
    CloneFailed {
        org_name: String,
        source_org_id: String,
        payload: String,
        #[source]
        source: mistly_api::Error,
    },

    #[error("Cannot read workbook {path}: {reason}")]
    #[diagnostic(
        code(mistly::workbook),
        help("Expected an .xlsx workbook with the deployment template on sheet '{sheet}'.")
    )]
    Workbook {
        path: String,
        sheet: String,
        reason: String,
    },

    #[error("{summary}")]
    #[diagnostic(
        code(mistly::partial_failure),
        help("See the report above for the failing entries and their API responses.")
    )]
    PartialFailure { summary: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(mistly::api_error))]
    Api(mistly_api::Error),

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(mistly::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(mistly::profile_not_found),
        help("Available profiles: {available}")
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No profiles configured")]
    #[diagnostic(
        code(mistly::no_config),
        help(
            "Add a [profiles.default] table with `region` and `msp_id`.\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(mistly::config))]
    Config(ConfigError),

    // ── IO / Serialization ────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to write CSV report: {0}")]
    #[diagnostic(code(mistly::csv))]
    Csv(#[from] csv::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(mistly::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(mistly::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::Validation { .. }
            | Self::ProfileNotFound { .. }
            | Self::NoConfig { .. }
            | Self::Workbook { .. } => exit_code::USAGE,
            Self::PartialFailure { .. } => exit_code::PARTIAL,
            _ => exit_code::GENERAL,
        }
    }
}

// ── mistly_api::Error → CliError ─────────────────────────────────────

impl From<mistly_api::Error> for CliError {
    fn from(err: mistly_api::Error) -> Self {
        if let mistly_api::Error::Transport(e) = &err {
            if e.is_timeout() {
                return Self::Timeout;
            }
            if e.is_connect() {
                return Self::ConnectionFailed { source: err };
            }
        }
        match err {
            mistly_api::Error::Authentication { message } => Self::AuthFailed { message },
            other => Self::Api(other),
        }
    }
}

// ── CoreError → CliError ─────────────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Configuration { message } => Self::Validation {
                field: "configuration".into(),
                reason: message,
            },

            CoreError::OrgClone {
                org_name,
                source_org_id,
                source,
            } => {
                if let mistly_api::Error::Authentication { message } = source {
                    return Self::AuthFailed { message };
                }
                Self::CloneFailed {
                    org_name,
                    source_org_id,
                    payload: source.payload().unwrap_or("<none>").to_owned(),
                    source,
                }
            }

            CoreError::Format { row, message } => Self::Validation {
                field: format!("row {row}"),
                reason: message,
            },

            CoreError::SiteCreation { source, .. }
            | CoreError::VariableBinding { source, .. }
            | CoreError::Fetch { source, .. }
            | CoreError::Api(source) => source.into(),
        }
    }
}

// ── ConfigError → CliError ───────────────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_failure_keeps_payload() {
        let err: CliError = CoreError::OrgClone {
            org_name: "Acme".into(),
            source_org_id: "org-123".into(),
            source: mistly_api::Error::Api {
                status: 404,
                message: "not found".into(),
                body: r#"{"detail":"org not found"}"#.into(),
            },
        }
        .into();
        match &err {
            CliError::CloneFailed { payload, .. } => {
                assert_eq!(payload, r#"{"detail":"org not found"}"#);
            }
            other => panic!("expected CloneFailed, got {other:?}"),
        }
        assert_eq!(err.exit_code(), exit_code::GENERAL);
    }

    #[test]
    fn auth_errors_map_to_auth_exit_code() {
        let err: CliError = mistly_api::Error::Authentication {
            message: "bad token".into(),
        }
        .into();
        assert_eq!(err.exit_code(), exit_code::AUTH);

        let err: CliError = ConfigError::NoCredentials {
            profile: "prod".into(),
        }
        .into();
        assert_eq!(err.exit_code(), exit_code::AUTH);
    }

    #[test]
    fn configuration_errors_are_usage_errors() {
        let err: CliError = CoreError::Configuration {
            message: "unknown cloud region 'mars'".into(),
        }
        .into();
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }
}
