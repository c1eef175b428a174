// ── Core error types ──
//
// Errors carry the human-readable name of the entity that failed plus
// the underlying API error, whose `payload()` keeps the raw response body.
// Recoverable kinds (site creation, variable binding, fetch, format) are
// stored inside per-item outcomes; only configuration and clone errors
// end a run.

use thiserror::Error;

use crate::model::CrawlLevel;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Fatal ────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Failed to clone org {source_org_id} as '{org_name}': {source}")]
    OrgClone {
        org_name: String,
        source_org_id: String,
        source: mistly_api::Error,
    },

    // ── Recoverable, per row ─────────────────────────────────────────
    #[error("Failed to create site '{site_name}': {source}")]
    SiteCreation {
        site_name: String,
        source: mistly_api::Error,
    },

    #[error("Site '{site_name}' ({site_id}) created but variables not applied: {source}")]
    VariableBinding {
        site_name: String,
        site_id: String,
        source: mistly_api::Error,
    },

    #[error("Row {row} is malformed: {message}")]
    Format { row: usize, message: String },

    // ── Recoverable, per crawl branch ────────────────────────────────
    #[error("Failed to list {level} of '{entity_name}' ({entity_id}): {source}")]
    Fetch {
        level: CrawlLevel,
        entity_name: String,
        entity_id: String,
        source: mistly_api::Error,
    },

    // ── API errors outside a pipeline step ───────────────────────────
    #[error(transparent)]
    Api(#[from] mistly_api::Error),
}

impl CoreError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Returns `true` for errors that end a whole run.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Configuration { .. } | Self::OrgClone { .. } | Self::Api(_)
        )
    }

    /// The raw body the API returned for the failing call, if any.
    pub fn api_payload(&self) -> Option<&str> {
        self.api_error().and_then(mistly_api::Error::payload)
    }

    /// HTTP status of the failing call, if one was received.
    pub fn api_status(&self) -> Option<u16> {
        self.api_error().and_then(mistly_api::Error::status)
    }

    fn api_error(&self) -> Option<&mistly_api::Error> {
        match self {
            Self::OrgClone { source, .. }
            | Self::SiteCreation { source, .. }
            | Self::VariableBinding { source, .. }
            | Self::Fetch { source, .. }
            | Self::Api(source) => Some(source),
            Self::Configuration { .. } | Self::Format { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(body: &str) -> mistly_api::Error {
        mistly_api::Error::Api {
            status: 400,
            message: "bad request".into(),
            body: body.into(),
        }
    }

    #[test]
    fn payload_survives_wrapping() {
        let err = CoreError::SiteCreation {
            site_name: "Branch 12".into(),
            source: api_error(r#"{"detail":"invalid timezone"}"#),
        };
        assert_eq!(err.api_payload(), Some(r#"{"detail":"invalid timezone"}"#));
        assert_eq!(err.api_status(), Some(400));
        assert!(err.to_string().contains("Branch 12"));
        assert!(!err.is_fatal());
    }

    #[test]
    fn clone_failure_is_fatal() {
        let err = CoreError::OrgClone {
            org_name: "Acme".into(),
            source_org_id: "org-123".into(),
            source: api_error("{}"),
        };
        assert!(err.is_fatal());
        assert!(CoreError::configuration("missing token").is_fatal());
    }

    #[test]
    fn fetch_message_names_the_branch() {
        let err = CoreError::Fetch {
            level: CrawlLevel::Sites,
            entity_name: "Org B".into(),
            entity_id: "org-b".into(),
            source: api_error("denied"),
        };
        assert_eq!(
            err.to_string(),
            "Failed to list sites of 'Org B' (org-b): Mist API error (HTTP 400): bad request"
        );
    }
}
