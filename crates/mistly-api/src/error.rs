use thiserror::Error;

/// Top-level error type for the `mistly-api` crate.
///
/// Covers every failure mode of the Mist REST surface: authentication,
/// transport, rate limiting, non-2xx API responses, and payload decoding.
/// `mistly-core` attaches entity context and maps these into pipeline
/// outcomes.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Token rejected (HTTP 401) or not usable as a header value.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// An identifier that cannot be used as a URL path segment.
    #[error("Invalid identifier in request path: {0:?}")]
    InvalidPathSegment(String),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Rate limited by the cloud (HTTP 429).
    #[error("Rate limited -- retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    // ── API ─────────────────────────────────────────────────────────
    /// Any other non-2xx response. `body` is the raw payload as returned.
    #[error("Mist API error (HTTP {status}): {message}")]
    Api {
        status: u16,
        message: String,
        body: String,
    },

    /// A 2xx response that lacks a field the caller depends on.
    #[error("Response missing field `{field}`")]
    MissingField { field: &'static str, body: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::RateLimited { .. } => true,
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// HTTP status of the failed response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Authentication { .. } => Some(401),
            Self::RateLimited { .. } => Some(429),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The raw response body the API returned, when there was one.
    pub fn payload(&self) -> Option<&str> {
        match self {
            Self::Api { body, .. }
            | Self::MissingField { body, .. }
            | Self::Deserialization { body, .. } => Some(body),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_transient() {
        let err = Error::Api {
            status: 503,
            message: "unavailable".into(),
            body: String::new(),
        };
        assert!(err.is_transient());
        assert!(Error::RateLimited { retry_after_secs: 1 }.is_transient());
    }

    #[test]
    fn client_errors_are_not_transient() {
        let err = Error::Api {
            status: 400,
            message: "bad request".into(),
            body: r#"{"detail":"name taken"}"#.into(),
        };
        assert!(!err.is_transient());
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.payload(), Some(r#"{"detail":"name taken"}"#));
    }
}
