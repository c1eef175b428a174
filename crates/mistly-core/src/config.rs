// ── Runtime connection configuration ──
//
// These types describe *how* to reach the Mist cloud. They carry the
// credential and connection tuning, but never touch disk: the CLI builds
// a `MistConfig` once and hands it to the pipelines by reference.

use std::time::Duration;

use mistly_api::{MistClient, RetryPolicy, TlsMode, TransportConfig};
use secrecy::SecretString;
use url::Url;

use crate::error::CoreError;
use crate::region::CloudRegion;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file (e.g. behind an inspecting proxy).
    CustomCa(std::path::PathBuf),
    /// Skip verification.
    DangerAcceptInvalid,
}

/// How the inventory crawl walks the MSP tree.
///
/// Only sequential traversal exists today: one listing in flight at a
/// time, branches visited in API order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum CrawlStrategy {
    #[default]
    Sequential,
}

/// Immutable configuration shared by every component of a run.
#[derive(Debug, Clone)]
pub struct MistConfig {
    /// Cloud deployment the token belongs to.
    pub region: CloudRegion,
    /// REST base URL. Derived from `region` unless overridden.
    pub base_url: Url,
    /// API token, sent as `Authorization: Token <token>`.
    pub token: SecretString,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Retry policy; single attempt by default.
    pub retry: RetryPolicy,
    /// Items requested per page on list endpoints.
    pub page_size: u32,
    /// Inventory traversal strategy.
    pub strategy: CrawlStrategy,
}

impl MistConfig {
    /// Configuration for a region with default tuning.
    pub fn new(region: CloudRegion, token: SecretString) -> Result<Self, CoreError> {
        let base_url = Url::parse(&region.base_url())
            .map_err(|e| CoreError::configuration(format!("invalid region URL: {e}")))?;
        Ok(Self {
            region,
            base_url,
            token,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
            page_size: 100,
            strategy: CrawlStrategy::default(),
        })
    }

    /// Point the client at a different base URL (proxies, test servers).
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
            retry: self.retry,
            page_size: self.page_size,
        }
    }

    /// Build the authenticated API client. No request is sent.
    pub fn build_client(&self) -> Result<MistClient, CoreError> {
        MistClient::from_token(self.base_url.as_str(), &self.token, &self.transport()).map_err(
            |e| CoreError::configuration(format!("cannot build API client: {e}")),
        )
    }
}
