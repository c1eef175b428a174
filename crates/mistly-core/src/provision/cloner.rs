// ── Organization cloning ──

use mistly_api::MistClient;
use serde::Serialize;
use tracing::{error, info};

use crate::error::CoreError;

/// The destination organization of a provisioning run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CloneResult {
    pub source_org_id: String,
    pub new_org_id: String,
    pub org_name: String,
}

/// Check the source org id before anything touches the network.
///
/// Blank ids and the literal `nan` (what an empty numeric cell renders as
/// in some exports) are rejected.
pub fn validate_source_org_id(raw: &str) -> Result<&str, CoreError> {
    let id = raw.trim();
    if id.is_empty() || id.eq_ignore_ascii_case("nan") {
        return Err(CoreError::configuration(
            "no valid source org id found in the sheet",
        ));
    }
    Ok(id)
}

/// Clones a source organization into a new one.
pub struct TenantCloner<'a> {
    client: &'a MistClient,
}

impl<'a> TenantCloner<'a> {
    pub fn new(client: &'a MistClient) -> Self {
        Self { client }
    }

    /// Clone `source_org_id` as `org_name`.
    ///
    /// A bad source id fails with `Configuration` before any request; any
    /// API failure is an `OrgClone` error, which ends the run.
    pub async fn clone_org(
        &self,
        source_org_id: &str,
        org_name: &str,
    ) -> Result<CloneResult, CoreError> {
        let source_org_id = validate_source_org_id(source_org_id)?;

        match self.client.clone_org(source_org_id, org_name).await {
            Ok(new_org_id) => {
                info!(org_name, new_org_id = %new_org_id, "org cloned");
                Ok(CloneResult {
                    source_org_id: source_org_id.to_owned(),
                    new_org_id,
                    org_name: org_name.to_owned(),
                })
            }
            Err(source) => {
                error!(org_name, source_org_id, error = %source, "org clone failed");
                Err(CoreError::OrgClone {
                    org_name: org_name.to_owned(),
                    source_org_id: source_org_id.to_owned(),
                    source,
                })
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn accepts_trimmed_id() {
        assert_eq!(validate_source_org_id("  org-123\t").unwrap(), "org-123");
    }

    #[test]
    fn rejects_blank_and_nan() {
        for raw in ["", "   ", "nan", "NaN", " NAN "] {
            assert!(
                matches!(
                    validate_source_org_id(raw),
                    Err(CoreError::Configuration { .. })
                ),
                "expected rejection of {raw:?}"
            );
        }
    }
}
