// ── Site creation and variable binding ──

use mistly_api::MistClient;
use tracing::{info, warn};

use crate::error::CoreError;
use crate::model::{SiteSpec, VariableBindings};

/// Creates sites under the destination org and applies their variables.
pub struct SiteProvisioner<'a> {
    client: &'a MistClient,
}

impl<'a> SiteProvisioner<'a> {
    pub fn new(client: &'a MistClient) -> Self {
        Self { client }
    }

    /// Create a site and return its id.
    pub async fn create_site(&self, org_id: &str, spec: &SiteSpec) -> Result<String, CoreError> {
        let site_name = spec.display_name();
        match self.client.create_site(org_id, spec).await {
            Ok(site_id) => {
                info!(site = %site_name, site_id = %site_id, "site created");
                Ok(site_id)
            }
            Err(source) => {
                warn!(site = %site_name, error = %source, "site creation failed");
                Err(CoreError::SiteCreation { site_name, source })
            }
        }
    }

    /// Replace the variables of an existing site.
    ///
    /// On failure the site stays in place without variables.
    pub async fn bind_variables(
        &self,
        site_id: &str,
        site_name: &str,
        bindings: &VariableBindings,
    ) -> Result<(), CoreError> {
        match self.client.update_site_vars(site_id, bindings).await {
            Ok(()) => {
                info!(site = site_name, count = bindings.len(), "site variables set");
                Ok(())
            }
            Err(source) => {
                warn!(site = site_name, site_id, error = %source, "site variables not applied");
                Err(CoreError::VariableBinding {
                    site_name: site_name.to_owned(),
                    site_id: site_id.to_owned(),
                    source,
                })
            }
        }
    }
}
