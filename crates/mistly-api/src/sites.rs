// Site endpoints
//
// Site creation is org-scoped; the variable update targets the site's
// setting object directly.

use serde::Serialize;
use tracing::debug;

use crate::client::MistClient;
use crate::error::Error;
use crate::models::{Site, SiteVarsUpdate};

impl MistClient {
    /// Create a site under an organization.
    ///
    /// `POST /orgs/{org_id}/sites` with the site body. Returns the new site id.
    pub async fn create_site(
        &self,
        org_id: &str,
        site: &(impl Serialize + Sync),
    ) -> Result<String, Error> {
        debug!(org_id, "creating site");
        self.post_for_id(&["orgs", org_id, "sites"], site).await
    }

    /// Replace the site variables of a site.
    ///
    /// `PUT /sites/{site_id}/setting` with `{"vars": {...}}`.
    pub async fn update_site_vars<V: Serialize + Sync>(
        &self,
        site_id: &str,
        vars: &V,
    ) -> Result<(), Error> {
        debug!(site_id, "updating site variables");
        self.put_no_response(
            &["sites", site_id, "setting"],
            &SiteVarsUpdate { vars },
        )
        .await
    }

    /// List all sites of an organization.
    ///
    /// `GET /orgs/{org_id}/sites`
    pub async fn list_org_sites(&self, org_id: &str) -> Result<Vec<Site>, Error> {
        debug!(org_id, "listing org sites");
        self.get_paged(&["orgs", org_id, "sites"], &[]).await
    }
}
