// Organization endpoints
//
// Cloning is the only org-level write; reads enumerate the orgs an MSP
// account owns.

use tracing::debug;

use crate::client::MistClient;
use crate::error::Error;
use crate::models::{CloneOrgRequest, Org};

impl MistClient {
    /// Clone an existing organization under a new name.
    ///
    /// `POST /orgs/{source_org_id}/clone` with `{"name": "..."}`. Returns
    /// the identifier of the newly created organization.
    pub async fn clone_org(&self, source_org_id: &str, name: &str) -> Result<String, Error> {
        debug!(source_org_id, name, "cloning org");
        self.post_for_id(
            &["orgs", source_org_id, "clone"],
            &CloneOrgRequest { name },
        )
        .await
    }

    /// List all organizations owned by an MSP.
    ///
    /// `GET /msps/{msp_id}/orgs`
    pub async fn list_msp_orgs(&self, msp_id: &str) -> Result<Vec<Org>, Error> {
        debug!(msp_id, "listing MSP orgs");
        self.get_paged(&["msps", msp_id, "orgs"], &[]).await
    }
}
