//! Region listing.

use serde::Serialize;
use strum::IntoEnumIterator;
use tabled::Tabled;

use mistly_core::CloudRegion;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct RegionView {
    name: &'static str,
    key: &'static str,
    provider: &'static str,
    api_host: String,
    manage_host: String,
}

impl From<CloudRegion> for RegionView {
    fn from(r: CloudRegion) -> Self {
        Self {
            name: r.name(),
            key: r.key(),
            provider: r.provider(),
            api_host: r.api_host(),
            manage_host: r.manage_host(),
        }
    }
}

#[derive(Tabled)]
struct RegionRow {
    #[tabled(rename = "Region")]
    name: &'static str,
    #[tabled(rename = "Key")]
    key: &'static str,
    #[tabled(rename = "Provider")]
    provider: &'static str,
    #[tabled(rename = "API host")]
    api_host: String,
    #[tabled(rename = "Portal")]
    manage_host: String,
}

pub fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let regions: Vec<RegionView> = CloudRegion::iter().map(RegionView::from).collect();
    let out = output::render_list(global.output, &regions, |r| RegionRow {
        name: r.name,
        key: r.key,
        provider: r.provider,
        api_host: r.api_host.clone(),
        manage_host: r.manage_host.clone(),
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}
