// ── Site provisioning payloads ──

use indexmap::IndexMap;
use serde::Serialize;

use super::cell::CellValue;

/// Geographic position of a site, sent as `latlng: {lat, lng}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LatLng {
    pub lat: CellValue,
    pub lng: CellValue,
}

/// Body of a site-creation request, one per sheet row.
///
/// Values pass through from the sheet unchanged except that non-finite
/// numbers become `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SiteSpec {
    pub name: CellValue,
    pub address: CellValue,
    pub country_code: CellValue,
    pub latlng: LatLng,
    pub timezone: CellValue,
    pub contact_name: CellValue,
    pub contact_email: CellValue,
    pub contact_phone: CellValue,
    pub site_type: CellValue,
}

impl SiteSpec {
    /// Name used in logs and outcome reports.
    pub fn display_name(&self) -> String {
        let name = self.name.to_text();
        if name.trim().is_empty() {
            "<unnamed>".to_owned()
        } else {
            name
        }
    }
}

/// Site variables for one row, in template column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct VariableBindings(IndexMap<String, CellValue>);

impl VariableBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable, keeping the position of an earlier entry of the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: CellValue) {
        self.0.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&CellValue> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}
