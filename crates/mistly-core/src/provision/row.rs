// ── Row normalization ──
//
// Columns 0..=9 of a site row are fixed: name, address, country code,
// latitude, longitude, timezone, contact name, contact email, contact
// phone, site type. Template columns follow.

use crate::error::CoreError;
use crate::model::{CellValue, LatLng, SiteSpec, VariableBindings};

use super::sheet::SheetRow;
use super::template::TemplateSchema;

/// Number of fixed site columns at the start of every row.
pub const SITE_FIELD_COUNT: usize = 10;

/// Split a site row into the site-creation body and its variables.
///
/// Non-finite numbers become `null` in both. A variable column past the
/// end of the row reads as `null`. Only a row missing one of the fixed
/// columns entirely is rejected.
pub fn normalize(
    row: &SheetRow<'_>,
    schema: &TemplateSchema,
) -> Result<(SiteSpec, VariableBindings), CoreError> {
    let cells = row.cells;
    if cells.len() < SITE_FIELD_COUNT {
        return Err(CoreError::Format {
            row: row.number(),
            message: format!(
                "expected at least {SITE_FIELD_COUNT} site columns, found {}",
                cells.len()
            ),
        });
    }

    let field = |column: usize| cells[column].normalized();

    let spec = SiteSpec {
        name: field(0),
        address: field(1),
        country_code: field(2),
        latlng: LatLng {
            lat: field(3),
            lng: field(4),
        },
        timezone: field(5),
        contact_name: field(6),
        contact_email: field(7),
        contact_phone: field(8),
        site_type: field(9),
    };

    let mut bindings = VariableBindings::new();
    for column in schema {
        let value = cells
            .get(column.column)
            .map(CellValue::normalized)
            .unwrap_or_default();
        bindings.insert(column.variable.clone(), value);
    }

    Ok((spec, bindings))
}
