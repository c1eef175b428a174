#![allow(clippy::unwrap_used)]
// End-to-end provisioning runs against a wiremock Mist API.

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, body_partial_json, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mistly_core::{
    CellValue, CloudRegion, CoreError, MistConfig, ProvisioningPipeline, ProvisioningSheet,
    RowOutcome,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, mistly_api::MistClient) {
    let server = MockServer::start().await;
    let base = Url::parse(&format!("{}/api/v1", server.uri())).unwrap();
    let client = MistConfig::new(CloudRegion::Global01, SecretString::from("t".to_owned()))
        .unwrap()
        .with_base_url(base)
        .build_client()
        .unwrap();
    (server, client)
}

fn site_row(name: &str, psk: &str) -> Vec<CellValue> {
    let mut cells = vec![
        name.into(),
        "1 Main St".into(),
        "US".into(),
        CellValue::Float(37.39),
        CellValue::Float(-122.08),
        "America/Los_Angeles".into(),
        "Pat".into(),
        "pat@example.com".into(),
        "+1 555 0100".into(),
        "branch".into(),
    ];
    cells.push(psk.into());
    cells
}

/// Sheet with org "Acme" cloned from "org-123", one `{{wifi_psk}}` column.
fn sheet(sites: &[(&str, &str)]) -> ProvisioningSheet {
    let mut rows = vec![vec![CellValue::Null; 11]; 5];
    rows[1][0] = "Acme".into();
    rows[1][7] = "org-123".into();
    rows[4][10] = "{{wifi_psk}}".into();
    for (name, psk) in sites {
        rows.push(site_row(name, psk));
    }
    ProvisioningSheet::new(rows)
}

async fn mount_clone(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/v1/orgs/org-123/clone"))
        .and(body_json(json!({ "name": "Acme" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "org-new" })))
        .expect(1)
        .mount(server)
        .await;
}

// ── Tests ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_single_row_clones_creates_and_binds() {
    let (server, client) = setup().await;
    mount_clone(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/v1/orgs/org-new/sites"))
        .and(body_partial_json(json!({
            "name": "HQ",
            "country_code": "US",
            "latlng": { "lat": 37.39, "lng": -122.08 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "site-1" })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/sites/site-1/setting"))
        .and(body_json(json!({ "vars": { "wifi_psk": "s3cret" } })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let report = ProvisioningPipeline::new(&client)
        .provision(&sheet(&[("HQ", "s3cret")]))
        .await
        .unwrap();

    assert_eq!(report.clone.new_org_id, "org-new");
    assert_eq!(report.clone.org_name, "Acme");
    assert_eq!(report.schema.len(), 1);
    assert_eq!(report.outcomes.len(), 1);
    assert_eq!(report.provisioned(), 1);
    assert!(matches!(
        &report.outcomes[0],
        RowOutcome::Provisioned { row: 6, site_id, .. } if site_id == "site-1"
    ));
}

#[tokio::test]
async fn test_clone_failure_creates_no_sites() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/orgs/org-123/clone"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({ "detail": "no access" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path_regex(r"^/api/v1/orgs/[^/]+/sites$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "x" })))
        .expect(0)
        .mount(&server)
        .await;

    let err = ProvisioningPipeline::new(&client)
        .provision(&sheet(&[("HQ", "a"), ("Branch", "b")]))
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::OrgClone { .. }), "got {err:?}");
    assert!(err.is_fatal());
    assert_eq!(err.api_status(), Some(403));
    assert_eq!(err.api_payload(), Some(r#"{"detail":"no access"}"#));
}

#[tokio::test]
async fn test_missing_source_org_sends_nothing() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut sheet_rows = vec![vec![CellValue::Null; 11]; 6];
    sheet_rows[1][0] = "Acme".into();
    sheet_rows[1][7] = CellValue::Float(f64::NAN);
    sheet_rows[5] = site_row("HQ", "a");

    let err = ProvisioningPipeline::new(&client)
        .provision(&ProvisioningSheet::new(sheet_rows))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Configuration { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_failed_site_is_skipped_and_never_bound() {
    let (server, client) = setup().await;
    mount_clone(&server).await;

    for (name, status, id) in [
        ("A", 200_u16, "site-a"),
        ("B", 400, "site-b"),
        ("C", 200, "site-c"),
    ] {
        let body = if status == 200 {
            json!({ "id": id })
        } else {
            json!({ "detail": "invalid timezone" })
        };
        Mock::given(method("POST"))
            .and(path("/api/v1/orgs/org-new/sites"))
            .and(body_partial_json(json!({ "name": name })))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .expect(1)
            .mount(&server)
            .await;
    }

    for (site_id, calls) in [("site-a", 1_u64), ("site-b", 0), ("site-c", 1)] {
        Mock::given(method("PUT"))
            .and(path(format!("/api/v1/sites/{site_id}/setting")))
            .respond_with(ResponseTemplate::new(200))
            .expect(calls)
            .mount(&server)
            .await;
    }

    let report = ProvisioningPipeline::new(&client)
        .provision(&sheet(&[("A", "1"), ("B", "2"), ("C", "3")]))
        .await
        .unwrap();

    let labels: Vec<&str> = report.outcomes.iter().map(RowOutcome::label).collect();
    assert_eq!(labels, vec!["provisioned", "site failed", "provisioned"]);
    assert_eq!(report.provisioned(), 2);
    assert_eq!(report.failed(), 1);

    let failed = &report.outcomes[1];
    assert_eq!(failed.row(), 7);
    assert_eq!(failed.site_name(), Some("B"));
    assert_eq!(
        failed.error().and_then(CoreError::api_payload),
        Some(r#"{"detail":"invalid timezone"}"#)
    );
}

#[tokio::test]
async fn test_binding_failure_leaves_site_unconfigured() {
    let (server, client) = setup().await;
    mount_clone(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/v1/orgs/org-new/sites"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "site-1" })))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/sites/site-1/setting"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream"))
        .expect(2)
        .mount(&server)
        .await;

    let report = ProvisioningPipeline::new(&client)
        .provision(&sheet(&[("HQ", "a"), ("Branch", "b")]))
        .await
        .unwrap();

    assert_eq!(report.outcomes.len(), 2);
    for outcome in &report.outcomes {
        assert!(matches!(outcome, RowOutcome::VariablesFailed { .. }), "got {outcome:?}");
        assert!(outcome.site_created());
        assert_eq!(outcome.error().and_then(CoreError::api_status), Some(500));
    }
}

#[tokio::test]
async fn test_short_row_is_rejected_without_requests() {
    let (server, client) = setup().await;
    mount_clone(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/v1/orgs/org-new/sites"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "site-1" })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/sites/site-1/setting"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut rows = vec![vec![CellValue::Null; 11]; 5];
    rows[1][0] = "Acme".into();
    rows[1][7] = "org-123".into();
    rows[4][10] = "{{wifi_psk}}".into();
    rows.push(vec!["Stub".into(), "only two".into()]);
    rows.push(site_row("HQ", "a"));

    let report = ProvisioningPipeline::new(&client)
        .provision(&ProvisioningSheet::new(rows))
        .await
        .unwrap();

    assert!(matches!(
        &report.outcomes[0],
        RowOutcome::Rejected { row: 6, error: CoreError::Format { .. } }
    ));
    assert!(matches!(&report.outcomes[1], RowOutcome::Provisioned { row: 7, .. }));
}
