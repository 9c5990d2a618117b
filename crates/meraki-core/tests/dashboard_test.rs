#![allow(clippy::unwrap_used)]
// Facade composites: org maps, ports across a network, name resolution.

use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use meraki_core::{BackendMode, CoreError, Dashboard, DashboardConfig, PortWindow};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Dashboard) {
    let server = MockServer::start().await;
    let config = DashboardConfig::new(
        "test-key".to_string().into(),
        Url::parse(&server.uri()).unwrap(),
        "O_1",
        "N_1",
    )
    .with_mode(BackendMode::Rest)
    .with_max_retries(0);
    let dashboard = Dashboard::connect(&config).unwrap();
    (server, dashboard)
}

async fn mount_json(server: &MockServer, at: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

// ── Organization maps ───────────────────────────────────────────────

#[tokio::test]
async fn test_org_name_collision_last_write_wins() {
    let (server, dashboard) = setup().await;
    mount_json(
        &server,
        "/organizations",
        json!([
            {"id": "O_1", "name": "Acme"},
            {"id": "O_2", "name": "Acme"},
            {"id": "O_3", "name": "Globex"}
        ]),
    )
    .await;

    let by_name = dashboard.org_name_to_id().await.unwrap();
    assert_eq!(by_name.len(), 2);
    assert_eq!(by_name["Acme"], "O_2");

    let by_id = dashboard.org_id_to_name().await.unwrap();
    assert_eq!(by_id["O_1"], "Acme");
}

#[tokio::test]
async fn test_non_list_organizations_is_malformed() {
    let (server, dashboard) = setup().await;
    mount_json(&server, "/organizations", json!({"errors": ["nope"]})).await;

    let result = dashboard.organizations().await;
    assert!(matches!(result, Err(CoreError::MalformedResponse { .. })));
}

// ── Switch ports ────────────────────────────────────────────────────

#[tokio::test]
async fn test_ports_for_network_skip_switches_without_serial() {
    let (server, dashboard) = setup().await;
    mount_json(
        &server,
        "/organizations/O_1/devices/statuses",
        json!([
            {"name": "core-sw", "serial": "Q2SW-0001", "status": "online"},
            {"name": "ghost", "status": "offline"}
        ]),
    )
    .await;
    mount_json(
        &server,
        "/devices/Q2SW-0001/switch/ports/statuses",
        json!([{"portId": "1", "status": "Connected"}, {"portId": "2", "status": "Disconnected"}]),
    )
    .await;

    let switches = dashboard
        .switch_ports_for_network("O_1", "N_1", &PortWindow::default())
        .await
        .unwrap();

    assert_eq!(switches.len(), 1);
    assert_eq!(switches[0].name, "core-sw");
    assert_eq!(switches[0].ports.len(), 2);
}

#[tokio::test]
async fn test_ports_for_serial_fall_back_to_mac_label() {
    let (server, dashboard) = setup().await;
    mount_json(
        &server,
        "/devices/Q2SW-0009",
        json!({"serial": "Q2SW-0009", "mac": "e0:55:3d:00:00:09", "name": null}),
    )
    .await;
    mount_json(
        &server,
        "/devices/Q2SW-0009/switch/ports/statuses",
        json!([{"portId": "1"}]),
    )
    .await;

    let ports = dashboard
        .switch_ports_for_serial("Q2SW-0009", &PortWindow::default())
        .await
        .unwrap();
    assert_eq!(ports.name, "e0:55:3d:00:00:09");
    assert_eq!(ports.serial, "Q2SW-0009");
}

// ── Name resolution ─────────────────────────────────────────────────

#[tokio::test]
async fn test_name_resolution_is_non_fatal() {
    let (server, dashboard) = setup().await;
    mount_json(&server, "/networks/N_1", json!({"id": "N_1", "name": "HQ"})).await;
    Mock::given(method("GET"))
        .and(path("/organizations"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
        .mount(&server)
        .await;

    assert_eq!(dashboard.resolve_network_name("N_1").await, "HQ");
    assert_eq!(dashboard.resolve_network_name("N_404").await, "");
    assert_eq!(dashboard.resolve_org_name("O_1").await, "");
}
