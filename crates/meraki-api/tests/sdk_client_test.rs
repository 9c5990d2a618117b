#![allow(clippy::unwrap_used)]
// Integration tests for the SDK-style `DashboardApi` using wiremock.

use serde_json::{Map, Value, json};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use meraki_api::sdk::operations::{
    GET_DEVICE, GET_NETWORK_CLIENTS, GET_ORGANIZATION_INVENTORY_DEVICES, GET_ORGANIZATIONS,
};
use meraki_api::{DashboardApi, Error, Params, SdkManifest, SessionCall};

// ── Helpers ─────────────────────────────────────────────────────────

fn kwargs(server: &MockServer) -> Map<String, Value> {
    let value = json!({
        "api_key": "test-key",
        "base_url": server.uri(),
        "single_request_timeout": 5,
        "maximum_retries": 0,
        "suppress_logging": true,
    });
    match value {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}

async fn setup(manifest: SdkManifest) -> (MockServer, DashboardApi) {
    let server = MockServer::start().await;
    let api = DashboardApi::from_kwargs(&kwargs(&server), manifest).unwrap();
    (server, api)
}

fn clients_page(server: &MockServer, ids: &[&str], next: Option<&str>) -> ResponseTemplate {
    let body: Vec<Value> = ids.iter().map(|id| json!({"id": id})).collect();
    let template = ResponseTemplate::new(200).set_body_json(body);
    match next {
        Some(cursor) => template.insert_header(
            "Link",
            format!(
                r#"<{}/networks/N_1/clients?startingAfter={cursor}>; rel="next""#,
                server.uri()
            )
            .as_str(),
        ),
        None => template,
    }
}

// ── Operation calls ─────────────────────────────────────────────────

#[tokio::test]
async fn test_call_renders_path_arguments() {
    let (server, api) = setup(SdkManifest::current()).await;

    Mock::given(method("GET"))
        .and(path("/devices/Q2XX-AAAA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"serial": "Q2XX-AAAA"})))
        .expect(1)
        .mount(&server)
        .await;

    let device = api.call(GET_DEVICE, &["Q2XX-AAAA"], &Params::new()).await.unwrap();
    assert_eq!(device["serial"], "Q2XX-AAAA");
}

#[tokio::test]
async fn test_total_pages_bounds_pagination() {
    let (server, api) = setup(SdkManifest::current()).await;

    Mock::given(method("GET"))
        .and(path("/networks/N_1/clients"))
        .and(query_param_is_missing("startingAfter"))
        .respond_with(clients_page(&server, &["a"], Some("c1")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/networks/N_1/clients"))
        .and(query_param("startingAfter", "c1"))
        .respond_with(clients_page(&server, &["b"], Some("c2")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/networks/N_1/clients"))
        .and(query_param("startingAfter", "c2"))
        .respond_with(clients_page(&server, &["c"], None))
        .mount(&server)
        .await;

    let two = Params::new().scalar("total_pages", 2).scalar("perPage", 1);
    let clients = api.call(GET_NETWORK_CLIENTS, &["N_1"], &two).await.unwrap();
    assert_eq!(clients.as_array().unwrap().len(), 2);

    let all = Params::new().scalar("total_pages", "all");
    let clients = api.call(GET_NETWORK_CLIENTS, &["N_1"], &all).await.unwrap();
    assert_eq!(clients.as_array().unwrap().len(), 3);

    let default = api.call(GET_NETWORK_CLIENTS, &["N_1"], &Params::new()).await.unwrap();
    assert_eq!(default.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_total_pages_is_not_sent_on_the_wire() {
    let (server, api) = setup(SdkManifest::current()).await;

    Mock::given(method("GET"))
        .and(path("/networks/N_1/clients"))
        .and(query_param_is_missing("total_pages"))
        .respond_with(clients_page(&server, &["a"], None))
        .expect(1)
        .mount(&server)
        .await;

    let params = Params::new().scalar("total_pages", "all");
    api.call(GET_NETWORK_CLIENTS, &["N_1"], &params).await.unwrap();
}

#[tokio::test]
async fn test_single_page_body_is_returned_untouched() {
    let (server, api) = setup(SdkManifest::current()).await;

    Mock::given(method("GET"))
        .and(path("/organizations/O_1/inventoryDevices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"errors": ["boom"]})))
        .expect(1)
        .mount(&server)
        .await;

    let body = api
        .call(GET_ORGANIZATION_INVENTORY_DEVICES, &["O_1"], &Params::new())
        .await
        .unwrap();
    assert_eq!(body, json!({"errors": ["boom"]}));
}

// ── Call-shape checking ─────────────────────────────────────────────

#[tokio::test]
async fn test_unexpected_keyword_is_rejected_before_request() {
    let manifest = SdkManifest::current().with_operation(GET_NETWORK_CLIENTS, &["timespan", "perPage"]);
    let (server, api) = setup(manifest).await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let params = Params::new().scalar("total_pages", 20);
    let result = api.call(GET_NETWORK_CLIENTS, &["N_1"], &params).await;
    assert!(
        matches!(result, Err(Error::UnexpectedKeyword { ref keyword, .. }) if keyword == "total_pages"),
        "got: {result:?}"
    );
}

#[tokio::test]
async fn test_direction_is_not_a_pagination_keyword() {
    let (server, api) = setup(SdkManifest::current()).await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let params = Params::new().scalar("direction", "prev");
    let result = api.call(GET_NETWORK_CLIENTS, &["N_1"], &params).await;
    assert!(
        matches!(result, Err(Error::UnexpectedKeyword { ref keyword, .. }) if keyword == "direction"),
        "got: {result:?}"
    );
}

#[tokio::test]
async fn test_missing_operation_is_unknown() {
    let manifest = SdkManifest::current().without_operation(GET_ORGANIZATIONS);
    let (_server, api) = setup(manifest).await;

    assert!(!api.has_operation(GET_ORGANIZATIONS));
    let result = api.call(GET_ORGANIZATIONS, &[], &Params::new()).await;
    assert!(matches!(result, Err(Error::UnknownOperation(ref op)) if op == GET_ORGANIZATIONS));
}

// ── Raw session ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_session_accepts_matching_shape() {
    let (server, api) = setup(SdkManifest::current()).await;

    Mock::given(method("GET"))
        .and(path("/networks/N_1/clients"))
        .and(query_param("recentDeviceConnections[]", "Wired"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "k1"}])))
        .expect(1)
        .mount(&server)
        .await;

    let session = api.session().unwrap();
    let metadata = json!({"tags": ["networks", "monitor", "clients"], "operation": "getNetworkClients"});
    let params = vec![("recentDeviceConnections[]".to_owned(), "Wired".to_owned())];
    let body = session
        .get(SessionCall::WithMetadata {
            metadata: &metadata,
            url: "/networks/N_1/clients",
            params: &params,
        })
        .await
        .unwrap();

    assert_eq!(body[0]["id"], "k1");
}

#[tokio::test]
async fn test_session_rejects_wrong_arity() {
    let manifest = SdkManifest::current().with_session_get(Some(&["url", "params"]));
    let (_server, api) = setup(manifest).await;

    let metadata = json!({});
    let result = api
        .session()
        .unwrap()
        .get(SessionCall::WithMetadata {
            metadata: &metadata,
            url: "/organizations",
            params: &[],
        })
        .await;

    assert!(
        matches!(result, Err(Error::ArityMismatch { expected: 2, given: 3, .. })),
        "got: {result:?}"
    );
}

// ── Constructor keywords ────────────────────────────────────────────

#[tokio::test]
async fn test_older_release_takes_plain_timeout_keyword() {
    let server = MockServer::start().await;
    let manifest = SdkManifest::current().with_constructor(&["api_key", "base_url", "timeout"]);

    let mut args = Map::new();
    args.insert("api_key".into(), json!("k"));
    args.insert("base_url".into(), json!(server.uri()));
    args.insert("timeout".into(), json!(10));
    assert!(DashboardApi::from_kwargs(&args, manifest.clone()).is_ok());

    args.insert("single_request_timeout".into(), json!(10));
    let result = DashboardApi::from_kwargs(&args, manifest);
    assert!(matches!(result, Err(Error::UnexpectedKeyword { ref callable, .. }) if callable == "DashboardAPI"));
}
