#![allow(clippy::unwrap_used)]
// Integration tests for `RestClient` retry and pagination using wiremock.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use meraki_api::{Error, Params, RestClient, RetryPolicy, StopReason, TransportConfig, paginate};

// ── Helpers ─────────────────────────────────────────────────────────

fn fast_retry(max_retries: u32) -> RetryPolicy {
    RetryPolicy {
        max_retries,
        initial_delay: Duration::from_millis(5),
        max_delay: Duration::from_millis(20),
    }
}

async fn setup(retry: RetryPolicy) -> (MockServer, RestClient) {
    let server = MockServer::start().await;
    let config = TransportConfig {
        timeout: Duration::from_secs(5),
        retry,
    };
    let key: secrecy::SecretString = "test-key".to_string().into();
    let client = RestClient::new(&server.uri(), &key, &config).unwrap();
    (server, client)
}

// ── Request shape ───────────────────────────────────────────────────

#[tokio::test]
async fn test_sends_api_key_and_bracketed_lists() {
    let (server, client) = setup(fast_retry(0)).await;

    Mock::given(method("GET"))
        .and(path("/organizations/O_1/devices/statuses"))
        .and(header("X-Cisco-Meraki-API-Key", "test-key"))
        .and(query_param("productTypes[]", "switch"))
        .and(query_param("perPage", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"serial": "Q2XX"}])))
        .expect(1)
        .mount(&server)
        .await;

    let params = Params::new()
        .list("productTypes", ["switch"])
        .scalar("perPage", 1000);
    let body = client
        .get("/organizations/O_1/devices/statuses", &params)
        .await
        .unwrap();

    assert_eq!(body, json!([{"serial": "Q2XX"}]));
}

// ── Retry tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_retries_transient_failures_then_succeeds() {
    let (server, client) = setup(fast_retry(3)).await;

    Mock::given(method("GET"))
        .and(path("/organizations"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/organizations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "1", "name": "Acme"}])))
        .expect(1)
        .mount(&server)
        .await;

    let body = client.get("/organizations", &Params::new()).await.unwrap();
    assert_eq!(body[0]["name"], "Acme");
}

#[tokio::test]
async fn test_non_retryable_status_fails_immediately() {
    let (server, client) = setup(fast_retry(5)).await;

    Mock::given(method("GET"))
        .and(path("/devices/NOPE"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"errors":["Not found"]}"#))
        .expect(1)
        .mount(&server)
        .await;

    let result = client.get("/devices/NOPE", &Params::new()).await;
    let err = result.unwrap_err();
    assert!(err.is_not_found(), "expected 404, got: {err:?}");
    assert!(matches!(err, Error::Http { ref body, .. } if body.contains("Not found")));
}

#[tokio::test]
async fn test_rate_limit_exhausts_retry_budget() {
    let (server, client) = setup(fast_retry(2)).await;

    Mock::given(method("GET"))
        .and(path("/organizations"))
        .respond_with(ResponseTemplate::new(429))
        .expect(3)
        .mount(&server)
        .await;

    let result = client.get("/organizations", &Params::new()).await;
    assert!(
        matches!(
            result,
            Err(Error::Transport {
                attempts: 3,
                status: Some(429),
                ..
            })
        ),
        "expected exhausted Transport error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_retry_after_overrides_backoff() {
    let slow = RetryPolicy {
        max_retries: 1,
        initial_delay: Duration::from_secs(30),
        max_delay: Duration::from_secs(30),
    };
    let (server, client) = setup(slow).await;

    Mock::given(method("GET"))
        .and(path("/organizations"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/organizations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let body = tokio::time::timeout(
        Duration::from_secs(5),
        client.get("/organizations", &Params::new()),
    )
    .await
    .expect("Retry-After: 0 should not wait for computed backoff")
    .unwrap();

    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_connection_failure_is_transport_error() {
    let config = TransportConfig {
        timeout: Duration::from_secs(2),
        retry: fast_retry(1),
    };
    let key: secrecy::SecretString = "k".to_string().into();
    let client = RestClient::new("http://127.0.0.1:1/api/v1", &key, &config).unwrap();

    let result = client.get("/organizations", &Params::new()).await;
    assert!(
        matches!(result, Err(Error::Transport { attempts: 2, status: None, .. })),
        "got: {result:?}"
    );
}

#[tokio::test]
async fn test_stalled_body_is_retried() {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    // Headers arrive at once; the promised body never does.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let connections = Arc::new(AtomicU32::new(0));
    let seen = Arc::clone(&connections);
    tokio::spawn(async move {
        loop {
            let (mut socket, _) = listener.accept().await.unwrap();
            seen.fetch_add(1, Ordering::SeqCst);
            tokio::spawn(async move {
                let mut buf = [0_u8; 1024];
                let _ = socket.read(&mut buf).await;
                let _ = socket
                    .write_all(
                        b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\n\
                          content-length: 64\r\n\r\n[",
                    )
                    .await;
                tokio::time::sleep(Duration::from_secs(10)).await;
            });
        }
    });

    let config = TransportConfig {
        timeout: Duration::from_millis(200),
        retry: fast_retry(1),
    };
    let key: secrecy::SecretString = "k".to_string().into();
    let client = RestClient::new(&format!("http://{addr}/api/v1"), &key, &config).unwrap();

    let result = client.get("/organizations", &Params::new()).await;
    assert!(
        matches!(
            result,
            Err(Error::Transport {
                attempts: 2,
                status: Some(200),
                ..
            })
        ),
        "got: {result:?}"
    );
    assert_eq!(connections.load(Ordering::SeqCst), 2);
}

// ── Pagination tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_follows_link_header_cursor() {
    let (server, client) = setup(fast_retry(0)).await;
    let next = format!(
        r#"<{}/networks/N_1/clients?perPage=2&startingAfter=k0002>; rel="next""#,
        server.uri()
    );

    Mock::given(method("GET"))
        .and(path("/networks/N_1/clients"))
        .and(query_param_is_missing("startingAfter"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Link", next.as_str())
                .set_body_json(json!([{"id": "k0001"}, {"id": "k0002"}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/networks/N_1/clients"))
        .and(query_param("startingAfter", "k0002"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "k0003"}])))
        .expect(1)
        .mount(&server)
        .await;

    let params = Params::new().scalar("perPage", 2);
    let sweep = paginate(20, |cursor| {
        let client = &client;
        let params = &params;
        async move {
            client
                .get_page("/networks/N_1/clients", params, cursor.as_deref())
                .await
        }
    })
    .await
    .unwrap();

    let ids: Vec<_> = sweep.items.iter().map(|c| c["id"].clone()).collect();
    assert_eq!(ids, vec![json!("k0001"), json!("k0002"), json!("k0003")]);
    assert_eq!(sweep.pages, 2);
    assert_eq!(sweep.stop, StopReason::Exhausted);
}

#[tokio::test]
async fn test_malformed_page_stops_with_partial_results() {
    let (server, client) = setup(fast_retry(0)).await;
    let next = format!(
        r#"<{}/networks/N_1/clients?startingAfter=c1>; rel="next""#,
        server.uri()
    );

    Mock::given(method("GET"))
        .and(path("/networks/N_1/clients"))
        .and(query_param_is_missing("startingAfter"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Link", next.as_str())
                .set_body_json(json!([{"id": "a"}])),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/networks/N_1/clients"))
        .and(query_param("startingAfter", "c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"errors": ["boom"]})))
        .mount(&server)
        .await;

    let params = Params::new();
    let sweep = paginate(20, |cursor| {
        let client = &client;
        let params = &params;
        async move {
            client
                .get_page("/networks/N_1/clients", params, cursor.as_deref())
                .await
        }
    })
    .await
    .unwrap();

    assert_eq!(sweep.items.len(), 1);
    assert_eq!(sweep.stop, StopReason::Malformed);
}
