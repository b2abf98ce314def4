//! Integration tests driving the client against a local mock server.

use ipintel_client::{blocking, IntelClient, IntelError, LookupOptions, QueryFlag, VpnCheck};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> IntelClient {
    IntelClient::builder()
        .api_key("test-key")
        .base_url(server.uri())
        .build()
}

#[tokio::test]
async fn single_lookup_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/8.8.8.8"))
        .and(query_param("key", "test-key"))
        .and(query_param("vpn", "2"))
        .and(query_param("asn", "1"))
        .and(query_param("ssl", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "proxy": "yes",
            "type": "VPN",
            "risk": 67,
            "asn": "AS9009",
            "isocode": "US",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let options = LookupOptions::new().vpn_level(VpnCheck::Extended).asn(true);
    let report = client.ip().lookup("8.8.8.8", &options).await.unwrap();

    assert!(report.is_proxy());
    assert_eq!(report.kind.as_deref(), Some("VPN"));
    assert_eq!(report.risk, Some(67));
    assert_eq!(report.asn.as_deref(), Some("AS9009"));
}

#[tokio::test]
async fn repeated_lookup_hits_cache_not_transport() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/8.8.8.8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "proxy": "no",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let options = LookupOptions::new().vpn(true);

    let first = client.ip().lookup("8.8.8.8", &options).await.unwrap();
    let second = client.ip().lookup("8.8.8.8", &options).await.unwrap();
    assert_eq!(first.proxy, second.proxy);
}

#[tokio::test]
async fn equivalent_options_share_the_cache_entry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/8.8.8.8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    // Same flags in a different insertion order, with a duplicate thrown in.
    let a = LookupOptions::new()
        .flag(QueryFlag::Risk)
        .flag(QueryFlag::Vpn)
        .flag(QueryFlag::Risk);
    let b = LookupOptions::new().flags([QueryFlag::Vpn, QueryFlag::Risk]);

    client.ip().lookup("8.8.8.8", &a).await.unwrap();
    client.ip().lookup("8.8.8.8", &b).await.unwrap();
}

#[tokio::test]
async fn caching_disabled_always_calls_transport() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/8.8.8.8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
        })))
        .expect(2)
        .mount(&server)
        .await;

    let client = IntelClient::builder()
        .base_url(server.uri())
        .caching(false)
        .build();
    let options = LookupOptions::new();

    client.ip().lookup("8.8.8.8", &options).await.unwrap();
    client.ip().lookup("8.8.8.8", &options).await.unwrap();
}

#[tokio::test]
async fn per_request_ttl_overrides_client_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/8.8.8.8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
        })))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    // Zero TTL: the entry expires the moment it is written.
    let options = LookupOptions::new().cache_ttl(Duration::ZERO);

    client.ip().lookup("8.8.8.8", &options).await.unwrap();
    client.ip().lookup("8.8.8.8", &options).await.unwrap();
}

#[tokio::test]
async fn error_statuses_map_to_typed_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/1.2.3.4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "error",
            "message": "Invalid API key supplied",
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .ip()
        .lookup("1.2.3.4", &LookupOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, IntelError::InvalidCredentials { .. }));
    assert_eq!(err.upstream_message(), Some("Invalid API key supplied"));
}

#[tokio::test]
async fn quota_errors_carry_structured_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/1.2.3.4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "error",
            "message": "You exceeded your plan limit",
            "plan": "free",
            "queries_today": 100,
            "maxQueries_day": 100,
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .ip()
        .lookup("1.2.3.4", &LookupOptions::new())
        .await
        .unwrap_err();
    match err {
        IntelError::QuotaExceeded { quota, .. } => {
            assert_eq!(quota.plan.as_deref(), Some("free"));
            assert_eq!(quota.queries_today, Some(100));
            assert_eq!(quota.max_queries_day, Some(100));
            assert_eq!(quota.queries_month, None);
            assert_eq!(quota.days_until_reset, None);
        }
        other => panic!("expected QuotaExceeded, got {other:?}"),
    }
}

#[tokio::test]
async fn error_responses_are_never_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/1.2.3.4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "error",
            "message": "Temporary lookup failure",
        })))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    for _ in 0..2 {
        let err = client
            .ip()
            .lookup("1.2.3.4", &LookupOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(err, IntelError::Upstream { .. }));
    }
}

#[tokio::test]
async fn unknown_status_is_a_generic_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/1.2.3.4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "sideways",
            "message": "what",
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .ip()
        .lookup("1.2.3.4", &LookupOptions::new())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        IntelError::Generic("Unknown status: sideways - what".to_string())
    );
}

#[tokio::test]
async fn malformed_payload_is_a_generic_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/1.2.3.4"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .ip()
        .lookup("1.2.3.4", &LookupOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, IntelError::Generic(_)));
}

#[tokio::test]
async fn transport_failure_is_wrapped() {
    // Nothing is listening on the server once it is dropped.
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let client = IntelClient::builder().base_url(uri).build();
    let err = client
        .ip()
        .lookup("8.8.8.8", &LookupOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, IntelError::Transport(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn batch_lookup_merges_status_and_omits_unknown_subjects() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/"))
        .and(query_param("ips", "1.2.3.4,5.6.7.8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "1.2.3.4": {"proxy": "yes", "risk": 10},
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let batch = client
        .ip()
        .lookup_many(["1.2.3.4", "5.6.7.8"], &LookupOptions::new())
        .await
        .unwrap();

    assert_eq!(batch.len(), 1);
    let record = &batch["1.2.3.4"];
    assert_eq!(record.status.as_deref(), Some("ok"));
    assert!(record.is_proxy());
    assert_eq!(record.risk, Some(10));
    assert!(!batch.contains_key("5.6.7.8"));
}

#[tokio::test]
async fn empty_batch_is_rejected_before_transport() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let err = client
        .ip()
        .lookup_many(Vec::<String>::new(), &LookupOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, IntelError::MalformedRequest { .. }));
    assert_eq!(server.received_requests().await.unwrap().len(), 0);
}

#[tokio::test]
async fn dashboard_requires_an_api_key() {
    let server = MockServer::start().await;
    let client = IntelClient::builder().base_url(server.uri()).build();

    let err = client
        .dashboard()
        .usage(&LookupOptions::new())
        .await
        .unwrap_err();
    assert!(err.is_auth_error());
    assert_eq!(server.received_requests().await.unwrap().len(), 0);
}

#[tokio::test]
async fn dashboard_usage_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dashboard/export/usage/"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "queries_today": 400,
            "daily_limit": 1000,
            "plan_tier": "starter",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let usage = client
        .dashboard()
        .usage(&LookupOptions::new())
        .await
        .unwrap();
    assert_eq!(usage.remaining_today(), Some(600));
    assert_eq!(usage.plan_tier.as_deref(), Some("starter"));
}

#[tokio::test]
async fn email_lookup_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/test@disposable.example"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "disposable": "yes",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let report = client
        .email()
        .check("test@disposable.example", &LookupOptions::new())
        .await
        .unwrap();
    assert!(report.is_disposable());
}

#[test]
fn blocking_client_shares_the_async_pipeline() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = runtime.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/8.8.8.8"))
            .and(query_param("vpn", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "ok",
                "proxy": "yes",
            })))
            .expect(1)
            .mount(&server)
            .await;
        server
    });

    let client = blocking::IntelClient::builder()
        .api_key("test-key")
        .base_url(server.uri())
        .build();
    let options = LookupOptions::new().vpn(true);

    // Second call answers from the shared cache: the mock expects one hit.
    let first = client.lookup("8.8.8.8", &options).unwrap();
    let second = client.lookup("8.8.8.8", &options).unwrap();
    assert!(first.is_proxy());
    assert!(second.is_proxy());
}
