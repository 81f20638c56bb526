//! Integration tests for `ProviderClient` and the enrichment coordinator,
//! using wiremock HTTP mocks.

use scout_provider::{
    enrich_missing_hours, extract_businesses, has_hours, ProviderClient, ProviderError,
};
use wiremock::matchers::{body_partial_json, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server_uri: &str) -> ProviderClient {
    ProviderClient::with_endpoints(
        "test-key",
        30,
        "scout/test",
        &format!("{server_uri}/ai/chat/v2"),
        &format!("{server_uri}/v3/businesses"),
    )
    .expect("client construction should not fail")
}

#[tokio::test]
async fn chat_returns_session_id_text_and_raw_body() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "chat_id": "session-123",
        "response": {"text": "Here are three options nearby."},
        "entities": [{"businesses": [
            {"id": "b1", "name": "Cafe Mona", "rating": 4.4, "review_count": 210}
        ]}]
    });

    Mock::given(method("POST"))
        .and(path("/ai/chat/v2"))
        .and(body_partial_json(
            serde_json::json!({"query": "tacos near me"}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let reply = client
        .chat("tacos near me", None, Some((30.2672, -97.7431)))
        .await
        .expect("chat should succeed");

    assert_eq!(reply.chat_id.as_deref(), Some("session-123"));
    assert_eq!(reply.ai_text, "Here are three options nearby.");

    let businesses = extract_businesses(&reply.body);
    assert_eq!(businesses.len(), 1);
    assert_eq!(businesses[0].id, "b1");
}

#[tokio::test]
async fn chat_forwards_existing_session_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ai/chat/v2"))
        .and(body_partial_json(
            serde_json::json!({"chat_id": "existing-session"}),
        ))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"chat_id": "existing-session"})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let reply = client
        .chat("follow-up", Some("existing-session"), None)
        .await
        .expect("chat should succeed");
    assert_eq!(reply.chat_id.as_deref(), Some("existing-session"));
}

#[tokio::test]
async fn chat_non_success_status_carries_diagnostic_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ai/chat/v2"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid bearer token"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.chat("anything", None, None).await.unwrap_err();
    match err {
        ProviderError::Api { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("invalid bearer token"));
        }
        other => panic!("expected Api error, got: {other}"),
    }
}

#[tokio::test]
async fn chat_malformed_json_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ai/chat/v2"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json {"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.chat("anything", None, None).await.unwrap_err();
    assert!(
        matches!(err, ProviderError::Deserialize { .. }),
        "expected Deserialize, got: {err}"
    );
}

#[tokio::test]
async fn business_detail_fetches_by_id() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "id": "b1",
        "hours": [{"open": [
            {"day": 0, "start": "0900", "end": "1700", "is_overnight": false}
        ]}]
    });

    Mock::given(method("GET"))
        .and(path("/v3/businesses/b1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let detail = client.business_detail("b1").await.expect("detail fetch");
    assert_eq!(detail["id"], "b1");
    assert!(detail["hours"][0]["open"].is_array());
}

#[tokio::test]
async fn business_detail_percent_encodes_the_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/v3/businesses/caf%C3%A9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.business_detail("café").await;
    assert!(result.is_ok(), "expected encoded path to match: {result:?}");
}

fn search_response(with_hours: bool) -> serde_json::Value {
    let mut biz = serde_json::json!({
        "id": "b1",
        "name": "Cafe Mona",
        "location": {"formatted_address": "12 Main St"}
    });
    if with_hours {
        biz["contextual_info"] = serde_json::json!({"business_hours": [{
            "day_of_week": "Monday",
            "business_hours": [
                {"open_time": "2025-06-02 09:00:00", "close_time": "2025-06-02 17:00:00"}
            ]
        }]});
    }
    serde_json::json!({
        "chat_id": "session-123",
        "entities": [{"businesses": [biz]}]
    })
}

#[tokio::test]
async fn enrichment_fills_missing_hours_via_follow_up_call() {
    let server = MockServer::start().await;

    // The follow-up carries the original session id and the missing
    // business's name.
    Mock::given(method("POST"))
        .and(path("/ai/chat/v2"))
        .and(body_partial_json(
            serde_json::json!({"chat_id": "session-123"}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_response(true)))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let originals = extract_businesses(&search_response(false));
    assert!(!has_hours(&originals[0]));

    let merged = enrich_missing_hours(&client, originals, Some("session-123"), None).await;
    assert!(has_hours(&merged[0]), "hours should be merged in");
}

#[tokio::test]
async fn enrichment_failure_returns_originals_unmodified() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ai/chat/v2"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let originals = extract_businesses(&search_response(false));

    let merged = enrich_missing_hours(&client, originals.clone(), Some("session-123"), None).await;
    assert_eq!(merged.len(), originals.len());
    assert!(!has_hours(&merged[0]), "record stays without hours");
}

#[tokio::test]
async fn enrichment_is_skipped_without_a_session_id() {
    let server = MockServer::start().await;
    // No mock mounted: any request would 404 and the expect(0) below would
    // not hold if a call were issued.
    Mock::given(method("POST"))
        .and(path("/ai/chat/v2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_response(true)))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let originals = extract_businesses(&search_response(false));
    let merged = enrich_missing_hours(&client, originals, None, None).await;
    assert!(!has_hours(&merged[0]));
}

#[tokio::test]
async fn enrichment_is_skipped_when_nothing_is_missing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ai/chat/v2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_response(true)))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let originals = extract_businesses(&search_response(true));
    let merged = enrich_missing_hours(&client, originals, Some("session-123"), None).await;
    assert!(has_hours(&merged[0]));
}
