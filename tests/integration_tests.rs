//! Integration tests using wiremock to simulate the NetHunt API.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use nethunt::{Client, Error, Folder};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{any, body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USERNAME: &str = "user@example.com";
const API_KEY: &str = "api-key-123";
const INVALID_CREDENTIALS: &str = "Your email address or API key does not appear to be valid";

fn client_for(server: &MockServer) -> Client {
    Client::builder()
        .credentials(USERNAME, API_KEY)
        .base_url(server.uri())
        .unwrap()
        .build()
        .unwrap()
}

fn basic_auth(username: &str, secret: &str) -> String {
    format!("Basic {}", BASE64.encode(format!("{}:{}", username, secret)))
}

#[tokio::test]
async fn test_blank_credentials_fail_before_any_request() {
    let mock_server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let result = Client::builder()
        .credentials("", API_KEY)
        .base_url(mock_server.uri())
        .unwrap()
        .build();
    assert!(matches!(result, Err(Error::BlankField("Username"))));

    let result = Client::builder()
        .credentials(USERNAME, "")
        .base_url(mock_server.uri())
        .unwrap()
        .build();
    assert!(matches!(result, Err(Error::BlankField("API key"))));

    let result = Client::new("", "");
    match result {
        Err(e) => assert_eq!(e.to_string(), "Username cannot be blank"),
        Ok(_) => panic!("Expected BlankField error"),
    }
}

#[tokio::test]
async fn test_credential_headers_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/triggers/auth-test"))
        .and(header("authorization", basic_auth(USERNAME, API_KEY).as_str()))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client.auth_test().await.unwrap();

    assert_eq!(response.data, json!({ "ok": true }));
    assert_eq!(response.status.as_u16(), 200);
}

#[tokio::test]
async fn test_readable_folder() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/triggers/readable-folder"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"[{"id":"1","name":"Folder A"}]"#),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let folders = client.readable_folder().await.unwrap();

    assert_eq!(
        folders.data,
        vec![Folder {
            id: "1".to_string(),
            name: "Folder A".to_string(),
        }]
    );
    assert_eq!(folders.raw_body, r#"[{"id":"1","name":"Folder A"}]"#);
}

#[tokio::test]
async fn test_writable_folder() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/triggers/writable-folder"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "596f644b8f6d05e16c24b810", "name": "My first folder" },
            { "id": "596f644b8f6d05e16c24b811", "name": "My second folder" }
        ])))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let folders = client.writable_folder().await.unwrap();

    assert_eq!(folders.len(), 2);
    assert_eq!(folders[1].name, "My second folder");
}

#[tokio::test]
async fn test_folder_field_path_without_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/triggers/folder-field/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "name": "Phone" }])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let fields = client.folder_field("abc123").await.unwrap();
    assert_eq!(fields.data, json!([{ "name": "Phone" }]));

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn test_polling_endpoints_encode_params_inline() {
    let mock_server = MockServer::start().await;

    for endpoint in ["new-record", "new-comment", "updated-record", "record-change"] {
        Mock::given(method("GET"))
            .and(path(format!("/triggers/{}/abc123", endpoint)))
            .and(query_param("created", "today"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let client = client_for(&mock_server);
    let params = json!({ "created": "today" });

    assert_eq!(client.new_record("abc123", &params).await.unwrap().data, json!([]));
    assert_eq!(client.new_comment("abc123", &params).await.unwrap().data, json!([]));
    assert_eq!(client.updated_record("abc123", &params).await.unwrap().data, json!([]));
    assert_eq!(client.record_change("abc123", &params).await.unwrap().data, json!([]));

    for request in mock_server.received_requests().await.unwrap() {
        assert_eq!(request.url.query(), Some("created=today"));
    }
}

#[tokio::test]
async fn test_polling_without_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/triggers/record-change/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client.record_change("abc123", &json!({})).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn test_params_escape_reserved_characters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/triggers/new-record/abc123"))
        .and(query_param("name", "Smith & Sons"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client
        .new_record("abc123", &json!({ "name": "Smith & Sons" }))
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("name=Smith+%26+Sons"));
}

#[tokio::test]
async fn test_find_record_wraps_params_in_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/searches/find-record/abc123"))
        .and(query_param("query", "created=today"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": "r1" }])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let found = client
        .find_record("abc123", &json!({ "created": "today" }))
        .await
        .unwrap();

    assert_eq!(found.data, json!([{ "id": "r1" }]));

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("query=created=today"));
}

#[tokio::test]
async fn test_create_record_sends_json_body() {
    let mock_server = MockServer::start().await;

    let body = json!({
        "fields": { "Name": "Acme Ltd", "Employees": 42, "Active": true }
    });

    Mock::given(method("POST"))
        .and(path("/actions/create-record/abc123"))
        .and(body_json(&body))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "recordId": "r1", "fields": {} })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let created = client.create_record("abc123", &body).await.unwrap();
    assert_eq!(created["recordId"], "r1");

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests[0].body, serde_json::to_vec(&body).unwrap());
}

#[tokio::test]
async fn test_record_actions_post_to_record_paths() {
    let mock_server = MockServer::start().await;

    for action in ["create-comment", "create-call-log", "update-record"] {
        Mock::given(method("POST"))
            .and(path(format!("/actions/{}/rec1", action)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "action": action })))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let client = client_for(&mock_server);

    let comment = client
        .create_comment("rec1", &json!({ "text": "Called back" }))
        .await
        .unwrap();
    assert_eq!(comment.data, json!({ "action": "create-comment" }));

    let call_log = client
        .create_call_log("rec1", &json!({ "text": "Intro call", "duration": 5 }))
        .await
        .unwrap();
    assert_eq!(call_log.data, json!({ "action": "create-call-log" }));

    let updated = client
        .update_record("rec1", &json!({ "fieldActions": { "Name": { "overwrite": true } } }))
        .await
        .unwrap();
    assert_eq!(updated.data, json!({ "action": "update-record" }));
}

#[tokio::test]
async fn test_link_gmail_thread_returns_raw_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/actions/link-gmail-thread/rec1"))
        .and(body_json(json!({ "threadId": "t1" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"linked": true}"#)
                .insert_header("x-request-id", "abc"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client
        .link_gmail_thread("rec1", &json!({ "threadId": "t1" }))
        .await
        .unwrap();

    assert_eq!(response.data, r#"{"linked": true}"#);
    assert_eq!(response.raw_body, response.data);
    assert_eq!(response.header("x-request-id"), Some("abc"));
}

#[tokio::test]
async fn test_link_gmail_thread_accepts_non_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/actions/link-gmail-thread/rec1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client
        .link_gmail_thread("rec1", &json!({ "threadId": "t1" }))
        .await
        .unwrap();

    assert_eq!(response.data, "OK");
}

#[tokio::test]
async fn test_invalid_credentials_surface_remote_message() {
    let mock_server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(401).set_body_string(INVALID_CREDENTIALS))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    let errors = vec![
        client.auth_test().await.unwrap_err(),
        client.readable_folder().await.unwrap_err(),
        client.record_change("", &json!({})).await.unwrap_err(),
        client.create_record("abc123", &json!({})).await.unwrap_err(),
        client.link_gmail_thread("rec1", &json!({})).await.unwrap_err(),
    ];

    for err in errors {
        match &err {
            Error::HttpError {
                status,
                raw_response,
                ..
            } => {
                assert_eq!(status.as_u16(), 401);
                assert_eq!(raw_response, INVALID_CREDENTIALS);
            }
            other => panic!("Expected HttpError, got {:?}", other),
        }
        assert!(err.is_unauthorized());
        assert_eq!(err.raw_response(), Some(INVALID_CREDENTIALS));
    }
}

#[tokio::test]
async fn test_missing_id_is_forwarded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/triggers/folder-field/"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Folder not found"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.folder_field("").await.unwrap_err();

    assert_eq!(err.status().map(|s| s.as_u16()), Some(404));
    assert_eq!(err.raw_response(), Some("Folder not found"));
}

#[tokio::test]
async fn test_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/triggers/auth-test"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Maintenance"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.auth_test().await.unwrap_err();

    assert_eq!(err.status().map(|s| s.as_u16()), Some(503));
    assert!(!err.is_unauthorized());
}

#[tokio::test]
async fn test_deserialization_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/triggers/readable-folder"))
        .respond_with(ResponseTemplate::new(200).set_body_string("invalid json"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.readable_folder().await;

    match result {
        Err(Error::DeserializationFailed {
            raw_response,
            serde_error,
            status,
        }) => {
            assert_eq!(status.as_u16(), 200);
            assert_eq!(raw_response, "invalid json");
            assert!(serde_error.contains("expected"));
        }
        _ => panic!("Expected DeserializationFailed, got {:?}", result),
    }
}

#[tokio::test]
async fn test_network_error() {
    // Nothing listens on port 1
    let client = Client::builder()
        .credentials(USERNAME, API_KEY)
        .base_url("http://127.0.0.1:1")
        .unwrap()
        .build()
        .unwrap();

    let result = client.auth_test().await;
    assert!(matches!(result, Err(Error::Network(_))), "got {:?}", result);
}

#[tokio::test]
async fn test_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/triggers/auth-test"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let client = Client::builder()
        .credentials(USERNAME, API_KEY)
        .base_url(mock_server.uri())
        .unwrap()
        .timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let result = client.auth_test().await;
    assert!(matches!(result, Err(Error::Timeout)), "got {:?}", result);
}

#[tokio::test]
async fn test_base_url_with_path_prefix() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/zapier/triggers/auth-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::builder()
        .credentials(USERNAME, API_KEY)
        .base_url(format!("{}/api/v1/zapier", mock_server.uri()))
        .unwrap()
        .build()
        .unwrap();

    client.auth_test().await.unwrap();
}

#[tokio::test]
async fn test_default_headers_cannot_replace_credentials() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/triggers/auth-test"))
        .and(header("authorization", basic_auth(USERNAME, API_KEY).as_str()))
        .and(header("user-agent", "test-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::builder()
        .credentials(USERNAME, API_KEY)
        .base_url(mock_server.uri())
        .unwrap()
        .default_header("Authorization", "Basic bogus")
        .unwrap()
        .default_header("User-Agent", "test-agent")
        .unwrap()
        .build()
        .unwrap();

    client.auth_test().await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests[0].headers.get_all("authorization").iter().count(), 1);
}

#[tokio::test]
async fn test_concurrent_clients_keep_their_own_credentials() {
    let mock_server = MockServer::start().await;

    for (user, key) in [("alice@example.com", "key-a"), ("bob@example.com", "key-b")] {
        Mock::given(method("GET"))
            .and(path("/triggers/auth-test"))
            .and(header("authorization", basic_auth(user, key).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "user": user })))
            .expect(3)
            .mount(&mock_server)
            .await;
    }

    let alice = Client::builder()
        .credentials("alice@example.com", "key-a")
        .base_url(mock_server.uri())
        .unwrap()
        .build()
        .unwrap();
    let bob = Client::builder()
        .credentials("bob@example.com", "key-b")
        .base_url(mock_server.uri())
        .unwrap()
        .build()
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..3 {
        for client in [alice.clone(), bob.clone()] {
            handles.push(tokio::spawn(async move { client.auth_test().await }));
        }
    }

    let mut alice_count = 0;
    let mut bob_count = 0;
    for handle in handles {
        let response = handle.await.unwrap().unwrap();
        match response.data["user"].as_str() {
            Some("alice@example.com") => alice_count += 1,
            Some("bob@example.com") => bob_count += 1,
            other => panic!("Unexpected user {:?}", other),
        }
    }

    assert_eq!(alice_count, 3);
    assert_eq!(bob_count, 3);
}
