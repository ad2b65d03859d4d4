#![allow(clippy::unwrap_used)]
// Integration tests for `NexecurClient` over `HttpTransport` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use nexecur_api::{
    ApiResponse, Error, HttpTransport, NexecurClient, RegisterRequest, SiteRequest,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, NexecurClient<HttpTransport>) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = NexecurClient::new(HttpTransport::from_reqwest(reqwest::Client::new()), base_url);
    (server, client)
}

// ── Credential endpoints ────────────────────────────────────────────

#[tokio::test]
async fn test_salt_is_sent_anonymously() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/webservices/salt"))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .and(body_json(json!({
            "id_site": "1234",
            "password": "secret",
            "id_device": "",
            "partage": "1",
            "pin": "",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "OK",
            "status": 0,
            "salt": "AQ==",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client
        .salt(&SiteRequest::new("1234", "secret", "", ""))
        .await
        .unwrap();

    assert!(resp.is_ok());
    assert_eq!(resp.salt, "AQ==");

    let received = server.received_requests().await.unwrap();
    let token = received[0].headers.get("x-auth-token").unwrap();
    assert!(token.is_empty());
}

#[tokio::test]
async fn test_site_uses_token_and_parses_panel() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/webservices/site"))
        .and(header("X-Auth-Token", "tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "OK",
            "status": 0,
            "token": "tok-2",
            "panel_status": 2,
            "panel_sp1_nom": "Night",
            "evenements": [
                {"id_evenement": 7, "message": "Armed", "date": 1_700_000_000},
            ],
            "devices": [{"serial": "CAM-1", "name": "Garden"}],
        })))
        .mount(&server)
        .await;

    let resp = client
        .site("tok-1", &SiteRequest::new("1234", "hash", "dev", "pin"))
        .await
        .unwrap();

    assert_eq!(resp.token.as_deref(), Some("tok-2"));
    assert_eq!(resp.panel_status, Some(2));
    assert_eq!(resp.panel_sp1_nom.as_deref(), Some("Night"));
    assert_eq!(resp.evenements.as_ref().unwrap().len(), 1);
    assert_eq!(resp.devices[0].serial.as_deref(), Some("CAM-1"));
}

#[tokio::test]
async fn test_register_posts_device_profile() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/webservices/register"))
        .and(header("X-Auth-Token", "tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "",
            "status": 0,
            "id_device": "dev-42",
        })))
        .mount(&server)
        .await;

    let resp = client
        .register("tok", &RegisterRequest::new("", "Hallway"))
        .await
        .unwrap();

    assert_eq!(resp.message(), Some(""));
    assert_eq!(resp.id_device.as_deref(), Some("dev-42"));
    // The register endpoint never reports "OK".
    assert!(!resp.is_ok());

    let received = server.received_requests().await.unwrap();
    let sent: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(sent["device_name"], "Hallway");
    assert_eq!(sent["plateforme"], "gcm");
}

// ── Panel endpoints ─────────────────────────────────────────────────

#[tokio::test]
async fn test_panel_status_sends_command() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/webservices/panel-status"))
        .and(body_json(json!({"status": 2})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "OK",
            "status": 0,
            "pending": 1,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client.panel_status("tok", Some(2)).await.unwrap();
    assert_eq!(resp.pending, Some(1));
}

#[tokio::test]
async fn test_panel_status_without_command_sends_empty_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/webservices/panel-status"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "OK",
            "status": 0,
            "pending": 0,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client.panel_status("tok", None).await.unwrap();
    assert_eq!(resp.pending, Some(0));
}

#[tokio::test]
async fn test_check_panel_status() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/webservices/check-panel-status"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "OK",
            "status": 0,
            "still_pending": 0,
        })))
        .mount(&server)
        .await;

    let resp = client.check_panel_status("tok").await.unwrap();
    assert_eq!(resp.still_pending, Some(0));
}

#[tokio::test]
async fn test_stream_and_configuration() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/webservices/stream"))
        .and(body_json(json!({"serial": "CAM-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "OK",
            "status": 0,
            "uri": "rtsp://example/stream",
            "expires": 60,
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/webservices/configuration"))
        .and(body_json(json!({"os": "android"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "OK",
            "status": 0,
            "min_version": "1.15",
        })))
        .mount(&server)
        .await;

    let stream = client.stream("tok", "CAM-1").await.unwrap();
    assert_eq!(stream.uri.as_deref(), Some("rtsp://example/stream"));
    assert_eq!(stream.extra["expires"], 60);

    let conf = client.configuration().await.unwrap();
    assert!(conf.is_ok());
    assert_eq!(conf.extra["min_version"], "1.15");
}

// ── Error cases ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_non_json_error_page() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/webservices/check-panel-status"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let result = client.check_panel_status("tok").await;
    match result {
        Err(Error::HttpStatus { status, ref body }) => {
            assert_eq!(status, 502);
            assert_eq!(body, "Bad Gateway");
        }
        other => panic!("expected HttpStatus error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_success_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/webservices/salt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let result = client.salt(&SiteRequest::new("1", "p", "", "")).await;
    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Nothing listens on the TCP port reserved for tcpmux.
    let base_url = Url::parse("http://127.0.0.1:1").unwrap();

    let client = NexecurClient::new(HttpTransport::from_reqwest(reqwest::Client::new()), base_url);
    let result = client.check_panel_status("tok").await;

    let err = result.unwrap_err();
    assert!(matches!(err, Error::Transport(_)), "got: {err:?}");
    assert!(err.is_transient());
}
