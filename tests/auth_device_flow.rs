//! Device login against a mock Auth0 tenant.

use std::sync::{Arc, Mutex};

use blogdesk::auth::{Auth0DeviceAuth, AuthError, AuthProvider, DeviceChallenge};
use reqwest::{Client, Url};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn tenant() -> (MockServer, Auth0DeviceAuth) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/device/code"))
        .and(body_string_contains("client_id=test-client"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "device_code": "dev-123",
            "user_code": "WXYZ-1234",
            "verification_uri": "https://tenant.example.com/activate",
            "verification_uri_complete": "https://tenant.example.com/activate?user_code=WXYZ-1234",
            "expires_in": 30,
            "interval": 0
        })))
        .mount(&server)
        .await;

    let issuer = Url::parse(&format!("{}/", server.uri())).unwrap();
    let auth = Auth0DeviceAuth::with_client(Client::new(), issuer, "test-client");
    (server, auth)
}

fn pending(error: &str) -> ResponseTemplate {
    ResponseTemplate::new(403).set_body_json(json!({
        "error": error,
        "error_description": "waiting"
    }))
}

#[tokio::test]
async fn test_login_after_pending_poll() {
    let (server, auth) = tenant().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(pending("authorization_pending"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_string_contains("device_code=dev-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "token-abc",
            "token_type": "Bearer"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/userinfo"))
        .and(header("authorization", "Bearer token-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sub": "auth0|42",
            "nickname": "prof.ana",
            "email": "ana@example.com"
        })))
        .mount(&server)
        .await;

    let seen: Arc<Mutex<Option<DeviceChallenge>>> = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&seen);
    let user = auth
        .authorize(Box::new(move |challenge| {
            *sink.lock().unwrap() = Some(challenge);
        }))
        .await
        .unwrap();

    assert_eq!(user.display_name(), "prof.ana");
    assert!(auth.has_session());
    let challenge = seen.lock().unwrap().clone().unwrap();
    assert_eq!(challenge.user_code, "WXYZ-1234");
    assert_eq!(challenge.verification_uri, "https://tenant.example.com/activate");

    auth.clear_session().await.unwrap();
    assert!(!auth.has_session());
}

#[tokio::test]
async fn test_denied_login() {
    let (server, auth) = tenant().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(pending("access_denied"))
        .mount(&server)
        .await;

    let err = auth.authorize(Box::new(|_| {})).await.unwrap_err();
    assert!(matches!(err, AuthError::Denied));
    assert!(!auth.has_session());
}

#[tokio::test]
async fn test_unknown_client_is_a_provider_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/device/code"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "unauthorized_client",
            "error_description": "Unknown client"
        })))
        .mount(&server)
        .await;

    let issuer = Url::parse(&format!("{}/", server.uri())).unwrap();
    let auth = Auth0DeviceAuth::with_client(Client::new(), issuer, "nobody");
    match auth.authorize(Box::new(|_| {})).await.unwrap_err() {
        AuthError::Provider { code, description } => {
            assert_eq!(code, "unauthorized_client");
            assert_eq!(description, "Unknown client");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}
