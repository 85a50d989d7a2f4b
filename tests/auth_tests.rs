use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use customer_portal::config::ClientOptions;
use customer_portal::customers::CustomerApi;
use customer_portal::screens::Route;
use customer_portal::CustomerPortal;

fn portal(server: &MockServer) -> CustomerPortal {
    CustomerPortal::new(ClientOptions::default().with_api_url(&server.uri())).unwrap()
}

#[tokio::test]
async fn test_login_stores_session() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({"email": "a@b.com", "password": "secret1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "tok123",
            "user": {"id": "1", "name": "A"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let portal = portal(&mock_server);
    assert!(!portal.route_guard().permits(Route::Customers));

    let response = portal.auth().login("a@b.com", "secret1").await.unwrap();
    assert_eq!(response.token, "tok123");

    assert!(portal.auth().is_authenticated());
    assert_eq!(portal.session().token().as_deref(), Some("tok123"));
    assert_eq!(portal.auth().current_user().unwrap().name(), Some("A"));
    assert!(portal.route_guard().permits(Route::Customers));
}

#[tokio::test]
async fn test_login_failure_keeps_anonymous() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "Invalid credentials"})))
        .mount(&mock_server)
        .await;

    let portal = portal(&mock_server);
    let err = portal.auth().login("a@b.com", "wrong-pass").await.unwrap_err();

    assert_eq!(err.status(), Some(reqwest::StatusCode::UNAUTHORIZED));
    assert_eq!(err.server_message(), Some("Invalid credentials"));
    assert!(!portal.auth().is_authenticated());
}

#[tokio::test]
async fn test_register_stores_session() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .and(body_json(json!({"name": "Alice", "email": "alice@example.com", "password": "abcdef"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "token": "fresh",
            "user": {"id": "2", "name": "Alice", "email": "alice@example.com"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let portal = portal(&mock_server);
    portal
        .auth()
        .register("Alice", "alice@example.com", "abcdef")
        .await
        .unwrap();

    assert!(portal.auth().is_authenticated());
    assert_eq!(
        portal.auth().current_user().unwrap().email(),
        Some("alice@example.com")
    );
}

#[tokio::test]
async fn test_register_conflict() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({"error": "Email already registered"})))
        .mount(&mock_server)
        .await;

    let portal = portal(&mock_server);
    let err = portal
        .auth()
        .register("Alice", "alice@example.com", "abcdef")
        .await
        .unwrap_err();

    assert!(err.is_conflict());
    assert_eq!(err.server_message(), Some("Email already registered"));
    assert!(!portal.auth().is_authenticated());
}

#[tokio::test]
async fn test_logout_drops_authorization_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "tok123",
            "user": {"id": "1", "name": "A"}
        })))
        .mount(&mock_server)
        .await;

    // first mounted mock wins, so this only answers authenticated calls
    Mock::given(method("GET"))
        .and(path("/customers"))
        .and(header("Authorization", "Bearer tok123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/customers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let portal = portal(&mock_server);
    portal.auth().login("a@b.com", "secret1").await.unwrap();
    portal.customers().list().await.unwrap();

    portal.auth().logout().unwrap();
    assert!(!portal.auth().is_authenticated());
    assert!(portal.auth().current_user().is_none());
    portal.customers().list().await.unwrap();
}

#[tokio::test]
async fn test_expired_token_is_an_ordinary_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/customers"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "Token expired"})))
        .mount(&mock_server)
        .await;

    let portal = portal(&mock_server);
    portal.session().save("stale", None).unwrap();

    let err = portal.customers().list().await.unwrap_err();
    assert!(!err.is_conflict());
    assert_eq!(err.status(), Some(reqwest::StatusCode::UNAUTHORIZED));
    // no refresh, no implicit logout
    assert!(portal.auth().is_authenticated());
}

#[tokio::test]
async fn test_session_persists_in_session_dir() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "tok123",
            "user": {"id": "1", "name": "A"}
        })))
        .mount(&mock_server)
        .await;

    let options = ClientOptions::default()
        .with_api_url(&mock_server.uri())
        .with_persist_session(true)
        .with_session_dir(dir.path());

    let first = CustomerPortal::new(options.clone()).unwrap();
    first.auth().login("a@b.com", "secret1").await.unwrap();

    let second = CustomerPortal::new(options.clone()).unwrap();
    let session = second.auth().get_session().unwrap();
    assert_eq!(session.token, "tok123");
    assert_eq!(session.user.unwrap().id().as_deref(), Some("1"));

    second.auth().logout().unwrap();
    assert!(!CustomerPortal::new(options).unwrap().auth().is_authenticated());
}
