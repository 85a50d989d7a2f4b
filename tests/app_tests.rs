use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use customer_portal::config::ClientOptions;
use customer_portal::screens::{Route, EMAIL_ALREADY_REGISTERED, LOGIN_FAILED, REGISTER_FAILED};
use customer_portal::validation::{ContactForm, Field, LoginForm, RegisterForm, PASSWORDS_DO_NOT_MATCH};
use customer_portal::CustomerPortal;

fn portal(server: &MockServer) -> CustomerPortal {
    CustomerPortal::new(ClientOptions::default().with_api_url(&server.uri())).unwrap()
}

fn customer_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": format!("Customer {}", id),
        "email": format!("{}@example.com", id),
        "status": true,
        "createdAt": "2024-03-05T14:07:09.000Z"
    })
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "tok123",
            "user": {"id": "1", "name": "A"}
        })))
        .mount(server)
        .await;
}

fn ids(app: &customer_portal::app::App) -> Vec<String> {
    app.customers_screen()
        .unwrap()
        .customers()
        .iter()
        .map(|c| c.id.clone())
        .collect()
}

#[tokio::test]
async fn test_guard_redirects_anonymous_users() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/customers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut app = portal(&mock_server).app();
    assert_eq!(app.navigate(Route::Customers).await, Route::Login);
    assert!(app.customers_screen().is_none());
}

#[tokio::test]
async fn test_customer_list_flow() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/customers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            customer_json("a"),
            customer_json("b"),
            customer_json("c")
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/customer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(customer_json("d")))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/customer"))
        .and(query_param("id", "b"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/customer"))
        .and(query_param("id", "c"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "nope"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let portal = portal(&mock_server);
    let mut app = portal.app();

    let route = app.submit_login(LoginForm::new("a@b.com", "secret1")).await;
    assert_eq!(route, Route::Customers);
    assert_eq!(ids(&app), ["a", "b", "c"]);

    let screen = app.customers_screen_mut().unwrap();

    // invalid input never reaches the API
    assert!(screen.submit(ContactForm::new("Al", "")).await.is_none());
    assert!(screen.errors().contains(Field::Name));
    assert!(screen.errors().contains(Field::Email));

    let created = screen.submit(ContactForm::new("Maria", "d@example.com")).await;
    assert_eq!(created.map(|c| c.id.clone()).as_deref(), Some("d"));
    assert_eq!(screen.form(), &ContactForm::default());

    assert!(screen.delete("b").await);
    assert!(!screen.delete("c").await);
    assert_eq!(ids(&app), ["a", "c", "d"]);

    // navigating back does not refetch
    assert_eq!(app.navigate(Route::Customers).await, Route::Customers);

    app.logout().unwrap();
    assert_eq!(app.route(), Route::Login);
    assert!(app.customers_screen().is_none());
    assert!(!portal.auth().is_authenticated());
    assert_eq!(app.navigate(Route::Customers).await, Route::Login);
}

#[tokio::test]
async fn test_logout_elsewhere_resets_app() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/customers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([customer_json("a")])))
        .mount(&mock_server)
        .await;

    let portal = portal(&mock_server);
    let mut app = portal.app();
    app.submit_login(LoginForm::new("a@b.com", "secret1")).await;
    assert!(app.customers_screen().is_some());

    portal.auth().logout().unwrap();
    app.sync();

    assert_eq!(app.route(), Route::Login);
    assert!(app.customers_screen().is_none());
}

#[tokio::test]
async fn test_login_screen_failure_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "Invalid credentials"})))
        .mount(&mock_server)
        .await;

    let mut app = portal(&mock_server).app();
    let route = app.submit_login(LoginForm::new("a@b.com", "secret1")).await;

    assert_eq!(route, Route::Login);
    assert_eq!(app.login_screen().message(), Some(LOGIN_FAILED));
}

#[tokio::test]
async fn test_login_screen_validation_blocks_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut app = portal(&mock_server).app();
    app.submit_login(LoginForm::new("nope", "123")).await;

    let screen = app.login_screen();
    assert!(screen.errors().contains(Field::Email));
    assert!(screen.errors().contains(Field::Password));
    assert!(screen.message().is_none());
}

#[tokio::test]
async fn test_register_mismatch_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut app = portal(&mock_server).app();
    let form = RegisterForm::new("Alice", "alice@example.com", "abcdef", "abcxyz");
    assert_eq!(app.submit_register(form).await, Route::Login);

    let errors = app.register_screen().errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get(Field::ConfirmPassword), Some(PASSWORDS_DO_NOT_MATCH));
}

#[tokio::test]
async fn test_register_conflict_is_localized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({"error": "Email already registered"})))
        .mount(&mock_server)
        .await;

    let mut app = portal(&mock_server).app();
    let form = RegisterForm::new("Alice", "alice@example.com", "abcdef", "abcdef");
    app.submit_register(form).await;

    assert_eq!(app.register_screen().message(), Some(EMAIL_ALREADY_REGISTERED));
}

#[tokio::test]
async fn test_register_other_failure_uses_fallback() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "database down"})))
        .mount(&mock_server)
        .await;

    let mut app = portal(&mock_server).app();
    let form = RegisterForm::new("Alice", "alice@example.com", "abcdef", "abcdef");
    app.submit_register(form).await;

    assert_eq!(app.register_screen().message(), Some(REGISTER_FAILED));
}

#[tokio::test]
async fn test_register_success_opens_customers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "token": "fresh",
            "user": {"id": "2", "name": "Alice"}
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/customers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut app = portal(&mock_server).app();
    let form = RegisterForm::new("Alice", "alice@example.com", "abcdef", "abcdef");

    assert_eq!(app.submit_register(form).await, Route::Customers);
    assert!(app.customers_screen().unwrap().customers().is_empty());
}
