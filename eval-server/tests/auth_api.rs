mod common;

use common::TestApp;
use eval_server::db::models::User;
use eval_server::db::repository::parse_record_id;
use http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::spawn().await;
    let (status, body) = app.request(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_register_then_profile() {
    let app = TestApp::spawn().await;
    let alice = app.register("alice", "employee", "IT").await;
    assert!(alice.id.starts_with("user:"));

    let (status, profile) = app.get("/api/auth/profile", &alice.token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["email"], "alice@example.com");
    assert_eq!(profile["role"], "employee");
    assert!(profile.get("password_hash").is_none());
    assert!(profile.get("password").is_none());
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let app = TestApp::spawn().await;
    app.register("bob", "employee", "IT").await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "email": "BOB@example.com",
                "password": "another1",
                "first_name": "Bob",
                "last_name": "Again",
                "department": "Sales",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email already registered");
    assert_eq!(body["code"], 6002);
}

#[tokio::test]
async fn test_register_validation() {
    let app = TestApp::spawn().await;
    let (status, body) = app
        .request(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "email": "not-an-email",
                "password": "123",
                "first_name": "X",
                "last_name": "Y",
                "department": "IT",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["code"].as_u64().is_some_and(|c| c != 0));
}

#[tokio::test]
async fn test_login_and_wrong_password() {
    let app = TestApp::spawn().await;
    app.register("carol", "manager", "Sales").await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"email": "carol@example.com", "password": "secret123"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["user"]["department"], "Sales");

    let (status, wrong) = app
        .request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"email": "carol@example.com", "password": "nope-nope"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, unknown) = app
        .request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"email": "nobody@example.com", "password": "secret123"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong["message"], unknown["message"]);
}

#[tokio::test]
async fn test_protected_routes_need_token() {
    let app = TestApp::spawn().await;
    let (status, _) = app.request(Method::GET, "/api/employees", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .request(Method::GET, "/api/dashboard", Some("garbage"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_of_removed_user_rejected() {
    let app = TestApp::spawn().await;
    let ghost = app.register("gus", "employee", "IT").await;
    assert_eq!(app.get("/api/auth/profile", &ghost.token).await.0, StatusCode::OK);

    let record = parse_record_id("user", &ghost.id).expect("user record id");
    let removed: Option<User> = app.db().delete(record).await.expect("delete user");
    assert!(removed.is_some());

    let (status, body) = app.get("/api/auth/profile", &ghost.token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "User no longer exists");
    assert_eq!(body["code"], 1008);
}
