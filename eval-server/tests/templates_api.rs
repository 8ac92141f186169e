mod common;

use common::TestApp;
use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_template_crud_by_admin() {
    let app = TestApp::spawn().await;
    let admin = app.register("ada", "admin", "HR").await;
    let employee = app.register("ivan", "employee", "IT").await;

    let id = app.create_template(&admin).await;

    let (status, list) = app.get("/api/templates", &employee.token).await;
    assert_eq!(status, StatusCode::OK);
    let list = list.as_array().expect("array");
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["creator"]["first_name"], "ada");

    let uri = format!("/api/templates/{id}");
    let (status, updated) = app
        .put(
            &uri,
            &admin.token,
            json!({"name": "Annual Review", "categories": ["leadership"]}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Annual Review");
    assert_eq!(updated["categories"], json!(["leadership"]));

    let (status, body) = app.delete(&uri, &admin.token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Template deleted");

    assert_eq!(app.get(&uri, &admin.token).await.0, StatusCode::NOT_FOUND);
    let (_, list) = app.get("/api/templates", &admin.token).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_template_writes_require_admin() {
    let app = TestApp::spawn().await;
    let manager = app.register("mia", "manager", "IT").await;

    let (status, body) = app
        .post(
            "/api/templates",
            &manager.token,
            json!({"name": "Mine", "categories": ["teamwork"]}),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Admin access required");
}

#[tokio::test]
async fn test_template_needs_name_and_category() {
    let app = TestApp::spawn().await;
    let admin = app.register("ada", "admin", "HR").await;

    let (status, _) = app
        .post(
            "/api/templates",
            &admin.token,
            json!({"name": "Empty", "categories": ["  "]}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(
            "/api/templates",
            &admin.token,
            json!({"name": " ", "categories": ["teamwork"]}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
