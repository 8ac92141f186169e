mod common;

use common::{TestApp, criterion};
use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_create_starts_pending_then_completes() {
    let app = TestApp::spawn().await;
    let admin = app.register("ada", "admin", "HR").await;
    let evaluator = app.register("eve", "employee", "IT").await;
    let subject = app.register("sam", "employee", "IT").await;
    let template = app.create_template(&admin).await;

    let id = app
        .create_evaluation(&evaluator, &subject, &template, json!([]))
        .await;
    let uri = format!("/api/evaluations/{id}");

    let (status, created) = app.get(&uri, &subject.token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["status"], "pending");
    assert_eq!(created["evaluator"], evaluator.id.as_str());
    assert_eq!(created["type"], "peer");
    assert_eq!(created["employee_info"]["first_name"], "sam");
    assert_eq!(created["template_info"]["name"], "Quarterly Review");
    assert!(created.get("overall_score").is_none());

    let (status, touched) = app
        .put(&uri, &evaluator.token, json!({"general_comments": "Started"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(touched["status"], "in_progress");

    let (status, scored) = app
        .put(
            &uri,
            &evaluator.token,
            json!({
                "criteria": [criterion("technical_skills", 4), criterion("teamwork", 5)],
                "submitted": true,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(scored["status"], "completed");
    assert_eq!(scored["overall_score"], 4.5);
    assert!(scored["submitted_at"].is_i64());
    assert_eq!(scored["general_comments"], "Started");
}

#[tokio::test]
async fn test_fetch_after_create_returns_same_scoring() {
    let app = TestApp::spawn().await;
    let admin = app.register("ada", "admin", "HR").await;
    let manager = app.register("mia", "manager", "IT").await;
    let subject = app.register("sam", "employee", "IT").await;
    let template = app.create_template(&admin).await;

    let criteria = json!([
        criterion("leadership", 4),
        criterion("productivity", 4),
        criterion("soft_skills", 3),
    ]);
    let (status, created) = app
        .post(
            "/api/evaluations",
            &manager.token,
            json!({
                "template": template,
                "employee": subject.id,
                "type": "manager",
                "period": {"start_date": "2024-07-01", "end_date": "2024-12-31"},
                "criteria": criteria,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["overall_score"], 3.67);
    assert_eq!(created["status"], "pending");

    let uri = format!("/api/evaluations/{}", created["id"].as_str().expect("id"));
    let (status, fetched) = app.get(&uri, &subject.token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["criteria"], criteria);
    assert_eq!(fetched["criteria"], created["criteria"]);
    assert_eq!(fetched["type"], "manager");
    assert_eq!(fetched["overall_score"], created["overall_score"]);
    assert_eq!(fetched["period"], created["period"]);
}

#[tokio::test]
async fn test_clearing_criteria_reverts_to_in_progress() {
    let app = TestApp::spawn().await;
    let admin = app.register("ada", "admin", "HR").await;
    let evaluator = app.register("eve", "employee", "IT").await;
    let subject = app.register("sam", "employee", "IT").await;
    let template = app.create_template(&admin).await;

    let id = app
        .create_evaluation(&evaluator, &subject, &template, json!([criterion("leadership", 3)]))
        .await;
    let uri = format!("/api/evaluations/{id}");

    let (_, body) = app.put(&uri, &evaluator.token, json!({"criteria": []})).await;
    assert_eq!(body["status"], "in_progress");
    assert!(body.get("overall_score").is_none());
}

#[tokio::test]
async fn test_create_validation() {
    let app = TestApp::spawn().await;
    let admin = app.register("ada", "admin", "HR").await;
    let evaluator = app.register("eve", "employee", "IT").await;
    let subject = app.register("sam", "employee", "IT").await;
    let template = app.create_template(&admin).await;

    let base = json!({
        "template": template,
        "employee": subject.id,
        "type": "manager",
        "period": {"start_date": "2024-06-30", "end_date": "2024-01-01"},
    });
    let (status, _) = app.post("/api/evaluations", &evaluator.token, base.clone()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut bad_score = base.clone();
    bad_score["period"] = json!({"start_date": "2024-01-01", "end_date": "2024-06-30"});
    bad_score["criteria"] = json!([criterion("teamwork", 6)]);
    let (status, _) = app.post("/api/evaluations", &evaluator.token, bad_score).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut bad_category = base.clone();
    bad_category["period"] = json!({"start_date": "2024-01-01", "end_date": "2024-06-30"});
    bad_category["criteria"] = json!([{"category": "cooking", "name": "Soup", "score": 3}]);
    let (status, _) = app.post("/api/evaluations", &evaluator.token, bad_category).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut missing_template = base.clone();
    missing_template["period"] = json!({"start_date": "2024-01-01", "end_date": "2024-06-30"});
    missing_template["template"] = json!("template:missing");
    let (status, _) = app
        .post("/api/evaluations", &evaluator.token, missing_template)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_only_evaluator_or_admin_updates() {
    let app = TestApp::spawn().await;
    let admin = app.register("ada", "admin", "HR").await;
    let evaluator = app.register("eve", "employee", "IT").await;
    let subject = app.register("sam", "employee", "IT").await;
    let manager = app.register("mia", "manager", "IT").await;
    let template = app.create_template(&admin).await;

    let id = app
        .create_evaluation(&evaluator, &subject, &template, json!([]))
        .await;
    let uri = format!("/api/evaluations/{id}");
    let patch = json!({"general_comments": "Edited"});

    assert_eq!(app.put(&uri, &subject.token, patch.clone()).await.0, StatusCode::FORBIDDEN);
    assert_eq!(app.put(&uri, &manager.token, patch.clone()).await.0, StatusCode::FORBIDDEN);
    assert_eq!(app.put(&uri, &admin.token, patch).await.0, StatusCode::OK);
}

#[tokio::test]
async fn test_visibility_by_role() {
    let app = TestApp::spawn().await;
    let admin = app.register("ada", "admin", "HR").await;
    let evaluator = app.register("eve", "employee", "Sales").await;
    let subject = app.register("sam", "employee", "IT").await;
    let peer = app.register("pete", "employee", "IT").await;
    let manager = app.register("mia", "manager", "IT").await;
    let other_manager = app.register("otto", "manager", "Sales").await;
    let template = app.create_template(&admin).await;

    let id = app
        .create_evaluation(&evaluator, &subject, &template, json!([]))
        .await;
    let uri = format!("/api/evaluations/{id}");

    for user in [&admin, &evaluator, &subject, &manager] {
        assert_eq!(app.get(&uri, &user.token).await.0, StatusCode::OK);
    }
    assert_eq!(app.get(&uri, &peer.token).await.0, StatusCode::FORBIDDEN);
    assert_eq!(app.get(&uri, &other_manager.token).await.0, StatusCode::FORBIDDEN);

    let count = |body: &serde_json::Value| body.as_array().map(Vec::len).unwrap_or_default();
    assert_eq!(count(&app.get("/api/evaluations", &manager.token).await.1), 1);
    assert_eq!(count(&app.get("/api/evaluations", &subject.token).await.1), 1);
    assert_eq!(count(&app.get("/api/evaluations", &evaluator.token).await.1), 1);
    assert_eq!(count(&app.get("/api/evaluations", &peer.token).await.1), 0);
    assert_eq!(count(&app.get("/api/evaluations", &other_manager.token).await.1), 0);
    assert_eq!(count(&app.get("/api/evaluations", &admin.token).await.1), 1);

    assert_eq!(
        app.get("/api/evaluations/evaluation:missing", &admin.token).await.0,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_employee_evaluations_filtered_for_outsiders() {
    let app = TestApp::spawn().await;
    let admin = app.register("ada", "admin", "HR").await;
    let first = app.register("eve", "employee", "Sales").await;
    let second = app.register("fay", "employee", "Sales").await;
    let subject = app.register("sam", "employee", "IT").await;
    let template = app.create_template(&admin).await;

    app.create_evaluation(&first, &subject, &template, json!([])).await;
    app.create_evaluation(&second, &subject, &template, json!([])).await;

    let uri = format!("/api/evaluations/employee/{}", subject.id);
    let (status, all) = app.get(&uri, &subject.token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().map(Vec::len), Some(2));

    let (status, mine) = app.get(&uri, &first.token).await;
    assert_eq!(status, StatusCode::OK);
    let mine = mine.as_array().expect("array");
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["evaluator"], first.id.as_str());
}
