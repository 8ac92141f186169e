//! 集成测试辅助：内存数据库 + oneshot 请求

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use eval_server::{Config, HttpService, ServerState};
use http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tower::ServiceExt;

pub struct TestApp {
    router: Router,
    state: ServerState,
}

/// 已注册用户
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: String,
    pub token: String,
}

impl TestApp {
    /// 每个测试独立的内存数据库
    pub async fn spawn() -> Self {
        let config = Config::for_tests();
        let state = ServerState::initialize(&config)
            .await
            .expect("Failed to initialize test state");
        Self {
            router: HttpService::new(state.clone()).router(),
            state,
        }
    }

    /// 直接访问数据库 (构造接口无法产生的状态)
    pub fn db(&self) -> Surreal<Db> {
        self.state.get_db()
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(encode_uri(uri));
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, Some(token), None).await
    }

    /// 通过注册接口创建用户
    pub async fn register(&self, name: &str, role: &str, department: &str) -> TestUser {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/auth/register",
                None,
                Some(json!({
                    "email": format!("{name}@example.com"),
                    "password": "secret123",
                    "first_name": name,
                    "last_name": "Tester",
                    "department": department,
                    "role": role,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register {name}: {body}");
        TestUser {
            id: body["user"]["id"].as_str().expect("user id").to_string(),
            token: body["token"].as_str().expect("token").to_string(),
        }
    }

    /// admin 创建一个模板，返回 id
    pub async fn create_template(&self, admin: &TestUser) -> String {
        let (status, body) = self
            .post(
                "/api/templates",
                &admin.token,
                json!({
                    "name": "Quarterly Review",
                    "description": "Standard review",
                    "categories": ["technical_skills", "teamwork"],
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create template: {body}");
        body["id"].as_str().expect("template id").to_string()
    }

    /// evaluator 为 employee 创建评估，返回 id
    pub async fn create_evaluation(
        &self,
        evaluator: &TestUser,
        employee: &TestUser,
        template: &str,
        criteria: Value,
    ) -> String {
        let (status, body) = self
            .post(
                "/api/evaluations",
                &evaluator.token,
                json!({
                    "template": template,
                    "employee": employee.id,
                    "type": "peer",
                    "period": {"start_date": "2024-01-01", "end_date": "2024-06-30"},
                    "criteria": criteria,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create evaluation: {body}");
        body["id"].as_str().expect("evaluation id").to_string()
    }
}

/// 记录 id 可能带 `⟨⟩`，非 ASCII 字符需要百分号编码
fn encode_uri(uri: &str) -> String {
    let mut encoded = String::with_capacity(uri.len());
    for c in uri.chars() {
        if c.is_ascii() {
            encoded.push(c);
        } else {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                encoded.push_str(&format!("%{byte:02X}"));
            }
        }
    }
    encoded
}

/// 单个评分项
pub fn criterion(category: &str, score: u8) -> Value {
    json!({"category": category, "name": format!("{category} item"), "score": score})
}
