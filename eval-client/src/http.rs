//! HTTP client for the evaluation REST API

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::client::{AuthResponse, HealthResponse, LoginRequest, RegisterRequest};
use shared::error::ApiResponse;
use shared::models::{
    Comment, CommentCreate, CommentUpdate, DashboardSummary, DepartmentReport, DepartmentStats,
    Employee, EmployeeCreate, EmployeeQuery, EmployeeReport, EmployeeUpdate, EvaluationCreate,
    EvaluationDetail, EvaluationUpdate, FeedbackSubmit, FeedbackUpdate, FeedbackView, Template,
    TemplatePayload,
};

use crate::{ClientConfig, ClientError, ClientResult};

/// HTTP client for making requests to the evaluation server
///
/// clone 后共享同一个令牌，登录后所有副本都带上 Authorization 头
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
    token: Arc<RwLock<Option<String>>>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(config.base_url.clone()));
        }

        Ok(Self {
            client,
            base_url,
            token: Arc::new(RwLock::new(config.token.clone())),
        })
    }

    /// Get the current token
    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    /// Replace (or clear) the authentication token
    pub fn set_token(&self, token: Option<String>) {
        *self.token.write() = token;
    }

    /// 逐段拼接路径，每段单独百分号编码（`/`、`?`、`#` 不会改变路由）
    fn url(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// 带上 Authorization 头的请求构造器
    fn request(&self, method: Method, segments: &[&str]) -> ClientResult<RequestBuilder> {
        let request = self.client.request(method, self.url(segments)?);
        Ok(match self.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        })
    }

    /// Send the request and decode a JSON body
    async fn execute<T: DeserializeOwned>(request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        let status = response.status();
        let url = response.url().path().to_string();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::debug!(path = %url, %status, "Request failed");
            return Err(ClientError::from_status(status, &text));
        }
        serde_json::from_str(&text).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> ClientResult<T> {
        Self::execute(self.request(Method::GET, segments)?).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> ClientResult<T> {
        Self::execute(self.request(Method::POST, segments)?.json(body)).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> ClientResult<T> {
        Self::execute(self.request(Method::PUT, segments)?.json(body)).await
    }

    /// Make a DELETE request
    pub async fn delete<T: DeserializeOwned>(&self, segments: &[&str]) -> ClientResult<T> {
        Self::execute(self.request(Method::DELETE, segments)?).await
    }

    // ========== Health ==========

    pub async fn health(&self) -> ClientResult<HealthResponse> {
        self.get(&["health"]).await
    }

    // ========== Auth API ==========

    /// Register and store the returned token
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<AuthResponse> {
        let auth: AuthResponse = self.post(&["api", "auth", "register"], request).await?;
        self.set_token(Some(auth.token.clone()));
        Ok(auth)
    }

    /// Login with email and password, storing the returned token
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<AuthResponse> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let auth: AuthResponse = self.post(&["api", "auth", "login"], &request).await?;
        self.set_token(Some(auth.token.clone()));
        Ok(auth)
    }

    /// Current user
    pub async fn profile(&self) -> ClientResult<Employee> {
        self.get(&["api", "auth", "profile"]).await
    }

    /// Forget the token (stateless server, nothing to call)
    pub fn logout(&self) {
        self.set_token(None);
    }

    // ========== Employee API ==========

    pub async fn list_employees(&self, query: &EmployeeQuery) -> ClientResult<Vec<Employee>> {
        Self::execute(self.request(Method::GET, &["api", "employees"])?.query(query)).await
    }

    pub async fn get_employee(&self, id: &str) -> ClientResult<Employee> {
        self.get(&["api", "employees", id]).await
    }

    pub async fn create_employee(&self, payload: &EmployeeCreate) -> ClientResult<Employee> {
        self.post(&["api", "employees"], payload).await
    }

    pub async fn update_employee(&self, id: &str, payload: &EmployeeUpdate) -> ClientResult<Employee> {
        self.put(&["api", "employees", id], payload).await
    }

    pub async fn department_employees(&self, department: &str) -> ClientResult<Vec<Employee>> {
        self.get(&["api", "employees", "department", department])
            .await
    }

    pub async fn department_stats(&self, department: &str) -> ClientResult<DepartmentStats> {
        self.get(&["api", "employees", "department", department, "stats"])
            .await
    }

    // ========== Template API ==========

    pub async fn list_templates(&self) -> ClientResult<Vec<Template>> {
        self.get(&["api", "templates"]).await
    }

    pub async fn get_template(&self, id: &str) -> ClientResult<Template> {
        self.get(&["api", "templates", id]).await
    }

    pub async fn create_template(&self, payload: &TemplatePayload) -> ClientResult<Template> {
        self.post(&["api", "templates"], payload).await
    }

    pub async fn update_template(&self, id: &str, payload: &TemplatePayload) -> ClientResult<Template> {
        self.put(&["api", "templates", id], payload).await
    }

    /// Soft delete
    pub async fn delete_template(&self, id: &str) -> ClientResult<()> {
        self.delete::<ApiResponse<()>>(&["api", "templates", id])
            .await?;
        Ok(())
    }

    // ========== Evaluation API ==========

    pub async fn list_evaluations(&self) -> ClientResult<Vec<EvaluationDetail>> {
        self.get(&["api", "evaluations"]).await
    }

    pub async fn get_evaluation(&self, id: &str) -> ClientResult<EvaluationDetail> {
        self.get(&["api", "evaluations", id]).await
    }

    pub async fn create_evaluation(&self, payload: &EvaluationCreate) -> ClientResult<EvaluationDetail> {
        self.post(&["api", "evaluations"], payload).await
    }

    pub async fn update_evaluation(
        &self,
        id: &str,
        payload: &EvaluationUpdate,
    ) -> ClientResult<EvaluationDetail> {
        self.put(&["api", "evaluations", id], payload).await
    }

    pub async fn employee_evaluations(&self, employee_id: &str) -> ClientResult<Vec<EvaluationDetail>> {
        self.get(&["api", "evaluations", "employee", employee_id])
            .await
    }

    // ========== Feedback API ==========

    pub async fn submit_feedback(&self, payload: &FeedbackSubmit) -> ClientResult<EvaluationDetail> {
        self.post(&["api", "feedback"], payload).await
    }

    pub async fn get_feedback(&self, evaluation_id: &str) -> ClientResult<FeedbackView> {
        self.get(&["api", "feedback", evaluation_id]).await
    }

    pub async fn update_feedback(
        &self,
        evaluation_id: &str,
        payload: &FeedbackUpdate,
    ) -> ClientResult<EvaluationDetail> {
        self.put(&["api", "feedback", evaluation_id], payload)
            .await
    }

    // ========== Comment API ==========

    pub async fn list_comments(&self, evaluation_id: &str) -> ClientResult<Vec<Comment>> {
        self.get(&["api", "evaluations", evaluation_id, "comments"])
            .await
    }

    pub async fn create_comment(
        &self,
        evaluation_id: &str,
        payload: &CommentCreate,
    ) -> ClientResult<Comment> {
        self.post(&["api", "evaluations", evaluation_id, "comments"], payload)
            .await
    }

    pub async fn update_comment(&self, id: &str, payload: &CommentUpdate) -> ClientResult<Comment> {
        self.put(&["api", "comments", id], payload).await
    }

    pub async fn delete_comment(&self, id: &str) -> ClientResult<()> {
        self.delete::<ApiResponse<()>>(&["api", "comments", id])
            .await?;
        Ok(())
    }

    // ========== Report API ==========

    pub async fn employee_report(&self, employee_id: &str) -> ClientResult<EmployeeReport> {
        self.get(&["api", "reports", "employee", employee_id])
            .await
    }

    pub async fn department_report(&self, department: &str) -> ClientResult<DepartmentReport> {
        self.get(&["api", "reports", "department", department])
            .await
    }

    pub async fn dashboard(&self) -> ClientResult<DashboardSummary> {
        self.get(&["api", "dashboard"]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let client = HttpClient::new(&ClientConfig::new("http://localhost:5000/")).unwrap();
        assert_eq!(
            client.url(&["api", "templates"]).unwrap().as_str(),
            "http://localhost:5000/api/templates"
        );
        assert_eq!(
            client.url(&["health"]).unwrap().as_str(),
            "http://localhost:5000/health"
        );

        let prefixed = HttpClient::new(&ClientConfig::new("http://localhost:5000/hr/")).unwrap();
        assert_eq!(
            prefixed.url(&["api", "dashboard"]).unwrap().as_str(),
            "http://localhost:5000/hr/api/dashboard"
        );
    }

    #[test]
    fn test_path_segments_are_encoded() {
        let client = HttpClient::new(&ClientConfig::new("http://localhost:5000")).unwrap();
        let url = client
            .url(&["api", "reports", "department", "R&D/Ops?x#1"])
            .unwrap();
        assert_eq!(url.path(), "/api/reports/department/R&D%2FOps%3Fx%231");
        assert!(url.query().is_none());
        assert!(url.fragment().is_none());

        let url = client.url(&["api", "evaluations", "evaluation:abc"]).unwrap();
        assert_eq!(url.path(), "/api/evaluations/evaluation:abc");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let err = HttpClient::new(&ClientConfig::new("not a url")).unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(_)), "{err:?}");
        let err = HttpClient::new(&ClientConfig::new("mailto:hr@example.com")).unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(_)), "{err:?}");
    }

    #[test]
    fn test_token_shared_between_clones() {
        let client = HttpClient::new(&ClientConfig::default()).unwrap();
        let copy = client.clone();
        client.set_token(Some("abc".into()));
        assert_eq!(copy.token().as_deref(), Some("abc"));
        copy.logout();
        assert!(client.token().is_none());
    }
}
