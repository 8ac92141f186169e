//! 异步动作
//!
//! 每个方法先派发 pending，再按结果派发完成或 rejected 动作，并把结果返回给调用者。
//! 任何请求返回 401 都会清空登录态。

use std::future::Future;

use shared::client::RegisterRequest;
use shared::models::{
    CommentCreate, CommentUpdate, Employee, EmployeeCreate, EmployeeQuery, EmployeeUpdate,
    EvaluationCreate, EvaluationDetail, EvaluationUpdate, FeedbackSubmit, FeedbackUpdate,
    TemplatePayload,
};

use super::action::{
    Action, AuthAction, CommentAction, EmployeeAction, EvaluationAction, TemplateAction,
};
use super::Store;
use crate::{ClientResult, HttpClient};

#[derive(Debug, Clone)]
pub struct Thunks {
    client: HttpClient,
    store: Store,
}

impl Thunks {
    pub fn new(client: HttpClient, store: Store) -> Self {
        Self { client, store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    /// pending → 请求 → fulfilled / rejected
    async fn run<T, Fut>(
        &self,
        pending: Action,
        call: Fut,
        fulfilled: impl FnOnce(T) -> Action,
        rejected: impl FnOnce(String) -> Action,
    ) -> ClientResult<T>
    where
        T: Clone,
        Fut: Future<Output = ClientResult<T>>,
    {
        self.store.dispatch(pending);
        match call.await {
            Ok(value) => {
                self.store.dispatch(fulfilled(value.clone()));
                Ok(value)
            }
            Err(err) => {
                if err.is_unauthorized() && self.store.select(|s| s.auth.is_authenticated()) {
                    tracing::warn!("Session rejected by server, clearing credentials");
                    self.client.set_token(None);
                    self.store.dispatch(AuthAction::SessionExpired.into());
                }
                self.store.dispatch(rejected(err.message()));
                Err(err)
            }
        }
    }

    // ========== Auth ==========

    pub async fn login(&self, email: &str, password: &str) -> ClientResult<Employee> {
        let auth = self
            .run(
                AuthAction::Pending.into(),
                self.client.login(email, password),
                |auth| {
                    AuthAction::LoggedIn {
                        token: auth.token,
                        user: auth.user,
                    }
                    .into()
                },
                |m| AuthAction::Rejected(m).into(),
            )
            .await?;
        Ok(auth.user)
    }

    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<Employee> {
        let auth = self
            .run(
                AuthAction::Pending.into(),
                self.client.register(request),
                |auth| {
                    AuthAction::LoggedIn {
                        token: auth.token,
                        user: auth.user,
                    }
                    .into()
                },
                |m| AuthAction::Rejected(m).into(),
            )
            .await?;
        Ok(auth.user)
    }

    pub async fn load_profile(&self) -> ClientResult<Employee> {
        self.run(
            AuthAction::Pending.into(),
            self.client.profile(),
            |user| AuthAction::ProfileLoaded(user).into(),
            |m| AuthAction::Rejected(m).into(),
        )
        .await
    }

    /// 清空令牌和全部状态
    pub fn logout(&self) {
        self.client.logout();
        self.store.dispatch(AuthAction::LoggedOut.into());
    }

    // ========== Employees ==========

    pub async fn fetch_employees(&self, query: &EmployeeQuery) -> ClientResult<Vec<Employee>> {
        self.run(
            EmployeeAction::Pending.into(),
            self.client.list_employees(query),
            |list| EmployeeAction::ListLoaded(list).into(),
            |m| EmployeeAction::Rejected(m).into(),
        )
        .await
    }

    pub async fn fetch_employee(&self, id: &str) -> ClientResult<Employee> {
        self.run(
            EmployeeAction::Pending.into(),
            self.client.get_employee(id),
            |e| EmployeeAction::Loaded(e).into(),
            |m| EmployeeAction::Rejected(m).into(),
        )
        .await
    }

    pub async fn create_employee(&self, payload: &EmployeeCreate) -> ClientResult<Employee> {
        self.run(
            EmployeeAction::Pending.into(),
            self.client.create_employee(payload),
            |e| EmployeeAction::Created(e).into(),
            |m| EmployeeAction::Rejected(m).into(),
        )
        .await
    }

    pub async fn update_employee(&self, id: &str, payload: &EmployeeUpdate) -> ClientResult<Employee> {
        self.run(
            EmployeeAction::Pending.into(),
            self.client.update_employee(id, payload),
            |e| EmployeeAction::Updated(e).into(),
            |m| EmployeeAction::Rejected(m).into(),
        )
        .await
    }

    pub async fn fetch_department_employees(&self, department: &str) -> ClientResult<Vec<Employee>> {
        self.run(
            EmployeeAction::Pending.into(),
            self.client.department_employees(department),
            |list| EmployeeAction::DepartmentLoaded(list).into(),
            |m| EmployeeAction::Rejected(m).into(),
        )
        .await
    }

    pub async fn fetch_department_stats(&self, department: &str) -> ClientResult<()> {
        self.run(
            EmployeeAction::Pending.into(),
            self.client.department_stats(department),
            |stats| EmployeeAction::StatsLoaded(stats).into(),
            |m| EmployeeAction::Rejected(m).into(),
        )
        .await
        .map(|_| ())
    }

    // ========== Templates ==========

    pub async fn fetch_templates(&self) -> ClientResult<()> {
        self.run(
            TemplateAction::Pending.into(),
            self.client.list_templates(),
            |list| TemplateAction::ListLoaded(list).into(),
            |m| TemplateAction::Rejected(m).into(),
        )
        .await
        .map(|_| ())
    }

    pub async fn fetch_template(&self, id: &str) -> ClientResult<()> {
        self.run(
            TemplateAction::Pending.into(),
            self.client.get_template(id),
            |t| TemplateAction::Loaded(t).into(),
            |m| TemplateAction::Rejected(m).into(),
        )
        .await
        .map(|_| ())
    }

    pub async fn create_template(&self, payload: &TemplatePayload) -> ClientResult<String> {
        self.run(
            TemplateAction::Pending.into(),
            self.client.create_template(payload),
            |t| TemplateAction::Created(t).into(),
            |m| TemplateAction::Rejected(m).into(),
        )
        .await
        .map(|t| t.id)
    }

    pub async fn update_template(&self, id: &str, payload: &TemplatePayload) -> ClientResult<()> {
        self.run(
            TemplateAction::Pending.into(),
            self.client.update_template(id, payload),
            |t| TemplateAction::Updated(t).into(),
            |m| TemplateAction::Rejected(m).into(),
        )
        .await
        .map(|_| ())
    }

    pub async fn delete_template(&self, id: &str) -> ClientResult<()> {
        let deleted = id.to_string();
        self.run(
            TemplateAction::Pending.into(),
            self.client.delete_template(id),
            move |_| TemplateAction::Deleted(deleted).into(),
            |m| TemplateAction::Rejected(m).into(),
        )
        .await
    }

    // ========== Evaluations ==========

    pub async fn fetch_evaluations(&self) -> ClientResult<Vec<EvaluationDetail>> {
        self.run(
            EvaluationAction::Pending.into(),
            self.client.list_evaluations(),
            |list| EvaluationAction::ListLoaded(list).into(),
            |m| EvaluationAction::Rejected(m).into(),
        )
        .await
    }

    pub async fn fetch_evaluation(&self, id: &str) -> ClientResult<EvaluationDetail> {
        self.run(
            EvaluationAction::Pending.into(),
            self.client.get_evaluation(id),
            |d| EvaluationAction::Loaded(d).into(),
            |m| EvaluationAction::Rejected(m).into(),
        )
        .await
    }

    pub async fn create_evaluation(&self, payload: &EvaluationCreate) -> ClientResult<EvaluationDetail> {
        self.run(
            EvaluationAction::Pending.into(),
            self.client.create_evaluation(payload),
            |d| EvaluationAction::Created(d).into(),
            |m| EvaluationAction::Rejected(m).into(),
        )
        .await
    }

    pub async fn update_evaluation(
        &self,
        id: &str,
        payload: &EvaluationUpdate,
    ) -> ClientResult<EvaluationDetail> {
        self.run(
            EvaluationAction::Pending.into(),
            self.client.update_evaluation(id, payload),
            |d| EvaluationAction::Updated(d).into(),
            |m| EvaluationAction::Rejected(m).into(),
        )
        .await
    }

    pub async fn fetch_employee_evaluations(
        &self,
        employee_id: &str,
    ) -> ClientResult<Vec<EvaluationDetail>> {
        self.run(
            EvaluationAction::Pending.into(),
            self.client.employee_evaluations(employee_id),
            |list| EvaluationAction::EmployeeEvaluationsLoaded(list).into(),
            |m| EvaluationAction::Rejected(m).into(),
        )
        .await
    }

    pub async fn submit_feedback(&self, payload: &FeedbackSubmit) -> ClientResult<EvaluationDetail> {
        self.run(
            EvaluationAction::Pending.into(),
            self.client.submit_feedback(payload),
            |d| EvaluationAction::FeedbackSaved(d).into(),
            |m| EvaluationAction::Rejected(m).into(),
        )
        .await
    }

    pub async fn update_feedback(
        &self,
        evaluation_id: &str,
        payload: &FeedbackUpdate,
    ) -> ClientResult<EvaluationDetail> {
        self.run(
            EvaluationAction::Pending.into(),
            self.client.update_feedback(evaluation_id, payload),
            |d| EvaluationAction::FeedbackSaved(d).into(),
            |m| EvaluationAction::Rejected(m).into(),
        )
        .await
    }

    pub async fn fetch_feedback(&self, evaluation_id: &str) -> ClientResult<()> {
        self.run(
            EvaluationAction::Pending.into(),
            self.client.get_feedback(evaluation_id),
            |f| EvaluationAction::FeedbackLoaded(f).into(),
            |m| EvaluationAction::Rejected(m).into(),
        )
        .await
        .map(|_| ())
    }

    pub async fn fetch_employee_report(&self, employee_id: &str) -> ClientResult<()> {
        self.run(
            EvaluationAction::Pending.into(),
            self.client.employee_report(employee_id),
            |r| EvaluationAction::EmployeeReportLoaded(r).into(),
            |m| EvaluationAction::Rejected(m).into(),
        )
        .await
        .map(|_| ())
    }

    pub async fn fetch_department_report(&self, department: &str) -> ClientResult<()> {
        self.run(
            EvaluationAction::Pending.into(),
            self.client.department_report(department),
            |r| EvaluationAction::DepartmentReportLoaded(r).into(),
            |m| EvaluationAction::Rejected(m).into(),
        )
        .await
        .map(|_| ())
    }

    pub async fn fetch_dashboard(&self) -> ClientResult<()> {
        self.run(
            EvaluationAction::Pending.into(),
            self.client.dashboard(),
            |d| EvaluationAction::DashboardLoaded(d).into(),
            |m| EvaluationAction::Rejected(m).into(),
        )
        .await
        .map(|_| ())
    }

    // ========== Comments ==========

    pub async fn fetch_comments(&self, evaluation_id: &str) -> ClientResult<()> {
        let key = evaluation_id.to_string();
        self.run(
            CommentAction::Pending.into(),
            self.client.list_comments(evaluation_id),
            move |comments| {
                CommentAction::Loaded {
                    evaluation_id: key,
                    comments,
                }
                .into()
            },
            |m| CommentAction::Rejected(m).into(),
        )
        .await
        .map(|_| ())
    }

    pub async fn create_comment(
        &self,
        evaluation_id: &str,
        content: &str,
        parent_comment_id: Option<&str>,
    ) -> ClientResult<String> {
        let payload = CommentCreate {
            content: content.to_string(),
            parent_comment_id: parent_comment_id.map(str::to_string),
        };
        self.run(
            CommentAction::Pending.into(),
            self.client.create_comment(evaluation_id, &payload),
            |c| CommentAction::Created(c).into(),
            |m| CommentAction::Rejected(m).into(),
        )
        .await
        .map(|c| c.id)
    }

    pub async fn update_comment(&self, id: &str, content: &str) -> ClientResult<()> {
        let payload = CommentUpdate {
            content: content.to_string(),
        };
        self.run(
            CommentAction::Pending.into(),
            self.client.update_comment(id, &payload),
            |c| CommentAction::Updated(c).into(),
            |m| CommentAction::Rejected(m).into(),
        )
        .await
        .map(|_| ())
    }

    pub async fn delete_comment(&self, id: &str) -> ClientResult<()> {
        let deleted = id.to_string();
        self.run(
            CommentAction::Pending.into(),
            self.client.delete_comment(id),
            move |_| CommentAction::Deleted(deleted).into(),
            |m| CommentAction::Rejected(m).into(),
        )
        .await
    }
}
