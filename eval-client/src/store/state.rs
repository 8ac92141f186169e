//! Store slices

use std::collections::HashMap;

use shared::models::{
    Comment, DashboardSummary, DepartmentReport, DepartmentStats, Employee, EmployeeReport,
    EvaluationDetail, FeedbackView, Template,
};
use shared::util::now_millis;

/// 登录态
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub token: Option<String>,
    pub user: Option<Employee>,
    pub loading: bool,
    pub error: Option<String>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeState {
    pub employees: Vec<Employee>,
    pub current: Option<Employee>,
    pub department_employees: Vec<Employee>,
    /// 从员工列表提取的部门（去重、排序）
    pub departments: Vec<String>,
    pub department_stats: Option<DepartmentStats>,
    pub loading: bool,
    pub error: Option<String>,
    pub success: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateState {
    pub templates: Vec<Template>,
    pub current: Option<Template>,
    pub loading: bool,
    pub error: Option<String>,
    pub success: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationState {
    pub evaluations: Vec<EvaluationDetail>,
    pub current: Option<EvaluationDetail>,
    pub employee_evaluations: Vec<EvaluationDetail>,
    pub employee_report: Option<EmployeeReport>,
    pub department_report: Option<DepartmentReport>,
    pub feedback: Option<FeedbackView>,
    pub dashboard: Option<DashboardSummary>,
    pub loading: bool,
    pub error: Option<String>,
    pub success: bool,
}

/// 评论按评估 id 分组，新的在前
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentState {
    pub by_evaluation: HashMap<String, Vec<Comment>>,
    pub loading: bool,
    pub error: Option<String>,
}

impl CommentState {
    pub fn for_evaluation(&self, evaluation_id: &str) -> &[Comment] {
        self.by_evaluation
            .get(evaluation_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    #[default]
    Info,
    Success,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: String,
    pub message: String,
    pub severity: Severity,
    pub read: bool,
    pub timestamp: i64,
}

impl Notification {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            message: message.into(),
            severity,
            read: false,
            timestamp: now_millis(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snackbar {
    pub open: bool,
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    pub notifications: Vec<Notification>,
    pub snackbar: Snackbar,
    pub global_loading: bool,
}

impl UiState {
    pub fn unread(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter().filter(|n| !n.read)
    }
}

/// 整个客户端状态
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub auth: AuthState,
    pub employees: EmployeeState,
    pub templates: TemplateState,
    pub evaluations: EvaluationState,
    pub comments: CommentState,
    pub ui: UiState,
}
