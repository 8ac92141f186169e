//! Store actions
//!
//! 每个异步操作对应 `Pending` → 具体的完成动作 / `Rejected(message)`。

use shared::models::{
    Comment, DashboardSummary, DepartmentReport, DepartmentStats, Employee, EmployeeReport,
    EvaluationDetail, FeedbackView, Template,
};

use super::state::{Notification, Severity};

#[derive(Debug, Clone)]
pub enum AuthAction {
    Pending,
    LoggedIn { token: String, user: Employee },
    ProfileLoaded(Employee),
    Rejected(String),
    /// 令牌失效（401），清空登录态
    SessionExpired,
    LoggedOut,
    ClearError,
}

#[derive(Debug, Clone)]
pub enum EmployeeAction {
    Pending,
    ListLoaded(Vec<Employee>),
    Loaded(Employee),
    Created(Employee),
    Updated(Employee),
    DepartmentLoaded(Vec<Employee>),
    StatsLoaded(DepartmentStats),
    Rejected(String),
    ClearCurrent,
    ResetSuccess,
}

#[derive(Debug, Clone)]
pub enum TemplateAction {
    Pending,
    ListLoaded(Vec<Template>),
    Loaded(Template),
    Created(Template),
    Updated(Template),
    Deleted(String),
    Rejected(String),
    ClearCurrent,
    ResetSuccess,
}

#[derive(Debug, Clone)]
pub enum EvaluationAction {
    Pending,
    ListLoaded(Vec<EvaluationDetail>),
    Loaded(EvaluationDetail),
    Created(EvaluationDetail),
    Updated(EvaluationDetail),
    EmployeeEvaluationsLoaded(Vec<EvaluationDetail>),
    FeedbackSaved(EvaluationDetail),
    FeedbackLoaded(FeedbackView),
    EmployeeReportLoaded(EmployeeReport),
    DepartmentReportLoaded(DepartmentReport),
    DashboardLoaded(DashboardSummary),
    Rejected(String),
    ResetSuccess,
    ResetError,
    ClearCurrent,
}

#[derive(Debug, Clone)]
pub enum CommentAction {
    Pending,
    Loaded {
        evaluation_id: String,
        comments: Vec<Comment>,
    },
    Created(Comment),
    Updated(Comment),
    Deleted(String),
    Rejected(String),
    Clear(String),
}

#[derive(Debug, Clone)]
pub enum UiAction {
    SetGlobalLoading(bool),
    AddNotification(Notification),
    MarkNotificationRead(String),
    ClearNotifications,
    ShowSnackbar { message: String, severity: Severity },
    HideSnackbar,
}

/// 派发给 [`Store`](super::Store) 的动作
#[derive(Debug, Clone)]
pub enum Action {
    Auth(AuthAction),
    Employee(EmployeeAction),
    Template(TemplateAction),
    Evaluation(EvaluationAction),
    Comment(CommentAction),
    Ui(UiAction),
}

impl From<AuthAction> for Action {
    fn from(a: AuthAction) -> Self {
        Action::Auth(a)
    }
}

impl From<EmployeeAction> for Action {
    fn from(a: EmployeeAction) -> Self {
        Action::Employee(a)
    }
}

impl From<TemplateAction> for Action {
    fn from(a: TemplateAction) -> Self {
        Action::Template(a)
    }
}

impl From<EvaluationAction> for Action {
    fn from(a: EvaluationAction) -> Self {
        Action::Evaluation(a)
    }
}

impl From<CommentAction> for Action {
    fn from(a: CommentAction) -> Self {
        Action::Comment(a)
    }
}

impl From<UiAction> for Action {
    fn from(a: UiAction) -> Self {
        Action::Ui(a)
    }
}

impl Action {
    /// 成功提示
    pub fn success(message: impl Into<String>) -> Self {
        Action::Ui(UiAction::ShowSnackbar {
            message: message.into(),
            severity: Severity::Success,
        })
    }

    /// 错误提示
    pub fn error(message: impl Into<String>) -> Self {
        Action::Ui(UiAction::ShowSnackbar {
            message: message.into(),
            severity: Severity::Error,
        })
    }
}
