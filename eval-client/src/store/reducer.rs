//! Reducers: 纯函数，按动作修改对应切片

use super::action::{
    Action, AuthAction, CommentAction, EmployeeAction, EvaluationAction, TemplateAction, UiAction,
};
use super::state::{
    AppState, AuthState, CommentState, EmployeeState, EvaluationState, Snackbar, TemplateState,
    UiState,
};

pub fn reduce(state: &mut AppState, action: Action) {
    match action {
        Action::Auth(AuthAction::LoggedOut) => *state = AppState::default(),
        Action::Auth(a) => reduce_auth(&mut state.auth, a),
        Action::Employee(a) => reduce_employees(&mut state.employees, a),
        Action::Template(a) => reduce_templates(&mut state.templates, a),
        Action::Evaluation(a) => reduce_evaluations(&mut state.evaluations, a),
        Action::Comment(a) => reduce_comments(&mut state.comments, a),
        Action::Ui(a) => reduce_ui(&mut state.ui, a),
    }
}

/// 按 id 替换列表中的元素
fn replace_by_id<T>(items: &mut [T], item: &T, id: impl Fn(&T) -> &str)
where
    T: Clone,
{
    if let Some(slot) = items.iter_mut().find(|i| id(i) == id(item)) {
        *slot = item.clone();
    }
}

fn reduce_auth(state: &mut AuthState, action: AuthAction) {
    match action {
        AuthAction::Pending => {
            state.loading = true;
            state.error = None;
        }
        AuthAction::LoggedIn { token, user } => {
            state.loading = false;
            state.token = Some(token);
            state.user = Some(user);
        }
        AuthAction::ProfileLoaded(user) => {
            state.loading = false;
            state.user = Some(user);
        }
        AuthAction::Rejected(message) => {
            state.loading = false;
            state.error = Some(message);
        }
        AuthAction::SessionExpired => {
            state.token = None;
            state.user = None;
        }
        AuthAction::LoggedOut => *state = AuthState::default(),
        AuthAction::ClearError => state.error = None,
    }
}

fn reduce_employees(state: &mut EmployeeState, action: EmployeeAction) {
    match action {
        EmployeeAction::Pending => {
            state.loading = true;
            state.error = None;
        }
        EmployeeAction::ListLoaded(employees) => {
            state.loading = false;
            let mut departments: Vec<String> =
                employees.iter().map(|e| e.department.clone()).collect();
            departments.sort();
            departments.dedup();
            state.departments = departments;
            state.employees = employees;
        }
        EmployeeAction::Loaded(employee) => {
            state.loading = false;
            state.current = Some(employee);
        }
        EmployeeAction::Created(employee) => {
            state.loading = false;
            state.employees.push(employee);
            state.success = true;
        }
        EmployeeAction::Updated(employee) => {
            state.loading = false;
            replace_by_id(&mut state.employees, &employee, |e| e.id.as_str());
            if state.current.as_ref().is_some_and(|c| c.id == employee.id) {
                state.current = Some(employee);
            }
            state.success = true;
        }
        EmployeeAction::DepartmentLoaded(employees) => {
            state.loading = false;
            state.department_employees = employees;
        }
        EmployeeAction::StatsLoaded(stats) => {
            state.loading = false;
            state.department_stats = Some(stats);
        }
        EmployeeAction::Rejected(message) => {
            state.loading = false;
            state.error = Some(message);
        }
        EmployeeAction::ClearCurrent => state.current = None,
        EmployeeAction::ResetSuccess => state.success = false,
    }
}

fn reduce_templates(state: &mut TemplateState, action: TemplateAction) {
    match action {
        TemplateAction::Pending => {
            state.loading = true;
            state.error = None;
        }
        TemplateAction::ListLoaded(templates) => {
            state.loading = false;
            state.templates = templates;
        }
        TemplateAction::Loaded(template) => {
            state.loading = false;
            state.current = Some(template);
        }
        TemplateAction::Created(template) => {
            state.loading = false;
            state.templates.insert(0, template);
            state.success = true;
        }
        TemplateAction::Updated(template) => {
            state.loading = false;
            replace_by_id(&mut state.templates, &template, |t| t.id.as_str());
            state.current = Some(template);
            state.success = true;
        }
        TemplateAction::Deleted(id) => {
            state.loading = false;
            state.templates.retain(|t| t.id != id);
            if state.current.as_ref().is_some_and(|c| c.id == id) {
                state.current = None;
            }
            state.success = true;
        }
        TemplateAction::Rejected(message) => {
            state.loading = false;
            state.error = Some(message);
        }
        TemplateAction::ClearCurrent => state.current = None,
        TemplateAction::ResetSuccess => state.success = false,
    }
}

fn reduce_evaluations(state: &mut EvaluationState, action: EvaluationAction) {
    match action {
        EvaluationAction::Pending => {
            state.loading = true;
            state.error = None;
        }
        EvaluationAction::ListLoaded(evaluations) => {
            state.loading = false;
            state.evaluations = evaluations;
        }
        EvaluationAction::Loaded(detail) => {
            state.loading = false;
            state.current = Some(detail);
        }
        EvaluationAction::Created(detail) => {
            state.loading = false;
            state.evaluations.push(detail);
            state.success = true;
        }
        EvaluationAction::Updated(detail) | EvaluationAction::FeedbackSaved(detail) => {
            state.loading = false;
            let target = detail.evaluation.id.clone();
            for list in [&mut state.evaluations, &mut state.employee_evaluations] {
                if let Some(slot) = list.iter_mut().find(|d| d.evaluation.id == target) {
                    *slot = detail.clone();
                }
            }
            state.current = Some(detail);
            state.success = true;
        }
        EvaluationAction::EmployeeEvaluationsLoaded(evaluations) => {
            state.loading = false;
            state.employee_evaluations = evaluations;
        }
        EvaluationAction::FeedbackLoaded(feedback) => {
            state.loading = false;
            state.feedback = Some(feedback);
        }
        EvaluationAction::EmployeeReportLoaded(report) => {
            state.loading = false;
            state.employee_report = Some(report);
        }
        EvaluationAction::DepartmentReportLoaded(report) => {
            state.loading = false;
            state.department_report = Some(report);
        }
        EvaluationAction::DashboardLoaded(summary) => {
            state.loading = false;
            state.dashboard = Some(summary);
        }
        EvaluationAction::Rejected(message) => {
            state.loading = false;
            state.error = Some(message);
        }
        EvaluationAction::ResetSuccess => state.success = false,
        EvaluationAction::ResetError => state.error = None,
        EvaluationAction::ClearCurrent => state.current = None,
    }
}

fn reduce_comments(state: &mut CommentState, action: CommentAction) {
    match action {
        CommentAction::Pending => {
            state.loading = true;
            state.error = None;
        }
        CommentAction::Loaded {
            evaluation_id,
            comments,
        } => {
            state.loading = false;
            state.by_evaluation.insert(evaluation_id, comments);
        }
        CommentAction::Created(comment) => {
            state.loading = false;
            state
                .by_evaluation
                .entry(comment.evaluation.clone())
                .or_default()
                .insert(0, comment);
        }
        CommentAction::Updated(comment) => {
            state.loading = false;
            if let Some(list) = state.by_evaluation.get_mut(&comment.evaluation) {
                replace_by_id(list, &comment, |c| c.id.as_str());
            }
        }
        CommentAction::Deleted(id) => {
            state.loading = false;
            for list in state.by_evaluation.values_mut() {
                list.retain(|c| c.id != id);
            }
        }
        CommentAction::Rejected(message) => {
            state.loading = false;
            state.error = Some(message);
        }
        CommentAction::Clear(evaluation_id) => {
            state.by_evaluation.remove(&evaluation_id);
        }
    }
}

fn reduce_ui(state: &mut UiState, action: UiAction) {
    match action {
        UiAction::SetGlobalLoading(loading) => state.global_loading = loading,
        UiAction::AddNotification(notification) => state.notifications.push(notification),
        UiAction::MarkNotificationRead(id) => {
            if let Some(n) = state.notifications.iter_mut().find(|n| n.id == id) {
                n.read = true;
            }
        }
        UiAction::ClearNotifications => state.notifications.clear(),
        UiAction::ShowSnackbar { message, severity } => {
            state.snackbar = Snackbar {
                open: true,
                message,
                severity,
            };
        }
        UiAction::HideSnackbar => state.snackbar.open = false,
    }
}
