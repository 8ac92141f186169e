//! 访问控制策略表
//!
//! 所有角色 / 归属 / 部门判断集中在 [`authorize`]，处理函数只声明所需的 [`Capability`]。
//!
//! | Capability | 允许 |
//! |------------|------|
//! | ManageTemplates | admin |
//! | ManageEmployees | admin |
//! | ViewEmployee | admin, 本人, 同部门经理 |
//! | UpdateEmployee | admin, 本人 |
//! | ViewDepartment | admin, 该部门经理 |
//! | ViewEvaluation | admin, 被评估人, 评估人, 被评估人部门经理 |
//! | UpdateEvaluation | admin, 评估人 |
//! | SubmitFeedback | admin, 被评估人, 评估人 |
//! | ViewFeedback | admin, manager, 被评估人, 评估人 |
//! | UpdateFeedback | admin, 评估人 |
//! | ModifyComment | admin, 作者 |
//! | ViewEmployeeReport | admin, 本人, 同部门经理 |
//! | ViewDepartmentReport | admin, 该部门经理 |

use shared::error::{AppError, AppResult, ErrorCode};

use crate::auth::CurrentUser;
use crate::security_log;

/// 评论操作类型（仅影响错误信息）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentAction {
    Update,
    Delete,
}

/// 需要校验的能力，字段为目标资源的归属信息
#[derive(Debug, Clone, Copy)]
pub enum Capability<'a> {
    ManageTemplates,
    ManageEmployees,
    ViewEmployee {
        id: &'a str,
        department: &'a str,
    },
    UpdateEmployee {
        id: &'a str,
    },
    ViewDepartment {
        department: &'a str,
    },
    ViewEvaluation {
        employee: &'a str,
        evaluator: &'a str,
        employee_department: Option<&'a str>,
    },
    UpdateEvaluation {
        evaluator: &'a str,
    },
    SubmitFeedback {
        employee: &'a str,
        evaluator: &'a str,
    },
    ViewFeedback {
        employee: &'a str,
        evaluator: &'a str,
    },
    UpdateFeedback {
        evaluator: &'a str,
    },
    ModifyComment {
        author: &'a str,
        action: CommentAction,
    },
    ViewEmployeeReport {
        employee: &'a str,
        employee_department: &'a str,
    },
    ViewDepartmentReport {
        department: &'a str,
    },
}

impl Capability<'_> {
    /// 日志用名称
    pub fn name(&self) -> &'static str {
        match self {
            Capability::ManageTemplates => "manage_templates",
            Capability::ManageEmployees => "manage_employees",
            Capability::ViewEmployee { .. } => "view_employee",
            Capability::UpdateEmployee { .. } => "update_employee",
            Capability::ViewDepartment { .. } => "view_department",
            Capability::ViewEvaluation { .. } => "view_evaluation",
            Capability::UpdateEvaluation { .. } => "update_evaluation",
            Capability::SubmitFeedback { .. } => "submit_feedback",
            Capability::ViewFeedback { .. } => "view_feedback",
            Capability::UpdateFeedback { .. } => "update_feedback",
            Capability::ModifyComment { .. } => "modify_comment",
            Capability::ViewEmployeeReport { .. } => "view_employee_report",
            Capability::ViewDepartmentReport { .. } => "view_department_report",
        }
    }

    /// 规则本身，不含日志
    pub fn allows(&self, user: &CurrentUser) -> bool {
        if user.is_admin() {
            return true;
        }
        let is = |id: &str| user.id == id;

        match *self {
            Capability::ManageTemplates | Capability::ManageEmployees => false,
            Capability::ViewEmployee { id, department } => is(id) || user.manages(department),
            Capability::UpdateEmployee { id } => is(id),
            Capability::ViewDepartment { department } => user.manages(department),
            Capability::ViewEvaluation {
                employee,
                evaluator,
                employee_department,
            } => {
                is(employee)
                    || is(evaluator)
                    || employee_department.is_some_and(|d| user.manages(d))
            }
            Capability::UpdateEvaluation { evaluator } => is(evaluator),
            Capability::SubmitFeedback {
                employee,
                evaluator,
            } => is(employee) || is(evaluator),
            Capability::ViewFeedback {
                employee,
                evaluator,
            } => user.is_manager() || is(employee) || is(evaluator),
            Capability::UpdateFeedback { evaluator } => is(evaluator),
            Capability::ModifyComment { author, .. } => is(author),
            Capability::ViewEmployeeReport {
                employee,
                employee_department,
            } => is(employee) || user.manages(employee_department),
            Capability::ViewDepartmentReport { department } => user.manages(department),
        }
    }

    /// 拒绝时返回的错误
    fn denial(&self) -> AppError {
        let (code, message) = match self {
            Capability::ManageTemplates | Capability::ManageEmployees => {
                (ErrorCode::AdminRequired, "Admin access required")
            }
            Capability::ViewEmployee { .. } => (
                ErrorCode::PermissionDenied,
                "Not authorized to view this employee",
            ),
            Capability::UpdateEmployee { .. } => (
                ErrorCode::NotResourceOwner,
                "Not authorized to update this employee",
            ),
            Capability::ViewDepartment { .. } => (
                ErrorCode::DepartmentAccessDenied,
                "Not authorized to view this department",
            ),
            Capability::ViewEvaluation { .. } => (
                ErrorCode::PermissionDenied,
                "Not authorized to view this evaluation",
            ),
            Capability::UpdateEvaluation { .. } => (
                ErrorCode::NotResourceOwner,
                "Not authorized to update this evaluation",
            ),
            Capability::SubmitFeedback { .. } => (
                ErrorCode::PermissionDenied,
                "Not authorized to provide feedback for this evaluation",
            ),
            Capability::ViewFeedback { .. } => (
                ErrorCode::PermissionDenied,
                "Not authorized to view this feedback",
            ),
            Capability::UpdateFeedback { .. } => (
                ErrorCode::NotResourceOwner,
                "Not authorized to update this feedback",
            ),
            Capability::ModifyComment {
                action: CommentAction::Update,
                ..
            } => (
                ErrorCode::NotResourceOwner,
                "Not authorized to update this comment",
            ),
            Capability::ModifyComment {
                action: CommentAction::Delete,
                ..
            } => (
                ErrorCode::NotResourceOwner,
                "Not authorized to delete this comment",
            ),
            Capability::ViewEmployeeReport { .. } => (
                ErrorCode::PermissionDenied,
                "Not authorized to view this report",
            ),
            Capability::ViewDepartmentReport { .. } => (
                ErrorCode::DepartmentAccessDenied,
                "Not authorized to view this department report",
            ),
        };
        AppError::forbidden(code, message)
    }
}

/// 校验当前用户是否拥有指定能力
///
/// 拒绝时记录 security 日志并返回 403
pub fn authorize(user: &CurrentUser, capability: Capability<'_>) -> AppResult<()> {
    if capability.allows(user) {
        return Ok(());
    }

    security_log!(
        "WARN",
        "permission_denied",
        user_id = user.id.as_str(),
        user_role = user.role.as_str(),
        capability = capability.name()
    );
    Err(capability.denial())
}
