//! 处理函数共用的加载辅助
//!
//! 找不到记录时直接返回对应的 404 错误。

use shared::error::ErrorCode;
use surrealdb::RecordId;

use crate::auth::{Capability, CurrentUser};
use crate::core::ServerState;
use crate::db::models::{Evaluation, User};
use crate::db::repository::{EvaluationRepository, UserRepository, parse_record_id};
use crate::utils::{AppError, AppResult};

/// 当前用户的 RecordId
pub fn caller_id(user: &CurrentUser) -> AppResult<RecordId> {
    parse_record_id("user", &user.id)
        .ok_or_else(|| AppError::internal(format!("Malformed user id: {}", user.id)))
}

pub async fn require_employee(state: &ServerState, id: &str) -> AppResult<User> {
    UserRepository::new(state.get_db())
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound))
}

pub async fn require_evaluation(state: &ServerState, id: &str) -> AppResult<Evaluation> {
    EvaluationRepository::new(state.get_db())
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::EvaluationNotFound))
}

/// 被评估人所在部门，用户已不存在时为 None
pub async fn subject_department(
    state: &ServerState,
    evaluation: &Evaluation,
) -> AppResult<Option<String>> {
    let subject = UserRepository::new(state.get_db())
        .find_by_id(&evaluation.employee.to_string())
        .await?;
    Ok(subject.map(|u| u.department))
}

/// 查看评估的权限
pub async fn authorize_view_evaluation(
    state: &ServerState,
    user: &CurrentUser,
    evaluation: &Evaluation,
) -> AppResult<()> {
    let department = subject_department(state, evaluation).await?;
    let employee = evaluation.employee.to_string();
    let evaluator = evaluation.evaluator.to_string();
    crate::auth::authorize(
        user,
        Capability::ViewEvaluation {
            employee: &employee,
            evaluator: &evaluator,
            employee_department: department.as_deref(),
        },
    )
}
