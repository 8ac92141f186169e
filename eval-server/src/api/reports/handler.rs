//! Report API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{self as api, DepartmentReport, EmployeeReport};
use surrealdb::RecordId;

use crate::api::loaders::require_employee;
use crate::auth::{Capability, CurrentUser, authorize};
use crate::core::ServerState;
use crate::db::directory::employee_summary;
use crate::db::models as db;
use crate::db::repository::{EvaluationRepository, UserRepository};
use crate::db::Directory;
use crate::reports::{build_department_report, build_employee_report};
use crate::utils::AppResult;

/// 部门成员及其作为被评估人的全部评估
async fn department_evaluations(
    state: &ServerState,
    department: &str,
) -> AppResult<(Vec<db::User>, Vec<db::Evaluation>)> {
    let members = UserRepository::new(state.get_db())
        .find_by_department(department)
        .await?;
    let ids: Vec<RecordId> = members.iter().map(|m| m.id.clone()).collect();
    let evaluations = EvaluationRepository::new(state.get_db())
        .find_by_employees(ids)
        .await?;
    Ok((members, evaluations))
}

fn to_wire(evaluations: Vec<db::Evaluation>) -> Vec<api::Evaluation> {
    evaluations.into_iter().map(Into::into).collect()
}

/// Employee report (self, same-department manager or admin)
pub async fn employee(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<EmployeeReport>> {
    let employee = require_employee(&state, &id).await?;
    let employee_id = employee.id.to_string();
    authorize(
        &user,
        Capability::ViewEmployeeReport {
            employee: &employee_id,
            employee_department: &employee.department,
        },
    )?;

    let evaluations = EvaluationRepository::new(state.get_db())
        .find_by_employee(&employee.id)
        .await?;
    let (_, peers) = department_evaluations(&state, &employee.department).await?;
    let directory = Directory::for_evaluations(&state.get_db(), &evaluations).await?;

    let report = build_employee_report(
        employee_summary(&employee),
        &to_wire(evaluations),
        &to_wire(peers),
        &directory,
    );
    tracing::debug!(
        employee_id = %employee_id,
        completed = report.statistics.completed_evaluations,
        "Employee report generated"
    );
    Ok(Json(report))
}

/// Department report (that department's manager or admin)
pub async fn department(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(department): Path<String>,
) -> AppResult<Json<DepartmentReport>> {
    authorize(
        &user,
        Capability::ViewDepartmentReport {
            department: &department,
        },
    )?;

    let (members, evaluations) = department_evaluations(&state, &department).await?;
    let directory = Directory::for_evaluations(&state.get_db(), &evaluations).await?;
    let members: Vec<_> = members.iter().map(employee_summary).collect();

    Ok(Json(build_department_report(
        &department,
        &members,
        &to_wire(evaluations),
        &directory,
    )))
}
