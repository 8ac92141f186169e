//! Employee API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use shared::error::ErrorCode;
use shared::models::{DepartmentStats, Employee, EmployeeCreate, EmployeeQuery, EmployeeUpdate, Role};
use validator::Validate;

use crate::api::loaders::require_employee;
use crate::auth::{Capability, CurrentUser, authorize};
use crate::core::ServerState;
use crate::db::repository::UserRepository;
use crate::db::repository::user::UserFilter;
use crate::utils::{AppError, AppJson, AppResult};

/// List employees
///
/// 经理只能看到本部门，忽略 department 过滤参数
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<EmployeeQuery>,
) -> AppResult<Json<Vec<Employee>>> {
    let department = if user.is_manager() {
        Some(user.department.clone())
    } else {
        query.department
    };

    let users = UserRepository::new(state.get_db())
        .find_all(&UserFilter {
            department,
            role: query.role,
        })
        .await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// Get employee by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Employee>> {
    let employee = require_employee(&state, &id).await?;
    let employee_id = employee.id.to_string();
    authorize(
        &user,
        Capability::ViewEmployee {
            id: &employee_id,
            department: &employee.department,
        },
    )?;
    Ok(Json(employee.into()))
}

/// Create a new employee (admin)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    AppJson(payload): AppJson<EmployeeCreate>,
) -> AppResult<(StatusCode, Json<Employee>)> {
    authorize(&user, Capability::ManageEmployees)?;
    payload.validate()?;

    let created = UserRepository::new(state.get_db()).create(payload).await?;
    tracing::info!(
        employee_id = %created.id,
        created_by = %user.id,
        "Employee created"
    );
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Update an employee
///
/// 非管理员不能修改角色和部门（字段被忽略）
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    AppJson(mut payload): AppJson<EmployeeUpdate>,
) -> AppResult<Json<Employee>> {
    let employee = require_employee(&state, &id).await?;
    let employee_id = employee.id.to_string();
    authorize(&user, Capability::UpdateEmployee { id: &employee_id })?;
    payload.validate()?;

    if !user.is_admin() {
        payload.role = None;
        payload.department = None;
    }

    let updated = UserRepository::new(state.get_db())
        .update(&employee_id, payload)
        .await?;
    tracing::info!(employee_id = %updated.id, updated_by = %user.id, "Employee updated");
    Ok(Json(updated.into()))
}

/// List employees of a department
pub async fn by_department(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(department): Path<String>,
) -> AppResult<Json<Vec<Employee>>> {
    authorize(&user, Capability::ViewDepartment { department: &department })?;

    let users = UserRepository::new(state.get_db())
        .find_by_department(&department)
        .await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// Headcount by role for a department
pub async fn department_stats(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(department): Path<String>,
) -> AppResult<Json<DepartmentStats>> {
    authorize(&user, Capability::ViewDepartment { department: &department })?;

    let users = UserRepository::new(state.get_db())
        .find_by_department(&department)
        .await?;
    if users.is_empty() {
        return Err(AppError::new(ErrorCode::DepartmentNotFound));
    }

    let count = |role: Role| users.iter().filter(|u| u.role == role).count();
    Ok(Json(DepartmentStats {
        department,
        total_employees: users.len(),
        managers: count(Role::Manager),
        employees: count(Role::Employee),
    }))
}
