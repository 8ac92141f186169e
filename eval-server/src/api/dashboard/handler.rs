//! Dashboard API Handlers

use axum::{Json, extract::State};
use shared::models::{DashboardSummary, Role};
use surrealdb::RecordId;

use crate::api::convert::evaluation_details;
use crate::api::loaders::caller_id;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::Directory;
use crate::db::repository::user::UserFilter;
use crate::db::repository::{EvaluationRepository, UserRepository};
use crate::reports::build_dashboard;
use crate::utils::AppResult;

/// Role-scoped dashboard numbers
///
/// - admin: 全部员工与评估
/// - manager: 本部门员工与评估
/// - employee: 本部门人数，自己被评估的评估
pub async fn summary(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<DashboardSummary>> {
    let users = UserRepository::new(state.get_db());
    let repo = EvaluationRepository::new(state.get_db());
    let me = caller_id(&user)?;

    let (total_employees, scoped) = match user.role {
        Role::Admin => {
            let total = users.find_all(&UserFilter::default()).await?.len();
            (total, repo.find_all().await?)
        }
        Role::Manager => {
            let members: Vec<RecordId> = users
                .find_by_department(&user.department)
                .await?
                .into_iter()
                .map(|u| u.id)
                .collect();
            (members.len(), repo.find_by_employees(members).await?)
        }
        Role::Employee => {
            let total = users.find_by_department(&user.department).await?.len();
            (total, repo.find_by_employee(&me).await?)
        }
    };
    let authored = repo.find_by_evaluator(&me).await?;

    let all: Vec<_> = scoped.iter().chain(authored.iter()).cloned().collect();
    let directory = Directory::for_evaluations(&state.get_db(), &all).await?;

    Ok(Json(build_dashboard(
        &user,
        total_employees,
        evaluation_details(scoped, &directory),
        evaluation_details(authored, &directory),
    )))
}
