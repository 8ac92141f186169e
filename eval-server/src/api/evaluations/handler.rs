//! Evaluation API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::error::ErrorCode;
use shared::models::{
    Criterion, EvaluationCreate, EvaluationDetail, EvaluationStatus, EvaluationUpdate, Period, Role,
};
use shared::util::{non_blank, now_millis};
use surrealdb::RecordId;

use crate::api::convert::{evaluation_detail, evaluation_details};
use crate::api::loaders::{authorize_view_evaluation, caller_id, require_employee, require_evaluation};
use crate::auth::{Capability, CurrentUser, authorize};
use crate::core::ServerState;
use crate::db::Directory;
use crate::db::models as db;
use crate::db::repository::evaluation::NewEvaluation;
use crate::db::repository::{EvaluationRepository, TemplateRepository, UserRepository};
use crate::evaluations::{EvaluationChanges, apply_changes, overall_score};
use crate::utils::validation::{
    MAX_AREA_LEN, MAX_NOTE_LEN, validate_criteria, validate_optional_text, validate_text_list,
};
use crate::utils::{AppError, AppJson, AppResult};

fn validate_period(period: &Period) -> AppResult<()> {
    if period.is_valid() {
        Ok(())
    } else {
        Err(AppError::new(ErrorCode::EvaluationInvalidPeriod))
    }
}

/// 评分项、评语和能力列表的共用校验
fn validate_content(
    criteria: Option<&[Criterion]>,
    general_comments: &Option<String>,
    strength_areas: Option<&[String]>,
    improvement_areas: Option<&[String]>,
) -> AppResult<()> {
    if let Some(criteria) = criteria {
        validate_criteria(criteria)?;
    }
    validate_optional_text(general_comments, "General comments", MAX_NOTE_LEN)?;
    if let Some(areas) = strength_areas {
        validate_text_list(areas, "Strength area", MAX_AREA_LEN)?;
    }
    if let Some(areas) = improvement_areas {
        validate_text_list(areas, "Improvement area", MAX_AREA_LEN)?;
    }
    Ok(())
}

async fn resolve_template(state: &ServerState, id: &str) -> AppResult<RecordId> {
    TemplateRepository::new(state.get_db())
        .find_active_by_id(id)
        .await?
        .map(|t| t.id)
        .ok_or_else(|| AppError::new(ErrorCode::TemplateNotFound))
}

async fn detail(state: &ServerState, evaluation: db::Evaluation) -> AppResult<EvaluationDetail> {
    let directory = Directory::for_evaluations(&state.get_db(), std::slice::from_ref(&evaluation)).await?;
    Ok(evaluation_detail(evaluation, &directory))
}

async fn details(
    state: &ServerState,
    evaluations: Vec<db::Evaluation>,
) -> AppResult<Vec<EvaluationDetail>> {
    let directory = Directory::for_evaluations(&state.get_db(), &evaluations).await?;
    Ok(evaluation_details(evaluations, &directory))
}

/// List evaluations visible to the caller
///
/// - admin: 全部
/// - manager: 本部门员工的评估 + 自己写的评估
/// - employee: 自己被评估或自己写的评估
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<EvaluationDetail>>> {
    let repo = EvaluationRepository::new(state.get_db());
    let me = caller_id(&user)?;

    let evaluations = match user.role {
        Role::Admin => repo.find_all().await?,
        Role::Manager => {
            let members: Vec<RecordId> = UserRepository::new(state.get_db())
                .find_by_department(&user.department)
                .await?
                .into_iter()
                .map(|u| u.id)
                .collect();
            repo.find_by_employees_or_evaluator(members, &me).await?
        }
        Role::Employee => {
            repo.find_by_employees_or_evaluator(vec![me.clone()], &me)
                .await?
        }
    };

    Ok(Json(details(&state, evaluations).await?))
}

/// Get one evaluation
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<EvaluationDetail>> {
    let evaluation = require_evaluation(&state, &id).await?;
    authorize_view_evaluation(&state, &user, &evaluation).await?;
    Ok(Json(detail(&state, evaluation).await?))
}

/// Evaluations about one employee
///
/// 有权查看该员工时返回全部，否则只返回调用者写的评估
pub async fn by_employee(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(employee_id): Path<String>,
) -> AppResult<Json<Vec<EvaluationDetail>>> {
    let employee = require_employee(&state, &employee_id).await?;
    let subject_id = employee.id.to_string();

    let mut evaluations = EvaluationRepository::new(state.get_db())
        .find_by_employee(&employee.id)
        .await?;

    let sees_all = Capability::ViewEmployee {
        id: &subject_id,
        department: &employee.department,
    }
    .allows(&user);
    if !sees_all {
        evaluations.retain(|e| e.evaluator.to_string() == user.id);
    }

    Ok(Json(details(&state, evaluations).await?))
}

/// Create an evaluation; the caller becomes the evaluator
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    AppJson(payload): AppJson<EvaluationCreate>,
) -> AppResult<(StatusCode, Json<EvaluationDetail>)> {
    validate_period(&payload.period)?;
    let general_comments = non_blank(payload.general_comments);
    validate_content(
        Some(&payload.criteria),
        &general_comments,
        Some(&payload.strength_areas),
        Some(&payload.improvement_areas),
    )?;

    let template = resolve_template(&state, &payload.template).await?;
    let employee = require_employee(&state, &payload.employee).await?;

    let evaluation = EvaluationRepository::new(state.get_db())
        .create(NewEvaluation {
            template,
            employee: employee.id,
            evaluator: caller_id(&user)?,
            evaluation_type: payload.evaluation_type,
            period: payload.period,
            overall_score: overall_score(&payload.criteria),
            criteria: payload.criteria,
            general_comments,
            strength_areas: payload.strength_areas,
            improvement_areas: payload.improvement_areas,
            status: EvaluationStatus::Pending,
        })
        .await?;

    tracing::info!(
        evaluation_id = %evaluation.id,
        employee = %evaluation.employee,
        evaluator = %evaluation.evaluator,
        evaluation_type = %evaluation.evaluation_type,
        "Evaluation created"
    );

    Ok((StatusCode::CREATED, Json(detail(&state, evaluation).await?)))
}

/// Patch an evaluation (evaluator or admin)
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    AppJson(payload): AppJson<EvaluationUpdate>,
) -> AppResult<Json<EvaluationDetail>> {
    let mut evaluation = require_evaluation(&state, &id).await?;
    let evaluator = evaluation.evaluator.to_string();
    authorize(&user, Capability::UpdateEvaluation { evaluator: &evaluator })?;

    if let Some(period) = &payload.period {
        validate_period(period)?;
    }
    let general_comments = non_blank(payload.general_comments);
    validate_content(
        payload.criteria.as_deref(),
        &general_comments,
        payload.strength_areas.as_deref(),
        payload.improvement_areas.as_deref(),
    )?;

    let template = match payload.template {
        Some(ref template) => Some(resolve_template(&state, template).await?),
        None => None,
    };
    let employee = match payload.employee {
        Some(ref employee) => Some(require_employee(&state, employee).await?.id),
        None => None,
    };

    apply_changes(
        &mut evaluation,
        EvaluationChanges {
            template,
            employee,
            evaluation_type: payload.evaluation_type,
            period: payload.period,
            criteria: payload.criteria,
            general_comments,
            strength_areas: payload.strength_areas,
            improvement_areas: payload.improvement_areas,
            submitted: payload.submitted.unwrap_or(false),
        },
        now_millis(),
    );

    let saved = EvaluationRepository::new(state.get_db())
        .save(evaluation)
        .await?;
    tracing::info!(
        evaluation_id = %saved.id,
        status = %saved.status,
        updated_by = %user.id,
        "Evaluation updated"
    );

    Ok(Json(detail(&state, saved).await?))
}
