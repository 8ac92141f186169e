//! Template API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::error::ErrorCode;
use shared::models::{Template, TemplatePayload};
use shared::util::non_blank;

use crate::api::convert::template_view;
use crate::api::loaders::caller_id;
use crate::auth::{Capability, CurrentUser, authorize};
use crate::core::ServerState;
use crate::db::Directory;
use crate::db::models as db;
use crate::db::repository::TemplateRepository;
use crate::db::repository::template::TemplateFields;
use crate::utils::validation::{MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text};
use crate::utils::{ApiResponse, AppError, AppJson, AppResult};

/// 名称非空且至少一个类别
fn validate_payload(payload: TemplatePayload) -> AppResult<TemplateFields> {
    let name = payload.name.trim().to_string();
    let categories: Vec<String> = payload
        .categories
        .into_iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();

    if name.is_empty() || categories.is_empty() {
        return Err(AppError::new(ErrorCode::TemplateInvalid));
    }
    if name.chars().count() > MAX_NAME_LEN || categories.iter().any(|c| c.chars().count() > MAX_NAME_LEN) {
        return Err(AppError::validation(format!(
            "Template name and categories must not exceed {MAX_NAME_LEN} characters"
        )));
    }

    let description = non_blank(payload.description);
    validate_optional_text(&description, "Description", MAX_NOTE_LEN)?;

    Ok(TemplateFields {
        name,
        description,
        categories,
    })
}

/// 关联创建人摘要
async fn with_creators(state: &ServerState, templates: Vec<db::Template>) -> AppResult<Vec<Template>> {
    let directory = Directory::load(
        &state.get_db(),
        templates.iter().map(|t| t.created_by.clone()),
        [],
    )
    .await?;
    Ok(templates
        .into_iter()
        .map(|t| template_view(t, &directory))
        .collect())
}

async fn with_creator(state: &ServerState, template: db::Template) -> AppResult<Template> {
    let mut views = with_creators(state, vec![template]).await?;
    views
        .pop()
        .ok_or_else(|| AppError::internal("Template conversion failed"))
}

/// List active templates, newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Template>>> {
    let templates = TemplateRepository::new(state.get_db()).find_active().await?;
    Ok(Json(with_creators(&state, templates).await?))
}

/// Get an active template
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Template>> {
    let template = TemplateRepository::new(state.get_db())
        .find_active_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::TemplateNotFound))?;
    Ok(Json(with_creator(&state, template).await?))
}

/// Create a template (admin)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    AppJson(payload): AppJson<TemplatePayload>,
) -> AppResult<(StatusCode, Json<Template>)> {
    authorize(&user, Capability::ManageTemplates)?;
    let fields = validate_payload(payload)?;

    let template = TemplateRepository::new(state.get_db())
        .create(fields, caller_id(&user)?)
        .await?;
    tracing::info!(template_id = %template.id, name = %template.name, "Template created");

    Ok((StatusCode::CREATED, Json(with_creator(&state, template).await?)))
}

/// Update a template in place (admin)
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    AppJson(payload): AppJson<TemplatePayload>,
) -> AppResult<Json<Template>> {
    authorize(&user, Capability::ManageTemplates)?;
    let fields = validate_payload(payload)?;

    let repo = TemplateRepository::new(state.get_db());
    if repo.find_active_by_id(&id).await?.is_none() {
        return Err(AppError::new(ErrorCode::TemplateNotFound));
    }
    let template = repo.update(&id, fields).await?;
    tracing::info!(template_id = %template.id, "Template updated");

    Ok(Json(with_creator(&state, template).await?))
}

/// Soft delete a template (admin)
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    authorize(&user, Capability::ManageTemplates)?;

    let repo = TemplateRepository::new(state.get_db());
    if repo.find_active_by_id(&id).await?.is_none() {
        return Err(AppError::new(ErrorCode::TemplateNotFound));
    }
    repo.deactivate(&id).await?;
    tracing::info!(template_id = %id, deleted_by = %user.id, "Template deactivated");

    Ok(ApiResponse::message("Template deleted"))
}
