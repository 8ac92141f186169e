//! Comment API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::error::ErrorCode;
use shared::models::{Comment, CommentCreate, CommentUpdate};
use surrealdb::RecordId;

use crate::api::convert::comment_view;
use crate::api::loaders::{authorize_view_evaluation, caller_id, require_evaluation};
use crate::auth::{Capability, CommentAction, CurrentUser, authorize};
use crate::core::ServerState;
use crate::db::Directory;
use crate::db::models as db;
use crate::db::repository::CommentRepository;
use crate::utils::validation::validate_comment_content;
use crate::utils::{ApiResponse, AppError, AppJson, AppResult};

async fn require_comment(state: &ServerState, id: &str) -> AppResult<db::Comment> {
    CommentRepository::new(state.get_db())
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CommentNotFound))
}

/// 关联作者摘要
async fn with_authors(state: &ServerState, comments: Vec<db::Comment>) -> AppResult<Vec<Comment>> {
    let directory = Directory::load(
        &state.get_db(),
        comments.iter().map(|c| c.author.clone()),
        [],
    )
    .await?;
    Ok(comments
        .into_iter()
        .map(|c| comment_view(c, &directory))
        .collect())
}

async fn with_author(state: &ServerState, comment: db::Comment) -> AppResult<Comment> {
    with_authors(state, vec![comment])
        .await?
        .pop()
        .ok_or_else(|| AppError::internal("Comment conversion failed"))
}

/// 父评论必须存在且属于同一评估
async fn resolve_parent(
    state: &ServerState,
    evaluation: &RecordId,
    parent_id: Option<&str>,
) -> AppResult<Option<RecordId>> {
    let Some(parent_id) = parent_id.map(str::trim).filter(|p| !p.is_empty()) else {
        return Ok(None);
    };
    let parent = require_comment(state, parent_id).await?;
    if &parent.evaluation != evaluation {
        return Err(AppError::validation(
            "Parent comment belongs to a different evaluation",
        ));
    }
    Ok(Some(parent.id))
}

/// List comments of an evaluation, newest first
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Comment>>> {
    let evaluation = require_evaluation(&state, &id).await?;
    authorize_view_evaluation(&state, &user, &evaluation).await?;

    let comments = CommentRepository::new(state.get_db())
        .find_by_evaluation(&evaluation.id)
        .await?;
    Ok(Json(with_authors(&state, comments).await?))
}

/// Post a comment or reply
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    AppJson(payload): AppJson<CommentCreate>,
) -> AppResult<(StatusCode, Json<Comment>)> {
    let evaluation = require_evaluation(&state, &id).await?;
    authorize_view_evaluation(&state, &user, &evaluation).await?;

    let content = validate_comment_content(&payload.content)?;
    let parent = resolve_parent(
        &state,
        &evaluation.id,
        payload.parent_comment_id.as_deref(),
    )
    .await?;

    let comment = CommentRepository::new(state.get_db())
        .create(evaluation.id, caller_id(&user)?, content, parent)
        .await?;
    tracing::info!(comment_id = %comment.id, evaluation_id = %comment.evaluation, "Comment created");

    Ok((StatusCode::CREATED, Json(with_author(&state, comment).await?)))
}

/// Edit a comment (author or admin)
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    AppJson(payload): AppJson<CommentUpdate>,
) -> AppResult<Json<Comment>> {
    let comment = require_comment(&state, &id).await?;
    let author = comment.author.to_string();
    authorize(
        &user,
        Capability::ModifyComment {
            author: &author,
            action: CommentAction::Update,
        },
    )?;

    let content = validate_comment_content(&payload.content)?;
    let updated = CommentRepository::new(state.get_db())
        .update_content(&comment.id, content)
        .await?;
    Ok(Json(with_author(&state, updated).await?))
}

/// Delete a comment (author or admin)
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    let comment = require_comment(&state, &id).await?;
    let author = comment.author.to_string();
    authorize(
        &user,
        Capability::ModifyComment {
            author: &author,
            action: CommentAction::Delete,
        },
    )?;

    CommentRepository::new(state.get_db())
        .delete(&comment.id)
        .await?;
    tracing::info!(comment_id = %comment.id, deleted_by = %user.id, "Comment removed");

    Ok(ApiResponse::message("Comment removed"))
}
