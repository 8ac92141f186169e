//! Feedback API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::error::ErrorCode;
use shared::models::{EvaluationDetail, FeedbackSubmit, FeedbackUpdate, FeedbackView};

use crate::api::convert::{evaluation_detail, feedback_view};
use crate::api::loaders::require_evaluation;
use crate::auth::{Capability, CurrentUser, authorize};
use crate::core::ServerState;
use crate::db::Directory;
use crate::db::models as db;
use crate::db::repository::EvaluationRepository;
use crate::evaluations::set_feedback;
use crate::utils::validation::{MAX_NOTE_LEN, validate_score};
use crate::utils::{AppError, AppJson, AppResult};

/// 反馈文本去空白后非空，评分在 1..=5
fn validate_feedback(feedback: &str, rating: Option<u8>) -> AppResult<String> {
    let feedback = feedback.trim();
    if feedback.is_empty() {
        return Err(AppError::new(ErrorCode::FeedbackRequired));
    }
    if feedback.chars().count() > MAX_NOTE_LEN {
        return Err(AppError::validation(format!(
            "Feedback must not exceed {MAX_NOTE_LEN} characters"
        )));
    }
    if let Some(rating) = rating {
        validate_score(rating)?;
    }
    Ok(feedback.to_string())
}

async fn save_feedback(
    state: &ServerState,
    mut evaluation: db::Evaluation,
    feedback: String,
    rating: Option<u8>,
) -> AppResult<db::Evaluation> {
    set_feedback(&mut evaluation, feedback, rating);
    let saved = EvaluationRepository::new(state.get_db())
        .save(evaluation)
        .await?;
    Ok(saved)
}

/// Submit feedback (subject or evaluator)
pub async fn submit(
    State(state): State<ServerState>,
    user: CurrentUser,
    AppJson(payload): AppJson<FeedbackSubmit>,
) -> AppResult<Json<EvaluationDetail>> {
    let feedback = validate_feedback(&payload.feedback, payload.rating)?;
    let evaluation = require_evaluation(&state, &payload.evaluation_id).await?;

    let employee = evaluation.employee.to_string();
    let evaluator = evaluation.evaluator.to_string();
    authorize(
        &user,
        Capability::SubmitFeedback {
            employee: &employee,
            evaluator: &evaluator,
        },
    )?;

    // POST 与 PUT 同样是 upsert：每个评估最多一条 `overall` 回复
    let saved = save_feedback(&state, evaluation, feedback, payload.rating).await?;
    tracing::info!(
        evaluation_id = %saved.id,
        submitted_by = %user.id,
        rated = payload.rating.is_some(),
        "Feedback submitted"
    );

    let directory = Directory::for_evaluations(&state.get_db(), std::slice::from_ref(&saved)).await?;
    Ok(Json(evaluation_detail(saved, &directory)))
}

/// Read the feedback of an evaluation
pub async fn get(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(evaluation_id): Path<String>,
) -> AppResult<Json<FeedbackView>> {
    let evaluation = require_evaluation(&state, &evaluation_id).await?;

    let employee = evaluation.employee.to_string();
    let evaluator = evaluation.evaluator.to_string();
    authorize(
        &user,
        Capability::ViewFeedback {
            employee: &employee,
            evaluator: &evaluator,
        },
    )?;

    let directory =
        Directory::for_evaluations(&state.get_db(), std::slice::from_ref(&evaluation)).await?;
    Ok(Json(feedback_view(evaluation, &directory)))
}

/// Replace feedback (evaluator or admin)
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(evaluation_id): Path<String>,
    AppJson(payload): AppJson<FeedbackUpdate>,
) -> AppResult<Json<EvaluationDetail>> {
    let feedback = validate_feedback(&payload.feedback, payload.rating)?;
    let evaluation = require_evaluation(&state, &evaluation_id).await?;

    let evaluator = evaluation.evaluator.to_string();
    authorize(&user, Capability::UpdateFeedback { evaluator: &evaluator })?;

    let saved = save_feedback(&state, evaluation, feedback, payload.rating).await?;
    tracing::info!(evaluation_id = %saved.id, updated_by = %user.id, "Feedback updated");

    let directory = Directory::for_evaluations(&state.get_db(), std::slice::from_ref(&saved)).await?;
    Ok(Json(evaluation_detail(saved, &directory)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_feedback_rejected() {
        let err = validate_feedback("   ", Some(4)).unwrap_err();
        assert_eq!(err.code, ErrorCode::FeedbackRequired);
    }

    #[test]
    fn test_rating_out_of_range() {
        let err = validate_feedback("Great work", Some(6)).unwrap_err();
        assert_eq!(err.code, ErrorCode::EvaluationInvalidScore);
        assert!(validate_feedback("Great work", Some(0)).is_err());
    }

    #[test]
    fn test_feedback_trimmed() {
        assert_eq!(validate_feedback("  ok  ", None).unwrap(), "ok");
    }
}
