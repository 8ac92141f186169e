//! Input validation helpers
//!
//! Centralized text length constants and validation functions.

use shared::error::ErrorCode;
use shared::models::{Criterion, MAX_COMMENT_LENGTH, MAX_SCORE, MIN_SCORE};

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Template names, criterion names
pub const MAX_NAME_LEN: usize = 200;

/// Descriptions, general comments, feedback text
pub const MAX_NOTE_LEN: usize = 5000;

/// Strength / improvement area entries
pub const MAX_AREA_LEN: usize = 500;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    if value.chars().count() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.chars().count()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.chars().count() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.chars().count()
        )));
    }
    Ok(())
}

/// Validate each entry of a string list
pub fn validate_text_list(values: &[String], field: &str, max_len: usize) -> Result<(), AppError> {
    values
        .iter()
        .try_for_each(|v| validate_required_text(v, field, max_len))
}

/// 评分必须是 1..=5 的整数
pub fn validate_score(score: u8) -> Result<(), AppError> {
    if (MIN_SCORE..=MAX_SCORE).contains(&score) {
        Ok(())
    } else {
        Err(AppError::new(ErrorCode::EvaluationInvalidScore).with_detail("score", score))
    }
}

pub fn validate_criteria(criteria: &[Criterion]) -> Result<(), AppError> {
    for criterion in criteria {
        validate_required_text(&criterion.name, "Criterion name", MAX_NAME_LEN)?;
        validate_score(criterion.score)?;
        validate_optional_text(&criterion.comment, "Criterion comment", MAX_NOTE_LEN)?;
    }
    Ok(())
}

/// 评论内容：去空白后非空，且不超过 1000 字符
///
/// 返回去掉首尾空白后的内容
pub fn validate_comment_content(content: &str) -> Result<String, AppError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(AppError::new(ErrorCode::CommentContentRequired));
    }
    if trimmed.chars().count() > MAX_COMMENT_LENGTH {
        return Err(AppError::new(ErrorCode::CommentTooLong));
    }
    Ok(trimmed.to_string())
}
