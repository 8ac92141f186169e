//! 评估生命周期
//!
//! 状态由内容推导：创建时为 `pending`，之后每次修改都重新计算，
//! 评分项或反馈评分非空则为 `completed`，否则为 `in_progress`。
//! 删除全部评分内容会让已完成的评估回到 `in_progress`。

use shared::models::{
    Criterion, EvaluationStatus, EvaluationType, OVERALL_QUESTION_ID, Period, Response,
};
use surrealdb::RecordId;

use super::scoring::overall_score;
use crate::db::models::Evaluation;

/// 已校验、已解析引用的更新内容
#[derive(Debug, Clone, Default)]
pub struct EvaluationChanges {
    pub template: Option<RecordId>,
    pub employee: Option<RecordId>,
    pub evaluation_type: Option<EvaluationType>,
    pub period: Option<Period>,
    pub criteria: Option<Vec<Criterion>>,
    pub general_comments: Option<String>,
    pub strength_areas: Option<Vec<String>>,
    pub improvement_areas: Option<Vec<String>>,
    pub submitted: bool,
}

/// 修改后的状态
pub fn derive_status(criteria: &[Criterion], responses: &[Response]) -> EvaluationStatus {
    if criteria.is_empty() && responses.is_empty() {
        EvaluationStatus::InProgress
    } else {
        EvaluationStatus::Completed
    }
}

/// 重新计算总分和状态
fn refresh(evaluation: &mut Evaluation) {
    evaluation.overall_score = overall_score(&evaluation.criteria);
    evaluation.status = derive_status(&evaluation.criteria, &evaluation.responses);
}

/// 合并 patch，未提供的字段保持不变
pub fn apply_changes(evaluation: &mut Evaluation, changes: EvaluationChanges, now: i64) {
    if let Some(template) = changes.template {
        evaluation.template = template;
    }
    if let Some(employee) = changes.employee {
        evaluation.employee = employee;
    }
    if let Some(evaluation_type) = changes.evaluation_type {
        evaluation.evaluation_type = evaluation_type;
    }
    if let Some(period) = changes.period {
        evaluation.period = period;
    }
    if let Some(criteria) = changes.criteria {
        evaluation.criteria = criteria;
    }
    if let Some(general_comments) = changes.general_comments {
        evaluation.general_comments = Some(general_comments);
    }
    if let Some(strength_areas) = changes.strength_areas {
        evaluation.strength_areas = strength_areas;
    }
    if let Some(improvement_areas) = changes.improvement_areas {
        evaluation.improvement_areas = improvement_areas;
    }

    refresh(evaluation);

    if changes.submitted && evaluation.status == EvaluationStatus::Completed {
        evaluation.submitted_at = Some(now);
    }
}

/// 写入反馈文本；带评分时新增或替换 `overall` 回复
pub fn set_feedback(evaluation: &mut Evaluation, feedback: String, rating: Option<u8>) {
    if let Some(rating) = rating {
        let comment = Some(feedback.clone());
        match evaluation
            .responses
            .iter_mut()
            .find(|r| r.question_id == OVERALL_QUESTION_ID)
        {
            Some(existing) => {
                existing.rating = rating;
                existing.comment = comment;
            }
            None => evaluation.responses.push(Response {
                question_id: OVERALL_QUESTION_ID.to_string(),
                rating,
                comment,
            }),
        }
    }
    evaluation.feedback = Some(feedback);
    refresh(evaluation);
}
