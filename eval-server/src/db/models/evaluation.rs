//! Evaluation Model

use serde::{Deserialize, Serialize};
use shared::models::{Criterion, EvaluationStatus, EvaluationType, Period, Response};
use surrealdb::RecordId;

/// Evaluation record
///
/// 类型字段在库中存为 `evaluation_type`，对外序列化为 `type`。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    pub id: RecordId,
    pub template: RecordId,
    pub employee: RecordId,
    pub evaluator: RecordId,
    pub evaluation_type: EvaluationType,
    pub period: Period,
    #[serde(default)]
    pub criteria: Vec<Criterion>,
    #[serde(default)]
    pub overall_score: Option<f64>,
    #[serde(default)]
    pub general_comments: Option<String>,
    #[serde(default)]
    pub strength_areas: Vec<String>,
    #[serde(default)]
    pub improvement_areas: Vec<String>,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub responses: Vec<Response>,
    pub status: EvaluationStatus,
    #[serde(default)]
    pub submitted_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Evaluation {
    pub fn is_completed(&self) -> bool {
        self.status == EvaluationStatus::Completed
    }
}
