//! Evaluation Model
//!
//! 评估是系统的核心记录：被评估人 (employee)、评估人 (evaluator)、模板、
//! 评分项 (criteria) 以及反馈回复 (responses)。

use super::employee::EmployeeSummary;
use super::template::TemplateSummary;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 评分下限
pub const MIN_SCORE: u8 = 1;
/// 评分上限（雷达图满分）
pub const MAX_SCORE: u8 = 5;
/// 带评分反馈对应的 response question_id
pub const OVERALL_QUESTION_ID: &str = "overall";

/// Evaluation type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationType {
    #[serde(rename = "self")]
    SelfReview,
    Peer,
    Manager,
}

impl EvaluationType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            EvaluationType::SelfReview => "self",
            EvaluationType::Peer => "peer",
            EvaluationType::Manager => "manager",
        }
    }
}

impl fmt::Display for EvaluationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evaluation status
///
/// `pending → in_progress → completed`，由内容推导而非手动推进。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl EvaluationStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            EvaluationStatus::Pending => "pending",
            EvaluationStatus::InProgress => "in_progress",
            EvaluationStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for EvaluationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed criterion categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionCategory {
    TechnicalSkills,
    SoftSkills,
    Leadership,
    Productivity,
    Teamwork,
}

impl CriterionCategory {
    /// 雷达图顺序
    pub const ALL: [CriterionCategory; 5] = [
        CriterionCategory::TechnicalSkills,
        CriterionCategory::SoftSkills,
        CriterionCategory::Leadership,
        CriterionCategory::Productivity,
        CriterionCategory::Teamwork,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            CriterionCategory::TechnicalSkills => "technical_skills",
            CriterionCategory::SoftSkills => "soft_skills",
            CriterionCategory::Leadership => "leadership",
            CriterionCategory::Productivity => "productivity",
            CriterionCategory::Teamwork => "teamwork",
        }
    }

    /// Human readable label, used as radar subject
    pub const fn label(&self) -> &'static str {
        match self {
            CriterionCategory::TechnicalSkills => "Technical Skills",
            CriterionCategory::SoftSkills => "Soft Skills",
            CriterionCategory::Leadership => "Leadership",
            CriterionCategory::Productivity => "Productivity",
            CriterionCategory::Teamwork => "Teamwork",
        }
    }
}

impl fmt::Display for CriterionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scored line item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub category: CriterionCategory,
    pub name: String,
    /// 1..=5
    pub score: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Feedback response (question answer with rating)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub question_id: String,
    /// 1..=5
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Evaluation period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Period {
    pub fn is_valid(&self) -> bool {
        self.start_date <= self.end_date
    }
}

/// Evaluation (wire format)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub id: String,
    /// Template reference (String ID)
    pub template: String,
    /// Subject reference (String ID)
    pub employee: String,
    /// Author reference (String ID)
    pub evaluator: String,
    #[serde(rename = "type")]
    pub evaluation_type: EvaluationType,
    pub period: Period,
    #[serde(default)]
    pub criteria: Vec<Criterion>,
    /// 无评分项时为 None（未评分，区别于 0 分）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub general_comments: Option<String>,
    #[serde(default)]
    pub strength_areas: Vec<String>,
    #[serde(default)]
    pub improvement_areas: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(default)]
    pub responses: Vec<Response>,
    pub status: EvaluationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Evaluation {
    pub fn is_completed(&self) -> bool {
        self.status == EvaluationStatus::Completed
    }
}

/// Evaluation joined with employee / evaluator / template summaries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationDetail {
    #[serde(flatten)]
    pub evaluation: Evaluation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_info: Option<EmployeeSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluator_info: Option<EmployeeSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_info: Option<TemplateSummary>,
}

/// Create evaluation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationCreate {
    /// Template reference (String ID)
    pub template: String,
    /// Subject reference (String ID)
    pub employee: String,
    #[serde(rename = "type")]
    pub evaluation_type: EvaluationType,
    pub period: Period,
    #[serde(default)]
    pub criteria: Vec<Criterion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub general_comments: Option<String>,
    #[serde(default)]
    pub strength_areas: Vec<String>,
    #[serde(default)]
    pub improvement_areas: Vec<String>,
}

/// Update evaluation payload (patch)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluationUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub evaluation_type: Option<EvaluationType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criteria: Option<Vec<Criterion>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub general_comments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength_areas: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub improvement_areas: Option<Vec<String>>,
    /// true 表示评估人确认提交，记录 submitted_at
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted: Option<bool>,
}

/// `POST /api/feedback`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackSubmit {
    pub evaluation_id: String,
    pub feedback: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
}

/// `PUT /api/feedback/{evaluation_id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackUpdate {
    pub feedback: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
}

/// Feedback attached to an evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackView {
    pub evaluation_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(default)]
    pub responses: Vec<Response>,
    pub status: EvaluationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_info: Option<EmployeeSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluator_info: Option<EmployeeSummary>,
}
