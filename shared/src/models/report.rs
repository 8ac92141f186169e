//! Report Models
//!
//! 员工报表与部门报表的响应结构，全部由服务端从已完成的评估中计算。

use super::employee::EmployeeSummary;
use super::evaluation::{Criterion, EvaluationStatus, Response};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Average rating for one category (criterion category or response question)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRating {
    pub category: String,
    pub average_rating: f64,
    pub total_responses: usize,
    pub ratings: Vec<u8>,
    /// score -> count
    pub distribution: BTreeMap<u8, usize>,
}

/// Per-employee summary numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeStatistics {
    /// 已完成的评估数
    pub total_evaluations: usize,
    pub completed_evaluations: usize,
    pub pending_evaluations: usize,
    pub in_progress_evaluations: usize,
    pub average_overall_rating: f64,
    pub department_average: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_evaluation_date: Option<i64>,
}

/// One point per completed evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinePoint {
    pub evaluation_id: String,
    pub date: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluator: Option<EmployeeSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    pub average_rating: f64,
}

/// Raw feedback entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub evaluation_id: String,
    pub date: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluator: Option<EmployeeSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub general_comments: Option<String>,
    pub criteria: Vec<Criterion>,
    pub responses: Vec<Response>,
}

/// Radar chart point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarPoint {
    pub subject: String,
    pub score: f64,
    pub full_mark: u8,
}

/// Short listing of a completed evaluation inside a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationDigest {
    pub id: String,
    pub date: i64,
    pub status: EvaluationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluator: Option<EmployeeSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_score: Option<f64>,
}

/// `GET /api/reports/employee/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeReport {
    pub employee: EmployeeSummary,
    pub statistics: EmployeeStatistics,
    pub ratings: Vec<CategoryRating>,
    pub radar: Vec<RadarPoint>,
    pub timeline: Vec<TimelinePoint>,
    pub feedback: Vec<FeedbackEntry>,
    pub evaluations: Vec<EvaluationDigest>,
}

/// Department-wide numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentStatistics {
    pub total_employees: usize,
    /// 已完成的评估数
    pub total_evaluations: usize,
    pub average_rating: f64,
    pub completed: usize,
    pub pending: usize,
    pub in_progress: usize,
}

/// Per-employee row in a department report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeBreakdown {
    pub employee: EmployeeSummary,
    pub evaluations: usize,
    pub average_rating: f64,
}

/// Recently updated evaluation in a department
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentEvaluation {
    pub id: String,
    pub date: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee: Option<EmployeeSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluator: Option<EmployeeSummary>,
    pub average_rating: f64,
}

/// `GET /api/reports/department/{department}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentReport {
    pub department: String,
    pub statistics: DepartmentStatistics,
    pub employees: Vec<EmployeeBreakdown>,
    pub recent_evaluations: Vec<RecentEvaluation>,
}
