//! Dashboard Model

use super::evaluation::EvaluationDetail;
use super::role::Role;
use serde::{Deserialize, Serialize};

/// 按角色划定范围的首页统计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub role: Role,
    /// 经理所在部门（仅 manager 有值）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    pub total_employees: usize,
    pub total_evaluations: usize,
    pub completed_evaluations: usize,
    pub pending_evaluations: usize,
    pub average_rating: f64,
    pub recent_evaluations: Vec<EvaluationDetail>,
    pub pending_for_me: Vec<EvaluationDetail>,
}
