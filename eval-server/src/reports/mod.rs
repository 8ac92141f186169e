//! Reporting / Aggregation
//!
//! 只读计算：输入为已加载的评估和关联目录，输出报表结构。空集平均值为 0。

pub mod dashboard;
pub mod department;
pub mod employee;

pub use dashboard::build_dashboard;
pub use department::build_department_report;
pub use employee::build_employee_report;

use shared::models::Evaluation;

use crate::evaluations::evaluation_score;

/// 报表中使用的评估日期：提交时间，未提交时取最后更新时间
pub(crate) fn evaluation_date(evaluation: &Evaluation) -> i64 {
    evaluation.submitted_at.unwrap_or(evaluation.updated_at)
}

/// 单个评估的得分
pub(crate) fn score_of(evaluation: &Evaluation) -> f64 {
    evaluation_score(&evaluation.criteria, &evaluation.responses)
}

/// 已完成评估的得分列表
pub(crate) fn completed_scores<'a>(
    evaluations: impl IntoIterator<Item = &'a Evaluation>,
) -> Vec<f64> {
    evaluations
        .into_iter()
        .filter(|e| e.is_completed())
        .map(score_of)
        .collect()
}
