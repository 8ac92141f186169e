//! 部门报表

use shared::models::{
    DepartmentReport, DepartmentStatistics, EmployeeBreakdown, EmployeeSummary, Evaluation,
    EvaluationStatus, RecentEvaluation,
};

use super::{completed_scores, score_of};
use crate::db::Directory;
use crate::evaluations::{mean, round2};

/// 最近评估条数
pub const RECENT_LIMIT: usize = 10;

/// 生成部门报表
///
/// - `members`: 部门全部员工
/// - `evaluations`: 被评估人属于该部门的全部评估
pub fn build_department_report(
    department: &str,
    members: &[EmployeeSummary],
    evaluations: &[Evaluation],
    directory: &Directory,
) -> DepartmentReport {
    let count = |status: EvaluationStatus| evaluations.iter().filter(|e| e.status == status).count();

    let completed = count(EvaluationStatus::Completed);

    let statistics = DepartmentStatistics {
        total_employees: members.len(),
        total_evaluations: completed,
        average_rating: round2(mean(&completed_scores(evaluations))),
        completed,
        pending: count(EvaluationStatus::Pending),
        in_progress: count(EvaluationStatus::InProgress),
    };

    let employees = members
        .iter()
        .map(|member| {
            let scores = completed_scores(evaluations.iter().filter(|e| e.employee == member.id));
            EmployeeBreakdown {
                employee: member.clone(),
                evaluations: scores.len(),
                average_rating: round2(mean(&scores)),
            }
        })
        .collect();

    let mut recent: Vec<&Evaluation> = evaluations.iter().filter(|e| e.is_completed()).collect();
    recent.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    let recent_evaluations = recent
        .into_iter()
        .take(RECENT_LIMIT)
        .map(|e| RecentEvaluation {
            id: e.id.clone(),
            date: e.updated_at,
            employee: directory.employee(&e.employee),
            evaluator: directory.employee(&e.evaluator),
            average_rating: score_of(e),
        })
        .collect();

    DepartmentReport {
        department: department.to_string(),
        statistics,
        employees,
        recent_evaluations,
    }
}
