//! 首页统计

use shared::models::{DashboardSummary, EvaluationDetail};

use super::completed_scores;
use crate::auth::CurrentUser;
use crate::evaluations::{mean, round2};

/// 最近评估条数
pub const RECENT_LIMIT: usize = 5;

/// 汇总调用者范围内的评估
///
/// - `scoped`: 按角色可见的评估（admin 全部，经理本部门，员工本人被评估）
/// - `authored`: 调用者作为评估人的评估
pub fn build_dashboard(
    user: &CurrentUser,
    total_employees: usize,
    mut scoped: Vec<EvaluationDetail>,
    authored: Vec<EvaluationDetail>,
) -> DashboardSummary {
    let completed = scoped.iter().filter(|d| d.evaluation.is_completed()).count();
    let average_rating = round2(mean(&completed_scores(
        scoped.iter().map(|d| &d.evaluation),
    )));

    let total_evaluations = scoped.len();
    scoped.sort_by(|a, b| b.evaluation.updated_at.cmp(&a.evaluation.updated_at));
    scoped.truncate(RECENT_LIMIT);

    let pending_for_me = authored
        .into_iter()
        .filter(|d| !d.evaluation.is_completed())
        .collect();

    DashboardSummary {
        role: user.role,
        department: user.is_manager().then(|| user.department.clone()),
        total_employees,
        total_evaluations,
        completed_evaluations: completed,
        pending_evaluations: total_evaluations - completed,
        average_rating,
        recent_evaluations: scoped,
        pending_for_me,
    }
}
