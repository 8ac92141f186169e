//! 员工报表

use std::collections::BTreeMap;

use shared::models::{
    CategoryRating, CriterionCategory, EmployeeReport, EmployeeStatistics, EmployeeSummary,
    Evaluation, EvaluationDigest, EvaluationStatus, FeedbackEntry, MAX_SCORE, RadarPoint,
    TimelinePoint,
};

use super::{completed_scores, evaluation_date, score_of};
use crate::db::Directory;
use crate::evaluations::{mean, round2};

/// 生成员工报表
///
/// - `evaluations`: 该员工作为被评估人的全部评估，统计与列表只取已完成的
/// - `department_evaluations`: 同部门所有被评估人的评估（计算部门平均）
pub fn build_employee_report(
    employee: EmployeeSummary,
    evaluations: &[Evaluation],
    department_evaluations: &[Evaluation],
    directory: &Directory,
) -> EmployeeReport {
    let mut completed: Vec<&Evaluation> = evaluations.iter().filter(|e| e.is_completed()).collect();
    completed.sort_by_key(|e| evaluation_date(e));

    let count = |status: EvaluationStatus| evaluations.iter().filter(|e| e.status == status).count();

    let statistics = EmployeeStatistics {
        total_evaluations: completed.len(),
        completed_evaluations: completed.len(),
        pending_evaluations: count(EvaluationStatus::Pending),
        in_progress_evaluations: count(EvaluationStatus::InProgress),
        average_overall_rating: round2(mean(&completed_scores(completed.iter().copied()))),
        department_average: round2(mean(&completed_scores(department_evaluations))),
        last_evaluation_date: completed.last().map(|e| evaluation_date(e)),
    };

    let timeline = completed
        .iter()
        .map(|e| TimelinePoint {
            evaluation_id: e.id.clone(),
            date: evaluation_date(e),
            evaluator: directory.employee(&e.evaluator),
            template: directory.template_name(&e.template),
            average_rating: score_of(e),
        })
        .collect();

    let feedback = completed
        .iter()
        .rev()
        .map(|e| FeedbackEntry {
            evaluation_id: e.id.clone(),
            date: evaluation_date(e),
            evaluator: directory.employee(&e.evaluator),
            feedback: e.feedback.clone(),
            general_comments: e.general_comments.clone(),
            criteria: e.criteria.clone(),
            responses: e.responses.clone(),
        })
        .collect();

    let mut digests: Vec<EvaluationDigest> = completed
        .iter()
        .map(|e| EvaluationDigest {
            id: e.id.clone(),
            date: evaluation_date(e),
            status: e.status,
            template: directory.template_name(&e.template),
            evaluator: directory.employee(&e.evaluator),
            overall_score: e.overall_score,
        })
        .collect();
    digests.sort_by(|a, b| b.date.cmp(&a.date));

    EmployeeReport {
        employee,
        statistics,
        ratings: category_ratings(&completed),
        radar: radar(&completed),
        timeline,
        feedback,
        evaluations: digests,
    }
}

/// 按评分项类别和回复问题分组的评分统计
fn category_ratings(completed: &[&Evaluation]) -> Vec<CategoryRating> {
    let mut groups: BTreeMap<String, Vec<u8>> = BTreeMap::new();
    for evaluation in completed {
        for criterion in &evaluation.criteria {
            groups
                .entry(criterion.category.as_str().to_string())
                .or_default()
                .push(criterion.score);
        }
        for response in &evaluation.responses {
            groups
                .entry(response.question_id.clone())
                .or_default()
                .push(response.rating);
        }
    }

    groups
        .into_iter()
        .map(|(category, ratings)| {
            let values: Vec<f64> = ratings.iter().copied().map(f64::from).collect();
            let mut distribution = BTreeMap::new();
            for &r in &ratings {
                *distribution.entry(r).or_insert(0) += 1;
            }
            CategoryRating {
                category,
                average_rating: round2(mean(&values)),
                total_responses: ratings.len(),
                ratings,
                distribution,
            }
        })
        .collect()
}

/// 雷达图：出现过的固定类别
fn radar(completed: &[&Evaluation]) -> Vec<RadarPoint> {
    CriterionCategory::ALL
        .iter()
        .filter_map(|category| {
            let scores: Vec<f64> = completed
                .iter()
                .flat_map(|e| e.criteria.iter())
                .filter(|c| c.category == *category)
                .map(|c| f64::from(c.score))
                .collect();
            (!scores.is_empty()).then(|| RadarPoint {
                subject: category.label().to_string(),
                score: round2(mean(&scores)),
                full_mark: MAX_SCORE,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::fixtures::{criterion, evaluation, person, response};

    use shared::models::CriterionCategory::*;

    #[test]
    fn test_overall_average_is_mean_of_evaluation_means() {
        let a = "user:a";
        let evaluations = vec![
            evaluation(
                "evaluation:1",
                a,
                "user:b",
                vec![
                    criterion(TechnicalSkills, 5),
                    criterion(Teamwork, 4),
                    criterion(Leadership, 3),
                ],
                EvaluationStatus::Completed,
                100,
            ),
            evaluation(
                "evaluation:2",
                a,
                "user:c",
                vec![criterion(TechnicalSkills, 2), criterion(Teamwork, 2)],
                EvaluationStatus::Completed,
                200,
            ),
            // 未完成的不计入
            evaluation(
                "evaluation:3",
                a,
                "user:c",
                vec![],
                EvaluationStatus::InProgress,
                300,
            ),
        ];

        let report = build_employee_report(
            person(a, "IT"),
            &evaluations,
            &evaluations,
            &Directory::default(),
        );

        assert_eq!(report.statistics.average_overall_rating, 3.0);
        assert_eq!(report.statistics.total_evaluations, 2);
        assert_eq!(report.statistics.completed_evaluations, 2);
        assert_eq!(report.statistics.in_progress_evaluations, 1);
        assert_eq!(report.statistics.pending_evaluations, 0);
        assert_eq!(report.statistics.last_evaluation_date, Some(200));
        assert_eq!(report.timeline.len(), 2);
        assert_eq!(report.timeline[0].average_rating, 4.0);
        assert_eq!(report.timeline[1].average_rating, 2.0);
        assert_eq!(report.evaluations.len(), 2);
        assert_eq!(report.evaluations[0].id, "evaluation:2");
        assert!(report.evaluations.iter().all(|d| d.status == EvaluationStatus::Completed));
        assert_eq!(report.feedback[0].evaluation_id, "evaluation:2");
    }

    #[test]
    fn test_empty_report_is_renderable() {
        let report =
            build_employee_report(person("user:a", "IT"), &[], &[], &Directory::default());
        assert_eq!(report.statistics.average_overall_rating, 0.0);
        assert_eq!(report.statistics.department_average, 0.0);
        assert!(report.statistics.last_evaluation_date.is_none());
        assert!(report.ratings.is_empty());
        assert!(report.radar.is_empty());
    }

    #[test]
    fn test_category_ratings_and_radar() {
        let mut with_feedback = evaluation(
            "evaluation:1",
            "user:a",
            "user:b",
            vec![criterion(Teamwork, 4), criterion(Teamwork, 5)],
            EvaluationStatus::Completed,
            100,
        );
        with_feedback.responses = vec![response("overall", 3)];
        let second = evaluation(
            "evaluation:2",
            "user:a",
            "user:c",
            vec![criterion(Teamwork, 4)],
            EvaluationStatus::Completed,
            200,
        );

        let report = build_employee_report(
            person("user:a", "IT"),
            &[with_feedback, second],
            &[],
            &Directory::default(),
        );

        let teamwork = report
            .ratings
            .iter()
            .find(|r| r.category == "teamwork")
            .unwrap();
        assert_eq!(teamwork.total_responses, 3);
        assert_eq!(teamwork.average_rating, 4.33);
        assert_eq!(teamwork.distribution.get(&4), Some(&2));
        assert_eq!(teamwork.distribution.get(&5), Some(&1));

        let overall = report
            .ratings
            .iter()
            .find(|r| r.category == "overall")
            .unwrap();
        assert_eq!(overall.ratings, vec![3]);

        assert_eq!(report.radar.len(), 1);
        assert_eq!(report.radar[0].subject, "Teamwork");
        assert_eq!(report.radar[0].score, 4.33);
        assert_eq!(report.radar[0].full_mark, 5);
    }

    #[test]
    fn test_department_average_uses_completed_only() {
        let mine = evaluation(
            "evaluation:1",
            "user:a",
            "user:b",
            vec![criterion(Productivity, 5)],
            EvaluationStatus::Completed,
            100,
        );
        let colleague = evaluation(
            "evaluation:2",
            "user:c",
            "user:b",
            vec![criterion(Productivity, 3)],
            EvaluationStatus::Completed,
            100,
        );
        let draft = evaluation(
            "evaluation:3",
            "user:c",
            "user:b",
            vec![criterion(Productivity, 1)],
            EvaluationStatus::Pending,
            100,
        );

        let report = build_employee_report(
            person("user:a", "IT"),
            std::slice::from_ref(&mine),
            &[mine.clone(), colleague, draft],
            &Directory::default(),
        );
        assert_eq!(report.statistics.department_average, 4.0);
        assert_eq!(report.statistics.average_overall_rating, 5.0);
    }
}
