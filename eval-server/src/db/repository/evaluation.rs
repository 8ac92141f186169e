//! Evaluation Repository
//!
//! 只负责持久化；状态推导和评分在 `crate::evaluations` 中完成。

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::Evaluation;
use shared::models::{Criterion, EvaluationStatus, EvaluationType, Period};
use shared::util::now_millis;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

/// 新建评估的字段
#[derive(Debug, Clone)]
pub struct NewEvaluation {
    pub template: RecordId,
    pub employee: RecordId,
    pub evaluator: RecordId,
    pub evaluation_type: EvaluationType,
    pub period: Period,
    pub criteria: Vec<Criterion>,
    pub overall_score: Option<f64>,
    pub general_comments: Option<String>,
    pub strength_areas: Vec<String>,
    pub improvement_areas: Vec<String>,
    pub status: EvaluationStatus,
}

#[derive(Clone)]
pub struct EvaluationRepository {
    base: BaseRepository,
}

impl EvaluationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All evaluations, most recently updated first
    pub async fn find_all(&self) -> RepoResult<Vec<Evaluation>> {
        let evaluations: Vec<Evaluation> = self
            .base
            .db()
            .query("SELECT * FROM evaluation ORDER BY updated_at DESC")
            .await?
            .take(0)?;
        Ok(evaluations)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Evaluation>> {
        let Some(thing) = parse_record_id("evaluation", id) else {
            return Ok(None);
        };
        let evaluation: Option<Evaluation> = self.base.db().select(thing).await?;
        Ok(evaluation)
    }

    /// Evaluations whose subject is the given user
    pub async fn find_by_employee(&self, employee: &RecordId) -> RepoResult<Vec<Evaluation>> {
        self.find_by_employees(vec![employee.clone()]).await
    }

    /// Evaluations whose subject is any of the given users
    pub async fn find_by_employees(&self, employees: Vec<RecordId>) -> RepoResult<Vec<Evaluation>> {
        if employees.is_empty() {
            return Ok(Vec::new());
        }
        let evaluations: Vec<Evaluation> = self
            .base
            .db()
            .query("SELECT * FROM evaluation WHERE employee INSIDE $employees ORDER BY updated_at DESC")
            .bind(("employees", employees))
            .await?
            .take(0)?;
        Ok(evaluations)
    }

    /// Evaluations authored by the given user
    pub async fn find_by_evaluator(&self, evaluator: &RecordId) -> RepoResult<Vec<Evaluation>> {
        let evaluations: Vec<Evaluation> = self
            .base
            .db()
            .query("SELECT * FROM evaluation WHERE evaluator = $evaluator ORDER BY updated_at DESC")
            .bind(("evaluator", evaluator.clone()))
            .await?
            .take(0)?;
        Ok(evaluations)
    }

    /// Evaluations about any of `employees` or written by `evaluator`
    pub async fn find_by_employees_or_evaluator(
        &self,
        employees: Vec<RecordId>,
        evaluator: &RecordId,
    ) -> RepoResult<Vec<Evaluation>> {
        let evaluations: Vec<Evaluation> = self
            .base
            .db()
            .query(
                r#"SELECT * FROM evaluation
                WHERE employee INSIDE $employees OR evaluator = $evaluator
                ORDER BY updated_at DESC"#,
            )
            .bind(("employees", employees))
            .bind(("evaluator", evaluator.clone()))
            .await?
            .take(0)?;
        Ok(evaluations)
    }

    pub async fn create(&self, data: NewEvaluation) -> RepoResult<Evaluation> {
        let now = now_millis();
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE evaluation SET
                    template = $template,
                    employee = $employee,
                    evaluator = $evaluator,
                    evaluation_type = $evaluation_type,
                    period = $period,
                    criteria = $criteria,
                    overall_score = $overall_score,
                    general_comments = $general_comments,
                    strength_areas = $strength_areas,
                    improvement_areas = $improvement_areas,
                    feedback = NONE,
                    responses = [],
                    status = $status,
                    submitted_at = NONE,
                    created_at = $now,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("template", data.template))
            .bind(("employee", data.employee))
            .bind(("evaluator", data.evaluator))
            .bind(("evaluation_type", data.evaluation_type))
            .bind(("period", data.period))
            .bind(("criteria", data.criteria))
            .bind(("overall_score", data.overall_score))
            .bind(("general_comments", data.general_comments))
            .bind(("strength_areas", data.strength_areas))
            .bind(("improvement_areas", data.improvement_areas))
            .bind(("status", data.status))
            .bind(("now", now))
            .await?;

        let created: Option<Evaluation> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create evaluation".to_string()))
    }

    /// Persist every mutable field of an evaluation and bump `updated_at`
    pub async fn save(&self, evaluation: Evaluation) -> RepoResult<Evaluation> {
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    template = $template,
                    employee = $employee,
                    evaluation_type = $evaluation_type,
                    period = $period,
                    criteria = $criteria,
                    overall_score = $overall_score,
                    general_comments = $general_comments,
                    strength_areas = $strength_areas,
                    improvement_areas = $improvement_areas,
                    feedback = $feedback,
                    responses = $responses,
                    status = $status,
                    submitted_at = $submitted_at,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("thing", evaluation.id))
            .bind(("template", evaluation.template))
            .bind(("employee", evaluation.employee))
            .bind(("evaluation_type", evaluation.evaluation_type))
            .bind(("period", evaluation.period))
            .bind(("criteria", evaluation.criteria))
            .bind(("overall_score", evaluation.overall_score))
            .bind(("general_comments", evaluation.general_comments))
            .bind(("strength_areas", evaluation.strength_areas))
            .bind(("improvement_areas", evaluation.improvement_areas))
            .bind(("feedback", evaluation.feedback))
            .bind(("responses", evaluation.responses))
            .bind(("status", evaluation.status))
            .bind(("submitted_at", evaluation.submitted_at))
            .bind(("now", now_millis()))
            .await?;

        result
            .take::<Option<Evaluation>>(0)?
            .ok_or_else(|| RepoError::NotFound("Evaluation not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DatabaseLocation;
    use crate::db::DbService;
    use chrono::NaiveDate;
    use shared::models::CriterionCategory;

    async fn repo() -> EvaluationRepository {
        let service = DbService::connect(&DatabaseLocation::Memory, "test", "test")
            .await
            .unwrap();
        EvaluationRepository::new(service.db)
    }

    fn new_evaluation(employee: &str, evaluator: &str) -> NewEvaluation {
        NewEvaluation {
            template: RecordId::from_table_key("template", "t1"),
            employee: RecordId::from_table_key("user", employee),
            evaluator: RecordId::from_table_key("user", evaluator),
            evaluation_type: EvaluationType::Peer,
            period: Period {
                start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
            },
            criteria: vec![Criterion {
                category: CriterionCategory::Teamwork,
                name: "Pairing".into(),
                score: 4,
                comment: None,
            }],
            overall_score: Some(4.0),
            general_comments: None,
            strength_areas: vec![],
            improvement_areas: vec![],
            status: EvaluationStatus::Pending,
        }
    }

    #[tokio::test]
    async fn test_create_roundtrip() {
        let repo = repo().await;
        let created = repo.create(new_evaluation("sub", "ev")).await.unwrap();

        assert_eq!(created.status, EvaluationStatus::Pending);
        assert_eq!(created.overall_score, Some(4.0));
        assert_eq!(created.criteria.len(), 1);
        assert!(created.responses.is_empty());
        assert!(created.feedback.is_none());
        assert_eq!(
            created.period.end_date,
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()
        );

        let loaded = repo.find_by_id(&created.id.to_string()).await.unwrap();
        assert!(loaded.is_some());
        assert!(repo.find_by_id("user:sub").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_queries_by_participant() {
        let repo = repo().await;
        repo.create(new_evaluation("a", "b")).await.unwrap();
        repo.create(new_evaluation("b", "c")).await.unwrap();
        repo.create(new_evaluation("c", "a")).await.unwrap();

        let a = RecordId::from_table_key("user", "a");
        let b = RecordId::from_table_key("user", "b");

        assert_eq!(repo.find_by_employee(&a).await.unwrap().len(), 1);
        assert_eq!(repo.find_by_evaluator(&a).await.unwrap().len(), 1);
        assert_eq!(
            repo.find_by_employees(vec![a.clone(), b]).await.unwrap().len(),
            2
        );
        assert_eq!(
            repo.find_by_employees_or_evaluator(vec![a.clone()], &a)
                .await
                .unwrap()
                .len(),
            2
        );
        assert_eq!(repo.find_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_save_updates_fields() {
        let repo = repo().await;
        let mut evaluation = repo.create(new_evaluation("sub", "ev")).await.unwrap();
        evaluation.feedback = Some("Great quarter".into());
        evaluation.status = EvaluationStatus::Completed;
        evaluation.overall_score = None;

        let saved = repo.save(evaluation.clone()).await.unwrap();
        assert_eq!(saved.feedback.as_deref(), Some("Great quarter"));
        assert_eq!(saved.status, EvaluationStatus::Completed);
        assert!(saved.overall_score.is_none());
        assert!(saved.updated_at >= evaluation.updated_at);
    }
}
