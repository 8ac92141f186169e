//! 类型转换模块
//!
//! 将数据库模型 (db::models) 转换为 API 响应模型 (shared::models)

use crate::db::Directory;
use crate::db::models as db;
use shared::models as api;

// ============ User ============

impl From<db::User> for api::Employee {
    fn from(u: db::User) -> Self {
        Self {
            id: u.id.to_string(),
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
            department: u.department,
            role: u.role,
            avatar: u.avatar,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

// ============ Template ============

impl From<db::Template> for api::Template {
    fn from(t: db::Template) -> Self {
        Self {
            id: t.id.to_string(),
            name: t.name,
            description: t.description,
            categories: t.categories,
            created_by: t.created_by.to_string(),
            creator: None,
            is_active: t.is_active,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

pub fn template_view(t: db::Template, directory: &Directory) -> api::Template {
    let creator = directory.employee(&t.created_by.to_string());
    api::Template {
        creator,
        ..t.into()
    }
}

// ============ Evaluation ============

impl From<db::Evaluation> for api::Evaluation {
    fn from(e: db::Evaluation) -> Self {
        Self {
            id: e.id.to_string(),
            template: e.template.to_string(),
            employee: e.employee.to_string(),
            evaluator: e.evaluator.to_string(),
            evaluation_type: e.evaluation_type,
            period: e.period,
            criteria: e.criteria,
            overall_score: e.overall_score,
            general_comments: e.general_comments,
            strength_areas: e.strength_areas,
            improvement_areas: e.improvement_areas,
            feedback: e.feedback,
            responses: e.responses,
            status: e.status,
            submitted_at: e.submitted_at,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

/// 评估 + 被评估人 / 评估人 / 模板摘要
pub fn evaluation_detail(e: db::Evaluation, directory: &Directory) -> api::EvaluationDetail {
    let evaluation: api::Evaluation = e.into();
    api::EvaluationDetail {
        employee_info: directory.employee(&evaluation.employee),
        evaluator_info: directory.employee(&evaluation.evaluator),
        template_info: directory.template(&evaluation.template),
        evaluation,
    }
}

pub fn evaluation_details(
    evaluations: Vec<db::Evaluation>,
    directory: &Directory,
) -> Vec<api::EvaluationDetail> {
    evaluations
        .into_iter()
        .map(|e| evaluation_detail(e, directory))
        .collect()
}

pub fn feedback_view(e: db::Evaluation, directory: &Directory) -> api::FeedbackView {
    let employee = e.employee.to_string();
    let evaluator = e.evaluator.to_string();
    api::FeedbackView {
        evaluation_id: e.id.to_string(),
        feedback: e.feedback,
        responses: e.responses,
        status: e.status,
        employee_info: directory.employee(&employee),
        evaluator_info: directory.employee(&evaluator),
    }
}

// ============ Comment ============

impl From<db::Comment> for api::Comment {
    fn from(c: db::Comment) -> Self {
        Self {
            id: c.id.to_string(),
            evaluation: c.evaluation.to_string(),
            author: c.author.to_string(),
            author_info: None,
            content: c.content,
            parent_comment: c.parent_comment.map(|p| p.to_string()),
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

pub fn comment_view(c: db::Comment, directory: &Directory) -> api::Comment {
    let comment: api::Comment = c.into();
    api::Comment {
        author_info: directory.employee(&comment.author),
        ..comment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{EmployeeSummary, Role};
    use surrealdb::RecordId;

    #[test]
    fn test_user_conversion_drops_password() {
        let user = db::User {
            id: RecordId::from_table_key("user", "u1"),
            email: "u1@example.com".into(),
            password_hash: "$argon2id$secret".into(),
            first_name: "U".into(),
            last_name: "One".into(),
            department: "IT".into(),
            role: Role::Employee,
            avatar: None,
            created_at: 1,
            updated_at: 2,
        };
        let employee: api::Employee = user.into();
        assert_eq!(employee.id, "user:u1");

        let json = serde_json::to_string(&employee).unwrap();
        assert!(!json.contains("argon2"));
        assert!(!json.contains("password"));
    }

    #[test]
    fn test_comment_view_joins_author() {
        let comment = db::Comment {
            id: RecordId::from_table_key("comment", "c1"),
            evaluation: RecordId::from_table_key("evaluation", "e1"),
            author: RecordId::from_table_key("user", "a"),
            content: "Hi".into(),
            parent_comment: None,
            created_at: 1,
            updated_at: 1,
        };
        let directory = Directory::new(
            [EmployeeSummary {
                id: "user:a".into(),
                first_name: "Ann".into(),
                last_name: "A".into(),
                email: "a@example.com".into(),
                department: "IT".into(),
                avatar: None,
            }],
            [],
        );
        let view = comment_view(comment, &directory);
        assert_eq!(view.evaluation, "evaluation:e1");
        assert_eq!(view.author_info.map(|a| a.first_name), Some("Ann".into()));
    }
}
