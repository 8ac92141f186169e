//! 关联数据目录
//!
//! 评估列表、评论和报表需要展示人员 / 模板摘要，先批量加载再在内存中关联，
//! 避免逐条查询。

use std::collections::{HashMap, HashSet};

use shared::models::{EmployeeSummary, TemplateSummary};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::models::{Evaluation, Template, User};
use super::repository::{RepoResult, TemplateRepository, UserRepository};

/// ID ("table:key") -> 摘要
#[derive(Debug, Clone, Default)]
pub struct Directory {
    employees: HashMap<String, EmployeeSummary>,
    templates: HashMap<String, TemplateSummary>,
}

impl Directory {
    pub fn new(
        employees: impl IntoIterator<Item = EmployeeSummary>,
        templates: impl IntoIterator<Item = TemplateSummary>,
    ) -> Self {
        Self {
            employees: employees.into_iter().map(|e| (e.id.clone(), e)).collect(),
            templates: templates.into_iter().map(|t| (t.id.clone(), t)).collect(),
        }
    }

    /// 加载指定的人员和模板
    pub async fn load(
        db: &Surreal<Db>,
        user_ids: impl IntoIterator<Item = RecordId>,
        template_ids: impl IntoIterator<Item = RecordId>,
    ) -> RepoResult<Self> {
        let user_ids: Vec<RecordId> = dedup(user_ids);
        let template_ids: Vec<RecordId> = dedup(template_ids);

        let users = UserRepository::new(db.clone()).find_by_ids(user_ids).await?;
        let templates = TemplateRepository::new(db.clone())
            .find_by_ids(template_ids)
            .await?;

        Ok(Self::new(
            users.iter().map(employee_summary),
            templates.iter().map(template_summary),
        ))
    }

    /// 加载评估涉及的被评估人、评估人和模板
    pub async fn for_evaluations(db: &Surreal<Db>, evaluations: &[Evaluation]) -> RepoResult<Self> {
        let users = evaluations
            .iter()
            .flat_map(|e| [e.employee.clone(), e.evaluator.clone()]);
        let templates = evaluations.iter().map(|e| e.template.clone());
        Self::load(db, users, templates).await
    }

    pub fn employee(&self, id: &str) -> Option<EmployeeSummary> {
        self.employees.get(id).cloned()
    }

    pub fn template(&self, id: &str) -> Option<TemplateSummary> {
        self.templates.get(id).cloned()
    }

    pub fn template_name(&self, id: &str) -> Option<String> {
        self.templates.get(id).map(|t| t.name.clone())
    }
}

fn dedup(ids: impl IntoIterator<Item = RecordId>) -> Vec<RecordId> {
    let mut seen = HashSet::new();
    ids.into_iter()
        .filter(|id| seen.insert(id.to_string()))
        .collect()
}

pub fn employee_summary(user: &User) -> EmployeeSummary {
    EmployeeSummary {
        id: user.id.to_string(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        email: user.email.clone(),
        department: user.department.clone(),
        avatar: user.avatar.clone(),
    }
}

pub fn template_summary(template: &Template) -> TemplateSummary {
    TemplateSummary {
        id: template.id.to_string(),
        name: template.name.clone(),
        categories: template.categories.clone(),
    }
}
