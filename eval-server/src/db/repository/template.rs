//! Template Repository
//!
//! 模板只做软删除（`is_active = false`）。

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::Template;
use shared::util::now_millis;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

/// 已校验的模板字段
#[derive(Debug, Clone)]
pub struct TemplateFields {
    pub name: String,
    pub description: Option<String>,
    pub categories: Vec<String>,
}

#[derive(Clone)]
pub struct TemplateRepository {
    base: BaseRepository,
}

impl TemplateRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Active templates, newest first
    pub async fn find_active(&self) -> RepoResult<Vec<Template>> {
        let templates: Vec<Template> = self
            .base
            .db()
            .query("SELECT * FROM template WHERE is_active = true ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(templates)
    }

    /// Find template by id, including inactive ones
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Template>> {
        let Some(thing) = parse_record_id("template", id) else {
            return Ok(None);
        };
        let template: Option<Template> = self.base.db().select(thing).await?;
        Ok(template)
    }

    /// Find template by id, inactive treated as absent
    pub async fn find_active_by_id(&self, id: &str) -> RepoResult<Option<Template>> {
        Ok(self.find_by_id(id).await?.filter(|t| t.is_active))
    }

    /// Batch load templates for joins
    pub async fn find_by_ids(&self, ids: Vec<RecordId>) -> RepoResult<Vec<Template>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let templates: Vec<Template> = self
            .base
            .db()
            .query("SELECT * FROM template WHERE id INSIDE $ids")
            .bind(("ids", ids))
            .await?
            .take(0)?;
        Ok(templates)
    }

    pub async fn create(&self, fields: TemplateFields, created_by: RecordId) -> RepoResult<Template> {
        let now = now_millis();
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE template SET
                    name = $name,
                    description = $description,
                    categories = $categories,
                    created_by = $created_by,
                    is_active = true,
                    created_at = $now,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("name", fields.name))
            .bind(("description", fields.description))
            .bind(("categories", fields.categories))
            .bind(("created_by", created_by))
            .bind(("now", now))
            .await?;

        let created: Option<Template> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create template".to_string()))
    }

    /// Replace name/description/categories of an active template
    pub async fn update(&self, id: &str, fields: TemplateFields) -> RepoResult<Template> {
        let existing = self
            .find_active_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound("Template not found".to_string()))?;

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    name = $name,
                    description = $description,
                    categories = $categories,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("thing", existing.id))
            .bind(("name", fields.name))
            .bind(("description", fields.description))
            .bind(("categories", fields.categories))
            .bind(("now", now_millis()))
            .await?;

        result
            .take::<Option<Template>>(0)?
            .ok_or_else(|| RepoError::NotFound("Template not found".to_string()))
    }

    /// Soft delete
    pub async fn deactivate(&self, id: &str) -> RepoResult<()> {
        let existing = self
            .find_active_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound("Template not found".to_string()))?;

        self.base
            .db()
            .query("UPDATE $thing SET is_active = false, updated_at = $now")
            .bind(("thing", existing.id))
            .bind(("now", now_millis()))
            .await?
            .check()?;
        Ok(())
    }
}
