//! Comment Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::Comment;
use shared::util::now_millis;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct CommentRepository {
    base: BaseRepository,
}

impl CommentRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Comments of an evaluation, newest first
    pub async fn find_by_evaluation(&self, evaluation: &RecordId) -> RepoResult<Vec<Comment>> {
        let comments: Vec<Comment> = self
            .base
            .db()
            .query("SELECT * FROM comment WHERE evaluation = $evaluation ORDER BY created_at DESC")
            .bind(("evaluation", evaluation.clone()))
            .await?
            .take(0)?;
        Ok(comments)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Comment>> {
        let Some(thing) = parse_record_id("comment", id) else {
            return Ok(None);
        };
        let comment: Option<Comment> = self.base.db().select(thing).await?;
        Ok(comment)
    }

    pub async fn create(
        &self,
        evaluation: RecordId,
        author: RecordId,
        content: String,
        parent_comment: Option<RecordId>,
    ) -> RepoResult<Comment> {
        let now = now_millis();
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE comment SET
                    evaluation = $evaluation,
                    author = $author,
                    content = $content,
                    parent_comment = $parent_comment,
                    created_at = $now,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("evaluation", evaluation))
            .bind(("author", author))
            .bind(("content", content))
            .bind(("parent_comment", parent_comment))
            .bind(("now", now))
            .await?;

        let created: Option<Comment> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create comment".to_string()))
    }

    pub async fn update_content(&self, id: &RecordId, content: String) -> RepoResult<Comment> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET content = $content, updated_at = $now RETURN AFTER")
            .bind(("thing", id.clone()))
            .bind(("content", content))
            .bind(("now", now_millis()))
            .await?;

        result
            .take::<Option<Comment>>(0)?
            .ok_or_else(|| RepoError::NotFound("Comment not found".to_string()))
    }

    /// Hard delete
    pub async fn delete(&self, id: &RecordId) -> RepoResult<()> {
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", id.clone()))
            .await?
            .check()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DatabaseLocation;
    use crate::db::DbService;

    async fn repo() -> CommentRepository {
        let service = DbService::connect(&DatabaseLocation::Memory, "test", "test")
            .await
            .unwrap();
        CommentRepository::new(service.db)
    }

    #[tokio::test]
    async fn test_comment_lifecycle() {
        let repo = repo().await;
        let evaluation = RecordId::from_table_key("evaluation", "e1");
        let author = RecordId::from_table_key("user", "a");

        let first = repo
            .create(evaluation.clone(), author.clone(), "First".into(), None)
            .await
            .unwrap();
        let reply = repo
            .create(
                evaluation.clone(),
                author.clone(),
                "Reply".into(),
                Some(first.id.clone()),
            )
            .await
            .unwrap();
        assert_eq!(reply.parent_comment, Some(first.id.clone()));

        let listed = repo.find_by_evaluation(&evaluation).await.unwrap();
        assert_eq!(listed.len(), 2);

        let edited = repo.update_content(&first.id, "Edited".into()).await.unwrap();
        assert_eq!(edited.content, "Edited");

        repo.delete(&first.id).await.unwrap();
        assert!(repo.find_by_id(&first.id.to_string()).await.unwrap().is_none());
        assert_eq!(repo.find_by_evaluation(&evaluation).await.unwrap().len(), 1);
    }
}
