//! Repository Module
//!
//! Provides CRUD operations for SurrealDB tables.

pub mod comment;
pub mod evaluation;
pub mod template;
pub mod user;

pub use comment::CommentRepository;
pub use evaluation::EvaluationRepository;
pub use template::TemplateRepository;
pub use user::UserRepository;

use shared::error::{AppError, ErrorCode};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Email already registered")]
    EmailTaken,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let message = err.to_string();
        // UNIQUE 索引冲突
        if message.contains("already contains") {
            RepoError::Duplicate(message)
        } else {
            RepoError::Database(message)
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::EmailTaken => AppError::new(ErrorCode::EmailAlreadyRegistered),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: 对外统一使用 "table:id" 格式
// =============================================================================
//
//   - 解析: parse_record_id("user", "user:abc") 或 parse_record_id("user", "abc")
//   - 输出: record_id.to_string() => "user:abc"
//   - 表名不匹配或格式错误视为记录不存在

/// 将外部传入的 ID 解析为指定表的 RecordId
pub fn parse_record_id(table: &str, raw: &str) -> Option<RecordId> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if raw.contains(':') {
        let id: RecordId = raw.parse().ok()?;
        (id.table() == table).then_some(id)
    } else {
        Some(RecordId::from_table_key(table, raw))
    }
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
