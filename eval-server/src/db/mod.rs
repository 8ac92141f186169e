//! Database Module
//!
//! 嵌入式 SurrealDB：磁盘使用 RocksDB，测试使用内存引擎。
//! 启动时执行幂等的 schema 脚本。

pub mod directory;
pub mod models;
pub mod repository;

pub use directory::Directory;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::core::DatabaseLocation;
use repository::RepoResult;

/// 表和索引定义 (可重复执行)
const SCHEMA: &str = r#"
DEFINE TABLE IF NOT EXISTS user SCHEMALESS;
DEFINE INDEX IF NOT EXISTS user_email ON TABLE user FIELDS email UNIQUE;
DEFINE INDEX IF NOT EXISTS user_department ON TABLE user FIELDS department;

DEFINE TABLE IF NOT EXISTS template SCHEMALESS;

DEFINE TABLE IF NOT EXISTS evaluation SCHEMALESS;
DEFINE INDEX IF NOT EXISTS evaluation_employee ON TABLE evaluation FIELDS employee;
DEFINE INDEX IF NOT EXISTS evaluation_evaluator ON TABLE evaluation FIELDS evaluator;

DEFINE TABLE IF NOT EXISTS comment SCHEMALESS;
DEFINE INDEX IF NOT EXISTS comment_evaluation ON TABLE comment FIELDS evaluation;
"#;

/// Database service, owns the SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// 打开数据库、选择 namespace/database 并应用 schema
    pub async fn connect(
        location: &DatabaseLocation,
        namespace: &str,
        database: &str,
    ) -> RepoResult<Self> {
        let db = match location {
            DatabaseLocation::Memory => Surreal::new::<Mem>(()).await?,
            DatabaseLocation::Path(path) => Surreal::new::<RocksDb>(path.as_path()).await?,
        };

        db.use_ns(namespace.to_string())
            .use_db(database.to_string())
            .await?;

        match location {
            DatabaseLocation::Memory => tracing::info!("Database opened (in-memory)"),
            DatabaseLocation::Path(path) => {
                tracing::info!(path = %path.display(), "Database opened (RocksDB)")
            }
        }

        db.query(SCHEMA).await?.check()?;
        tracing::info!("Database schema applied");

        Ok(Self { db })
    }
}
