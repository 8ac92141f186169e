use std::path::PathBuf;

use crate::auth::JwtConfig;
use crate::core::{Result, ServerError};

/// 数据库存储位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    /// RocksDB 目录
    Path(PathBuf),
    /// 内存数据库 (测试用)
    Memory,
}

/// 服务器配置 - 评估服务的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 |
/// | HTTP_PORT | 5000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | DATABASE_PATH | WORK_DIR/database | RocksDB 目录，`memory` 表示内存库 |
/// | DATABASE_NAMESPACE | evaluation | SurrealDB namespace |
/// | DATABASE_NAME | main | SurrealDB database |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (无) | 日志目录，存在时按天滚动写文件 |
///
/// JWT 相关变量见 [`JwtConfig`]。
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/eval HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 数据库位置
    pub database: DatabaseLocation,
    /// SurrealDB namespace
    pub database_namespace: String,
    /// SurrealDB database
    pub database_name: String,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
    /// 日志级别
    pub log_level: String,
    /// 日志目录
    pub log_dir: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值。JWT 密钥不合法（或生产环境缺失）时返回错误。
    pub fn from_env() -> Result<Self> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let jwt = JwtConfig::from_env(environment == "production")
            .map_err(|e| ServerError::Config(e.to_string()))?;
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into());
        let database = match std::env::var("DATABASE_PATH") {
            Ok(path) if path == "memory" => DatabaseLocation::Memory,
            Ok(path) => DatabaseLocation::Path(PathBuf::from(path)),
            Err(_) => DatabaseLocation::Path(PathBuf::from(&work_dir).join("database")),
        };

        Ok(Self {
            work_dir,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            jwt,
            environment,
            database,
            database_namespace: std::env::var("DATABASE_NAMESPACE")
                .unwrap_or_else(|_| "evaluation".into()),
            database_name: std::env::var("DATABASE_NAME").unwrap_or_else(|_| "main".into()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
        })
    }

    /// 测试配置：内存数据库 + 固定 JWT 密钥，不读取环境变量
    pub fn for_tests() -> Self {
        Self {
            work_dir: std::env::temp_dir().to_string_lossy().into_owned(),
            http_port: 0,
            jwt: JwtConfig {
                secret: "test-secret-key-that-is-long-enough-for-hs256".to_string(),
                expiration_minutes: 60,
                issuer: "eval-server".to_string(),
                audience: "eval-clients".to_string(),
            },
            environment: "test".to_string(),
            database: DatabaseLocation::Memory,
            database_namespace: "test".to_string(),
            database_name: "test".to_string(),
            request_timeout_ms: 30000,
            log_level: "warn".to_string(),
            log_dir: None,
        }
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// 确保工作目录存在 (内存库时只创建工作目录)
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.work_dir)?;
        if let DatabaseLocation::Path(path) = &self.database {
            std::fs::create_dir_all(path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_for_tests_uses_memory_db() {
        let config = Config::for_tests();
        assert_eq!(config.database, DatabaseLocation::Memory);
        assert!(config.jwt.secret.len() >= 32);
        assert!(!config.is_production());
    }
}
