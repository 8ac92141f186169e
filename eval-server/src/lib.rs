//! Evaluation Server - 360° 绩效评估 REST API
//!
//! # 架构概述
//!
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储
//! - **认证** (`auth`): JWT + Argon2 认证体系，声明式权限表
//! - **评估引擎** (`evaluations`): 评分计算与状态推导
//! - **报表** (`reports`): 员工 / 部门报表与首页统计
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! eval-server/src/
//! ├── core/          # 配置、状态、错误
//! ├── auth/          # JWT 认证、权限
//! ├── db/            # 数据库层
//! ├── evaluations/   # 评分与生命周期
//! ├── reports/       # 聚合计算
//! ├── services/      # HTTP 服务
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 工具函数
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod evaluations;
pub mod reports;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use services::HttpService;
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 加载 .env 并初始化日志
pub fn setup_environment() {
    if let Err(e) = dotenvy::dotenv()
        && !e.not_found()
    {
        eprintln!("Failed to load .env: {e}");
    }

    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into());
    let json = std::env::var("LOG_JSON").is_ok_and(|v| v == "1" || v == "true");
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(Some(&level), json, log_dir.as_deref());
}

pub fn print_banner() {
    println!(
        r#"
    ______            __
   / ____/   ______ _/ /
  / __/ | | / / __ `/ /
 / /___ | |/ / /_/ / /
/_____/ |___/\__,_/_/   360
    "#
    );
}
