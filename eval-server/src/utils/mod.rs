//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] - 应用错误类型 (from shared::error)
//! - [`ApiResponse`] - API 响应结构 (from shared::error)
//! - [`AppJson`] - 请求体提取器，解析失败返回 400
//! - 日志、输入校验

pub mod json;
pub mod logger;
pub mod validation;

pub use json::AppJson;
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
