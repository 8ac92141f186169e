//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 注册、登录、个人信息
//! - [`employees`] - 员工目录
//! - [`templates`] - 评估模板
//! - [`evaluations`] - 评估
//! - [`feedback`] - 评估反馈
//! - [`comments`] - 评估讨论
//! - [`reports`] - 员工 / 部门报表
//! - [`dashboard`] - 首页统计

pub mod convert;
mod loaders;

pub mod auth;
pub mod health;

pub mod comments;
pub mod dashboard;
pub mod employees;
pub mod evaluations;
pub mod feedback;
pub mod reports;
pub mod templates;

// Re-export common types for handlers
pub use crate::utils::{ApiResponse, AppResult};
