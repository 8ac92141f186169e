//! Evaluation Engine
//!
//! 评分计算与状态推导，不依赖 HTTP 和数据库连接，处理函数负责加载和保存。

pub mod lifecycle;
pub mod scoring;

pub use lifecycle::{EvaluationChanges, apply_changes, derive_status, set_feedback};
pub use scoring::{evaluation_score, mean, overall_score, round2};
