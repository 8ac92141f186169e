//! 服务模块

pub mod https;

pub use https::{HttpService, build_app};
