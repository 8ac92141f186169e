//! Eval Client - HTTP client and state container for the evaluation API
//!
//! - [`HttpClient`]: 每个 REST 路由一个类型化方法
//! - [`Store`]: 显式注入的状态容器，只能通过 [`Store::dispatch`] 修改
//! - [`Thunks`]: 调用 HttpClient 并派发 pending / fulfilled / rejected 动作

pub mod config;
pub mod error;
pub mod http;
pub mod store;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use store::{Action, AppState, Store, Subscription, Thunks};

// Re-export shared types for convenience
pub use shared::client::{AuthResponse, HealthResponse, LoginRequest, RegisterRequest};
