//! Data models
//!
//! Shared between eval-server and eval-client (via API).
//! All IDs are SurrealDB record ids rendered as `"table:key"` strings.

pub mod comment;
pub mod dashboard;
pub mod employee;
pub mod evaluation;
pub mod report;
pub mod role;
pub mod template;

// Re-exports
pub use comment::*;
pub use dashboard::*;
pub use employee::*;
pub use evaluation::*;
pub use report::*;
pub use role::*;
pub use template::*;
