//! Shared types for the evaluation platform
//!
//! Common types used by eval-server and eval-client: error codes,
//! response structures, domain models and request DTOs.

pub mod client;
pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};
