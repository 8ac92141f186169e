//! Client-related types shared between server and client
//!
//! Common request/response types used in API communication.
//! These types are shared between eval-server and eval-client.

use crate::models::Employee;
use serde::{Deserialize, Serialize};
use validator::Validate;

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Registration payload, same shape as an admin-created employee
pub type RegisterRequest = crate::models::EmployeeCreate;

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Register / login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: Employee,
}

// =============================================================================
// Health
// =============================================================================

/// `GET /health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
