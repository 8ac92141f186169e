//! Authentication Handlers
//!
//! Handles registration, login and profile lookup

use std::time::Duration;

use axum::{Json, extract::State, http::StatusCode};
use shared::client::{AuthResponse, LoginRequest, RegisterRequest};
use shared::models::Employee;
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::User;
use crate::db::repository::UserRepository;
use crate::security_log;
use crate::utils::{AppError, AppJson, AppResult};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

fn issue_token(state: &ServerState, user: &User) -> AppResult<String> {
    state
        .get_jwt_service()
        .generate_token(&user.id.to_string(), user.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))
}

/// Register handler
///
/// Creates an account and returns a JWT token (201)
pub async fn register(
    State(state): State<ServerState>,
    AppJson(req): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    req.validate()?;

    let user = UserRepository::new(state.get_db()).create(req).await?;
    let token = issue_token(&state, &user)?;

    tracing::info!(
        user_id = %user.id,
        email = %user.email,
        role = %user.role,
        "User registered"
    );

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User registered successfully".to_string(),
            token,
            user: user.into(),
        }),
    ))
}

/// Login handler
///
/// Authenticates user credentials and returns a JWT token
pub async fn login(
    State(state): State<ServerState>,
    AppJson(req): AppJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    req.validate()?;

    let user = UserRepository::new(state.get_db())
        .find_by_email(&req.email)
        .await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error message to prevent email enumeration
    let user = match user {
        Some(user) => {
            let password_valid = user
                .verify_password(&req.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;

            if !password_valid {
                security_log!(
                    "WARN",
                    "login_failed",
                    email = req.email.as_str(),
                    reason = "invalid_credentials"
                );
                return Err(AppError::invalid_credentials());
            }
            user
        }
        None => {
            security_log!(
                "WARN",
                "login_failed",
                email = req.email.as_str(),
                reason = "user_not_found"
            );
            return Err(AppError::invalid_credentials());
        }
    };

    let token = issue_token(&state, &user)?;

    tracing::info!(
        user_id = %user.id,
        email = %user.email,
        role = %user.role,
        "User logged in successfully"
    );

    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        token,
        user: user.into(),
    }))
}

/// Get current user profile
pub async fn profile(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Employee>> {
    let record = UserRepository::new(state.get_db())
        .find_by_id(&user.id)
        .await?
        .ok_or_else(AppError::account_not_found)?;
    Ok(Json(record.into()))
}
