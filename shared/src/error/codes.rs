//! Unified error codes for the evaluation platform
//!
//! This module defines all error codes used across eval-server and eval-client.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Template errors
//! - 4xxx: Evaluation errors
//! - 5xxx: Comment errors
//! - 6xxx: Employee errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Token refers to a user that has been removed
    AccountNotFound = 1008,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2003,
    /// Caller does not own the resource
    NotResourceOwner = 2006,
    /// Caller is not a manager of the department
    DepartmentAccessDenied = 2007,

    // ==================== 3xxx: Template ====================
    /// Template not found (or soft-deleted)
    TemplateNotFound = 3001,
    /// Template needs a name and at least one category
    TemplateInvalid = 3002,

    // ==================== 4xxx: Evaluation ====================
    /// Evaluation not found
    EvaluationNotFound = 4001,
    /// Criterion score outside 1..=5
    EvaluationInvalidScore = 4002,
    /// Period start is after period end
    EvaluationInvalidPeriod = 4003,
    /// Feedback text is empty
    FeedbackRequired = 4004,

    // ==================== 5xxx: Comment ====================
    /// Comment not found
    CommentNotFound = 5001,
    /// Comment content is empty
    CommentContentRequired = 5002,
    /// Comment content exceeds the length limit
    CommentTooLong = 5003,

    // ==================== 6xxx: Employee ====================
    /// Employee not found
    EmployeeNotFound = 6001,
    /// Email already registered
    EmailAlreadyRegistered = 6002,
    /// Department has no employees
    DepartmentNotFound = 6003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the default message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",

            // Auth
            ErrorCode::NotAuthenticated => "Authentication token is required",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Token has expired",
            ErrorCode::TokenInvalid => "Invalid token",
            ErrorCode::AccountNotFound => "User no longer exists",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Admin access required",
            ErrorCode::NotResourceOwner => "Not authorized to modify this resource",
            ErrorCode::DepartmentAccessDenied => "Not authorized to access this department",

            // Template
            ErrorCode::TemplateNotFound => "Template not found",
            ErrorCode::TemplateInvalid => "Name and at least one category are required",

            // Evaluation
            ErrorCode::EvaluationNotFound => "Evaluation not found",
            ErrorCode::EvaluationInvalidScore => "Score must be an integer between 1 and 5",
            ErrorCode::EvaluationInvalidPeriod => "Period start date must not be after end date",
            ErrorCode::FeedbackRequired => "Feedback is required",

            // Comment
            ErrorCode::CommentNotFound => "Comment not found",
            ErrorCode::CommentContentRequired => "Comment content is required",
            ErrorCode::CommentTooLong => "Comment cannot exceed 1000 characters",

            // Employee
            ErrorCode::EmployeeNotFound => "Employee not found",
            ErrorCode::EmailAlreadyRegistered => "Email already registered",
            ErrorCode::DepartmentNotFound => "No employees found in this department",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1008 => Ok(ErrorCode::AccountNotFound),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2003 => Ok(ErrorCode::AdminRequired),
            2006 => Ok(ErrorCode::NotResourceOwner),
            2007 => Ok(ErrorCode::DepartmentAccessDenied),

            // Template
            3001 => Ok(ErrorCode::TemplateNotFound),
            3002 => Ok(ErrorCode::TemplateInvalid),

            // Evaluation
            4001 => Ok(ErrorCode::EvaluationNotFound),
            4002 => Ok(ErrorCode::EvaluationInvalidScore),
            4003 => Ok(ErrorCode::EvaluationInvalidPeriod),
            4004 => Ok(ErrorCode::FeedbackRequired),

            // Comment
            5001 => Ok(ErrorCode::CommentNotFound),
            5002 => Ok(ErrorCode::CommentContentRequired),
            5003 => Ok(ErrorCode::CommentTooLong),

            // Employee
            6001 => Ok(ErrorCode::EmployeeNotFound),
            6002 => Ok(ErrorCode::EmailAlreadyRegistered),
            6003 => Ok(ErrorCode::DepartmentNotFound),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::AccountNotFound.code(), 1008);
        assert_eq!(ErrorCode::PermissionDenied.code(), 2001);
        assert_eq!(ErrorCode::TemplateInvalid.code(), 3002);
        assert_eq!(ErrorCode::EvaluationNotFound.code(), 4001);
        assert_eq!(ErrorCode::CommentTooLong.code(), 5003);
        assert_eq!(ErrorCode::EmailAlreadyRegistered.code(), 6002);
        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(0), Ok(ErrorCode::Success));
        assert_eq!(ErrorCode::try_from(3002), Ok(ErrorCode::TemplateInvalid));
        assert_eq!(ErrorCode::try_from(5001), Ok(ErrorCode::CommentNotFound));
        assert_eq!(ErrorCode::try_from(9001), Ok(ErrorCode::InternalError));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(7001), Err(InvalidErrorCode(7001)));
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&ErrorCode::EvaluationNotFound).unwrap();
        assert_eq!(json, "4001");
    }

    #[test]
    fn test_deserialize() {
        let code: ErrorCode = serde_json::from_str("6002").unwrap();
        assert_eq!(code, ErrorCode::EmailAlreadyRegistered);

        let result: Result<ErrorCode, _> = serde_json::from_str("12345");
        assert!(result.is_err());
    }

    #[test]
    fn test_message() {
        assert_eq!(
            ErrorCode::TemplateInvalid.message(),
            "Name and at least one category are required"
        );
        assert_eq!(
            ErrorCode::InvalidCredentials.message(),
            "Invalid email or password"
        );
    }

    #[test]
    fn test_roundtrip_all_codes() {
        let codes = [
            ErrorCode::Success,
            ErrorCode::NotFound,
            ErrorCode::TokenExpired,
            ErrorCode::AdminRequired,
            ErrorCode::TemplateNotFound,
            ErrorCode::FeedbackRequired,
            ErrorCode::CommentContentRequired,
            ErrorCode::DepartmentNotFound,
            ErrorCode::EmailAlreadyRegistered,
            ErrorCode::DatabaseError,
        ];
        for code in codes {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }
}
