//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Authentication errors
/// - 2xxx: Permission errors
/// - 3xxx: Template errors
/// - 4xxx: Evaluation errors
/// - 5xxx: Comment errors
/// - 6xxx: Employee errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Permission errors (2xxx)
    Permission,
    /// Template errors (3xxx)
    Template,
    /// Evaluation errors (4xxx)
    Evaluation,
    /// Comment errors (5xxx)
    Comment,
    /// Employee errors (6xxx)
    Employee,
    /// System errors (9xxx and anything unassigned)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            3000..4000 => Self::Template,
            4000..5000 => Self::Evaluation,
            5000..6000 => Self::Comment,
            6000..7000 => Self::Employee,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::Template => "template",
            Self::Evaluation => "evaluation",
            Self::Comment => "comment",
            Self::Employee => "employee",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Auth);
        assert_eq!(ErrorCategory::from_code(2001), ErrorCategory::Permission);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::Template);
        assert_eq!(ErrorCategory::from_code(4001), ErrorCategory::Evaluation);
        assert_eq!(ErrorCategory::from_code(5001), ErrorCategory::Comment);
        assert_eq!(ErrorCategory::from_code(6001), ErrorCategory::Employee);
        assert_eq!(ErrorCategory::from_code(7001), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::Success.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::AccountNotFound.category(), ErrorCategory::Auth);
        assert_eq!(
            ErrorCode::DepartmentAccessDenied.category(),
            ErrorCategory::Permission
        );
        assert_eq!(
            ErrorCode::TemplateInvalid.category(),
            ErrorCategory::Template
        );
        assert_eq!(
            ErrorCode::EvaluationNotFound.category(),
            ErrorCategory::Evaluation
        );
        assert_eq!(ErrorCode::CommentTooLong.category(), ErrorCategory::Comment);
        assert_eq!(
            ErrorCode::EmailAlreadyRegistered.category(),
            ErrorCategory::Employee
        );
        assert_eq!(ErrorCode::DatabaseError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_category_serialize() {
        let json = serde_json::to_string(&ErrorCategory::Evaluation).unwrap();
        assert_eq!(json, "\"evaluation\"");

        let category: ErrorCategory = serde_json::from_str("\"comment\"").unwrap();
        assert_eq!(category, ErrorCategory::Comment);
    }
}
