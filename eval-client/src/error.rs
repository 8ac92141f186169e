//! Client error types

use reqwest::StatusCode;
use shared::error::ApiResponse;
use thiserror::Error;

/// Client error type
///
/// 服务端错误按 HTTP 状态分类，携带响应体中的 `message`
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Base URL cannot carry path segments
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required: {0}")]
    Unauthorized(String),

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// 由非 2xx 响应构造，优先使用错误体里的 message
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ApiResponse<()>>(body)
            .map(|r| r.message)
            .unwrap_or_else(|_| body.to_string());

        match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized(message),
            StatusCode::FORBIDDEN => ClientError::Forbidden(message),
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::BAD_REQUEST => ClientError::Validation(message),
            _ => ClientError::Internal(message),
        }
    }

    /// 给界面展示的文本
    pub fn message(&self) -> String {
        match self {
            ClientError::Unauthorized(m)
            | ClientError::Forbidden(m)
            | ClientError::NotFound(m)
            | ClientError::Validation(m)
            | ClientError::Internal(m)
            | ClientError::InvalidResponse(m) => m.clone(),
            other => other.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized(_))
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_reads_message() {
        let body = r#"{"code":2003,"message":"Admin access required"}"#;
        let err = ClientError::from_status(StatusCode::FORBIDDEN, body);
        assert!(matches!(err, ClientError::Forbidden(_)));
        assert_eq!(err.message(), "Admin access required");
    }

    #[test]
    fn test_from_status_plain_body() {
        let err = ClientError::from_status(StatusCode::BAD_GATEWAY, "upstream down");
        assert!(matches!(err, ClientError::Internal(_)));
        assert_eq!(err.message(), "upstream down");
    }

    #[test]
    fn test_unauthorized_flag() {
        let err = ClientError::from_status(StatusCode::UNAUTHORIZED, "{}");
        assert!(err.is_unauthorized());
    }
}
