//! JSON 请求体提取器
//!
//! 与 `axum::Json` 相同，但解析失败时返回统一的错误格式 (400)。

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::utils::AppError;

/// `Json<T>` with [`AppError`] rejection
#[derive(Debug, Clone, Copy, Default)]
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(AppJson(value)),
            Err(rejection) => Err(rejection_to_error(rejection)),
        }
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            AppError::invalid_request("Expected request with `Content-Type: application/json`")
        }
        other => AppError::invalid_request(other.body_text()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http::StatusCode;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        name: String,
    }

    fn request(content_type: Option<&str>, body: &'static str) -> Request {
        let mut builder = http::Request::builder().method("POST").uri("/");
        if let Some(ct) = content_type {
            builder = builder.header(http::header::CONTENT_TYPE, ct);
        }
        builder.body(Body::from(body)).unwrap()
    }

    #[tokio::test]
    async fn test_valid_body() {
        let AppJson(payload) =
            AppJson::<Payload>::from_request(request(Some("application/json"), r#"{"name":"x"}"#), &())
                .await
                .unwrap();
        assert_eq!(payload.name, "x");
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let err = AppJson::<Payload>::from_request(request(Some("application/json"), "{oops"), &())
            .await
            .unwrap_err();
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);

        let err = AppJson::<Payload>::from_request(request(None, r#"{"name":"x"}"#), &())
            .await
            .unwrap_err();
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
    }
}
