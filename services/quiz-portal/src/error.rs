//! Service-specific error types
//!
//! Missing tokens and missing credentials are answered with redirects and
//! never become errors. What remains are storage and template failures, which
//! are not recovered: the request fails with a 500 and a JSON body.

use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("credential storage failed: {0}")]
    Storage(#[from] portal_session::Error),

    #[error("page rendering failed: {0}")]
    Render(#[from] minijinja::Error),
}

impl AppError {
    fn error_type(&self) -> &'static str {
        match self {
            AppError::Storage(_) => "storage_error",
            AppError::Render(_) => "render_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let request_id = format!("req_{}", uuid::Uuid::new_v4().as_simple());
        error!(request_id, error = %self, "request failed");

        let body = serde_json::json!({
            "error": {
                "type": self.error_type(),
                "message": self.to_string(),
                "request_id": request_id,
            }
        });

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_error_message_includes_cause() {
        let err = AppError::from(portal_session::Error::QuotaExceeded {
            size: 5000,
            limit: 4096,
        });
        let message = err.to_string();
        assert!(message.starts_with("credential storage failed"), "got: {message}");
        assert!(message.contains("4096"), "got: {message}");
    }

    #[test]
    fn render_error_has_its_own_type() {
        let err = AppError::from(minijinja::Error::new(
            minijinja::ErrorKind::TemplateNotFound,
            "missing.html",
        ));
        assert_eq!(err.error_type(), "render_error");
        assert!(err.to_string().starts_with("page rendering failed"));
    }

    #[tokio::test]
    async fn storage_error_renders_json_500() {
        let err = AppError::from(portal_session::Error::Unavailable("disabled".into()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["type"], "storage_error");
        assert!(
            json["error"]["request_id"]
                .as_str()
                .unwrap()
                .starts_with("req_")
        );
    }
}
