pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::review::handlers;
use crate::state::AppState;

/// Largest accepted request body (PDF uploads included).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/tips", get(handlers::handle_tips))
        .route("/api/v1/extract", post(handlers::handle_extract))
        .route("/api/v1/reviews", post(handlers::handle_review))
        .route("/api/v1/reviews/upload", post(handlers::handle_review_upload))
        .route("/api/v1/reviews/download", post(handlers::handle_download))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::llm_client::{ApiKey, ChatRequest, ChatResponse, CompletionService, LlmError};

    /// Echoes the credential back so tests can see which key was used.
    struct EchoKeyService;

    #[async_trait]
    impl CompletionService for EchoKeyService {
        async fn complete(
            &self,
            api_key: &ApiKey,
            _request: &ChatRequest<'_>,
        ) -> Result<ChatResponse, LlmError> {
            if api_key.expose() == "sk-bad" {
                return Err(LlmError::Api {
                    status: 401,
                    code: Some("invalid_api_key".to_string()),
                    message: "Incorrect API key provided.".to_string(),
                });
            }
            Ok(serde_json::from_value(json!({
                "choices": [{"message": {"content": format!("reviewed with {}", api_key.expose())}}]
            }))
            .unwrap())
        }
    }

    fn app(default_key: Option<&str>) -> Router {
        let config = Config {
            openai_api_key: default_key.map(ApiKey::new),
            openai_base_url: "http://localhost".to_string(),
            port: 8080,
            rust_log: "info".to_string(),
        };
        build_router(AppState {
            config,
            completion: Arc::new(EchoKeyService),
        })
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn post_multipart(uri: &str, parts: &[(&str, Option<(&str, &str)>, &str)]) -> Request<Body> {
        let mut body = String::new();
        for (name, file, value) in parts {
            body.push_str("--BOUNDARY\r\n");
            match file {
                Some((filename, content_type)) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                     Content-Type: {content_type}\r\n\r\n"
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                )),
            }
            body.push_str(value);
            body.push_str("\r\n");
        }
        body.push_str("--BOUNDARY--\r\n");

        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "multipart/form-data; boundary=BOUNDARY")
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(None)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_tips_lists_four_entries() {
        let response = app(None)
            .oneshot(Request::get("/api/v1/tips").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["tips"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_review_uses_default_key() {
        let response = app(Some("sk-default"))
            .oneshot(post_json(
                "/api/v1/reviews",
                json!({"resume_text": "Jane Doe", "job_role": "Data Scientist"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!({"success": true, "feedback": "reviewed with sk-default"})
        );
    }

    #[tokio::test]
    async fn test_review_key_in_request_wins() {
        let response = app(Some("sk-default"))
            .oneshot(post_json(
                "/api/v1/reviews",
                json!({
                    "resume_text": "Jane Doe",
                    "job_role": "Data Scientist",
                    "job_description": "",
                    "api_key": "sk-user"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(json_body(response).await["feedback"], "reviewed with sk-user");
    }

    #[tokio::test]
    async fn test_review_without_any_key_is_rejected() {
        let response = app(None)
            .oneshot(post_json(
                "/api/v1/reviews",
                json!({"resume_text": "Jane Doe", "job_role": "Data Scientist"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_review_requires_role() {
        let response = app(Some("sk-default"))
            .oneshot(post_json(
                "/api/v1/reviews",
                json!({"resume_text": "Jane Doe", "job_role": "  "}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["error"]["message"],
            "Please specify the target job role"
        );
    }

    #[tokio::test]
    async fn test_failed_review_is_bad_gateway_with_hint() {
        let response = app(None)
            .oneshot(post_json(
                "/api/v1/reviews",
                json!({"resume_text": "Jane Doe", "job_role": "SRE", "api_key": "sk-bad"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(
            body["error"],
            "API error (status 401): Incorrect API key provided. Please check your OpenAI API key."
        );
    }

    #[tokio::test]
    async fn test_extract_rejects_empty_upload() {
        let response = app(None)
            .oneshot(post_multipart(
                "/api/v1/extract",
                &[("file", Some(("resume.pdf", "application/pdf")), "")],
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            json_body(response).await["error"]["code"],
            "EXTRACTION_FAILED"
        );
    }

    #[tokio::test]
    async fn test_extract_rejects_non_pdf() {
        let response = app(None)
            .oneshot(post_multipart(
                "/api/v1/extract",
                &[("file", Some(("resume.png", "image/png")), "png bytes")],
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_extract_requires_file_field() {
        let response = app(None)
            .oneshot(post_multipart("/api/v1/extract", &[("job_role", None, "SRE")]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_requires_role_before_extracting() {
        let response = app(Some("sk-default"))
            .oneshot(post_multipart(
                "/api/v1/reviews/upload",
                &[("file", Some(("resume.pdf", "application/pdf")), "not a pdf")],
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_reports_unreadable_pdf() {
        let response = app(Some("sk-default"))
            .oneshot(post_multipart(
                "/api/v1/reviews/upload",
                &[
                    ("job_role", None, "Data Scientist"),
                    ("file", Some(("resume.pdf", "application/pdf")), "not a pdf"),
                ],
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(response).await;
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("Error reading PDF:"));
    }

    #[tokio::test]
    async fn test_download_returns_attachment() {
        let response = app(None)
            .oneshot(post_json(
                "/api/v1/reviews/download",
                json!({"job_role": "Data Scientist", "feedback": "Score: 8/10"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"resume_feedback_Data_Scientist.txt\""
        );
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"Score: 8/10");
    }

    #[tokio::test]
    async fn test_download_rejects_empty_feedback() {
        let response = app(None)
            .oneshot(post_json(
                "/api/v1/reviews/download",
                json!({"job_role": "Data Scientist", "feedback": ""}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
