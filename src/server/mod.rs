//! HTTP surface: email processing and liveness routes.

pub mod submission;

pub use submission::EmailSubmission;

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::config::ServerConfig;
use crate::error::{ApiError, PipelineError};
use crate::pipeline::{EmailProcessing, ProcessingResult};

/// Shared state for the email routes.
#[derive(Clone)]
pub struct AppState {
    pub processor: Arc<dyn EmailProcessing>,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(processor: Arc<dyn EmailProcessing>, request_timeout: Duration) -> Self {
        Self {
            processor,
            request_timeout,
        }
    }
}

/// Build the service router.
pub fn router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/process-email", post(process_email))
        .route("/api/v1/process-email", post(process_email))
        .route("/healthcheck", get(healthcheck))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let values: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %o, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(values)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

/// GET /healthcheck
async fn healthcheck() -> impl IntoResponse {
    Json(serde_json::json!({ "message": "OK" }))
}

/// POST /process-email
///
/// Classifies the submitted email and suggests a reply.
async fn process_email(
    State(state): State<AppState>,
    submission: EmailSubmission,
) -> Result<Json<ProcessingResult>, ApiError> {
    let email_content = submission.into_email_text()?;
    info!(content_len = email_content.len(), "Processing email");

    let outcome = tokio::time::timeout(
        state.request_timeout,
        state.processor.process(&email_content),
    )
    .await
    .unwrap_or(Err(PipelineError::Timeout(state.request_timeout)));

    match outcome {
        Ok(result) => Ok(Json(result)),
        Err(PipelineError::Timeout(after)) => {
            warn!(?after, "Email processing timed out");
            Err(ApiError::Timeout)
        }
        Err(e) => {
            error!(error = %e, "Email processing failed");
            Err(ApiError::Internal(e.to_string()))
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingInput
            | ApiError::EmptyContent
            | ApiError::UnsupportedFileType { .. }
            | ApiError::InvalidEncoding
            | ApiError::MalformedForm(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::PdfNotImplemented => StatusCode::NOT_IMPLEMENTED,
            ApiError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::UnsupportedFileType { content_type } => {
                info!(content_type = %content_type, "Rejected upload");
            }
            ApiError::MalformedForm(reason) => info!(reason = %reason, "Rejected form"),
            _ => {}
        }
        // Display never carries the wrapped detail.
        (
            self.status(),
            Json(serde_json::json!({ "detail": self.to_string() })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use tower::ServiceExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    struct EchoProcessor;

    #[async_trait]
    impl EmailProcessing for EchoProcessor {
        async fn process(&self, email_content: &str) -> Result<ProcessingResult, PipelineError> {
            Ok(ProcessingResult {
                classification: "Produtivo".to_string(),
                suggested_response: format!("eco: {email_content}"),
            })
        }
    }

    fn app() -> Router {
        let state = AppState::new(Arc::new(EchoProcessor), Duration::from_secs(5));
        router(state, &ServerConfig::default())
    }

    #[tokio::test]
    async fn urlencoded_form_reaches_processor() {
        let request = Request::post("/process-email")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("email_content=Preciso+de+ajuda"))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["classification"], "Produtivo");
        assert_eq!(body["suggested_response"], "eco: Preciso de ajuda");
    }

    #[tokio::test]
    async fn json_body_counts_as_no_input() {
        let request = Request::post("/process-email")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"email_content":"oi"}"#))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["detail"], "content or file required");
    }

    #[tokio::test]
    async fn healthcheck_is_ok() {
        let request = Request::get("/healthcheck").body(Body::empty()).unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["message"], "OK");
    }

    #[tokio::test]
    async fn internal_error_hides_detail() {
        let response = ApiError::Internal("database password leaked".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["detail"], "internal error processing the email");
        assert!(!body.to_string().contains("leaked"));
    }

    #[tokio::test]
    async fn status_codes_follow_error_kind() {
        let cases = [
            (ApiError::MissingInput, 400, "content or file required"),
            (ApiError::EmptyContent, 400, "email content cannot be empty"),
            (
                ApiError::UnsupportedFileType {
                    content_type: "image/png".into(),
                },
                400,
                "unsupported file type, only .txt or .pdf",
            ),
            (ApiError::PdfNotImplemented, 501, "PDF reading not yet implemented"),
            (ApiError::Timeout, 504, "timed out processing the email"),
            (ApiError::PayloadTooLarge, 413, "request body too large"),
        ];
        for (err, status, detail) in cases {
            let response = err.into_response();
            assert_eq!(response.status().as_u16(), status);
            assert_eq!(body_json(response).await["detail"], detail);
        }
    }

    #[test]
    fn cors_layer_accepts_wildcard_and_lists() {
        let _ = cors_layer(&["*".to_string()]);
        let _ = cors_layer(&["http://localhost:5173".to_string(), "bad\norigin".to_string()]);
    }
}
