pub mod chat;
pub mod documents;
pub mod health;
pub mod sessions;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, Method};
use axum::{middleware, routing::get, routing::post, Router};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::middleware::request_logger;
use crate::api::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = build_cors(&state.config.config.cors.allowed_origins);
    let upload_limit = state.config.config.server.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .nest("/api/v1", api_v1_routes(upload_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_logger))
                .layer(CompressionLayer::new())
                .layer(cors),
        )
        .with_state(state)
}

fn build_cors(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        cors.allow_origin(origins)
    }
}

fn api_v1_routes(upload_limit: usize) -> Router<AppState> {
    Router::new()
        .route("/sessions", post(sessions::create_session))
        .route("/sessions/{id}", get(sessions::get_session))
        .route(
            "/sessions/{id}/document",
            post(documents::upload_document).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/sessions/{id}/questions", post(chat::ask_question))
        .route("/sessions/{id}/history", get(chat::get_history))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{ChatService, ChatSettings, DocumentService, Pipelines};
    use crate::domain::ports::{
        GenerationParams, GenerationService, SummarizationService, SummaryParams, TextExtractor,
    };
    use crate::domain::DomainError;
    use crate::infrastructure::{AppConfig, InMemorySessionStore};
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    const BOUNDARY: &str = "pdf-chat-test-boundary";

    struct PagesExtractor;

    impl TextExtractor for PagesExtractor {
        fn extract(&self, bytes: &[u8]) -> Result<Vec<String>, DomainError> {
            if bytes.starts_with(b"%PDF") {
                Ok(vec!["A".to_string(), "B".to_string()])
            } else {
                Err(DomainError::extraction("Invalid file header"))
            }
        }
    }

    struct FailingSummarizer;

    #[async_trait]
    impl SummarizationService for FailingSummarizer {
        async fn summarize(
            &self,
            _text: &str,
            _params: &SummaryParams,
        ) -> Result<String, DomainError> {
            Err(DomainError::external("summarizer offline"))
        }
    }

    struct EchoGenerator;

    #[async_trait]
    impl GenerationService for EchoGenerator {
        async fn generate(
            &self,
            prompt: &str,
            _params: &GenerationParams,
        ) -> Result<String, DomainError> {
            Ok(format!("{} chars of prompt", prompt.len()))
        }
    }

    fn app(with_pipelines: bool) -> Router {
        let pipelines = with_pipelines
            .then(|| Pipelines::new(Arc::new(FailingSummarizer), Arc::new(EchoGenerator)));
        let chat = ChatService::new(
            DocumentService::new(Arc::new(PagesExtractor)),
            pipelines,
            ChatSettings::default(),
        );
        let state = AppState::new(
            Arc::new(InMemorySessionStore::new()),
            Arc::new(chat),
            AppConfig::default(),
        );
        create_router(state)
    }

    fn upload(id: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Request<Body> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; \
             filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method(Method::POST)
            .uri(format!("/api/v1/sessions/{id}/document"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn new_session(app: &Router) -> String {
        let (status, body) =
            send(app, json_request(Method::POST, "/api/v1/sessions", json!({}))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["state"], "no_document");
        body["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health_reports_version() {
        let (status, body) = send(
            &app(true),
            Request::builder().uri("/health").body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_ready_depends_on_pipelines() {
        let ready = Request::builder().uri("/ready").body(Body::empty()).unwrap();
        let (status, _) = send(&app(true), ready).await;
        assert_eq!(status, StatusCode::OK);

        let ready = Request::builder().uri("/ready").body(Body::empty()).unwrap();
        let (status, _) = send(&app(false), ready).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_upload_then_ask_records_history() {
        let app = app(true);
        let id = new_session(&app).await;

        let (status, body) =
            send(&app, upload(&id, "two.pdf", "application/pdf", b"%PDF-1.7")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["state"], "ready");
        assert_eq!(body["page_count"], 2);
        assert_eq!(body["char_count"], 2);

        let (status, body) = send(
            &app,
            json_request(
                Method::POST,
                &format!("/api/v1/sessions/{id}/questions"),
                json!({ "question": "What is this about?" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["summary_degraded"], true);
        assert_eq!(body["answer_degraded"], false);
        assert!(body.get("summary").is_none());
        assert_eq!(body["history"].as_array().unwrap().len(), 2);

        let (status, body) = send(
            &app,
            Request::builder()
                .uri(format!("/api/v1/sessions/{id}/history"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let turns = body["turns"].as_array().unwrap();
        assert_eq!(turns[0]["role"], "user");
        assert_eq!(turns[0]["content"], "What is this about?");
        assert_eq!(turns[1]["role"], "assistant");

        let (status, body) = send(
            &app,
            Request::builder()
                .uri(format!("/api/v1/sessions/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["turns"], 2);
        assert_eq!(body["document"]["name"], "two.pdf");
    }

    #[tokio::test]
    async fn test_non_pdf_upload_rejected() {
        let app = app(true);
        let id = new_session(&app).await;

        let (status, body) =
            send(&app, upload(&id, "notes.txt", "text/plain", b"hello")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("PDF"));
    }

    #[tokio::test]
    async fn test_corrupt_pdf_reports_extraction_error() {
        let app = app(true);
        let id = new_session(&app).await;

        let (status, body) =
            send(&app, upload(&id, "broken.pdf", "application/pdf", b"garbage")).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].as_str().unwrap().starts_with("Error reading PDF"));
    }

    #[tokio::test]
    async fn test_question_before_upload_conflicts() {
        let app = app(true);
        let id = new_session(&app).await;

        let (status, _) = send(
            &app,
            json_request(
                Method::POST,
                &format!("/api/v1/sessions/{id}/questions"),
                json!({ "question": "Anything?" }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_upload_without_pipelines_stays_loaded() {
        let app = app(false);
        let id = new_session(&app).await;

        let (status, body) =
            send(&app, upload(&id, "two.pdf", "application/pdf", b"%PDF-1.7")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["state"], "document_loaded");
        assert_eq!(body["notices"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_session_not_found() {
        let app = app(true);
        let uri = format!("/api/v1/sessions/{}", uuid::Uuid::new_v4());

        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let (status, _) = send(&app, request).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_missing_file_field_rejected() {
        let app = app(true);
        let id = new_session(&app).await;
        let body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"other\"\r\n\r\nx\r\n--{BOUNDARY}--\r\n"
        );
        let request = Request::builder()
            .method(Method::POST)
            .uri(format!("/api/v1/sessions/{id}/document"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();

        let (status, _) = send(&app, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_question_body_is_json_bad_request() {
        let app = app(true);
        let id = new_session(&app).await;

        let (status, body) = send(
            &app,
            json_request(
                Method::POST,
                &format!("/api/v1/sessions/{id}/questions"),
                json!({ "q": 1 }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("question"));
    }

    #[tokio::test]
    async fn test_invalid_session_id_is_json_bad_request() {
        let app = app(true);

        let request = Request::builder()
            .uri("/api/v1/sessions/not-a-uuid/history")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_upload_without_multipart_is_json_bad_request() {
        let app = app(true);
        let id = new_session(&app).await;

        let (status, body) = send(
            &app,
            json_request(
                Method::POST,
                &format!("/api/v1/sessions/{id}/document"),
                json!({ "file": "x" }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }
}
