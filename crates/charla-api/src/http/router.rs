//! Axum router configuration with middleware.
//!
//! Middleware: CORS, tracing, body limit for audio uploads.
//!
//! The static web client is served from `server.web_dir` under the data
//! directory. API routes take priority; if the directory does not exist,
//! only the API is served.

use axum::extract::{DefaultBodyLimit, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Largest accepted request body (audio uploads).
const MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let web_dir = state.web_dir();

    let api_routes = Router::new()
        .route("/chat", post(handlers::chat::chat))
        .route("/voz", post(handlers::voice::transcribe))
        .route("/tts", post(handlers::speech::synthesize))
        .route(
            "/sessions/{id}",
            get(handlers::session::get_session).delete(handlers::session::delete_session),
        );

    let mut router = Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if web_dir.is_dir() {
        router = router.fallback_service(ServeDir::new(&web_dir));
        tracing::info!(path = %web_dir.display(), "static file serving enabled");
    }

    router
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "chunks": state.chat_service.chunk_count(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use charla_types::llm::StreamEvent;

    use crate::test_support::state_with;

    fn chat_request(json: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap()
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_chunks() {
        let tmp = tempfile::TempDir::new().unwrap();
        let app = build_router(state_with(Some(vec![]), tmp.path()));

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["chunks"], 0);
    }

    #[tokio::test]
    async fn test_greeting_gets_canned_json() {
        let tmp = tempfile::TempDir::new().unwrap();
        let app = build_router(state_with(None, tmp.path()));

        let response = app
            .oneshot(chat_request(
                r#"{"messages":[{"role":"user","content":"Hola, ¿estás?"}]}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["text"], "¡Hola Pablo! Encantado de saludarte 😊");
    }

    #[tokio::test]
    async fn test_stream_frames_and_terminator() {
        let tmp = tempfile::TempDir::new().unwrap();
        let script = vec![
            StreamEvent::TextDelta("Hel".into()),
            StreamEvent::TextDelta("lo wor".into()),
            StreamEvent::TextDelta("ld".into()),
            StreamEvent::Done,
        ];
        let app = build_router(state_with(Some(script), tmp.path()));

        let response = app
            .oneshot(chat_request(
                r#"{"messages":[{"role":"user","content":"cuéntame algo"}]}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/event-stream"));

        let body = body_string(response).await;
        assert_eq!(
            body,
            "data: Hel\n\ndata: lo wor\n\ndata: ld\n\ndata: [DONE]\n\n"
        );
    }

    #[tokio::test]
    async fn test_multiline_delta_uses_line_break_marker() {
        let tmp = tempfile::TempDir::new().unwrap();
        let script = vec![StreamEvent::TextDelta("uno\ndos".into()), StreamEvent::Done];
        let app = build_router(state_with(Some(script), tmp.path()));

        let response = app
            .oneshot(chat_request(r#"{"messages":[{"role":"user","content":"lista"}]}"#))
            .await
            .unwrap();
        let body = body_string(response).await;
        assert_eq!(body, "data: uno###\n\ndata: dos\n\ndata: [DONE]\n\n");
    }

    #[tokio::test]
    async fn test_upstream_failure_before_stream_is_json_502() {
        let tmp = tempfile::TempDir::new().unwrap();
        let app = build_router(state_with(None, tmp.path()));

        let response = app
            .oneshot(chat_request(
                r#"{"messages":[{"role":"user","content":"explícame Rust"}]}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert!(json["error"].as_str().unwrap().contains("authentication failed"));
    }

    #[tokio::test]
    async fn test_empty_history_still_streams() {
        let tmp = tempfile::TempDir::new().unwrap();
        let script = vec![StreamEvent::TextDelta("x".into()), StreamEvent::Done];

        for body in [r#"{"messages":[]}"#, "{}"] {
            let app = build_router(state_with(Some(script.clone()), tmp.path()));
            let response = app.oneshot(chat_request(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(body_string(response).await, "data: x\n\ndata: [DONE]\n\n");
        }
    }

    async fn assert_json_400(response: axum::response::Response) {
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("application/json"));
        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert!(!json["error"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_chat_body_is_json_400() {
        let tmp = tempfile::TempDir::new().unwrap();
        let app = build_router(state_with(Some(vec![]), tmp.path()));

        let response = app.oneshot(chat_request(r#"{"messages": ["#)).await.unwrap();
        assert_json_400(response).await;
    }

    #[tokio::test]
    async fn test_unknown_role_is_json_400() {
        let tmp = tempfile::TempDir::new().unwrap();
        let app = build_router(state_with(Some(vec![]), tmp.path()));

        let response = app
            .oneshot(chat_request(
                r#"{"messages":[{"role":"developer","content":"hola"}]}"#,
            ))
            .await
            .unwrap();
        assert_json_400(response).await;
    }

    #[tokio::test]
    async fn test_chat_without_content_type_is_json_400() {
        let tmp = tempfile::TempDir::new().unwrap();
        let app = build_router(state_with(Some(vec![]), tmp.path()));

        let request = Request::builder()
            .method("POST")
            .uri("/api/chat")
            .body(Body::from(r#"{"messages":[]}"#))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_json_400(response).await;
    }

    #[tokio::test]
    async fn test_malformed_tts_body_is_json_400() {
        let tmp = tempfile::TempDir::new().unwrap();
        let app = build_router(state_with(Some(vec![]), tmp.path()));

        let request = Request::builder()
            .method("POST")
            .uri("/api/tts")
            .header("content-type", "application/json")
            .body(Body::from("not json"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_json_400(response).await;
    }

    #[tokio::test]
    async fn test_session_recorded_after_stream() {
        let tmp = tempfile::TempDir::new().unwrap();
        let script = vec![StreamEvent::TextDelta("Respuesta".into()), StreamEvent::Done];
        let state = state_with(Some(script), tmp.path());
        let app = build_router(state.clone());
        let id = uuid::Uuid::now_v7();

        let response = app
            .clone()
            .oneshot(chat_request(&format!(
                r#"{{"messages":[{{"role":"user","content":"pregunta"}}],"session_id":"{id}"}}"#
            )))
            .await
            .unwrap();
        body_string(response).await;

        let response = app
            .clone()
            .oneshot(
                Request::get(format!("/api/sessions/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["messages"][1]["role"], "assistant");
        assert_eq!(json["messages"][1]["content"], "Respuesta");

        let response = app
            .clone()
            .oneshot(
                Request::delete(format!("/api/sessions/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(
                Request::get(format!("/api/sessions/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_session_id_is_400() {
        let tmp = tempfile::TempDir::new().unwrap();
        let app = build_router(state_with(Some(vec![]), tmp.path()));

        let response = app
            .oneshot(
                Request::get("/api/sessions/not-a-uuid")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_voice_without_audio_field_is_400() {
        let tmp = tempfile::TempDir::new().unwrap();
        let app = build_router(state_with(Some(vec![]), tmp.path()));

        let boundary = "XBOUNDARY";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"other\"\r\n\r\nvalue\r\n--{boundary}--\r\n"
        );
        let request = Request::builder()
            .method("POST")
            .uri("/api/voz")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["error"], "missing audio field");
    }

    #[tokio::test]
    async fn test_tts_empty_text_is_400() {
        let tmp = tempfile::TempDir::new().unwrap();
        let app = build_router(state_with(Some(vec![]), tmp.path()));

        let request = Request::builder()
            .method("POST")
            .uri("/api/tts")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"text":"   "}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_static_files_served_when_web_dir_exists() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("public")).unwrap();
        std::fs::write(tmp.path().join("public").join("index.html"), "<h1>charla</h1>").unwrap();
        let app = build_router(state_with(Some(vec![]), tmp.path()));

        let response = app
            .oneshot(Request::get("/index.html").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "<h1>charla</h1>");
    }
}
