// src/routes.rs

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{question, session},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Question bank import under `/api/questions`.
/// * Session lifecycle under `/api/sessions`.
/// * Applies global middleware (Trace, CORS).
pub fn create_router(state: AppState) -> Router {
    // Any origin may call the API; there is no authentication to protect.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let question_routes = Router::new().route("/", post(question::import_questions));

    let session_routes = Router::new()
        .route("/", post(session::start_session))
        .route("/{id}", get(session::get_session))
        .route("/{id}/questions", get(session::get_questions))
        .route("/{id}/answers", post(session::submit_answer))
        .route("/{id}/finalize", post(session::finalize_session));

    Router::new()
        .nest("/api/questions", question_routes)
        .nest("/api/sessions", session_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::{engine::ExamEngine, store::MemoryStore};

    fn app() -> Router {
        let engine = ExamEngine::with_store(Arc::new(MemoryStore::new()));
        create_router(AppState {
            engine: Arc::new(engine),
        })
    }

    #[tokio::test]
    async fn test_unknown_session_is_404() {
        let response = app()
            .oneshot(Request::get("/api/sessions/1").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_start_session_is_201() {
        let request = Request::post("/api/sessions")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"correct_marks": 4, "negative_marks": 1}"#))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_malformed_body_is_400_json() {
        let request = Request::post("/api/sessions")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"correct_marks": "four"}"#))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_400() {
        let response = app()
            .oneshot(
                Request::get("/api/sessions/abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
