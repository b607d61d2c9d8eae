// src/handlers/session.rs

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    engine::ExamEngine,
    error::AppError,
    extract::{AppJson, AppPath},
    models::{
        exam_session::{SessionView, StartSessionRequest},
        response::SubmitAnswerRequest,
    },
};

/// Starts a new exam session with the given marking scheme.
pub async fn start_session(
    State(engine): State<Arc<ExamEngine>>,
    AppJson(req): AppJson<StartSessionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let session = engine
        .start_session(req.correct_marks, req.negative_marks)
        .await?;

    Ok((StatusCode::CREATED, Json(SessionView::from(session))))
}

/// Returns a session, including its score once finalized.
pub async fn get_session(
    State(engine): State<Arc<ExamEngine>>,
    AppPath(id): AppPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let session = engine.get_session(id).await?;
    Ok(Json(SessionView::from(session)))
}

/// Serves the whole question bank in random order, without answer keys.
pub async fn get_questions(
    State(engine): State<Arc<ExamEngine>>,
    AppPath(id): AppPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let questions = engine.get_questions(id).await?;
    Ok(Json(questions))
}

/// Records one answer for the session.
pub async fn submit_answer(
    State(engine): State<Arc<ExamEngine>>,
    AppPath(id): AppPath<i64>,
    AppJson(req): AppJson<SubmitAnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let receipt = engine
        .submit_answer(id, req.question_id, &req.selected_answer)
        .await?;
    Ok(Json(receipt))
}

/// Ends the exam and returns the final score.
pub async fn finalize_session(
    State(engine): State<Arc<ExamEngine>>,
    AppPath(id): AppPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let summary = engine.finalize_session(id).await?;
    Ok(Json(summary))
}
