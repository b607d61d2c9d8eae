// src/handlers/question.rs

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    engine::ExamEngine, error::AppError, extract::AppJson, models::question::ImportQuestionRequest,
};

/// Bulk-imports questions into the bank.
///
/// The body is a JSON array of rows shaped like the tabular bank format
/// (`question_text`, `option_a`..`option_d`, `correct_answer`).
/// Rejects the whole batch if any row is invalid.
pub async fn import_questions(
    State(engine): State<Arc<ExamEngine>>,
    AppJson(batch): AppJson<Vec<ImportQuestionRequest>>,
) -> Result<impl IntoResponse, AppError> {
    let ids = engine.import_questions(batch).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "inserted": ids.len(),
            "ids": ids,
        })),
    ))
}
