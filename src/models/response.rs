// src/models/response.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::question::OptionLabel;

/// Represents the 'user_responses' table.
/// At most one record exists per (session, question).
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseRecord {
    pub id: i64,
    pub session_id: i64,
    pub question_id: i64,
    pub selected_answer: OptionLabel,
    /// Computed when the answer is written, never re-evaluated.
    pub is_correct: bool,
    pub answered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewResponse {
    pub session_id: i64,
    pub question_id: i64,
    pub selected_answer: OptionLabel,
    pub is_correct: bool,
    pub answered_at: DateTime<Utc>,
}

/// DTO for submitting a single answer.
#[derive(Debug, Deserialize)]
pub struct SubmitAnswerRequest {
    pub question_id: i64,
    /// Raw label as sent by the client; parsed by the engine.
    pub selected_answer: String,
}

/// Immediate feedback for a submitted answer. Not authoritative until the
/// session is finalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerReceipt {
    pub response_id: i64,
    pub question_id: i64,
    pub selected_answer: OptionLabel,
    pub is_correct: bool,
}

impl From<ResponseRecord> for AnswerReceipt {
    fn from(r: ResponseRecord) -> Self {
        AnswerReceipt {
            response_id: r.id,
            question_id: r.question_id,
            selected_answer: r.selected_answer,
            is_correct: r.is_correct,
        }
    }
}
