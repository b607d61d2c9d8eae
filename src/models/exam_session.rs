// src/models/exam_session.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a session. There is no way back from `Finalized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Open,
    Finalized,
}

/// Outcome written once when a session is finalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finalization {
    pub end_time: DateTime<Utc>,
    pub total_score: f64,
    pub correct_count: i64,
    pub incorrect_count: i64,
}

/// Represents the 'exam_sessions' table.
///
/// End time, score and counts are kept together in `finalization`, so a
/// session is either fully open or fully finalized.
#[derive(Debug, Clone, PartialEq)]
pub struct ExamSession {
    pub id: i64,
    pub correct_marks: f64,
    pub negative_marks: f64,
    pub start_time: DateTime<Utc>,
    pub finalization: Option<Finalization>,
}

impl ExamSession {
    pub fn status(&self) -> SessionStatus {
        match self.finalization {
            Some(_) => SessionStatus::Finalized,
            None => SessionStatus::Open,
        }
    }

    pub fn is_open(&self) -> bool {
        self.finalization.is_none()
    }
}

/// Scoring configuration for a new session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewSession {
    pub correct_marks: f64,
    pub negative_marks: f64,
    pub start_time: DateTime<Utc>,
}

/// DTO for starting a session.
#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    pub correct_marks: f64,
    pub negative_marks: f64,
}

/// DTO returned for a session, flattening the finalization outcome.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: i64,
    pub correct_marks: f64,
    pub negative_marks: f64,
    pub start_time: DateTime<Utc>,
    pub status: SessionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answers: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incorrect_answers: Option<i64>,
}

impl From<ExamSession> for SessionView {
    fn from(session: ExamSession) -> Self {
        let status = session.status();
        let fin = session.finalization;
        SessionView {
            id: session.id,
            correct_marks: session.correct_marks,
            negative_marks: session.negative_marks,
            start_time: session.start_time,
            status,
            end_time: fin.as_ref().map(|f| f.end_time),
            total_score: fin.as_ref().map(|f| f.total_score),
            correct_answers: fin.as_ref().map(|f| f.correct_count),
            incorrect_answers: fin.as_ref().map(|f| f.incorrect_count),
        }
    }
}

/// Result of finalizing a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub session_id: i64,
    pub total_score: f64,
    pub correct_answers: i64,
    pub incorrect_answers: i64,
    pub end_time: DateTime<Utc>,
}
