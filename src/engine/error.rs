// src/engine/error.rs

use serde::Serialize;

use crate::store::StoreError;

/// Stable classification of engine failures, for callers that branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    InvalidInput,
    InvalidState,
    StoreFailure,
}

#[derive(Debug, thiserror::Error)]
pub enum ExamError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    InvalidState(String),

    #[error("store failure: {0}")]
    StoreFailure(#[from] StoreError),
}

impl ExamError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExamError::NotFound(_) => ErrorKind::NotFound,
            ExamError::InvalidInput(_) => ErrorKind::InvalidInput,
            ExamError::InvalidState(_) => ErrorKind::InvalidState,
            ExamError::StoreFailure(_) => ErrorKind::StoreFailure,
        }
    }

    pub(crate) fn session_not_found(id: i64) -> Self {
        ExamError::NotFound(format!("Session {}", id))
    }

    pub(crate) fn question_not_found(id: i64) -> Self {
        ExamError::NotFound(format!("Question {}", id))
    }

    pub(crate) fn already_finalized(id: i64) -> Self {
        ExamError::InvalidState(format!("Session {} is already finalized", id))
    }
}

