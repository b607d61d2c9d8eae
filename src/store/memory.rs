// src/store/memory.rs

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{QuestionStore, ResponseStore, SessionStore, StoreError};
use crate::models::{
    exam_session::{ExamSession, Finalization, NewSession},
    question::{NewQuestion, Question},
    response::{NewResponse, ResponseRecord},
};

#[derive(Default)]
struct Tables {
    questions: BTreeMap<i64, Question>,
    sessions: BTreeMap<i64, ExamSession>,
    responses: BTreeMap<i64, ResponseRecord>,
    next_question_id: i64,
    next_session_id: i64,
    next_response_id: i64,
}

fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

/// Process-local store with the same semantics as the SQLite one.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored responses across all sessions.
    pub async fn response_count(&self) -> usize {
        self.tables.read().await.responses.len()
    }
}

#[async_trait]
impl QuestionStore for MemoryStore {
    async fn insert_questions(&self, batch: &[NewQuestion]) -> Result<Vec<i64>, StoreError> {
        let mut tables = self.tables.write().await;
        let mut ids = Vec::with_capacity(batch.len());
        for q in batch {
            let id = next_id(&mut tables.next_question_id);
            tables.questions.insert(
                id,
                Question {
                    id,
                    question_text: q.question_text.clone(),
                    options: q.options.clone(),
                    correct_answer: q.correct_answer,
                },
            );
            ids.push(id);
        }
        Ok(ids)
    }

    async fn get_question(&self, id: i64) -> Result<Option<Question>, StoreError> {
        Ok(self.tables.read().await.questions.get(&id).cloned())
    }

    async fn list_questions(&self) -> Result<Vec<Question>, StoreError> {
        Ok(self.tables.read().await.questions.values().cloned().collect())
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn create_session(&self, new: &NewSession) -> Result<ExamSession, StoreError> {
        let mut tables = self.tables.write().await;
        let id = next_id(&mut tables.next_session_id);
        let session = ExamSession {
            id,
            correct_marks: new.correct_marks,
            negative_marks: new.negative_marks,
            start_time: new.start_time,
            finalization: None,
        };
        tables.sessions.insert(id, session.clone());
        Ok(session)
    }

    async fn get_session(&self, id: i64) -> Result<Option<ExamSession>, StoreError> {
        Ok(self.tables.read().await.sessions.get(&id).cloned())
    }

    async fn finalize_session(&self, id: i64, outcome: &Finalization) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        match tables.sessions.get_mut(&id) {
            Some(session) if session.finalization.is_none() => {
                session.finalization = Some(outcome.clone());
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[async_trait]
impl ResponseStore for MemoryStore {
    async fn upsert_response(&self, new: &NewResponse) -> Result<ResponseRecord, StoreError> {
        let mut tables = self.tables.write().await;

        let existing = tables
            .responses
            .values()
            .find(|r| r.session_id == new.session_id && r.question_id == new.question_id)
            .map(|r| r.id);
        let id = match existing {
            Some(id) => id,
            None => next_id(&mut tables.next_response_id),
        };

        let record = ResponseRecord {
            id,
            session_id: new.session_id,
            question_id: new.question_id,
            selected_answer: new.selected_answer,
            is_correct: new.is_correct,
            answered_at: new.answered_at,
        };
        tables.responses.insert(id, record.clone());
        Ok(record)
    }

    async fn list_responses(&self, session_id: i64) -> Result<Vec<ResponseRecord>, StoreError> {
        Ok(self
            .tables
            .read()
            .await
            .responses
            .values()
            .filter(|r| r.session_id == session_id)
            .cloned()
            .collect())
    }
}
