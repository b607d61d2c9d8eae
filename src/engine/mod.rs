// src/engine/mod.rs

//! Exam session lifecycle: start, serve questions, record answers, finalize.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::OwnedMutexGuard;
use validator::Validate;

use crate::{
    models::{
        exam_session::{ExamSession, Finalization, NewSession, ScoreSummary},
        question::{ImportQuestionRequest, InvalidOptionLabel, NewQuestion, OptionLabel, PublicQuestion},
        response::{AnswerReceipt, NewResponse},
    },
    store::{QuestionStore, ResponseStore, SessionStore, StoreError},
};

pub mod error;
pub mod locks;
pub mod scoring;
pub mod shuffle;

pub use error::{ErrorKind, ExamError};
use locks::SessionLocks;
use scoring::calculate_score;
use shuffle::{QuestionShuffler, ThreadRngShuffler};

/// Logs a store failure with the operation that hit it and converts it.
fn store_failure(operation: &'static str) -> impl FnOnce(StoreError) -> ExamError {
    move |e| {
        tracing::error!("Store failure during {}: {:?}", operation, e);
        ExamError::from(e)
    }
}

fn validate_mark(name: &str, value: f64) -> Result<(), ExamError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ExamError::InvalidInput(format!(
            "{} must be a non-negative number, got {}",
            name, value
        )));
    }
    Ok(())
}

/// Orchestrates exam sessions over injected stores.
pub struct ExamEngine {
    questions: Arc<dyn QuestionStore>,
    sessions: Arc<dyn SessionStore>,
    responses: Arc<dyn ResponseStore>,
    shuffler: Arc<dyn QuestionShuffler>,
    locks: SessionLocks,
}

impl ExamEngine {
    pub fn new(
        questions: Arc<dyn QuestionStore>,
        sessions: Arc<dyn SessionStore>,
        responses: Arc<dyn ResponseStore>,
    ) -> Self {
        Self {
            questions,
            sessions,
            responses,
            shuffler: Arc::new(ThreadRngShuffler),
            locks: SessionLocks::new(),
        }
    }

    /// Engine whose three stores are the same backend.
    pub fn with_store<S>(store: Arc<S>) -> Self
    where
        S: QuestionStore + SessionStore + ResponseStore + 'static,
    {
        Self::new(store.clone(), store.clone(), store)
    }

    pub fn with_shuffler(mut self, shuffler: impl QuestionShuffler + 'static) -> Self {
        self.shuffler = Arc::new(shuffler);
        self
    }

    /// Number of sessions with a live lock entry.
    pub fn active_locks(&self) -> usize {
        self.locks.len()
    }

    /// Validates every item, then writes the batch atomically.
    /// One bad item rejects the whole batch.
    pub async fn import_questions(
        &self,
        batch: Vec<ImportQuestionRequest>,
    ) -> Result<Vec<i64>, ExamError> {
        if batch.is_empty() {
            return Err(ExamError::InvalidInput("No questions submitted".to_string()));
        }

        let mut questions = Vec::with_capacity(batch.len());
        for (i, item) in batch.into_iter().enumerate() {
            item.validate()
                .map_err(|e| ExamError::InvalidInput(format!("Question #{}: {}", i + 1, e)))?;
            let question = NewQuestion::try_from(item)
                .map_err(|e| ExamError::InvalidInput(format!("Question #{}: {}", i + 1, e)))?;
            questions.push(question);
        }

        let ids = self
            .questions
            .insert_questions(&questions)
            .await
            .map_err(store_failure("question import"))?;

        tracing::info!("Imported {} questions", ids.len());
        Ok(ids)
    }

    pub async fn start_session(
        &self,
        correct_marks: f64,
        negative_marks: f64,
    ) -> Result<ExamSession, ExamError> {
        validate_mark("correct_marks", correct_marks)?;
        validate_mark("negative_marks", negative_marks)?;

        let session = self
            .sessions
            .create_session(&NewSession {
                correct_marks,
                negative_marks,
                start_time: Utc::now(),
            })
            .await
            .map_err(store_failure("session start"))?;

        tracing::info!(
            "Started session {} (correct: {}, negative: {})",
            session.id,
            correct_marks,
            negative_marks
        );
        Ok(session)
    }

    pub async fn get_session(&self, session_id: i64) -> Result<ExamSession, ExamError> {
        self.sessions
            .get_session(session_id)
            .await
            .map_err(store_failure("session lookup"))?
            .ok_or_else(|| ExamError::session_not_found(session_id))
    }

    /// Takes the session lock and checks the session is still open.
    /// On rejection the lock entry is dropped unless another caller still
    /// holds or waits on it; a missing id may yet be created.
    async fn lock_open_session(
        &self,
        session_id: i64,
        closed: impl FnOnce(i64) -> ExamError,
    ) -> Result<(OwnedMutexGuard<()>, ExamSession), ExamError> {
        let guard = self.locks.acquire(session_id).await;

        let err = match self.get_session(session_id).await {
            Ok(session) if session.is_open() => return Ok((guard, session)),
            Ok(_) => closed(session_id),
            Err(e) => e,
        };

        drop(guard);
        self.locks.release_if_idle(session_id);
        Err(err)
    }

    /// The whole bank without answer keys, in shuffled order.
    /// Finalized sessions are refused so answers cannot be worked out after
    /// scoring.
    pub async fn get_questions(&self, session_id: i64) -> Result<Vec<PublicQuestion>, ExamError> {
        let session = self.get_session(session_id).await?;
        if !session.is_open() {
            tracing::warn!("Questions requested for finalized session {}", session_id);
            return Err(ExamError::InvalidState(format!(
                "Session {} is finalized; questions are no longer served",
                session_id
            )));
        }

        let mut questions: Vec<PublicQuestion> = self
            .questions
            .list_questions()
            .await
            .map_err(store_failure("question listing"))?
            .into_iter()
            .map(PublicQuestion::from)
            .collect();

        self.shuffler.shuffle(&mut questions);
        Ok(questions)
    }

    /// Records an answer. A later answer to the same question in the same
    /// session replaces the earlier one.
    pub async fn submit_answer(
        &self,
        session_id: i64,
        question_id: i64,
        selected_answer: &str,
    ) -> Result<AnswerReceipt, ExamError> {
        let selected: OptionLabel = selected_answer
            .parse()
            .map_err(|e: InvalidOptionLabel| ExamError::InvalidInput(e.to_string()))?;

        let (_guard, _session) = self
            .lock_open_session(session_id, |id| {
                tracing::warn!("Answer submitted to finalized session {}", id);
                ExamError::InvalidState(format!(
                    "Session {} is finalized and no longer accepts answers",
                    id
                ))
            })
            .await?;

        let question = self
            .questions
            .get_question(question_id)
            .await
            .map_err(store_failure("question lookup"))?
            .ok_or_else(|| ExamError::question_not_found(question_id))?;

        let record = self
            .responses
            .upsert_response(&NewResponse {
                session_id,
                question_id,
                selected_answer: selected,
                is_correct: question.is_correct(selected),
                answered_at: Utc::now(),
            })
            .await
            .map_err(store_failure("answer submission"))?;

        tracing::debug!(
            "Session {} answered question {} with {}",
            session_id,
            question_id,
            selected
        );
        Ok(record.into())
    }

    /// Scores the session and locks the result in. Runs at most once per
    /// session; later calls fail with `InvalidState` and change nothing.
    pub async fn finalize_session(&self, session_id: i64) -> Result<ScoreSummary, ExamError> {
        let (guard, session) = self
            .lock_open_session(session_id, |id| {
                tracing::warn!("Rejected second finalization of session {}", id);
                ExamError::already_finalized(id)
            })
            .await?;

        let responses = self
            .responses
            .list_responses(session_id)
            .await
            .map_err(store_failure("response listing"))?;
        let score = calculate_score(&responses, session.correct_marks, session.negative_marks);

        let outcome = Finalization {
            end_time: Utc::now(),
            total_score: score.total_score,
            correct_count: score.correct_count,
            incorrect_count: score.incorrect_count,
        };
        let written = self
            .sessions
            .finalize_session(session_id, &outcome)
            .await
            .map_err(store_failure("session finalization"))?;
        if !written {
            // Another writer outside this process got there first.
            tracing::warn!("Session {} was finalized concurrently", session_id);
            return Err(ExamError::already_finalized(session_id));
        }

        drop(guard);
        self.locks.release_if_idle(session_id);

        tracing::info!(
            "Finalized session {}: score {} ({} correct, {} incorrect)",
            session_id,
            outcome.total_score,
            outcome.correct_count,
            outcome.incorrect_count
        );

        Ok(ScoreSummary {
            session_id,
            total_score: outcome.total_score,
            correct_answers: outcome.correct_count,
            incorrect_answers: outcome.incorrect_count,
            end_time: outcome.end_time,
        })
    }
}
