//! Storage contracts used by the exam engine.
//!
//! Each store exposes create/read/update-once primitives keyed by `i64`.
//! [`sqlite::SqliteStore`] is the durable backend, [`memory::MemoryStore`]
//! backs tests. Both implement all three traits.

use async_trait::async_trait;

use crate::models::{
    exam_session::{ExamSession, Finalization, NewSession},
    question::{NewQuestion, Question},
    response::{NewResponse, ResponseRecord},
};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A persisted row breaks a data-model invariant.
    #[error("inconsistent record: {0}")]
    Inconsistent(String),
}

/// Read-mostly question bank. Written only by bulk import.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Inserts the whole batch or nothing. Returns ids in input order.
    async fn insert_questions(&self, batch: &[NewQuestion]) -> Result<Vec<i64>, StoreError>;

    async fn get_question(&self, id: i64) -> Result<Option<Question>, StoreError>;

    async fn list_questions(&self) -> Result<Vec<Question>, StoreError>;
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create_session(&self, new: &NewSession) -> Result<ExamSession, StoreError>;

    async fn get_session(&self, id: i64) -> Result<Option<ExamSession>, StoreError>;

    /// Writes the outcome only if the session is still open.
    /// Returns `false` when the session is missing or already finalized.
    async fn finalize_session(&self, id: i64, outcome: &Finalization) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait ResponseStore: Send + Sync {
    /// Records an answer, replacing any earlier answer for the same
    /// (session, question). The first record's id is kept.
    async fn upsert_response(&self, new: &NewResponse) -> Result<ResponseRecord, StoreError>;

    async fn list_responses(&self, session_id: i64) -> Result<Vec<ResponseRecord>, StoreError>;
}
