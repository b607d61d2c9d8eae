// src/store/sqlite.rs

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{
    FromRow, SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode},
};

use super::{QuestionStore, ResponseStore, SessionStore, StoreError};
use crate::models::{
    exam_session::{ExamSession, Finalization, NewSession},
    question::{NewQuestion, Question},
    response::{NewResponse, ResponseRecord},
};

/// Connection options for a SQLite URL. The database file is created when
/// missing.
pub fn connect_options(database_url: &str) -> Result<SqliteConnectOptions, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal);
    Ok(options)
}

/// All three stores over one pooled SQLite database.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Applies the embedded migrations under `migrations/`.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

#[derive(FromRow)]
struct QuestionRow {
    id: i64,
    question_text: String,
    option_a: String,
    option_b: String,
    option_c: String,
    option_d: String,
    correct_answer: String,
}

impl TryFrom<QuestionRow> for Question {
    type Error = StoreError;

    fn try_from(row: QuestionRow) -> Result<Self, Self::Error> {
        let correct_answer = row
            .correct_answer
            .parse()
            .map_err(|e| StoreError::Inconsistent(format!("question {}: {}", row.id, e)))?;
        Ok(Question {
            id: row.id,
            question_text: row.question_text,
            options: [row.option_a, row.option_b, row.option_c, row.option_d],
            correct_answer,
        })
    }
}

#[derive(FromRow)]
struct SessionRow {
    id: i64,
    correct_marks: f64,
    negative_marks: f64,
    start_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
    total_score: Option<f64>,
    correct_count: Option<i64>,
    incorrect_count: Option<i64>,
}

impl TryFrom<SessionRow> for ExamSession {
    type Error = StoreError;

    fn try_from(row: SessionRow) -> Result<Self, Self::Error> {
        let finalization = match (row.end_time, row.total_score, row.correct_count, row.incorrect_count) {
            (None, None, None, None) => None,
            (Some(end_time), Some(total_score), Some(correct_count), Some(incorrect_count)) => {
                Some(Finalization {
                    end_time,
                    total_score,
                    correct_count,
                    incorrect_count,
                })
            }
            _ => {
                return Err(StoreError::Inconsistent(format!(
                    "session {} is partially finalized",
                    row.id
                )));
            }
        };

        Ok(ExamSession {
            id: row.id,
            correct_marks: row.correct_marks,
            negative_marks: row.negative_marks,
            start_time: row.start_time,
            finalization,
        })
    }
}

#[derive(FromRow)]
struct ResponseRow {
    id: i64,
    exam_session_id: i64,
    question_id: i64,
    selected_answer: String,
    is_correct: bool,
    answered_at: DateTime<Utc>,
}

impl TryFrom<ResponseRow> for ResponseRecord {
    type Error = StoreError;

    fn try_from(row: ResponseRow) -> Result<Self, Self::Error> {
        let selected_answer = row
            .selected_answer
            .parse()
            .map_err(|e| StoreError::Inconsistent(format!("response {}: {}", row.id, e)))?;
        Ok(ResponseRecord {
            id: row.id,
            session_id: row.exam_session_id,
            question_id: row.question_id,
            selected_answer,
            is_correct: row.is_correct,
            answered_at: row.answered_at,
        })
    }
}

#[async_trait]
impl QuestionStore for SqliteStore {
    async fn insert_questions(&self, batch: &[NewQuestion]) -> Result<Vec<i64>, StoreError> {
        let mut tx = self.pool.begin().await?;
        let mut ids = Vec::with_capacity(batch.len());

        for q in batch {
            let id: i64 = sqlx::query_scalar(
                r#"
                INSERT INTO questions (question_text, option_a, option_b, option_c, option_d, correct_answer)
                VALUES (?, ?, ?, ?, ?, ?)
                RETURNING id
                "#,
            )
            .bind(&q.question_text)
            .bind(&q.options[0])
            .bind(&q.options[1])
            .bind(&q.options[2])
            .bind(&q.options[3])
            .bind(q.correct_answer.as_str())
            .fetch_one(&mut *tx)
            .await?;
            ids.push(id);
        }

        tx.commit().await?;
        Ok(ids)
    }

    async fn get_question(&self, id: i64) -> Result<Option<Question>, StoreError> {
        let row = sqlx::query_as::<_, QuestionRow>(
            r#"
            SELECT id, question_text, option_a, option_b, option_c, option_d, correct_answer
            FROM questions
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Question::try_from).transpose()
    }

    async fn list_questions(&self) -> Result<Vec<Question>, StoreError> {
        let rows = sqlx::query_as::<_, QuestionRow>(
            r#"
            SELECT id, question_text, option_a, option_b, option_c, option_d, correct_answer
            FROM questions
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Question::try_from).collect()
    }
}

#[async_trait]
impl SessionStore for SqliteStore {
    async fn create_session(&self, new: &NewSession) -> Result<ExamSession, StoreError> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            INSERT INTO exam_sessions (correct_marks, negative_marks, start_time)
            VALUES (?, ?, ?)
            RETURNING id, correct_marks, negative_marks, start_time,
                      end_time, total_score, correct_count, incorrect_count
            "#,
        )
        .bind(new.correct_marks)
        .bind(new.negative_marks)
        .bind(new.start_time)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn get_session(&self, id: i64) -> Result<Option<ExamSession>, StoreError> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT id, correct_marks, negative_marks, start_time,
                   end_time, total_score, correct_count, incorrect_count
            FROM exam_sessions
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(ExamSession::try_from).transpose()
    }

    async fn finalize_session(&self, id: i64, outcome: &Finalization) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE exam_sessions
            SET end_time = ?, total_score = ?, correct_count = ?, incorrect_count = ?
            WHERE id = ? AND end_time IS NULL
            "#,
        )
        .bind(outcome.end_time)
        .bind(outcome.total_score)
        .bind(outcome.correct_count)
        .bind(outcome.incorrect_count)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}

#[async_trait]
impl ResponseStore for SqliteStore {
    async fn upsert_response(&self, new: &NewResponse) -> Result<ResponseRecord, StoreError> {
        // Conflict target matches UNIQUE (exam_session_id, question_id).
        let row = sqlx::query_as::<_, ResponseRow>(
            r#"
            INSERT INTO user_responses (question_id, exam_session_id, selected_answer, is_correct, answered_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT (exam_session_id, question_id) DO UPDATE SET
                selected_answer = excluded.selected_answer,
                is_correct = excluded.is_correct,
                answered_at = excluded.answered_at
            RETURNING id, exam_session_id, question_id, selected_answer, is_correct, answered_at
            "#,
        )
        .bind(new.question_id)
        .bind(new.session_id)
        .bind(new.selected_answer.as_str())
        .bind(new.is_correct)
        .bind(new.answered_at)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn list_responses(&self, session_id: i64) -> Result<Vec<ResponseRecord>, StoreError> {
        let rows = sqlx::query_as::<_, ResponseRow>(
            r#"
            SELECT id, exam_session_id, question_id, selected_answer, is_correct, answered_at
            FROM user_responses
            WHERE exam_session_id = ?
            ORDER BY id
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ResponseRecord::try_from).collect()
    }
}
