// src/store/postgres.rs

use async_trait::async_trait;
use sqlx::{PgPool, types::Json};

use crate::{
    error::AppError,
    models::{
        question::{Question, QuestionRequest, QuestionRow},
        submission::{QuizSubmission, SubmissionRow},
        user::User,
    },
    quiz::QuestionBank,
    store::{QuestionStore, SubmissionStore, UserStore},
};

/// Postgres-backed store. Schema lives in `migrations/`.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

const SUBMISSION_COLUMNS: &str =
    "owner, quiz_id, scores, answers, submitted_at, total_questions, answered_questions";

#[async_trait]
impl SubmissionStore for PgStore {
    async fn get(&self, owner: &str) -> Result<Option<QuizSubmission>, AppError> {
        let row = sqlx::query_as::<_, SubmissionRow>(&format!(
            "SELECT {} FROM quiz_results WHERE owner = $1",
            SUBMISSION_COLUMNS
        ))
        .bind(owner)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch quiz result: {:?}", e);
            AppError::from(e)
        })?;

        Ok(row.map(QuizSubmission::from))
    }

    async fn put(&self, owner: &str, submission: &QuizSubmission) -> Result<(), AppError> {
        // Upsert: a retake replaces the previous record wholesale.
        sqlx::query(
            r#"
            INSERT INTO quiz_results
                (owner, quiz_id, scores, answers, submitted_at, total_questions, answered_questions)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (owner) DO UPDATE SET
                quiz_id = EXCLUDED.quiz_id,
                scores = EXCLUDED.scores,
                answers = EXCLUDED.answers,
                submitted_at = EXCLUDED.submitted_at,
                total_questions = EXCLUDED.total_questions,
                answered_questions = EXCLUDED.answered_questions
            "#,
        )
        .bind(owner)
        .bind(&submission.quiz_id)
        .bind(Json(&submission.scores))
        .bind(Json(&submission.answers))
        .bind(submission.submitted_at)
        .bind(submission.total_questions)
        .bind(submission.answered_questions)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to upsert quiz result: {:?}", e);
            AppError::from(e)
        })?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<QuizSubmission>, AppError> {
        let rows = sqlx::query_as::<_, SubmissionRow>(&format!(
            "SELECT {} FROM quiz_results ORDER BY submitted_at",
            SUBMISSION_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(QuizSubmission::from).collect())
    }
}

#[async_trait]
impl QuestionStore for PgStore {
    async fn list(&self) -> Result<Vec<Question>, AppError> {
        let rows = sqlx::query_as::<_, QuestionRow>(
            "SELECT id, content, category, options FROM questions ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load question bank: {:?}", e);
            AppError::from(e)
        })?;

        rows.into_iter().map(Question::try_from).collect()
    }

    async fn get(&self, id: i64) -> Result<Option<Question>, AppError> {
        sqlx::query_as::<_, QuestionRow>(
            "SELECT id, content, category, options FROM questions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(Question::try_from)
        .transpose()
    }

    async fn create(&self, req: &QuestionRequest) -> Result<Question, AppError> {
        let row = sqlx::query_as::<_, QuestionRow>(
            r#"
            INSERT INTO questions (content, category, options)
            VALUES ($1, $2, $3)
            RETURNING id, content, category, options
            "#,
        )
        .bind(&req.text)
        .bind(req.category.as_str())
        .bind(Json(&req.options))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create question: {:?}", e);
            AppError::from(e)
        })?;

        Question::try_from(row)
    }

    async fn update(&self, id: i64, req: &QuestionRequest) -> Result<Option<Question>, AppError> {
        sqlx::query_as::<_, QuestionRow>(
            r#"
            UPDATE questions
            SET content = $1, category = $2, options = $3
            WHERE id = $4
            RETURNING id, content, category, options
            "#,
        )
        .bind(&req.text)
        .bind(req.category.as_str())
        .bind(Json(&req.options))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(Question::try_from)
        .transpose()
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete question: {:?}", e);
                AppError::from(e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn seed(&self, bank: &QuestionBank) -> Result<usize, AppError> {
        let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM questions")
            .fetch_one(&self.pool)
            .await?;
        if existing > 0 {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        for question in &bank.questions {
            sqlx::query("INSERT INTO questions (id, content, category, options) VALUES ($1, $2, $3, $4)")
                .bind(question.id)
                .bind(&question.text)
                .bind(question.category.as_str())
                .bind(Json(&question.options))
                .execute(&mut *tx)
                .await?;
        }

        // Explicit ids bypass the sequence; move it past them.
        sqlx::query("SELECT setval(pg_get_serial_sequence('questions', 'id'), (SELECT MAX(id) FROM questions))")
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(bank.len())
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create(&self, username: &str, password_hash: &str, role: &str) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password, role)
            VALUES ($1, $2, $3)
            RETURNING id, username, password, role, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // Postgres error code for unique violation is 23505
            if e.to_string().contains("unique constraint") || e.to_string().contains("23505") {
                AppError::Conflict(format!("Username '{}' already exists", username))
            } else {
                tracing::error!("Failed to create user: {:?}", e);
                AppError::from(e)
            }
        })
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password, role, created_at FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Login DB error: {:?}", e);
            AppError::from(e)
        })?;

        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, username, password, role, created_at FROM users ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }
}
