// src/store/mod.rs

//! Persistence seams.
//!
//! Handlers only see these traits. `PgStore` backs them with Postgres,
//! `MemoryStore` keeps everything in-process.

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::{
        question::{Question, QuestionRequest},
        submission::QuizSubmission,
        user::User,
    },
    quiz::QuestionBank,
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Current quiz result per owner.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    async fn get(&self, owner: &str) -> Result<Option<QuizSubmission>, AppError>;

    /// Writes `submission`, replacing any earlier one for `owner`.
    async fn put(&self, owner: &str, submission: &QuizSubmission) -> Result<(), AppError>;

    async fn list(&self) -> Result<Vec<QuizSubmission>, AppError>;
}

/// The question bank, editable by admins.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// All questions ordered by id.
    async fn list(&self) -> Result<Vec<Question>, AppError>;

    async fn get(&self, id: i64) -> Result<Option<Question>, AppError>;

    async fn create(&self, req: &QuestionRequest) -> Result<Question, AppError>;

    /// Replaces the question; `None` if it does not exist.
    async fn update(&self, id: i64, req: &QuestionRequest) -> Result<Option<Question>, AppError>;

    /// Returns whether a question was removed.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Inserts `bank` (keeping its ids) only when the store is empty.
    /// Returns the number of questions inserted.
    async fn seed(&self, bank: &QuestionBank) -> Result<usize, AppError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with `AppError::Conflict` when the username is taken.
    async fn create(&self, username: &str, password_hash: &str, role: &str) -> Result<User, AppError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    async fn list(&self) -> Result<Vec<User>, AppError>;
}
