// src/store/memory.rs

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    error::AppError,
    models::{
        question::{Question, QuestionRequest},
        submission::QuizSubmission,
        user::User,
    },
    quiz::QuestionBank,
    store::{QuestionStore, SubmissionStore, UserStore},
};

/// In-process store used when no database is configured, and by tests.
/// Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    users: Vec<User>,
    questions: BTreeMap<i64, Question>,
    submissions: HashMap<String, QuizSubmission>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn get(&self, owner: &str) -> Result<Option<QuizSubmission>, AppError> {
        Ok(self.inner.read().await.submissions.get(owner).cloned())
    }

    async fn put(&self, owner: &str, submission: &QuizSubmission) -> Result<(), AppError> {
        self.inner
            .write()
            .await
            .submissions
            .insert(owner.to_string(), submission.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<QuizSubmission>, AppError> {
        Ok(self.inner.read().await.submissions.values().cloned().collect())
    }
}

#[async_trait]
impl QuestionStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Question>, AppError> {
        Ok(self.inner.read().await.questions.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> Result<Option<Question>, AppError> {
        Ok(self.inner.read().await.questions.get(&id).cloned())
    }

    async fn create(&self, req: &QuestionRequest) -> Result<Question, AppError> {
        let mut inner = self.inner.write().await;
        let id = inner.questions.keys().next_back().map_or(1, |last| last + 1);

        let question = Question {
            id,
            text: req.text.clone(),
            category: req.category,
            options: req.options.clone(),
        };
        inner.questions.insert(id, question.clone());
        Ok(question)
    }

    async fn update(&self, id: i64, req: &QuestionRequest) -> Result<Option<Question>, AppError> {
        let mut inner = self.inner.write().await;
        let Some(question) = inner.questions.get_mut(&id) else {
            return Ok(None);
        };

        question.text = req.text.clone();
        question.category = req.category;
        question.options = req.options.clone();
        Ok(Some(question.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.inner.write().await.questions.remove(&id).is_some())
    }

    async fn seed(&self, bank: &QuestionBank) -> Result<usize, AppError> {
        let mut inner = self.inner.write().await;
        if !inner.questions.is_empty() {
            return Ok(0);
        }

        for question in &bank.questions {
            inner.questions.insert(question.id, question.clone());
        }
        Ok(bank.len())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, username: &str, password_hash: &str, role: &str) -> Result<User, AppError> {
        let mut inner = self.inner.write().await;
        if inner.users.iter().any(|u| u.username == username) {
            return Err(AppError::Conflict(format!("Username '{}' already exists", username)));
        }

        let user = User {
            id: inner.users.len() as i64 + 1,
            username: username.to_string(),
            password: password_hash.to_string(),
            role: role.to_string(),
            created_at: Utc::now(),
        };
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .inner
            .read()
            .await
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        Ok(self.inner.read().await.users.clone())
    }
}
