// src/quiz/session.rs

use std::fmt;

use chrono::{DateTime, Utc};

use crate::{
    models::{
        category::Category,
        submission::{AnswerSet, QuizSubmission},
    },
    quiz::{
        bank::QuestionBank,
        scoring::{recommend, score},
    },
};

/// Progress of one quiz attempt.
///
/// Each transition consumes the session and returns the next state, so a
/// caller always holds exactly one snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum QuizSession {
    #[default]
    NotStarted,
    InProgress {
        answers: AnswerSet,
    },
    Submitted {
        submission: QuizSubmission,
        recommended: Category,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// `submit` before any answer or explicit start.
    NotStarted,
    /// The attempt is already submitted; only `retake` is allowed.
    AlreadySubmitted,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::NotStarted => f.write_str("Quiz has not been started"),
            SessionError::AlreadySubmitted => f.write_str("Quiz has already been submitted"),
        }
    }
}

impl std::error::Error for SessionError {}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// NotStarted -> InProgress with an empty answer set. Starting an attempt
    /// that is already in progress keeps its answers.
    pub fn start(self) -> Result<Self, SessionError> {
        match self {
            QuizSession::NotStarted => Ok(QuizSession::InProgress {
                answers: AnswerSet::new(),
            }),
            in_progress @ QuizSession::InProgress { .. } => Ok(in_progress),
            QuizSession::Submitted { .. } => Err(SessionError::AlreadySubmitted),
        }
    }

    /// Records a selection, starting the attempt if needed.
    pub fn answer(self, question_id: i64, value: i64) -> Result<Self, SessionError> {
        let mut answers = match self {
            QuizSession::NotStarted => AnswerSet::new(),
            QuizSession::InProgress { answers } => answers,
            QuizSession::Submitted { .. } => return Err(SessionError::AlreadySubmitted),
        };
        answers.insert(question_id, value);
        Ok(QuizSession::InProgress { answers })
    }

    /// InProgress -> Submitted. Scores the whole bank and builds the record
    /// to persist; the caller owns the write.
    pub fn submit(
        self,
        bank: &QuestionBank,
        owner: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        let answers = match self {
            QuizSession::InProgress { answers } => answers,
            QuizSession::NotStarted => return Err(SessionError::NotStarted),
            QuizSession::Submitted { .. } => return Err(SessionError::AlreadySubmitted),
        };

        let scores = score(&bank.questions, &answers);
        let recommended = recommend(&scores);

        let submission = QuizSubmission {
            owner: owner.to_string(),
            quiz_id: bank.quiz_id.clone(),
            scores,
            total_questions: bank.len() as i64,
            answered_questions: answers.len() as i64,
            answers,
            submitted_at: now,
        };

        Ok(QuizSession::Submitted {
            submission,
            recommended,
        })
    }

    /// Back to InProgress with a fresh answer set. A stored submission is
    /// untouched until the next one is written.
    pub fn retake(self) -> Self {
        QuizSession::InProgress {
            answers: AnswerSet::new(),
        }
    }
}
