// src/models/submission.rs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};

use crate::models::category::Category;

/// Answers collected so far, keyed by question id.
///
/// Unanswered questions are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<i64, i64>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records (or replaces) the selected value for a question.
    pub fn insert(&mut self, question_id: i64, value: i64) {
        self.0.insert(question_id, value);
    }

    pub fn get(&self, question_id: i64) -> Option<i64> {
        self.0.get(&question_id).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn question_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.0.keys().copied()
    }
}

impl FromIterator<(i64, i64)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (i64, i64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Per-stream totals. `General` has no slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub science: i64,
    pub arts: i64,
    pub commerce: i64,
}

impl ScoreResult {
    /// Total for `category`; `General` always reads as zero.
    pub fn get(&self, category: Category) -> i64 {
        match category {
            Category::Science => self.science,
            Category::Arts => self.arts,
            Category::Commerce => self.commerce,
            Category::General => 0,
        }
    }

    /// Adds `amount` to the slot of `category`, saturating at the `i64`
    /// bounds. `General` is ignored.
    pub fn add(&mut self, category: Category, amount: i64) {
        match category {
            Category::Science => self.science = self.science.saturating_add(amount),
            Category::Arts => self.arts = self.arts.saturating_add(amount),
            Category::Commerce => self.commerce = self.commerce.saturating_add(amount),
            Category::General => {}
        }
    }

    /// Iterates the scored streams in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, i64)> + '_ {
        Category::SCORED.into_iter().map(|c| (c, self.get(c)))
    }
}

/// The persisted record of a completed attempt. One per owner; a retake
/// replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizSubmission {
    pub owner: String,
    pub quiz_id: String,
    pub scores: ScoreResult,
    pub answers: AnswerSet,
    pub submitted_at: DateTime<Utc>,
    pub total_questions: i64,
    pub answered_questions: i64,
}

/// Represents the 'quiz_results' table in the database.
#[derive(Debug, FromRow)]
pub struct SubmissionRow {
    pub owner: String,
    pub quiz_id: String,
    pub scores: Json<ScoreResult>,
    pub answers: Json<AnswerSet>,
    pub submitted_at: DateTime<Utc>,
    pub total_questions: i64,
    pub answered_questions: i64,
}

impl From<SubmissionRow> for QuizSubmission {
    fn from(row: SubmissionRow) -> Self {
        QuizSubmission {
            owner: row.owner,
            quiz_id: row.quiz_id,
            scores: row.scores.0,
            answers: row.answers.0,
            submitted_at: row.submitted_at,
            total_questions: row.total_questions,
            answered_questions: row.answered_questions,
        }
    }
}

/// DTO for submitting a quiz attempt.
#[derive(Debug, Deserialize)]
pub struct SubmitQuizRequest {
    /// Key: question id. Value: selected option value.
    pub answers: AnswerSet,
}

/// Result returned after a submission, and when fetching the current one.
#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub quiz_id: String,
    pub scores: ScoreResult,
    pub recommended: Category,
    pub total_questions: i64,
    pub answered_questions: i64,
    pub submitted_at: DateTime<Utc>,
    /// False when the durable write failed; the scores are still valid.
    pub saved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_set_uses_string_keys_on_the_wire() {
        let answers: AnswerSet = [(1, 4), (2, 3)].into_iter().collect();
        let json = serde_json::to_value(&answers).unwrap();
        assert_eq!(json, serde_json::json!({ "1": 4, "2": 3 }));

        let back: AnswerSet = serde_json::from_value(json).unwrap();
        assert_eq!(back, answers);
    }

    #[test]
    fn general_slot_is_ignored() {
        let mut scores = ScoreResult::default();
        scores.add(Category::General, 5);
        scores.add(Category::Arts, 3);
        assert_eq!(scores, ScoreResult { science: 0, arts: 3, commerce: 0 });
        assert_eq!(scores.get(Category::General), 0);
    }

    #[test]
    fn reinserting_an_answer_replaces_it() {
        let mut answers = AnswerSet::new();
        answers.insert(3, 2);
        answers.insert(3, 5);
        assert_eq!(answers.len(), 1);
        assert_eq!(answers.get(3), Some(5));
    }
}
