// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::{prelude::FromRow, types::Json};
use validator::Validate;

use crate::{error::AppError, models::category::Category};

/// One selectable answer of a Likert question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    pub label: String,
    pub value: i64,
}

/// A quiz question as served to students and scored on submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub text: String,
    pub category: Category,
    pub options: Vec<QuizOption>,
}

/// Represents the 'questions' table in the database.
///
/// The category is stored as TEXT and checked when converting into `Question`.
#[derive(Debug, FromRow)]
pub struct QuestionRow {
    pub id: i64,
    pub content: String,
    pub category: String,
    pub options: Json<Vec<QuizOption>>,
}

impl TryFrom<QuestionRow> for Question {
    type Error = AppError;

    fn try_from(row: QuestionRow) -> Result<Self, Self::Error> {
        let category = row.category.parse::<Category>().map_err(|e| {
            AppError::InternalServerError(format!("question {}: {}", row.id, e))
        })?;

        Ok(Question {
            id: row.id,
            text: row.content,
            category,
            options: row.options.0,
        })
    }
}

/// DTO for creating or replacing a question (admin).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct QuestionRequest {
    #[validate(length(min = 1, max = 500))]
    pub text: String,
    pub category: Category,
    #[validate(custom(function = validate_options))]
    pub options: Vec<QuizOption>,
}

fn validate_options(options: &[QuizOption]) -> Result<(), validator::ValidationError> {
    if options.is_empty() {
        return Err(validator::ValidationError::new("options_cannot_be_empty"));
    }
    if options.len() > 10 {
        return Err(validator::ValidationError::new("too_many_options"));
    }
    for opt in options {
        if opt.label.trim().is_empty() || opt.label.len() > 100 {
            return Err(validator::ValidationError::new("invalid_option_label"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(options: Vec<QuizOption>) -> QuestionRequest {
        QuestionRequest {
            text: "I enjoy field trips".to_string(),
            category: Category::General,
            options,
        }
    }

    #[test]
    fn empty_options_are_rejected() {
        assert!(request(vec![]).validate().is_err());
    }

    #[test]
    fn blank_label_is_rejected() {
        let opts = vec![QuizOption { label: "  ".to_string(), value: 1 }];
        assert!(request(opts).validate().is_err());
    }

    #[test]
    fn out_of_range_values_pass_validation() {
        // Values are summed as-is; only labels are checked.
        let opts = vec![QuizOption { label: "Always".to_string(), value: 9 }];
        assert!(request(opts).validate().is_ok());
    }

    #[test]
    fn row_with_unknown_category_fails_conversion() {
        let row = QuestionRow {
            id: 7,
            content: "x".to_string(),
            category: "engineering".to_string(),
            options: Json(vec![]),
        };
        assert!(Question::try_from(row).is_err());
    }
}
