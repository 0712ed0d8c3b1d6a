// src/handlers/quiz.rs

use axum::{
    Extension, Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;

use crate::{
    config::MAX_QUIZ_PAGE_SIZE,
    error::AppError,
    models::submission::{QuizSubmission, SubmissionResponse, SubmitQuizRequest},
    quiz::{QuestionBank, QuizSession, bank::BUILTIN_QUIZ_ID, bank::BUILTIN_QUIZ_VERSION, recommend},
    state::AppState,
    utils::jwt::Claims,
};

const SAVE_FAILED_MESSAGE: &str =
    "Your result could not be saved. It is shown below but will not appear on your dashboard.";

/// Query parameters for paging through the question bank.
#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

/// Loads the whole bank from the question store.
async fn load_bank(state: &AppState) -> Result<QuestionBank, AppError> {
    let questions = state.questions.list().await?;
    Ok(QuestionBank::new(BUILTIN_QUIZ_ID, BUILTIN_QUIZ_VERSION, questions))
}

fn response_for(submission: QuizSubmission, saved: bool) -> SubmissionResponse {
    SubmissionResponse {
        recommended: recommend(&submission.scores),
        quiz_id: submission.quiz_id,
        scores: submission.scores,
        total_questions: submission.total_questions,
        answered_questions: submission.answered_questions,
        submitted_at: submission.submitted_at,
        saved,
        message: (!saved).then(|| SAVE_FAILED_MESSAGE.to_string()),
    }
}

/// Returns one page of quiz questions.
///
/// `page` is 1-based and defaults to 1; `per_page` defaults to the configured
/// page size and is clamped to `1..=MAX_QUIZ_PAGE_SIZE`.
pub async fn list_questions(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Response, AppError> {
    let bank = load_bank(&state).await?;
    let per_page = params
        .per_page
        .unwrap_or(state.config.quiz_page_size)
        .clamp(1, MAX_QUIZ_PAGE_SIZE);
    let page = bank.page(params.page.unwrap_or(1), per_page);

    // The page borrows `bank`; render it before the bank goes out of scope.
    Ok(Json(page).into_response())
}

/// Scores a completed attempt and stores it as the caller's current result.
///
/// * Rejects answers for questions that are not in the bank.
/// * Writes exactly once; a failed write is logged and reported with
///   `saved: false`, but the scores are still returned.
pub async fn submit_quiz(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<SubmitQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    let bank = load_bank(&state).await?;

    if let Some(unknown) = req.answers.question_ids().find(|id| !bank.contains(*id)) {
        return Err(AppError::BadRequest(format!("Unknown question id {}", unknown)));
    }

    let mut session = QuizSession::new().start()?;
    for question in &bank.questions {
        if let Some(value) = req.answers.get(question.id) {
            session = session.answer(question.id, value)?;
        }
    }

    let submission = match session.submit(&bank, &claims.sub, Utc::now())? {
        QuizSession::Submitted { submission, .. } => submission,
        _ => return Err(AppError::InternalServerError("Quiz session did not complete".to_string())),
    };

    let saved = match state.submissions.put(&claims.sub, &submission).await {
        Ok(()) => {
            tracing::info!(
                "Stored quiz result for user {}: {}/{} answered",
                claims.sub,
                submission.answered_questions,
                submission.total_questions
            );
            true
        }
        Err(e) => {
            tracing::error!("Failed to store quiz result for user {}: {}", claims.sub, e);
            false
        }
    };

    Ok(Json(response_for(submission, saved)))
}

/// Returns the caller's current stored result.
pub async fn get_result(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let submission = state
        .submissions
        .get(&claims.sub)
        .await?
        .ok_or(AppError::NotFound("No quiz result yet".to_string()))?;

    Ok(Json(response_for(submission, true)))
}
