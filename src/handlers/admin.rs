// src/handlers/admin.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    error::AppError,
    models::question::QuestionRequest,
    quiz::analytics::summarize,
    state::AppState,
    utils::html::strip_html,
};

/// Validates the payload and strips markup from every free-text field.
fn sanitize(mut payload: QuestionRequest) -> Result<QuestionRequest, AppError> {
    payload.text = strip_html(&payload.text);
    for option in &mut payload.options {
        option.label = strip_html(&option.label);
    }

    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }
    Ok(payload)
}

/// Lists the full question bank, including general questions.
/// Admin only.
pub async fn list_questions(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let questions = state.questions.list().await?;
    Ok(Json(questions))
}

/// Fetches a single question.
/// Admin only.
pub async fn get_question(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let question = state
        .questions
        .get(id)
        .await?
        .ok_or(AppError::NotFound("Question not found".to_string()))?;

    Ok(Json(question))
}

/// Adds a question to the bank.
/// Admin only.
pub async fn create_question(
    State(state): State<AppState>,
    Json(payload): Json<QuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let payload = sanitize(payload)?;
    let question = state.questions.create(&payload).await?;

    tracing::info!("Created question {} ({})", question.id, question.category);

    Ok((StatusCode::CREATED, Json(question)))
}

/// Replaces a question's text, category and options.
/// Admin only.
pub async fn update_question(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<QuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let payload = sanitize(payload)?;
    let question = state
        .questions
        .update(id, &payload)
        .await?
        .ok_or(AppError::NotFound("Question not found".to_string()))?;

    Ok(Json(question))
}

/// Removes a question. Stored results keep the answers they were scored with.
/// Admin only.
pub async fn delete_question(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !state.questions.delete(id).await? {
        return Err(AppError::NotFound("Question not found".to_string()));
    }

    tracing::info!("Deleted question {}", id);

    Ok(StatusCode::NO_CONTENT)
}

/// Dashboard numbers: user counts, completions, stream distribution and
/// six-month trends.
/// Admin only.
pub async fn get_analytics(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let users = state.users.list().await?;
    let submissions = state.submissions.list().await?;

    Ok(Json(summarize(&users, &submissions, Utc::now())))
}
