// src/seed.rs

use crate::{
    config::Config,
    error::AppError,
    models::user::ROLE_ADMIN,
    quiz::QuestionBank,
    state::AppState,
    utils::hash::hash_password,
};

/// Fills an empty question store with the built-in bank and creates the
/// configured admin account if it does not exist yet.
pub async fn seed(state: &AppState, config: &Config) -> Result<(), AppError> {
    let inserted = state.questions.seed(&QuestionBank::builtin()).await?;
    if inserted > 0 {
        tracing::info!("Seeded question bank with {} questions.", inserted);
    }

    seed_admin_user(state, config).await
}

async fn seed_admin_user(state: &AppState, config: &Config) -> Result<(), AppError> {
    let (Some(username), Some(password)) = (&config.admin_username, &config.admin_password) else {
        return Ok(());
    };

    if state.users.find_by_username(username).await?.is_none() {
        tracing::info!("Seeding admin user: {}", username);
        let hashed_password = hash_password(password)?;
        state.users.create(username, &hashed_password, ROLE_ADMIN).await?;
        tracing::info!("Admin user created successfully.");
    }
    Ok(())
}
