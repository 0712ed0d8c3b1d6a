// src/state.rs

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    config::Config,
    store::{QuestionStore, SubmissionStore, UserStore},
};

#[derive(Clone)]
pub struct AppState {
    pub submissions: Arc<dyn SubmissionStore>,
    pub questions: Arc<dyn QuestionStore>,
    pub users: Arc<dyn UserStore>,
    pub config: Config,
}

impl AppState {
    /// Uses one backend for every store.
    pub fn from_store<S>(store: S, config: Config) -> Self
    where
        S: SubmissionStore + QuestionStore + UserStore + 'static,
    {
        let store = Arc::new(store);
        Self {
            submissions: store.clone(),
            questions: store.clone(),
            users: store,
            config,
        }
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
