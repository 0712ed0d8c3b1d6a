// src/quiz/mod.rs

pub mod analytics;
pub mod bank;
pub mod scoring;
pub mod session;

pub use bank::QuestionBank;
pub use scoring::{recommend, score};
pub use session::{QuizSession, SessionError};
