// src/models/mod.rs

pub mod category;
pub mod question;
pub mod submission;
pub mod user;
