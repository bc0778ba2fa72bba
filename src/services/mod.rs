// src/services/mod.rs

//! Database-backed operations behind the HTTP handlers.
//! Each function takes the pool and returns `AppError` on failure.

pub mod grades;
pub mod leaderboard;
pub mod prompts;
pub mod responses;
pub mod users;
