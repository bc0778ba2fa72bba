// src/models/mod.rs

pub mod grade;
pub mod leaderboard;
pub mod prompt;
pub mod response;
pub mod user;
