// src/models/leaderboard.rs

use serde::Serialize;
use sqlx::FromRow;

/// Per-student aggregate over graded responses, straight from SQL.
#[derive(Debug, Clone, FromRow)]
pub struct StudentAverage {
    pub student_id: i64,
    pub name: String,
    pub year_level: Option<i64>,
    pub average: f64,
    pub graded_count: i64,
}

/// Aggregated struct for displaying the leaderboard.
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub student_id: i64,
    pub name: String,
    pub year_level: Option<i64>,
    pub average: f64,
    pub graded_count: i64,
}

impl LeaderboardEntry {
    /// Average rounded to two decimals for display.
    pub fn average_display(&self) -> String {
        format!("{:.2}", self.average)
    }
}
