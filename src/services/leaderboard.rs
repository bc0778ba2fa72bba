// src/services/leaderboard.rs

use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::leaderboard::{LeaderboardEntry, StudentAverage},
};

/// Ranks students by the mean score of their graded responses.
///
/// Students without any graded response are left out. Ordering is average
/// descending, then name, then id, so equal averages always list the same way.
pub async fn compute(pool: &SqlitePool) -> Result<Vec<LeaderboardEntry>, AppError> {
    let rows = sqlx::query_as::<_, StudentAverage>(
        r#"
        SELECT
            u.id AS student_id,
            u.name,
            u.year_level,
            AVG(CAST(g.score AS REAL)) AS average,
            COUNT(g.id) AS graded_count
        FROM users u
        JOIN responses r ON r.student_id = u.id
        JOIN grades g ON g.response_id = r.id
        WHERE u.role = 'student'
        GROUP BY u.id, u.name, u.year_level
        HAVING COUNT(g.id) > 0
        ORDER BY average DESC, u.name ASC, u.id ASC
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch leaderboard: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(assign_ranks(rows))
}

/// Standard competition ranking over rows already sorted by average:
/// equal averages share a rank and the next distinct average skips ahead (1, 1, 3).
pub fn assign_ranks(rows: Vec<StudentAverage>) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = Vec::with_capacity(rows.len());

    for (index, row) in rows.into_iter().enumerate() {
        let rank = match entries.last() {
            Some(prev) if prev.average == row.average => prev.rank,
            _ => index + 1,
        };
        entries.push(LeaderboardEntry {
            rank,
            student_id: row.student_id,
            name: row.name,
            year_level: row.year_level,
            average: row.average,
            graded_count: row.graded_count,
        });
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64, name: &str, average: f64) -> StudentAverage {
        StudentAverage {
            student_id: id,
            name: name.to_string(),
            year_level: Some(10),
            average,
            graded_count: 1,
        }
    }

    #[test]
    fn distinct_averages_rank_sequentially() {
        let ranked = assign_ranks(vec![row(1, "a", 90.0), row(2, "b", 80.0), row(3, "c", 70.0)]);
        let ranks: Vec<usize> = ranked.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn ties_share_rank_and_skip() {
        let ranked = assign_ranks(vec![
            row(1, "amy", 85.0),
            row(2, "bob", 85.0),
            row(3, "cal", 60.5),
            row(4, "dee", 60.5),
            row(5, "eve", 10.0),
        ]);
        let ranks: Vec<usize> = ranked.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 1, 3, 3, 5]);
    }

    #[test]
    fn empty_board() {
        assert!(assign_ranks(Vec::new()).is_empty());
    }

    #[test]
    fn display_rounds_to_two_decimals() {
        let ranked = assign_ranks(vec![row(1, "a", 200.0 / 3.0)]);
        assert_eq!(ranked[0].average_display(), "66.67");
    }
}
