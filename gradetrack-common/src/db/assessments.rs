//! Assessment row queries
//!
//! CRUD over the assessments table. Lookups report missing rows as `Option`
//! or `bool` values rather than errors; the caller decides what a missing
//! row means.

use crate::db::models::{Assessment, NewAssessment};
use crate::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

const SELECT_COLUMNS: &str = "id, title, weight_pct, due_date, score_pct";

fn assessment_from_row(row: &SqliteRow) -> Result<Assessment> {
    Ok(Assessment {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        weight_pct: row.try_get("weight_pct")?,
        due_date: row.try_get("due_date")?,
        score_pct: row.try_get("score_pct")?,
    })
}

/// List all assessments ordered by due date (the user-facing listing).
pub async fn list_assessments(pool: &SqlitePool) -> Result<Vec<Assessment>> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM assessments ORDER BY due_date",
        SELECT_COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    rows.iter().map(assessment_from_row).collect()
}

/// List all assessments without ordering.
///
/// The statistics engine is order-independent, so the stats endpoints skip
/// the sort.
pub async fn list_for_stats(pool: &SqlitePool) -> Result<Vec<Assessment>> {
    let rows = sqlx::query(&format!("SELECT {} FROM assessments", SELECT_COLUMNS))
        .fetch_all(pool)
        .await?;

    rows.iter().map(assessment_from_row).collect()
}

/// Fetch a single assessment; `None` when the id does not exist.
pub async fn get_assessment(pool: &SqlitePool, id: i64) -> Result<Option<Assessment>> {
    let row = sqlx::query(&format!(
        "SELECT {} FROM assessments WHERE id = ?",
        SELECT_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(assessment_from_row).transpose()
}

/// Insert a new assessment and return the stored row with its assigned id.
pub async fn insert_assessment(pool: &SqlitePool, new: &NewAssessment) -> Result<Assessment> {
    let result = sqlx::query(
        "INSERT INTO assessments (title, weight_pct, due_date, score_pct) VALUES (?, ?, ?, ?)",
    )
    .bind(&new.title)
    .bind(new.weight_pct)
    .bind(new.due_date)
    .bind(new.score_pct)
    .execute(pool)
    .await?;

    Ok(Assessment {
        id: result.last_insert_rowid(),
        title: new.title.clone(),
        weight_pct: new.weight_pct,
        due_date: new.due_date,
        score_pct: new.score_pct,
    })
}

/// Write every field of an existing assessment back by id.
pub async fn update_assessment(pool: &SqlitePool, assessment: &Assessment) -> Result<()> {
    sqlx::query(
        "UPDATE assessments SET title = ?, weight_pct = ?, due_date = ?, score_pct = ? WHERE id = ?",
    )
    .bind(&assessment.title)
    .bind(assessment.weight_pct)
    .bind(assessment.due_date)
    .bind(assessment.score_pct)
    .bind(assessment.id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Delete an assessment; `false` when no row matched the id.
pub async fn delete_assessment(pool: &SqlitePool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM assessments WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
