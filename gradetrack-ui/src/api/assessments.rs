//! CRUD endpoints for assessments
//!
//! Range and presence checks happen here, before anything is written;
//! rows that reach the database (and later the stats functions) are
//! always range-legal.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::AppState;
use gradetrack_common::db::{self, Assessment, NewAssessment};

/// Detail string for every unknown-id response.
const NOT_FOUND_MESSAGE: &str = "Assessment not found";

/// Create payload. Shape errors (missing fields, malformed dates, wrong
/// types) are rejected by the Json extractor before the handler runs.
#[derive(Debug, Deserialize)]
pub struct AssessmentDraft {
    pub title: String,
    pub weight_pct: f64,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub score_pct: Option<f64>,
}

/// Partial-update payload. Only fields present in the JSON change the row.
/// `score_pct` distinguishes an absent key (keep the stored score) from an
/// explicit null (clear it back to ungraded).
#[derive(Debug, Deserialize)]
pub struct AssessmentPatch {
    pub title: Option<String>,
    pub weight_pct: Option<f64>,
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "double_option")]
    pub score_pct: Option<Option<f64>>,
}

/// Keeps the outer Option meaningful: an absent field stays `None` via the
/// serde default, a present field (null included) becomes `Some(inner)`.
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer).map(Some)
}

fn check_range(field: &str, value: f64) -> ApiResult<()> {
    if !(0.0..=100.0).contains(&value) {
        return Err(ApiError::Validation(format!(
            "{} must be between 0 and 100",
            field
        )));
    }
    Ok(())
}

fn check_title(title: &str) -> ApiResult<()> {
    if title.trim().is_empty() {
        return Err(ApiError::Validation("title must not be empty".to_string()));
    }
    Ok(())
}

/// POST /assessments
pub async fn create_assessment(
    State(state): State<AppState>,
    Json(draft): Json<AssessmentDraft>,
) -> ApiResult<Json<Assessment>> {
    check_title(&draft.title)?;
    check_range("weight_pct", draft.weight_pct)?;
    if let Some(score) = draft.score_pct {
        check_range("score_pct", score)?;
    }

    let created = db::insert_assessment(
        &state.db,
        &NewAssessment {
            title: draft.title,
            weight_pct: draft.weight_pct,
            due_date: draft.due_date,
            score_pct: draft.score_pct,
        },
    )
    .await?;

    debug!("Created assessment {} ({})", created.id, created.title);
    Ok(Json(created))
}

/// GET /assessments
///
/// Full list ordered by due date.
pub async fn list_assessments(State(state): State<AppState>) -> ApiResult<Json<Vec<Assessment>>> {
    let rows = db::list_assessments(&state.db).await?;
    Ok(Json(rows))
}

/// GET /assessments/:id
pub async fn get_assessment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Assessment>> {
    let row = db::get_assessment(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND_MESSAGE.to_string()))?;
    Ok(Json(row))
}

/// PUT /assessments/:id
pub async fn update_assessment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<AssessmentPatch>,
) -> ApiResult<Json<Assessment>> {
    if let Some(ref title) = patch.title {
        check_title(title)?;
    }
    if let Some(weight) = patch.weight_pct {
        check_range("weight_pct", weight)?;
    }
    if let Some(Some(score)) = patch.score_pct {
        check_range("score_pct", score)?;
    }

    let mut row = db::get_assessment(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND_MESSAGE.to_string()))?;

    if let Some(title) = patch.title {
        row.title = title;
    }
    if let Some(weight) = patch.weight_pct {
        row.weight_pct = weight;
    }
    if let Some(due) = patch.due_date {
        row.due_date = due;
    }
    if let Some(score) = patch.score_pct {
        row.score_pct = score;
    }

    db::update_assessment(&state.db, &row).await?;
    debug!("Updated assessment {}", id);
    Ok(Json(row))
}

/// DELETE /assessments/:id
pub async fn delete_assessment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Value>> {
    let deleted = db::delete_assessment(&state.db, id).await?;
    if !deleted {
        return Err(ApiError::NotFound(NOT_FOUND_MESSAGE.to_string()));
    }

    debug!("Deleted assessment {}", id);
    Ok(Json(json!({ "ok": true })))
}

/// Build assessment CRUD routes
pub fn assessment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/assessments",
            get(list_assessments).post(create_assessment),
        )
        .route(
            "/assessments/:id",
            get(get_assessment)
                .put(update_assessment)
                .delete(delete_assessment),
        )
}
