//! Statistics endpoints
//!
//! Thin wrappers: fetch every row, hand the collection to the pure stats
//! functions. Listing order does not matter here, so these use the
//! unordered query.

use axum::extract::{Query, State};
use axum::{routing::get, Json, Router};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::AppState;
use gradetrack_common::db;
use gradetrack_common::stats::{self, CurrentStats, WeightValidation, WhatIf};

#[derive(Debug, Deserialize)]
pub struct WhatIfParams {
    /// Target overall grade. Deliberately unconstrained; values outside
    /// [0, 100] just come back unattainable.
    pub target: f64,
}

/// GET /stats/current
pub async fn current_stats(State(state): State<AppState>) -> ApiResult<Json<CurrentStats>> {
    let rows = db::list_for_stats(&state.db).await?;
    Ok(Json(stats::current_stats(&rows)))
}

/// GET /stats/what-if?target=<grade>
///
/// A missing or unparseable target is rejected by the Query extractor
/// with 400 before this handler runs.
pub async fn what_if(
    State(state): State<AppState>,
    Query(params): Query<WhatIfParams>,
) -> ApiResult<Json<WhatIf>> {
    let rows = db::list_for_stats(&state.db).await?;
    Ok(Json(stats::what_if(&rows, params.target)))
}

/// GET /stats/validate
pub async fn validate_weights(
    State(state): State<AppState>,
) -> ApiResult<Json<WeightValidation>> {
    let rows = db::list_for_stats(&state.db).await?;
    Ok(Json(stats::validate_weights(&rows)))
}

/// Build stats routes
pub fn stats_routes() -> Router<AppState> {
    Router::new()
        .route("/stats/current", get(current_stats))
        .route("/stats/what-if", get(what_if))
        .route("/stats/validate", get(validate_weights))
}
