//! Database models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A stored assessment row.
///
/// `weight_pct` is the share of the overall grade this item carries and
/// `score_pct` is `None` until the item is graded. Both percentages are
/// contractually in [0, 100]; the API boundary enforces that before rows
/// are written. The weights of a student's rows are NOT required to sum
/// to 100; `stats::validate_weights` reports the deviation instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    pub id: i64,
    pub title: String,
    pub weight_pct: f64,
    /// Serialized as ISO `YYYY-MM-DD`, matching the storage format.
    pub due_date: NaiveDate,
    pub score_pct: Option<f64>,
}

/// Insert payload for a new assessment; the database assigns the id.
#[derive(Debug, Clone)]
pub struct NewAssessment {
    pub title: String,
    pub weight_pct: f64,
    pub due_date: NaiveDate,
    pub score_pct: Option<f64>,
}
