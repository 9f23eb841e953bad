//! Weighted grade statistics
//!
//! Pure computations over assessment rows: current weighted standing,
//! remaining weight, the average needed on remaining work to reach a target,
//! and weight-sum validation. No I/O and no shared state; every function is
//! a self-contained computation over its arguments, safe to call from any
//! number of requests at once.

use serde::Serialize;

use crate::db::models::Assessment;

/// Current standing across all rows, each field rounded to 2 decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentStats {
    /// Weighted grade earned so far, as a percentage of the total grade.
    pub current_weighted: f64,
    /// Total weight of graded rows.
    pub weight_done: f64,
    /// Total weight still ungraded, clamped at zero.
    pub remaining_weight: f64,
}

/// Outcome of a what-if projection against a target grade.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhatIf {
    pub target: f64,
    /// Average score needed on all remaining weight to land exactly on
    /// `target`; `None` when no ungraded weight remains. Serialized as JSON
    /// null in that case.
    pub required_avg: Option<f64>,
    /// Whether the required average lies in the achievable range [0, 100].
    /// With no remaining work: whether the current grade already meets the
    /// target.
    pub attainable: bool,
}

/// Weight-sum check across all rows (graded or not).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightValidation {
    pub total_weight: f64,
    pub is_exactly_100: bool,
    pub message: String,
}

/// Tolerance for treating a rounded weight total as exactly 100.
/// Absorbs decimal drift from repeated f64 arithmetic (33.33 + 33.33 + 33.34).
const WEIGHT_SUM_EPSILON: f64 = 1e-6;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compute the current weighted grade, graded weight, and remaining weight.
///
/// Rows without a score contribute nothing to `weight_done`;
/// `remaining_weight` clamps at zero when graded weight already exceeds 100
/// (overcommitted weighting). Empty input yields `(0, 0, 100)`. Never fails.
pub fn current_stats(rows: &[Assessment]) -> CurrentStats {
    let mut weight_done = 0.0;
    let mut completed = 0.0;
    for row in rows {
        if let Some(score) = row.score_pct {
            weight_done += row.weight_pct;
            completed += row.weight_pct * score;
        }
    }

    // completed is already 0 with no graded rows; the guard only avoids a
    // degenerate 0/0 reading.
    let current_weighted = if weight_done > 0.0 {
        completed / 100.0
    } else {
        0.0
    };
    let remaining = (100.0 - weight_done).max(0.0);

    CurrentStats {
        current_weighted: round2(current_weighted),
        weight_done: round2(weight_done),
        remaining_weight: round2(remaining),
    }
}

/// Project the average score needed on remaining weight to reach `target`.
///
/// `target` is taken as-is; callers may pass values outside [0, 100]. The
/// required average is reported unclamped (115 stays 115) and `attainable`
/// alone says whether it falls inside the achievable score range. The
/// attainability check runs on the unrounded value; only the reported
/// average is rounded.
///
/// The zero-remaining branch keys off the rounded `remaining_weight` from
/// [`current_stats`], so a sliver of remaining weight that rounds to 0.00 is
/// treated as no remaining work. An empty row set has `remaining_weight` of
/// 100 and therefore lands in the other branch, where the required average
/// works out to exactly `target`.
pub fn what_if(rows: &[Assessment], target: f64) -> WhatIf {
    let stats = current_stats(rows);

    if stats.remaining_weight == 0.0 {
        // Nothing left to earn; the grade is already decided.
        return WhatIf {
            target,
            required_avg: None,
            attainable: stats.current_weighted >= target,
        };
    }

    let required = (target - stats.current_weighted) * 100.0 / stats.remaining_weight;
    WhatIf {
        target,
        required_avg: Some(round2(required)),
        attainable: (0.0..=100.0).contains(&required),
    }
}

/// Report how the weight total relates to 100%.
///
/// Never rejects: an off-by-some total produces a message saying how much
/// can still be added (under) or that weights need reducing (over). The
/// exact-100 check compares the rounded total within a small tolerance.
pub fn validate_weights(rows: &[Assessment]) -> WeightValidation {
    let total = round2(rows.iter().map(|r| r.weight_pct).sum());
    let is_exactly_100 = (total - 100.0).abs() < WEIGHT_SUM_EPSILON;

    let message = if is_exactly_100 {
        "Weights sum to 100%.".to_string()
    } else if total < 100.0 {
        format!(
            "Weights sum to {}%. You can still add {}%.",
            total,
            round2(100.0 - total)
        )
    } else {
        format!(
            "Weights exceed 100% (total {}%). Consider reducing some weights.",
            total
        )
    };

    WeightValidation {
        total_weight: total,
        is_exactly_100,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(weight_pct: f64, score_pct: Option<f64>) -> Assessment {
        Assessment {
            id: 0,
            title: "test".to_string(),
            weight_pct,
            due_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            score_pct,
        }
    }

    #[test]
    fn current_stats_partial_progress() {
        // 0.3*90 + 0.3*80 = 51; scored weight 60, remaining 40
        let rows = vec![row(30.0, Some(90.0)), row(30.0, Some(80.0)), row(40.0, None)];
        let stats = current_stats(&rows);

        assert_eq!(stats.current_weighted, 51.00);
        assert_eq!(stats.weight_done, 60.00);
        assert_eq!(stats.remaining_weight, 40.00);
    }

    #[test]
    fn current_stats_empty_input() {
        let stats = current_stats(&[]);

        assert_eq!(stats.current_weighted, 0.0);
        assert_eq!(stats.weight_done, 0.0);
        assert_eq!(stats.remaining_weight, 100.0);
    }

    #[test]
    fn current_stats_clamps_overcommitted_weight() {
        // Scored weight 120 > 100: remaining clamps to zero instead of going
        // negative.
        let rows = vec![row(80.0, Some(50.0)), row(40.0, Some(70.0))];
        let stats = current_stats(&rows);

        assert_eq!(stats.weight_done, 120.00);
        assert_eq!(stats.remaining_weight, 0.00);
        assert_eq!(stats.current_weighted, 68.00);
    }

    #[test]
    fn current_stats_ignores_ungraded_rows() {
        let rows = vec![row(25.0, None), row(25.0, None)];
        let stats = current_stats(&rows);

        assert_eq!(stats.current_weighted, 0.0);
        assert_eq!(stats.weight_done, 0.0);
        assert_eq!(stats.remaining_weight, 100.0);
    }

    #[test]
    fn current_stats_is_idempotent() {
        let rows = vec![row(30.0, Some(90.0)), row(40.0, None)];
        assert_eq!(current_stats(&rows), current_stats(&rows));
    }

    #[test]
    fn what_if_reachable_target() {
        // completed 51, remaining 40: (70 - 51) * 100 / 40 = 47.5
        let rows = vec![row(30.0, Some(90.0)), row(30.0, Some(80.0)), row(40.0, None)];
        let projection = what_if(&rows, 70.0);

        assert_eq!(projection.target, 70.0);
        assert_eq!(projection.required_avg, Some(47.50));
        assert!(projection.attainable);
    }

    #[test]
    fn what_if_no_remaining_work() {
        // Everything graded, current exactly 85: target 85 is met, 90 is not.
        let rows = vec![row(50.0, Some(80.0)), row(50.0, Some(90.0))];

        let met = what_if(&rows, 85.0);
        assert_eq!(met.required_avg, None);
        assert!(met.attainable);

        let missed = what_if(&rows, 90.0);
        assert_eq!(missed.required_avg, None);
        assert!(!missed.attainable);
    }

    #[test]
    fn what_if_unattainable_target() {
        // current 5, remaining 90: (99 - 5) * 100 / 90 > 100
        let rows = vec![row(10.0, Some(50.0)), row(90.0, None)];
        let projection = what_if(&rows, 99.0);

        assert!(projection.required_avg.unwrap() > 100.0);
        assert!(!projection.attainable);
    }

    #[test]
    fn what_if_empty_rows_requires_target_itself() {
        // No rows at all: remaining weight defaults to 100, so the required
        // average is the target itself.
        let projection = what_if(&[], 70.0);

        assert_eq!(projection.required_avg, Some(70.00));
        assert!(projection.attainable);

        let out_of_range = what_if(&[], 130.0);
        assert_eq!(out_of_range.required_avg, Some(130.00));
        assert!(!out_of_range.attainable);
    }

    #[test]
    fn what_if_negative_required_average_not_attainable() {
        // Already above target: required average goes negative and stays
        // unclamped.
        let rows = vec![row(50.0, Some(100.0)), row(50.0, None)];
        let projection = what_if(&rows, 10.0);

        assert_eq!(projection.required_avg, Some(-80.00));
        assert!(!projection.attainable);
    }

    #[test]
    fn what_if_checks_attainability_before_rounding() {
        // Raw required average 100.004 rounds to 100.00 for display but is
        // still out of range.
        let rows = vec![row(50.0, Some(0.0)), row(50.0, None)];
        let projection = what_if(&rows, 50.002);

        assert_eq!(projection.required_avg, Some(100.00));
        assert!(!projection.attainable);
    }

    #[test]
    fn what_if_rounded_remaining_counts_as_done() {
        // Raw remaining 0.004 rounds to 0.00, so this counts as no remaining
        // work rather than dividing by a sliver.
        let rows = vec![row(99.996, Some(80.0))];
        let projection = what_if(&rows, 80.0);

        assert_eq!(projection.required_avg, None);
        assert!(projection.attainable);
    }

    #[test]
    fn validate_weights_exact() {
        let rows = vec![row(30.0, Some(90.0)), row(30.0, None), row(40.0, None)];
        let validation = validate_weights(&rows);

        assert_eq!(validation.total_weight, 100.00);
        assert!(validation.is_exactly_100);
        assert_eq!(validation.message, "Weights sum to 100%.");
    }

    #[test]
    fn validate_weights_tolerates_decimal_drift() {
        // 33.33 + 33.33 + 33.34 is not exactly 100.0 in f64 but must still
        // classify as exact.
        let rows = vec![row(33.33, None), row(33.33, None), row(33.34, None)];
        let validation = validate_weights(&rows);

        assert!(validation.is_exactly_100);
        assert_eq!(validation.total_weight, 100.00);
    }

    #[test]
    fn validate_weights_under_100() {
        let rows = vec![row(40.0, Some(80.0)), row(30.0, None)];
        let validation = validate_weights(&rows);

        assert_eq!(validation.total_weight, 70.00);
        assert!(!validation.is_exactly_100);
        assert!(validation.message.contains("30"));
        assert!(validation.message.contains("still add"));
    }

    #[test]
    fn validate_weights_over_100() {
        let rows = vec![row(60.0, None), row(60.0, None)];
        let validation = validate_weights(&rows);

        assert_eq!(validation.total_weight, 120.00);
        assert!(!validation.is_exactly_100);
        assert!(validation.message.contains("exceed"));
        assert!(validation.message.contains("120"));
    }

    #[test]
    fn validate_weights_empty_input() {
        let validation = validate_weights(&[]);

        assert_eq!(validation.total_weight, 0.0);
        assert!(!validation.is_exactly_100);
        assert!(validation.message.contains("100"));
    }

    #[test]
    fn validate_weights_classification_is_exclusive_at_boundary() {
        // Rounded totals just off 100 must classify as under/over, never
        // exact.
        let under = validate_weights(&[row(99.99, None)]);
        assert!(!under.is_exactly_100);
        assert!(under.message.contains("still add"));

        let over = validate_weights(&[row(100.01, None)]);
        assert!(!over.is_exactly_100);
        assert!(over.message.contains("exceed"));

        let exact = validate_weights(&[row(100.0, None)]);
        assert!(exact.is_exactly_100);
        assert_eq!(exact.message, "Weights sum to 100%.");
    }

    #[test]
    fn remaining_weight_matches_clamped_complement() {
        // remaining = max(0, 100 - weight_done) across a spread of inputs
        let cases: Vec<Vec<Assessment>> = vec![
            vec![],
            vec![row(10.0, Some(50.0))],
            vec![row(55.5, Some(20.0)), row(44.5, Some(90.0))],
            vec![row(80.0, Some(10.0)), row(70.0, Some(10.0))],
            vec![row(20.0, None), row(30.0, Some(60.0))],
        ];

        for rows in cases {
            let stats = current_stats(&rows);
            assert!(stats.weight_done >= 0.0);
            let expected = (100.0 - stats.weight_done).max(0.0);
            assert!((stats.remaining_weight - expected).abs() < 1e-9);
        }
    }
}
