//! Suitability score grading.
//!
//! Scores are nominally 0-100 but any real number is accepted: everything
//! at or above the top threshold is an `A` and everything below the bottom
//! one is a `D`.

use solar_scan_estimate_models::{Grade, ScoreColor, SuitabilityGrade};
use strum::IntoEnumIterator;

/// Letter grade for a suitability score. `NaN` grades as [`Grade::D`].
///
/// Grades are tried best first; the first whose [`Grade::min_score`] the
/// score reaches wins.
#[must_use]
pub fn grade_for_score(score: f64) -> Grade {
    Grade::iter()
        .find(|grade| grade.min_score().is_none_or(|min| score >= min))
        .unwrap_or(Grade::D)
}

/// Grade, label and color for a suitability score.
#[must_use]
pub fn get_grade_from_score(score: f64) -> SuitabilityGrade {
    grade_for_score(score).into()
}

/// Color bucket for any 0-100 score shown on the dashboard.
///
/// Uses the same thresholds as the grades.
#[must_use]
pub fn score_color(score: f64) -> ScoreColor {
    grade_for_score(score).color()
}
