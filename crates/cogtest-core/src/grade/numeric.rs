//! Numeric grading with a tolerance band and a continuous near-miss decay.
//!
//! Inside the band the answer is fully correct. Outside it, correctness is
//! `exp(-overage / scale)` where `overage = diff - tolerance` and
//! `scale = max(2% of |expected|, 10 * tolerance, 1e-6)`.

use crate::hashing::decimal_places_of;
use crate::model::{ArithItem, ItemResult};

const RELATIVE_SCALE: f64 = 0.02;
const TOLERANCE_SCALE: f64 = 10.0;
const MIN_SCALE: f64 = 1e-6;
/// Slack for representation error when a difference lands on the band edge.
const EDGE_EPSILON: f64 = 1e-9;

/// Parse a submitted number; `None` for blank or unparsable input.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Correctness for an absolute difference, given the band and expected value.
pub fn near_miss_credit(diff: f64, tolerance: f64, expected: f64) -> f64 {
    let tolerance = tolerance.max(0.0);
    if diff <= tolerance + EDGE_EPSILON * expected.abs().max(1.0) {
        return 1.0;
    }
    let scale = (RELATIVE_SCALE * expected.abs())
        .max(TOLERANCE_SCALE * tolerance)
        .max(MIN_SCALE);
    (-(diff - tolerance) / scale).exp()
}

pub fn grade_numeric(item: &ArithItem, raw: &str) -> ItemResult {
    let Some(submitted) = parse_number(raw) else {
        return ItemResult::new(&item.id, 0.0, "No answer submitted.");
    };
    let Some(expected) = parse_number(&item.expected) else {
        tracing::warn!(item = %item.id, expected = %item.expected, "unparseable expected value");
        return ItemResult::new(&item.id, 0.0, "Item has no numeric key.");
    };

    let diff = (submitted - expected).abs();
    let correctness = near_miss_credit(diff, item.tolerance, expected);
    let places = decimal_places_of(&item.expected) as usize + 1;
    let feedback = if correctness >= 1.0 {
        format!("Correct (difference {diff:.places$}).")
    } else {
        format!(
            "Off by a difference of {diff:.places$} (tolerance {:.places$}).",
            item.tolerance
        )
    };
    ItemResult::new(&item.id, correctness, feedback)
}
