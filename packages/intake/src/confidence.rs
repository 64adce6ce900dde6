//! Completeness scoring for normalized records.
//!
//! Confidence is the share of the eight fields that hold a non-empty value
//! after normalization. Sentinel dates and phones count as filled, so the
//! score measures presence, not correctness.

use intake_robot_models::{PatientField, PatientRecord};

/// Completeness ratio of `record`, rounded to two decimals.
///
/// Rounds half to even at the second decimal: `1/8` scores `0.12` and
/// `3/8` scores `0.38`.
#[must_use]
pub fn score(record: &PatientRecord) -> f64 {
    let filled = PatientField::ALL
        .iter()
        .filter(|&&field| !record.get(field).is_empty())
        .count();

    ratio_hundredths(filled, PatientField::ALL.len())
}

/// `numerator / denominator` rounded half to even to two decimals.
///
/// Computed in integer hundredths so exact ties (`0.125`) are detected
/// without floating point error.
#[allow(clippy::cast_precision_loss)]
fn ratio_hundredths(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }

    let scaled = numerator * 100;
    let mut hundredths = scaled / denominator;
    let twice_remainder = (scaled % denominator) * 2;

    if twice_remainder > denominator || (twice_remainder == denominator && hundredths % 2 == 1) {
        hundredths += 1;
    }

    hundredths as f64 / 100.0
}
