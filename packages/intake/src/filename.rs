//! Archive filename derivation.
//!
//! Filed intake PDFs are named `{LAST}_{FIRST}_{DOBDIGITS}.pdf` using only
//! uppercase ASCII letters, digits and underscores so the name is safe on
//! any filesystem the downstream automation writes to.

use std::sync::LazyLock;

use intake_robot_models::PatientRecord;
use regex::Regex;

/// Last-name slug used when the record has no usable last name.
pub const UNKNOWN_LAST_NAME: &str = "UNKNOWN";

/// First-name slug used when the record has no usable first name.
pub const UNKNOWN_FIRST_NAME: &str = "PATIENT";

/// DOB digits used when the date of birth contains no digits.
pub const UNKNOWN_DOB_DIGITS: &str = "01011970";

static NON_ALNUM_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]+").expect("valid regex"));

static NON_DIGIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\D").expect("valid regex"));

/// Converts free text into an uppercase, underscore-delimited slug.
///
/// Every run of non-alphanumeric characters collapses to one underscore
/// and leading/trailing underscores are dropped. May return an empty
/// string.
#[must_use]
pub fn slugify(value: &str) -> String {
    NON_ALNUM_RUN_RE
        .replace_all(value.trim(), "_")
        .trim_matches('_')
        .to_uppercase()
}

fn slug_or(value: &str, fallback: &str) -> String {
    let slug = slugify(value);
    if slug.is_empty() {
        fallback.to_owned()
    } else {
        slug
    }
}

/// Strips every non-digit from a date of birth, in whatever format it is.
#[must_use]
pub fn dob_digits(dob: &str) -> String {
    let digits = NON_DIGIT_RE.replace_all(dob, "");
    if digits.is_empty() {
        UNKNOWN_DOB_DIGITS.to_owned()
    } else {
        digits.into_owned()
    }
}

/// Derives the archive filename for `record`.
#[must_use]
pub fn format_filename(record: &PatientRecord) -> String {
    let last = slug_or(&record.last_name, UNKNOWN_LAST_NAME);
    let first = slug_or(&record.first_name, UNKNOWN_FIRST_NAME);
    let dob = dob_digits(&record.dob);

    format!("{last}_{first}_{dob}.pdf")
}

/// Derives the archive filename from a record payload.
///
/// Missing keys are treated as empty and fall back to the same sentinels
/// as [`format_filename`].
#[must_use]
pub fn format_filename_from_payload(
    payload: &serde_json::Map<String, serde_json::Value>,
) -> String {
    format_filename(&PatientRecord::from_payload(payload))
}
