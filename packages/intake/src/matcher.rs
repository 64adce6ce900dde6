//! Label-based field matching against intake document text.
//!
//! Each [`PatientField`] has a case-insensitive pattern of the form
//! `Label:\s*(.+)` applied against the full document text. The first match
//! in document order wins and its capture is trimmed; fields with no match
//! are empty strings.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use intake_robot_models::PatientField;
use regex::Regex;

/// Compiled pattern per field, in [`PatientField::ALL`] order.
static FIELD_PATTERNS: LazyLock<Vec<(PatientField, Regex)>> = LazyLock::new(|| {
    PatientField::ALL
        .iter()
        .map(|&field| {
            let pattern = format!(r"(?i){}:\s*(.+)", regex::escape(field.label()));
            (field, Regex::new(&pattern).expect("valid regex"))
        })
        .collect()
});

/// Raw, un-normalized values for every field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFields(BTreeMap<PatientField, String>);

impl RawFields {
    /// Raw value matched for `field`, or `""` if the label never appeared.
    #[must_use]
    pub fn get(&self, field: PatientField) -> &str {
        self.0.get(&field).map_or("", String::as_str)
    }

    /// Sets the raw value for `field`.
    pub fn set(&mut self, field: PatientField, value: impl Into<String>) {
        self.0.insert(field, value.into());
    }

    /// Number of fields whose label was found with a non-empty value.
    #[must_use]
    pub fn matched(&self) -> usize {
        self.0.values().filter(|v| !v.is_empty()).count()
    }
}

/// Matches every field against `text`.
///
/// All eight fields are always present in the result. Repeated labels are
/// not deduplicated beyond taking the first occurrence.
#[must_use]
pub fn match_fields(text: &str) -> RawFields {
    let mut fields = RawFields::default();

    for (field, re) in FIELD_PATTERNS.iter() {
        let value = re
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .unwrap_or_default();

        log::debug!("Field {field} matched {value:?}");

        fields.set(*field, value);
    }

    log::debug!(
        "Matched {}/{} fields from {} characters of text",
        fields.matched(),
        PatientField::ALL.len(),
        text.len()
    );

    fields
}
