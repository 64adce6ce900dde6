#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Patient intake record and field definitions.
//!
//! A [`PatientRecord`] is produced fresh for every intake document: each
//! [`PatientField`] is matched from the document text, normalized, and the
//! record is scored for completeness. Fields that were not found are empty
//! strings, never absent, so the record always converts to a payload with
//! the same nine keys.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString, IntoStaticStr};

/// Key used for the completeness score in a record payload.
pub const CONFIDENCE_KEY: &str = "confidence";

/// One named unit of patient data on the intake form.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PatientField {
    /// Patient given name
    FirstName,
    /// Patient family name
    LastName,
    /// Date of birth
    Dob,
    /// Contact phone number
    Phone,
    /// Contact email address
    Email,
    /// Insurance carrier name
    Insurance,
    /// Insurance member identifier
    MemberId,
    /// Name of the referring physician
    ReferringPhysician,
}

impl PatientField {
    /// Every field, in form order.
    pub const ALL: [Self; 8] = [
        Self::FirstName,
        Self::LastName,
        Self::Dob,
        Self::Phone,
        Self::Email,
        Self::Insurance,
        Self::MemberId,
        Self::ReferringPhysician,
    ];

    /// Label printed before the value on the intake form (without the
    /// trailing colon).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Dob => "DOB",
            Self::Phone => "Phone",
            Self::Email => "Email",
            Self::Insurance => "Insurance",
            Self::MemberId => "Member ID",
            Self::ReferringPhysician => "Referring Physician",
        }
    }
}

/// Parsed and normalized patient fields for a single intake document.
///
/// `dob` is canonical `MM/DD/YYYY` (or the `01/01/1970` sentinel) and
/// `phone` is `DDD-DDD-DDDD`, a bare digit string, or the `000-000-0000`
/// sentinel once the record has been normalized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Patient given name
    pub first_name: String,
    /// Patient family name
    pub last_name: String,
    /// Date of birth
    pub dob: String,
    /// Contact phone number
    pub phone: String,
    /// Contact email address, trimmed
    pub email: String,
    /// Insurance carrier name
    pub insurance: String,
    /// Insurance member identifier
    pub member_id: String,
    /// Name of the referring physician
    pub referring_physician: String,
    /// Completeness ratio in `[0, 1]`, rounded to two decimals.
    pub confidence: f64,
}

impl PatientRecord {
    /// Returns the value stored for `field`.
    #[must_use]
    pub fn get(&self, field: PatientField) -> &str {
        match field {
            PatientField::FirstName => &self.first_name,
            PatientField::LastName => &self.last_name,
            PatientField::Dob => &self.dob,
            PatientField::Phone => &self.phone,
            PatientField::Email => &self.email,
            PatientField::Insurance => &self.insurance,
            PatientField::MemberId => &self.member_id,
            PatientField::ReferringPhysician => &self.referring_physician,
        }
    }

    /// Converts the record into a key-value payload with exactly nine keys:
    /// the eight field names plus [`CONFIDENCE_KEY`].
    #[must_use]
    pub fn to_payload(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut map = serde_json::Map::new();
        for field in PatientField::ALL {
            map.insert(
                field.to_string(),
                serde_json::Value::String(self.get(field).to_owned()),
            );
        }
        map.insert(CONFIDENCE_KEY.to_owned(), serde_json::json!(self.confidence));
        map
    }

    /// Rebuilds a record from a payload.
    ///
    /// Missing or non-string field values become empty strings and a
    /// missing or non-numeric confidence becomes `0.0`.
    #[must_use]
    pub fn from_payload(payload: &serde_json::Map<String, serde_json::Value>) -> Self {
        let text = |field: PatientField| {
            let key: &'static str = field.into();
            payload
                .get(key)
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default()
                .to_owned()
        };

        Self {
            first_name: text(PatientField::FirstName),
            last_name: text(PatientField::LastName),
            dob: text(PatientField::Dob),
            phone: text(PatientField::Phone),
            email: text(PatientField::Email),
            insurance: text(PatientField::Insurance),
            member_id: text(PatientField::MemberId),
            referring_physician: text(PatientField::ReferringPhysician),
            confidence: payload
                .get(CONFIDENCE_KEY)
                .and_then(serde_json::Value::as_f64)
                .unwrap_or_default(),
        }
    }
}
