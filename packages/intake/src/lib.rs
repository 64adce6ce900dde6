#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Patient intake field extraction.
//!
//! Reads a typed intake PDF, matches each labeled field, normalizes dates
//! and phone numbers into canonical US formats, and scores the record for
//! completeness:
//!
//! ```text
//! PDF → text → matcher::match_fields → normalize::normalize_record
//!     → confidence::score → PatientRecord
//! ```
//!
//! [`filename::format_filename`] derives the archive name for a record.
//! Every operation is a pure function of its input apart from reading the
//! document, so extractions can run concurrently without coordination.

pub mod confidence;
pub mod filename;
pub mod matcher;
pub mod normalize;

use std::path::{Path, PathBuf};

pub use filename::{format_filename, format_filename_from_payload};
pub use intake_robot_models::{PatientField, PatientRecord};
use intake_robot_pdf::{PageSource, PdfDocument, PdfError, document_text};

/// Errors that can occur while extracting an intake document.
///
/// Missing or unparsable fields are not errors; they resolve to empty
/// strings or sentinels and lower the confidence score instead.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    /// The path does not resolve to a readable document.
    #[error("PDF not found at {}", path.display())]
    DocumentNotFound {
        /// Path that was requested.
        path: PathBuf,
    },

    /// The document exists but its text could not be extracted.
    #[error("Unreadable PDF: {0}")]
    Unreadable(String),

    /// I/O error while reading the document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<PdfError> for IntakeError {
    fn from(e: PdfError) -> Self {
        match e {
            PdfError::NotFound { path } => Self::DocumentNotFound { path },
            PdfError::Io(e) => Self::Io(e),
            PdfError::Extraction(msg) | PdfError::Write(msg) => Self::Unreadable(msg),
        }
    }
}

/// Matches, normalizes and scores the fields in `text`.
#[must_use]
pub fn extract_from_text(text: &str) -> PatientRecord {
    let raw = matcher::match_fields(text);
    let mut record = normalize::normalize_record(&raw);
    record.confidence = confidence::score(&record);
    record
}

/// Extracts a record from every page of `source`.
#[must_use]
pub fn extract_from_source(source: &impl PageSource) -> PatientRecord {
    extract_from_text(&document_text(source))
}

/// Extracts a normalized, scored record from the intake PDF at `path`.
///
/// # Errors
///
/// Returns [`IntakeError::DocumentNotFound`] if `path` does not exist, or
/// [`IntakeError::Unreadable`]/[`IntakeError::Io`] if it cannot be read.
pub fn extract_patient_fields(path: impl AsRef<Path>) -> Result<PatientRecord, IntakeError> {
    let path = path.as_ref();
    let document = PdfDocument::open(path)?;
    let record = extract_from_source(&document);

    log::info!(
        "Extracted intake fields from {} (confidence {:.2})",
        path.display(),
        record.confidence
    );

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_robot_pdf::sample;

    struct Pages(Vec<Option<&'static str>>);

    impl PageSource for Pages {
        fn page_count(&self) -> usize {
            self.0.len()
        }

        fn extract_text(&self, page: usize) -> Option<String> {
            self.0.get(page).copied().flatten().map(str::to_owned)
        }
    }

    #[test]
    fn extracts_complete_form() {
        let record = extract_from_text(&sample::SAMPLE_LINES.join("\n"));

        assert_eq!(
            record,
            PatientRecord {
                first_name: "Jane".to_owned(),
                last_name: "Doe".to_owned(),
                dob: "02/14/1990".to_owned(),
                phone: "555-123-4567".to_owned(),
                email: "jane.doe@example.com".to_owned(),
                insurance: "Best Health Co".to_owned(),
                member_id: "A123456789".to_owned(),
                referring_physician: "Dr. Smith".to_owned(),
                confidence: 1.0,
            }
        );
        assert_eq!(format_filename(&record), "DOE_JANE_02141990.pdf");
    }

    #[test]
    fn text_without_labels_yields_sentinels() {
        let record = extract_from_text("Nothing useful on this page.");

        assert_eq!(record.first_name, "");
        assert_eq!(record.last_name, "");
        assert_eq!(record.dob, normalize::DOB_SENTINEL);
        assert_eq!(record.phone, normalize::PHONE_SENTINEL);
        assert_eq!(record.email, "");
        assert_eq!(record.insurance, "");
        assert_eq!(record.member_id, "");
        assert_eq!(record.referring_physician, "");
        // Sentinel dob and phone count as filled.
        assert!((record.confidence - 0.25).abs() < 1e-9);
        assert_eq!(format_filename(&record), "UNKNOWN_PATIENT_01011970.pdf");
    }

    #[test]
    fn payload_always_has_nine_keys() {
        let payload = extract_from_text("").to_payload();
        assert_eq!(payload.len(), 9);
        for field in PatientField::ALL {
            assert!(payload[field.to_string().as_str()].is_string());
        }
        assert!(payload["confidence"].is_number());
    }

    #[test]
    fn fields_split_across_pages() {
        let source = Pages(vec![
            Some("First Name: Jane\nLast Name: Doe"),
            None,
            Some("DOB: 1990-02-14\nPhone: 555 123 4567"),
        ]);

        let record = extract_from_source(&source);

        assert_eq!(record.first_name, "Jane");
        assert_eq!(record.dob, "02/14/1990");
        assert_eq!(record.phone, "555-123-4567");
        assert!((record.confidence - 0.5).abs() < 1e-9);
    }

    #[test]
    fn partial_form_scores_by_presence() {
        let record = extract_from_text(
            "First Name: Jane\nLast Name: Doe\nDOB: sometime\nPhone: 12345\nEmail: nope",
        );

        assert_eq!(record.dob, normalize::DOB_SENTINEL);
        assert_eq!(record.phone, "12345");
        assert_eq!(record.email, "nope");
        assert!((record.confidence - 0.62).abs() < 1e-9);
    }

    #[test]
    fn missing_document_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.pdf");

        let err = extract_patient_fields(&path).unwrap_err();

        assert!(matches!(err, IntakeError::DocumentNotFound { path: p } if p == path));
    }

    #[test]
    fn corrupt_document_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt.pdf");
        std::fs::write(&path, b"not a pdf").unwrap();

        assert!(matches!(
            extract_patient_fields(&path),
            Err(IntakeError::Unreadable(_))
        ));
    }

    #[test]
    fn extracts_from_sample_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = sample::ensure_sample_pdf(dir.path()).unwrap();

        let record = extract_patient_fields(&path).unwrap();

        assert_eq!(
            record,
            PatientRecord {
                first_name: "Jane".to_owned(),
                last_name: "Doe".to_owned(),
                dob: "02/14/1990".to_owned(),
                phone: "555-123-4567".to_owned(),
                email: "jane.doe@example.com".to_owned(),
                insurance: "Best Health Co".to_owned(),
                member_id: "A123456789".to_owned(),
                referring_physician: "Dr. Smith".to_owned(),
                confidence: 1.0,
            }
        );
        assert_eq!(format_filename(&record), "DOE_JANE_02141990.pdf");
    }
}
