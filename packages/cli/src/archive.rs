//! Files an intake PDF under its derived archive name.

use std::path::{Path, PathBuf};

use intake_robot::{PatientRecord, format_filename};

/// Copies `source` into `dest_dir` as `{LAST}_{FIRST}_{DOB}.pdf`.
///
/// Creates `dest_dir` if needed and overwrites an existing file of the same
/// name. When `source` already is that file nothing is copied. Returns the
/// destination path.
///
/// # Errors
///
/// Returns an I/O error if the directory cannot be created or the copy
/// fails.
pub fn archive_document(
    source: &Path,
    dest_dir: &Path,
    record: &PatientRecord,
) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dest_dir)?;

    let dest = dest_dir.join(format_filename(record));
    if dest.exists() {
        if source.canonicalize()? == dest.canonicalize()? {
            log::info!("{} is already archived", dest.display());
            return Ok(dest);
        }
        log::warn!("Overwriting existing archive file {}", dest.display());
    }

    std::fs::copy(source, &dest)?;

    log::info!("Archived {} to {}", source.display(), dest.display());

    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_under_derived_name() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("scan_0001.pdf");
        std::fs::write(&source, b"%PDF-1.5").unwrap();
        let record = PatientRecord {
            first_name: "Jane".to_owned(),
            last_name: "Doe".to_owned(),
            dob: "02/14/1990".to_owned(),
            ..PatientRecord::default()
        };

        let dest = archive_document(&source, &dir.path().join("filed"), &record).unwrap();

        assert_eq!(dest, dir.path().join("filed").join("DOE_JANE_02141990.pdf"));
        assert_eq!(std::fs::read(&dest).unwrap(), b"%PDF-1.5");
        assert!(source.exists());
    }

    #[test]
    fn already_archived_file_is_left_intact() {
        let dir = tempfile::tempdir().unwrap();
        let filed = dir.path().join("DOE_JANE_02141990.pdf");
        std::fs::write(&filed, b"%PDF-1.5 contents").unwrap();
        let record = PatientRecord {
            first_name: "Jane".to_owned(),
            last_name: "Doe".to_owned(),
            dob: "02/14/1990".to_owned(),
            ..PatientRecord::default()
        };

        let dest = archive_document(&filed, dir.path(), &record).unwrap();

        assert_eq!(dest, filed);
        assert_eq!(std::fs::read(&filed).unwrap(), b"%PDF-1.5 contents");
    }

    #[test]
    fn same_file_through_relative_path_is_left_intact() {
        let dir = tempfile::tempdir().unwrap();
        let filed = dir.path().join("UNKNOWN_PATIENT_01011970.pdf");
        std::fs::write(&filed, b"%PDF-1.5").unwrap();
        let via_dot = dir.path().join(".").join("UNKNOWN_PATIENT_01011970.pdf");

        archive_document(&via_dot, dir.path(), &PatientRecord::default()).unwrap();

        assert_eq!(std::fs::read(&filed).unwrap(), b"%PDF-1.5");
    }

    #[test]
    fn missing_source_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = archive_document(
            &dir.path().join("absent.pdf"),
            dir.path(),
            &PatientRecord::default(),
        );
        assert!(result.is_err());
    }
}
