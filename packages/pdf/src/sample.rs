//! Synthetic intake forms for local dry runs.
//!
//! Writes a single-page PDF with one `Label: value` line per entry, set in
//! the standard Helvetica font so [`pdf_extract`] can read it back without
//! embedded font data.

use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use crate::PdfError;

/// File name used for the generated sample form.
pub const SAMPLE_FILE_NAME: &str = "intake_sample.pdf";

/// Canned content of the sample intake form.
pub const SAMPLE_LINES: &[&str] = &[
    "First Name: Jane",
    "Last Name: Doe",
    "DOB: 02/14/1990",
    "Phone: (555) 123-4567",
    "Email: jane.doe@example.com",
    "Insurance: Best Health Co",
    "Member ID: A123456789",
    "Referring Physician: Dr. Smith",
];

const FONT_SIZE: i64 = 12;
const LINE_HEIGHT: i64 = 20;
const PAGE_WIDTH: i64 = 612;
const PAGE_HEIGHT: i64 = 792;
const MARGIN: i64 = 72;

/// Builds a one-page PDF containing `lines` top to bottom.
///
/// # Errors
///
/// Returns [`PdfError::Write`] if the content stream or document cannot be
/// encoded.
pub fn write_intake_pdf(lines: &[&str]) -> Result<Vec<u8>, PdfError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), FONT_SIZE.into()]),
        Operation::new("Td", vec![MARGIN.into(), (PAGE_HEIGHT - MARGIN).into()]),
    ];
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            operations.push(Operation::new("Td", vec![0.into(), (-LINE_HEIGHT).into()]));
        }
        operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
    }
    operations.push(Operation::new("ET", vec![]));

    let content = Content { operations }
        .encode()
        .map_err(|e| PdfError::Write(format!("failed to encode content stream: {e}")))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, content));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf)
        .map_err(|e| PdfError::Write(format!("failed to serialize PDF: {e}")))?;

    log::debug!("Built {}-line intake PDF ({} bytes)", lines.len(), buf.len());

    Ok(buf)
}

/// Ensures `target_dir` contains a sample intake form and returns its path.
///
/// The directory is created if needed. An existing sample is left as-is.
///
/// # Errors
///
/// Returns [`PdfError::Io`] if the directory or file cannot be written, or
/// [`PdfError::Write`] if the PDF cannot be built.
pub fn ensure_sample_pdf(target_dir: impl AsRef<Path>) -> Result<PathBuf, PdfError> {
    let dir = target_dir.as_ref();
    std::fs::create_dir_all(dir)?;

    let sample = dir.join(SAMPLE_FILE_NAME);
    if sample.exists() {
        log::debug!("Sample intake PDF already present at {}", sample.display());
        return Ok(sample);
    }

    let bytes = write_intake_pdf(SAMPLE_LINES)?;
    std::fs::write(&sample, bytes)?;

    log::info!("Wrote sample intake PDF to {}", sample.display());

    Ok(sample)
}
