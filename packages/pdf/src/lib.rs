#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! PDF text extraction for patient intake forms.
//!
//! Intake forms arrive as typed PDFs. This crate turns a document on disk
//! into per-page text using pure-Rust extraction ([`pdf_extract`]) and
//! exposes it through the [`PageSource`] trait so field matching never
//! depends on how the pages were decoded.
//!
//! The [`sample`] module writes a synthetic intake form for dry runs of the
//! filing automation.

pub mod sample;

use std::path::{Path, PathBuf};

/// Errors specific to reading or writing intake PDFs.
#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    /// The path does not resolve to an existing document.
    #[error("PDF not found at {}", path.display())]
    NotFound {
        /// Path that was requested.
        path: PathBuf,
    },

    /// PDF text extraction failed.
    #[error("PDF extraction error: {0}")]
    Extraction(String),

    /// Building or serializing a PDF failed.
    #[error("PDF write error: {0}")]
    Write(String),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A document whose text can be read one page at a time.
pub trait PageSource {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Text of the zero-based `page`, or `None` if the page is missing or
    /// has no readable text.
    fn extract_text(&self, page: usize) -> Option<String>;
}

/// Concatenates the text of every page in order, joined by newlines.
///
/// Pages without text contribute an empty string so page boundaries are
/// preserved.
#[must_use]
pub fn document_text(source: &impl PageSource) -> String {
    (0..source.page_count())
        .map(|page| source.extract_text(page).unwrap_or_default())
        .collect::<Vec<_>>()
        .join("\n")
}

/// An intake PDF whose pages have been decoded to text.
#[derive(Debug, Clone)]
pub struct PdfDocument {
    pages: Vec<String>,
}

impl PdfDocument {
    /// Opens the PDF at `path` and extracts the text of every page.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::NotFound`] if `path` does not exist,
    /// [`PdfError::Io`] if it cannot be read, or [`PdfError::Extraction`]
    /// if the bytes are not a readable PDF.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PdfError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(PdfError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let bytes = std::fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => PdfError::NotFound {
                path: path.to_path_buf(),
            },
            _ => PdfError::Io(e),
        })?;

        log::debug!("Read {} bytes from {}", bytes.len(), path.display());

        Self::from_bytes(&bytes)
    }

    /// Extracts the text of every page from an in-memory PDF.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::Extraction`] if the bytes are not a readable PDF.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PdfError> {
        let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
            .map_err(|e| PdfError::Extraction(format!("failed to extract text from PDF: {e}")))?;

        log::debug!(
            "Extracted {} characters of text across {} page(s)",
            pages.iter().map(String::len).sum::<usize>(),
            pages.len()
        );

        Ok(Self { pages })
    }

    /// Full document text, pages joined by newlines.
    #[must_use]
    pub fn text(&self) -> String {
        document_text(self)
    }
}

impl PageSource for PdfDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn extract_text(&self, page: usize) -> Option<String> {
        self.pages.get(page).cloned()
    }
}
