//! Extraction boundary: pull per-page text and tables out of a document.
//!
//! The crate treats raw PDF parsing as a black-box collaborator behind the
//! [`PageExtractor`] trait. The bundled [`PdfTextExtractor`] recovers page
//! text via `pdf-extract`; richer backends (table-aware extractors, OCR
//! pipelines) implement the same trait and plug into
//! [`crate::pipeline::segment::extract_and_segment`] unchanged. Tests use
//! scripted extractors to drive the pipeline without touching a file.

use crate::document::RawPage;
use crate::error::StatementError;
use std::path::Path;
use tracing::debug;

/// Source of raw pages for one document.
///
/// Failure is document-level by contract: an implementation either yields
/// every page or reports one [`StatementError::Extraction`]; there is no
/// partial page list.
pub trait PageExtractor: Send + Sync {
    fn extract_pages(&self, path: &Path) -> Result<Vec<RawPage>, StatementError>;
}

/// Text-only extractor backed by `pdf-extract`.
///
/// Table recovery is not part of this backend; its pages carry empty table
/// lists and all content flows through line classification, which is also
/// the fallback path when a table-aware backend finds nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl PageExtractor for PdfTextExtractor {
    fn extract_pages(&self, path: &Path) -> Result<Vec<RawPage>, StatementError> {
        if !path.exists() {
            return Err(StatementError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let pages =
            pdf_extract::extract_text_by_pages(path).map_err(|e| StatementError::Extraction {
                detail: e.to_string(),
            })?;

        debug!("extracted {} pages from {}", pages.len(), path.display());

        Ok(pages
            .into_iter()
            .map(|text| RawPage {
                text,
                tables: Vec::new(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_file_not_found() {
        let err = PdfTextExtractor
            .extract_pages(Path::new("/nonexistent/statement.pdf"))
            .unwrap_err();
        assert!(matches!(err, StatementError::FileNotFound { .. }));
    }

    #[test]
    fn garbage_bytes_surface_as_extraction_error() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), b"not a pdf at all").unwrap();
        let err = PdfTextExtractor.extract_pages(tmp.path()).unwrap_err();
        assert!(matches!(err, StatementError::Extraction { .. }));
    }
}
