//! Extraction orchestrator
//!
//! Dispatches a document to its format backend by declared extension and
//! folds every recoverable problem into [`ExtractionResult::error`]. Only an
//! unknown format, or a file that cannot be read at all, is returned as `Err`.

use crate::html::{clean_body_content, is_not_for_publication};
use crate::pdf::{PdfBackend, RecapExtraction};
use crate::{DocxBackend, HtmlBackend, TextBackend};
use courtdoc_core::{
    scoped_temp_file, CourtdocError, DocumentFormat, ExtractionResult, Result, ToolConfig,
};
use courtdoc_legacy::{DocBackend, WpdBackend};
use courtdoc_ocr::OcrEngine;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use std::time::Instant;

/// Error reported for zero-byte input
pub const EMPTY_FILE: &str = "empty file";

/// Orchestrator defaults
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Fall back to OCR for scanned PDFs
    pub ocr: bool,
}

/// Text extractor for every supported document format
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentExtractor {
    engine: OcrEngine,
}

impl DocumentExtractor {
    /// Create an extractor using the given external tools
    #[inline]
    #[must_use]
    pub const fn new(tools: ToolConfig) -> Self {
        Self {
            engine: OcrEngine::new(tools),
        }
    }

    /// External tools in use
    #[inline]
    #[must_use]
    pub const fn tools(&self) -> &ToolConfig {
        self.engine.tools()
    }

    /// Extract a document whose format is given by its declared extension.
    ///
    /// # Errors
    /// [`CourtdocError::FormatUnsupported`] for an unknown extension (no
    /// result is produced), or an IO error if the file cannot be read.
    #[must_use = "extraction produces a result that should be handled"]
    pub fn extract(
        &self,
        path: &Path,
        declared: &str,
        ocr_enabled: bool,
    ) -> Result<ExtractionResult> {
        let format = parse_declared(declared, path)?;
        self.extract_format(path, format, ocr_enabled)
    }

    /// Extract a document of a known format.
    ///
    /// # Errors
    /// Returns an IO error if the file cannot be read.
    #[must_use = "extraction produces a result that should be handled"]
    pub fn extract_format(
        &self,
        path: &Path,
        format: DocumentFormat,
        ocr_enabled: bool,
    ) -> Result<ExtractionResult> {
        if std::fs::metadata(path)?.len() == 0 {
            warn!("{} is empty", path.display());
            return Ok(ExtractionResult::failed(EMPTY_FILE));
        }

        let start = Instant::now();
        let tools = self.tools();
        let result = match format {
            DocumentFormat::Doc => fold_legacy(DocBackend::extract_text(path, tools)),
            DocumentFormat::Docx => fold(DocxBackend::extract_text(path, tools)),
            DocumentFormat::Html => fold(HtmlBackend::extract_text(path)),
            DocumentFormat::Pdf => PdfBackend::extract(path, &self.engine, ocr_enabled)?,
            DocumentFormat::Txt => fold(TextBackend::extract_text(path)),
            DocumentFormat::Wpd => Self::extract_wpd(path, tools),
        };

        info!(
            "Extracted {} chars from {} ({format}) in {:.2?}{}",
            result.text.chars().count(),
            path.display(),
            start.elapsed(),
            if result.ocr_used { ", via OCR" } else { "" }
        );
        if let Some(message) = &result.error {
            warn!("Error extracting text from {format} {}: {message}", path.display());
        }
        Ok(result)
    }

    /// Extract in-memory document bytes.
    ///
    /// The bytes are written to a temporary `extract_file_*.<ext>` file that
    /// is removed before returning.
    ///
    /// # Errors
    /// Same as [`DocumentExtractor::extract`], plus IO errors from the
    /// temporary file.
    #[must_use = "extraction produces a result that should be handled"]
    pub fn extract_bytes(
        &self,
        data: &[u8],
        declared: &str,
        ocr_enabled: bool,
    ) -> Result<ExtractionResult> {
        let format = parse_declared(declared, Path::new("<bytes>"))?;
        let mut tmp = scoped_temp_file("extract_file_", &format!(".{}", format.extension()))?;
        tmp.write_all(data)?;
        tmp.flush()?;
        self.extract_format(tmp.path(), format, ocr_enabled)
    }

    /// Extract a filed (RECAP) PDF, reporting what happened with OCR
    #[must_use = "extraction produces a result that should be handled"]
    pub fn extract_recap_pdf(&self, path: &Path, skip_ocr: bool) -> RecapExtraction {
        let extraction = PdfBackend::extract_recap(path, &self.engine, skip_ocr);
        info!(
            "RECAP extraction of {}: OCR {}",
            path.display(),
            extraction.ocr_status
        );
        extraction
    }

    /// `wpd2html`, then body cleanup, then the publication check
    fn extract_wpd(path: &Path, tools: &ToolConfig) -> ExtractionResult {
        match WpdBackend::convert_to_html(path, tools) {
            Ok((html, advisory)) => {
                let text = clean_body_content(&html);
                let downgrade_to_unpublished = is_not_for_publication(&text);
                if downgrade_to_unpublished {
                    info!("{} is marked not for publication", path.display());
                }
                ExtractionResult {
                    text,
                    ocr_used: false,
                    error: advisory,
                    downgrade_to_unpublished,
                }
            }
            Err(e) => ExtractionResult::failed(format!("{e:#}")),
        }
    }
}

fn parse_declared(declared: &str, path: &Path) -> Result<DocumentFormat> {
    DocumentFormat::from_extension(declared).ok_or_else(|| {
        error!(
            "Unable to extract content due to unknown extension: {declared} on {}",
            path.display()
        );
        CourtdocError::FormatUnsupported(declared.to_string())
    })
}

fn fold(outcome: Result<(String, Option<String>)>) -> ExtractionResult {
    match outcome {
        Ok((text, advisory)) => ExtractionResult::from_text(text).with_error(advisory),
        Err(e) => ExtractionResult::failed(e.to_string()),
    }
}

fn fold_legacy(outcome: anyhow::Result<(String, Option<String>)>) -> ExtractionResult {
    match outcome {
        Ok((text, advisory)) => ExtractionResult::from_text(text).with_error(advisory),
        Err(e) => ExtractionResult::failed(format!("{e:#}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn file_with(suffix: &str, data: &[u8]) -> NamedTempFile {
        let mut temp = NamedTempFile::with_suffix(suffix).unwrap();
        temp.write_all(data).unwrap();
        temp.flush().unwrap();
        temp
    }

    #[test]
    fn test_unknown_format_is_fatal() {
        let temp = file_with(".rtf", b"{\\rtf1}");
        let err = DocumentExtractor::default()
            .extract(temp.path(), "rtf", false)
            .unwrap_err();
        assert!(matches!(err, CourtdocError::FormatUnsupported(ref ext) if ext == "rtf"));
    }

    #[test]
    fn test_empty_file_for_every_format() {
        let extractor = DocumentExtractor::default();
        for format in DocumentFormat::ALL {
            let temp = file_with(&format!(".{}", format.extension()), b"");
            let result = extractor.extract_format(temp.path(), format, true).unwrap();
            assert_eq!(result.error.as_deref(), Some(EMPTY_FILE), "{format}");
            assert!(result.text.is_empty());
        }
    }

    #[test]
    fn test_txt_dispatch() {
        let temp = file_with(".txt", b"Affirmed.\n");
        let result = DocumentExtractor::default()
            .extract(temp.path(), "txt", false)
            .unwrap();
        assert_eq!(result.text, "Affirmed.\n");
        assert!(!result.has_error());
        assert!(!result.ocr_used);
    }

    #[test]
    fn test_missing_tool_is_folded_into_error() {
        let tools = ToolConfig {
            antiword: "courtdoc-missing-antiword".to_string(),
            ..ToolConfig::default()
        };
        let temp = file_with(".doc", b"not really a doc");
        let result = DocumentExtractor::new(tools)
            .extract(temp.path(), "doc", false)
            .unwrap();
        assert!(result.text.is_empty());
        assert!(result.error.unwrap().contains("failed to start"));
    }

    #[test]
    fn test_extract_bytes_html() {
        let result = DocumentExtractor::default()
            .extract_bytes(b"<p>Per curiam.</p>", "html", false)
            .unwrap();
        assert_eq!(result.text, "<p>Per curiam.</p>");
    }

    #[test]
    fn test_extract_bytes_unknown_format() {
        assert!(DocumentExtractor::default()
            .extract_bytes(b"data", "exe", false)
            .is_err());
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(DocumentExtractor::default()
            .extract(Path::new("/nonexistent/opinion.txt"), "txt", false)
            .is_err());
    }
}
