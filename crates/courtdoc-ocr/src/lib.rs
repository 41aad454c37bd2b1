//! Optical Character Recognition (OCR) fallback for courtdoc
//!
//! Scanned opinions arrive as PDFs with no text layer, or with a thin layer
//! over page images. This crate turns such a PDF back into text.
//!
//! # Architecture
//!
//! The pipeline has three stages, each a separate module:
//! 1. **Rasterize** ([`raster`]): ghostscript renders every page into one
//!    multi-page grayscale TIFF (300 DPI, LZW) inside a scoped temp file.
//!    `-dSAFER` keeps ghostscript away from any path not on its command line.
//! 2. **Recognize** ([`recognize`]): tesseract reads the TIFF, English only,
//!    and writes the text to stdout.
//! 3. **Clean up** ([`cleanup`]): a short literal replacement table fixes
//!    misreads that OCR makes systematically on court documents.
//!
//! The raster image is deleted when [`raster::RasterImage`] is dropped, on
//! success and on every failure path.
//!
//! # Example
//!
//! ```rust,no_run
//! use courtdoc_core::ToolConfig;
//! use courtdoc_ocr::OcrEngine;
//! use std::path::Path;
//!
//! let engine = OcrEngine::new(ToolConfig::default());
//! let recognition = engine.recognize(Path::new("scanned.pdf"));
//! if recognition.success {
//!     println!("{}", recognition.text);
//! }
//! ```

pub mod cleanup;
pub mod raster;
pub mod recognize;

pub use cleanup::cleanup_ocr_text;
pub use raster::RasterImage;

use courtdoc_core::{CourtdocError, ToolConfig, READ_THE_ORIGINAL};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// OCR-specific errors
#[derive(Error, Debug)]
pub enum OcrError {
    /// Ghostscript could not be started or exited unsuccessfully
    #[error("Rasterization failed: {0}")]
    RasterizeError(String),

    /// Tesseract could not be started or failed without output
    #[error("Recognition failed: {0}")]
    RecognitionError(String),

    /// Temporary raster file could not be created
    #[error("Temporary file error: {0}")]
    TempFileError(#[from] std::io::Error),
}

impl From<OcrError> for CourtdocError {
    #[inline]
    fn from(err: OcrError) -> Self {
        Self::Ocr(err.to_string())
    }
}

/// Outcome of one OCR attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recognition {
    /// Whether OCR produced text
    pub success: bool,
    /// Recognized text, or a user-facing message when `success` is false
    pub text: String,
}

impl Recognition {
    /// Successful recognition
    #[inline]
    #[must_use]
    pub fn succeeded(text: String) -> Self {
        Self {
            success: true,
            text,
        }
    }

    /// Failed recognition, carrying the user-facing sentinel text
    #[inline]
    #[must_use]
    pub fn failed() -> Self {
        Self {
            success: false,
            text: READ_THE_ORIGINAL.to_string(),
        }
    }
}

/// OCR engine driving ghostscript and tesseract
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OcrEngine {
    tools: ToolConfig,
}

impl OcrEngine {
    /// Create an engine using the given tool configuration
    #[inline]
    #[must_use]
    pub const fn new(tools: ToolConfig) -> Self {
        Self { tools }
    }

    /// Tool configuration in use
    #[inline]
    #[must_use]
    pub const fn tools(&self) -> &ToolConfig {
        &self.tools
    }

    /// Run the whole pipeline, returning the raw error on failure
    ///
    /// # Errors
    /// Returns [`OcrError`] if rasterization or recognition fails.
    pub fn try_recognize(&self, pdf_path: &Path) -> Result<String, OcrError> {
        let raster = raster::rasterize_pdf(pdf_path, &self.tools)?;
        let text = recognize::recognize_image(raster.path(), &self.tools)?;
        Ok(cleanup_ocr_text(&text))
    }

    /// Recognize the text of a PDF.
    ///
    /// Never fails: tool diagnostics are logged and replaced with a fixed
    /// user-facing message.
    #[must_use = "recognition result should be used"]
    pub fn recognize(&self, pdf_path: &Path) -> Recognition {
        match self.try_recognize(pdf_path) {
            Ok(text) => {
                info!("OCR extracted {} chars from {}", text.len(), pdf_path.display());
                Recognition::succeeded(text)
            }
            Err(e) => {
                warn!("OCR failed for {}: {e}", pdf_path.display());
                Recognition::failed()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_recognition_uses_sentinel() {
        let recognition = Recognition::failed();
        assert!(!recognition.success);
        assert_eq!(recognition.text, READ_THE_ORIGINAL);
    }

    #[test]
    fn test_missing_ghostscript_fails_softly() {
        let engine = OcrEngine::new(ToolConfig {
            ghostscript: "courtdoc-missing-gs".to_string(),
            ..ToolConfig::default()
        });
        let recognition = engine.recognize(Path::new("/nonexistent/scan.pdf"));
        assert!(!recognition.success);
        assert_eq!(recognition.text, READ_THE_ORIGINAL);
    }

    #[test]
    fn test_ocr_error_into_courtdoc_error() {
        let err: CourtdocError = OcrError::RasterizeError("gs exited with 1".into()).into();
        assert!(matches!(err, CourtdocError::Ocr(ref m) if m.contains("gs exited")));
    }
}
