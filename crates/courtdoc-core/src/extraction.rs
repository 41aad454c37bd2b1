//! Extraction output types
//!
//! An [`ExtractionResult`] is produced once per document version and is not
//! mutated after the orchestrator hands it back.

use serde::{Deserialize, Serialize};

/// Text substituted when neither direct extraction nor OCR produced anything
pub const UNABLE_TO_EXTRACT: &str = "Unable to extract document content.";

/// User-facing message returned when a file cannot be rasterized or cleaned
pub const READ_THE_ORIGINAL: &str =
    "Unable to extract the content from this file. Please try reading the original.";

/// Precedential status a caller should apply when the extractor asks for a downgrade
pub const UNPUBLISHED_STATUS: &str = "Unpublished";

/// Result of extracting text from one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Extracted text (may be empty)
    pub text: String,
    /// Whether the text came from OCR rather than direct extraction
    pub ocr_used: bool,
    /// Recoverable problem reported by the extractor, if any
    pub error: Option<String>,
    /// The document declares itself "not for publication"; the caller should
    /// set its precedential status to [`UNPUBLISHED_STATUS`]
    pub downgrade_to_unpublished: bool,
}

impl ExtractionResult {
    /// Successful extraction
    #[inline]
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Failed extraction: empty text plus an error description
    #[inline]
    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// Precedential status the caller should record, if the extractor
    /// requested a change
    #[inline]
    #[must_use]
    pub const fn precedential_status(&self) -> Option<&'static str> {
        if self.downgrade_to_unpublished {
            Some(UNPUBLISHED_STATUS)
        } else {
            None
        }
    }

    /// Attach an advisory error to an otherwise usable result
    #[inline]
    #[must_use]
    pub fn with_error(mut self, error: Option<String>) -> Self {
        self.error = error;
        self
    }

    /// Whether an error was reported
    #[inline]
    #[must_use]
    pub const fn has_error(&self) -> bool {
        self.error.is_some()
    }
}

/// OCR outcome for scanned PDFs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OcrStatus {
    /// The PDF had a usable text layer
    Unnecessary,
    /// OCR was required but skipped at the caller's request
    Needed,
    /// OCR ran and produced the text
    Complete,
    /// OCR was attempted and failed
    Failed,
}

impl std::fmt::Display for OcrStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Unnecessary => "unnecessary",
            Self::Needed => "needed",
            Self::Complete => "complete",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_has_empty_text() {
        let result = ExtractionResult::failed("boom");
        assert!(result.text.is_empty());
        assert!(result.has_error());
        assert!(!result.ocr_used);
    }

    #[test]
    fn test_from_text_has_no_error() {
        let result = ExtractionResult::from_text("Opinion text");
        assert_eq!(result.text, "Opinion text");
        assert!(!result.has_error());
        assert!(!result.downgrade_to_unpublished);
        assert_eq!(result.precedential_status(), None);
    }

    #[test]
    fn test_downgrade_reports_unpublished_status() {
        let result = ExtractionResult {
            downgrade_to_unpublished: true,
            ..ExtractionResult::from_text("NOT FOR PUBLICATION")
        };
        assert_eq!(result.precedential_status(), Some(UNPUBLISHED_STATUS));
    }

    #[test]
    fn test_ocr_status_serde() {
        assert_eq!(
            serde_json::to_string(&OcrStatus::Unnecessary).unwrap(),
            "\"unnecessary\""
        );
        assert_eq!(OcrStatus::Failed.to_string(), "failed");
    }
}
