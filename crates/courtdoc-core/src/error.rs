//! Error types for extraction and opinion parsing.
//!
//! Errors fall in two groups. Fatal errors abort the single document being
//! processed and are returned as `Err`: an unknown declared format, an XML
//! document that cannot be parsed even after repair, and an opinion whose
//! court cannot be resolved. Recoverable errors (decoding, tool invocation,
//! OCR) are folded into [`ExtractionResult::error`](crate::ExtractionResult)
//! by the orchestrator and never escape `extract`.

use thiserror::Error;

/// Error types that can occur while extracting or parsing a court document.
///
/// # Examples
///
/// ```rust
/// use courtdoc_core::CourtdocError;
///
/// let err = CourtdocError::FormatUnsupported("xyz".to_string());
/// assert!(err.is_fatal());
/// assert_eq!(err.to_string(), "Unsupported format: xyz");
/// ```
#[derive(Error, Debug)]
pub enum CourtdocError {
    /// The declared format is not one of the supported extraction formats.
    ///
    /// Dispatch never falls through to a default extractor; no partial
    /// result is produced.
    #[error("Unsupported format: {0}")]
    FormatUnsupported(String),

    /// No encoding in the attempted list could decode the input bytes.
    #[error("Unable to decode content: {0}")]
    DecodeFailure(String),

    /// An external tool could not be started, or exited unsuccessfully
    /// without producing usable output.
    #[error("Tool invocation failed ({tool}): {message}")]
    ToolInvocation {
        /// Program name as configured
        tool: String,
        /// Diagnostics from the tool or the OS
        message: String,
    },

    /// Rasterization or recognition failed during OCR.
    #[error("OCR failed: {0}")]
    Ocr(String),

    /// The opinion XML could not be parsed, even after the one-shot repair.
    #[error("XML structural error: {0}")]
    XmlStructure(String),

    /// No court table matched the raw court string.
    #[error("Failed to find a court ID for \"{0}\"")]
    CourtResolution(String),

    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error bubbled up from a format-specific parser.
    #[error("Parser error: {0}")]
    ParserError(#[from] anyhow::Error),
}

impl CourtdocError {
    /// Build a [`CourtdocError::ToolInvocation`].
    #[inline]
    #[must_use = "the error should be returned or logged"]
    pub fn tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ToolInvocation {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Whether this error aborts the document rather than degrading the result.
    #[inline]
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::FormatUnsupported(_) | Self::XmlStructure(_) | Self::CourtResolution(_)
        )
    }
}

/// Type alias for [`Result<T, CourtdocError>`].
pub type Result<T> = std::result::Result<T, CourtdocError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_unsupported_display() {
        let error = CourtdocError::FormatUnsupported("xyz".to_string());
        assert_eq!(format!("{error}"), "Unsupported format: xyz");
    }

    #[test]
    fn test_court_resolution_display() {
        let error = CourtdocError::CourtResolution("Court of Nowhere".to_string());
        assert_eq!(
            error.to_string(),
            "Failed to find a court ID for \"Court of Nowhere\""
        );
    }

    #[test]
    fn test_tool_helper() {
        let error = CourtdocError::tool("antiword", "exit status 1");
        match &error {
            CourtdocError::ToolInvocation { tool, message } => {
                assert_eq!(tool, "antiword");
                assert_eq!(message, "exit status 1");
            }
            _ => panic!("Expected ToolInvocation variant"),
        }
        assert!(error.to_string().contains("antiword"));
    }

    #[test]
    fn test_fatal_classification() {
        assert!(CourtdocError::FormatUnsupported("x".into()).is_fatal());
        assert!(CourtdocError::XmlStructure("x".into()).is_fatal());
        assert!(CourtdocError::CourtResolution("x".into()).is_fatal());
        assert!(!CourtdocError::DecodeFailure("x".into()).is_fatal());
        assert!(!CourtdocError::Ocr("x".into()).is_fatal());
        assert!(!CourtdocError::tool("gs", "x").is_fatal());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CourtdocError = io_err.into();
        match err {
            CourtdocError::IoError(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            _ => panic!("Expected IoError variant"),
        }
    }

    #[test]
    fn test_parser_error_from_anyhow() {
        let err: CourtdocError = anyhow::anyhow!("wpd2html exploded").into();
        assert!(matches!(err, CourtdocError::ParserError(_)));
        assert!(err.to_string().contains("wpd2html exploded"));
    }

    #[test]
    fn test_error_size() {
        let size = std::mem::size_of::<CourtdocError>();
        assert!(
            size < 256,
            "CourtdocError size is {size} bytes, consider boxing large variants"
        );
    }
}
