//! DOCX extraction via docx2txt

use courtdoc_core::{Result, ToolConfig};
use std::path::Path;

/// Backend for Office Open XML word-processing documents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DocxBackend;

impl DocxBackend {
    /// Extract plain text with `docx2txt <path> -`.
    ///
    /// # Errors
    /// Returns [`courtdoc_core::CourtdocError::ToolInvocation`] if docx2txt is
    /// missing or fails without producing text.
    #[must_use = "extraction produces a result that should be handled"]
    pub fn extract_text(path: &Path, tools: &ToolConfig) -> Result<(String, Option<String>)> {
        tools.docx2txt().arg(path).arg("-").run_text()
    }
}
