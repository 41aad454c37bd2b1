//! External tool configuration
//!
//! Every program the extractors shell out to is named here so deployments can
//! point at non-standard installs. Defaults are bare program names resolved
//! through `PATH`.

use crate::tool::ExternalTool;
use serde::{Deserialize, Serialize};

/// Default OCR language passed to tesseract
pub const DEFAULT_OCR_LANGUAGE: &str = "eng";

/// Default rasterization resolution in DPI
pub const DEFAULT_RASTER_DPI: u32 = 300;

/// Paths and fixed parameters of the external converters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// MS Word 97-2003 text extractor
    pub antiword: String,
    /// DOCX text extractor
    pub docx2txt: String,
    /// PDF text extractor (poppler)
    pub pdftotext: String,
    /// `WordPerfect` to HTML converter (libwpd)
    pub wpd2html: String,
    /// Ghostscript, used to rasterize PDFs for OCR
    pub ghostscript: String,
    /// Tesseract OCR engine
    pub tesseract: String,
    /// OCR language
    pub ocr_language: String,
    /// Rasterization resolution
    pub raster_dpi: u32,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            antiword: "antiword".to_string(),
            docx2txt: "docx2txt".to_string(),
            pdftotext: "pdftotext".to_string(),
            wpd2html: "wpd2html".to_string(),
            ghostscript: "gs".to_string(),
            tesseract: "tesseract".to_string(),
            ocr_language: DEFAULT_OCR_LANGUAGE.to_string(),
            raster_dpi: DEFAULT_RASTER_DPI,
        }
    }
}

impl ToolConfig {
    /// Start an invocation of the configured antiword
    #[inline]
    #[must_use]
    pub fn antiword(&self) -> ExternalTool {
        ExternalTool::new(&self.antiword)
    }

    /// Start an invocation of the configured docx2txt
    #[inline]
    #[must_use]
    pub fn docx2txt(&self) -> ExternalTool {
        ExternalTool::new(&self.docx2txt)
    }

    /// Start an invocation of the configured pdftotext
    #[inline]
    #[must_use]
    pub fn pdftotext(&self) -> ExternalTool {
        ExternalTool::new(&self.pdftotext)
    }

    /// Start an invocation of the configured wpd2html
    #[inline]
    #[must_use]
    pub fn wpd2html(&self) -> ExternalTool {
        ExternalTool::new(&self.wpd2html)
    }

    /// Start an invocation of the configured ghostscript
    #[inline]
    #[must_use]
    pub fn ghostscript(&self) -> ExternalTool {
        ExternalTool::new(&self.ghostscript)
    }

    /// Start an invocation of the configured tesseract
    #[inline]
    #[must_use]
    pub fn tesseract(&self) -> ExternalTool {
        ExternalTool::new(&self.tesseract)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ToolConfig::default();
        assert_eq!(config.ghostscript, "gs");
        assert_eq!(config.ocr_language, "eng");
        assert_eq!(config.raster_dpi, 300);
    }

    #[test]
    fn test_partial_deserialize_keeps_defaults() {
        let config: ToolConfig =
            serde_json::from_str(r#"{"tesseract": "/opt/tess/bin/tesseract"}"#).unwrap();
        assert_eq!(config.tesseract, "/opt/tess/bin/tesseract");
        assert_eq!(config.pdftotext, "pdftotext");
    }

    #[test]
    fn test_tool_builders_use_configured_program() {
        let config = ToolConfig {
            antiword: "/usr/local/bin/antiword".to_string(),
            ..ToolConfig::default()
        };
        assert_eq!(config.antiword().program(), "/usr/local/bin/antiword");
        assert_eq!(config.wpd2html().program(), "wpd2html");
    }
}
