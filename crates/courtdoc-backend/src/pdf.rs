//! PDF extraction with OCR fallback
//!
//! `pdftotext` runs first. PDFs may be text, images or a mix of the two, so
//! with OCR enabled the raw bytes are also checked for embedded images:
//! mixed PDFs need OCR even when a text layer exists. Whichever of the two
//! texts is longer wins.

use courtdoc_core::{ExtractionResult, OcrStatus, Result, ToolConfig, UNABLE_TO_EXTRACT};
use courtdoc_ocr::{OcrEngine, Recognition};
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::bytes::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Image XObject marker in raw PDF bytes
static IMAGE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/Image ?/").expect("Invalid image marker regex"));

/// Court-stamped header prefixes found on every page of a filed document
pub const PAGE_HEADER_PREFIXES: [&str; 4] = ["Case", "Appellate", "Appeal", "USCA"];

/// Whether raw PDF bytes reference an embedded image
#[inline]
#[must_use]
pub fn has_image_marker(pdf_bytes: &[u8]) -> bool {
    IMAGE_MARKER.is_match(pdf_bytes)
}

/// OCR is needed when the text layer is blank or the PDF contains images
#[must_use]
pub fn ocr_needed(pdf_bytes: &[u8], content: &str) -> bool {
    content.trim().is_empty() || has_image_marker(pdf_bytes)
}

/// Header-only check for filed documents: true when every non-blank line is
/// a court-stamped page header, i.e. the text layer holds nothing else.
#[must_use]
pub fn needs_ocr(content: &str) -> bool {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .all(|line| PAGE_HEADER_PREFIXES.iter().any(|p| line.starts_with(p)))
}

/// Undo the glyph shift some Ninth Circuit scanner output carries.
///
/// Affected files encode printable ASCII `0x21..=0x7E` as `U+00FF..=U+00A2`
/// in reverse order (`¿` for `a`, `ß` for `A`, `ð` for `0`). Other
/// characters pass through.
#[must_use]
pub fn fix_mojibake(text: &str) -> String {
    text.chars()
        .map(|c| match u32::from(c) {
            code @ 0xA2..=0xFF => char::from_u32(0x120 - code).unwrap_or(c),
            _ => c,
        })
        .collect()
}

/// Merge an OCR attempt into directly extracted text.
///
/// Returns the final text and whether it came from OCR. OCR output replaces
/// the direct text only when strictly longer. A failed attempt leaves the
/// direct text alone unless it was blank, in which case the
/// [`UNABLE_TO_EXTRACT`] sentinel is returned.
#[must_use]
pub fn merge_ocr(direct: String, recognition: Recognition) -> (String, bool) {
    if recognition.success {
        if recognition.text.chars().count() > direct.chars().count() {
            return (recognition.text, true);
        }
        return (direct, false);
    }
    if direct.trim().is_empty() {
        return (UNABLE_TO_EXTRACT.to_string(), false);
    }
    (direct, false)
}

/// Text and OCR status of a filed (RECAP) PDF
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecapExtraction {
    /// Extracted text
    pub text: String,
    /// What happened with OCR
    pub ocr_status: OcrStatus,
}

/// Backend for PDF documents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PdfBackend;

impl PdfBackend {
    /// Run `pdftotext -layout -enc UTF-8 <path> -`.
    ///
    /// # Errors
    /// Returns [`courtdoc_core::CourtdocError::ToolInvocation`] if pdftotext is
    /// missing or fails without producing text.
    pub fn pdftotext(path: &Path, tools: &ToolConfig) -> Result<(String, Option<String>)> {
        tools
            .pdftotext()
            .args(["-layout", "-enc", "UTF-8"])
            .arg(path)
            .arg("-")
            .run_text()
    }

    /// Direct extraction that never fails: a tool error becomes empty text
    /// plus the error message.
    fn direct_text(path: &Path, tools: &ToolConfig) -> (String, Option<String>) {
        match Self::pdftotext(path, tools) {
            Ok(output) => output,
            Err(e) => {
                warn!("pdftotext failed on {}: {e}", path.display());
                (String::new(), Some(e.to_string()))
            }
        }
    }

    /// Extract a PDF, falling back to OCR when `ocr_enabled` and warranted.
    ///
    /// Without OCR, text that contains no `e` at all is treated as shifted
    /// scanner output and repaired with [`fix_mojibake`].
    ///
    /// # Errors
    /// Returns an IO error if the PDF cannot be read for the image check.
    pub fn extract(
        path: &Path,
        engine: &OcrEngine,
        ocr_enabled: bool,
    ) -> Result<ExtractionResult> {
        let (mut text, error) = Self::direct_text(path, engine.tools());
        let mut ocr_used = false;

        if !ocr_enabled {
            if !text.contains('e') {
                debug!("No 'e' in {}; repairing shifted glyphs", path.display());
                text = fix_mojibake(&text);
            }
        } else {
            let bytes = std::fs::read(path)?;
            if ocr_needed(&bytes, &text) {
                info!("Running OCR on {}", path.display());
                (text, ocr_used) = merge_ocr(text, engine.recognize(path));
            }
        }

        Ok(ExtractionResult {
            text,
            ocr_used,
            error,
            downgrade_to_unpublished: false,
        })
    }

    /// Extract a filed document, deciding on OCR with [`needs_ocr`].
    #[must_use = "extraction produces a result that should be handled"]
    pub fn extract_recap(path: &Path, engine: &OcrEngine, skip_ocr: bool) -> RecapExtraction {
        let (content, _) = Self::direct_text(path, engine.tools());

        if !needs_ocr(&content) {
            return RecapExtraction {
                text: content,
                ocr_status: OcrStatus::Unnecessary,
            };
        }
        if skip_ocr {
            return RecapExtraction {
                text: String::new(),
                ocr_status: OcrStatus::Needed,
            };
        }

        let recognition = engine.recognize(path);
        if recognition.success {
            RecapExtraction {
                text: recognition.text,
                ocr_status: OcrStatus::Complete,
            }
        } else {
            RecapExtraction {
                text: UNABLE_TO_EXTRACT.to_string(),
                ocr_status: OcrStatus::Failed,
            }
        }
    }
}
