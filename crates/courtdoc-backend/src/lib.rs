//! Format extractors and extraction orchestrator for courtdoc
//!
//! Court opinions arrive as PDF, DOC, DOCX, HTML, plain text or
//! `WordPerfect` files. [`DocumentExtractor`] dispatches each to its backend
//! by declared extension and returns an [`ExtractionResult`].
//!
//! | Format | Backend | Tool |
//! |---|---|---|
//! | DOC | [`courtdoc_legacy::DocBackend`] | `antiword` |
//! | DOCX | [`DocxBackend`] | `docx2txt` |
//! | HTML | [`HtmlBackend`] | none (scraper) |
//! | PDF | [`PdfBackend`] | `pdftotext`, OCR fallback |
//! | TXT | [`TextBackend`] | none |
//! | WPD | [`courtdoc_legacy::WpdBackend`] | `wpd2html` |
//!
//! ## Example
//!
//! ```rust,no_run
//! use courtdoc_backend::DocumentExtractor;
//! use courtdoc_core::ToolConfig;
//! use std::path::Path;
//!
//! let extractor = DocumentExtractor::new(ToolConfig::default());
//! let result = extractor.extract(Path::new("opinion.pdf"), "pdf", true)?;
//! println!("{} (ocr: {})", result.text, result.ocr_used);
//! # Ok::<(), courtdoc_core::CourtdocError>(())
//! ```
//!
//! [`ExtractionResult`]: courtdoc_core::ExtractionResult

pub mod converter;
pub mod docx;
pub mod html;
pub mod metadata;
pub mod page_count;
pub mod pdf;
pub mod text;

pub use converter::{DocumentExtractor, ExtractConfig, EMPTY_FILE};
pub use docx::DocxBackend;
pub use html::{clean_body_content, HtmlBackend};
pub use metadata::{CaseMetadata, MetadataUpdate, RegexMetadataExtractor, TextMetadataExtractor};
pub use page_count::{LopdfPageCounter, PageCounter};
pub use pdf::{fix_mojibake, PdfBackend, RecapExtraction};
pub use text::TextBackend;
