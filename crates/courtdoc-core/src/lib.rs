//! Core types for courtdoc
//!
//! This crate holds what every other courtdoc crate shares:
//!
//! - [`ExtractionResult`] and [`OcrStatus`], the output of document text extraction
//! - [`OpinionRecord`] and [`OpinionUnit`], the output of the opinion-XML parser
//! - [`DocumentFormat`], the closed set of declared input formats
//! - [`CourtdocError`], the error taxonomy
//! - [`ExternalTool`], the single child-process runner used by all extractors
//! - [`ToolConfig`], the names of the external programs
//!
//! ## Example
//!
//! ```rust
//! use courtdoc_core::{DocumentFormat, ExtractionResult};
//!
//! let format = DocumentFormat::from_extension("wpd").unwrap();
//! assert_eq!(format.to_string(), "WPD");
//!
//! let result = ExtractionResult::failed("empty file");
//! assert!(result.has_error());
//! ```

pub mod config;
pub mod error;
pub mod extraction;
pub mod format;
pub mod hash;
pub mod opinion;
pub mod tool;

pub use config::ToolConfig;
pub use error::{CourtdocError, Result};
pub use extraction::{
    ExtractionResult, OcrStatus, READ_THE_ORIGINAL, UNABLE_TO_EXTRACT, UNPUBLISHED_STATUS,
};
pub use format::DocumentFormat;
pub use hash::content_hash;
pub use opinion::{LabeledDate, OpinionRecord, OpinionType, OpinionUnit};
pub use tool::{scoped_temp_file, ExternalTool, ToolOutput};
