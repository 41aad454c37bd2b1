//! Legacy word-processor extraction for courtdoc
//!
//! Courts still publish opinions as Word 97-2003 and `WordPerfect` files.
//! Neither format is parsed in-process; both are handed to well-tested
//! converters:
//!
//! - **DOC**: `antiword` (plain text on stdout)
//! - **WPD**: `wpd2html` from libwpd (HTML on stdout, cleaned by the caller)
//!
//! ## Dependencies
//!
//! - `antiword`: `apt install antiword` / `brew install antiword`
//! - `wpd2html`: `apt install libwpd-tools` / `brew install libwpd`
//!
//! ## Example
//!
//! ```rust,no_run
//! use courtdoc_core::ToolConfig;
//! use courtdoc_legacy::DocBackend;
//! use std::path::Path;
//!
//! let tools = ToolConfig::default();
//! let (text, advisory) = DocBackend::extract_text(Path::new("opinion.doc"), &tools)?;
//! println!("{text}");
//! # Ok::<(), anyhow::Error>(())
//! ```

/// DOC (Microsoft Word 97-2003) format backend
pub mod doc;
/// WPD (`WordPerfect`) format backend
pub mod wpd;

pub use doc::DocBackend;
pub use wpd::WpdBackend;
