//! Microsoft Word 97-2003 (.doc) text extraction
//!
//! ## Implementation Strategy
//!
//! The .doc format (MS-DOC) is a binary stream inside an OLE2/CFB container.
//! `antiword` already handles the format well, so extraction is a single
//! `antiword <file> -i 1` invocation (`-i 1` selects plain text without
//! image placeholders).
//!
//! ### Format Detection
//!
//! The declared extension decides dispatch. The CFB signature
//! (`D0 CF 11 E0 A1 B1 1A E1`) is only checked to log a warning when a file
//! declared as .doc does not look like one; antiword still gets a chance.

pub mod parser;

pub use parser::DocBackend;
