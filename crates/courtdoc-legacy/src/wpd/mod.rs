//! `WordPerfect` (.wpd) document conversion
//!
//! ## Implementation Strategy
//!
//! Uses `wpd2html` from libwpd. HTML keeps paragraph structure that plain
//! text loses; the orchestrator strips the markup it does not want and scans
//! the result for a "not for publication" notice.
//!
//! ### Requirements
//!
//! - **libwpd** must be installed:
//!   - macOS: `brew install libwpd`
//!   - Linux: `apt install libwpd-tools`
//!
//! ### Supported Formats
//!
//! - `WordPerfect` 5.x (.wpd, .wp5)
//! - `WordPerfect` 6.x through X7 (.wpd)

pub mod parser;

pub use parser::WpdBackend;
