//! Plain-text extraction
//!
//! Text files carry no encoding marker. Most of the ones courts publish were
//! saved from a word processor on Windows, so cp1252 is tried first and UTF-8
//! second. The UTF-8 pass drops undecodable bytes instead of failing.

use courtdoc_core::Result;
use encoding_rs::WINDOWS_1252;
use log::debug;
use std::path::Path;

/// Bytes that have no assigned character in cp1252
///
/// The WHATWG table maps them to C1 controls, so a strict cp1252 decoder has
/// to reject them explicitly.
const CP1252_UNDEFINED: [u8; 5] = [0x81, 0x8D, 0x8F, 0x90, 0x9D];

/// Backend for `.txt` documents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TextBackend;

impl TextBackend {
    /// Read and decode a text file.
    ///
    /// Decoding itself never fails; the advisory slot is always `None`.
    ///
    /// # Errors
    /// Returns [`courtdoc_core::CourtdocError::IoError`] if the file cannot be read.
    #[must_use = "extraction produces a result that should be handled"]
    pub fn extract_text(path: &Path) -> Result<(String, Option<String>)> {
        let data = std::fs::read(path)?;
        Ok((decode_plain_text(&data), None))
    }
}

/// Decode as cp1252, falling back to UTF-8 with invalid sequences dropped
#[must_use]
pub fn decode_plain_text(data: &[u8]) -> String {
    if let Some(text) = decode_cp1252_strict(data) {
        return text;
    }
    debug!("Text is not cp1252; decoding as UTF-8");
    decode_utf8_ignoring_errors(data)
}

/// Strict cp1252: `None` if any byte is unassigned
#[must_use]
pub fn decode_cp1252_strict(data: &[u8]) -> Option<String> {
    if data.iter().any(|b| CP1252_UNDEFINED.contains(b)) {
        return None;
    }
    WINDOWS_1252
        .decode_without_bom_handling_and_without_replacement(data)
        .map(std::borrow::Cow::into_owned)
}

/// UTF-8 decode that skips malformed sequences
#[must_use]
pub fn decode_utf8_ignoring_errors(mut data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len());
    loop {
        match std::str::from_utf8(data) {
            Ok(valid) => {
                out.push_str(valid);
                return out;
            }
            Err(e) => {
                let (valid, rest) = data.split_at(e.valid_up_to());
                if let Ok(valid) = std::str::from_utf8(valid) {
                    out.push_str(valid);
                }
                let skip = e.error_len().unwrap_or(rest.len());
                data = &rest[skip..];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Write;

    #[test]
    fn test_cp1252_wins_for_windows_text() {
        // 0x93/0x94 are curly quotes in cp1252 and invalid as UTF-8
        assert_eq!(decode_plain_text(b"\x93Affirmed\x94"), "\u{201C}Affirmed\u{201D}");
    }

    #[test]
    fn test_cp1252_reads_utf8_bytes_as_mojibake() {
        // Valid UTF-8 is also valid cp1252; cp1252 is tried first
        assert_eq!(decode_plain_text("é".as_bytes()), "Ã©");
    }

    #[test]
    fn test_undefined_byte_falls_back_to_utf8() {
        // 0x81 is unassigned in cp1252 and invalid in UTF-8; it is dropped
        assert_eq!(decode_plain_text(b"ab\x81cd"), "abcd");
        assert_eq!(decode_plain_text("caf\u{e9}\u{81}".as_bytes()), "caf\u{e9}\u{81}");
    }

    #[test]
    fn test_utf8_ignoring_errors() {
        assert_eq!(decode_utf8_ignoring_errors(b"ok\xffok"), "okok");
        assert_eq!(decode_utf8_ignoring_errors(b"tail\xe2\x82"), "tail");
        assert_eq!(decode_utf8_ignoring_errors(b""), "");
    }

    #[test]
    fn test_extract_text_from_file() {
        let mut temp = tempfile::NamedTempFile::with_suffix(".txt").unwrap();
        temp.write_all(b"IN THE SUPREME COURT\r\n").unwrap();
        temp.flush().unwrap();
        let (text, err) = TextBackend::extract_text(temp.path()).unwrap();
        assert_eq!(text, "IN THE SUPREME COURT\r\n");
        assert!(err.is_none());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(TextBackend::extract_text(Path::new("/nonexistent/opinion.txt")).is_err());
    }

    proptest! {
        #[test]
        fn prop_decode_never_panics(data in proptest::collection::vec(any::<u8>(), 0..256)) {
            let _ = decode_plain_text(&data);
        }

        #[test]
        fn prop_ascii_is_identity(s in "[ -~\n]{0,200}") {
            prop_assert_eq!(decode_plain_text(s.as_bytes()), s);
        }
    }
}
