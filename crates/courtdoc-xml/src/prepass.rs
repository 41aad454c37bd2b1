//! Byte-stream fixes applied before tree parsing

use encoding_rs::{Encoding, UTF_8};
use once_cell::sync::Lazy;
use regex::bytes::Regex;
use std::borrow::Cow;

/// Encoding name in an XML declaration at the very start of the document
static XML_DECLARED_ENCODING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*<\?xml\s[^>]*?\bencoding\s*=\s*["']([A-Za-z0-9._:-]+)["']"#)
        .expect("Invalid XML declaration regex")
});

/// Malformed attribute form marking an unpublished opinion
pub const UNPUBLISHED_OPENING: &str = "<opinion unpublished=true>";

/// Closing-tag pair that is frequently emitted in the wrong order
pub const MISORDERED_CLOSING: &str = "</footnote_body></block_quote>";

/// Correct order of [`MISORDERED_CLOSING`]
pub const REPAIRED_CLOSING: &str = "</block_quote></footnote_body>";

/// Encoding of an opinion document.
///
/// A byte order mark wins, then the `encoding` of the XML declaration,
/// then UTF-8. A declared encoding that is not ASCII-compatible cannot
/// have been read from ASCII declaration bytes and is ignored.
#[must_use]
pub fn source_encoding(bytes: &[u8]) -> (&'static Encoding, usize) {
    if let Some(found) = Encoding::for_bom(bytes) {
        return found;
    }
    let declared = XML_DECLARED_ENCODING
        .captures(bytes)
        .and_then(|c| Encoding::for_label(&c[1]))
        .filter(|encoding| encoding.is_ascii_compatible());
    (declared.unwrap_or(UTF_8), 0)
}

/// Decode an opinion document to text.
///
/// # Errors
/// Returns the encoding in use when the bytes are malformed for it.
pub fn decode_source(bytes: &[u8]) -> Result<Cow<'_, str>, &'static Encoding> {
    let (encoding, bom_length) = source_encoding(bytes);
    encoding
        .decode_without_bom_handling_and_without_replacement(&bytes[bom_length..])
        .ok_or(encoding)
}

/// Normalize the unpublished marker.
///
/// When the document opens with `<opinion unpublished=true>` (an unquoted
/// attribute no XML parser accepts), the opening tag is rewritten to
/// `<opinion>`, every `<unpublished>` wrapper tag is removed, and the
/// returned flag is set.
#[must_use]
pub fn strip_unpublished(source: &str) -> (String, bool) {
    if !source.contains(UNPUBLISHED_OPENING) {
        return (source.to_string(), false);
    }
    let stripped = source
        .replace(UNPUBLISHED_OPENING, "<opinion>")
        .replace("<unpublished>", "")
        .replace("</unpublished>", "");
    (stripped, true)
}

/// Swap every misordered `</footnote_body></block_quote>` pair
#[must_use]
pub fn repair_misordered_tags(source: &str) -> String {
    source.replace(MISORDERED_CLOSING, REPAIRED_CLOSING)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unpublished_marker_removed() {
        let source = "<opinion unpublished=true><unpublished><court>X</court></unpublished></opinion>";
        let (text, unpublished) = strip_unpublished(source);
        assert!(unpublished);
        assert_eq!(text, "<opinion><court>X</court></opinion>");
    }

    #[test]
    fn test_published_untouched() {
        let source = "<opinion><unpublished>kept</unpublished></opinion>";
        let (text, unpublished) = strip_unpublished(source);
        assert!(!unpublished);
        assert_eq!(text, source);
    }

    #[test]
    fn test_declared_latin1_decoded() {
        let bytes = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><caption>Caf\xE9</caption>";
        let text = decode_source(bytes).unwrap();
        assert!(text.ends_with("<caption>Caf\u{e9}</caption>"));
    }

    #[test]
    fn test_bom_overrides_declaration() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice("<?xml version='1.0' encoding='latin1'?><a>\u{e9}</a>".as_bytes());
        assert_eq!(source_encoding(&bytes), (UTF_8, 3));
        let text = decode_source(&bytes).unwrap();
        assert!(text.starts_with("<?xml"));
        assert!(text.ends_with("<a>\u{e9}</a>"));
    }

    #[test]
    fn test_undeclared_defaults_to_strict_utf8() {
        assert_eq!(source_encoding(b"<opinion/>").0, UTF_8);
        assert_eq!(decode_source(&[0x3C, 0xFF, 0xFE, 0x3E]), Err(UTF_8));
    }

    #[test]
    fn test_ascii_incompatible_declaration_ignored() {
        let bytes = b"<?xml version=\"1.0\" encoding=\"UTF-16\"?><a/>";
        assert_eq!(source_encoding(bytes).0, UTF_8);
    }

    #[test]
    fn test_repair_swaps_pair() {
        let repaired = repair_misordered_tags("<a></footnote_body></block_quote></a>");
        assert_eq!(repaired, "<a></block_quote></footnote_body></a>");
    }
}
