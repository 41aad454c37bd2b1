//! HTML extraction and body cleanup
//!
//! Court HTML is kept as markup; only presentation and active content are
//! removed. The same cleaner handles `wpd2html` output for `WordPerfect`
//! files.

use courtdoc_core::{CourtdocError, Result};
use encoding_rs::WINDOWS_1252;
use log::debug;
use scraper::{ElementRef, Html, Node};
use std::path::Path;

/// Elements dropped together with everything inside them
const KILLED_TAGS: &[&str] = &[
    "script", "style", "link", "meta", "applet", "frame", "frameset", "button", "input",
    "select", "textarea",
];

/// Elements whose tags are dropped but whose content is kept
const UNWRAPPED_TAGS: &[&str] = &[
    // Disallowed on court pages
    "a", "body", "font", "noscript", "img",
    // Page structure
    "html", "head", "title",
    // Forms, embeds, annoying tags
    "form", "iframe", "embed", "layer", "object", "param", "blink", "marquee",
];

/// Elements serialized without a closing tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "hr", "source", "track", "wbr",
];

/// Character sets tried, in order, when decoding HTML bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HtmlCharset {
    /// Strict UTF-8
    Utf8,
    /// ISO-8859-1; maps every byte, so it always succeeds
    Latin1,
    /// Windows-1252
    Windows1252,
}

impl HtmlCharset {
    /// Decoding order for HTML
    pub const CHAIN: [Self; 3] = [Self::Utf8, Self::Latin1, Self::Windows1252];

    /// Decode without replacement; `None` on the first malformed byte
    #[must_use]
    pub fn decode(self, data: &[u8]) -> Option<String> {
        match self {
            Self::Utf8 => std::str::from_utf8(data).ok().map(str::to_string),
            Self::Latin1 => Some(encoding_rs::mem::decode_latin1(data).into_owned()),
            Self::Windows1252 => WINDOWS_1252
                .decode_without_bom_handling_and_without_replacement(data)
                .map(std::borrow::Cow::into_owned),
        }
    }
}

impl std::fmt::Display for HtmlCharset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Utf8 => write!(f, "utf-8"),
            Self::Latin1 => write!(f, "iso-8859-1"),
            Self::Windows1252 => write!(f, "cp1252"),
        }
    }
}

/// Decode with the first charset in [`HtmlCharset::CHAIN`] that accepts the bytes
///
/// # Errors
/// [`CourtdocError::DecodeFailure`] when every charset rejects the input.
pub fn decode_html(data: &[u8]) -> Result<(String, HtmlCharset)> {
    HtmlCharset::CHAIN
        .iter()
        .find_map(|charset| charset.decode(data).map(|text| (text, *charset)))
        .ok_or_else(|| {
            CourtdocError::DecodeFailure(format!(
                "none of {} decoded the document",
                HtmlCharset::CHAIN
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            ))
        })
}

/// Strip active content, styling and disallowed tags from an HTML document,
/// returning the remaining body markup.
#[must_use]
pub fn clean_body_content(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut out = String::with_capacity(html.len());
    write_element(document.root_element(), &mut out);
    out
}

/// Whether the cleaned content says the opinion is not for publication
#[inline]
#[must_use]
pub fn is_not_for_publication(content: &str) -> bool {
    content.to_lowercase().contains("not for publication")
}

fn write_element(element: ElementRef<'_>, out: &mut String) {
    let name = element.value().name();
    if KILLED_TAGS.contains(&name) {
        return;
    }
    if UNWRAPPED_TAGS.contains(&name) {
        write_children(element, out);
        return;
    }

    out.push('<');
    out.push_str(name);
    for (attr, value) in element.value().attrs() {
        // inline styles and event handlers
        if attr == "style" || attr.starts_with("on") {
            continue;
        }
        out.push(' ');
        out.push_str(attr);
        out.push_str("=\"");
        escape_into(value, true, out);
        out.push('"');
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&name) {
        return;
    }
    write_children(element, out);
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

fn write_children(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            write_element(child_element, out);
        } else if let Node::Text(text) = child.value() {
            escape_into(text, false, out);
        }
        // Comments, doctypes and processing instructions are dropped
    }
}

fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

/// Backend for HTML documents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct HtmlBackend;

impl HtmlBackend {
    /// Read, decode and clean an HTML file.
    ///
    /// # Errors
    /// Returns an IO error if the file cannot be read, or
    /// [`CourtdocError::DecodeFailure`] if no charset decodes it.
    #[must_use = "extraction produces a result that should be handled"]
    pub fn extract_text(path: &Path) -> Result<(String, Option<String>)> {
        let data = std::fs::read(path)?;
        let (html, charset) = decode_html(&data)?;
        debug!("Decoded {} as {charset}", path.display());
        Ok((clean_body_content(&html), None))
    }
}
