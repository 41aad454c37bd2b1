//! Single-pass walk over the opinion XML tree
//!
//! Every element, in document order, is classified once into a [`NodeKind`]
//! and fed to a small accumulator holding at most one pending byline. The
//! result is a [`RawExtraction`]: chunk lists for the simple tags plus raw
//! `(type, byline, text)` opinion triples.

use courtdoc_core::OpinionType;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// `<citation ...>` markup, up to the last `>` on the line
static CITATION_MARKUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</?citation.*>").expect("Invalid citation markup regex"));

/// `<page_number ...>` markup, up to the last `>` on the line
static PAGE_NUMBER_MARKUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</?page_number.*>").expect("Invalid page number markup regex"));

/// Any remaining tag
static ANY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<.*?>").expect("Invalid tag regex"));

/// Tags whose content is collapsed to plain text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SimpleTag {
    /// `reporter_caption`
    ReporterCaption,
    /// `citation`
    Citation,
    /// `caption`
    Caption,
    /// `court`
    Court,
    /// `docket`
    Docket,
    /// `posture`
    Posture,
    /// `date`
    Date,
    /// `hearing_date`
    HearingDate,
    /// `panel`
    Panel,
    /// `attorneys`
    Attorneys,
}

impl SimpleTag {
    /// Every simple tag
    pub const ALL: [Self; 10] = [
        Self::ReporterCaption,
        Self::Citation,
        Self::Caption,
        Self::Court,
        Self::Docket,
        Self::Posture,
        Self::Date,
        Self::HearingDate,
        Self::Panel,
        Self::Attorneys,
    ];

    /// Element name
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ReporterCaption => "reporter_caption",
            Self::Citation => "citation",
            Self::Caption => "caption",
            Self::Court => "court",
            Self::Docket => "docket",
            Self::Posture => "posture",
            Self::Date => "date",
            Self::HearingDate => "hearing_date",
            Self::Panel => "panel",
            Self::Attorneys => "attorneys",
        }
    }
}

/// What the walk does with one element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Collapse to text and append to the tag's chunk list
    Simple(SimpleTag),
    /// `{type}_byline`: becomes the pending byline
    Byline(OpinionType),
    /// `{type}_text`: emits a raw opinion
    Text(OpinionType),
    /// Anything else; descendants are still visited
    Other,
}

impl NodeKind {
    /// Classify an element by its local name
    #[must_use]
    pub fn classify(tag: &str) -> Self {
        if let Some(simple) = SimpleTag::ALL.iter().find(|t| t.as_str() == tag) {
            return Self::Simple(*simple);
        }
        for kind in OpinionType::ALL {
            match tag.strip_prefix(kind.as_str()) {
                Some("_byline") => return Self::Byline(kind),
                Some("_text") => return Self::Text(kind),
                _ => {}
            }
        }
        Self::Other
    }
}

/// One opinion text block as found in the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOpinion {
    /// Opinion type of the text element
    pub kind: OpinionType,
    /// Byline seen immediately before, if it had the same type
    pub byline: Option<String>,
    /// Inner markup of the text element
    pub text: String,
}

/// Everything the walk collected from one document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawExtraction {
    chunks: HashMap<SimpleTag, Vec<String>>,
    /// Opinion triples in document order
    pub opinions: Vec<RawOpinion>,
}

impl RawExtraction {
    /// Chunks collected for `tag`, in document order
    #[must_use]
    pub fn chunks(&self, tag: SimpleTag) -> &[String] {
        self.chunks.get(&tag).map_or(&[], Vec::as_slice)
    }

    /// Chunks for `tag` concatenated without separator
    #[must_use]
    pub fn joined(&self, tag: SimpleTag) -> String {
        self.chunks(tag).concat()
    }
}

/// Byline waiting for the next text element
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingByline {
    kind: OpinionType,
    text: String,
}

/// Accumulator driven by [`NodeKind`] transitions
#[derive(Debug, Default)]
struct Walker {
    raw: RawExtraction,
    pending: Option<PendingByline>,
}

impl Walker {
    fn visit(&mut self, kind: NodeKind, inner: &str) {
        match kind {
            NodeKind::Simple(tag) => {
                self.raw
                    .chunks
                    .entry(tag)
                    .or_default()
                    .push(collapse_simple_text(inner));
            }
            NodeKind::Byline(kind) => {
                self.pending = Some(PendingByline {
                    kind,
                    text: inner.trim().to_string(),
                });
            }
            NodeKind::Text(kind) => {
                let byline = self
                    .pending
                    .take()
                    .filter(|pending| pending.kind == kind)
                    .map(|pending| pending.text);
                self.raw.opinions.push(RawOpinion {
                    kind,
                    byline,
                    text: inner.trim().to_string(),
                });
            }
            NodeKind::Other => {}
        }
    }
}

/// Parse `source` and walk every element in document order.
///
/// # Errors
/// Returns the parser error when `source` is not well-formed XML.
pub fn extract_raw(source: &str) -> Result<RawExtraction, roxmltree::Error> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    let doc = roxmltree::Document::parse_with_options(source, options)?;

    let mut walker = Walker::default();
    for node in doc.root_element().descendants().filter(roxmltree::Node::is_element) {
        let kind = NodeKind::classify(node.tag_name().name());
        if kind == NodeKind::Other {
            continue;
        }
        walker.visit(kind, inner_markup(source, node.range()));
    }
    Ok(walker.raw)
}

/// Source text between an element's opening and closing tags
fn inner_markup(source: &str, range: std::ops::Range<usize>) -> &str {
    let element = &source[range];
    let Some(open_end) = opening_tag_end(element) else {
        return "";
    };
    if element[..open_end].ends_with('/') {
        // self-closing
        return "";
    }
    let close_start = element.rfind("</").unwrap_or(element.len());
    if close_start <= open_end {
        return "";
    }
    &element[open_end + 1..close_start]
}

/// Byte offset of the `>` ending the opening tag, skipping quoted values
fn opening_tag_end(element: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in element.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '>') => return Some(i),
            (None, _) => {}
        }
    }
    None
}

/// Collapse simple-tag markup to plain text.
///
/// Citation and page-number markup is removed outright; any other tag
/// becomes a space. Entity references are then decoded.
#[must_use]
pub fn collapse_simple_text(inner: &str) -> String {
    let text = CITATION_MARKUP.replace_all(inner, "");
    let text = PAGE_NUMBER_MARKUP.replace_all(&text, "");
    let text = ANY_TAG.replace_all(&text, " ");
    decode_entities(text.trim())
}

/// Decode the predefined XML entities and numeric character references
#[must_use]
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail.find(';').and_then(|semi| {
            let entity = &tail[1..semi];
            let c = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                    .and_then(char::from_u32),
            };
            c.map(|c| (c, semi))
        });
        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
