//! Structured court-opinion records produced by the opinion-XML parser

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind of opinion written in a case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpinionType {
    /// Majority or lead opinion
    Opinion,
    /// Dissenting opinion
    Dissent,
    /// Concurring opinion
    Concurrence,
}

impl OpinionType {
    /// All types, in the order opinions are grouped and emitted
    pub const ALL: [Self; 3] = [Self::Opinion, Self::Dissent, Self::Concurrence];

    /// Lower-case name as used in XML tag prefixes (`opinion_text`, ...)
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Opinion => "opinion",
            Self::Dissent => "dissent",
            Self::Concurrence => "concurrence",
        }
    }

    /// Capitalized name used in human-readable headers
    #[inline]
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Opinion => "Opinion",
            Self::Dissent => "Dissent",
            Self::Concurrence => "Concurrence",
        }
    }
}

impl std::fmt::Display for OpinionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A date found in a date block, with the text that introduced it
/// (e.g. `argued`, `decided`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LabeledDate {
    /// Lower-case label, or `None` when only the date was present
    pub label: Option<String>,
    /// Calendar date
    pub date: NaiveDate,
}

impl LabeledDate {
    /// Create a labeled date
    #[inline]
    #[must_use]
    pub fn new(label: Option<String>, date: NaiveDate) -> Self {
        Self { label, date }
    }
}

/// One opinion (majority, dissent or concurrence) of a case.
///
/// `text` always equals `text_segments` joined with `"\n"`; the only way to
/// add segments after construction is [`OpinionUnit::append_segments`], which
/// keeps the two in step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpinionUnit {
    /// Opinion kind
    #[serde(rename = "type")]
    pub kind: OpinionType,
    /// Full opinion text (inner markup preserved)
    pub text: String,
    /// Individual text blocks that make up `text`
    pub text_segments: Vec<String>,
    /// First judge named in the byline
    pub author: Option<String>,
    /// Remaining judges named in the byline
    pub joining: Vec<String>,
    /// Raw byline text (empty when the opinion had none)
    pub byline: String,
    /// Whether this opinion was issued by the court without a named author
    pub per_curiam: bool,
    /// SHA-1 of the source file, shared by every opinion of that file
    pub content_hash: String,
}

impl OpinionUnit {
    /// Build an opinion from its text segments
    #[must_use]
    pub fn new(
        kind: OpinionType,
        text_segments: Vec<String>,
        author: Option<String>,
        joining: Vec<String>,
        byline: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            text: text_segments.join("\n"),
            text_segments,
            author,
            joining,
            byline: byline.into(),
            per_curiam: false,
            content_hash: String::new(),
        }
    }

    /// Append trailing text blocks to this opinion
    pub fn append_segments(&mut self, segments: &[String]) {
        for segment in segments {
            if !self.text_segments.is_empty() {
                self.text.push('\n');
            }
            self.text.push_str(segment);
            self.text_segments.push(segment.clone());
        }
    }
}

/// Structured record of one opinion XML file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpinionRecord {
    /// File stem of the source file
    pub file_id: String,
    /// Resolved court identifier (never empty)
    pub court_id: String,
    /// Docket number text
    pub docket: Option<String>,
    /// Citation strings, in document order
    pub citations: Vec<String>,
    /// Attorneys block
    pub attorneys: Option<String>,
    /// Procedural posture
    pub posture: Option<String>,
    /// Judges named in the panel block
    pub panel: Vec<String>,
    /// One group per raw date block
    pub dates: Vec<Vec<LabeledDate>>,
    /// Case name from the reporter caption
    pub case_name: Option<String>,
    /// Full case name from the caption
    pub case_name_full: Option<String>,
    /// Abbreviated case name
    pub case_name_short: Option<String>,
    /// Whether the case as a whole was decided per curiam
    pub per_curiam: bool,
    /// Whether the file was marked unpublished
    pub unpublished: bool,
    /// Opinions, grouped by type
    pub opinions: Vec<OpinionUnit>,
    /// Free-text judge information (panel and bylines with headers)
    pub judges: String,
    /// SHA-1 of the source file
    pub content_hash: String,
}
