//! Opinion XML to [`OpinionRecord`]

use crate::case_name::{CaseNameFormatter, CaseNameShortener};
use crate::courts::CourtTable;
use crate::dates::parse_dates;
use crate::judges::JudgeNameExtractor;
use crate::prepass::{decode_source, repair_misordered_tags, strip_unpublished};
use crate::walk::{extract_raw, RawExtraction, RawOpinion, SimpleTag};
use courtdoc_core::{content_hash, CourtdocError, OpinionRecord, OpinionType, OpinionUnit, Result};
use log::{debug, info, warn};
use std::path::Path;

/// Characters searched for "per curiam" at the head of a byline or text
const PER_CURIAM_WINDOW: usize = 1000;

const PANEL_HEADER: &str = "Panel\n-----";

/// Parser for one opinion XML document at a time.
///
/// Holds only shared, read-only collaborators, so a single parser can be
/// reused across documents and threads.
///
/// ```rust,no_run
/// use courtdoc_xml::{
///     BylineJudgeExtractor, CaseNameShortener, CourtTable, LegalCaseNameFormatter,
///     OpinionXmlParser,
/// };
/// use std::path::Path;
///
/// let shortener = CaseNameShortener::new();
/// let parser = OpinionXmlParser::new(
///     CourtTable::builtin(),
///     &BylineJudgeExtractor,
///     &LegalCaseNameFormatter,
///     &shortener,
/// );
/// let record = parser.parse_file(Path::new("vermont/1990-12.xml"), "vermont")?;
/// println!("{} opinions in {}", record.opinions.len(), record.court_id);
/// # Ok::<(), courtdoc_core::CourtdocError>(())
/// ```
#[derive(Clone, Copy)]
pub struct OpinionXmlParser<'a> {
    courts: &'a CourtTable,
    judges: &'a dyn JudgeNameExtractor,
    formatter: &'a dyn CaseNameFormatter,
    shortener: &'a CaseNameShortener,
}

impl std::fmt::Debug for OpinionXmlParser<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpinionXmlParser")
            .field("courts", &self.courts.len())
            .finish_non_exhaustive()
    }
}

impl<'a> OpinionXmlParser<'a> {
    /// Create a parser from its collaborators
    #[must_use]
    pub fn new(
        courts: &'a CourtTable,
        judges: &'a dyn JudgeNameExtractor,
        formatter: &'a dyn CaseNameFormatter,
        shortener: &'a CaseNameShortener,
    ) -> Self {
        Self {
            courts,
            judges,
            formatter,
            shortener,
        }
    }

    /// Parse the file at `path`; its stem becomes the record's `file_id`.
    ///
    /// # Errors
    /// Returns an IO error if the file cannot be read, otherwise as
    /// [`OpinionXmlParser::parse_bytes`].
    pub fn parse_file(&self, path: &Path, court_fallback: &str) -> Result<OpinionRecord> {
        let bytes = std::fs::read(path)?;
        let file_id = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.parse_bytes(&bytes, &file_id, court_fallback)
    }

    /// Parse one opinion document.
    ///
    /// `court_fallback` selects the special and folder court tables used
    /// when the court text matches no ordered pattern.
    ///
    /// # Errors
    /// - [`CourtdocError::XmlStructure`] if the bytes are malformed for the
    ///   encoding named by the BOM or XML declaration (UTF-8 otherwise), or the
    ///   XML does not parse even after the misordered-tag repair
    /// - [`CourtdocError::CourtResolution`] if no court can be resolved
    pub fn parse_bytes(
        &self,
        bytes: &[u8],
        file_id: &str,
        court_fallback: &str,
    ) -> Result<OpinionRecord> {
        let source = decode_source(bytes).map_err(|encoding| {
            CourtdocError::XmlStructure(format!("{file_id}: malformed {}", encoding.name()))
        })?;
        let (source, unpublished) = strip_unpublished(&source);
        let raw = parse_tolerant(&source, file_id)?;
        let hash = content_hash(bytes);

        let court_id = self.courts.resolve(&raw.joined(SimpleTag::Court), court_fallback)?;

        let mut judge_info: Vec<(String, String)> = Vec::new();
        let panel_text = raw.joined(SimpleTag::Panel);
        if !panel_text.is_empty() {
            judge_info.push((PANEL_HEADER.to_string(), panel_text.clone()));
        }
        let panel = self.judges.find_judge_names(&panel_text);

        let date_chunks: Vec<&String> = raw
            .chunks(SimpleTag::Date)
            .iter()
            .chain(raw.chunks(SimpleTag::HearingDate))
            .collect();
        let dates = parse_dates(date_chunks.as_slice());

        let case_name_full =
            non_empty(self.formatter.format_case_name(&raw.joined(SimpleTag::Caption)));
        let case_name =
            non_empty(self.formatter.format_case_name(&raw.joined(SimpleTag::ReporterCaption)));
        let case_name_short = case_name
            .as_deref()
            .map(|name| self.shortener.make_case_name_short(name))
            .and_then(non_empty);

        let per_curiam = raw.opinions.iter().any(|opinion| {
            mentions_per_curiam(&opinion.text)
                || opinion.byline.as_deref().is_some_and(mentions_per_curiam)
        });

        let mut opinions = self.group_opinions(&raw.opinions, &mut judge_info);
        for unit in &mut opinions {
            unit.per_curiam = unit_is_per_curiam(unit);
            unit.content_hash.clone_from(&hash);
        }

        let judges = judge_info
            .iter()
            .map(|(header, text)| format!("{header}\n{text}"))
            .collect::<Vec<_>>()
            .join("\n\n");

        info!(
            "Parsed {file_id}: court {court_id}, {} opinion(s){}",
            opinions.len(),
            if unpublished { ", unpublished" } else { "" }
        );

        Ok(OpinionRecord {
            file_id: file_id.to_string(),
            court_id,
            docket: non_empty(raw.joined(SimpleTag::Docket)),
            citations: raw.chunks(SimpleTag::Citation).to_vec(),
            attorneys: non_empty(raw.joined(SimpleTag::Attorneys)),
            posture: non_empty(raw.joined(SimpleTag::Posture)),
            panel,
            dates,
            case_name,
            case_name_full,
            case_name_short,
            per_curiam,
            unpublished,
            opinions,
            judges,
            content_hash: hash,
        })
    }

    /// Group raw texts into opinions, one type at a time.
    ///
    /// Texts without a byline wait until the next bylined text of the same
    /// type and are emitted with it. Texts still waiting at the end join the
    /// last opinion of their type, or form an authorless opinion.
    fn group_opinions(
        &self,
        raw: &[RawOpinion],
        judge_info: &mut Vec<(String, String)>,
    ) -> Vec<OpinionUnit> {
        let mut units: Vec<OpinionUnit> = Vec::new();

        for kind in OpinionType::ALL {
            let mut pending: Vec<String> = Vec::new();
            for opinion in raw.iter().filter(|o| o.kind == kind) {
                pending.push(opinion.text.clone());
                let Some(byline) = opinion.byline.as_deref().filter(|b| !b.is_empty()) else {
                    continue;
                };

                judge_info.push((byline_header(kind), byline.to_string()));
                let mut names = self.judges.find_judge_names(byline).into_iter();
                let author = names.next();
                units.push(OpinionUnit::new(
                    kind,
                    std::mem::take(&mut pending),
                    author,
                    names.collect(),
                    byline,
                ));
            }

            if pending.is_empty() {
                continue;
            }
            match units.iter_mut().rev().find(|unit| unit.kind == kind) {
                Some(last) => {
                    info!(
                        "Appending {} trailing {kind} text(s) to the previous {kind}",
                        pending.len()
                    );
                    last.append_segments(&pending);
                }
                None => {
                    debug!("{} {kind} text(s) without byline", pending.len());
                    units.push(OpinionUnit::new(kind, pending, None, Vec::new(), ""));
                }
            }
        }
        units
    }
}

/// Parse, retrying once after swapping the known misordered closing tags
fn parse_tolerant(source: &str, file_id: &str) -> Result<RawExtraction> {
    match extract_raw(source) {
        Ok(raw) => Ok(raw),
        Err(first) => {
            warn!("{file_id}: {first}; retrying after tag repair");
            extract_raw(&repair_misordered_tags(source))
                .map_err(|e| CourtdocError::XmlStructure(format!("{file_id}: {e}")))
        }
    }
}

fn byline_header(kind: OpinionType) -> String {
    format!("{} Byline\n{}", kind.title(), "-".repeat(kind.as_str().len() + 7))
}

fn non_empty(text: String) -> Option<String> {
    (!text.is_empty()).then_some(text)
}

fn mentions_per_curiam(text: &str) -> bool {
    let end = text
        .char_indices()
        .nth(PER_CURIAM_WINDOW)
        .map_or(text.len(), |(i, _)| i);
    text[..end].to_lowercase().contains("per curiam")
}

/// An opinion with an author is never per curiam
fn unit_is_per_curiam(unit: &OpinionUnit) -> bool {
    unit.author.is_none()
        && (mentions_per_curiam(&unit.byline)
            || unit.text_segments.iter().any(|text| mentions_per_curiam(text)))
}
