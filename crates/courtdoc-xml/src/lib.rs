//! Court opinion XML parser
//!
//! Turns one opinion XML document (caption, court, dates, panel and any
//! number of opinion, dissent and concurrence blocks) into an
//! [`OpinionRecord`](courtdoc_core::OpinionRecord).
//!
//! ## Pipeline
//!
//! | Stage | Module | |
//! |-------|--------|-|
//! | Decoding, unpublished marker, tag repair | [`prepass`] | BOM or declared encoding; byte-level fixes the XML parser cannot tolerate |
//! | Tree walk | [`walk`] | simple-tag chunks and `(type, byline, text)` triples |
//! | Court | [`courts`] | ordered patterns, then special, then folder tables |
//! | Dates | [`dates`] | labeled dates per date block |
//! | Names | [`case_name`], [`judges`] | formatted case names, judge surnames |
//! | Assembly | [`parser`] | grouping, per curiam, judge text, content hash |
//!
//! Collaborators are traits ([`JudgeNameExtractor`], [`CaseNameFormatter`])
//! with default implementations; the parser borrows them, so build them
//! once and share.

pub mod case_name;
pub mod courts;
pub mod dates;
pub mod judges;
pub mod parser;
pub mod prepass;
pub mod walk;

pub use case_name::{CaseNameFormatter, CaseNameShortener, LegalCaseNameFormatter};
pub use courts::{normalize_court_text, CourtPattern, CourtTable};
pub use dates::parse_dates;
pub use judges::{BylineJudgeExtractor, JudgeNameExtractor};
pub use parser::OpinionXmlParser;
pub use prepass::{decode_source, repair_misordered_tags, strip_unpublished};
pub use walk::{extract_raw, RawExtraction, RawOpinion, SimpleTag};
