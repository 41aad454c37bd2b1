//! Case-name formatting and short-name derivation

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static VERSUS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s+(?:vs\.?|versus|v\.?)\s+").expect("Invalid versus regex")
});

static UNITED_STATES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bunited\s+states\s+of\s+america\b|\bu\.\s?s\.\s?a\.|\busa\b")
        .expect("Invalid united states regex")
});

static ET_AL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i),?\s+et\.?\s+al\b\.?").expect("Invalid et al regex"));

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Two or more single letters each followed by a dot: `u.s.`, `n.a.`
static DOTTED_ABBREVIATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[A-Za-z]\.){2,}$").expect("Invalid abbreviation regex"));

static ROMAN_NUMERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:ii|iii|iv|vi|vii|viii|ix|xi|xii|xiii|xiv|xv)$")
        .expect("Invalid roman numeral regex")
});

const SMALL_WORDS: &[&str] = &[
    "a", "an", "and", "as", "at", "but", "by", "en", "for", "if", "in", "of", "on", "or", "the",
    "to", "via",
];

const UPPERCASE_WORDS: &[&str] = &[
    "llc", "llp", "lp", "nlrb", "fcc", "epa", "irs", "fbi", "dba", "uaw", "ups", "ibm",
];

/// Harmonize and title-case case names
pub trait CaseNameFormatter: Send + Sync {
    /// Normalize party-separator and sovereign spellings
    fn harmonize(&self, name: &str) -> String;

    /// Title-case a harmonized name
    fn titlecase(&self, name: &str) -> String;

    /// Lowercase, harmonize, then title-case
    fn format_case_name(&self, name: &str) -> String {
        self.titlecase(&self.harmonize(&name.to_lowercase()))
    }
}

/// Formatter for US case captions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LegalCaseNameFormatter;

impl CaseNameFormatter for LegalCaseNameFormatter {
    fn harmonize(&self, name: &str) -> String {
        let name = VERSUS.replace_all(name, " v. ");
        let name = UNITED_STATES.replace_all(&name, "United States");
        let name = ET_AL.replace_all(&name, "");
        WHITESPACE.replace_all(name.trim(), " ").into_owned()
    }

    fn titlecase(&self, name: &str) -> String {
        let words: Vec<&str> = name.split_whitespace().collect();
        let last = words.len().saturating_sub(1);
        words
            .iter()
            .enumerate()
            .map(|(i, word)| titlecase_word(word, i == 0 || i == last))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn titlecase_word(word: &str, at_edge: bool) -> String {
    let lower = word.to_lowercase();
    let bare = lower.trim_end_matches([',', ';', ':']);

    if bare == "v." || bare == "vs." {
        return lower;
    }
    if DOTTED_ABBREVIATION.is_match(bare)
        || ROMAN_NUMERAL.is_match(bare)
        || UPPERCASE_WORDS.contains(&bare)
    {
        return word.to_uppercase();
    }
    if !at_edge && SMALL_WORDS.contains(&bare) {
        return lower;
    }
    word.split('-')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join("-")
}

/// Uppercase the first letter, and the letter after an `O'` prefix
fn capitalize(part: &str) -> String {
    let Some(first) = part.find(char::is_alphabetic) else {
        return part.to_string();
    };
    let (prefix, rest) = part.split_at(first);
    let mut chars = rest.chars();
    let mut out = String::from(prefix);
    if let Some(c) = chars.next() {
        out.extend(c.to_uppercase());
    }
    let tail = chars.as_str();
    match tail.strip_prefix('\'') {
        Some(name) if out.ends_with('O') && !name.is_empty() => {
            out.push('\'');
            out.push_str(&capitalize(name));
        }
        _ => out.push_str(tail),
    }
    out
}

/// Parties too generic to stand for the case on their own
const GENERIC_PARTIES: &[&str] = &[
    "state", "people", "commonwealth", "government", "territory", "nation", "city", "county",
    "town", "township", "village", "borough", "parish", "district", "board", "department",
    "dept.", "estate", "united", "states", "america", "us", "u.s.", "inc.", "co.", "corp.",
    "company", "unknown", "doe", "petitioner", "respondent", "appellant", "appellee",
    "plaintiff", "defendant", "defendants", "plaintiffs",
];

/// Captions naming a matter rather than adverse parties
const MATTER_PREFIXES: &[&str] = &["in re ", "in the matter of ", "ex parte "];

/// Derives short case names (`Smith v. Jones` to `Smith`).
///
/// Build once and share; the word list is compiled in the constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseNameShortener {
    bad_words: HashSet<String>,
}

impl Default for CaseNameShortener {
    fn default() -> Self {
        Self::new()
    }
}

impl CaseNameShortener {
    /// Shortener with the built-in generic-party list
    #[must_use]
    pub fn new() -> Self {
        Self::with_bad_words(GENERIC_PARTIES.iter().copied())
    }

    /// Shortener rejecting the given words (compared lower-case)
    #[must_use]
    pub fn with_bad_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            bad_words: words.into_iter().map(|w| w.as_ref().to_lowercase()).collect(),
        }
    }

    /// Short name for `case_name`, or an empty string when none fits.
    ///
    /// Only two-party `X v. Y` names qualify. The first one-word party not in
    /// the generic list is chosen.
    #[must_use]
    pub fn make_case_name_short(&self, case_name: &str) -> String {
        let name = case_name.trim();
        let lower = name.to_lowercase();
        if MATTER_PREFIXES.iter().any(|prefix| lower.starts_with(prefix)) {
            return String::new();
        }

        let parties: Vec<&str> = VERSUS.split(name).collect();
        if parties.len() != 2 {
            return String::new();
        }

        parties
            .iter()
            .filter_map(|party| {
                let mut words = party.split_whitespace();
                match (words.next(), words.next()) {
                    (Some(word), None) => Some(word.trim_end_matches([',', ';'])),
                    _ => None,
                }
            })
            .find(|word| !word.is_empty() && !self.bad_words.contains(&word.to_lowercase()))
            .map(str::to_string)
            .unwrap_or_default()
    }
}
