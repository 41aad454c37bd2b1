//! Judge names from panel and byline text

use once_cell::sync::Lazy;
use regex::Regex;

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("Invalid tag regex"));

static PER_CURIAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)per\s+curiam").expect("Invalid per curiam regex"));

/// Separators between judges in one block of text
static NAME_SEPARATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[,;&:\n/]|\s+and\s+").expect("Invalid name separator regex")
});

/// Titles, roles and byline phrasing, compared lower-case without dots
const NOISE_WORDS: &[&str] = &[
    "judge", "judges", "justice", "justices", "chief", "associate", "presiding", "senior",
    "acting", "retired", "temporary", "pro", "tem", "cj", "pj", "jj", "ja", "jja", "aj", "sj",
    "mr", "mrs", "ms", "hon", "honorable", "the", "opinion", "opinions", "by", "of", "court",
    "delivered", "delivering", "concurring", "concurs", "concur", "dissenting", "dissents",
    "dissent", "in", "part", "result", "judgment", "joined", "joins", "join", "who", "whom",
    "also", "all", "with", "filed", "files", "specially", "separately", "separate", "writing",
    "for", "majority", "panel", "before", "en", "banc", "sitting", "district", "circuit",
    "appellate", "supreme", "a", "an", "each", "other", "took", "no", "participation",
    "decision", "consideration", "present", "vacancy", "not", "participating", "jr", "sr",
];

/// Resolves free text to an ordered list of judge surnames
pub trait JudgeNameExtractor: Send + Sync {
    /// Judge names in the order they appear
    fn find_judge_names(&self, text: &str) -> Vec<String>;
}

/// Extractor for the byline and panel phrasing used in court reporters
/// (`BLACK, C.J., and JONES, J., concur.`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BylineJudgeExtractor;

impl JudgeNameExtractor for BylineJudgeExtractor {
    fn find_judge_names(&self, text: &str) -> Vec<String> {
        let text = TAG.replace_all(text, " ");
        let text = PER_CURIAM.replace_all(&text, " ");

        let mut names: Vec<String> = Vec::new();
        for piece in NAME_SEPARATOR.split(&text) {
            let Some(surname) = piece
                .split_whitespace()
                .map(|token| token.trim_matches(|c: char| !c.is_alphabetic()))
                .rfind(|token| is_name_token(token))
            else {
                continue;
            };
            let surname = normalize_case(surname);
            if !names.contains(&surname) {
                names.push(surname);
            }
        }
        names
    }
}

fn is_name_token(token: &str) -> bool {
    let undotted: String = token.chars().filter(|c| *c != '.').collect();
    if undotted.chars().count() < 2 {
        return false;
    }
    if !token.starts_with(char::is_uppercase) {
        return false;
    }
    !NOISE_WORDS.contains(&undotted.to_lowercase().as_str())
}

/// `SMITH` to `Smith`; mixed-case names are left alone
fn normalize_case(name: &str) -> String {
    if name.chars().any(char::is_lowercase) {
        return name.to_string();
    }
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(text: &str) -> Vec<String> {
        BylineJudgeExtractor.find_judge_names(text)
    }

    #[test]
    fn test_per_curiam_byline() {
        assert_eq!(names("PER CURIAM. Smith, J."), vec!["Smith"]);
        assert!(names("PER CURIAM.").is_empty());
    }

    #[test]
    fn test_panel_list() {
        assert_eq!(
            names("BLACK, C.J., and JONES and WHITE, JJ., concur."),
            vec!["Black", "Jones", "White"]
        );
        assert_eq!(
            names("Before SMITH, Chief Judge, and DOE, Judge."),
            vec!["Smith", "Doe"]
        );
    }

    #[test]
    fn test_full_name_keeps_surname() {
        assert_eq!(names("Opinion by Judge Robert L. Jones"), vec!["Jones"]);
        assert_eq!(names("McDONALD, J., delivered the opinion"), vec!["McDONALD"]);
    }

    #[test]
    fn test_markup_and_duplicates() {
        assert_eq!(
            names("<bold>O'Neil</bold>, J.; O'Neil, J., dissenting"),
            vec!["O'Neil"]
        );
    }

    #[test]
    fn test_empty() {
        assert!(names("").is_empty());
        assert!(names("  \n ").is_empty());
    }
}
