//! Post-OCR cleanup
//!
//! Only literal substitutions for misreads seen repeatedly on court filings.
//! Anything fuzzier risks introducing errors into otherwise correct text.

/// Literal `(misread, correction)` pairs, applied in order
pub const OCR_REPLACEMENTS: &[(&str, &str)] = &[
    // The "l" in "Filed" on docket stamps comes back as a pipe
    ("Fi|ed", "Filed"),
    (" Il ", " II "),
];

/// Apply [`OCR_REPLACEMENTS`] to recognized text
#[must_use]
pub fn cleanup_ocr_text(text: &str) -> String {
    OCR_REPLACEMENTS
        .iter()
        .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to))
}
