//! Declared document formats accepted by the extraction orchestrator
//!
//! Formats are declared by the caller (normally the stored file's extension),
//! never sniffed from content. Anything outside this closed set is a
//! [`CourtdocError::FormatUnsupported`](crate::CourtdocError).

use serde::{Deserialize, Serialize};

/// Declared input format of an opinion document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    /// Microsoft Word 97-2003 binary document (.doc)
    Doc,
    /// Microsoft Word Open XML document (.docx)
    Docx,
    /// HTML page
    Html,
    /// PDF, text-based or scanned
    Pdf,
    /// Plain text of unknown encoding
    Txt,
    /// `WordPerfect` document (.wpd)
    Wpd,
}

impl DocumentFormat {
    /// Every supported format, in dispatch-table order
    pub const ALL: [Self; 6] = [
        Self::Doc,
        Self::Docx,
        Self::Html,
        Self::Pdf,
        Self::Txt,
        Self::Wpd,
    ];

    /// Look up a format by its declared extension.
    ///
    /// The lookup is exact and lower-case, matching how stored files are
    /// named. A leading dot is tolerated.
    #[inline]
    #[must_use = "returns the detected format without side effects"]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.') {
            "doc" => Some(Self::Doc),
            "docx" => Some(Self::Docx),
            "html" => Some(Self::Html),
            "pdf" => Some(Self::Pdf),
            "txt" => Some(Self::Txt),
            "wpd" => Some(Self::Wpd),
            _ => None,
        }
    }

    /// Canonical file extension, without the dot
    #[inline]
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Doc => "doc",
            Self::Docx => "docx",
            Self::Html => "html",
            Self::Pdf => "pdf",
            Self::Txt => "txt",
            Self::Wpd => "wpd",
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Doc => "DOC",
            Self::Docx => "DOCX",
            Self::Html => "HTML",
            Self::Pdf => "PDF",
            Self::Txt => "TXT",
            Self::Wpd => "WPD",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for DocumentFormat {
    type Err = crate::CourtdocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s)
            .ok_or_else(|| crate::CourtdocError::FormatUnsupported(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension_known() {
        assert_eq!(DocumentFormat::from_extension("pdf"), Some(DocumentFormat::Pdf));
        assert_eq!(DocumentFormat::from_extension(".wpd"), Some(DocumentFormat::Wpd));
        assert_eq!(DocumentFormat::from_extension("txt"), Some(DocumentFormat::Txt));
    }

    #[test]
    fn test_from_extension_unknown() {
        assert_eq!(DocumentFormat::from_extension("rtf"), None);
        assert_eq!(DocumentFormat::from_extension("htm"), None);
        assert_eq!(DocumentFormat::from_extension(""), None);
    }

    #[test]
    fn test_extension_round_trip() {
        for format in DocumentFormat::ALL {
            assert_eq!(DocumentFormat::from_extension(format.extension()), Some(format));
        }
    }

    #[test]
    fn test_from_str_error() {
        let err = "odt".parse::<DocumentFormat>().unwrap_err();
        assert!(matches!(err, crate::CourtdocError::FormatUnsupported(ref s) if s == "odt"));
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&DocumentFormat::Docx).unwrap();
        assert_eq!(json, "\"docx\"");
    }
}
