//! Metadata pulled from extracted opinion text
//!
//! Some courts only publish the docket number, disposition or neutral
//! citation inside the document itself. A [`TextMetadataExtractor`] finds
//! those values and returns them as typed [`MetadataUpdate`]s; the caller
//! merges them into its records with [`CaseMetadata::apply`].

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// One change to a related record, keyed by the kind of record it targets
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MetadataUpdate {
    /// Fields of the docket
    Docket {
        /// Docket number as printed
        docket_number: Option<String>,
    },
    /// Fields of the opinion cluster
    Cluster {
        /// Disposition (e.g. `Affirmed`)
        disposition: Option<String>,
    },
    /// A citation to attach to the cluster
    Citation {
        /// Citation string
        cite: String,
    },
}

/// Docket, cluster and citation fields a caller keeps for one opinion
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseMetadata {
    /// Docket number
    pub docket_number: Option<String>,
    /// Disposition
    pub disposition: Option<String>,
    /// Citations, without duplicates
    pub citations: Vec<String>,
}

impl CaseMetadata {
    /// Merge one update.
    ///
    /// Docket and cluster updates overwrite only the fields they carry.
    /// Citations are get-or-create: an existing citation is not added twice.
    pub fn apply(&mut self, update: MetadataUpdate) {
        match update {
            MetadataUpdate::Docket { docket_number } => {
                if docket_number.is_some() {
                    self.docket_number = docket_number;
                }
            }
            MetadataUpdate::Cluster { disposition } => {
                if disposition.is_some() {
                    self.disposition = disposition;
                }
            }
            MetadataUpdate::Citation { cite } => {
                if !self.citations.contains(&cite) {
                    self.citations.push(cite);
                }
            }
        }
    }

    /// Merge updates in order
    pub fn apply_all(&mut self, updates: impl IntoIterator<Item = MetadataUpdate>) {
        for update in updates {
            self.apply(update);
        }
    }
}

/// Court-specific extraction of metadata from document text
pub trait TextMetadataExtractor {
    /// Updates found in `text`, in the order they should be applied
    fn extract_from_text(&self, text: &str) -> Vec<MetadataUpdate>;
}

static DEFAULT_DOCKET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Docket Number: (?P<docket>\d+-\d+)").expect("Invalid docket regex")
});

static DEFAULT_DISPOSITION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Disposition: (?P<disposition>\w+)").expect("Invalid disposition regex")
});

static DEFAULT_CITATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"20\d{2} VT \d+").expect("Invalid citation regex"));

/// Regex-driven extractor.
///
/// The docket pattern must have a `docket` group and the disposition pattern a
/// `disposition` group; the whole citation match is used. Defaults read the
/// labelled fields of Vermont Supreme Court opinions.
#[derive(Debug, Clone)]
pub struct RegexMetadataExtractor {
    docket: Regex,
    disposition: Regex,
    citation: Regex,
}

impl Default for RegexMetadataExtractor {
    fn default() -> Self {
        Self {
            docket: DEFAULT_DOCKET.clone(),
            disposition: DEFAULT_DISPOSITION.clone(),
            citation: DEFAULT_CITATION.clone(),
        }
    }
}

impl RegexMetadataExtractor {
    /// Build an extractor from custom patterns
    ///
    /// # Errors
    /// Returns the regex error of the first invalid pattern.
    pub fn new(docket: &str, disposition: &str, citation: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            docket: Regex::new(docket)?,
            disposition: Regex::new(disposition)?,
            citation: Regex::new(citation)?,
        })
    }
}

impl TextMetadataExtractor for RegexMetadataExtractor {
    fn extract_from_text(&self, text: &str) -> Vec<MetadataUpdate> {
        let mut updates = Vec::new();

        if let Some(m) = self.docket.captures(text).and_then(|c| c.name("docket")) {
            updates.push(MetadataUpdate::Docket {
                docket_number: Some(m.as_str().to_string()),
            });
        }
        if let Some(m) = self
            .disposition
            .captures(text)
            .and_then(|c| c.name("disposition"))
        {
            updates.push(MetadataUpdate::Cluster {
                disposition: Some(m.as_str().to_string()),
            });
        }
        if let Some(m) = self.citation.find(text) {
            updates.push(MetadataUpdate::Citation {
                cite: m.as_str().to_string(),
            });
        }

        debug!("Found {} metadata updates in text", updates.len());
        updates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERMONT_TEXT: &str = "2023 VT 12\n\nDocket Number: 22-AP-100\n\
        Docket Number: 2022-100\nDisposition: Affirmed.\n";

    #[test]
    fn test_regex_extractor_defaults() {
        let updates = RegexMetadataExtractor::default().extract_from_text(VERMONT_TEXT);
        assert_eq!(
            updates,
            vec![
                MetadataUpdate::Docket {
                    docket_number: Some("2022-100".to_string())
                },
                MetadataUpdate::Cluster {
                    disposition: Some("Affirmed".to_string())
                },
                MetadataUpdate::Citation {
                    cite: "2023 VT 12".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_nothing_found() {
        assert!(RegexMetadataExtractor::default()
            .extract_from_text("Opinion text")
            .is_empty());
    }

    #[test]
    fn test_apply_merges_by_kind() {
        let mut metadata = CaseMetadata {
            docket_number: Some("1-1".to_string()),
            disposition: Some("Reversed".to_string()),
            citations: vec!["2020 VT 1".to_string()],
        };
        metadata.apply_all([
            MetadataUpdate::Docket {
                docket_number: None,
            },
            MetadataUpdate::Cluster {
                disposition: Some("Affirmed".to_string()),
            },
            MetadataUpdate::Citation {
                cite: "2020 VT 1".to_string(),
            },
            MetadataUpdate::Citation {
                cite: "2023 VT 12".to_string(),
            },
        ]);
        assert_eq!(metadata.docket_number.as_deref(), Some("1-1"));
        assert_eq!(metadata.disposition.as_deref(), Some("Affirmed"));
        assert_eq!(metadata.citations, vec!["2020 VT 1", "2023 VT 12"]);
    }

    #[test]
    fn test_custom_patterns() {
        let extractor = RegexMetadataExtractor::new(
            r"No\. (?P<docket>\S+)",
            r"(?P<disposition>AFFIRMED)",
            r"\d+ A\.3d \d+",
        )
        .unwrap();
        let updates = extractor.extract_from_text("No. 17-55\nAFFIRMED\n123 A.3d 456");
        assert_eq!(updates.len(), 3);
        assert!(RegexMetadataExtractor::new("(", "x", "y").is_err());
    }
}
