//! Court identification from the free-text `<court>` element
//!
//! A [`CourtTable`] holds three lookups, consulted in order:
//!
//! 1. an ordered list of `(regex, court_id)` patterns, first match wins
//! 2. per-collection special patterns, selected by a caller-supplied
//!    fallback key (usually the name of the folder a file came from)
//! 3. a direct fallback-key to court-id map
//!
//! The built-in table covers state high courts and intermediate appellate
//! courts. A TOML file with the same three sections can replace it:
//!
//! ```toml
//! [[pattern]]
//! regex = "Supreme Court of Vermont"
//! court = "vt"
//!
//! [[special.new_york]]
//! regex = "Appellate Term"
//! court = "nyappterm"
//!
//! [folders]
//! vermont = "vt"
//! ```
//!
//! Tables are immutable once built and meant to be shared by reference.

use anyhow::Context;
use courtdoc_core::{CourtdocError, Result};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Courts whose names would otherwise be caught by a broader state pattern
const SPECIFIC_COURTS: &[(&str, &str)] = &[
    (r"(?i)Supreme Court of Appeals of West Virginia|West Virginia Supreme Court", "wva"),
    (r"(?i)Court of Criminal Appeals of Texas|Texas Court of Criminal Appeals", "texcrimapp"),
    (r"(?i)Court of Criminal Appeals of Oklahoma|Oklahoma Court of Criminal Appeals", "oklacrimapp"),
    (r"(?i)Court of Civil Appeals of Oklahoma|Oklahoma Court of Civil Appeals", "oklacivapp"),
    (r"(?i)Court of Criminal Appeals of Tennessee|Tennessee Court of Criminal Appeals", "tenncrimapp"),
    (r"(?i)Court of Criminal Appeals of Alabama|Alabama Court of Criminal Appeals", "alacrimapp"),
    (r"(?i)Court of Civil Appeals of Alabama|Alabama Court of Civil Appeals", "alacivapp"),
    (r"(?i)Court of Special Appeals of Maryland|Maryland Court of Special Appeals", "mdctspecapp"),
    (r"(?i)Court of Appeals of Maryland|Maryland Court of Appeals", "md"),
    (r"(?i)Court of Appeals of New York|New York Court of Appeals", "ny"),
    (r"(?i)Superior Court of New Jersey|New Jersey Superior Court", "njsuperctappdiv"),
    (r"(?i)Appellate Division", "nyappdiv"),
    (r"(?i)Supreme Judicial Court of Massachusetts|Massachusetts Supreme Judicial Court", "mass"),
    (r"(?i)Appeals Court of Massachusetts|Massachusetts Appeals Court", "massappct"),
    (r"(?i)Supreme Judicial Court of Maine|Maine Supreme Judicial Court", "me"),
    (r"(?i)Superior Court of Pennsylvania|Pennsylvania Superior Court", "pasuperct"),
    (r"(?i)Commonwealth Court of Pennsylvania|Pennsylvania Commonwealth Court", "pacommwct"),
    (r"(?i)District Court of Appeal of Florida|Florida District Court of Appeal", "fladistctapp"),
    (r"(?i)Court of Appeal of California|California Court of Appeal", "calctapp"),
    (r"(?i)Court of Appeal of Louisiana|Louisiana Court of Appeal", "lactapp"),
    (r"(?i)Intermediate Court of Appeals of Hawai.?i", "hawapp"),
    (r"(?i)District of Columbia Court of Appeals|Court of Appeals of the District of Columbia", "dc"),
    (r"(?i)Supreme Court of Errors of Connecticut", "conn"),
];

/// `(name pattern, folder key, high court, intermediate appellate court)`
///
/// Names that contain another state's name come first.
const STATES: &[(&str, &str, &str, Option<&str>)] = &[
    ("Alabama", "alabama", "ala", None),
    ("Alaska", "alaska", "alaska", Some("alaskactapp")),
    ("Arizona", "arizona", "ariz", Some("arizctapp")),
    ("Arkansas", "arkansas", "ark", Some("arkctapp")),
    ("California", "california", "cal", None),
    ("Colorado", "colorado", "colo", Some("coloctapp")),
    ("Connecticut", "connecticut", "conn", Some("connappct")),
    ("Delaware", "delaware", "del", None),
    ("Florida", "florida", "fla", None),
    ("Georgia", "georgia", "ga", Some("gactapp")),
    ("Hawai.?i", "hawaii", "haw", Some("hawapp")),
    ("Idaho", "idaho", "idaho", Some("idahoctapp")),
    ("Illinois", "illinois", "ill", Some("illappct")),
    ("Indiana", "indiana", "ind", Some("indctapp")),
    ("Iowa", "iowa", "iowa", Some("iowactapp")),
    ("Kansas", "kansas", "kan", Some("kanctapp")),
    ("Kentucky", "kentucky", "ky", Some("kyctapp")),
    ("Louisiana", "louisiana", "la", None),
    ("Maine", "maine", "me", None),
    ("Maryland", "maryland", "md", None),
    ("Massachusetts", "massachusetts", "mass", None),
    ("Michigan", "michigan", "mich", Some("michctapp")),
    ("Minnesota", "minnesota", "minn", Some("minnctapp")),
    ("Mississippi", "mississippi", "miss", Some("missctapp")),
    ("Missouri", "missouri", "mo", Some("moctapp")),
    ("Montana", "montana", "mont", None),
    ("Nebraska", "nebraska", "neb", Some("nebctapp")),
    ("Nevada", "nevada", "nev", Some("nevapp")),
    ("New Hampshire", "new_hampshire", "nh", None),
    ("New Jersey", "new_jersey", "nj", None),
    ("New Mexico", "new_mexico", "nm", Some("nmctapp")),
    ("New York", "new_york", "nysupct", None),
    ("North Carolina", "north_carolina", "nc", Some("ncctapp")),
    ("North Dakota", "north_dakota", "nd", Some("ndctapp")),
    ("Ohio", "ohio", "ohio", Some("ohioctapp")),
    ("Oklahoma", "oklahoma", "okla", None),
    ("Oregon", "oregon", "or", Some("orctapp")),
    ("Pennsylvania", "pennsylvania", "pa", None),
    ("Rhode Island", "rhode_island", "ri", None),
    ("South Carolina", "south_carolina", "sc", Some("scctapp")),
    ("South Dakota", "south_dakota", "sd", None),
    ("Tennessee", "tennessee", "tenn", Some("tennctapp")),
    ("Texas", "texas", "tex", Some("texapp")),
    ("Utah", "utah", "utah", Some("utahctapp")),
    ("Vermont", "vermont", "vt", None),
    ("West Virginia", "west_virginia", "wva", None),
    ("Virginia", "virginia", "va", Some("vactapp")),
    ("Washington", "washington", "wash", Some("washctapp")),
    ("Wisconsin", "wisconsin", "wis", Some("wisctapp")),
    ("Wyoming", "wyoming", "wyo", None),
];

/// Lower courts of a collection, tried only with that collection's key
const SPECIAL_COURTS: &[(&str, &[(&str, &str)])] = &[
    (
        "new_york",
        &[
            ("Appellate Term", "nyappterm"),
            ("Court of Claims", "nyclaimsct"),
            ("Family Court", "nyfamct"),
            ("Surrogate", "nysurct"),
            ("Civil Court", "nycivct"),
            ("Criminal Court", "nycrimct"),
            ("Supreme Court", "nysupct"),
        ],
    ),
    (
        "california",
        &[
            ("Appellate (Department|Division)", "calappdeptsuper"),
            ("Superior Court", "calsuperct"),
        ],
    ),
    (
        "pennsylvania",
        &[("Commonwealth", "pacommwct"), ("Superior", "pasuperct")],
    ),
    ("texas", &[("Criminal", "texcrimapp"), ("Appeals", "texapp")]),
    ("connecticut", &[("Superior Court", "connsuperct")]),
    (
        "delaware",
        &[
            ("Superior Court", "delsuperct"),
            ("Chancery", "delch"),
            ("Family Court", "delfamct"),
        ],
    ),
    (
        "new_jersey",
        &[("Superior Court", "njsuperctappdiv"), ("Tax Court", "njtaxct")],
    ),
];

static BUILTIN: Lazy<CourtTable> = Lazy::new(CourtTable::build_builtin);

/// A compiled `(regex, court_id)` pair
#[derive(Debug, Clone)]
pub struct CourtPattern {
    regex: Regex,
    court_id: String,
}

impl CourtPattern {
    /// Compile a pattern
    ///
    /// # Errors
    /// Returns the regex error if `pattern` is invalid.
    pub fn new(
        pattern: &str,
        court_id: impl Into<String>,
    ) -> std::result::Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
            court_id: court_id.into(),
        })
    }

    /// Court identifier this pattern resolves to
    #[inline]
    #[must_use]
    pub fn court_id(&self) -> &str {
        &self.court_id
    }

    /// Whether the pattern occurs anywhere in `court`
    #[inline]
    #[must_use]
    pub fn is_match(&self, court: &str) -> bool {
        self.regex.is_match(court)
    }
}

/// Court lookup tables
#[derive(Debug, Clone, Default)]
pub struct CourtTable {
    patterns: Vec<CourtPattern>,
    special: HashMap<String, Vec<CourtPattern>>,
    folders: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct PatternEntry {
    regex: String,
    court: String,
}

#[derive(Debug, Deserialize)]
struct CourtTableFile {
    #[serde(default, rename = "pattern")]
    patterns: Vec<PatternEntry>,
    #[serde(default)]
    special: HashMap<String, Vec<PatternEntry>>,
    #[serde(default)]
    folders: HashMap<String, String>,
}

fn compile(entries: &[PatternEntry]) -> anyhow::Result<Vec<CourtPattern>> {
    entries
        .iter()
        .map(|e| {
            CourtPattern::new(&e.regex, e.court.clone())
                .with_context(|| format!("invalid court pattern for {}: {}", e.court, e.regex))
        })
        .collect()
}

impl CourtTable {
    /// The built-in table, compiled on first use
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Build a table from already compiled parts
    #[must_use]
    pub fn new(
        patterns: Vec<CourtPattern>,
        special: HashMap<String, Vec<CourtPattern>>,
        folders: HashMap<String, String>,
    ) -> Self {
        Self {
            patterns,
            special,
            folders,
        }
    }

    /// Parse a table from TOML text
    ///
    /// # Errors
    /// Returns [`CourtdocError::ParserError`] for malformed TOML or an invalid
    /// regular expression.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: CourtTableFile = toml::from_str(text).map_err(|e| {
            CourtdocError::ParserError(anyhow::Error::new(e).context("invalid court table"))
        })?;

        let patterns = compile(&file.patterns)?;
        let mut special = HashMap::with_capacity(file.special.len());
        for (key, entries) in &file.special {
            special.insert(key.clone(), compile(entries)?);
        }
        Ok(Self::new(patterns, special, file.folders))
    }

    /// Load a table from a TOML file
    ///
    /// # Errors
    /// Returns an IO error if the file cannot be read, otherwise as
    /// [`CourtTable::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Number of ordered patterns
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the table has no ordered patterns
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Resolve a raw court string to a court identifier.
    ///
    /// # Errors
    /// [`CourtdocError::CourtResolution`] when no table yields a court.
    pub fn resolve(&self, raw_court: &str, fallback: &str) -> Result<String> {
        let court = normalize_court_text(raw_court);

        let found = self
            .patterns
            .iter()
            .find(|p| p.is_match(court))
            .or_else(|| {
                self.special
                    .get(fallback)
                    .and_then(|patterns| patterns.iter().find(|p| p.is_match(court)))
            })
            .map(|p| p.court_id.clone())
            .or_else(|| self.folders.get(fallback).cloned());

        match found {
            Some(court_id) => {
                debug!("Resolved court {court:?} to {court_id}");
                Ok(court_id)
            }
            None => Err(CourtdocError::CourtResolution(raw_court.to_string())),
        }
    }

    fn build_builtin() -> Self {
        let mut pairs: Vec<(String, &str)> = SPECIFIC_COURTS
            .iter()
            .map(|(regex, court)| ((*regex).to_string(), *court))
            .collect();
        for (name, _, high, intermediate) in STATES {
            if let Some(intermediate) = intermediate {
                pairs.push((
                    format!(
                        r"(?i)\bCourt of Appeals? of (the State of )?{name}\b|\b{name} Court of Appeals?\b|\bAppellate Court of {name}\b|\b{name} Appellate Court\b"
                    ),
                    *intermediate,
                ));
            }
            pairs.push((
                format!(r"(?i)\bSupreme Court of (the State of )?{name}\b|\b{name} Supreme Court\b"),
                *high,
            ));
        }

        let patterns = pairs
            .iter()
            .map(|(regex, court)| {
                CourtPattern::new(regex, *court).expect("Invalid built-in court regex")
            })
            .collect();

        let special = SPECIAL_COURTS
            .iter()
            .map(|(key, entries)| {
                let compiled = entries
                    .iter()
                    .map(|(regex, court)| {
                        CourtPattern::new(regex, *court)
                            .expect("Invalid built-in special court regex")
                    })
                    .collect();
                ((*key).to_string(), compiled)
            })
            .collect();

        let folders = STATES
            .iter()
            .map(|(_, folder, high, _)| ((*folder).to_string(), (*high).to_string()))
            .collect();

        Self::new(patterns, special, folders)
    }
}

/// Trim a raw court string to the part worth matching.
///
/// Cut at the first `.` unless the text contains `St.` (as in "St. Louis"),
/// then at the first `,` unless it names a Superior Court, whose location
/// follows the comma.
#[must_use]
pub fn normalize_court_text(raw_court: &str) -> &str {
    let mut court = raw_court;
    if !court.contains("St.") {
        if let Some(dot) = court.find('.') {
            court = &court[..dot];
        }
    }
    if !court.contains("Superior Court") {
        if let Some(comma) = court.find(',') {
            court = &court[..comma];
        }
    }
    court
}
