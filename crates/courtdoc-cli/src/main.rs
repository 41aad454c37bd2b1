#![allow(
    clippy::needless_pass_by_value, // clap hands over owned values
    clippy::fn_params_excessive_bools, // CLI commands have several boolean flags
)]

//! courtdoc CLI - court document text extraction and opinion XML parsing

mod config;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use config::{Config, CONFIG_FILE_NAME};
use courtdoc_backend::{
    CaseMetadata, DocumentExtractor, LopdfPageCounter, PageCounter, RegexMetadataExtractor,
    TextMetadataExtractor,
};
use courtdoc_core::{DocumentFormat, ExtractionResult};
use courtdoc_xml::{
    BylineJudgeExtractor, CaseNameShortener, CourtTable, LegalCaseNameFormatter, OpinionXmlParser,
};
use log::{info, warn};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "courtdoc",
    about = "Extract text from court documents and parse opinion XML",
    long_about = "Extract text from court documents and parse opinion XML.\n\
                  \n\
                  Supported document formats: PDF, DOC, DOCX, WPD, HTML, TXT.\n\
                  Scanned PDFs can fall back to OCR (ghostscript + tesseract).",
    version
)]
struct Args {
    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log debug information
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Configuration file applied on top of ~/.courtdoc.toml and ./.courtdoc.toml
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract the text of a document
    #[command(long_about = "Extract the text of a document.\n\
                      \n\
                      The format is taken from the file extension unless --format is given.\n\
                      Without --json the text is written to stdout.")]
    Extract {
        /// Document to extract
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Declared format (doc, docx, html, pdf, txt, wpd)
        #[arg(long, value_name = "EXT")]
        format: Option<String>,

        /// OCR scanned PDFs
        #[arg(long, conflicts_with = "no_ocr")]
        ocr: bool,

        /// Never OCR, even if enabled in the configuration
        #[arg(long)]
        no_ocr: bool,

        /// Print a JSON report instead of the text
        #[arg(long)]
        json: bool,

        /// Add docket, disposition and citation found in the text (with --json)
        #[arg(long, requires = "json")]
        metadata: bool,
    },

    /// Extract a filed PDF and report whether it needs OCR
    Recap {
        /// PDF to extract
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Report OCR as needed instead of running it
        #[arg(long)]
        skip_ocr: bool,

        /// Print a JSON report instead of the text
        #[arg(long)]
        json: bool,
    },

    /// Parse an opinion XML file into a JSON record
    ParseXml {
        /// Opinion XML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Key for the fallback court tables (usually the collection folder)
        #[arg(long, value_name = "KEY")]
        court_fallback: Option<String>,

        /// Compact JSON output
        #[arg(long)]
        compact: bool,
    },

    /// Show or create the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the merged configuration
    Show,
    /// Write a default ./.courtdoc.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// JSON output of `extract --json`
#[derive(Debug, Serialize)]
struct ExtractReport<'a> {
    file: &'a Path,
    format: DocumentFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_count: Option<u32>,
    #[serde(flatten)]
    result: &'a ExtractionResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    precedential_status: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<CaseMetadata>,
}

fn init_logging(quiet: bool, verbose: bool) {
    let default_filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.quiet, args.verbose);

    let config = Config::discover(args.config.as_deref())?;

    match args.command {
        Commands::Extract {
            input,
            format,
            ocr,
            no_ocr,
            json,
            metadata,
        } => {
            let ocr_enabled = if ocr {
                true
            } else if no_ocr {
                false
            } else {
                config.extract.ocr
            };
            run_extract(&config, &input, format, ocr_enabled, json, metadata)
        }
        Commands::Recap {
            input,
            skip_ocr,
            json,
        } => run_recap(&config, &input, skip_ocr, json),
        Commands::ParseXml {
            input,
            court_fallback,
            compact,
        } => run_parse_xml(&config, &input, court_fallback, compact),
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                print!("{}", config.to_toml()?);
                Ok(())
            }
            ConfigAction::Init { force } => run_config_init(force),
        },
    }
}

/// Declared format from `--format`, else the lower-cased file extension
fn declared_format(input: &Path, format: Option<String>) -> Result<String> {
    if let Some(format) = format {
        return Ok(format);
    }
    match input.extension() {
        Some(ext) => Ok(ext.to_string_lossy().to_lowercase()),
        None => bail!(
            "Cannot determine the format of {}; pass --format",
            input.display()
        ),
    }
}

fn run_extract(
    config: &Config,
    input: &Path,
    format: Option<String>,
    ocr_enabled: bool,
    json: bool,
    metadata: bool,
) -> Result<()> {
    let declared = declared_format(input, format)?;
    let extractor = DocumentExtractor::new(config.tools.clone());
    let result = extractor.extract(input, &declared, ocr_enabled)?;

    if !json {
        if let Some(message) = &result.error {
            warn!("{}: {message}", input.display());
        }
        print!("{}", result.text);
        return Ok(());
    }

    let format: DocumentFormat = declared.parse()?;
    let page_count = if format == DocumentFormat::Pdf {
        let data = fs::read(input)
            .with_context(|| format!("Failed to read {}", input.display()))?;
        LopdfPageCounter.page_count(&data, format)
    } else {
        None
    };
    let metadata = metadata.then(|| {
        let mut found = CaseMetadata::default();
        found.apply_all(RegexMetadataExtractor::default().extract_from_text(&result.text));
        found
    });

    let report = ExtractReport {
        file: input,
        format,
        page_count,
        result: &result,
        precedential_status: result.precedential_status(),
        metadata,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn run_recap(config: &Config, input: &Path, skip_ocr: bool, json: bool) -> Result<()> {
    if !input.exists() {
        bail!("File not found: {}", input.display());
    }
    let extractor = DocumentExtractor::new(config.tools.clone());
    let extraction = extractor.extract_recap_pdf(input, skip_ocr);

    if json {
        println!("{}", serde_json::to_string_pretty(&extraction)?);
    } else {
        info!("OCR status: {}", extraction.ocr_status);
        print!("{}", extraction.text);
    }
    Ok(())
}

fn run_parse_xml(
    config: &Config,
    input: &Path,
    court_fallback: Option<String>,
    compact: bool,
) -> Result<()> {
    let loaded;
    let courts = match &config.court.table {
        Some(path) => {
            loaded = CourtTable::load(path)
                .with_context(|| format!("Failed to load court table {}", path.display()))?;
            &loaded
        }
        None => CourtTable::builtin(),
    };
    let fallback = court_fallback
        .or_else(|| config.court.fallback.clone())
        .unwrap_or_default();

    let shortener = CaseNameShortener::new();
    let parser = OpinionXmlParser::new(
        courts,
        &BylineJudgeExtractor,
        &LegalCaseNameFormatter,
        &shortener,
    );
    let record = parser
        .parse_file(input, &fallback)
        .with_context(|| format!("Failed to parse {}", input.display()))?;

    let output = if compact {
        serde_json::to_string(&record)?
    } else {
        serde_json::to_string_pretty(&record)?
    };
    println!("{output}");
    Ok(())
}

fn run_config_init(force: bool) -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);
    if path.exists() && !force {
        bail!("{CONFIG_FILE_NAME} already exists; pass --force to overwrite");
    }
    fs::write(path, Config::default().to_toml()?)
        .with_context(|| format!("Failed to write {CONFIG_FILE_NAME}"))?;
    info!("Wrote {CONFIG_FILE_NAME}");
    Ok(())
}
