//! Converter for `WordPerfect` (.wpd) documents using libwpd

use anyhow::{Context, Result};
use courtdoc_core::ToolConfig;
use log::warn;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// `WordPerfect` 6+ files start with `0xFF` followed by `WPC`
const WPC_MAGIC_SIGNATURE: [u8; 4] = [0xFF, b'W', b'P', b'C'];

/// Backend for `WordPerfect` documents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WpdBackend;

impl WpdBackend {
    /// Convert a `WordPerfect` document to HTML with `wpd2html`.
    ///
    /// Returns the raw HTML and any advisory diagnostics.
    ///
    /// ## Errors
    ///
    /// Returns an error if:
    /// - File does not exist
    /// - `wpd2html` is not installed
    /// - Conversion fails without producing output
    #[must_use = "conversion produces a result that should be handled"]
    pub fn convert_to_html(path: &Path, tools: &ToolConfig) -> Result<(String, Option<String>)> {
        if !path.exists() {
            anyhow::bail!("File not found: {}", path.display());
        }

        if !Self::has_wpc_signature(path)? {
            // WordPerfect 5.x files have no WPC header; libwpd still reads them.
            warn!("{} has no WPC header", path.display());
        }

        let output = tools
            .wpd2html()
            .arg(path)
            .run_text()
            .with_context(|| format!("wpd2html failed on {}", path.display()))?;

        Ok(output)
    }

    /// Whether the file starts with the `WordPerfect` 6+ signature
    fn has_wpc_signature(path: &Path) -> Result<bool> {
        let mut header = Vec::with_capacity(WPC_MAGIC_SIGNATURE.len());
        File::open(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?
            .take(WPC_MAGIC_SIGNATURE.len() as u64)
            .read_to_end(&mut header)?;
        Ok(header == WPC_MAGIC_SIGNATURE)
    }
}
