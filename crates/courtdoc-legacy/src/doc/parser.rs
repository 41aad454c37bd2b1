//! antiword-driven text extraction for Microsoft Word 97-2003 files

use anyhow::{Context, Result};
use courtdoc_core::ToolConfig;
use log::warn;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// CFB (Compound File Binary) / OLE2 magic signature
///
/// All OLE-based Microsoft Office formats (DOC, XLS, PPT) start with these 8 bytes.
const CFB_MAGIC_SIGNATURE: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Text extractor for Microsoft Word 97-2003 binary documents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DocBackend;

impl DocBackend {
    /// Extract plain text from a .doc file with antiword.
    ///
    /// Returns the text and any advisory diagnostics antiword wrote to
    /// stderr while still producing output.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file does not exist
    /// - antiword is not installed
    /// - antiword fails without producing text
    #[must_use = "extraction produces a result that should be handled"]
    pub fn extract_text(path: &Path, tools: &ToolConfig) -> Result<(String, Option<String>)> {
        if !path.exists() {
            anyhow::bail!("File not found: {}", path.display());
        }

        if !Self::has_cfb_signature(path)? {
            warn!(
                "{} does not carry an OLE2 signature; trying antiword anyway",
                path.display()
            );
        }

        let output = tools
            .antiword()
            .arg(path)
            .args(["-i", "1"])
            .run_text()
            .with_context(|| format!("antiword failed on {}", path.display()))?;

        Ok(output)
    }

    /// Whether the file starts with the CFB signature
    fn has_cfb_signature(path: &Path) -> Result<bool> {
        let mut file =
            File::open(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
        let mut header = [0u8; 8];
        let mut read = 0;
        while read < header.len() {
            let n = file.read(&mut header[read..])?;
            if n == 0 {
                break;
            }
            read += n;
        }
        Ok(read == header.len() && header == CFB_MAGIC_SIGNATURE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courtdoc_core::ExternalTool;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn antiword_available() -> bool {
        ExternalTool::new("antiword").arg("-h").run().is_ok()
    }

    #[test]
    fn test_cfb_signature_valid() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(&CFB_MAGIC_SIGNATURE).unwrap();
        temp.write_all(&[0x00; 512]).unwrap();
        temp.flush().unwrap();

        assert!(DocBackend::has_cfb_signature(temp.path()).unwrap());
    }

    #[test]
    fn test_cfb_signature_invalid() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"INVALID_").unwrap();
        temp.flush().unwrap();

        assert!(!DocBackend::has_cfb_signature(temp.path()).unwrap());
    }

    #[test]
    fn test_cfb_signature_too_small() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(&CFB_MAGIC_SIGNATURE[..3]).unwrap();
        temp.flush().unwrap();

        assert!(!DocBackend::has_cfb_signature(temp.path()).unwrap());
    }

    #[test]
    fn test_extract_text_file_not_found() {
        let result = DocBackend::extract_text(
            Path::new("/nonexistent/path/opinion.doc"),
            &ToolConfig::default(),
        );
        assert!(result.unwrap_err().to_string().contains("File not found"));
    }

    #[test]
    fn test_extract_text_missing_tool() {
        let temp = NamedTempFile::with_suffix(".doc").unwrap();
        let tools = ToolConfig {
            antiword: "courtdoc-missing-antiword".to_string(),
            ..ToolConfig::default()
        };
        let err = DocBackend::extract_text(temp.path(), &tools).unwrap_err();
        assert!(format!("{err:#}").contains("failed to start"));
    }

    #[test]
    fn test_extract_text_invalid_doc() {
        if !antiword_available() {
            eprintln!("Skipping test: antiword not available");
            return;
        }
        let mut temp = NamedTempFile::with_suffix(".doc").unwrap();
        temp.write_all(b"not a word document").unwrap();
        temp.flush().unwrap();

        // antiword rejects the file; only check it does not panic
        let _ = DocBackend::extract_text(temp.path(), &ToolConfig::default());
    }
}
