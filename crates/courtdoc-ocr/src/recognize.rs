//! Text recognition with tesseract

use crate::OcrError;
use courtdoc_core::ToolConfig;
use log::{debug, warn};
use std::path::Path;

/// Run tesseract over a (possibly multi-page) image and return the text
/// it writes to stdout.
///
/// Stderr is advisory: tesseract prints page counts and DPI warnings there
/// even on success.
///
/// # Errors
/// [`OcrError::RecognitionError`] when tesseract cannot be started, or exits
/// unsuccessfully without producing any text.
pub fn recognize_image(image_path: &Path, tools: &ToolConfig) -> Result<String, OcrError> {
    let output = tools
        .tesseract()
        .arg(image_path)
        .arg("stdout")
        .args(["-l", tools.ocr_language.as_str()])
        .run()
        .map_err(|e| OcrError::RecognitionError(e.to_string()))?;

    let text = String::from_utf8_lossy(&output.stdout).into_owned();
    if !output.success() && text.trim().is_empty() {
        let reason = output
            .advisory()
            .unwrap_or_else(|| "tesseract failed".to_string());
        return Err(OcrError::RecognitionError(reason));
    }

    if let Some(diagnostics) = output.diagnostics() {
        debug!("tesseract: {diagnostics}");
    }
    if !output.success() {
        warn!("tesseract exited with {} but produced text", output.status);
    }
    Ok(text)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tesseract() {
        let tools = ToolConfig {
            tesseract: "courtdoc-missing-tesseract".to_string(),
            ..ToolConfig::default()
        };
        let err = recognize_image(Path::new("page.tiff"), &tools).unwrap_err();
        assert!(matches!(err, OcrError::RecognitionError(ref m) if m.contains("failed to start")));
    }

    #[test]
    fn test_stdout_is_the_text() {
        // `echo` prints its arguments: the image path, "stdout", "-l", "eng"
        let tools = ToolConfig {
            tesseract: "echo".to_string(),
            ..ToolConfig::default()
        };
        let text = recognize_image(Path::new("page.tiff"), &tools).unwrap();
        assert_eq!(text.trim(), "page.tiff stdout -l eng");
    }

    #[test]
    fn test_silent_failure() {
        let tools = ToolConfig {
            tesseract: "false".to_string(),
            ..ToolConfig::default()
        };
        assert!(recognize_image(Path::new("page.tiff"), &tools).is_err());
    }
}
