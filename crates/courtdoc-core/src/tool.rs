//! External tool invocation shared by every extractor
//!
//! All converters (antiword, docx2txt, pdftotext, wpd2html, ghostscript,
//! tesseract) are blocking child processes. This module owns the common
//! discipline:
//!
//! - spawn failures and unsuccessful exits map to
//!   [`CourtdocError::ToolInvocation`]
//! - a non-empty error stream is advisory: it is logged and reported, but it
//!   only fails the call when the tool also produced no usable text
//! - temporary artifacts are [`tempfile`] handles, removed when dropped, so
//!   cleanup happens on every exit path including `?` propagation
//!
//! No timeout is imposed here; callers that need one must kill the child
//! themselves.

use crate::{CourtdocError, Result};
use log::{debug, warn};
use std::ffi::{OsStr, OsString};
use std::process::{Command, ExitStatus, Stdio};
use tempfile::NamedTempFile;

/// A configured external program invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalTool {
    program: String,
    args: Vec<OsString>,
}

impl ExternalTool {
    /// Prepare an invocation of `program` (looked up on `PATH` unless absolute)
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument
    #[must_use]
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Append several arguments
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Program name as configured
    #[inline]
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Run to completion, capturing stdout, stderr and the exit status.
    ///
    /// Stdin is closed. The child's file descriptors are not inherited beyond
    /// the three standard streams.
    ///
    /// # Errors
    /// Returns [`CourtdocError::ToolInvocation`] if the program cannot be
    /// started (typically: not installed).
    pub fn run(&self) -> Result<ToolOutput> {
        debug!("Running {} {:?}", self.program, self.args);
        let output = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| CourtdocError::tool(&self.program, format!("failed to start: {e}")))?;

        Ok(ToolOutput {
            program: self.program.clone(),
            stdout: output.stdout,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            status: output.status,
        })
    }

    /// Run and return stdout as text, applying the advisory-stderr rule.
    ///
    /// Returns the decoded text and the advisory diagnostics, if any.
    ///
    /// # Errors
    /// See [`ToolOutput::into_text`].
    pub fn run_text(&self) -> Result<(String, Option<String>)> {
        self.run()?.into_text()
    }
}

/// Captured result of a finished tool
#[derive(Debug, Clone)]
pub struct ToolOutput {
    program: String,
    /// Raw standard output
    pub stdout: Vec<u8>,
    /// Standard error, lossily decoded
    pub stderr: String,
    /// Exit status
    pub status: ExitStatus,
}

impl ToolOutput {
    /// Whether the tool exited with status zero
    #[inline]
    #[must_use]
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Trimmed stderr, or `None` when the tool wrote nothing there
    #[must_use]
    pub fn diagnostics(&self) -> Option<String> {
        let trimmed = self.stderr.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    /// Diagnostics to report for this run: stderr if any, else the exit
    /// status when it was non-zero
    #[must_use]
    pub fn advisory(&self) -> Option<String> {
        self.diagnostics().or_else(|| {
            (!self.success()).then(|| format!("{} exited with {}", self.program, self.status))
        })
    }

    /// Decode stdout (UTF-8, invalid sequences replaced).
    ///
    /// Text is usable when it contains anything besides whitespace. Usable
    /// text is returned together with any advisory diagnostics (logged at
    /// `warn`). Without usable text, a failed exit or non-empty stderr
    /// becomes an error; a clean exit with empty output is an empty success.
    ///
    /// # Errors
    /// [`CourtdocError::ToolInvocation`] when the tool produced no usable
    /// text and reported a problem.
    pub fn into_text(self) -> Result<(String, Option<String>)> {
        let advisory = self.advisory();
        let text = String::from_utf8_lossy(&self.stdout).into_owned();

        if !text.trim().is_empty() {
            if let Some(msg) = &advisory {
                warn!("{} reported: {msg}", self.program);
            }
            return Ok((text, advisory));
        }

        match advisory {
            Some(msg) => Err(CourtdocError::tool(self.program, msg)),
            None => Ok((text, None)),
        }
    }
}

/// Create a scoped temporary file named `<prefix>*<suffix>`.
///
/// The file is deleted when the returned handle is dropped.
///
/// # Errors
/// Returns an IO error if the file cannot be created.
pub fn scoped_temp_file(prefix: &str, suffix: &str) -> Result<NamedTempFile> {
    Ok(tempfile::Builder::new()
        .prefix(prefix)
        .suffix(suffix)
        .tempfile()?)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> ExternalTool {
        ExternalTool::new("sh").arg("-c").arg(script)
    }

    #[test]
    fn test_run_captures_streams() {
        let out = sh("printf 'hello'; printf 'warn' >&2").run().unwrap();
        assert!(out.success());
        assert_eq!(out.stdout, b"hello");
        assert_eq!(out.diagnostics().as_deref(), Some("warn"));
    }

    #[test]
    fn test_stderr_is_advisory_when_text_present() {
        let (text, advisory) = sh("printf 'body'; printf 'minor issue' >&2; exit 3")
            .run_text()
            .unwrap();
        assert_eq!(text, "body");
        assert_eq!(advisory.as_deref(), Some("minor issue"));
    }

    #[test]
    fn test_failure_without_text_is_error() {
        let err = sh("printf 'cannot open' >&2; exit 1").run_text().unwrap_err();
        match err {
            CourtdocError::ToolInvocation { tool, message } => {
                assert_eq!(tool, "sh");
                assert!(message.contains("cannot open"));
            }
            other => panic!("Expected ToolInvocation, got {other:?}"),
        }
    }

    #[test]
    fn test_silent_nonzero_exit_reports_status() {
        let err = sh("exit 2").run_text().unwrap_err();
        assert!(err.to_string().contains("exited with"));
    }

    #[test]
    fn test_clean_empty_output_is_ok() {
        let (text, advisory) = sh("true").run_text().unwrap();
        assert!(text.is_empty());
        assert!(advisory.is_none());
    }

    #[test]
    fn test_missing_program() {
        let err = ExternalTool::new("courtdoc-definitely-not-installed")
            .run()
            .unwrap_err();
        assert!(matches!(err, CourtdocError::ToolInvocation { .. }));
        assert!(err.to_string().contains("failed to start"));
    }

    #[test]
    fn test_scoped_temp_file_removed_on_drop() {
        let tmp = scoped_temp_file("extract_file_", ".pdf").unwrap();
        let path = tmp.path().to_path_buf();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("extract_file_"));
        assert!(name.ends_with(".pdf"));
        assert!(path.exists());
        drop(tmp);
        assert!(!path.exists());
    }
}
