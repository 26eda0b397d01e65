use crate::pipeline::PipelineError;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Prefix of every report line
pub const ERROR_LABEL: &str = "Error: ";

/// True when `line` mentions "error" in any letter case.
pub fn is_error_line(line: &str) -> bool {
    line.to_lowercase().contains("error")
}

/// Drops the toolchain's trailing `[...]` metadata, trims, and labels the line.
///
/// Two different sites that share everything before the first `[` collapse to
/// one report line.
pub fn normalize_error_line(line: &str) -> NormalizedError {
    let message = line.split('[').next().unwrap_or(line).trim();
    NormalizedError(format!("{}{}", ERROR_LABEL, message))
}

/// One report line, without its newline.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NormalizedError(String);

impl NormalizedError {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Distinct normalized errors, kept in byte-wise lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorReport {
    errors: BTreeSet<NormalizedError>,
}

impl ErrorReport {
    /// Reduces raw log text. Lines end at `\n`, `\r\n` or a lone `\r`.
    pub fn from_log_text(text: &str) -> Self {
        let errors = text
            .split(|c| c == '\n' || c == '\r')
            .filter(|line| is_error_line(line))
            .map(normalize_error_line)
            .collect();
        Self { errors }
    }

    pub fn iter(&self) -> impl Iterator<Item = &NormalizedError> {
        self.errors.iter()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Report file contents: one line per error, each newline-terminated.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for error in &self.errors {
            out.push_str(error.as_str());
            out.push('\n');
        }
        out
    }
}

/// Reads the build log at `log`, reduces it, and overwrites `report` with the result.
///
/// A log with no error lines yields an empty report file.
pub fn reduce_log_file(log: &Path, report: &Path) -> Result<ErrorReport, PipelineError> {
    if !log.is_file() {
        return Err(PipelineError::MissingLog(log.to_path_buf()));
    }

    let bytes = fs::read(log).map_err(|e| PipelineError::io(log, e))?;
    let reduced = ErrorReport::from_log_text(&String::from_utf8_lossy(&bytes));

    for error in reduced.iter() {
        debug!(error = %error, "Normalized build error");
    }

    if let Some(parent) = report.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| PipelineError::io(parent, e))?;
    }
    fs::write(report, reduced.render()).map_err(|e| PipelineError::io(report, e))?;

    info!(
        log = %log.display(),
        report = %report.display(),
        errors = reduced.len(),
        "Build log reduced"
    );
    Ok(reduced)
}
