//! Output formatting for multiple formats
//!
//! Pipeline and scan summaries render as JSON, YAML, or human-readable text.
//!
//! # Example
//!
//! ```ignore
//! use autobuild::cli::output::{OutputFormat, OutputFormatter};
//!
//! let formatter = OutputFormatter::new(OutputFormat::Json);
//! println!("{}", formatter.format_scan(&summary)?);
//! ```

use anyhow::{Context, Result};
use serde::Serialize;

use crate::pipeline::{PipelineSummary, ScanSummary};
use crate::references::ReferenceIdentifier;

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format
    Yaml,
    /// Human-readable formatted text
    Human,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_pipeline(&self, summary: &PipelineSummary) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(summary, "pipeline summary"),
            OutputFormat::Yaml => to_yaml(summary, "pipeline summary"),
            OutputFormat::Human => Ok(self.format_pipeline_human(summary)),
        }
    }

    pub fn format_scan(&self, summary: &ScanSummary) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(summary, "scan summary"),
            OutputFormat::Yaml => to_yaml(summary, "scan summary"),
            OutputFormat::Human => Ok(self.format_scan_human(summary)),
        }
    }

    fn format_pipeline_human(&self, summary: &PipelineSummary) -> String {
        let mut output = String::new();

        output.push_str(&format!("Project:    {}\n", summary.project_root.display()));
        output.push_str(&format!(
            "Referenced: {} namespace(s)\n",
            summary.discovered.len()
        ));
        if summary.installed.is_empty() {
            output.push_str("Installed:  (none)\n");
        } else {
            output.push_str(&format!(
                "Installed:  {} ({})\n",
                summary.installed.len(),
                summary.installed.join(", ")
            ));
        }
        output.push_str(&format!(
            "Build:      {}\n",
            if summary.build_succeeded {
                "succeeded"
            } else {
                "failed"
            }
        ));
        output.push_str(&format!("Build log:  {}\n", summary.build_log.display()));
        output.push_str(&format!(
            "Report:     {} ({} error(s))\n",
            summary.error_report.display(),
            summary.errors.len()
        ));

        if !summary.errors.is_empty() {
            output.push('\n');
            for line in &summary.errors {
                output.push_str(&format!("  {}\n", line));
            }
        }

        output
    }

    fn format_scan_human(&self, summary: &ScanSummary) -> String {
        let mut output = String::new();

        output.push_str(&format!("Project:     {}\n", summary.project_root.display()));
        output.push_str(&format!("Known roots: {}\n\n", summary.known_roots.join(", ")));

        push_section(&mut output, "Referenced", &summary.discovered);
        push_section(&mut output, "Missing", &summary.missing);

        output
    }
}

fn push_section(output: &mut String, title: &str, identifiers: &[ReferenceIdentifier]) {
    output.push_str(&format!("{} ({}):\n", title, identifiers.len()));
    for id in identifiers {
        output.push_str(&format!("  {}\n", id));
    }
}

fn to_json<T: Serialize>(value: &T, what: &str) -> Result<String> {
    serde_json::to_string_pretty(value).with_context(|| format!("Failed to serialize {} to JSON", what))
}

fn to_yaml<T: Serialize>(value: &T, what: &str) -> Result<String> {
    serde_yaml::to_string(value).with_context(|| format!("Failed to serialize {} to YAML", what))
}
