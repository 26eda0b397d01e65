//! Operator-facing status lines

use super::{LoggingHandler, ProgressEvent, ProgressHandler};

/// Prints one status line per milestone to stdout, then forwards the event to tracing.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleHandler {
    quiet: bool,
}

impl ConsoleHandler {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// The status line for `event`, if it has one.
    pub fn status_line(event: &ProgressEvent) -> Option<String> {
        match event {
            ProgressEvent::ProjectCreated { .. } => Some("Project created.".to_string()),
            ProgressEvent::SourcesMerged {
                source,
                destination,
                ..
            } => Some(format!(
                "All contents from {} copied to {}.",
                source, destination
            )),
            ProgressEvent::TemplateCleaned { placeholder, .. } => Some(format!(
                "Project cleaned from {} references.",
                placeholder
            )),
            ProgressEvent::PackagesInstalled { .. } => Some("Packages installed.".to_string()),
            ProgressEvent::BuildFinished { success: true, .. } => {
                Some("Build successful! No errors found.".to_string())
            }
            ProgressEvent::BuildFinished { success: false, .. } => {
                Some("Build failed! Check build logs for errors.".to_string())
            }
            _ => None,
        }
    }
}

impl ProgressHandler for ConsoleHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        if !self.quiet {
            if let Some(line) = Self::status_line(event) {
                println!("{}", line);
            }
        }
        LoggingHandler.on_progress(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_build_status_lines() {
        let ok = ProgressEvent::BuildFinished {
            success: true,
            build_time: Duration::ZERO,
        };
        let failed = ProgressEvent::BuildFinished {
            success: false,
            build_time: Duration::ZERO,
        };

        assert_eq!(
            ConsoleHandler::status_line(&ok).unwrap(),
            "Build successful! No errors found."
        );
        assert_eq!(
            ConsoleHandler::status_line(&failed).unwrap(),
            "Build failed! Check build logs for errors."
        );
    }

    #[test]
    fn test_scaffold_status_lines() {
        let merged = ProgressEvent::SourcesMerged {
            source: "gen".to_string(),
            destination: "ProjectName".to_string(),
            files: 3,
        };
        assert_eq!(
            ConsoleHandler::status_line(&merged).unwrap(),
            "All contents from gen copied to ProjectName."
        );

        let cleaned = ProgressEvent::TemplateCleaned {
            placeholder: "WeatherForecast".to_string(),
            files_removed: 2,
            references_removed: 1,
        };
        assert_eq!(
            ConsoleHandler::status_line(&cleaned).unwrap(),
            "Project cleaned from WeatherForecast references."
        );
    }

    #[test]
    fn test_internal_events_have_no_status_line() {
        let event = ProgressEvent::PackageInstalled {
            package: "Dapper".to_string(),
        };
        assert!(ConsoleHandler::status_line(&event).is_none());
        ConsoleHandler::new(true).on_progress(&event);
    }
}
