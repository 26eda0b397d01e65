use super::identifier::ReferenceIdentifier;
use crate::pipeline::PipelineError;
use ignore::WalkBuilder;
use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Matches a declaration at the very start of a line:
///
/// ```text
/// using Foo.Bar;
/// global using Foo.Bar;
/// global using global::Foo.Bar;
/// using static Foo.Bar;
/// using Alias = Foo.Bar;
/// ```
///
/// Capture 1 is the referenced identifier. Statement forms such as
/// `using (var x = ...)` or `using var x = ...;` do not match.
const DECLARATION_PATTERN: &str = r"^(?:global\s+)?using\s+(?:static\s+)?(?:[A-Za-z_]\w*\s*=\s*)?(?:global::)?([A-Za-z_]\w*(?:\.[A-Za-z_]\w*)*)\s*(?:;|//|$)";

/// Modifiers that can follow `using` but never name a namespace on their own.
const DECLARATION_KEYWORDS: &[&str] = &["global", "static"];

#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// File extensions (without the dot) treated as source files
    pub extensions: Vec<String>,
    /// Directory names skipped entirely
    pub excluded_dirs: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["cs".to_string()],
            excluded_dirs: vec![
                "bin".to_string(),
                "obj".to_string(),
                ".nuget".to_string(),
                ".git".to_string(),
                crate::pipeline::BACKLOG_DIR.to_string(),
            ],
        }
    }
}

/// Collects the identifiers referenced by declaration lines across a source tree.
pub struct ReferenceScanner {
    config: ScanConfig,
    declaration: Regex,
}

impl ReferenceScanner {
    pub fn new() -> Result<Self, PipelineError> {
        Self::with_config(ScanConfig::default())
    }

    pub fn with_config(config: ScanConfig) -> Result<Self, PipelineError> {
        Ok(Self {
            config,
            declaration: Regex::new(DECLARATION_PATTERN)?,
        })
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Extracts the identifier from a single line, if it is a well-formed declaration.
    pub fn parse_declaration(&self, line: &str) -> Option<ReferenceIdentifier> {
        let caps = self.declaration.captures(line)?;
        let name = caps.get(1)?.as_str();
        if DECLARATION_KEYWORDS.contains(&name) {
            return None;
        }
        ReferenceIdentifier::new(name)
    }

    /// All distinct identifiers declared in one file's text.
    pub fn scan_source(&self, text: &str) -> BTreeSet<ReferenceIdentifier> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        text.lines()
            .filter_map(|line| self.parse_declaration(line))
            .collect()
    }

    /// Walks `root` recursively and unions the declarations of every source file.
    ///
    /// Files that cannot be read are skipped with a warning.
    pub fn scan(&self, root: &Path) -> Result<BTreeSet<ReferenceIdentifier>, PipelineError> {
        if !root.is_dir() {
            return Err(PipelineError::ScanRootNotFound(root.to_path_buf()));
        }

        let start = Instant::now();
        let excluded = self.config.excluded_dirs.clone();
        let mut identifiers = BTreeSet::new();
        let mut files_scanned = 0usize;

        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .follow_links(false)
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                if entry.depth() == 0 || !is_dir {
                    return true;
                }
                let name = entry.file_name().to_string_lossy();
                !excluded.iter().any(|e| e.as_str() == name.as_ref())
            })
            .build();

        for result in walker {
            let entry = match result {
                Ok(e) => e,
                Err(err) => {
                    warn!(error = %err, "Failed to read directory entry");
                    continue;
                }
            };
            let path = entry.path();

            if !entry.file_type().is_some_and(|t| t.is_file()) || !self.is_source_file(path) {
                continue;
            }

            let bytes = match fs::read(path) {
                Ok(b) => b,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "Skipping unreadable source file");
                    continue;
                }
            };
            files_scanned += 1;

            let found = self.scan_source(&String::from_utf8_lossy(&bytes));
            debug!(path = %path.display(), declarations = found.len(), "Scanned source file");
            identifiers.extend(found);
        }

        info!(
            root = %root.display(),
            files_scanned,
            identifiers = identifiers.len(),
            scan_time_ms = start.elapsed().as_millis() as u64,
            "Reference scan completed"
        );

        Ok(identifiers)
    }

    fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.config.extensions.iter().any(|e| e == ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn scanner() -> ReferenceScanner {
        ReferenceScanner::new().unwrap()
    }

    fn names(set: &BTreeSet<ReferenceIdentifier>) -> Vec<&str> {
        set.iter().map(|id| id.as_str()).collect()
    }

    #[test]
    fn test_parse_plain_declaration() {
        let id = scanner().parse_declaration("using Foo.Bar;").unwrap();
        assert_eq!(id.as_str(), "Foo.Bar");
    }

    #[test]
    fn test_parse_without_terminator() {
        let id = scanner().parse_declaration("using Dapper").unwrap();
        assert_eq!(id.as_str(), "Dapper");
    }

    #[test]
    fn test_parse_malformed_declaration_is_skipped() {
        let s = scanner();
        assert!(s.parse_declaration("using ;").is_none());
        assert!(s.parse_declaration("using").is_none());
        assert!(s.parse_declaration("using Foo..Bar;").is_none());
    }

    #[test]
    fn test_parse_ignores_statement_forms() {
        let s = scanner();
        assert!(s.parse_declaration("using (var conn = Open())").is_none());
        assert!(s.parse_declaration("using var conn = Open();").is_none());
    }

    #[test]
    fn test_parse_requires_keyword_at_line_start() {
        let s = scanner();
        assert!(s.parse_declaration("    using Foo.Bar;").is_none());
        assert!(s.parse_declaration("// using Foo.Bar;").is_none());
        assert!(s.parse_declaration("usingFoo.Bar;").is_none());
    }

    #[test]
    fn test_parse_bare_modifier_is_skipped() {
        let s = scanner();
        assert!(s.parse_declaration("using static;").is_none());
        assert!(s.parse_declaration("using global;").is_none());
        assert!(s.parse_declaration("global using static;").is_none());
    }

    #[test]
    fn test_parse_modifier_and_alias_forms() {
        let s = scanner();
        assert_eq!(
            s.parse_declaration("global using Microsoft.Extensions.Hosting;")
                .unwrap()
                .as_str(),
            "Microsoft.Extensions.Hosting"
        );
        assert_eq!(
            s.parse_declaration("using static System.Math;")
                .unwrap()
                .as_str(),
            "System.Math"
        );
        assert_eq!(
            s.parse_declaration("global using global::Newtonsoft.Json;")
                .unwrap()
                .as_str(),
            "Newtonsoft.Json"
        );
        assert_eq!(
            s.parse_declaration("using Json = global::Newtonsoft.Json;")
                .unwrap()
                .as_str(),
            "Newtonsoft.Json"
        );
        assert_eq!(
            s.parse_declaration("using Json = Newtonsoft.Json;")
                .unwrap()
                .as_str(),
            "Newtonsoft.Json"
        );
    }

    #[test]
    fn test_parse_trailing_comment() {
        let id = scanner()
            .parse_declaration("using Dapper; // micro ORM")
            .unwrap();
        assert_eq!(id.as_str(), "Dapper");
    }

    #[test]
    fn test_scan_source_collapses_duplicates_and_handles_bom() {
        let text = "\u{feff}using System;\r\nusing Dapper;\r\nusing Dapper;\r\n\r\nnamespace App {}\r\n";
        let found = scanner().scan_source(text);
        assert_eq!(names(&found), vec!["Dapper", "System"]);
    }

    #[test]
    fn test_scan_walks_tree_and_skips_build_output() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("Controllers")).unwrap();
        fs::create_dir_all(root.join("obj/Debug")).unwrap();
        fs::create_dir_all(root.join("backlog")).unwrap();

        fs::write(root.join("Program.cs"), "using Microsoft.AspNetCore.Hosting;\n").unwrap();
        fs::write(
            root.join("Controllers/AnotherController.cs"),
            "using System;\nusing Microsoft.AspNetCore.Mvc;\nusing ;\n",
        )
        .unwrap();
        fs::write(root.join("obj/Debug/Generated.cs"), "using Hidden.Generated;\n").unwrap();
        fs::write(root.join("backlog/notes.cs"), "using Not.Scanned;\n").unwrap();
        fs::write(root.join("README.md"), "using Not.Source;\n").unwrap();

        let found = scanner().scan(root).unwrap();

        assert_eq!(
            names(&found),
            vec![
                "Microsoft.AspNetCore.Hosting",
                "Microsoft.AspNetCore.Mvc",
                "System"
            ]
        );
    }

    #[test]
    fn test_scan_custom_extensions() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Module.fs"), "using Fs.Lib;\n").unwrap();
        fs::write(dir.path().join("Class.cs"), "using Cs.Lib;\n").unwrap();

        let config = ScanConfig {
            extensions: vec!["fs".to_string()],
            ..ScanConfig::default()
        };
        let found = ReferenceScanner::with_config(config)
            .unwrap()
            .scan(dir.path())
            .unwrap();

        assert_eq!(names(&found), vec!["Fs.Lib"]);
    }

    #[test]
    fn test_scan_missing_root() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        match scanner().scan(&missing) {
            Err(PipelineError::ScanRootNotFound(path)) => assert_eq!(path, missing),
            other => panic!("Expected ScanRootNotFound, got {:?}", other),
        }
    }
}
