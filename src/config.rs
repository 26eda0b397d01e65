//! Configuration management for autobuild
//!
//! Settings are loaded from environment variables with defaults matching the
//! .NET CLI. Command-line flags override individual fields afterwards.
//!
//! # Environment Variables
//!
//! - `AUTOBUILD_TOOLCHAIN`: Toolchain program - default: "dotnet"
//! - `AUTOBUILD_TEMPLATE`: Scaffold template kind - default: "webapi"
//! - `AUTOBUILD_FRAMEWORK`: Target framework - default: "net6.0"
//! - `AUTOBUILD_RUNTIME_ROOT`: Namespace root shipped with the runtime - default: "System"
//! - `AUTOBUILD_SOURCE_EXTENSIONS`: Comma-separated source extensions - default: "cs"
//! - `AUTOBUILD_DESCRIPTOR_EXTENSION`: Build descriptor extension - default: "csproj"
//! - `AUTOBUILD_PLACEHOLDER`: Template sample name to strip - default: "WeatherForecast"
//! - `AUTOBUILD_LOG_LEVEL`: Logging level - default: "info"
//!
//! # Example
//!
//! ```no_run
//! use autobuild::AutobuildConfig;
//!
//! let config = AutobuildConfig::default();
//! config.validate().expect("Invalid configuration");
//! println!("{}", config);
//! ```

use crate::references::{KnownNamespaces, ReferenceIdentifier, ScanConfig};
use crate::toolchain::{DotNetToolchain, ProjectTemplate};
use std::collections::HashMap;
use std::env;
use std::fmt;
use thiserror::Error;

const DEFAULT_TOOLCHAIN: &str = "dotnet";
const DEFAULT_TEMPLATE: &str = "webapi";
const DEFAULT_FRAMEWORK: &str = "net6.0";
const DEFAULT_RUNTIME_ROOT: &str = "System";
const DEFAULT_SOURCE_EXTENSION: &str = "cs";
const DEFAULT_DESCRIPTOR_EXTENSION: &str = "csproj";
const DEFAULT_PLACEHOLDER: &str = "WeatherForecast";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required setting is empty
    #[error("Missing value for {0}")]
    MissingValue(&'static str),

    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutobuildConfig {
    /// Program invoked for every toolchain call
    pub toolchain_program: String,

    /// Template passed to `new`
    pub template_kind: String,

    /// Target framework passed to `new`
    pub framework: String,

    /// Namespace root that never needs a package
    pub runtime_root: String,

    /// Extensions (no leading dot) of files scanned for declarations
    pub source_extensions: Vec<String>,

    /// Extension of the build descriptor
    pub descriptor_extension: String,

    /// Name fragment identifying template sample files
    pub placeholder: String,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for AutobuildConfig {
    /// Built-in defaults overridden by any `AUTOBUILD_*` variables that are set.
    fn default() -> Self {
        let builtin = Self::builtin();

        let var = |key: &str, fallback: String| env::var(key).unwrap_or(fallback);

        let source_extensions = env::var("AUTOBUILD_SOURCE_EXTENSIONS")
            .map(|v| parse_list(&v))
            .unwrap_or(builtin.source_extensions);

        Self {
            toolchain_program: var("AUTOBUILD_TOOLCHAIN", builtin.toolchain_program),
            template_kind: var("AUTOBUILD_TEMPLATE", builtin.template_kind),
            framework: var("AUTOBUILD_FRAMEWORK", builtin.framework),
            runtime_root: var("AUTOBUILD_RUNTIME_ROOT", builtin.runtime_root),
            source_extensions,
            descriptor_extension: var(
                "AUTOBUILD_DESCRIPTOR_EXTENSION",
                builtin.descriptor_extension,
            ),
            placeholder: var("AUTOBUILD_PLACEHOLDER", builtin.placeholder),
            log_level: var("AUTOBUILD_LOG_LEVEL", builtin.log_level).to_lowercase(),
        }
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl AutobuildConfig {
    /// Defaults only, ignoring the environment.
    pub fn builtin() -> Self {
        Self {
            toolchain_program: DEFAULT_TOOLCHAIN.to_string(),
            template_kind: DEFAULT_TEMPLATE.to_string(),
            framework: DEFAULT_FRAMEWORK.to_string(),
            runtime_root: DEFAULT_RUNTIME_ROOT.to_string(),
            source_extensions: vec![DEFAULT_SOURCE_EXTENSION.to_string()],
            descriptor_extension: DEFAULT_DESCRIPTOR_EXTENSION.to_string(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }

    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any setting is empty or malformed
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.toolchain_program.trim().is_empty() {
            return Err(ConfigError::MissingValue("AUTOBUILD_TOOLCHAIN"));
        }
        if self.descriptor_extension.is_empty() {
            return Err(ConfigError::MissingValue("AUTOBUILD_DESCRIPTOR_EXTENSION"));
        }

        let root_is_identifier = ReferenceIdentifier::new(self.runtime_root.as_str())
            .is_some_and(|id| id.segments().all(is_identifier_segment));
        if !root_is_identifier {
            return Err(ConfigError::ValidationFailed(format!(
                "Runtime root '{}' is not a dotted identifier",
                self.runtime_root
            )));
        }

        if self.source_extensions.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "At least one source extension is required".to_string(),
            ));
        }
        let dotted = self
            .source_extensions
            .iter()
            .chain(std::iter::once(&self.descriptor_extension))
            .find(|ext| ext.starts_with('.'));
        if let Some(ext) = dotted {
            return Err(ConfigError::ValidationFailed(format!(
                "Extension '{}' must not start with a dot",
                ext
            )));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    pub fn template(&self, project_name: &str) -> ProjectTemplate {
        ProjectTemplate {
            kind: self.template_kind.clone(),
            name: project_name.to_string(),
            framework: self.framework.clone(),
        }
    }

    pub fn known_namespaces(&self, project_name: &str) -> KnownNamespaces {
        KnownNamespaces::for_project(&self.runtime_root, project_name)
    }

    /// File name of the descriptor the template generates, e.g. `App.csproj`.
    pub fn descriptor_name(&self, project_name: &str) -> String {
        format!("{}.{}", project_name, self.descriptor_extension)
    }

    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            extensions: self.source_extensions.clone(),
            ..ScanConfig::default()
        }
    }

    pub fn toolchain(&self) -> DotNetToolchain {
        DotNetToolchain::new(self.toolchain_program.as_str())
    }

    /// Converts configuration to a display map for output formatting
    pub fn to_display_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();

        map.insert("toolchain".to_string(), self.toolchain_program.clone());
        map.insert("template".to_string(), self.template_kind.clone());
        map.insert("framework".to_string(), self.framework.clone());
        map.insert("runtime_root".to_string(), self.runtime_root.clone());
        map.insert(
            "source_extensions".to_string(),
            self.source_extensions.join(","),
        );
        map.insert(
            "descriptor_extension".to_string(),
            self.descriptor_extension.clone(),
        );
        map.insert("placeholder".to_string(), self.placeholder.clone());
        map.insert("log_level".to_string(), self.log_level.clone());

        map
    }
}

fn is_identifier_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

impl fmt::Display for AutobuildConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Autobuild Configuration:")?;
        writeln!(f, "  Toolchain: {}", self.toolchain_program)?;
        writeln!(f, "  Template: {} ({})", self.template_kind, self.framework)?;
        writeln!(f, "  Runtime Root: {}", self.runtime_root)?;
        writeln!(f, "  Source Extensions: {}", self.source_extensions.join(", "))?;
        writeln!(f, "  Descriptor Extension: {}", self.descriptor_extension)?;
        writeln!(f, "  Placeholder: {}", self.placeholder)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolchain::Toolchain;
    use serial_test::serial;

    /// Helper to temporarily set environment variables for testing
    struct EnvGuard {
        key: String,
        old_value: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &str, value: &str) -> Self {
            let old_value = env::var(key).ok();
            env::set_var(key, value);
            Self {
                key: key.to_string(),
                old_value,
            }
        }

        fn unset(key: &str) -> Self {
            let old_value = env::var(key).ok();
            env::remove_var(key);
            Self {
                key: key.to_string(),
                old_value,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.old_value {
                Some(v) => env::set_var(&self.key, v),
                None => env::remove_var(&self.key),
            }
        }
    }

    #[test]
    #[serial]
    fn test_default_configuration() {
        let _guards = vec![
            EnvGuard::unset("AUTOBUILD_TOOLCHAIN"),
            EnvGuard::unset("AUTOBUILD_TEMPLATE"),
            EnvGuard::unset("AUTOBUILD_FRAMEWORK"),
            EnvGuard::unset("AUTOBUILD_RUNTIME_ROOT"),
            EnvGuard::unset("AUTOBUILD_SOURCE_EXTENSIONS"),
            EnvGuard::unset("AUTOBUILD_DESCRIPTOR_EXTENSION"),
            EnvGuard::unset("AUTOBUILD_PLACEHOLDER"),
            EnvGuard::unset("AUTOBUILD_LOG_LEVEL"),
        ];

        let config = AutobuildConfig::default();

        assert_eq!(config, AutobuildConfig::builtin());
        assert_eq!(config.toolchain_program, DEFAULT_TOOLCHAIN);
        assert_eq!(config.runtime_root, DEFAULT_RUNTIME_ROOT);
        assert_eq!(config.source_extensions, vec!["cs"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_environment_variable_parsing() {
        let _guards = vec![
            EnvGuard::set("AUTOBUILD_TOOLCHAIN", "/opt/dotnet/dotnet"),
            EnvGuard::set("AUTOBUILD_FRAMEWORK", "net8.0"),
            EnvGuard::set("AUTOBUILD_SOURCE_EXTENSIONS", "cs, fs,,vb"),
            EnvGuard::set("AUTOBUILD_PLACEHOLDER", "Sample"),
            EnvGuard::set("AUTOBUILD_LOG_LEVEL", "DEBUG"),
        ];

        let config = AutobuildConfig::default();

        assert_eq!(config.toolchain_program, "/opt/dotnet/dotnet");
        assert_eq!(config.framework, "net8.0");
        assert_eq!(config.source_extensions, vec!["cs", "fs", "vb"]);
        assert_eq!(config.placeholder, "Sample");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.toolchain().name(), "/opt/dotnet/dotnet");
    }

    #[test]
    fn test_validation_rejects_empty_program() {
        let mut config = AutobuildConfig::builtin();
        config.toolchain_program = " ".to_string();

        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingValue("AUTOBUILD_TOOLCHAIN"))
        ));
    }

    #[test]
    fn test_validation_rejects_bad_runtime_root() {
        for root in ["", "System..IO", "1System", "Sys tem"] {
            let mut config = AutobuildConfig::builtin();
            config.runtime_root = root.to_string();
            assert!(config.validate().is_err(), "accepted {:?}", root);
        }

        let mut config = AutobuildConfig::builtin();
        config.runtime_root = "Microsoft.NETCore".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_dotted_extension() {
        let mut config = AutobuildConfig::builtin();
        config.source_extensions = vec![".cs".to_string()];
        assert!(config.validate().is_err());

        let mut config = AutobuildConfig::builtin();
        config.source_extensions.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_log_level() {
        let mut config = AutobuildConfig::builtin();
        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_derived_values() {
        let config = AutobuildConfig::builtin();

        assert_eq!(config.descriptor_name("ProjectName"), "ProjectName.csproj");
        assert_eq!(
            config.template("ProjectName"),
            ProjectTemplate {
                kind: "webapi".to_string(),
                name: "ProjectName".to_string(),
                framework: "net6.0".to_string(),
            }
        );
        assert_eq!(
            config.known_namespaces("ProjectName").roots(),
            &["System".to_string(), "ProjectName".to_string()]
        );
        assert_eq!(config.scan_config().extensions, vec!["cs"]);
    }

    #[test]
    fn test_config_display() {
        let config = AutobuildConfig::builtin();
        let display = format!("{}", config);
        assert!(display.contains("Autobuild Configuration:"));
        assert!(display.contains("Runtime Root: System"));
        assert_eq!(config.to_display_map().get("placeholder").unwrap(), "WeatherForecast");
    }
}
