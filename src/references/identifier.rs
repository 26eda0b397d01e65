//! Dotted module identifiers as they appear in source declarations

use serde::Serialize;
use std::borrow::Borrow;
use std::fmt;

/// A dot-separated module name such as `Microsoft.AspNetCore.Mvc`.
///
/// Equality and ordering are plain, case-sensitive string comparisons, the same
/// way the toolchain resolves namespaces.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ReferenceIdentifier(String);

impl ReferenceIdentifier {
    /// Builds an identifier, rejecting empty names and empty segments (`Foo..Bar`, `.Foo`).
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        if name.is_empty() || name.split('.').any(str::is_empty) {
            return None;
        }
        Some(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }
}

impl fmt::Display for ReferenceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ReferenceIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ReferenceIdentifier {
    fn borrow(&self) -> &str {
        &self.0
    }
}
