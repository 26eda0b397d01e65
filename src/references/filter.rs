//! Known-namespace filtering
//!
//! An identifier is satisfied when it *is* a known root or lives underneath one
//! (`<root>.` prefix). Plain substring or prefix matching is wrong here:
//! `Systematic.Foo` is not part of `System`.

use super::identifier::ReferenceIdentifier;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

/// How an identifier relates to a single namespace root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamespaceMatch {
    /// The identifier is the root itself.
    Exact,
    /// The identifier starts with `<root>.`.
    Descendant,
    Unrelated,
}

impl NamespaceMatch {
    pub fn is_satisfied(self) -> bool {
        !matches!(self, NamespaceMatch::Unrelated)
    }
}

/// Compares `identifier` against one namespace `root`.
pub fn classify(identifier: &str, root: &str) -> NamespaceMatch {
    if root.is_empty() {
        return NamespaceMatch::Unrelated;
    }
    if identifier == root {
        return NamespaceMatch::Exact;
    }
    match identifier.strip_prefix(root) {
        Some(rest) if rest.starts_with('.') => NamespaceMatch::Descendant,
        _ => NamespaceMatch::Unrelated,
    }
}

/// Namespace roots that never need a package install.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KnownNamespaces {
    roots: Vec<String>,
}

impl KnownNamespaces {
    pub fn new<I, S>(roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let roots = roots
            .into_iter()
            .map(Into::into)
            .filter(|root: &String| !root.is_empty() && seen.insert(root.clone()))
            .collect();
        Self { roots }
    }

    /// The runtime's own root namespace plus the project's name.
    pub fn for_project(runtime_root: &str, project_name: &str) -> Self {
        Self::new([runtime_root, project_name])
    }

    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    pub fn is_satisfied(&self, identifier: &str) -> bool {
        self.roots
            .iter()
            .any(|root| classify(identifier, root).is_satisfied())
    }
}

/// Identifiers split into those already provided and those needing installation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Partition {
    pub satisfied: Vec<ReferenceIdentifier>,
    pub missing: Vec<ReferenceIdentifier>,
}

/// Splits `identifiers` against `known`. Both halves come back sorted and free of duplicates.
pub fn partition<'a, I>(identifiers: I, known: &KnownNamespaces) -> Partition
where
    I: IntoIterator<Item = &'a ReferenceIdentifier>,
{
    let unique: BTreeSet<&ReferenceIdentifier> = identifiers.into_iter().collect();
    let mut result = Partition::default();

    for identifier in unique {
        if known.is_satisfied(identifier.as_str()) {
            result.satisfied.push(identifier.clone());
        } else {
            result.missing.push(identifier.clone());
        }
    }

    result
}

/// The install sequence: every identifier not covered by `known`, sorted.
pub fn missing_packages<'a, I>(identifiers: I, known: &KnownNamespaces) -> Vec<ReferenceIdentifier>
where
    I: IntoIterator<Item = &'a ReferenceIdentifier>,
{
    partition(identifiers, known).missing
}
