//! Reference discovery for generated sources
//!
//! The [`ReferenceScanner`] collects the identifiers named by `using` declarations
//! across a source tree; [`KnownNamespaces`] decides which of them are already
//! provided by the runtime or the project itself. Whatever is left has to be
//! installed as a package.

pub mod filter;
pub mod identifier;
pub mod scanner;

pub use filter::{classify, missing_packages, partition, KnownNamespaces, NamespaceMatch, Partition};
pub use identifier::ReferenceIdentifier;
pub use scanner::{ReferenceScanner, ScanConfig};
