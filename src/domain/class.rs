//! Class records as delivered by a class source.

use std::fmt;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::tree::TreePath;

/// Package separator of fully-qualified class names.
pub const PACKAGE_DELIMITER: char = '.';

/// One class definition, keyed by its fully-qualified dotted name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DexClass {
    name: String,
}

impl DexClass {
    /// Accepts a dotted name such as `com.example.Main`.
    ///
    /// Empty names and names with empty segments are rejected.
    pub fn new(name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        if name.split(PACKAGE_DELIMITER).any(str::is_empty) {
            return Err(DomainError::InvalidIdentifier(name));
        }
        Ok(Self { name })
    }

    /// Accepts a type descriptor such as `Lcom/example/Main;`.
    pub fn from_descriptor(descriptor: &str) -> DomainResult<Self> {
        let inner = descriptor
            .strip_prefix('L')
            .and_then(|rest| rest.strip_suffix(';'))
            .ok_or_else(|| DomainError::InvalidDescriptor(descriptor.to_string()))?;
        Self::new(inner.replace('/', "."))
    }

    /// Parses either notation, picking the descriptor form for `L...;`.
    pub fn parse(input: &str) -> DomainResult<Self> {
        if input.starts_with('L') && input.ends_with(';') {
            Self::from_descriptor(input)
        } else {
            Self::new(input)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl TreePath for DexClass {
    fn tree_path(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for DexClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
