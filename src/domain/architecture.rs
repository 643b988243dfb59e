//! Native-library grouping by target architecture (ABI).

use std::collections::BTreeMap;

use itertools::Itertools;
use tracing::{instrument, trace};

/// Archive directory holding per-ABI native libraries.
pub const NATIVE_LIB_PREFIX: &str = "lib/";

/// One path record inside the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Path inside the archive, `/` separated; directories end in `/`
    pub name: String,
    pub is_directory: bool,
    /// Uncompressed size in bytes, 0 for directories
    pub size: u64,
}

impl ArchiveEntry {
    pub fn file(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            is_directory: false,
            size,
        }
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_directory: true,
            size: 0,
        }
    }
}

/// Native libraries shipped for one ABI, sorted by entry name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Architecture {
    pub name: String,
    pub entries: Vec<ArchiveEntry>,
}

impl Architecture {
    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(|e| e.size).sum()
    }
}

/// Partition the entries under [`NATIVE_LIB_PREFIX`] by their first path segment.
///
/// - an empty immediate subdirectory (`lib/x86/`) registers `x86` without files
/// - a stray file directly under the prefix (`lib/foo.so`) is skipped
/// - a nested file (`lib/x86/libfoo.so`) is added to `x86`
/// - an empty architecture segment (`lib//`, `lib//libfoo.so`) is skipped
///
/// Architectures come back sorted by name, their entries sorted by entry name.
#[instrument(level = "debug", skip_all)]
pub fn group_architectures<'a, I>(entries: I) -> Vec<Architecture>
where
    I: IntoIterator<Item = &'a ArchiveEntry>,
{
    let mut groups: BTreeMap<&str, Vec<&ArchiveEntry>> = BTreeMap::new();

    for entry in entries {
        let Some(relative) = entry.name.strip_prefix(NATIVE_LIB_PREFIX) else {
            continue;
        };

        if entry.is_directory {
            if relative.matches('/').count() == 1 {
                if let Some((arch, _)) = relative.split_once('/').filter(|(a, _)| !a.is_empty()) {
                    groups.entry(arch).or_default();
                }
            }
            continue;
        }

        match relative.split_once('/') {
            Some((arch, _)) if !arch.is_empty() => groups.entry(arch).or_default().push(entry),
            Some(_) => trace!(entry = %entry.name, "skipping entry without architecture"),
            None => trace!(entry = %entry.name, "skipping stray native file"),
        }
    }

    groups
        .into_iter()
        .map(|(name, files)| Architecture {
            name: name.to_string(),
            entries: files
                .into_iter()
                .sorted_by(|a, b| a.name.cmp(&b.name))
                .cloned()
                .collect(),
        })
        .collect()
}
