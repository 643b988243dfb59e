//! I/O boundary traits for testability
//!
//! These traits abstract the archive and class readers, allowing services
//! to be tested with in-memory implementations.

use std::io;

use crate::domain::{ArchiveEntry, DexClass};

/// Packaged application archive (APK) abstraction.
pub trait ArchiveReader {
    /// List every entry with its directory flag and uncompressed size.
    fn entries(&self) -> io::Result<Vec<ArchiveEntry>>;

    /// Read the named entry as UTF-8 text.
    ///
    /// Fails with `NotFound` for a missing entry and `InvalidData` for
    /// content that is not UTF-8.
    fn read_text(&self, name: &str) -> io::Result<String>;
}

/// Supplier of parsed class records.
pub trait ClassSource {
    fn classes(&self) -> io::Result<Vec<DexClass>>;
}

// ============================================================
// IN-MEMORY IMPLEMENTATION
// ============================================================

/// Archive held in memory: entry list plus text contents by name.
#[derive(Debug, Clone, Default)]
pub struct InMemoryArchive {
    pub entries: Vec<ArchiveEntry>,
    pub texts: Vec<(String, String)>,
}

impl InMemoryArchive {
    pub fn new(entries: Vec<ArchiveEntry>) -> Self {
        Self {
            entries,
            texts: Vec::new(),
        }
    }

    pub fn with_text(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.texts.push((name.into(), content.into()));
        self
    }
}

impl ArchiveReader for InMemoryArchive {
    fn entries(&self) -> io::Result<Vec<ArchiveEntry>> {
        Ok(self.entries.clone())
    }

    fn read_text(&self, name: &str) -> io::Result<String> {
        self.texts
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, content)| content.clone())
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, format!("no entry named {name}"))
            })
    }
}
