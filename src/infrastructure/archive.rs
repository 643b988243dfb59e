//! ZIP-backed archive reader.

use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;

use tracing::{debug, instrument};
use zip::ZipArchive;

use crate::domain::ArchiveEntry;
use crate::infrastructure::traits::ArchiveReader;

/// Reads entries of an APK (ZIP) file. The file is reopened per call.
#[derive(Debug, Clone)]
pub struct ZipArchiveReader {
    path: PathBuf,
}

impl ZipArchiveReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn open(&self) -> io::Result<ZipArchive<File>> {
        let file = File::open(&self.path)?;
        ZipArchive::new(file).map_err(zip_error)
    }
}

/// Upper bound on the buffer reserved from an entry's declared size.
const MAX_PREALLOCATION: u64 = 1024 * 1024;

/// The declared size comes from the archive header and is not trusted.
fn initial_capacity(declared: u64) -> usize {
    usize::try_from(declared.min(MAX_PREALLOCATION)).unwrap_or(0)
}

fn zip_error(e: zip::result::ZipError) -> io::Error {
    match e {
        zip::result::ZipError::Io(inner) => inner,
        zip::result::ZipError::FileNotFound => {
            io::Error::new(io::ErrorKind::NotFound, "entry not found in archive")
        }
        other => io::Error::new(io::ErrorKind::InvalidData, other),
    }
}

impl ArchiveReader for ZipArchiveReader {
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    fn entries(&self) -> io::Result<Vec<ArchiveEntry>> {
        let mut archive = self.open()?;
        let mut entries = Vec::with_capacity(archive.len());

        for i in 0..archive.len() {
            let entry = archive.by_index(i).map_err(zip_error)?;
            entries.push(ArchiveEntry {
                name: entry.name().to_string(),
                is_directory: entry.is_dir(),
                size: if entry.is_dir() { 0 } else { entry.size() },
            });
        }

        debug!(count = entries.len(), "read archive entries");
        Ok(entries)
    }

    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    fn read_text(&self, name: &str) -> io::Result<String> {
        let mut archive = self.open()?;
        let mut entry = archive.by_name(name).map_err(zip_error)?;

        let mut bytes = Vec::with_capacity(initial_capacity(entry.size()));
        entry.read_to_end(&mut bytes)?;
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}
