//! Class list files: one class per line, dotted name or type descriptor.

use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::{debug, instrument};

use crate::domain::{DexClass, DomainError};
use crate::infrastructure::traits::ClassSource;

#[derive(Debug, Clone)]
pub struct ClassListFile {
    path: PathBuf,
}

impl ClassListFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Parse class list content. Blank lines and `#` comments are skipped.
pub fn parse_class_list(content: &str) -> Result<Vec<DexClass>, (usize, DomainError)> {
    content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(number, line)| DexClass::parse(line).map_err(|e| (number, e)))
        .collect()
}

impl ClassSource for ClassListFile {
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    fn classes(&self) -> io::Result<Vec<DexClass>> {
        let content = fs::read_to_string(&self.path)?;
        let classes = parse_class_list(&content).map_err(|(line, e)| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{}:{}: {}", self.path.display(), line, e),
            )
        })?;
        debug!(count = classes.len(), "read class list");
        Ok(classes)
    }
}
