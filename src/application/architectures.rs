//! Native-library report section.

use std::fmt::Write as _;

use tracing::instrument;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{group_architectures, Architecture};
use crate::infrastructure::traits::ArchiveReader;

/// Read the archive entries and group the native libraries by ABI.
#[instrument(level = "debug", skip_all)]
pub fn load_architectures(archive: &dyn ArchiveReader) -> ApplicationResult<Vec<Architecture>> {
    let entries = archive
        .entries()
        .map_err(|e| ApplicationError::OperationFailed {
            context: "list archive entries".into(),
            source: Box::new(e),
        })?;
    Ok(group_architectures(&entries))
}

/// Human-readable size: bytes below 1 KiB, then KiB and MiB with one decimal.
pub fn format_size(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = KIB * 1024.0;

    let value = bytes as f64;
    if value >= MIB {
        format!("{:.1} MiB", value / MIB)
    } else if value >= KIB {
        format!("{:.1} KiB", value / KIB)
    } else {
        format!("{} B", bytes)
    }
}

/// Format the architecture groups as a plain-text report section.
pub fn format_architectures(architectures: &[Architecture]) -> String {
    let mut out = String::new();
    if architectures.is_empty() {
        out.push_str("No native libraries\n");
        return out;
    }

    // writing into a String cannot fail
    let _ = writeln!(out, "Native libraries: {} architecture(s)", architectures.len());
    for arch in architectures {
        let _ = writeln!(
            out,
            "{} ({} file(s), {})",
            arch.name,
            arch.entries.len(),
            format_size(arch.total_size())
        );
        for entry in &arch.entries {
            let _ = writeln!(out, "  {} ({})", entry.name, format_size(entry.size));
        }
    }
    out
}
