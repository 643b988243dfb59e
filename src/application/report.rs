//! Report service: writes manifest, class list, class tree and GraphML files.
//!
//! Every output is generated and written on its own; a failure in one is
//! recorded in the [`ReportSummary`] and does not stop the others.

use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::application::error_ext::IoResultExt;
use crate::application::{ApplicationError, ApplicationResult};
use crate::config::Settings;
use crate::domain::{DexClass, DomainError, Tree, TreeBuilder};
use crate::infrastructure::traits::ArchiveReader;
use crate::render::{
    ClassListPrinter, ClassTreeAdapter, GraphMlAdapter, GraphMlPrinter, TreePrinter,
};

/// One file output of a report run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    Manifest,
    ClassList,
    ClassTree,
    ClassGraph,
}

impl ReportKind {
    pub const ALL: [ReportKind; 4] = [
        ReportKind::Manifest,
        ReportKind::ClassList,
        ReportKind::ClassTree,
        ReportKind::ClassGraph,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            ReportKind::Manifest => "manifest.xml",
            ReportKind::ClassList => "classlist.txt",
            ReportKind::ClassTree => "classtree.txt",
            ReportKind::ClassGraph => "classgraph.graphml",
        }
    }

    /// Whether the output is derived from class records.
    pub fn needs_classes(self) -> bool {
        !matches!(self, ReportKind::Manifest)
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportKind::Manifest => "Manifest File",
            ReportKind::ClassList => "Class List file",
            ReportKind::ClassTree => "Class Tree file",
            ReportKind::ClassGraph => "Class graph",
        };
        write!(f, "{}", name)
    }
}

/// Destination of every requested output; `None` means "not requested".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputPaths {
    manifest: Option<PathBuf>,
    class_list: Option<PathBuf>,
    class_tree: Option<PathBuf>,
    class_graph: Option<PathBuf>,
}

impl OutputPaths {
    /// Resolve `kinds` to `<output_dir>/<apk stem>/<file name>`.
    pub fn resolve(output_dir: &Path, apk: &Path, kinds: &[ReportKind]) -> Self {
        let stem = apk
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "apk".to_string());
        let dir = output_dir.join(stem);

        let mut paths = Self::default();
        for &kind in kinds {
            paths.set(kind, dir.join(kind.file_name()));
        }
        paths
    }

    pub fn set(&mut self, kind: ReportKind, path: PathBuf) {
        let slot = match kind {
            ReportKind::Manifest => &mut self.manifest,
            ReportKind::ClassList => &mut self.class_list,
            ReportKind::ClassTree => &mut self.class_tree,
            ReportKind::ClassGraph => &mut self.class_graph,
        };
        *slot = Some(path);
    }

    pub fn get(&self, kind: ReportKind) -> Option<&Path> {
        match kind {
            ReportKind::Manifest => self.manifest.as_deref(),
            ReportKind::ClassList => self.class_list.as_deref(),
            ReportKind::ClassTree => self.class_tree.as_deref(),
            ReportKind::ClassGraph => self.class_graph.as_deref(),
        }
    }

    /// Requested outputs in report order.
    pub fn requested(&self) -> impl Iterator<Item = (ReportKind, &Path)> {
        ReportKind::ALL
            .into_iter()
            .filter_map(move |kind| self.get(kind).map(|path| (kind, path)))
    }

    pub fn is_empty(&self) -> bool {
        self.requested().next().is_none()
    }
}

/// Result of writing one output.
#[derive(Debug)]
pub struct ReportOutcome {
    pub kind: ReportKind,
    pub path: PathBuf,
    pub result: ApplicationResult<()>,
}

#[derive(Debug, Default)]
pub struct ReportSummary {
    pub outcomes: Vec<ReportOutcome>,
}

impl ReportSummary {
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &ReportOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    pub fn outcome(&self, kind: ReportKind) -> Option<&ReportOutcome> {
        self.outcomes.iter().find(|o| o.kind == kind)
    }
}

/// Build the class hierarchy used by the tree and graph outputs.
#[instrument(level = "debug", skip_all, fields(classes = classes.len()))]
pub fn build_class_tree(classes: &[DexClass]) -> Result<Tree<DexClass>, DomainError> {
    TreeBuilder::default().build(classes.iter().cloned())
}

pub struct ReportService {
    settings: Settings,
}

impl ReportService {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Write every requested output.
    ///
    /// The class tree is built once and shared by the tree and graph outputs.
    #[instrument(level = "debug", skip_all)]
    pub fn generate(
        &self,
        archive: &dyn ArchiveReader,
        classes: &[DexClass],
        paths: &OutputPaths,
    ) -> ReportSummary {
        let mut summary = ReportSummary::default();

        let needs_tree = paths.get(ReportKind::ClassTree).is_some()
            || paths.get(ReportKind::ClassGraph).is_some();
        let tree = if needs_tree {
            Some(build_class_tree(classes))
        } else {
            None
        };

        for (kind, path) in paths.requested() {
            info!("{}: {}", kind, path.display());
            let result = match kind {
                ReportKind::Manifest => {
                    let text = self.manifest_text(archive);
                    write_output(path, |out| writeln!(out, "{}", text))
                }
                ReportKind::ClassList => {
                    write_output(path, |out| self.write_class_list(out, classes))
                }
                ReportKind::ClassTree => match &tree {
                    Some(Ok(tree)) => write_output(path, |out| self.write_class_tree(out, tree)),
                    Some(Err(e)) => Err(ApplicationError::from(e.clone())),
                    None => Ok(()),
                },
                ReportKind::ClassGraph => match &tree {
                    Some(Ok(tree)) => write_output(path, |out| self.write_class_graph(out, tree)),
                    Some(Err(e)) => Err(ApplicationError::from(e.clone())),
                    None => Ok(()),
                },
            };

            if let Err(e) = &result {
                warn!("{} failed: {}", kind, e);
            }
            summary.outcomes.push(ReportOutcome {
                kind,
                path: path.to_path_buf(),
                result,
            });
        }

        summary
    }

    /// Manifest text, or a message describing why it cannot be shown.
    pub fn manifest_text(&self, archive: &dyn ArchiveReader) -> String {
        let name = &self.settings.manifest_name;
        match archive.read_text(name) {
            Ok(text) if looks_like_text_xml(&text) => text,
            Ok(_) => format!("{} is stored as binary XML, which cannot be decoded", name),
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                format!("{} is stored as binary XML, which cannot be decoded", name)
            }
            Err(e) => format!("Unable to read {}: {}", name, e),
        }
    }

    pub fn write_class_list<W: Write>(&self, out: &mut W, classes: &[DexClass]) -> io::Result<()> {
        ClassListPrinter.print(out, classes)
    }

    pub fn write_class_tree<W: Write>(&self, out: &mut W, tree: &Tree<DexClass>) -> io::Result<()> {
        TreePrinter::with_indent(ClassTreeAdapter, self.settings.indent_width).print(out, tree.root())
    }

    pub fn write_class_graph<W: Write>(
        &self,
        out: &mut W,
        tree: &Tree<DexClass>,
    ) -> io::Result<()> {
        let adapter = GraphMlAdapter::new(self.settings.graph_root_label.clone());
        GraphMlPrinter::new(adapter).print(out, tree.root())
    }
}

fn looks_like_text_xml(text: &str) -> bool {
    text.trim_start_matches('\u{feff}').trim_start().starts_with('<')
}

/// Create `path` (and its parent directories) and hand a buffered writer to `render`.
fn write_output<F>(path: &Path, render: F) -> ApplicationResult<()>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_path_context("create output directory", parent)?;
    }
    let file = File::create(path).with_path_context("create output", path)?;
    let mut out = BufWriter::new(file);
    render(&mut out).with_path_context("write output", path)?;
    out.flush().with_path_context("write output", path)?;
    debug!(path = %path.display(), "wrote output");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::traits::InMemoryArchive;

    #[test]
    fn test_resolve_uses_apk_stem() {
        let paths = OutputPaths::resolve(
            Path::new("/out"),
            Path::new("/tmp/app-release.apk"),
            &[ReportKind::ClassTree],
        );
        assert_eq!(
            paths.get(ReportKind::ClassTree),
            Some(Path::new("/out/app-release/classtree.txt"))
        );
        assert!(paths.get(ReportKind::Manifest).is_none());
    }

    #[test]
    fn test_requested_keeps_report_order() {
        let paths = OutputPaths::resolve(
            Path::new("/out"),
            Path::new("a.apk"),
            &[ReportKind::ClassGraph, ReportKind::Manifest],
        );
        let kinds: Vec<ReportKind> = paths.requested().map(|(k, _)| k).collect();
        assert_eq!(kinds, vec![ReportKind::Manifest, ReportKind::ClassGraph]);
    }

    #[test]
    fn test_manifest_text_fallbacks() {
        let service = ReportService::new(Settings::default());

        let text = InMemoryArchive::default().with_text("AndroidManifest.xml", "<manifest/>");
        assert_eq!(service.manifest_text(&text), "<manifest/>");

        let binary = InMemoryArchive::default().with_text("AndroidManifest.xml", "\u{3}\u{0}\u{8}\u{0}");
        assert!(service.manifest_text(&binary).contains("binary XML"));

        let missing = InMemoryArchive::default();
        assert!(service.manifest_text(&missing).starts_with("Unable to read AndroidManifest.xml"));
    }
}
