//! Command dispatch

use std::io::{self, Write};
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::{
    build_class_tree, format_architectures, load_architectures, ApplicationError, OutputPaths,
    ReportKind, ReportService,
};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings, MAX_INDENT_WIDTH};
use crate::domain::DexClass;
use crate::infrastructure::{ClassListFile, ClassSource, InfraError, ZipArchiveReader};
use crate::render::{ClassTreeAdapter, TreeNodeConvert, TreePrinter};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        Cli::command()
            .print_help()
            .map_err(|e| InfraError::io("print help", e))?;
        return Ok(());
    };

    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let settings = Settings::load(cli.config.as_deref())?;
    debug!(?settings, "loaded settings");

    match command {
        Commands::Report {
            apk,
            classes,
            output,
            manifest,
            class_list,
            tree,
            graph,
        } => {
            let selected: Vec<ReportKind> = [
                (*manifest, ReportKind::Manifest),
                (*class_list, ReportKind::ClassList),
                (*tree, ReportKind::ClassTree),
                (*graph, ReportKind::ClassGraph),
            ]
            .into_iter()
            .filter_map(|(on, kind)| on.then_some(kind))
            .collect();
            _report(settings, apk, classes.as_deref(), output.as_deref(), selected)
        }
        Commands::Arch { apk } => _arch(apk),
        Commands::Tree {
            classes,
            indent,
            pretty,
        } => _tree(&settings, classes, *indent, *pretty),
        Commands::Graph { classes } => _graph(settings, classes),
        Commands::Classes { classes } => _classes(settings, classes),
        Commands::Config { command } => _config(&settings, command),
        Commands::Completion { .. } => Ok(()),
    }
}

fn open_archive(apk: &Path) -> CliResult<ZipArchiveReader> {
    if !apk.is_file() {
        return Err(InfraError::Archive {
            path: apk.to_path_buf(),
            message: "no such file".into(),
        }
        .into());
    }
    Ok(ZipArchiveReader::new(apk))
}

fn read_classes(path: &Path) -> CliResult<Vec<DexClass>> {
    ClassListFile::new(path)
        .classes()
        .map_err(|e| InfraError::io(format!("read class list {}", path.display()), e).into())
}

fn stdout_err(e: io::Error) -> CliError {
    InfraError::io("write to stdout", e).into()
}

/// Class-derived outputs cannot be produced without a class list.
fn check_class_outputs(selected: &[ReportKind]) -> CliResult<()> {
    match selected.iter().find(|k| k.needs_classes()) {
        Some(kind) => Err(CliError::Usage(format!("{} requires --classes", kind))),
        None => Ok(()),
    }
}

#[instrument(skip(settings))]
fn _report(
    settings: Settings,
    apk: &Path,
    classes: Option<&Path>,
    output_dir: Option<&Path>,
    selected: Vec<ReportKind>,
) -> CliResult<()> {
    let archive = open_archive(apk)?;

    let kinds: Vec<ReportKind> = match (selected.is_empty(), classes) {
        (true, Some(_)) => ReportKind::ALL.to_vec(),
        (true, None) => {
            output::warning("no --classes given, skipping class outputs");
            vec![ReportKind::Manifest]
        }
        (false, None) => {
            check_class_outputs(&selected)?;
            selected
        }
        (false, Some(_)) => selected,
    };

    let class_records = match classes {
        Some(path) => read_classes(path)?,
        None => Vec::new(),
    };

    let output_dir = output_dir.unwrap_or(settings.output_dir.as_path()).to_path_buf();
    let paths = OutputPaths::resolve(&output_dir, apk, &kinds);
    let service = ReportService::new(settings);

    let summary = service.generate(&archive, &class_records, &paths);
    for outcome in &summary.outcomes {
        match &outcome.result {
            Ok(()) => output::success_detail(&format!("{}: {}", outcome.kind, outcome.path.display())),
            Err(e) => output::failure(&format!("{}: {}", outcome.kind, e)),
        }
    }

    _arch(apk)?;

    if summary.is_success() {
        Ok(())
    } else {
        Err(CliError::ReportFailed {
            failed: summary.failures().count(),
            total: summary.outcomes.len(),
        })
    }
}

#[instrument]
fn _arch(apk: &Path) -> CliResult<()> {
    let archive = open_archive(apk)?;
    let architectures = load_architectures(&archive).map_err(|e| InfraError::Archive {
        path: apk.to_path_buf(),
        message: e.to_string(),
    })?;
    output::header("Architectures");
    print!("{}", format_architectures(&architectures));
    Ok(())
}

#[instrument(skip(settings))]
fn _tree(settings: &Settings, classes: &Path, indent: Option<usize>, pretty: bool) -> CliResult<()> {
    let indent = indent.unwrap_or(settings.indent_width);
    if indent == 0 || indent > MAX_INDENT_WIDTH {
        return Err(CliError::InvalidArgs(format!(
            "--indent must be between 1 and {}",
            MAX_INDENT_WIDTH
        )));
    }

    let records = read_classes(classes)?;
    let tree = build_class_tree(&records).map_err(ApplicationError::from)?;

    if pretty {
        output::info(&tree.root().to_tree_string(&ClassTreeAdapter));
        return Ok(());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    TreePrinter::with_indent(ClassTreeAdapter, indent)
        .print(&mut out, tree.root())
        .map_err(stdout_err)
}

#[instrument(skip(settings))]
fn _graph(settings: Settings, classes: &Path) -> CliResult<()> {
    let records = read_classes(classes)?;
    let tree = build_class_tree(&records).map_err(ApplicationError::from)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    ReportService::new(settings)
        .write_class_graph(&mut out, &tree)
        .map_err(stdout_err)
}

#[instrument(skip(settings))]
fn _classes(settings: Settings, classes: &Path) -> CliResult<()> {
    let records = read_classes(classes)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    ReportService::new(settings)
        .write_class_list(&mut out, &records)
        .map_err(stdout_err)?;
    out.flush().map_err(stdout_err)
}

fn _config(settings: &Settings, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::action("global", &path.display()),
                None => output::action("global", "<unavailable>"),
            }
            let cwd = std::env::current_dir().map_err(|e| InfraError::io("current directory", e))?;
            output::action("local", &local_config_path(&cwd).display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_output_without_classes_is_usage_error() {
        let err = check_class_outputs(&[ReportKind::Manifest, ReportKind::ClassTree]).unwrap_err();

        assert!(matches!(err, CliError::Usage(_)));
        assert_eq!(err.exit_code(), crate::exitcode::USAGE);
        assert_eq!(err.to_string(), "Class Tree file requires --classes");
    }

    #[test]
    fn test_manifest_only_needs_no_classes() {
        assert!(check_class_outputs(&[ReportKind::Manifest]).is_ok());
        assert!(check_class_outputs(&[]).is_ok());
    }
}
