//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Inspect Android application packages: manifest, classes, class tree, GraphML and native libraries
#[derive(Parser, Debug)]
#[command(name = "apkdetails")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file (default: ./.apkdetails.toml if present)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write report files and print the native-library section
    Report {
        /// APK file
        #[arg(value_hint = ValueHint::FilePath)]
        apk: PathBuf,

        /// Class list file (one class per line)
        #[arg(long, value_hint = ValueHint::FilePath)]
        classes: Option<PathBuf>,

        /// Output directory (overrides config)
        #[arg(short, long, value_hint = ValueHint::DirPath)]
        output: Option<PathBuf>,

        /// Write the manifest
        #[arg(long)]
        manifest: bool,

        /// Write the sorted class list
        #[arg(long)]
        class_list: bool,

        /// Write the indented class tree
        #[arg(long)]
        tree: bool,

        /// Write the GraphML class graph
        #[arg(long)]
        graph: bool,
    },

    /// Show native libraries grouped by architecture
    Arch {
        /// APK file
        #[arg(value_hint = ValueHint::FilePath)]
        apk: PathBuf,
    },

    /// Print the class tree
    Tree {
        /// Class list file
        #[arg(long, value_hint = ValueHint::FilePath)]
        classes: PathBuf,

        /// Spaces per level (overrides config)
        #[arg(long)]
        indent: Option<usize>,

        /// Draw with box characters
        #[arg(long)]
        pretty: bool,
    },

    /// Print the class tree as GraphML
    Graph {
        /// Class list file
        #[arg(long, value_hint = ValueHint::FilePath)]
        classes: PathBuf,
    },

    /// Print the sorted class list
    Classes {
        /// Class list file
        #[arg(long, value_hint = ValueHint::FilePath)]
        classes: PathBuf,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings
    Show,
    /// Show config file locations
    Path,
}
