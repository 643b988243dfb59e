//! Application layer: report services
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod architectures;
pub mod error;
pub mod error_ext;
pub mod report;

pub use architectures::{format_architectures, format_size, load_architectures};
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use report::{
    build_class_tree, OutputPaths, ReportKind, ReportOutcome, ReportService, ReportSummary,
};
