//! Domain layer: tree construction and architecture grouping
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod architecture;
pub mod builder;
pub mod class;
pub mod error;
pub mod tree;

pub use architecture::{group_architectures, ArchiveEntry, Architecture, NATIVE_LIB_PREFIX};
pub use builder::TreeBuilder;
pub use class::{DexClass, PACKAGE_DELIMITER};
pub use error::{DomainError, DomainResult};
pub use tree::{Node, PreOrderIter, Tree, TreePath};
