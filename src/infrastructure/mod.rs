//! Infrastructure layer: archive and class-list readers
//!
//! This layer implements the I/O boundary traits used by the services.

pub mod archive;
pub mod class_source;
pub mod error;
pub mod traits;

pub use archive::ZipArchiveReader;
pub use class_source::ClassListFile;
pub use error::{InfraError, InfraResult};
pub use traits::{ArchiveReader, ClassSource, InMemoryArchive};
